//! Capture-file replay source.
//!
//! Reads PCAP or PCAPNG files and emits ready-to-decode telemetry
//! datagrams: frames are sliced down to their UDP payload and filtered by
//! destination port here, so the decoder only ever sees datagram payloads.
//! Capture timestamps are preserved in seconds.

pub mod error;
mod frame;
mod layout;
mod parser;

pub use parser::PcapReplaySource;
