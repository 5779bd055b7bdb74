//! Datagram sources feeding the decoder.
//!
//! Sources own all blocking I/O and yield raw datagram buffers, one per
//! call, plus an optional capture timestamp. Live sockets never report
//! end-of-stream; finite sources (capture replay) yield `None` when
//! drained.

mod pcap;
mod socket;

pub use pcap::PcapReplaySource;
pub use socket::UdpSocketSource;

use thiserror::Error;

/// One raw datagram handed to the decoder.
#[derive(Debug, Clone)]
pub struct Datagram {
    /// Capture timestamp in seconds, when the source knows one.
    pub ts: Option<f64>,
    pub data: Vec<u8>,
}

pub trait DatagramSource {
    fn next_datagram(&mut self) -> Result<Option<Datagram>, SourceError>;
}

/// Transport-level failures, distinguishable from decode failures.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("capture parse error: {0}")]
    Capture(String),
}

impl From<pcap::error::PcapSourceError> for SourceError {
    fn from(value: pcap::error::PcapSourceError) -> Self {
        match value {
            pcap::error::PcapSourceError::Io(err) => SourceError::Io(err),
            pcap::error::PcapSourceError::Capture { context, message } => {
                SourceError::Capture(format!("{context}: {message}"))
            }
        }
    }
}
