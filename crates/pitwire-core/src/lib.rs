//! Decoder for the UDP telemetry protocol broadcast by the racing
//! simulation.
//!
//! Datagram sources feed the protocol layer, which decodes the common
//! header, dispatches on its packet discriminator, and resolves event
//! details into one typed packet value. Parsing is byte-oriented and
//! side-effect free; all I/O is isolated in `source` modules.
//!
//! Invariants:
//! - Every decode is per-datagram; no state is carried between calls.
//! - A failure at any stage aborts that datagram's decode; partial packets
//!   are never returned.
//! - Unknown packet discriminators are errors; unknown event codes are not.
//!
//! # Examples
//! ```no_run
//! use pitwire_core::{DEFAULT_TELEMETRY_PORT, PacketFeed, UdpSocketSource};
//!
//! let source = UdpSocketSource::bind(("0.0.0.0", DEFAULT_TELEMETRY_PORT))?;
//! let mut feed = PacketFeed::new(source);
//! while let Some(event) = feed.next_packet()? {
//!     println!("{:?}", event.packet.header);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod feed;
mod protocol;
mod source;

pub use feed::{FeedError, FeedEvent, PacketFeed};
pub use protocol::error::DecodeError;
pub use protocol::event::{EventBody, EventDetail};
pub use protocol::header::{PacketHeader, PacketId};
pub use protocol::layout::{DEFAULT_TELEMETRY_PORT, GRID_SIZE, HEADER_LEN, MAX_DATAGRAM_LEN};
pub use protocol::packets::{
    CarDamage, CarDamageData, CarLap, CarMotion, CarSetup, CarSetupsData, CarStatus,
    CarStatusData, CarTelemetry, CarTelemetryData, ClassificationEntry, FinalClassificationData,
    LapData, LapHistoryEntry, LobbyInfoData, LobbyPlayer, MarshalZone, MotionData, Participant,
    ParticipantsData, SessionData, SessionHistoryData, TyreStintEntry, WeatherForecastSample,
};
pub use protocol::{PacketBody, TelemetryPacket, decode_packet};
pub use source::{Datagram, DatagramSource, PcapReplaySource, SourceError, UdpSocketSource};
