//! Composition of a datagram source and the decoder.

use thiserror::Error;

use crate::protocol::error::DecodeError;
use crate::protocol::{TelemetryPacket, decode_packet};
use crate::source::{DatagramSource, SourceError};

/// One decoded packet with the timestamp its datagram carried, if any.
#[derive(Debug, Clone)]
pub struct FeedEvent {
    pub ts: Option<f64>,
    pub packet: TelemetryPacket,
}

/// Failure of one feed step, keeping transport and decode failures apart.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Pulls datagrams from a source and decodes them one at a time.
///
/// Decode failures are per-datagram: the feed stays usable afterwards and
/// the caller chooses whether to continue. Nothing is retried internally.
pub struct PacketFeed<S> {
    source: S,
}

impl<S: DatagramSource> PacketFeed<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Next decoded packet; `None` once a finite source is drained.
    pub fn next_packet(&mut self) -> Result<Option<FeedEvent>, FeedError> {
        let datagram = match self.source.next_datagram()? {
            Some(datagram) => datagram,
            None => return Ok(None),
        };
        let packet = decode_packet(&datagram.data)?;
        Ok(Some(FeedEvent {
            ts: datagram.ts,
            packet,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::{FeedError, PacketFeed};
    use crate::protocol::layout;
    use crate::protocol::packets::testenc::Enc;
    use crate::source::{Datagram, DatagramSource, SourceError};

    struct VecSource {
        datagrams: Vec<Datagram>,
    }

    impl DatagramSource for VecSource {
        fn next_datagram(&mut self) -> Result<Option<Datagram>, SourceError> {
            if self.datagrams.is_empty() {
                return Ok(None);
            }
            Ok(Some(self.datagrams.remove(0)))
        }
    }

    fn event_datagram() -> Vec<u8> {
        let mut e = Enc::new();
        e.u16(2021);
        e.bytes(&[21, 1, 5, 1, 3]);
        e.u64(1);
        e.f32(0.0);
        e.u32(1);
        e.bytes(&[0, 255]);
        e.bytes(layout::CODE_DRIVE_THROUGH_SERVED);
        e.u8(9);
        e.bytes(&[0; 7]);
        e.buf
    }

    #[test]
    fn feed_decodes_until_drained() {
        let source = VecSource {
            datagrams: vec![
                Datagram {
                    ts: Some(1.5),
                    data: event_datagram(),
                },
                Datagram {
                    ts: Some(2.0),
                    data: event_datagram(),
                },
            ],
        };
        let mut feed = PacketFeed::new(source);

        let first = feed.next_packet().unwrap().unwrap();
        assert_eq!(first.ts, Some(1.5));
        assert_eq!(first.packet.body.id().name(), "event");
        assert!(feed.next_packet().unwrap().is_some());
        assert!(feed.next_packet().unwrap().is_none());
    }

    #[test]
    fn feed_surfaces_decode_errors_and_stays_usable() {
        let source = VecSource {
            datagrams: vec![
                Datagram {
                    ts: None,
                    data: vec![0u8; 4],
                },
                Datagram {
                    ts: None,
                    data: event_datagram(),
                },
            ],
        };
        let mut feed = PacketFeed::new(source);

        let err = feed.next_packet().unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
        assert!(feed.next_packet().unwrap().is_some());
    }
}
