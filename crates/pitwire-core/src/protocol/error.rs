use thiserror::Error;

/// Errors returned by datagram decoding.
///
/// Failures are local to one datagram; recovery is the caller discarding it
/// and reading the next.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{shape} too short: need {needed} bytes, got {actual}")]
    TooShort {
        shape: &'static str,
        needed: usize,
        actual: usize,
    },
    #[error("unknown packet id {id}")]
    UnknownPacketId { id: u8 },
}
