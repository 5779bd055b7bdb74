use serde::Serialize;

use super::error::DecodeError;
use super::event::EventBody;
use super::header::{PacketHeader, PacketId};
use super::layout;
use super::packets::{
    CarDamageData, CarSetupsData, CarStatusData, CarTelemetryData, FinalClassificationData,
    LapData, LobbyInfoData, MotionData, ParticipantsData, SessionData, SessionHistoryData,
};

/// One fully decoded datagram: the common header plus the body its
/// discriminator selected. Event bodies are always resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryPacket {
    pub header: PacketHeader,
    pub body: PacketBody,
}

/// The closed set of packet bodies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PacketBody {
    Motion(MotionData),
    Session(SessionData),
    LapData(LapData),
    Event(EventBody),
    Participants(ParticipantsData),
    CarSetups(CarSetupsData),
    CarTelemetry(CarTelemetryData),
    CarStatus(CarStatusData),
    FinalClassification(FinalClassificationData),
    LobbyInfo(LobbyInfoData),
    CarDamage(CarDamageData),
    SessionHistory(SessionHistoryData),
}

impl PacketBody {
    /// Variant tag of this body.
    pub fn id(&self) -> PacketId {
        match self {
            PacketBody::Motion(_) => PacketId::Motion,
            PacketBody::Session(_) => PacketId::Session,
            PacketBody::LapData(_) => PacketId::LapData,
            PacketBody::Event(_) => PacketId::Event,
            PacketBody::Participants(_) => PacketId::Participants,
            PacketBody::CarSetups(_) => PacketId::CarSetups,
            PacketBody::CarTelemetry(_) => PacketId::CarTelemetry,
            PacketBody::CarStatus(_) => PacketId::CarStatus,
            PacketBody::FinalClassification(_) => PacketId::FinalClassification,
            PacketBody::LobbyInfo(_) => PacketId::LobbyInfo,
            PacketBody::CarDamage(_) => PacketId::CarDamage,
            PacketBody::SessionHistory(_) => PacketId::SessionHistory,
        }
    }
}

/// Decode one datagram into a typed packet.
///
/// The header is decoded first, its discriminator selects the body layout,
/// and event bodies get their details resolved before anything is returned.
/// Failures are local to the datagram; the caller decides whether to read
/// the next one. Trailing bytes beyond the body's required width are
/// ignored.
///
/// # Examples
/// ```
/// use pitwire_core::{PacketBody, decode_packet};
///
/// // 25-byte header (packet id 3: event) followed by an event body.
/// let mut datagram = Vec::new();
/// datagram.extend_from_slice(&2021u16.to_le_bytes()); // packet format
/// datagram.extend_from_slice(&[21, 1, 5, 1, 3]); // versions and packet id
/// datagram.extend_from_slice(&7u64.to_le_bytes()); // session uid
/// datagram.extend_from_slice(&128.5f32.to_le_bytes()); // session time
/// datagram.extend_from_slice(&1000u32.to_le_bytes()); // frame identifier
/// datagram.extend_from_slice(&[0, 255]); // player car indices
/// datagram.extend_from_slice(b"LGOT"); // lights out
/// datagram.extend_from_slice(&[0u8; 8]); // details region
///
/// let packet = decode_packet(&datagram)?;
/// assert_eq!(packet.header.session_uid, 7);
/// match packet.body {
///     PacketBody::Event(event) => assert_eq!(event.code, "LGOT"),
///     other => panic!("unexpected body: {other:?}"),
/// }
/// # Ok::<(), pitwire_core::DecodeError>(())
/// ```
pub fn decode_packet(datagram: &[u8]) -> Result<TelemetryPacket, DecodeError> {
    let header = PacketHeader::decode(datagram)?;
    let id = PacketId::from_raw(header.packet_id).ok_or(DecodeError::UnknownPacketId {
        id: header.packet_id,
    })?;
    let body = &datagram[layout::HEADER_LEN..];
    let body = match id {
        PacketId::Motion => PacketBody::Motion(MotionData::decode(body)?),
        PacketId::Session => PacketBody::Session(SessionData::decode(body)?),
        PacketId::LapData => PacketBody::LapData(LapData::decode(body)?),
        PacketId::Event => PacketBody::Event(EventBody::decode(body)?),
        PacketId::Participants => PacketBody::Participants(ParticipantsData::decode(body)?),
        PacketId::CarSetups => PacketBody::CarSetups(CarSetupsData::decode(body)?),
        PacketId::CarTelemetry => PacketBody::CarTelemetry(CarTelemetryData::decode(body)?),
        PacketId::CarStatus => PacketBody::CarStatus(CarStatusData::decode(body)?),
        PacketId::FinalClassification => {
            PacketBody::FinalClassification(FinalClassificationData::decode(body)?)
        }
        PacketId::LobbyInfo => PacketBody::LobbyInfo(LobbyInfoData::decode(body)?),
        PacketId::CarDamage => PacketBody::CarDamage(CarDamageData::decode(body)?),
        PacketId::SessionHistory => PacketBody::SessionHistory(SessionHistoryData::decode(body)?),
    };
    Ok(TelemetryPacket { header, body })
}
