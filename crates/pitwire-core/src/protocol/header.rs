use serde::Serialize;

use super::error::DecodeError;
use super::layout;
use super::reader::TelemetryReader;

/// Common header carried at the start of every datagram.
///
/// The header always has the same width and field order; it is decoded
/// before anything else and is exposed to callers alongside the body, since
/// callers commonly branch on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PacketHeader {
    /// Protocol format year, e.g. 2021.
    pub packet_format: u16,
    pub game_year: u8,
    pub game_major_version: u8,
    pub game_minor_version: u8,
    pub packet_version: u8,
    /// Raw body discriminator; see [`PacketId::from_raw`].
    pub packet_id: u8,
    pub session_uid: u64,
    /// Seconds since the session started.
    pub session_time: f32,
    pub frame_identifier: u32,
    pub player_car_index: u8,
    /// 255 when there is no second player.
    pub secondary_player_car_index: u8,
}

impl PacketHeader {
    /// Decode the header from the start of a datagram.
    pub fn decode(datagram: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TelemetryReader::new(datagram, "header");
        reader.require(layout::HEADER_LEN)?;
        Ok(Self {
            packet_format: reader.read_u16()?,
            game_year: reader.read_u8()?,
            game_major_version: reader.read_u8()?,
            game_minor_version: reader.read_u8()?,
            packet_version: reader.read_u8()?,
            packet_id: reader.read_u8()?,
            session_uid: reader.read_u64()?,
            session_time: reader.read_f32()?,
            frame_identifier: reader.read_u32()?,
            player_car_index: reader.read_u8()?,
            secondary_player_car_index: reader.read_u8()?,
        })
    }
}

/// Body variants selected by the header discriminator.
///
/// The set is fixed by the protocol revision; [`PacketId::from_raw`] is the
/// total mapping from wire values onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PacketId {
    Motion,
    Session,
    LapData,
    Event,
    Participants,
    CarSetups,
    CarTelemetry,
    CarStatus,
    FinalClassification,
    LobbyInfo,
    CarDamage,
    SessionHistory,
}

impl PacketId {
    /// Map a wire discriminator to a known variant.
    ///
    /// # Examples
    /// ```
    /// use pitwire_core::PacketId;
    ///
    /// assert_eq!(PacketId::from_raw(3), Some(PacketId::Event));
    /// assert_eq!(PacketId::from_raw(255), None);
    /// ```
    pub fn from_raw(raw: u8) -> Option<PacketId> {
        match raw {
            0 => Some(PacketId::Motion),
            1 => Some(PacketId::Session),
            2 => Some(PacketId::LapData),
            3 => Some(PacketId::Event),
            4 => Some(PacketId::Participants),
            5 => Some(PacketId::CarSetups),
            6 => Some(PacketId::CarTelemetry),
            7 => Some(PacketId::CarStatus),
            8 => Some(PacketId::FinalClassification),
            9 => Some(PacketId::LobbyInfo),
            10 => Some(PacketId::CarDamage),
            11 => Some(PacketId::SessionHistory),
            _ => None,
        }
    }

    /// Stable lowercase name used in CLI filters and output records.
    pub fn name(self) -> &'static str {
        match self {
            PacketId::Motion => "motion",
            PacketId::Session => "session",
            PacketId::LapData => "lap_data",
            PacketId::Event => "event",
            PacketId::Participants => "participants",
            PacketId::CarSetups => "car_setups",
            PacketId::CarTelemetry => "car_telemetry",
            PacketId::CarStatus => "car_status",
            PacketId::FinalClassification => "final_classification",
            PacketId::LobbyInfo => "lobby_info",
            PacketId::CarDamage => "car_damage",
            PacketId::SessionHistory => "session_history",
        }
    }

    /// Inverse of [`PacketId::name`].
    pub fn from_name(name: &str) -> Option<PacketId> {
        match name {
            "motion" => Some(PacketId::Motion),
            "session" => Some(PacketId::Session),
            "lap_data" => Some(PacketId::LapData),
            "event" => Some(PacketId::Event),
            "participants" => Some(PacketId::Participants),
            "car_setups" => Some(PacketId::CarSetups),
            "car_telemetry" => Some(PacketId::CarTelemetry),
            "car_status" => Some(PacketId::CarStatus),
            "final_classification" => Some(PacketId::FinalClassification),
            "lobby_info" => Some(PacketId::LobbyInfo),
            "car_damage" => Some(PacketId::CarDamage),
            "session_history" => Some(PacketId::SessionHistory),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PacketHeader, PacketId};
    use crate::protocol::error::DecodeError;
    use crate::protocol::layout;

    fn build_header() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&2021u16.to_le_bytes());
        buf.push(21); // game year
        buf.push(1); // major version
        buf.push(5); // minor version
        buf.push(1); // packet version
        buf.push(6); // packet id: car telemetry
        buf.extend_from_slice(&0x0123_4567_89ab_cdefu64.to_le_bytes());
        buf.extend_from_slice(&42.5f32.to_le_bytes());
        buf.extend_from_slice(&1800u32.to_le_bytes());
        buf.push(19);
        buf.push(255);
        buf
    }

    #[test]
    fn decode_header() {
        let buf = build_header();
        assert_eq!(buf.len(), layout::HEADER_LEN);

        let header = PacketHeader::decode(&buf).unwrap();
        assert_eq!(header.packet_format, 2021);
        assert_eq!(header.game_year, 21);
        assert_eq!(header.game_major_version, 1);
        assert_eq!(header.game_minor_version, 5);
        assert_eq!(header.packet_version, 1);
        assert_eq!(header.packet_id, 6);
        assert_eq!(header.session_uid, 0x0123_4567_89ab_cdef);
        assert_eq!(header.session_time, 42.5);
        assert_eq!(header.frame_identifier, 1800);
        assert_eq!(header.player_car_index, 19);
        assert_eq!(header.secondary_player_car_index, 255);
    }

    #[test]
    fn decode_header_too_short() {
        let buf = build_header();
        let err = PacketHeader::decode(&buf[..layout::HEADER_LEN - 1]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TooShort {
                shape: "header",
                needed: layout::HEADER_LEN,
                ..
            }
        ));
    }

    #[test]
    fn decode_header_ignores_trailing_bytes() {
        let mut buf = build_header();
        buf.extend_from_slice(&[0xff; 16]);
        let header = PacketHeader::decode(&buf).unwrap();
        assert_eq!(header.packet_id, 6);
    }

    #[test]
    fn packet_id_mapping_is_total_over_known_range() {
        for raw in 0u8..=11 {
            let id = PacketId::from_raw(raw).unwrap();
            assert_eq!(PacketId::from_name(id.name()), Some(id));
        }
        for raw in 12u8..=255 {
            assert_eq!(PacketId::from_raw(raw), None);
        }
    }
}
