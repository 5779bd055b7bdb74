use serde::Serialize;

use crate::protocol::error::DecodeError;
use crate::protocol::layout;
use crate::protocol::reader::TelemetryReader;

/// One player in the multiplayer lobby.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LobbyPlayer {
    pub ai_controlled: u8,
    pub team_id: u8,
    pub nationality: u8,
    /// Decoded from the fixed 48-byte UTF-8 field, cut at the first NUL.
    pub name: String,
    pub car_number: u8,
    pub ready_status: u8,
}

impl LobbyPlayer {
    fn decode(reader: &mut TelemetryReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            ai_controlled: reader.read_u8()?,
            team_id: reader.read_u8()?,
            nationality: reader.read_u8()?,
            name: reader.read_name::<{ layout::DRIVER_NAME_LEN }>()?,
            car_number: reader.read_u8()?,
            ready_status: reader.read_u8()?,
        })
    }
}

/// Lobby info body: the full slot table, with `num_players` saying how many
/// leading entries are occupied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LobbyInfoData {
    pub num_players: u8,
    pub players: Vec<LobbyPlayer>,
}

impl LobbyInfoData {
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TelemetryReader::new(body, "lobby info");
        reader.require(layout::LOBBY_INFO_BODY_LEN)?;
        let num_players = reader.read_u8()?;
        let mut players = Vec::with_capacity(layout::GRID_SIZE);
        for _ in 0..layout::GRID_SIZE {
            players.push(LobbyPlayer::decode(&mut reader)?);
        }
        Ok(Self {
            num_players,
            players,
        })
    }
}
