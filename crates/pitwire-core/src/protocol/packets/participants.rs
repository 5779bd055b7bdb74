use serde::Serialize;

use crate::protocol::error::DecodeError;
use crate::protocol::layout;
use crate::protocol::reader::TelemetryReader;

/// Identity of one entrant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participant {
    pub ai_controlled: u8,
    pub driver_id: u8,
    /// Unique id of the network player in this slot; 255 for AI.
    pub network_id: u8,
    pub team_id: u8,
    pub my_team: u8,
    pub race_number: u8,
    pub nationality: u8,
    /// Decoded from the fixed 48-byte UTF-8 field, cut at the first NUL.
    pub name: String,
    /// Whether this driver's telemetry is public.
    pub your_telemetry: u8,
}

impl Participant {
    fn decode(reader: &mut TelemetryReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            ai_controlled: reader.read_u8()?,
            driver_id: reader.read_u8()?,
            network_id: reader.read_u8()?,
            team_id: reader.read_u8()?,
            my_team: reader.read_u8()?,
            race_number: reader.read_u8()?,
            nationality: reader.read_u8()?,
            name: reader.read_name::<{ layout::DRIVER_NAME_LEN }>()?,
            your_telemetry: reader.read_u8()?,
        })
    }
}

/// Participants body: the full grid, with `num_active_cars` saying how many
/// leading entries are occupied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantsData {
    pub num_active_cars: u8,
    pub participants: Vec<Participant>,
}

impl ParticipantsData {
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TelemetryReader::new(body, "participants");
        reader.require(layout::PARTICIPANTS_BODY_LEN)?;
        let num_active_cars = reader.read_u8()?;
        let mut participants = Vec::with_capacity(layout::GRID_SIZE);
        for _ in 0..layout::GRID_SIZE {
            participants.push(Participant::decode(&mut reader)?);
        }
        Ok(Self {
            num_active_cars,
            participants,
        })
    }
}
