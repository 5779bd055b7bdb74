use serde::Serialize;

use crate::protocol::error::DecodeError;
use crate::protocol::layout;
use crate::protocol::reader::TelemetryReader;

/// Final result of one car, sent once at session end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationEntry {
    pub position: u8,
    pub num_laps: u8,
    pub grid_position: u8,
    pub points: u8,
    pub num_pit_stops: u8,
    pub result_status: u8,
    pub best_lap_time_ms: u32,
    /// Seconds, without penalties applied.
    pub total_race_time: f64,
    /// Seconds.
    pub penalties_time: u8,
    pub num_penalties: u8,
    pub num_tyre_stints: u8,
    pub tyre_stints_actual: [u8; layout::TYRE_STINT_COUNT],
    pub tyre_stints_visual: [u8; layout::TYRE_STINT_COUNT],
}

impl ClassificationEntry {
    fn decode(reader: &mut TelemetryReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            position: reader.read_u8()?,
            num_laps: reader.read_u8()?,
            grid_position: reader.read_u8()?,
            points: reader.read_u8()?,
            num_pit_stops: reader.read_u8()?,
            result_status: reader.read_u8()?,
            best_lap_time_ms: reader.read_u32()?,
            total_race_time: reader.read_f64()?,
            penalties_time: reader.read_u8()?,
            num_penalties: reader.read_u8()?,
            num_tyre_stints: reader.read_u8()?,
            tyre_stints_actual: reader.read_bytes()?,
            tyre_stints_visual: reader.read_bytes()?,
        })
    }
}

/// Final classification body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalClassificationData {
    pub num_cars: u8,
    pub classification: Vec<ClassificationEntry>,
}

impl FinalClassificationData {
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TelemetryReader::new(body, "final classification");
        reader.require(layout::FINAL_CLASSIFICATION_BODY_LEN)?;
        let num_cars = reader.read_u8()?;
        let mut classification = Vec::with_capacity(layout::GRID_SIZE);
        for _ in 0..layout::GRID_SIZE {
            classification.push(ClassificationEntry::decode(&mut reader)?);
        }
        Ok(Self {
            num_cars,
            classification,
        })
    }
}
