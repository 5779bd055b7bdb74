use serde::Serialize;

use crate::protocol::error::DecodeError;
use crate::protocol::layout;
use crate::protocol::reader::TelemetryReader;

/// One completed (or in-progress) lap of the subject car.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapHistoryEntry {
    pub lap_time_ms: u32,
    pub sector1_time_ms: u16,
    pub sector2_time_ms: u16,
    pub sector3_time_ms: u16,
    /// Bit 0: lap valid, bits 1-3: sector 1/2/3 valid.
    pub lap_valid_bit_flags: u8,
}

impl LapHistoryEntry {
    fn decode(reader: &mut TelemetryReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            lap_time_ms: reader.read_u32()?,
            sector1_time_ms: reader.read_u16()?,
            sector2_time_ms: reader.read_u16()?,
            sector3_time_ms: reader.read_u16()?,
            lap_valid_bit_flags: reader.read_u8()?,
        })
    }
}

/// One tyre stint of the subject car.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TyreStintEntry {
    /// Lap the stint ended on; 255 for the current stint.
    pub end_lap: u8,
    pub tyre_actual_compound: u8,
    pub tyre_visual_compound: u8,
}

impl TyreStintEntry {
    fn decode(reader: &mut TelemetryReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            end_lap: reader.read_u8()?,
            tyre_actual_compound: reader.read_u8()?,
            tyre_visual_compound: reader.read_u8()?,
        })
    }
}

/// Session history body: lap and stint history for one car. The simulation
/// cycles through cars, sending one of these per car at a reduced rate.
///
/// `laps` and `tyre_stints` always hold the full fixed-capacity region; the
/// `num_*` fields say how many leading entries are meaningful.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionHistoryData {
    pub car_idx: u8,
    pub num_laps: u8,
    pub num_tyre_stints: u8,
    pub best_lap_time_lap_num: u8,
    pub best_sector1_lap_num: u8,
    pub best_sector2_lap_num: u8,
    pub best_sector3_lap_num: u8,
    pub laps: Vec<LapHistoryEntry>,
    pub tyre_stints: Vec<TyreStintEntry>,
}

impl SessionHistoryData {
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TelemetryReader::new(body, "session history");
        reader.require(layout::SESSION_HISTORY_BODY_LEN)?;
        let car_idx = reader.read_u8()?;
        let num_laps = reader.read_u8()?;
        let num_tyre_stints = reader.read_u8()?;
        let best_lap_time_lap_num = reader.read_u8()?;
        let best_sector1_lap_num = reader.read_u8()?;
        let best_sector2_lap_num = reader.read_u8()?;
        let best_sector3_lap_num = reader.read_u8()?;
        let mut laps = Vec::with_capacity(layout::LAP_HISTORY_COUNT);
        for _ in 0..layout::LAP_HISTORY_COUNT {
            laps.push(LapHistoryEntry::decode(&mut reader)?);
        }
        let mut tyre_stints = Vec::with_capacity(layout::TYRE_STINT_COUNT);
        for _ in 0..layout::TYRE_STINT_COUNT {
            tyre_stints.push(TyreStintEntry::decode(&mut reader)?);
        }
        Ok(Self {
            car_idx,
            num_laps,
            num_tyre_stints,
            best_lap_time_lap_num,
            best_sector1_lap_num,
            best_sector2_lap_num,
            best_sector3_lap_num,
            laps,
            tyre_stints,
        })
    }
}
