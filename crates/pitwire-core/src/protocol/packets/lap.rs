use serde::Serialize;

use crate::protocol::error::DecodeError;
use crate::protocol::layout;
use crate::protocol::reader::TelemetryReader;

/// Lap progress and pit state for one car.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarLap {
    pub last_lap_time_ms: u32,
    pub current_lap_time_ms: u32,
    pub sector1_time_ms: u16,
    pub sector2_time_ms: u16,
    /// Metres travelled around the current lap; can be negative before the
    /// line is crossed.
    pub lap_distance: f32,
    pub total_distance: f32,
    /// Seconds, SC delta for the player.
    pub safety_car_delta: f32,
    pub car_position: u8,
    pub current_lap_num: u8,
    pub pit_status: u8,
    pub num_pit_stops: u8,
    pub sector: u8,
    pub current_lap_invalid: u8,
    pub penalties: u8,
    pub warnings: u8,
    pub num_unserved_drive_through_pens: u8,
    pub num_unserved_stop_go_pens: u8,
    pub grid_position: u8,
    pub driver_status: u8,
    pub result_status: u8,
    pub pit_lane_timer_active: u8,
    pub pit_lane_time_in_lane_ms: u16,
    pub pit_stop_timer_ms: u16,
    pub pit_stop_should_serve_pen: u8,
}

impl CarLap {
    fn decode(reader: &mut TelemetryReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            last_lap_time_ms: reader.read_u32()?,
            current_lap_time_ms: reader.read_u32()?,
            sector1_time_ms: reader.read_u16()?,
            sector2_time_ms: reader.read_u16()?,
            lap_distance: reader.read_f32()?,
            total_distance: reader.read_f32()?,
            safety_car_delta: reader.read_f32()?,
            car_position: reader.read_u8()?,
            current_lap_num: reader.read_u8()?,
            pit_status: reader.read_u8()?,
            num_pit_stops: reader.read_u8()?,
            sector: reader.read_u8()?,
            current_lap_invalid: reader.read_u8()?,
            penalties: reader.read_u8()?,
            warnings: reader.read_u8()?,
            num_unserved_drive_through_pens: reader.read_u8()?,
            num_unserved_stop_go_pens: reader.read_u8()?,
            grid_position: reader.read_u8()?,
            driver_status: reader.read_u8()?,
            result_status: reader.read_u8()?,
            pit_lane_timer_active: reader.read_u8()?,
            pit_lane_time_in_lane_ms: reader.read_u16()?,
            pit_stop_timer_ms: reader.read_u16()?,
            pit_stop_should_serve_pen: reader.read_u8()?,
        })
    }
}

/// Lap data body: one record per grid slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapData {
    pub cars: Vec<CarLap>,
}

impl LapData {
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TelemetryReader::new(body, "lap data");
        reader.require(layout::LAP_DATA_BODY_LEN)?;
        let mut cars = Vec::with_capacity(layout::GRID_SIZE);
        for _ in 0..layout::GRID_SIZE {
            cars.push(CarLap::decode(&mut reader)?);
        }
        Ok(Self { cars })
    }
}

#[cfg(test)]
mod tests {
    use super::LapData;
    use crate::protocol::error::DecodeError;
    use crate::protocol::layout;
    use crate::protocol::packets::testenc::Enc;

    fn build_body() -> Vec<u8> {
        let mut e = Enc::new();
        for i in 0..layout::GRID_SIZE as u32 {
            e.u32(90_000 + i); // last lap time
            e.u32(45_000 + i); // current lap time
            e.u16(28_000); // sector 1
            e.u16(31_000); // sector 2
            e.f32(1200.5); // lap distance
            e.f32(150_000.0 + i as f32); // total distance
            e.f32(0.0); // safety car delta
            e.u8(i as u8 + 1); // car position
            e.u8(12); // current lap number
            e.u8(0); // pit status
            e.u8(1); // pit stops made
            e.u8(2); // sector
            e.u8(0); // lap invalid
            e.u8(0); // penalties
            e.u8(1); // warnings
            e.u8(0); // unserved drive-throughs
            e.u8(0); // unserved stop-gos
            e.u8(i as u8 + 1); // grid position
            e.u8(1); // driver status
            e.u8(2); // result status
            e.u8(0); // pit lane timer
            e.u16(0); // time in pit lane
            e.u16(0); // pit stop timer
            e.u8(0); // should serve penalty
        }
        e.buf
    }

    #[test]
    fn decode_lap_data_body() {
        let body = build_body();
        assert_eq!(body.len(), layout::LAP_DATA_BODY_LEN);

        let lap_data = LapData::decode(&body).unwrap();
        assert_eq!(lap_data.cars.len(), layout::GRID_SIZE);
        assert_eq!(lap_data.cars[0].last_lap_time_ms, 90_000);
        assert_eq!(lap_data.cars[21].last_lap_time_ms, 90_021);
        assert_eq!(lap_data.cars[21].car_position, 22);
        assert_eq!(lap_data.cars[21].pit_stop_should_serve_pen, 0);
        assert_eq!(lap_data.cars[5].total_distance, 150_005.0);
    }

    #[test]
    fn decode_lap_data_too_short() {
        let body = build_body();
        let err = LapData::decode(&body[..body.len() - 1]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TooShort {
                shape: "lap data",
                ..
            }
        ));
    }
}
