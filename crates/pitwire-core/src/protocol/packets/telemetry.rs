use serde::Serialize;

use crate::protocol::error::DecodeError;
use crate::protocol::layout;
use crate::protocol::reader::TelemetryReader;

/// Live telemetry for one car.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarTelemetry {
    /// km/h.
    pub speed: u16,
    /// 0.0 to 1.0.
    pub throttle: f32,
    /// -1.0 (full left) to 1.0 (full right).
    pub steer: f32,
    /// 0.0 to 1.0.
    pub brake: f32,
    /// Percent.
    pub clutch: u8,
    /// -1 reverse, 0 neutral, 1..=8 forward.
    pub gear: i8,
    pub engine_rpm: u16,
    pub drs: u8,
    pub rev_lights_percent: u8,
    pub rev_lights_bit_value: u16,
    /// Degrees Celsius.
    pub brakes_temperature: [u16; layout::WHEEL_COUNT],
    /// Degrees Celsius.
    pub tyres_surface_temperature: [u8; layout::WHEEL_COUNT],
    /// Degrees Celsius.
    pub tyres_inner_temperature: [u8; layout::WHEEL_COUNT],
    /// Degrees Celsius.
    pub engine_temperature: u16,
    /// PSI.
    pub tyres_pressure: [f32; layout::WHEEL_COUNT],
    pub surface_type: [u8; layout::WHEEL_COUNT],
}

impl CarTelemetry {
    fn decode(reader: &mut TelemetryReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            speed: reader.read_u16()?,
            throttle: reader.read_f32()?,
            steer: reader.read_f32()?,
            brake: reader.read_f32()?,
            clutch: reader.read_u8()?,
            gear: reader.read_i8()?,
            engine_rpm: reader.read_u16()?,
            drs: reader.read_u8()?,
            rev_lights_percent: reader.read_u8()?,
            rev_lights_bit_value: reader.read_u16()?,
            brakes_temperature: reader.read_u16_array()?,
            tyres_surface_temperature: reader.read_bytes()?,
            tyres_inner_temperature: reader.read_bytes()?,
            engine_temperature: reader.read_u16()?,
            tyres_pressure: reader.read_f32_array()?,
            surface_type: reader.read_bytes()?,
        })
    }
}

/// Car telemetry body: one record per grid slot plus cockpit MFD state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarTelemetryData {
    pub cars: Vec<CarTelemetry>,
    /// 255 when the MFD is closed.
    pub mfd_panel_index: u8,
    pub mfd_panel_index_secondary_player: u8,
    /// 0 when no gear suggestion is active.
    pub suggested_gear: i8,
}

impl CarTelemetryData {
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TelemetryReader::new(body, "car telemetry");
        reader.require(layout::CAR_TELEMETRY_BODY_LEN)?;
        let mut cars = Vec::with_capacity(layout::GRID_SIZE);
        for _ in 0..layout::GRID_SIZE {
            cars.push(CarTelemetry::decode(&mut reader)?);
        }
        Ok(Self {
            cars,
            mfd_panel_index: reader.read_u8()?,
            mfd_panel_index_secondary_player: reader.read_u8()?,
            suggested_gear: reader.read_i8()?,
        })
    }
}
