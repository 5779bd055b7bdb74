use serde::Serialize;

use crate::protocol::error::DecodeError;
use crate::protocol::layout;
use crate::protocol::reader::TelemetryReader;

/// Setup of one car. Setups of other players read as all zeroes in
/// multiplayer sessions; the layout is transmitted regardless.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarSetup {
    pub front_wing: u8,
    pub rear_wing: u8,
    /// Differential adjustment on throttle, percent.
    pub on_throttle: u8,
    /// Differential adjustment off throttle, percent.
    pub off_throttle: u8,
    pub front_camber: f32,
    pub rear_camber: f32,
    pub front_toe: f32,
    pub rear_toe: f32,
    pub front_suspension: u8,
    pub rear_suspension: u8,
    pub front_anti_roll_bar: u8,
    pub rear_anti_roll_bar: u8,
    pub front_suspension_height: u8,
    pub rear_suspension_height: u8,
    /// Percent.
    pub brake_pressure: u8,
    /// Percent.
    pub brake_bias: u8,
    pub rear_left_tyre_pressure: f32,
    pub rear_right_tyre_pressure: f32,
    pub front_left_tyre_pressure: f32,
    pub front_right_tyre_pressure: f32,
    pub ballast: u8,
    pub fuel_load: f32,
}

impl CarSetup {
    fn decode(reader: &mut TelemetryReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            front_wing: reader.read_u8()?,
            rear_wing: reader.read_u8()?,
            on_throttle: reader.read_u8()?,
            off_throttle: reader.read_u8()?,
            front_camber: reader.read_f32()?,
            rear_camber: reader.read_f32()?,
            front_toe: reader.read_f32()?,
            rear_toe: reader.read_f32()?,
            front_suspension: reader.read_u8()?,
            rear_suspension: reader.read_u8()?,
            front_anti_roll_bar: reader.read_u8()?,
            rear_anti_roll_bar: reader.read_u8()?,
            front_suspension_height: reader.read_u8()?,
            rear_suspension_height: reader.read_u8()?,
            brake_pressure: reader.read_u8()?,
            brake_bias: reader.read_u8()?,
            rear_left_tyre_pressure: reader.read_f32()?,
            rear_right_tyre_pressure: reader.read_f32()?,
            front_left_tyre_pressure: reader.read_f32()?,
            front_right_tyre_pressure: reader.read_f32()?,
            ballast: reader.read_u8()?,
            fuel_load: reader.read_f32()?,
        })
    }
}

/// Car setups body: one setup per grid slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarSetupsData {
    pub cars: Vec<CarSetup>,
}

impl CarSetupsData {
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TelemetryReader::new(body, "car setups");
        reader.require(layout::CAR_SETUPS_BODY_LEN)?;
        let mut cars = Vec::with_capacity(layout::GRID_SIZE);
        for _ in 0..layout::GRID_SIZE {
            cars.push(CarSetup::decode(&mut reader)?);
        }
        Ok(Self { cars })
    }
}
