use serde::Serialize;

use crate::protocol::error::DecodeError;
use crate::protocol::layout;
use crate::protocol::reader::TelemetryReader;

/// Car and power-unit status for one car.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarStatus {
    pub traction_control: u8,
    pub anti_lock_brakes: u8,
    pub fuel_mix: u8,
    /// Percent.
    pub front_brake_bias: u8,
    pub pit_limiter_status: u8,
    /// Kilograms.
    pub fuel_in_tank: f32,
    /// Kilograms.
    pub fuel_capacity: f32,
    /// Laps worth of fuel remaining relative to the target.
    pub fuel_remaining_laps: f32,
    pub max_rpm: u16,
    pub idle_rpm: u16,
    pub max_gears: u8,
    pub drs_allowed: u8,
    /// Metres until DRS may be opened; 0 when unavailable.
    pub drs_activation_distance: u16,
    pub actual_tyre_compound: u8,
    pub visual_tyre_compound: u8,
    pub tyres_age_laps: u8,
    pub vehicle_fia_flags: i8,
    /// Joules.
    pub ers_store_energy: f32,
    pub ers_deploy_mode: u8,
    /// Joules.
    pub ers_harvested_this_lap_mguk: f32,
    /// Joules.
    pub ers_harvested_this_lap_mguh: f32,
    /// Joules.
    pub ers_deployed_this_lap: f32,
    pub network_paused: u8,
}

impl CarStatus {
    fn decode(reader: &mut TelemetryReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            traction_control: reader.read_u8()?,
            anti_lock_brakes: reader.read_u8()?,
            fuel_mix: reader.read_u8()?,
            front_brake_bias: reader.read_u8()?,
            pit_limiter_status: reader.read_u8()?,
            fuel_in_tank: reader.read_f32()?,
            fuel_capacity: reader.read_f32()?,
            fuel_remaining_laps: reader.read_f32()?,
            max_rpm: reader.read_u16()?,
            idle_rpm: reader.read_u16()?,
            max_gears: reader.read_u8()?,
            drs_allowed: reader.read_u8()?,
            drs_activation_distance: reader.read_u16()?,
            actual_tyre_compound: reader.read_u8()?,
            visual_tyre_compound: reader.read_u8()?,
            tyres_age_laps: reader.read_u8()?,
            vehicle_fia_flags: reader.read_i8()?,
            ers_store_energy: reader.read_f32()?,
            ers_deploy_mode: reader.read_u8()?,
            ers_harvested_this_lap_mguk: reader.read_f32()?,
            ers_harvested_this_lap_mguh: reader.read_f32()?,
            ers_deployed_this_lap: reader.read_f32()?,
            network_paused: reader.read_u8()?,
        })
    }
}

/// Car status body: one record per grid slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarStatusData {
    pub cars: Vec<CarStatus>,
}

impl CarStatusData {
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TelemetryReader::new(body, "car status");
        reader.require(layout::CAR_STATUS_BODY_LEN)?;
        let mut cars = Vec::with_capacity(layout::GRID_SIZE);
        for _ in 0..layout::GRID_SIZE {
            cars.push(CarStatus::decode(&mut reader)?);
        }
        Ok(Self { cars })
    }
}
