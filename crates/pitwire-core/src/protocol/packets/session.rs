use serde::Serialize;

use crate::protocol::error::DecodeError;
use crate::protocol::layout;
use crate::protocol::reader::TelemetryReader;

/// One marshal zone: fractional start point around the lap plus its flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarshalZone {
    pub zone_start: f32,
    pub zone_flag: i8,
}

impl MarshalZone {
    fn decode(reader: &mut TelemetryReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            zone_start: reader.read_f32()?,
            zone_flag: reader.read_i8()?,
        })
    }
}

/// Weather forecast for one upcoming point of one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherForecastSample {
    pub session_type: u8,
    /// Minutes into the future.
    pub time_offset: u8,
    pub weather: u8,
    pub track_temperature: i8,
    pub track_temperature_change: i8,
    pub air_temperature: i8,
    pub air_temperature_change: i8,
    pub rain_percentage: u8,
}

impl WeatherForecastSample {
    fn decode(reader: &mut TelemetryReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            session_type: reader.read_u8()?,
            time_offset: reader.read_u8()?,
            weather: reader.read_u8()?,
            track_temperature: reader.read_i8()?,
            track_temperature_change: reader.read_i8()?,
            air_temperature: reader.read_i8()?,
            air_temperature_change: reader.read_i8()?,
            rain_percentage: reader.read_u8()?,
        })
    }
}

/// Session body: track, weather, and assist settings for the running
/// session.
///
/// `marshal_zones` and `weather_forecast_samples` always hold the full
/// fixed-capacity region; the companion `num_*` fields say how many leading
/// entries are meaningful.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionData {
    pub weather: u8,
    /// Degrees Celsius.
    pub track_temperature: i8,
    /// Degrees Celsius.
    pub air_temperature: i8,
    pub total_laps: u8,
    /// Metres.
    pub track_length: u16,
    pub session_type: u8,
    pub track_id: i8,
    pub formula: u8,
    /// Seconds.
    pub session_time_left: u16,
    /// Seconds.
    pub session_duration: u16,
    /// km/h.
    pub pit_speed_limit: u8,
    pub game_paused: u8,
    pub is_spectating: u8,
    pub spectator_car_index: u8,
    pub sli_pro_native_support: u8,
    pub num_marshal_zones: u8,
    pub marshal_zones: Vec<MarshalZone>,
    pub safety_car_status: u8,
    pub network_game: u8,
    pub num_weather_forecast_samples: u8,
    pub weather_forecast_samples: Vec<WeatherForecastSample>,
    pub forecast_accuracy: u8,
    pub ai_difficulty: u8,
    pub season_link_identifier: u32,
    pub weekend_link_identifier: u32,
    pub session_link_identifier: u32,
    pub pit_stop_window_ideal_lap: u8,
    pub pit_stop_window_latest_lap: u8,
    pub pit_stop_rejoin_position: u8,
    pub steering_assist: u8,
    pub braking_assist: u8,
    pub gearbox_assist: u8,
    pub pit_assist: u8,
    pub pit_release_assist: u8,
    pub ers_assist: u8,
    pub drs_assist: u8,
    pub dynamic_racing_line: u8,
    pub dynamic_racing_line_type: u8,
}

impl SessionData {
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TelemetryReader::new(body, "session");
        reader.require(layout::SESSION_BODY_LEN)?;

        let weather = reader.read_u8()?;
        let track_temperature = reader.read_i8()?;
        let air_temperature = reader.read_i8()?;
        let total_laps = reader.read_u8()?;
        let track_length = reader.read_u16()?;
        let session_type = reader.read_u8()?;
        let track_id = reader.read_i8()?;
        let formula = reader.read_u8()?;
        let session_time_left = reader.read_u16()?;
        let session_duration = reader.read_u16()?;
        let pit_speed_limit = reader.read_u8()?;
        let game_paused = reader.read_u8()?;
        let is_spectating = reader.read_u8()?;
        let spectator_car_index = reader.read_u8()?;
        let sli_pro_native_support = reader.read_u8()?;
        let num_marshal_zones = reader.read_u8()?;
        let mut marshal_zones = Vec::with_capacity(layout::MARSHAL_ZONE_COUNT);
        for _ in 0..layout::MARSHAL_ZONE_COUNT {
            marshal_zones.push(MarshalZone::decode(&mut reader)?);
        }
        let safety_car_status = reader.read_u8()?;
        let network_game = reader.read_u8()?;
        let num_weather_forecast_samples = reader.read_u8()?;
        let mut weather_forecast_samples = Vec::with_capacity(layout::WEATHER_FORECAST_COUNT);
        for _ in 0..layout::WEATHER_FORECAST_COUNT {
            weather_forecast_samples.push(WeatherForecastSample::decode(&mut reader)?);
        }

        Ok(Self {
            weather,
            track_temperature,
            air_temperature,
            total_laps,
            track_length,
            session_type,
            track_id,
            formula,
            session_time_left,
            session_duration,
            pit_speed_limit,
            game_paused,
            is_spectating,
            spectator_car_index,
            sli_pro_native_support,
            num_marshal_zones,
            marshal_zones,
            safety_car_status,
            network_game,
            num_weather_forecast_samples,
            weather_forecast_samples,
            forecast_accuracy: reader.read_u8()?,
            ai_difficulty: reader.read_u8()?,
            season_link_identifier: reader.read_u32()?,
            weekend_link_identifier: reader.read_u32()?,
            session_link_identifier: reader.read_u32()?,
            pit_stop_window_ideal_lap: reader.read_u8()?,
            pit_stop_window_latest_lap: reader.read_u8()?,
            pit_stop_rejoin_position: reader.read_u8()?,
            steering_assist: reader.read_u8()?,
            braking_assist: reader.read_u8()?,
            gearbox_assist: reader.read_u8()?,
            pit_assist: reader.read_u8()?,
            pit_release_assist: reader.read_u8()?,
            ers_assist: reader.read_u8()?,
            drs_assist: reader.read_u8()?,
            dynamic_racing_line: reader.read_u8()?,
            dynamic_racing_line_type: reader.read_u8()?,
        })
    }
}
