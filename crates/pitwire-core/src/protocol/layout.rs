//! Wire-format constants for the telemetry protocol.
//!
//! Widths, counts, and code values here are the source of truth for every
//! decode; parsers never hard-code byte positions.

/// UDP port the simulation broadcasts on by default.
pub const DEFAULT_TELEMETRY_PORT: u16 = 20777;

/// Receive buffer size; comfortably above the largest datagram the
/// simulation emits.
pub const MAX_DATAGRAM_LEN: usize = 2048;

/// Fixed width of the common packet header.
pub const HEADER_LEN: usize = 25;

/// Car slots carried by every per-car array, occupied or not.
pub const GRID_SIZE: usize = 22;

/// Wheel arrays are ordered rear-left, rear-right, front-left, front-right.
pub const WHEEL_COUNT: usize = 4;

pub const MARSHAL_ZONE_COUNT: usize = 21;
pub const WEATHER_FORECAST_COUNT: usize = 56;
pub const DRIVER_NAME_LEN: usize = 48;
pub const LAP_HISTORY_COUNT: usize = 100;
pub const TYRE_STINT_COUNT: usize = 8;

/// Width of the 4-character event code.
pub const EVENT_CODE_LEN: usize = 4;
/// Width of the opaque event details region; every event datagram carries
/// the full region regardless of which detail shape (if any) occupies it.
pub const EVENT_DETAILS_LEN: usize = 8;

// Per-entry widths of repeated records.
pub const CAR_MOTION_LEN: usize = 60;
pub const MARSHAL_ZONE_LEN: usize = 5;
pub const WEATHER_FORECAST_SAMPLE_LEN: usize = 8;
pub const CAR_LAP_LEN: usize = 43;
pub const PARTICIPANT_LEN: usize = 56;
pub const CAR_SETUP_LEN: usize = 49;
pub const CAR_TELEMETRY_LEN: usize = 60;
pub const CAR_STATUS_LEN: usize = 47;
pub const CLASSIFICATION_ENTRY_LEN: usize = 37;
pub const LOBBY_PLAYER_LEN: usize = 53;
pub const CAR_DAMAGE_LEN: usize = 39;
pub const LAP_HISTORY_ENTRY_LEN: usize = 11;
pub const TYRE_STINT_ENTRY_LEN: usize = 3;

/// Trailing player-only block of the motion packet: five wheel arrays of
/// f32 plus ten scalar f32 fields.
pub const MOTION_PLAYER_EXTRA_LEN: usize = 5 * WHEEL_COUNT * 4 + 10 * 4;

// Body widths (bytes following the header). The session scalar runs are 19
// bytes before the marshal zones, 3 between zones and forecast samples, and
// 26 after the samples.
pub const MOTION_BODY_LEN: usize = GRID_SIZE * CAR_MOTION_LEN + MOTION_PLAYER_EXTRA_LEN;
pub const SESSION_BODY_LEN: usize = 19
    + MARSHAL_ZONE_COUNT * MARSHAL_ZONE_LEN
    + 3
    + WEATHER_FORECAST_COUNT * WEATHER_FORECAST_SAMPLE_LEN
    + 26;
pub const LAP_DATA_BODY_LEN: usize = GRID_SIZE * CAR_LAP_LEN;
pub const EVENT_BODY_LEN: usize = EVENT_CODE_LEN + EVENT_DETAILS_LEN;
pub const PARTICIPANTS_BODY_LEN: usize = 1 + GRID_SIZE * PARTICIPANT_LEN;
pub const CAR_SETUPS_BODY_LEN: usize = GRID_SIZE * CAR_SETUP_LEN;
pub const CAR_TELEMETRY_BODY_LEN: usize = GRID_SIZE * CAR_TELEMETRY_LEN + 3;
pub const CAR_STATUS_BODY_LEN: usize = GRID_SIZE * CAR_STATUS_LEN;
pub const FINAL_CLASSIFICATION_BODY_LEN: usize = 1 + GRID_SIZE * CLASSIFICATION_ENTRY_LEN;
pub const LOBBY_INFO_BODY_LEN: usize = 1 + GRID_SIZE * LOBBY_PLAYER_LEN;
pub const CAR_DAMAGE_BODY_LEN: usize = GRID_SIZE * CAR_DAMAGE_LEN;
pub const SESSION_HISTORY_BODY_LEN: usize = 7
    + LAP_HISTORY_COUNT * LAP_HISTORY_ENTRY_LEN
    + TYRE_STINT_COUNT * TYRE_STINT_ENTRY_LEN;

// Event string codes. The simulation emits more codes than there are detail
// shapes; codes outside this set carry no details.
pub const CODE_FASTEST_LAP: &[u8; 4] = b"FTLP";
pub const CODE_RETIREMENT: &[u8; 4] = b"RTMT";
pub const CODE_TEAM_MATE_IN_PITS: &[u8; 4] = b"TMPT";
pub const CODE_RACE_WINNER: &[u8; 4] = b"RCWN";
pub const CODE_PENALTY_ISSUED: &[u8; 4] = b"PENA";
pub const CODE_SPEED_TRAP: &[u8; 4] = b"SPTP";
pub const CODE_START_LIGHTS: &[u8; 4] = b"STLG";
pub const CODE_LIGHTS_OUT: &[u8; 4] = b"LGOT";
pub const CODE_DRIVE_THROUGH_SERVED: &[u8; 4] = b"DTSV";
pub const CODE_STOP_GO_SERVED: &[u8; 4] = b"SGSV";
pub const CODE_FLASHBACK: &[u8; 4] = b"FLBK";
pub const CODE_BUTTON_STATUS: &[u8; 4] = b"BUTN";
