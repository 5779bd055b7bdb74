//! Event packet decoding.
//!
//! Event bodies are decoded in two stages: the 4-character code and the
//! opaque details region are read first, then the code selects which detail
//! shape (if any) the region holds. The unresolved intermediate never leaves
//! this module.

use serde::Serialize;

use super::error::DecodeError;
use super::layout;
use super::reader::TelemetryReader;

/// Resolved event body: the code always survives, the detail is present
/// only for recognized codes.
///
/// An unrecognized code is not an error. The code set grows across protocol
/// revisions, and a structurally valid header-plus-code result is still
/// useful to callers; an unknown packet discriminator, by contrast, leaves
/// nothing decodable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventBody {
    /// The 4-character event code, e.g. `"FTLP"`.
    pub code: String,
    pub detail: Option<EventDetail>,
}

/// Detail shapes keyed by event code.
///
/// `STLG` and `LGOT` both decode into [`EventDetail::StartLights`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventDetail {
    FastestLap {
        vehicle_idx: u8,
        /// Lap time in seconds.
        lap_time: f32,
    },
    Retirement {
        vehicle_idx: u8,
    },
    TeamMateInPits {
        vehicle_idx: u8,
    },
    RaceWinner {
        vehicle_idx: u8,
    },
    Penalty {
        penalty_type: u8,
        infringement_type: u8,
        vehicle_idx: u8,
        other_vehicle_idx: u8,
        /// Time gained or penalty time awarded, in seconds.
        time: u8,
        lap_num: u8,
        places_gained: u8,
    },
    SpeedTrap {
        vehicle_idx: u8,
        /// Top speed through the trap in km/h.
        speed: f32,
        is_overall_fastest_in_session: u8,
        is_driver_fastest_in_session: u8,
    },
    StartLights {
        num_lights: u8,
    },
    DriveThroughPenaltyServed {
        vehicle_idx: u8,
    },
    StopGoPenaltyServed {
        vehicle_idx: u8,
    },
    Flashback {
        /// Frame identifier the session was flashed back to.
        frame_identifier: u32,
        /// Session time the session was flashed back to, in seconds.
        session_time: f32,
    },
    Buttons {
        /// Bit flags of currently pressed buttons.
        button_status: u32,
    },
}

impl EventBody {
    /// Decode an event body: code, opaque details region, then resolution.
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TelemetryReader::new(body, "event");
        reader.require(layout::EVENT_BODY_LEN)?;
        let code = reader.read_bytes::<{ layout::EVENT_CODE_LEN }>()?;
        let details = reader.read_bytes::<{ layout::EVENT_DETAILS_LEN }>()?;
        Ok(Self {
            code: String::from_utf8_lossy(&code).into_owned(),
            detail: resolve_detail(&code, &details)?,
        })
    }
}

/// Map a code onto its detail shape and decode the details region.
///
/// The details region is re-decoded through the same checked reader used
/// for top-level shapes; codes outside the known set resolve to `None`.
fn resolve_detail(
    code: &[u8; layout::EVENT_CODE_LEN],
    details: &[u8; layout::EVENT_DETAILS_LEN],
) -> Result<Option<EventDetail>, DecodeError> {
    let mut reader = TelemetryReader::new(details, "event details");
    let detail = match code {
        layout::CODE_FASTEST_LAP => EventDetail::FastestLap {
            vehicle_idx: reader.read_u8()?,
            lap_time: reader.read_f32()?,
        },
        layout::CODE_RETIREMENT => EventDetail::Retirement {
            vehicle_idx: reader.read_u8()?,
        },
        layout::CODE_TEAM_MATE_IN_PITS => EventDetail::TeamMateInPits {
            vehicle_idx: reader.read_u8()?,
        },
        layout::CODE_RACE_WINNER => EventDetail::RaceWinner {
            vehicle_idx: reader.read_u8()?,
        },
        layout::CODE_PENALTY_ISSUED => EventDetail::Penalty {
            penalty_type: reader.read_u8()?,
            infringement_type: reader.read_u8()?,
            vehicle_idx: reader.read_u8()?,
            other_vehicle_idx: reader.read_u8()?,
            time: reader.read_u8()?,
            lap_num: reader.read_u8()?,
            places_gained: reader.read_u8()?,
        },
        layout::CODE_SPEED_TRAP => EventDetail::SpeedTrap {
            vehicle_idx: reader.read_u8()?,
            speed: reader.read_f32()?,
            is_overall_fastest_in_session: reader.read_u8()?,
            is_driver_fastest_in_session: reader.read_u8()?,
        },
        layout::CODE_START_LIGHTS | layout::CODE_LIGHTS_OUT => EventDetail::StartLights {
            num_lights: reader.read_u8()?,
        },
        layout::CODE_DRIVE_THROUGH_SERVED => EventDetail::DriveThroughPenaltyServed {
            vehicle_idx: reader.read_u8()?,
        },
        layout::CODE_STOP_GO_SERVED => EventDetail::StopGoPenaltyServed {
            vehicle_idx: reader.read_u8()?,
        },
        layout::CODE_FLASHBACK => EventDetail::Flashback {
            frame_identifier: reader.read_u32()?,
            session_time: reader.read_f32()?,
        },
        layout::CODE_BUTTON_STATUS => EventDetail::Buttons {
            button_status: reader.read_u32()?,
        },
        _ => return Ok(None),
    };
    Ok(Some(detail))
}
