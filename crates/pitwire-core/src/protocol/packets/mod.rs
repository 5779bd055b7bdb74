//! Fixed-layout packet bodies.
//!
//! One file per body. Each decode takes the bytes following the header,
//! checks the whole-shape width upfront, then reads every field in declared
//! order through `TelemetryReader`. Widths and counts live in `layout`.

pub mod classification;
pub mod damage;
pub mod history;
pub mod lap;
pub mod lobby;
pub mod motion;
pub mod participants;
pub mod session;
pub mod setup;
pub mod status;
pub mod telemetry;

pub use classification::{ClassificationEntry, FinalClassificationData};
pub use damage::{CarDamage, CarDamageData};
pub use history::{LapHistoryEntry, SessionHistoryData, TyreStintEntry};
pub use lap::{CarLap, LapData};
pub use lobby::{LobbyInfoData, LobbyPlayer};
pub use motion::{CarMotion, MotionData};
pub use participants::{Participant, ParticipantsData};
pub use session::{MarshalZone, SessionData, WeatherForecastSample};
pub use setup::{CarSetup, CarSetupsData};
pub use status::{CarStatus, CarStatusData};
pub use telemetry::{CarTelemetry, CarTelemetryData};

/// Little-endian fixture builder shared by the per-packet tests.
#[cfg(test)]
pub(crate) mod testenc {
    #[derive(Default)]
    pub struct Enc {
        pub buf: Vec<u8>,
    }

    impl Enc {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn u8(&mut self, v: u8) {
            self.buf.push(v);
        }

        pub fn i8(&mut self, v: i8) {
            self.buf.push(v as u8);
        }

        pub fn u16(&mut self, v: u16) {
            self.buf.extend_from_slice(&v.to_le_bytes());
        }

        pub fn i16(&mut self, v: i16) {
            self.buf.extend_from_slice(&v.to_le_bytes());
        }

        pub fn u32(&mut self, v: u32) {
            self.buf.extend_from_slice(&v.to_le_bytes());
        }

        pub fn u64(&mut self, v: u64) {
            self.buf.extend_from_slice(&v.to_le_bytes());
        }

        pub fn f32(&mut self, v: f32) {
            self.buf.extend_from_slice(&v.to_le_bytes());
        }

        pub fn f64(&mut self, v: f64) {
            self.buf.extend_from_slice(&v.to_le_bytes());
        }

        pub fn bytes(&mut self, v: &[u8]) {
            self.buf.extend_from_slice(v);
        }

        /// NUL-padded fixed-width name field.
        pub fn name(&mut self, s: &str, width: usize) {
            let mut field = vec![0u8; width];
            field[..s.len()].copy_from_slice(s.as_bytes());
            self.buf.extend_from_slice(&field);
        }
    }
}
