//! Shared fixture builders for the integration tests.

use pitwire_core::HEADER_LEN;

/// Little-endian byte builder.
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

    pub fn u16(&mut self, v: u16) {
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

    pub fn i8(&mut self, v: i8) {
        self.buf.push(v as u8);
    }

    pub fn bytes(&mut self, v: &[u8]) {
        self.buf.extend_from_slice(v);
    }
}

/// Standard 25-byte header fixture.
pub fn header(packet_id: u8) -> Vec<u8> {
    let mut e = Enc::new();
    e.u16(2021); // packet format
    e.u8(21); // game year
    e.u8(1); // major version
    e.u8(5); // minor version
    e.u8(1); // packet version
    e.u8(packet_id);
    e.u64(0x0102_0304_0506_0708);
    e.f32(963.25); // session time
    e.u32(28_000); // frame identifier
    e.u8(19); // player car index
    e.u8(255); // secondary player car index
    assert_eq!(e.buf.len(), HEADER_LEN);
    e.buf
}

/// Deterministic body filler. The modulus keeps every byte below 0x61 so no
/// f32/f64 field can come out as NaN, which would break equality checks.
pub fn patterned_body(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 97) as u8).collect()
}

pub fn datagram(packet_id: u8, body: &[u8]) -> Vec<u8> {
    let mut buf = header(packet_id);
    buf.extend_from_slice(body);
    buf
}

/// Discriminator, body width, and kind name for every packet variant.
pub const VARIANTS: [(u8, usize, &str); 12] = [
    (0, 1440, "motion"),
    (1, 601, "session"),
    (2, 946, "lap_data"),
    (3, 12, "event"),
    (4, 1233, "participants"),
    (5, 1078, "car_setups"),
    (6, 1323, "car_telemetry"),
    (7, 1034, "car_status"),
    (8, 815, "final_classification"),
    (9, 1167, "lobby_info"),
    (10, 858, "car_damage"),
    (11, 1131, "session_history"),
];
