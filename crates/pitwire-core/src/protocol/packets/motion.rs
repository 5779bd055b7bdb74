use serde::Serialize;

use crate::protocol::error::DecodeError;
use crate::protocol::layout;
use crate::protocol::reader::TelemetryReader;

/// Motion state for one car.
///
/// Direction vectors are normalised and scaled to the i16 range; angles are
/// radians.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarMotion {
    pub world_position_x: f32,
    pub world_position_y: f32,
    pub world_position_z: f32,
    pub world_velocity_x: f32,
    pub world_velocity_y: f32,
    pub world_velocity_z: f32,
    pub world_forward_dir_x: i16,
    pub world_forward_dir_y: i16,
    pub world_forward_dir_z: i16,
    pub world_right_dir_x: i16,
    pub world_right_dir_y: i16,
    pub world_right_dir_z: i16,
    pub g_force_lateral: f32,
    pub g_force_longitudinal: f32,
    pub g_force_vertical: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl CarMotion {
    fn decode(reader: &mut TelemetryReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            world_position_x: reader.read_f32()?,
            world_position_y: reader.read_f32()?,
            world_position_z: reader.read_f32()?,
            world_velocity_x: reader.read_f32()?,
            world_velocity_y: reader.read_f32()?,
            world_velocity_z: reader.read_f32()?,
            world_forward_dir_x: reader.read_i16()?,
            world_forward_dir_y: reader.read_i16()?,
            world_forward_dir_z: reader.read_i16()?,
            world_right_dir_x: reader.read_i16()?,
            world_right_dir_y: reader.read_i16()?,
            world_right_dir_z: reader.read_i16()?,
            g_force_lateral: reader.read_f32()?,
            g_force_longitudinal: reader.read_f32()?,
            g_force_vertical: reader.read_f32()?,
            yaw: reader.read_f32()?,
            pitch: reader.read_f32()?,
            roll: reader.read_f32()?,
        })
    }
}

/// Motion body: grid-wide car motion plus extra player-car detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionData {
    pub cars: Vec<CarMotion>,
    pub suspension_position: [f32; layout::WHEEL_COUNT],
    pub suspension_velocity: [f32; layout::WHEEL_COUNT],
    pub suspension_acceleration: [f32; layout::WHEEL_COUNT],
    pub wheel_speed: [f32; layout::WHEEL_COUNT],
    pub wheel_slip: [f32; layout::WHEEL_COUNT],
    pub local_velocity_x: f32,
    pub local_velocity_y: f32,
    pub local_velocity_z: f32,
    pub angular_velocity_x: f32,
    pub angular_velocity_y: f32,
    pub angular_velocity_z: f32,
    pub angular_acceleration_x: f32,
    pub angular_acceleration_y: f32,
    pub angular_acceleration_z: f32,
    pub front_wheels_angle: f32,
}

impl MotionData {
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TelemetryReader::new(body, "motion");
        reader.require(layout::MOTION_BODY_LEN)?;
        let mut cars = Vec::with_capacity(layout::GRID_SIZE);
        for _ in 0..layout::GRID_SIZE {
            cars.push(CarMotion::decode(&mut reader)?);
        }
        Ok(Self {
            cars,
            suspension_position: reader.read_f32_array()?,
            suspension_velocity: reader.read_f32_array()?,
            suspension_acceleration: reader.read_f32_array()?,
            wheel_speed: reader.read_f32_array()?,
            wheel_slip: reader.read_f32_array()?,
            local_velocity_x: reader.read_f32()?,
            local_velocity_y: reader.read_f32()?,
            local_velocity_z: reader.read_f32()?,
            angular_velocity_x: reader.read_f32()?,
            angular_velocity_y: reader.read_f32()?,
            angular_velocity_z: reader.read_f32()?,
            angular_acceleration_x: reader.read_f32()?,
            angular_acceleration_y: reader.read_f32()?,
            angular_acceleration_z: reader.read_f32()?,
            front_wheels_angle: reader.read_f32()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::MotionData;
    use crate::protocol::error::DecodeError;
    use crate::protocol::layout;
    use crate::protocol::packets::testenc::Enc;

    fn build_body() -> Vec<u8> {
        let mut e = Enc::new();
        for i in 0..layout::GRID_SIZE {
            let base = i as f32;
            e.f32(base); // world position
            e.f32(base + 0.5);
            e.f32(-base);
            e.f32(80.0); // world velocity
            e.f32(0.0);
            e.f32(-3.5);
            for d in 0..6i16 {
                e.i16(i as i16 * 100 + d); // forward/right direction vectors
            }
            e.f32(1.25); // g-forces
            e.f32(-0.75);
            e.f32(0.1);
            e.f32(0.5); // yaw/pitch/roll
            e.f32(-0.01);
            e.f32(0.02);
        }
        for w in 0..layout::WHEEL_COUNT {
            e.f32(w as f32 * 0.1); // suspension position
        }
        for _ in 0..layout::WHEEL_COUNT {
            e.f32(1.0); // suspension velocity
        }
        for _ in 0..layout::WHEEL_COUNT {
            e.f32(2.0); // suspension acceleration
        }
        for _ in 0..layout::WHEEL_COUNT {
            e.f32(95.0); // wheel speed
        }
        for _ in 0..layout::WHEEL_COUNT {
            e.f32(0.03); // wheel slip
        }
        for v in [5.0f32, 0.0, -0.2] {
            e.f32(v); // local velocity
        }
        for v in [0.1f32, 0.2, 0.3] {
            e.f32(v); // angular velocity
        }
        for v in [0.4f32, 0.5, 0.6] {
            e.f32(v); // angular acceleration
        }
        e.f32(0.35); // front wheels angle
        e.buf
    }

    #[test]
    fn decode_motion_body() {
        let body = build_body();
        assert_eq!(body.len(), layout::MOTION_BODY_LEN);

        let motion = MotionData::decode(&body).unwrap();
        assert_eq!(motion.cars.len(), layout::GRID_SIZE);
        assert_eq!(motion.cars[3].world_position_x, 3.0);
        assert_eq!(motion.cars[3].world_position_y, 3.5);
        assert_eq!(motion.cars[21].world_forward_dir_x, 2100);
        assert_eq!(motion.cars[21].world_right_dir_z, 2105);
        assert_eq!(motion.suspension_position, [0.0, 0.1, 0.2, 0.3]);
        assert_eq!(motion.wheel_speed, [95.0; 4]);
        assert_eq!(motion.angular_acceleration_z, 0.6);
        assert_eq!(motion.front_wheels_angle, 0.35);
    }

    #[test]
    fn decode_motion_too_short() {
        let body = build_body();
        let err = MotionData::decode(&body[..body.len() - 1]).unwrap_err();
        assert!(matches!(err, DecodeError::TooShort { shape: "motion", .. }));
    }
}
