use serde::Serialize;

use crate::protocol::error::DecodeError;
use crate::protocol::layout;
use crate::protocol::reader::TelemetryReader;

/// Damage and wear state for one car. All damage fields are percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarDamage {
    pub tyres_wear: [f32; layout::WHEEL_COUNT],
    pub tyres_damage: [u8; layout::WHEEL_COUNT],
    pub brakes_damage: [u8; layout::WHEEL_COUNT],
    pub front_left_wing_damage: u8,
    pub front_right_wing_damage: u8,
    pub rear_wing_damage: u8,
    pub floor_damage: u8,
    pub diffuser_damage: u8,
    pub sidepod_damage: u8,
    pub drs_fault: u8,
    pub gear_box_damage: u8,
    pub engine_damage: u8,
    pub engine_mguh_wear: u8,
    pub engine_es_wear: u8,
    pub engine_ce_wear: u8,
    pub engine_ice_wear: u8,
    pub engine_mguk_wear: u8,
    pub engine_tc_wear: u8,
}

impl CarDamage {
    fn decode(reader: &mut TelemetryReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            tyres_wear: reader.read_f32_array()?,
            tyres_damage: reader.read_bytes()?,
            brakes_damage: reader.read_bytes()?,
            front_left_wing_damage: reader.read_u8()?,
            front_right_wing_damage: reader.read_u8()?,
            rear_wing_damage: reader.read_u8()?,
            floor_damage: reader.read_u8()?,
            diffuser_damage: reader.read_u8()?,
            sidepod_damage: reader.read_u8()?,
            drs_fault: reader.read_u8()?,
            gear_box_damage: reader.read_u8()?,
            engine_damage: reader.read_u8()?,
            engine_mguh_wear: reader.read_u8()?,
            engine_es_wear: reader.read_u8()?,
            engine_ce_wear: reader.read_u8()?,
            engine_ice_wear: reader.read_u8()?,
            engine_mguk_wear: reader.read_u8()?,
            engine_tc_wear: reader.read_u8()?,
        })
    }
}

/// Car damage body: one record per grid slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarDamageData {
    pub cars: Vec<CarDamage>,
}

impl CarDamageData {
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = TelemetryReader::new(body, "car damage");
        reader.require(layout::CAR_DAMAGE_BODY_LEN)?;
        let mut cars = Vec::with_capacity(layout::GRID_SIZE);
        for _ in 0..layout::GRID_SIZE {
            cars.push(CarDamage::decode(&mut reader)?);
        }
        Ok(Self { cars })
    }
}

#[cfg(test)]
mod tests {
    use super::CarDamageData;
    use crate::protocol::error::DecodeError;
    use crate::protocol::layout;
    use crate::protocol::packets::testenc::Enc;

    fn build_body() -> Vec<u8> {
        let mut e = Enc::new();
        for i in 0..layout::GRID_SIZE {
            for w in 0..layout::WHEEL_COUNT {
                e.f32(10.0 + w as f32); // tyre wear
            }
            e.bytes(&[5, 6, 7, 8]); // tyre damage
            e.bytes(&[0, 0, 1, 1]); // brake damage
            e.u8(i as u8); // front left wing
            e.u8(0); // front right wing
            e.u8(0); // rear wing
            e.u8(0); // floor
            e.u8(0); // diffuser
            e.u8(0); // sidepod
            e.u8(0); // drs fault
            e.u8(2); // gearbox
            e.u8(1); // engine
            e.u8(10); // mgu-h wear
            e.u8(11); // es wear
            e.u8(12); // ce wear
            e.u8(13); // ice wear
            e.u8(14); // mgu-k wear
            e.u8(15); // tc wear
        }
        e.buf
    }

    #[test]
    fn decode_car_damage_body() {
        let body = build_body();
        assert_eq!(body.len(), layout::CAR_DAMAGE_BODY_LEN);

        let damage = CarDamageData::decode(&body).unwrap();
        assert_eq!(damage.cars.len(), layout::GRID_SIZE);
        assert_eq!(damage.cars[0].tyres_wear, [10.0, 11.0, 12.0, 13.0]);
        assert_eq!(damage.cars[21].front_left_wing_damage, 21);
        assert_eq!(damage.cars[21].engine_tc_wear, 15);
        assert_eq!(damage.cars[7].tyres_damage, [5, 6, 7, 8]);
    }

    #[test]
    fn decode_car_damage_too_short() {
        let body = build_body();
        let err = CarDamageData::decode(&body[..body.len() - 1]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TooShort {
                shape: "car damage",
                ..
            }
        ));
    }
}
