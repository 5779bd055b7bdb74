use super::error::DecodeError;

/// Sequential field reader over one datagram or body slice.
///
/// All multi-byte values are little-endian. Every read checks the remaining
/// length before touching the buffer and advances the cursor by the field
/// width, so fields are consumed strictly in declared order. `shape` names
/// the layout being decoded and is carried into `TooShort` errors.
pub struct TelemetryReader<'a> {
    payload: &'a [u8],
    pos: usize,
    shape: &'static str,
}

impl<'a> TelemetryReader<'a> {
    pub fn new(payload: &'a [u8], shape: &'static str) -> Self {
        Self {
            payload,
            pos: 0,
            shape,
        }
    }

    /// Fail unless `needed` bytes are available from the start of the slice.
    pub fn require(&self, needed: usize) -> Result<(), DecodeError> {
        if self.payload.len() < needed {
            return Err(DecodeError::TooShort {
                shape: self.shape,
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    fn take(&mut self, width: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos + width;
        self.require(end)?;
        let bytes = &self.payload[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        Ok(self.take(1)?[0] as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        let bytes = self.take(2)?;
        Ok(i16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(i64::from_le_bytes(raw))
    }

    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        let bytes = self.take(4)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(f64::from_le_bytes(raw))
    }

    /// Fixed-length raw byte field (character codes, flag arrays, opaque
    /// regions).
    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u16_array<const N: usize>(&mut self) -> Result<[u16; N], DecodeError> {
        let mut out = [0u16; N];
        for slot in &mut out {
            *slot = self.read_u16()?;
        }
        Ok(out)
    }

    pub fn read_f32_array<const N: usize>(&mut self) -> Result<[f32; N], DecodeError> {
        let mut out = [0f32; N];
        for slot in &mut out {
            *slot = self.read_f32()?;
        }
        Ok(out)
    }

    /// Fixed-width UTF-8 name field, decoded lossily and cut at the first
    /// NUL. Bytes after the terminator are consumed but ignored.
    pub fn read_name<const N: usize>(&mut self) -> Result<String, DecodeError> {
        let bytes = self.take(N)?;
        let end = bytes.iter().position(|b| *b == 0).unwrap_or(N);
        Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::TelemetryReader;
    use crate::protocol::error::DecodeError;

    #[test]
    fn reads_scalars_in_order() {
        let mut payload = Vec::new();
        payload.push(0x2a);
        payload.extend_from_slice(&(-5i8).to_le_bytes());
        payload.extend_from_slice(&513u16.to_le_bytes());
        payload.extend_from_slice(&(-600i16).to_le_bytes());
        payload.extend_from_slice(&70_000u32.to_le_bytes());
        payload.extend_from_slice(&(-70_000i32).to_le_bytes());
        payload.extend_from_slice(&u64::MAX.to_le_bytes());
        payload.extend_from_slice(&(-9i64).to_le_bytes());
        payload.extend_from_slice(&1.5f32.to_le_bytes());
        payload.extend_from_slice(&(-2.25f64).to_le_bytes());

        let mut reader = TelemetryReader::new(&payload, "test");
        assert_eq!(reader.read_u8().unwrap(), 0x2a);
        assert_eq!(reader.read_i8().unwrap(), -5);
        assert_eq!(reader.read_u16().unwrap(), 513);
        assert_eq!(reader.read_i16().unwrap(), -600);
        assert_eq!(reader.read_u32().unwrap(), 70_000);
        assert_eq!(reader.read_i32().unwrap(), -70_000);
        assert_eq!(reader.read_u64().unwrap(), u64::MAX);
        assert_eq!(reader.read_i64().unwrap(), -9);
        assert_eq!(reader.read_f32().unwrap(), 1.5);
        assert_eq!(reader.read_f64().unwrap(), -2.25);
    }

    #[test]
    fn reads_fixed_arrays() {
        let mut payload = Vec::new();
        for v in [100u16, 200, 300, 400] {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        for v in [0.5f32, 1.0, 1.5, 2.0] {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        payload.extend_from_slice(&[9, 8, 7]);

        let mut reader = TelemetryReader::new(&payload, "test");
        assert_eq!(reader.read_u16_array::<4>().unwrap(), [100, 200, 300, 400]);
        assert_eq!(reader.read_f32_array::<4>().unwrap(), [0.5, 1.0, 1.5, 2.0]);
        assert_eq!(reader.read_bytes::<3>().unwrap(), [9, 8, 7]);
    }

    #[test]
    fn name_cut_at_first_nul() {
        let mut payload = [0u8; 12];
        payload[..5].copy_from_slice(b"SAINZ");
        payload[6] = b'X';
        let mut reader = TelemetryReader::new(&payload, "test");
        assert_eq!(reader.read_name::<12>().unwrap(), "SAINZ");
    }

    #[test]
    fn name_without_terminator_uses_full_width() {
        let payload = *b"NORRIS";
        let mut reader = TelemetryReader::new(&payload, "test");
        assert_eq!(reader.read_name::<6>().unwrap(), "NORRIS");
    }

    #[test]
    fn too_short_reports_shape_and_lengths() {
        let payload = [1u8, 2];
        let mut reader = TelemetryReader::new(&payload, "car status");
        let err = reader.read_u32().unwrap_err();
        match err {
            DecodeError::TooShort {
                shape,
                needed,
                actual,
            } => {
                assert_eq!(shape, "car status");
                assert_eq!(needed, 4);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cursor_does_not_advance_past_failed_read() {
        let payload = [7u8, 1, 2];
        let mut reader = TelemetryReader::new(&payload, "test");
        assert_eq!(reader.read_u8().unwrap(), 7);
        assert!(reader.read_u32().is_err());
        assert_eq!(reader.read_u16().unwrap(), u16::from_le_bytes([1, 2]));
    }
}
