//! Little-endian cursor over a packed byte buffer.

use crate::WireError;

/// Sequential reader over a packed little-endian buffer.
///
/// Every read is bounds-checked and advances the cursor by the exact field
/// width; there is no alignment. Floats are returned bit-for-bit, including
/// NaN payloads and infinities.
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let bytes = self
            .pos
            .checked_add(N)
            .and_then(|end| self.data.get(self.pos..end))
            .and_then(|slice| <[u8; N]>::try_from(slice).ok())
            .ok_or(WireError::MalformedPacket {
                expected: self.pos.saturating_add(N),
                actual: self.data.len(),
            })?;
        self.pos = self.pos.saturating_add(N);
        Ok(bytes)
    }

    #[inline]
    pub(crate) fn i8(&mut self) -> Result<i8, WireError> {
        self.take::<1>().map(i8::from_le_bytes)
    }

    #[inline]
    pub(crate) fn f32_le(&mut self) -> Result<f32, WireError> {
        self.take::<4>().map(f32::from_le_bytes)
    }

    pub(crate) fn i8_array<const N: usize>(&mut self) -> Result<[i8; N], WireError> {
        let mut arr = [0i8; N];
        for item in arr.iter_mut() {
            *item = self.i8()?;
        }
        Ok(arr)
    }

    pub(crate) fn f32_le_array<const N: usize>(&mut self) -> Result<[f32; N], WireError> {
        let mut arr = [0.0f32; N];
        for item in arr.iter_mut() {
            *item = self.f32_le()?;
        }
        Ok(arr)
    }
}
