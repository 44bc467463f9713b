use crate::Result;

const UNIT_MSB: u8 = 0x80;

/// Appends bits MSB first into a growing byte buffer.
///
/// A new byte is only pushed when its first bit is written, so the buffer
/// length is always the number of bytes actually touched.
pub struct BitWriter {
    buf: Vec<u8>,
    mask: u8,
    bits: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        BitWriter {
            buf: Vec::new(),
            mask: UNIT_MSB,
            bits: 0,
        }
    }

    /// Reserves `capacity` bytes up front, failing instead of aborting when
    /// the allocation cannot be made.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut writer = BitWriter::new();
        writer.buf.try_reserve_exact(capacity)?;
        Ok(writer)
    }

    #[inline(always)]
    pub fn push(&mut self, bit: bool) {
        if self.mask == UNIT_MSB {
            self.buf.push(0);
        }
        if bit {
            // a byte was pushed above when mask was at the MSB
            if let Some(last) = self.buf.last_mut() {
                *last |= self.mask;
            }
        }
        self.mask >>= 1;
        if self.mask == 0 {
            self.mask = UNIT_MSB;
        }
        self.bits += 1;
    }

    #[inline(always)]
    pub fn push_repeat(&mut self, bit: bool, count: u32) {
        for _ in 0..count {
            self.push(bit);
        }
    }

    /// Number of bytes touched so far; a partially filled last byte counts.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of bits pushed so far.
    pub fn bit_len(&self) -> usize {
        self.bits
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        trace!(
            "finish writer: {} bits in {} bytes",
            self.bits,
            self.buf.len()
        );
        self.buf
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        BitWriter::new()
    }
}

/// Reads bits MSB first from a fixed buffer.
///
/// Reading past the end yields `None` rather than garbage.
pub struct BitReader<'a> {
    data: &'a [u8],
    index: usize,
    mask: u8,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        BitReader {
            data,
            index: 0,
            mask: UNIT_MSB,
        }
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<bool> {
        let unit = *self.data.get(self.index)?;
        let bit = unit & self.mask != 0;
        self.mask >>= 1;
        if self.mask == 0 {
            self.mask = UNIT_MSB;
            self.index += 1;
        }
        Some(bit)
    }

    /// Bits consumed so far.
    pub fn position(&self) -> usize {
        self.index * 8 + self.mask.leading_zeros() as usize
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.data.len()
    }
}
