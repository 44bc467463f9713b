//! The two self-terminating codes a run token is built from.

use crate::bits::{BitReader, BitWriter};

/// Signed integer code, cheapest around zero.
///
/// `v <= 0` is `|v|` ones, a zero, then a one; `v > 0` is `v - 1` ones and
/// two zeros.
pub struct SignedDeltaCode;

impl SignedDeltaCode {
    pub fn encode(w: &mut BitWriter, v: i32) {
        trace!("put signed {v}");
        if v <= 0 {
            w.push_repeat(true, v.unsigned_abs());
            w.push(false);
            w.push(true);
        } else {
            w.push_repeat(true, v.unsigned_abs() - 1);
            w.push(false);
            w.push(false);
        }
    }

    /// Returns `None` when the stream ends mid-code or the value does not
    /// fit an `i32`.
    pub fn decode(r: &mut BitReader) -> Option<i32> {
        let mut ones: i32 = 0;
        while r.pop()? {
            ones = ones.checked_add(1)?;
        }
        if r.pop()? {
            Some(-ones)
        } else {
            ones.checked_add(1)
        }
    }

    /// Number of bits `encode` emits for `v`.
    pub fn encoded_len(v: i32) -> u64 {
        if v <= 0 {
            v.unsigned_abs() as u64 + 2
        } else {
            v as u64 + 1
        }
    }
}

/// Unsigned integer code, cost proportional to bit length.
///
/// Zero is a single zero bit. Otherwise a one marks the highest set bit,
/// every lower bit follows as a `1 b` pair, and a zero terminates.
pub struct RunLengthCode;

impl RunLengthCode {
    pub fn encode(w: &mut BitWriter, v: u32) {
        trace!("put unsigned {v}");
        if v == 0 {
            w.push(false);
            return;
        }
        let top = u32::BITS - 1 - v.leading_zeros();
        w.push(true);
        for shift in (0..top).rev() {
            w.push(true);
            w.push((v >> shift) & 1 == 1);
        }
        w.push(false);
    }

    /// Returns `None` when the stream ends mid-code or the value overflows
    /// a `u32`.
    pub fn decode(r: &mut BitReader) -> Option<u32> {
        if !r.pop()? {
            return Some(0);
        }
        let mut ret: u32 = 1;
        while r.pop()? {
            if ret.leading_zeros() == 0 {
                return None;
            }
            ret <<= 1;
            if r.pop()? {
                ret |= 1;
            }
        }
        Some(ret)
    }

    /// Number of bits `encode` emits for `v`: 1 for zero,
    /// `2 * floor(log2 v) + 2` otherwise.
    pub fn encoded_len(v: u32) -> u64 {
        match v {
            0 => 1,
            v => 2 * (u32::BITS - 1 - v.leading_zeros()) as u64 + 2,
        }
    }
}
