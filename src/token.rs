use crate::bits::{BitReader, BitWriter};
use crate::code::{RunLengthCode, SignedDeltaCode};
use crate::pixel::{PixelBuffer, QuantizedColor};
use crate::CHANNELS;
use std::slice::ChunksExact;

/// One run: the colour change from the previous run in quantization steps,
/// and how many pixels repeat the colour after the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken {
    pub delta: [i32; 3],
    pub run: u32,
}

impl RunToken {
    pub fn new(dr: i32, dg: i32, db: i32, run: u32) -> Self {
        RunToken {
            delta: [dr, dg, db],
            run,
        }
    }

    /// Pixels covered by this token.
    pub fn pixels(&self) -> usize {
        self.run as usize + 1
    }

    pub fn write(&self, w: &mut BitWriter) {
        for d in self.delta {
            SignedDeltaCode::encode(w, d);
        }
        RunLengthCode::encode(w, self.run);
    }

    pub fn read(r: &mut BitReader) -> Option<Self> {
        let dr = SignedDeltaCode::decode(r)?;
        let dg = SignedDeltaCode::decode(r)?;
        let db = SignedDeltaCode::decode(r)?;
        let run = RunLengthCode::decode(r)?;
        Some(RunToken::new(dr, dg, db, run))
    }

    pub fn encoded_len(&self) -> u64 {
        self.delta
            .iter()
            .map(|d| SignedDeltaCode::encoded_len(*d))
            .sum::<u64>()
            + RunLengthCode::encoded_len(self.run)
    }
}

/// Splits a pixel buffer into runs of identical quantized colour.
pub struct RunTokens<'a> {
    rest: ChunksExact<'a, u8>,
    old: QuantizedColor,
    current: Option<QuantizedColor>,
}

impl<'a> RunTokens<'a> {
    pub fn new(pixels: &PixelBuffer<'a>) -> Self {
        let mut rest = pixels.as_bytes().chunks_exact(CHANNELS);
        let current = rest
            .next()
            .map(|rgb| QuantizedColor::new(rgb[0], rgb[1], rgb[2]));
        RunTokens {
            rest,
            old: QuantizedColor::BLACK,
            current,
        }
    }
}

impl Iterator for RunTokens<'_> {
    type Item = RunToken;

    fn next(&mut self) -> Option<RunToken> {
        let current = self.current?;
        let mut run = 0;
        let mut next = None;
        for rgb in self.rest.by_ref() {
            let color = QuantizedColor::new(rgb[0], rgb[1], rgb[2]);
            if color != current {
                next = Some(color);
                break;
            }
            run += 1;
        }
        let delta = current.delta_from(self.old);
        trace!("run {current:?} x{} delta {delta:?}", run + 1);
        self.old = current;
        self.current = next;
        Some(RunToken { delta, run })
    }
}

/// Decodes tokens from a payload until `pixels` pixels are covered or the
/// payload runs out.
pub struct Tokens<'a> {
    reader: BitReader<'a>,
    remaining: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(payload: &'a [u8], pixels: usize) -> Self {
        Tokens {
            reader: BitReader::new(payload),
            remaining: pixels,
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = RunToken;

    fn next(&mut self) -> Option<RunToken> {
        if self.remaining == 0 {
            return None;
        }
        let token = RunToken::read(&mut self.reader)?;
        self.remaining = self.remaining.saturating_sub(token.pixels());
        Some(token)
    }
}
