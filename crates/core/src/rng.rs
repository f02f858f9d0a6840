//! RNG module - uniform random piece generation
//!
//! Every spawn draws a shape kind and a starting rotation independently and
//! uniformly; there is no bag or history. A small LCG keeps games reproducible
//! for a given seed.

use crate::types::ShapeKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Seed 0 behaves like seed 1.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, max)`. Uses the high bits; the low bits of an LCG with a
    /// power-of-two modulus cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Draws the shape and starting rotation of each new piece.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Next `(kind, quarter_turns)`, with `quarter_turns` in `0..4`
    /// (0, 90, 180 or 270 degrees clockwise).
    pub fn draw(&mut self) -> (ShapeKind, u8) {
        let kind = ShapeKind::ALL[self.rng.next_range(ShapeKind::ALL.len() as u32) as usize];
        let quarter_turns = self.rng.next_range(4) as u8;
        (kind, quarter_turns)
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
