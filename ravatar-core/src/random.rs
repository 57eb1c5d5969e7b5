//! Seeded Random Stream
//!
//! A small 4-word generator (32-bit words) fed by `SeedHasher`. Every avatar
//! property is drawn from one of these, so the arithmetic here must stay
//! bit-exact: wrapping u32 throughout, logical right shifts only.

use crate::hashing::SeedHasher;

const TWO_POW_32: f64 = 4_294_967_296.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandomStream {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl SeededRandomStream {
    /// Stream for a seed string. Any string is valid, including "".
    pub fn new(seed: &str) -> Self {
        Self::from_words(SeedHasher::new(seed).seed_words())
    }

    pub fn from_words([a, b, c, d]: [u32; 4]) -> Self {
        Self { a, b, c, d }
    }

    pub fn next_u32(&mut self) -> u32 {
        let t = self.a.wrapping_add(self.b);
        self.a = self.b ^ (self.b >> 9);
        self.b = self.c.wrapping_add(self.c << 3);
        self.c = self.c.rotate_left(21);
        self.d = self.d.wrapping_add(1);
        let t = t.wrapping_add(self.d);
        self.c = self.c.wrapping_add(t);
        t
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }

    /// `floor(next_f64() * len)`, an index into a table of `len` entries.
    pub fn next_index(&mut self, len: usize) -> usize {
        let index = (self.next_f64() * len as f64) as usize;
        debug_assert!(len == 0 || index < len);
        index
    }

    /// True when the next value is at or above `threshold`.
    pub fn next_bool(&mut self, threshold: f64) -> bool {
        self.next_f64() >= threshold
    }
}

impl Iterator for SeededRandomStream {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}
