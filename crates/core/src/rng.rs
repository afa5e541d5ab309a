//! RNG module - deterministic xorshift generator for world generation
//!
//! World generation must be a pure function of the seed, so the mine uses its
//! own tiny generator instead of a thread-local one. The same seed always
//! produces the same mine.

/// 32-bit xorshift generator (shifts 13, 17, 5)
#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would stay zero forever.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Independent 1-in-`n` Bernoulli trial
    ///
    /// Always consumes exactly one draw, so the stream stays aligned whether
    /// or not the caller uses the result.
    pub fn one_in(&mut self, n: u32) -> bool {
        self.next_u32() % n == 0
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}
