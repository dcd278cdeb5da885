//! Jitter sources for damage variance.
//!
//! The engine never reaches for a global RNG. Callers hand it a
//! [`JitterSource`]; the production source is [`PcgJitter`], seeded per battle,
//! so the same seed and snapshots always replay the same fight.

/// Supplier of bounded random perturbations.
pub trait JitterSource {
    /// Returns an integer uniformly distributed in `[min, max]` inclusive.
    fn roll(&mut self, min: i32, max: i32) -> i32;
}

impl<J: JitterSource + ?Sized> JitterSource for &mut J {
    fn roll(&mut self, min: i32, max: i32) -> i32 {
        (**self).roll(min, max)
    }
}

/// Always returns the same value (clamped into the requested range).
///
/// Used for exact scenarios where variance must be switched off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedJitter(pub i32);

impl JitterSource for FixedJitter {
    fn roll(&mut self, min: i32, max: i32) -> i32 {
        self.0.clamp(min, max)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64-bit LCG state, 32-bit permuted output.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces the same sequence
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgJitter {
    state: u64,
}

impl PcgJitter {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub const fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    /// `state' = state × multiplier + increment (mod 2^64)`
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::step(self.state);
        Self::output(self.state)
    }
}

impl JitterSource for PcgJitter {
    fn roll(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        let offset = u64::from(self.next_u32()) % span;
        (i64::from(min) + offset as i64) as i32
    }
}
