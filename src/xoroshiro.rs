//! The default random number generator: xoroshiro128++ 1.0.
//!
//! xoroshiro128++ by David Blackman and Sebastiano Vigna is a small-state, all-purpose generator
//! that is fast and passes the usual statistical test batteries. It is **not** cryptographically
//! secure; supply a different [`RandSource`](crate::generator::RandSource) (e.g. through
//! [`Adapter`](crate::generator::Adapter)) if unpredictability matters.
//!
//! The state must not be everywhere zero. A zeroed generator (as returned by
//! [`Default::default`]) is "not yet seeded": drawing from it through
//! [`RandSource`](crate::generator::RandSource), as every version spec and
//! [`Factory`](crate::Factory) does, first seeds it from the clock. The raw
//! [`next`](Xoroshiro128PlusPlus::next) and the `rand_core` interface do not check, so a zeroed
//! generator used through them emits nothing but zeros.
//!
//! See <https://prng.di.unimi.it/xoroshiro128plusplus.c>.

use rand_core::{impls, RngCore, SeedableRng};

use crate::{generator::RandSource, Error};

const JUMP: [u64; 2] = [0x2bd7_a6a6_e99c_2ddc, 0x0992_ccaf_6a6f_ca05];
const LONG_JUMP: [u64; 2] = [0x360f_d5f2_cf8d_5d99, 0x9c6e_6877_736c_46e3];

/// The xoroshiro128++ generator with 128 bits of state.
///
/// # Examples
///
/// ```rust
/// use uuid9562::Xoroshiro128PlusPlus;
///
/// let mut a = Xoroshiro128PlusPlus::from_state(1, 2)?;
/// let mut b = a.jumped();
/// assert_ne!(a.next(), b.next());
/// # Ok::<(), uuid9562::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Xoroshiro128PlusPlus {
    s: [u64; 2],
}

impl Xoroshiro128PlusPlus {
    /// Creates a generator with the given state words.
    ///
    /// Returns [`Error::ZeroSeed`] if both words are zero.
    pub const fn from_state(s0: u64, s1: u64) -> Result<Self, Error> {
        if s0 == 0 && s1 == 0 {
            Err(Error::ZeroSeed)
        } else {
            Ok(Self { s: [s0, s1] })
        }
    }

    /// Creates a generator seeded from the current time.
    pub fn from_time() -> Self {
        let mut g = Self::default();
        g.seed_from_time();
        g
    }

    /// Replaces the state with the given words.
    ///
    /// Returns [`Error::ZeroSeed`] and leaves the state untouched if both words are zero.
    pub fn seed(&mut self, s0: u64, s1: u64) -> Result<(), Error> {
        *self = Self::from_state(s0, s1)?;
        Ok(())
    }

    /// Seeds the state from two samples of the system clock.
    ///
    /// Each nanosecond reading is run through SplitMix64 so that the two state words differ even
    /// when the clock is coarse.
    pub fn seed_from_time(&mut self) {
        use std::time::{SystemTime, UNIX_EPOCH};

        let sample = || {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos() as u64
        };
        let first = sample();
        let second = sample();

        let mut sm = SplitMix64(first ^ second.rotate_left(32));
        let (s0, s1) = (sm.next(), sm.next());
        self.s = if s0 == 0 && s1 == 0 { [first | 1, second] } else { [s0, s1] };

        #[cfg(feature = "tracing")]
        tracing::debug!(s0 = self.s[0], s1 = self.s[1], "seeded xoroshiro128++ from clock");
    }

    /// Returns `true` if the state is not all zero.
    pub const fn is_seeded(&self) -> bool {
        self.s[0] != 0 || self.s[1] != 0
    }

    /// Returns the current state words.
    pub const fn state(&self) -> (u64, u64) {
        (self.s[0], self.s[1])
    }

    /// Returns the next pseudo-random `u64` and advances the state.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        let [s0, mut s1] = self.s;
        let result = s0.wrapping_add(s1).rotate_left(17).wrapping_add(s0);

        s1 ^= s0;
        self.s[0] = s0.rotate_left(49) ^ s1 ^ (s1 << 21);
        self.s[1] = s1.rotate_left(28);

        result
    }

    /// Advances the state as if by 2^64 calls to [`next`](Self::next).
    ///
    /// Used to carve 2^64 non-overlapping subsequences out of one seed, e.g. one per thread.
    pub fn jump(&mut self) {
        self.apply_jump(&JUMP);
    }

    /// Advances the state as if by 2^96 calls to [`next`](Self::next).
    ///
    /// Yields 2^32 starting points, from each of which [`jump`](Self::jump) can carve 2^32
    /// further non-overlapping subsequences.
    pub fn long_jump(&mut self) {
        self.apply_jump(&LONG_JUMP);
    }

    /// Returns a copy of the current stream and moves `self` 2^64 steps ahead.
    pub fn jumped(&mut self) -> Self {
        let current = self.clone();
        self.jump();
        current
    }

    /// Returns a copy of the current stream and moves `self` 2^96 steps ahead.
    pub fn long_jumped(&mut self) -> Self {
        let current = self.clone();
        self.long_jump();
        current
    }

    fn apply_jump(&mut self, poly: &[u64; 2]) {
        let mut acc = [0u64; 2];
        for word in poly {
            for b in 0..64 {
                if word & (1u64 << b) != 0 {
                    acc[0] ^= self.s[0];
                    acc[1] ^= self.s[1];
                }
                self.next();
            }
        }
        self.s = acc;
    }
}

impl RandSource for Xoroshiro128PlusPlus {
    /// Returns the next pseudo-random `u64`, seeding from the clock first if not yet seeded.
    fn next_u64(&mut self) -> u64 {
        if !self.is_seeded() {
            self.seed_from_time();
        }
        self.next()
    }
}

impl RngCore for Xoroshiro128PlusPlus {
    fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Xoroshiro128PlusPlus {
    type Seed = [u8; 16];

    /// Creates a generator from two little-endian state words. An all-zero seed is replaced by
    /// the state derived from `seed_from_u64(0)`.
    fn from_seed(seed: Self::Seed) -> Self {
        let mut words = [0u64; 2];
        for (w, chunk) in words.iter_mut().zip(seed.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *w = u64::from_le_bytes(buf);
        }
        match Self::from_state(words[0], words[1]) {
            Ok(g) => g,
            Err(_) => Self::seed_from_u64(0),
        }
    }

    fn seed_from_u64(state: u64) -> Self {
        let mut sm = SplitMix64(state);
        let (s0, s1) = (sm.next(), sm.next());
        Self { s: [s0, s1] }
    }
}

/// SplitMix64, used to expand small or correlated seeds into full state words.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }
}
