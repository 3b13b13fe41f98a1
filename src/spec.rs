//! Version specs: policies that fill the octets of a [`Uuid`] for one UUID version.
//!
//! A spec is a stateless value implementing [`VersionSpec`]. It receives the 16 octets, a
//! [`RandSource`], and a [`TimeSource`] and writes every field, including the version and
//! variant bits. The field writers in this module are public so that custom specs (e.g. a
//! UUIDv8 layout) can be assembled from the same pieces.
//!
//! All writers fill the payload first and stamp the reserved version/variant bits last, so the
//! reserved bits always win over random content.

use crate::{
    generator::{RandSource, StdSystemTime, TimeSource},
    Uuid,
};

/// Index of the octet holding the version field in its most significant 4 bits.
pub const VERSION_OCTET: usize = 6;

/// Index of the octet holding the variant field in its most significant 2 bits.
pub const VARIANT_OCTET: usize = 8;

/// A field-initialization policy for one UUID version.
pub trait VersionSpec {
    /// The value stamped into the version field.
    const VERSION: u8;

    /// Writes all 16 octets, drawing randomness from `rng` and, if the layout needs it, the
    /// current time from `clock`.
    fn init_fields<R, T>(&self, octets: &mut [u8; 16], rng: &mut R, clock: &mut T)
    where
        R: RandSource + ?Sized,
        T: TimeSource + ?Sized;
}

/// UUIDv4: 122 random bits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct V4Spec;

impl VersionSpec for V4Spec {
    const VERSION: u8 = 4;

    fn init_fields<R, T>(&self, octets: &mut [u8; 16], rng: &mut R, _clock: &mut T)
    where
        R: RandSource + ?Sized,
        T: TimeSource + ?Sized,
    {
        octets[..8].copy_from_slice(&rng.next_u64().to_be_bytes());
        octets[8..].copy_from_slice(&rng.next_u64().to_be_bytes());
        set_version(octets, Self::VERSION);
        set_variant(octets);
    }
}

/// UUIDv7: a 48-bit Unix millisecond timestamp followed by 74 random bits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct V7Spec;

impl V7Spec {
    /// Writes all 16 octets using the given timestamp instead of reading a clock.
    ///
    /// Only the low 48 bits of `unix_ts_ms` are used.
    pub fn init_fields_at<R: RandSource + ?Sized>(
        &self,
        octets: &mut [u8; 16],
        unix_ts_ms: u64,
        rng: &mut R,
    ) {
        set_unix_ts_ms(octets, unix_ts_ms);
        set_rand_a(octets, rng.next_u64() as u16);
        set_rand_b(octets, rng.next_u64());
    }
}

impl VersionSpec for V7Spec {
    const VERSION: u8 = 7;

    fn init_fields<R, T>(&self, octets: &mut [u8; 16], rng: &mut R, clock: &mut T)
    where
        R: RandSource + ?Sized,
        T: TimeSource + ?Sized,
    {
        self.init_fields_at(octets, clock.unix_ts_ms(), rng);
    }
}

impl Uuid {
    /// Creates a UUID with `spec`, drawing from `rng` and reading the system clock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid9562::{spec::V4Spec, Uuid, Xoroshiro128PlusPlus};
    ///
    /// let mut rng = Xoroshiro128PlusPlus::from_state(1, 1)?;
    /// let uuid = Uuid::from_spec(&V4Spec, &mut rng);
    /// assert_eq!(uuid.to_string(), "00000000-0004-4001-8002-000000000004");
    /// # Ok::<(), uuid9562::Error>(())
    /// ```
    pub fn from_spec<S, R>(spec: &S, rng: &mut R) -> Self
    where
        S: VersionSpec,
        R: RandSource + ?Sized,
    {
        let mut octets = [0u8; 16];
        spec.init_fields(&mut octets, rng, &mut StdSystemTime);
        Self::from(octets)
    }
}

/// Writes the low 48 bits of `unix_ts_ms` into octets 0-5, most significant byte first.
pub fn set_unix_ts_ms(octets: &mut [u8; 16], unix_ts_ms: u64) {
    octets[..6].copy_from_slice(&unix_ts_ms.to_be_bytes()[2..]);
}

/// Writes the low 12 bits of `rand_a` into octets 6-7 and stamps version 7.
pub fn set_rand_a(octets: &mut [u8; 16], rand_a: u16) {
    octets[6..8].copy_from_slice(&rand_a.to_be_bytes());
    set_version(octets, V7Spec::VERSION);
}

/// Writes the low 62 bits of `rand_b` into octets 8-15 and stamps the `10` variant.
pub fn set_rand_b(octets: &mut [u8; 16], rand_b: u64) {
    octets[8..].copy_from_slice(&rand_b.to_be_bytes());
    set_variant(octets);
}

/// Replaces the top 4 bits of the version octet with `version`, keeping the low 4 bits.
pub fn set_version(octets: &mut [u8; 16], version: u8) {
    octets[VERSION_OCTET] = (version << 4) | (octets[VERSION_OCTET] & 0x0f);
}

/// Replaces the top 2 bits of the variant octet with `10`, keeping the low 6 bits.
pub fn set_variant(octets: &mut [u8; 16]) {
    octets[VARIANT_OCTET] = 0x80 | (octets[VARIANT_OCTET] & 0x3f);
}

#[cfg(test)]
mod tests {
    use super::{set_version, V4Spec, V7Spec, VersionSpec};
    use crate::{
        generator::tests::{FixedTime, ReplayRand},
        RandSource, TimeSource, Uuid, Variant, Xoroshiro128PlusPlus,
    };

    fn create<S: VersionSpec>(spec: &S, rng: &mut impl RandSource, ts: u64) -> Uuid {
        let mut octets = [0u8; 16];
        spec.init_fields(&mut octets, rng, &mut FixedTime(ts));
        Uuid::from(octets)
    }

    /// Reproduces v4 output from a fixed seed
    #[test]
    fn reproduces_v4_output_from_a_fixed_seed() {
        let mut g = Xoroshiro128PlusPlus::from_state(1, 1).unwrap();
        let first = Uuid::from_spec(&V4Spec, &mut g);
        assert_eq!(first.as_bytes()[6] >> 4, 0b0100);
        assert_eq!(first.as_bytes()[8] >> 6, 0b10);
        assert_eq!(first.encode().as_str(), "00000000-0004-4001-8002-000000000004");

        g.seed(1, 1).unwrap();
        assert_eq!(Uuid::from_spec(&V4Spec, &mut g), first);
        assert_ne!(Uuid::from_spec(&V4Spec, &mut g), first);
    }

    /// Reproduces v7 output from a fixed seed and timestamp
    #[test]
    fn reproduces_v7_output_from_a_fixed_seed_and_timestamp() {
        let mut g = Xoroshiro128PlusPlus::from_state(1, 1).unwrap();
        let e = create(&V7Spec, &mut g, 0x0123_4567_89ab);
        assert_eq!(e.encode().as_str(), "01234567-89ab-7001-8002-000000000004");
    }

    /// Lets reserved bits win over saturated random words
    #[test]
    fn lets_reserved_bits_win_over_saturated_random_words() {
        for word in [0u64, u64::MAX] {
            let v4 = create(&V4Spec, &mut ReplayRand::new(&[word]), 0);
            assert_eq!(v4.version(), Some(4));
            assert_eq!(v4.variant(), Variant::Var10);
            assert!(Uuid::NIL < v4 && v4 < Uuid::MAX);

            let v7 = create(&V7Spec, &mut ReplayRand::new(&[word]), 0xffff_ffff_ffff);
            assert_eq!(v7.version(), Some(7));
            assert_eq!(v7.variant(), Variant::Var10);
            assert!(Uuid::NIL < v7 && v7 < Uuid::MAX);
        }

        let v4 = create(&V4Spec, &mut ReplayRand::new(&[u64::MAX]), 0);
        assert_eq!(v4.encode().as_str(), "ffffffff-ffff-4fff-bfff-ffffffffffff");
        let v4 = create(&V4Spec, &mut ReplayRand::new(&[0]), 0);
        assert_eq!(v4.encode().as_str(), "00000000-0000-4000-8000-000000000000");
    }

    /// Places the timestamp big-endian and the random words in rand_a and rand_b
    #[test]
    fn places_the_timestamp_big_endian_and_random_words_in_rand_a_and_rand_b() {
        let mut rng = ReplayRand::new(&[0xaaaa_bbbb_cccc_dcc3, 0xd8c4_dc0c_0c07_398f]);
        let e = create(&V7Spec, &mut rng, 0x17f_22e2_79b0);
        assert_eq!(e, Uuid::from_fields_v7(0x17f22e279b0, 0xcc3, 0x18c4dc0c0c07398f));
        assert_eq!(e.encode().as_str(), "017f22e2-79b0-7cc3-98c4-dc0c0c07398f");
    }

    /// Truncates timestamps to 48 bits
    #[test]
    fn truncates_timestamps_to_48_bits() {
        let e = create(&V7Spec, &mut ReplayRand::new(&[0]), 0xabcd_0123_4567_89ab);
        assert_eq!(e.as_bytes()[..6], [0x01, 0x23, 0x45, 0x67, 0x89, 0xab]);
    }

    /// Reads the clock only for time-ordered layouts
    #[test]
    fn reads_the_clock_only_for_time_ordered_layouts() {
        struct CountingClock(u32);
        impl TimeSource for CountingClock {
            fn unix_ts_ms(&mut self) -> u64 {
                self.0 += 1;
                0x0123_4567_89ab
            }
        }

        let mut clock = CountingClock(0);
        let mut rng = ReplayRand::new(&[1, 2, 3]);
        let mut octets = [0u8; 16];
        V4Spec.init_fields(&mut octets, &mut rng, &mut clock);
        assert_eq!(clock.0, 0);
        V7Spec.init_fields(&mut octets, &mut rng, &mut clock);
        assert_eq!(clock.0, 1);
    }

    /// Accepts user-defined layouts built from the field writers
    #[test]
    fn accepts_user_defined_layouts_built_from_the_field_writers() {
        struct V8Constant;
        impl VersionSpec for V8Constant {
            const VERSION: u8 = 8;
            fn init_fields<R, T>(&self, octets: &mut [u8; 16], _: &mut R, _: &mut T)
            where
                R: RandSource + ?Sized,
                T: TimeSource + ?Sized,
            {
                *octets = [0x5a; 16];
                set_version(octets, Self::VERSION);
                super::set_variant(octets);
            }
        }

        let e = Uuid::from_spec(&V8Constant, &mut ReplayRand::new(&[0]));
        assert_eq!(e.encode().as_str(), "5a5a5a5a-5a5a-8a5a-9a5a-5a5a5a5a5a5a");
        assert_eq!(e.version(), Some(8));
    }
}
