//! UUID factory and batch generation.

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    generator::{RandSource, StdSystemTime, TimeSource},
    spec::{self, V4Spec, V7Spec, VersionSpec},
    Error, Uuid, Xoroshiro128PlusPlus,
};

/// Largest batch [`Factory::create_batch_counter`] accepts: the number of distinct values of the
/// 12-bit `rand_a` counter.
pub const MAX_COUNTER_BATCH: u16 = 1 << 12;

/// Largest `count * increment` [`Factory::create_batch_monotonic`] accepts.
///
/// Keeping the span at or below 2^61 lets the randomly based `rand_b` counter advance through the
/// whole batch without leaving the 62-bit field.
pub const MAX_MONOTONIC_SPAN: u64 = 1 << 61;

const MAX_RAND_B: u64 = (1 << 62) - 1;

/// Creates UUIDs from an owned random number generator and clock.
///
/// Besides single v4 and v7 UUIDs, a factory produces batches of v7 UUIDs that share one
/// timestamp and are strictly increasing within the batch:
///
/// | Method                       | Counter field       | Batch limit       | Randomness         |
/// | ---------------------------- | ------------------- | ----------------- | ------------------ |
/// | [`create_batch_counter`]     | `rand_a` (12 bits)  | 4096              | 62 bits per item   |
/// | [`create_batch_monotonic`]   | `rand_b` (62 bits)  | `u32::MAX` items  | shared `rand_a`    |
///
/// Timestamps are captured once per batch, so call a batch method at most once per millisecond
/// if UUIDs must stay unique across batches.
///
/// A factory is not synchronized. To generate from several threads, give each thread its own
/// factory, e.g. with streams carved out of one seed by
/// [`Xoroshiro128PlusPlus::jumped`]:
///
/// ```rust
/// use std::thread;
/// use uuid9562::{Factory, Xoroshiro128PlusPlus};
///
/// let mut root = Xoroshiro128PlusPlus::from_time();
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let mut f = Factory::new(root.jumped());
///         thread::spawn(move || f.create_batch_counter(16))
///     })
///     .collect();
/// for h in handles {
///     assert_eq!(h.join().unwrap()?.len(), 16);
/// }
/// # Ok::<(), uuid9562::Error>(())
/// ```
///
/// [`create_batch_counter`]: Factory::create_batch_counter
/// [`create_batch_monotonic`]: Factory::create_batch_monotonic
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Factory<R, T = StdSystemTime> {
    /// The random number generator used by the factory.
    rng: R,

    /// The system clock used by the factory.
    time: T,
}

impl<R: RandSource> Factory<R> {
    /// Creates a factory with a random number generator and the system clock.
    pub const fn new(rng: R) -> Self {
        Self::with_rand_and_time_sources(rng, StdSystemTime)
    }
}

impl Factory<Xoroshiro128PlusPlus> {
    /// Creates a factory backed by a [`Xoroshiro128PlusPlus`] with the given state words.
    ///
    /// Returns [`Error::ZeroSeed`] if both words are zero.
    pub fn with_xoroshiro_seed(s0: u64, s1: u64) -> Result<Self, Error> {
        Ok(Self::new(Xoroshiro128PlusPlus::from_state(s0, s1)?))
    }

    /// Creates a factory backed by a [`Xoroshiro128PlusPlus`] seeded from the current time.
    pub fn from_time() -> Self {
        Self::new(Xoroshiro128PlusPlus::from_time())
    }
}

impl<R: RandSource, T: TimeSource> Factory<R, T> {
    /// Creates a factory with a random number generator and a clock.
    pub const fn with_rand_and_time_sources(rng: R, time: T) -> Self {
        Self { rng, time }
    }

    /// Returns a mutable reference to the random number generator.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Consumes the factory and returns the random number generator and the clock.
    pub fn into_parts(self) -> (R, T) {
        (self.rng, self.time)
    }

    /// Creates a UUID with an arbitrary version spec.
    pub fn create<S: VersionSpec>(&mut self, spec: &S) -> Uuid {
        let mut octets = [0u8; 16];
        spec.init_fields(&mut octets, &mut self.rng, &mut self.time);
        Uuid::from(octets)
    }

    /// Creates a UUIDv4.
    pub fn create_v4(&mut self) -> Uuid {
        self.create(&V4Spec)
    }

    /// Creates a UUIDv7 from the current timestamp.
    pub fn create_v7(&mut self) -> Uuid {
        self.create(&V7Spec)
    }

    /// Creates a UUIDv7 from the `unix_ts_ms` passed.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit integer.
    pub fn create_v7_core(&mut self, unix_ts_ms: u64) -> Uuid {
        assert!(unix_ts_ms < 1 << 48, "`unix_ts_ms` must be a 48-bit integer");
        let mut octets = [0u8; 16];
        V7Spec.init_fields_at(&mut octets, unix_ts_ms, &mut self.rng);
        Uuid::from(octets)
    }

    /// Creates `count` UUIDv7s sharing the current timestamp, numbered by a dedicated counter in
    /// `rand_a`.
    ///
    /// The `i`-th UUID carries `i` in `rand_a` and a fresh random `rand_b`, so the batch is
    /// strictly increasing regardless of the random draws.
    ///
    /// Returns [`Error::CounterBatchTooLarge`] if `count` exceeds [`MAX_COUNTER_BATCH`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// let mut f = uuid9562::Factory::from_time();
    /// let batch = f.create_batch_counter(256)?;
    /// assert!(batch.windows(2).all(|w| w[0] < w[1]));
    /// # Ok::<(), uuid9562::Error>(())
    /// ```
    pub fn create_batch_counter(&mut self, count: u16) -> Result<Vec<Uuid>, Error> {
        let unix_ts_ms = self.time.unix_ts_ms();
        self.create_batch_counter_core(unix_ts_ms, count)
    }

    /// Creates a dedicated-counter batch from the `unix_ts_ms` passed.
    ///
    /// See [`Factory::create_batch_counter`].
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit integer.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn create_batch_counter_core(
        &mut self,
        unix_ts_ms: u64,
        count: u16,
    ) -> Result<Vec<Uuid>, Error> {
        assert!(unix_ts_ms < 1 << 48, "`unix_ts_ms` must be a 48-bit integer");
        if count > MAX_COUNTER_BATCH {
            return Err(Error::CounterBatchTooLarge {
                requested: count,
                max: MAX_COUNTER_BATCH,
            });
        }

        let mut batch = Vec::with_capacity(usize::from(count));
        for counter in 0..count {
            let mut octets = [0u8; 16];
            spec::set_unix_ts_ms(&mut octets, unix_ts_ms);
            spec::set_rand_a(&mut octets, counter);
            spec::set_rand_b(&mut octets, self.rng.next_u64());
            batch.push(Uuid::from(octets));
        }
        Ok(batch)
    }

    /// Creates `count` UUIDv7s sharing the current timestamp and one random `rand_a`, with
    /// `rand_b` used as a randomly initialized counter that grows by `increment` per UUID.
    ///
    /// This method trades the randomness of `rand_a` (identical across the batch) and the
    /// unpredictability of `rand_b` for a batch size far beyond 4096. Do not use it where guessing
    /// neighboring UUIDs is a concern.
    ///
    /// Returns [`Error::ZeroIncrement`] if `increment` is zero and
    /// [`Error::CounterSpaceExhausted`] if `count * increment` exceeds [`MAX_MONOTONIC_SPAN`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// let mut f = uuid9562::Factory::from_time();
    /// let batch = f.create_batch_monotonic(10_000, 4)?;
    /// assert_eq!(batch.len(), 10_000);
    /// assert!(batch.windows(2).all(|w| w[0] < w[1]));
    /// # Ok::<(), uuid9562::Error>(())
    /// ```
    pub fn create_batch_monotonic(
        &mut self,
        count: u32,
        increment: u32,
    ) -> Result<Vec<Uuid>, Error> {
        let unix_ts_ms = self.time.unix_ts_ms();
        self.create_batch_monotonic_core(unix_ts_ms, count, increment)
    }

    /// Creates a monotonic-random batch from the `unix_ts_ms` passed.
    ///
    /// See [`Factory::create_batch_monotonic`].
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit integer.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn create_batch_monotonic_core(
        &mut self,
        unix_ts_ms: u64,
        count: u32,
        increment: u32,
    ) -> Result<Vec<Uuid>, Error> {
        assert!(unix_ts_ms < 1 << 48, "`unix_ts_ms` must be a 48-bit integer");
        if increment == 0 {
            return Err(Error::ZeroIncrement);
        }
        let span = u64::from(count) * u64::from(increment);
        if span > MAX_MONOTONIC_SPAN {
            return Err(Error::CounterSpaceExhausted { count, increment });
        }

        // fold the four 16-bit slices of one draw into rand_a
        let a = self.rng.next_u64();
        let rand_a = a
            .wrapping_add(a >> 16)
            .wrapping_add(a >> 32)
            .wrapping_add(a >> 48) as u16;

        // start low enough that `count` increments stay inside the 62-bit field
        let mut rand_b = self.rng.next_u64() & MAX_RAND_B;
        if rand_b > span {
            rand_b -= span;
        }

        let mut batch = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let mut octets = [0u8; 16];
            spec::set_unix_ts_ms(&mut octets, unix_ts_ms);
            spec::set_rand_a(&mut octets, rand_a);
            spec::set_rand_b(&mut octets, rand_b);
            batch.push(Uuid::from(octets));
            rand_b += u64::from(increment);
        }
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::{Factory, MAX_COUNTER_BATCH, MAX_RAND_B};
    use crate::{
        generator::tests::{FixedTime, ReplayRand},
        Error, Uuid, Variant, Xoroshiro128PlusPlus,
    };

    const TS: u64 = 0x0123_4567_89ab;

    fn rand_a(e: &Uuid) -> u16 {
        u16::from_be_bytes([e.as_bytes()[6], e.as_bytes()[7]]) & 0x0fff
    }

    fn rand_b(e: &Uuid) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&e.as_bytes()[8..]);
        u64::from_be_bytes(buf) & MAX_RAND_B
    }

    fn assert_strictly_increasing(batch: &[Uuid]) {
        for w in batch.windows(2) {
            assert!(w[0] < w[1], "{} !< {}", w[0], w[1]);
        }
    }

    /// Produces a full dedicated-counter batch under one timestamp
    #[test]
    fn produces_a_full_dedicated_counter_batch_under_one_timestamp() {
        let mut f = Factory::from_time();
        let batch = f.create_batch_counter(MAX_COUNTER_BATCH).unwrap();
        assert_eq!(batch.len(), 4096);

        let ts = &batch[0].as_bytes()[..6];
        for (i, e) in batch.iter().enumerate() {
            assert_eq!(&e.as_bytes()[..6], ts);
            assert_eq!(rand_a(e), i as u16);
            assert_eq!(e.version(), Some(7));
            assert_eq!(e.variant(), Variant::Var10);
        }
        assert!(batch
            .windows(2)
            .all(|w| w[0].as_bytes()[6..8] < w[1].as_bytes()[6..8]));
        assert_strictly_increasing(&batch);
    }

    /// Keeps counter ordering even when rand_b decreases
    #[test]
    fn keeps_counter_ordering_even_when_rand_b_decreases() {
        let rng = ReplayRand::new(&[u64::MAX, 0]);
        let mut f = Factory::with_rand_and_time_sources(rng, FixedTime(TS));
        let batch = f.create_batch_counter(64).unwrap();
        assert_eq!(batch[0].encode().as_str(), "01234567-89ab-7000-bfff-ffffffffffff");
        assert_eq!(batch[1].encode().as_str(), "01234567-89ab-7001-8000-000000000000");
        assert_strictly_increasing(&batch);
    }

    /// Rejects dedicated-counter batches over the counter range
    #[test]
    fn rejects_dedicated_counter_batches_over_the_counter_range() {
        let mut f = Factory::with_xoroshiro_seed(1, 1).unwrap();
        let before = f.rng_mut().state();
        assert_eq!(
            f.create_batch_counter(4097),
            Err(Error::CounterBatchTooLarge {
                requested: 4097,
                max: 4096
            })
        );
        assert!(f.create_batch_counter(u16::MAX).is_err());
        assert_eq!(f.rng_mut().state(), before);
        assert!(f.create_batch_counter(0).unwrap().is_empty());
    }

    /// Produces a monotonic batch sharing timestamp and rand_a
    #[test]
    fn produces_a_monotonic_batch_sharing_timestamp_and_rand_a() {
        let mut f = Factory::from_time();
        let batch = f.create_batch_monotonic(100_000, 3).unwrap();
        assert_eq!(batch.len(), 100_000);

        let head = batch[0];
        for (i, e) in batch.iter().enumerate() {
            assert_eq!(e.as_bytes()[..8], head.as_bytes()[..8]);
            assert_eq!(rand_b(e), rand_b(&head) + 3 * i as u64);
            assert_eq!(e.version(), Some(7));
            assert_eq!(e.variant(), Variant::Var10);
        }
        assert_strictly_increasing(&batch);
    }

    /// Folds the first draw into rand_a and rebases rand_b below the span
    #[test]
    fn folds_the_first_draw_into_rand_a_and_rebases_rand_b_below_the_span() {
        let rng = ReplayRand::new(&[0x0001_0002_0003_0004, u64::MAX]);
        let mut f = Factory::with_rand_and_time_sources(rng, FixedTime(TS));
        let batch = f.create_batch_monotonic_core(TS, 4, 5).unwrap();

        // 0x0004 + 0x0003 + 0x0002 + 0x0001 in the low 16 bits
        assert_eq!(rand_a(&batch[0]), 0x00a);
        assert_eq!(rand_b(&batch[0]), MAX_RAND_B - 20);
        assert_eq!(rand_b(&batch[3]), MAX_RAND_B - 5);
        assert_eq!(
            batch[3].encode().as_str(),
            "01234567-89ab-700a-bfff-fffffffffffa"
        );
    }

    /// Leaves small rand_b bases untouched
    #[test]
    fn leaves_small_rand_b_bases_untouched() {
        let rng = ReplayRand::new(&[0, 7]);
        let mut f = Factory::with_rand_and_time_sources(rng, FixedTime(TS));
        let batch = f.create_batch_monotonic(3, 10).unwrap();
        let got: Vec<u64> = batch.iter().map(rand_b).collect();
        assert_eq!(got, [7, 17, 27]);
    }

    /// Never wraps rand_b near the top of the field
    #[test]
    fn never_wraps_rand_b_near_the_top_of_the_field() {
        for base in [0, super::MAX_MONOTONIC_SPAN, super::MAX_MONOTONIC_SPAN + 1, u64::MAX] {
            let rng = ReplayRand::new(&[0, base]);
            let mut f = Factory::with_rand_and_time_sources(rng, FixedTime(TS));
            let batch = f.create_batch_monotonic(4, 1 << 29).unwrap();
            assert_strictly_increasing(&batch);
        }
    }

    /// Rejects zero increments and oversized spans
    #[test]
    fn rejects_zero_increments_and_oversized_spans() {
        let mut f = Factory::with_xoroshiro_seed(1, 1).unwrap();
        assert_eq!(f.create_batch_monotonic(10, 0), Err(Error::ZeroIncrement));
        assert_eq!(
            f.create_batch_monotonic(u32::MAX, u32::MAX),
            Err(Error::CounterSpaceExhausted {
                count: u32::MAX,
                increment: u32::MAX
            })
        );
        assert!(f.create_batch_monotonic(0, 1).unwrap().is_empty());
    }

    /// Draws v4 and v7 UUIDs from the owned generator
    #[test]
    fn draws_v4_and_v7_uuids_from_the_owned_generator() {
        let mut f = Factory::with_rand_and_time_sources(
            Xoroshiro128PlusPlus::from_state(1, 1).unwrap(),
            FixedTime(TS),
        );
        assert_eq!(
            f.create_v4().encode().as_str(),
            "00000000-0004-4001-8002-000000000004"
        );

        let mut f = Factory::with_xoroshiro_seed(1, 1).unwrap();
        assert_eq!(
            f.create_v7_core(TS).encode().as_str(),
            "01234567-89ab-7001-8002-000000000004"
        );

        let (rng, _) = f.into_parts();
        assert_ne!(rng.state(), (1, 1));
        assert!(Factory::with_xoroshiro_seed(0, 0).is_err());
    }

    /// Panics on timestamps wider than 48 bits
    #[test]
    #[should_panic(expected = "48-bit")]
    fn panics_on_timestamps_wider_than_48_bits() {
        Factory::from_time().create_v7_core(1 << 48);
    }

    /// Panics on dedicated-counter batch timestamps wider than 48 bits
    #[test]
    #[should_panic(expected = "48-bit")]
    fn panics_on_dedicated_counter_batch_timestamps_wider_than_48_bits() {
        let mut f = Factory::with_xoroshiro_seed(1, 1).unwrap();
        assert_eq!(f.create_batch_counter_core((1 << 48) - 1, 1).unwrap().len(), 1);
        let _ = f.create_batch_counter_core(1 << 48, 1);
    }

    /// Panics on monotonic batch timestamps wider than 48 bits
    #[test]
    #[should_panic(expected = "48-bit")]
    fn panics_on_monotonic_batch_timestamps_wider_than_48_bits() {
        let mut f = Factory::with_xoroshiro_seed(1, 1).unwrap();
        assert_eq!(f.create_batch_monotonic_core((1 << 48) - 1, 1, 1).unwrap().len(), 1);
        let _ = f.create_batch_monotonic_core(1 << 48, 1, 1);
    }

    /// Seeds a default-constructed generator on first use
    #[test]
    fn seeds_a_default_constructed_generator_on_first_use() {
        let mut f = Factory::<Xoroshiro128PlusPlus>::default();
        assert!(!f.rng_mut().is_seeded());
        let a = f.create_v4();
        assert!(f.rng_mut().is_seeded());
        let b = f.create_v4();
        assert_ne!(a, b);
        assert_ne!(a.encode().as_str(), "00000000-0000-4000-8000-000000000000");

        let mut f = Factory::<Xoroshiro128PlusPlus>::default();
        let batch = f.create_batch_monotonic_core(TS, 3, 1).unwrap();
        assert!(f.rng_mut().is_seeded());
        assert_strictly_increasing(&batch);
        assert_ne!(rand_a(&batch[0]) as u64 | rand_b(&batch[0]), 0);
    }

    /// Generates distinct UUIDs across independent jumped streams
    #[test]
    fn generates_distinct_uuids_across_independent_jumped_streams() {
        use std::collections::HashSet;
        let mut root = Xoroshiro128PlusPlus::from_state(1, 1).unwrap();
        let mut seen = HashSet::new();
        for _ in 0..8 {
            let mut f = Factory::with_rand_and_time_sources(root.jumped(), FixedTime(TS));
            for e in f.create_batch_counter(512).unwrap() {
                assert!(seen.insert(e));
            }
        }
        assert_eq!(seen.len(), 8 * 512);
    }
}
