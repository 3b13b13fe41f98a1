//! Random and time source abstractions consumed by version specs and the factory.

pub mod with_rand08;
pub use with_rand08::Adapter;

/// A trait that defines the minimum random number generator interface for the version specs and
/// the [`Factory`](crate::Factory).
///
/// Implemented by [`Xoroshiro128PlusPlus`](crate::Xoroshiro128PlusPlus), by [`Adapter`] for any
/// `rand` (v0.8) random number generator, and by mutable references to implementors.
pub trait RandSource {
    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;
}

impl<T: RandSource + ?Sized> RandSource for &mut T {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

/// A trait that defines the minimum system clock interface for the version specs and the
/// [`Factory`](crate::Factory).
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &mut T {
    fn unix_ts_ms(&mut self) -> u64 {
        (**self).unix_ts_ms()
    }
}
