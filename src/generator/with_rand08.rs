//! Integration with `rand` (v0.8) crate.

use super::RandSource;
use crate::{Factory, StdSystemTime};
use rand_core::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
}

impl<T: RngCore> Factory<Adapter<T>, StdSystemTime> {
    /// Creates a factory with a specified random number generator that implements [`RngCore`]
    /// from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid9562::Factory;
    ///
    /// let mut f = Factory::with_rand08(rand::rngs::OsRng);
    /// println!("{}", f.create_v4());
    /// ```
    pub const fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}
