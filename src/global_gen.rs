//! Default generator and entry point functions.
//!
//! The default generator is a single [`Factory`](crate::Factory) backed by a
//! [`Xoroshiro128PlusPlus`] behind a process-wide mutex. Every entry point holds the lock for the
//! whole call, so only one caller draws from the shared stream at a time. Threads that generate
//! heavily should own a `Factory` instead of contending on the lock.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::{Error, Uuid, Xoroshiro128PlusPlus};
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .unwrap_or_else(sync::PoisonError::into_inner)
}

/// Generates a UUIDv4 object from the default generator.
///
/// On Unix, the default generator is reseeded when the process ID changes (i.e., upon process
/// forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid9562::uuid4();
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
/// ```
pub fn uuid4() -> Uuid {
    lock_global_gen().get_mut().create_v4()
}

/// Generates a UUIDv7 object from the default generator.
///
/// Unlike a batch, two UUIDs created within the same millisecond by separate calls are not
/// ordered relative to each other.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid9562::uuid7();
/// println!("{}", uuid); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
///
/// let uuid_string: String = uuid9562::uuid7().to_string();
/// ```
pub fn uuid7() -> Uuid {
    lock_global_gen().get_mut().create_v7()
}

/// Generates a dedicated-counter batch of UUIDv7s from the default generator.
///
/// See [`Factory::create_batch_counter`](crate::Factory::create_batch_counter).
///
/// # Examples
///
/// ```rust
/// let batch = uuid9562::batch_counter(4096)?;
/// assert!(batch.windows(2).all(|w| w[0] < w[1]));
/// # Ok::<(), uuid9562::Error>(())
/// ```
pub fn batch_counter(count: u16) -> Result<Vec<Uuid>, Error> {
    lock_global_gen().get_mut().create_batch_counter(count)
}

/// Generates a monotonic-random batch of UUIDv7s from the default generator.
///
/// See [`Factory::create_batch_monotonic`](crate::Factory::create_batch_monotonic).
pub fn batch_monotonic(count: u32, increment: u32) -> Result<Vec<Uuid>, Error> {
    lock_global_gen()
        .get_mut()
        .create_batch_monotonic(count, increment)
}

/// Replaces the state of the default generator, e.g., for reproducible runs.
///
/// Returns [`Error::ZeroSeed`] if both words are zero, leaving the generator untouched.
///
/// # Examples
///
/// ```rust
/// uuid9562::seed_default_generator(0x9e37_79b9, 0x7f4a_7c15)?;
/// assert!(uuid9562::seed_default_generator(0, 0).is_err());
/// # Ok::<(), uuid9562::Error>(())
/// ```
pub fn seed_default_generator(s0: u64, s1: u64) -> Result<(), Error> {
    lock_global_gen().get_mut().rng_mut().seed(s0, s1)?;
    #[cfg(feature = "tracing")]
    tracing::debug!("default generator seeded explicitly");
    Ok(())
}

/// Calls `f` with exclusive access to the random number generator of the default generator.
///
/// The lock is held until `f` returns, so `f` must not call back into the entry points of this
/// module.
///
/// # Examples
///
/// ```rust
/// use uuid9562::{spec::V4Spec, with_default_generator, Uuid};
///
/// let uuid = with_default_generator(|rng| Uuid::from_spec(&V4Spec, rng));
/// assert_eq!(uuid.version(), Some(4));
/// ```
pub fn with_default_generator<F, O>(f: F) -> O
where
    F: FnOnce(&mut Xoroshiro128PlusPlus) -> O,
{
    f(lock_global_gen().get_mut().rng_mut())
}

mod inner {
    use crate::{Factory, Xoroshiro128PlusPlus};

    /// A thin wrapper to reseed the generator when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        factory: Factory<Xoroshiro128PlusPlus>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            #[cfg(feature = "tracing")]
            tracing::debug!("default generator seeded from time");
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                factory: Factory::from_time(),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`Factory`] instance, reseeding the
        /// generator on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut Factory<Xoroshiro128PlusPlus> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                *self = Default::default();
            }
            &mut self.factory
        }
    }
}
