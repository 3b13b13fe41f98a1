//! A fast generator of RFC 9562 UUIDs: version 4 (random) and version 7 (Unix time-ordered)
//!
//! ```rust
//! use uuid9562::{uuid4, uuid7};
//!
//! let uuid = uuid7();
//! println!("{}", uuid); // e.g. "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let uuid = uuid4();
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! ```
//!
//! See [RFC 9562](https://www.rfc-editor.org/rfc/rfc9562).
//!
//! # Field and bit layout
//!
//! UUIDv7 identifiers produced by this crate have the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        rand_a         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field holds the Unix timestamp in milliseconds, big-endian.
//! - The 4-bit `ver` field is set at `0111`.
//! - The 12-bit `rand_a` field is random for single UUIDs and serves as a counter in batches.
//! - The 2-bit `var` field is set at `10`.
//! - The 62-bit `rand_b` field is random, or a randomly initialized counter in monotonic batches.
//!
//! UUIDv4 identifiers fill everything except `ver` (`0100`) and `var` (`10`) with random bits.
//!
//! # Random source
//!
//! Randomness comes from [`Xoroshiro128PlusPlus`], a small and fast generator that is **not**
//! cryptographically secure. Do not use the UUIDs from this crate as secrets. Any `rand` (v0.8)
//! generator can be plugged in through [`Factory::with_rand08`] when stronger randomness is
//! needed.
//!
//! # Batches
//!
//! A [`Factory`] creates batches of UUIDv7s sharing one timestamp, strictly increasing within the
//! batch:
//!
//! ```rust
//! use uuid9562::Factory;
//!
//! let mut f = Factory::with_xoroshiro_seed(0x0123_4567, 0x89ab_cdef)?;
//! let small = f.create_batch_counter(4096)?;
//! let large = f.create_batch_monotonic(100_000, 1)?;
//! assert!(small.windows(2).all(|w| w[0] < w[1]));
//! assert!(large.windows(2).all(|w| w[0] < w[1]));
//! # Ok::<(), uuid9562::Error>(())
//! ```
//!
//! # Crate features
//!
//! Default features:
//!
//! - `global_gen`: enables the process-wide default generator behind [`uuid4()`], [`uuid7()`],
//!   [`batch_counter()`], and [`batch_monotonic()`].
//!
//! Optional features:
//!
//! - `serde`: enables serialization/deserialization of [`Uuid`] via serde.
//! - `uuid`: enables conversion from/to the `uuid::Uuid` type.
//! - `tracing`: emits `tracing` spans for batch creation and events on generator seeding.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::{Error, Result};

mod id;
pub use id::{ParseError, Uuid, Variant};

pub mod format;
pub use format::{FormatSpec, Formatted};

mod xoroshiro;
pub use xoroshiro::Xoroshiro128PlusPlus;

pub mod generator;
pub use generator::{RandSource, StdSystemTime, TimeSource};

pub mod spec;
pub use spec::{V4Spec, V7Spec, VersionSpec};

mod factory;
pub use factory::{Factory, MAX_COUNTER_BATCH, MAX_MONOTONIC_SPAN};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{
    batch_counter, batch_monotonic, seed_default_generator, uuid4, uuid7, with_default_generator,
};
