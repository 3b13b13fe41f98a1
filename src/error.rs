//! Error types.

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that this crate can emit.
///
/// Generation itself is pure computation over fixed-size buffers, so every variant describes a
/// caller-supplied argument that would otherwise produce degenerate output.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An explicit seed left the random source in the all-zero state, which would make it emit
    /// zeros forever.
    #[error("random source cannot be seeded with an all-zero state")]
    ZeroSeed,

    /// A dedicated-counter batch was requested with more items than the 12-bit `rand_a` counter
    /// can number.
    #[error("dedicated-counter batch of {requested} exceeds the limit of {max} per timestamp")]
    CounterBatchTooLarge {
        /// Number of UUIDs requested.
        requested: u16,
        /// Largest batch the counter can accommodate.
        max: u16,
    },

    /// A monotonic-random batch was requested with a zero increment, which would repeat the same
    /// UUID `count` times.
    #[error("monotonic batch increment must be positive")]
    ZeroIncrement,

    /// `count * increment` of a monotonic-random batch does not fit the 62-bit `rand_b` counter.
    #[error("monotonic batch of {count} with increment {increment} overflows the rand_b counter")]
    CounterSpaceExhausted {
        /// Number of UUIDs requested.
        count: u32,
        /// Requested step between consecutive UUIDs.
        increment: u32,
    },

    /// A presentation format specifier contained characters outside `[#][u|n]`.
    #[error("invalid format specifier for uuid: {0:?}")]
    InvalidFormatSpec(String),
}
