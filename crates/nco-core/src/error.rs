//! Error types shared by the fixed-point and wavetable layers.
//!
//! Both kinds of failure are programming-contract violations (a format that
//! cannot hold a value, a table index that was not masked) rather than
//! transient faults, so nothing retries. Fallible constructors return them
//! and callers propagate with `?`; the per-sample paths never produce them.

use thiserror::Error;

/// Errors reported by the engine's numeric building blocks.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// A value cannot be represented in the requested fixed-point format.
    #[error("invalid value: {0}")]
    InvalidValue(#[from] ValueError),

    /// A wavetable lookup used an index past the end of the table.
    #[error("index {index} out of range for table of {len} entries")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of entries in the table.
        len: usize,
    },
}

/// Why a value was rejected by a fixed-point constructor.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValueError {
    /// NaN or infinity.
    #[error("value is not finite")]
    NotFinite,

    /// Negative input for an unsigned format.
    #[error("negative value {value} for an unsigned format")]
    Negative {
        /// The rejected input.
        value: f64,
    },

    /// Magnitude does not fit the integral bits of the format.
    #[error("{value} does not fit in {integral_bits} integral bits")]
    OutOfRange {
        /// The rejected input.
        value: f64,
        /// Integral bits available in the destination format.
        integral_bits: u32,
    },

    /// Nonzero input that rounds to zero where zero is not usable.
    #[error("{value} rounds to zero")]
    Underflow {
        /// The rejected input.
        value: f64,
    },

    /// An integral or fractional bit field is wider than its slot.
    #[error("{field} field {value:#x} does not fit in {bits} bits")]
    FieldOverflow {
        /// Which field overflowed (`"integral"` or `"fractional"`).
        field: &'static str,
        /// The rejected field value.
        value: u64,
        /// Width of the field in bits.
        bits: u32,
    },
}
