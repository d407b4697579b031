//! Fixed-point numbers with type-level bit widths.
//!
//! [`Ufixed<WL, IWL>`](Ufixed) is an unsigned number of `WL` bits with `IWL`
//! integral bits and `WL - IWL` fractional bits. [`Fixed<WL, IWL>`](Fixed)
//! is the two's-complement counterpart; one bit goes to the sign, leaving
//! `WL - IWL - 1` fractional bits.
//!
//! # Bit growth
//!
//! Unsigned arithmetic grows the result format so that it is exact:
//!
//! | Operation | Result |
//! |-----------|--------|
//! | `Ufixed<WL, IWL> + Ufixed<WL, IWL>` | `Ufixed<WL + 1, IWL + 1>` |
//! | `Ufixed<WL1, IWL1> * Ufixed<WL2, IWL2>` | `Ufixed<WL1 + WL2, IWL1 + IWL2>` |
//!
//! Stable Rust cannot name `WL + 1` for a generic `WL`, so the rules are
//! available two ways: [`Ufixed::widening_add`] / [`Ufixed::widening_mul`]
//! work for every format and check the requested output format at compile
//! time, and the `+` / `*` operators are implemented for the named formats in
//! [`crate::formats`].
//!
//! # Casting
//!
//! [`Ufixed::cast`] moves the binary point by shifting and masks to the
//! destination width. Bits that do not fit are dropped without an error:
//! casting is a wrap/truncate operation, never a saturating one.
//!
//! Raw values live in 64-bit integers, so `WL <= 64` is required for every
//! format (checked at compile time).

mod signed;
mod unsigned;

pub use signed::Fixed;
pub use unsigned::Ufixed;

/// All-ones mask of the low `bits` bits.
///
/// `mask(0) == 0` and `mask(64) == u64::MAX`; no shift overflows.
///
/// # Example
///
/// ```rust
/// use nco_core::mask;
///
/// assert_eq!(mask(0), 0);
/// assert_eq!(mask(9), 0x1ff);
/// assert_eq!(mask(64), u64::MAX);
/// ```
#[inline]
pub const fn mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// `2^n` as an `f64`, exact for every `n` a 64-bit format needs.
pub(crate) const fn pow2(n: u32) -> f64 {
    let mut value = 1.0;
    let mut i = 0;
    while i < n {
        value *= 2.0;
        i += 1;
    }
    value
}

/// Left shift that yields zero instead of overflowing.
#[inline]
pub(crate) const fn shl_or_zero(bits: u64, shift: u32) -> u64 {
    if shift >= u64::BITS { 0 } else { bits << shift }
}

/// Logical right shift that yields zero instead of overflowing.
#[inline]
pub(crate) const fn shr_or_zero(bits: u64, shift: u32) -> u64 {
    if shift >= u64::BITS { 0 } else { bits >> shift }
}
