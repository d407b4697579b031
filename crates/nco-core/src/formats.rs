//! The engine's named fixed-point formats and their operator tables.
//!
//! The oscillator computes a phase increment without a run-time division:
//!
//! ```text
//! increment = frequency * C,   C = TABLE_SIZE / sample_rate
//!
//! Frequency      UQ25.7   Ufixed<32, 25>
//! PhaseConstant  UQ0.14   Ufixed<14, 0>
//!   product      UQ25.21  Ufixed<46, 25>   (exact)
//! Phase          UQ11.21  Ufixed<32, 11>   (cast: integral bits above 11 wrap)
//! ```
//!
//! The top [`WAVETABLE_BITS`] of a [`Phase`] are the table index, so wrapping
//! the accumulator past 2^11 is the same as wrapping the waveform cycle.
//!
//! `+` and `*` follow the exact growth rules from [`crate::fixed`]; they are
//! implemented here for the formats the engine and its tests use, and
//! [`Ufixed::widening_add`] / [`Ufixed::widening_mul`] cover everything else.

use core::ops::{Add, Mul};

use crate::fixed::{Fixed, Ufixed};

/// log2 of the wavetable length.
pub const WAVETABLE_BITS: u32 = 11;

/// Entries per wavetable.
pub const WAVETABLE_SIZE: usize = 1 << WAVETABLE_BITS;

/// Width of the phase accumulator.
pub const ACCUMULATOR_BITS: u32 = 32;

/// Oscillator frequency in Hz (UQ25.7).
pub type Frequency = Ufixed<32, 25>;

/// Sample amplitude (Q1.22); the unit range `[-1, 1]` fits with headroom.
pub type Amplitude = Fixed<24, 1>;

/// `WAVETABLE_SIZE / sample_rate` (UQ0.14).
pub type PhaseConstant = Ufixed<14, 0>;

/// Exact product of a [`Frequency`] and a [`PhaseConstant`].
pub type PhaseProduct = Ufixed<46, 25>;

/// Phase accumulator and increment (UQ11.21). Integral part = table index.
pub type Phase = Ufixed<32, 11>;

const _: () = {
    assert!(Phase::INTEGRAL_BITS == WAVETABLE_BITS);
    assert!(Phase::WORD_BITS == ACCUMULATOR_BITS);
    assert!(Phase::FRACTIONAL_BITS == Frequency::FRACTIONAL_BITS + PhaseConstant::FRACTIONAL_BITS);
    assert!(PhaseProduct::WORD_BITS == Frequency::WORD_BITS + PhaseConstant::WORD_BITS);
    assert!(PhaseProduct::INTEGRAL_BITS == Frequency::INTEGRAL_BITS + PhaseConstant::INTEGRAL_BITS);
    // 20 kHz must be representable.
    assert!(1u64 << Frequency::INTEGRAL_BITS > 20_000);
};

macro_rules! impl_growing_add {
    ($(($wl:literal, $iwl:literal)),* $(,)?) => {$(
        impl Add for Ufixed<$wl, $iwl> {
            type Output = Ufixed<{ $wl + 1 }, { $iwl + 1 }>;

            #[inline]
            fn add(self, rhs: Self) -> Self::Output {
                self.widening_add(rhs)
            }
        }
    )*};
}

macro_rules! impl_growing_mul {
    ($((($lwl:literal, $liwl:literal), ($rwl:literal, $riwl:literal))),* $(,)?) => {$(
        impl Mul<Ufixed<$rwl, $riwl>> for Ufixed<$lwl, $liwl> {
            type Output = Ufixed<{ $lwl + $rwl }, { $liwl + $riwl }>;

            #[inline]
            fn mul(self, rhs: Ufixed<$rwl, $riwl>) -> Self::Output {
                self.widening_mul(rhs)
            }
        }
    )*};
}

impl_growing_add!(
    (32, 11), // Phase
    (32, 25), // Frequency
    (14, 0),  // PhaseConstant
    (24, 3),
    (16, 8),
    (8, 4),
);

impl_growing_mul!(
    ((32, 25), (14, 0)), // Frequency * PhaseConstant
    ((24, 3), (24, 3)),
    ((16, 8), (16, 8)),
    ((14, 0), (14, 0)),
    ((8, 4), (8, 4)),
);
