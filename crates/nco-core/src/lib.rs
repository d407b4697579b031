//! nco Core - fixed-point arithmetic for the nco synthesizer
//!
//! This crate provides the numeric foundation of the engine: fixed-point types
//! whose widths live in the type system, the named formats the oscillator and
//! envelope are built from, and the error taxonomy shared by every layer.
//!
//! # Fixed Point
//!
//! - [`Ufixed`] - unsigned `Ufixed<WL, IWL>` with exact bit-growth `+` and `*`
//! - [`Fixed`] - signed two's-complement `Fixed<WL, IWL>`
//! - [`mask`] - all-ones bit mask, safe for 0 and 64 bits
//!
//! Bit growth is exact and checked at compile time:
//!
//! | Operation | Result format |
//! |-----------|---------------|
//! | `Ufixed<WL, IWL> + Ufixed<WL, IWL>` | `Ufixed<WL + 1, IWL + 1>` |
//! | `Ufixed<WL1, IWL1> * Ufixed<WL2, IWL2>` | `Ufixed<WL1 + WL2, IWL1 + IWL2>` |
//!
//! `cast` moves between formats by shifting and masking; it wraps and
//! truncates rather than saturating.
//!
//! # Engine Formats
//!
//! | Alias | Format | Role |
//! |-------|--------|------|
//! | [`Frequency`] | UQ25.7 | Oscillator frequency in Hz |
//! | [`Amplitude`] | Q1.22 | Wavetable and voice samples |
//! | [`PhaseConstant`] | UQ0.14 | `table_size / sample_rate` |
//! | [`Phase`] | UQ11.21 | Phase accumulator; integral part is the table index |
//!
//! # Utilities
//!
//! - [`lerp`] / [`bisect_lerp`] - fixed-point interpolation
//! - [`soft_saturate`] - linear-with-knee limiter for oscillator mixes
//! - [`midi_note_to_frequency`] - equal-tempered pitch
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! nco-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use nco_core::{Frequency, Phase, PhaseConstant, PhaseProduct};
//!
//! // C = 2048 / 16384 = 0.125
//! let c = PhaseConstant::from_float(2048.0 / 16384.0)?;
//! let f = Frequency::from_float(2048.0)?;
//!
//! let product: PhaseProduct = f * c;
//! let increment: Phase = product.cast();
//! assert_eq!(increment.integral_part(), 256);
//! # Ok::<(), nco_core::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod fixed;
pub mod formats;
pub mod lerp;
pub mod math;

pub use error::{Error, ValueError};
pub use fixed::{Fixed, Ufixed, mask};
pub use formats::{
    ACCUMULATOR_BITS, Amplitude, Frequency, Phase, PhaseConstant, PhaseProduct, WAVETABLE_BITS,
    WAVETABLE_SIZE,
};
pub use lerp::{DEFAULT_BISECT_DEPTH, bisect_lerp, lerp};
pub use math::{A4_FREQUENCY, A4_NOTE, SATURATION_KNEE, midi_note_to_frequency, soft_saturate};
