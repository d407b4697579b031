//! Floating-point helpers used at the edges of the fixed-point pipeline.
//!
//! - [`soft_saturate`] - bounds a two-oscillator mix to `(-1, 1)` with a
//!   smooth knee
//! - [`midi_note_to_frequency`] - equal-tempered pitch for a MIDI note

use libm::{copysign, fabs, pow, tanh};

/// MIDI note number of A4.
pub const A4_NOTE: u8 = 69;

/// Standard concert pitch for A4 in Hz.
pub const A4_FREQUENCY: f64 = 440.0;

/// Input level where [`soft_saturate`] leaves its linear region.
pub const SATURATION_KNEE: f64 = 0.5;

/// Soft saturation with a linear region and a tanh knee.
///
/// Identity for `|x| <= 0.5`. Above the knee the excess is compressed with
/// `tanh`, so the curve is continuous, has slope 1 at the knee and never
/// reaches ±1:
///
/// ```text
/// y = sign(x) * (k + (1 - k) * tanh((|x| - k) / (1 - k)))    k = 0.5
/// ```
///
/// # Example
/// ```rust
/// use nco_core::soft_saturate;
///
/// assert_eq!(soft_saturate(0.25), 0.25);
/// assert!(soft_saturate(2.0) < 1.0);
/// assert_eq!(soft_saturate(-1.5), -soft_saturate(1.5));
/// ```
#[inline]
pub fn soft_saturate(x: f64) -> f64 {
    const K: f64 = SATURATION_KNEE;
    let magnitude = fabs(x);
    if magnitude <= K {
        x
    } else {
        let shaped = K + (1.0 - K) * tanh((magnitude - K) / (1.0 - K));
        copysign(shaped, x)
    }
}

/// Frequency of `note` in Hz, with `tuning` as the pitch of A4.
///
/// `f = tuning * 2^((note - 69) / 12)`
///
/// # Example
/// ```rust
/// use nco_core::midi_note_to_frequency;
///
/// assert_eq!(midi_note_to_frequency(69, 440.0), 440.0);
/// assert!((midi_note_to_frequency(60, 440.0) - 261.626).abs() < 0.001);
/// ```
#[inline]
pub fn midi_note_to_frequency(note: u8, tuning: f64) -> f64 {
    let semitones = f64::from(note) - f64::from(A4_NOTE);
    tuning * pow(2.0, semitones / 12.0)
}
