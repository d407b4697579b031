//! nco Synth - Wavetable synthesis engine for the nco synthesizer
//!
//! This crate turns the fixed-point types of `nco-core` into sound: one-cycle
//! wavetables, phase-accumulator oscillators, ADSR envelopes, two-oscillator
//! voices and a round-robin polyphonic voice assigner.
//!
//! # Core Components
//!
//! ## Wavetables
//!
//! - [`Wavetable`] - 2048 [`Amplitude`](nco_core::Amplitude) samples of one cycle
//! - [`WavetableBank`] - the sine, square, triangle and sawtooth tables
//! - [`Waveform`] - table selector, plus [`Waveform::Noise`]
//! - [`NoiseSource`] - per-instance linear congruential noise
//!
//! ## Oscillators
//!
//! - [`Oscillator`] - 32-bit NCO whose top 11 phase bits index a table
//! - [`phase_constant`] - the `table_size / sample_rate` factor
//!
//! ```rust
//! use nco_core::Frequency;
//! use nco_synth::{Oscillator, WavetableBank};
//!
//! let bank = WavetableBank::new();
//! let mut osc = Oscillator::new(bank.default_table(), 48000)?;
//! osc.set_frequency(Frequency::from_float(440.0)?);
//!
//! let sample = osc.tick();
//! assert_eq!(sample.as_float(), -1.0);
//! # Ok::<(), nco_core::Error>(())
//! ```
//!
//! ## Envelopes
//!
//! - [`Envelope`] - linear ADSR with instant-stage cascading
//! - [`EnvelopeState`] / [`Stage`] - state tracking and parameter selection
//!
//! ## Voices
//!
//! - [`Voice`] - two detuned oscillators, soft-saturated, through one envelope
//! - [`VoiceAssigner`] - `N` voices (default [`DEFAULT_VOICES`]) with strict
//!   round-robin stealing
//!
//! # Lifetimes
//!
//! Tables are shared, never copied: oscillators, voices and the assigner hold
//! `&'a Wavetable` borrows into a [`WavetableBank`] that must outlive them.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! nco-synth = { version = "0.1", default-features = false }
//! ```
//!
//! Enable `tracing` for debug and warning events (voice steals, rejected
//! note frequencies) and `serde` for [`Waveform`] (de)serialization.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod assigner;
pub mod envelope;
pub mod oscillator;
pub mod voice;
pub mod wavetable;

pub use assigner::{DEFAULT_VOICES, VoiceAssigner};
pub use envelope::{Envelope, EnvelopeState, Stage};
pub use oscillator::{Oscillator, Source, phase_constant};
pub use voice::{DEFAULT_DETUNE_HZ, Voice};
pub use wavetable::{NoiseSource, Waveform, Wavetable, WavetableBank};
