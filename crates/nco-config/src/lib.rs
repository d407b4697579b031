//! Patch management for the nco synthesizer.
//!
//! A [`Patch`] captures everything that shapes a sound: waveform, tuning,
//! detune and envelope. Patches are stored as TOML, validated against what
//! the engine accepts, and either applied to an existing
//! [`VoiceAssigner`](nco_synth::VoiceAssigner) or used to build a new one.
//!
//! # Features
//!
//! - **Patch Files**: Load and save patches as TOML
//! - **Validation**: Reject unusable sample rates, tunings and envelope values
//! - **Factory Patches**: Built-in patches covering every waveform
//!
//! # Example
//!
//! ```rust
//! use nco_config::{EnvelopeConfig, Patch};
//! use nco_synth::{VoiceAssigner, Waveform, WavetableBank};
//!
//! let patch = Patch::new("Bells")
//!     .with_waveform(Waveform::Sine)
//!     .with_detune(7.0)
//!     .with_envelope(EnvelopeConfig::new(0.0, 0.6, 0.0, 0.6));
//!
//! let bank = WavetableBank::new();
//! let mut synth: VoiceAssigner = patch.build(&bank)?;
//! synth.note_on(72);
//! let sample = synth.tick();
//! assert!(sample.abs() <= 1.0);
//! # Ok::<(), nco_config::ConfigError>(())
//! ```

mod error;
mod patch;

/// Factory patches bundled with the library.
pub mod factory_patches;

pub use error::ConfigError;
pub use factory_patches::{
    FACTORY_PATCH_NAMES, factory_patches, get_factory_patch, is_factory_patch,
};
pub use patch::{DEFAULT_SAMPLE_RATE, EnvelopeConfig, Patch};
