//! Patch file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use nco_core::A4_FREQUENCY;
use nco_synth::{
    DEFAULT_DETUNE_HZ, Envelope, Stage, VoiceAssigner, Waveform, WavetableBank, phase_constant,
};

use crate::error::ConfigError;

/// Default sample rate hint.
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// Envelope section of a patch. Times are in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Attack duration.
    pub attack: f64,
    /// Decay duration.
    pub decay: f64,
    /// Sustain level in `[0, 1]`.
    pub sustain: f64,
    /// Release duration.
    pub release: f64,
}

impl EnvelopeConfig {
    /// Envelope with explicit settings.
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }

    /// `(stage, value)` pairs in the order they are applied.
    pub fn stages(&self) -> [(Stage, f64); 4] {
        [
            (Stage::Attack, self.attack),
            (Stage::Decay, self.decay),
            (Stage::Sustain, self.sustain),
            (Stage::Release, self.release),
        ]
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self::new(
            Envelope::DEFAULT_ATTACK,
            Envelope::DEFAULT_DECAY,
            Envelope::DEFAULT_SUSTAIN,
            Envelope::DEFAULT_RELEASE,
        )
    }
}

/// A complete sound: waveform, pitch settings and envelope.
///
/// Patches are stored as TOML. Every field except `name` is optional and
/// falls back to the engine default.
///
/// # TOML Format
///
/// ```toml
/// name = "Soft Pad"
/// description = "Slow triangle pad"
/// sample_rate = 48000
/// waveform = "triangle"
/// tuning = 440.0
/// detune = 2.5
///
/// [envelope]
/// attack = 0.8
/// decay = 0.4
/// sustain = 0.7
/// release = 1.5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patch {
    /// Name of the patch.
    pub name: String,

    /// Optional description of the patch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate hint (defaults to 48000). Used by [`build`](Self::build);
    /// [`apply`](Self::apply) keeps the assigner's own rate.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Waveform for both oscillators of every voice.
    #[serde(default)]
    pub waveform: Waveform,

    /// Pitch of A4 in Hz.
    #[serde(default = "default_tuning")]
    pub tuning: f64,

    /// Offset of each voice's second oscillator in Hz.
    #[serde(default = "default_detune")]
    pub detune: f64,

    /// Envelope settings.
    #[serde(default)]
    pub envelope: EnvelopeConfig,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_tuning() -> f64 {
    A4_FREQUENCY
}

fn default_detune() -> f64 {
    DEFAULT_DETUNE_HZ
}

impl Patch {
    /// Create a patch with engine defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            waveform: Waveform::default(),
            tuning: A4_FREQUENCY,
            detune: DEFAULT_DETUNE_HZ,
            envelope: EnvelopeConfig::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the waveform.
    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Set the A4 reference pitch.
    pub fn with_tuning(mut self, tuning: f64) -> Self {
        self.tuning = tuning;
        self
    }

    /// Set the second-oscillator detune.
    pub fn with_detune(mut self, detune: f64) -> Self {
        self.detune = detune;
        self
    }

    /// Set the envelope.
    pub fn with_envelope(mut self, envelope: EnvelopeConfig) -> Self {
        self.envelope = envelope;
        self
    }

    /// Load a patch from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let patch = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), name = %patch.name, "loaded patch");
        Ok(patch)
    }

    /// Load a patch from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the patch to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), name = %self.name, "saved patch");
        Ok(())
    }

    /// Convert the patch to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field against what the engine accepts.
    ///
    /// The engine itself ignores bad envelope values and out-of-range
    /// frequencies at run time; a patch is held to a stricter standard so a
    /// typo in a file is reported instead of silently dropped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = phase_constant(self.sample_rate) {
            return Err(ConfigError::invalid(
                &self.name,
                "sample_rate",
                format!("{} Hz is unusable: {e}", self.sample_rate),
            ));
        }
        if !(self.tuning.is_finite() && self.tuning > 0.0) {
            return Err(ConfigError::invalid(
                &self.name,
                "tuning",
                format!("must be positive and finite, got {}", self.tuning),
            ));
        }
        if !self.detune.is_finite() {
            return Err(ConfigError::invalid(
                &self.name,
                "detune",
                format!("must be finite, got {}", self.detune),
            ));
        }
        let env = &self.envelope;
        for (param, seconds) in [
            ("envelope.attack", env.attack),
            ("envelope.decay", env.decay),
            ("envelope.release", env.release),
        ] {
            if !(seconds.is_finite() && seconds >= 0.0) {
                return Err(ConfigError::invalid(
                    &self.name,
                    param,
                    format!("must be a non-negative duration, got {seconds}"),
                ));
            }
        }
        if !(0.0..=1.0).contains(&env.sustain) {
            return Err(ConfigError::invalid(
                &self.name,
                "envelope.sustain",
                format!("must be in [0, 1], got {}", env.sustain),
            ));
        }
        Ok(())
    }

    /// Validate, then push waveform, pitch and envelope settings to every
    /// voice of `synth`. Notes already sounding keep their pitch until
    /// their next note-on.
    pub fn apply<const N: usize>(
        &self,
        synth: &mut VoiceAssigner<'_, N>,
    ) -> Result<(), ConfigError> {
        self.validate()?;
        synth.set_wavetable(self.waveform);
        synth.set_tuning(self.tuning);
        synth.set_detune(self.detune);
        for (stage, value) in self.envelope.stages() {
            synth.set_envelope(stage, value);
        }
        tracing::debug!(name = %self.name, waveform = %self.waveform, "applied patch");
        Ok(())
    }

    /// Build an `N`-voice assigner at the patch's sample rate.
    pub fn build<'a, const N: usize>(
        &self,
        bank: &'a WavetableBank,
    ) -> Result<VoiceAssigner<'a, N>, ConfigError> {
        self.validate()?;
        let mut synth = VoiceAssigner::new(bank, self.sample_rate)?;
        self.apply(&mut synth)?;
        Ok(synth)
    }
}

impl Default for Patch {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
