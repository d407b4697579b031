//! Shared CLI helpers used across multiple commands.

use clap::ValueEnum;
use nco_config::{FACTORY_PATCH_NAMES, Patch, get_factory_patch};
use nco_synth::Waveform;

/// Waveform types for CLI
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliWaveform {
    Sine,
    Square,
    #[default]
    Triangle,
    Sawtooth,
    Noise,
}

impl From<CliWaveform> for Waveform {
    fn from(w: CliWaveform) -> Self {
        match w {
            CliWaveform::Sine => Waveform::Sine,
            CliWaveform::Square => Waveform::Square,
            CliWaveform::Triangle => Waveform::Triangle,
            CliWaveform::Sawtooth => Waveform::Sawtooth,
            CliWaveform::Noise => Waveform::Noise,
        }
    }
}

/// Load a factory patch by name.
pub fn load_factory_patch(name: &str) -> anyhow::Result<Patch> {
    get_factory_patch(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Patch '{}' not found. Available: {}",
            name,
            FACTORY_PATCH_NAMES.join(", ")
        )
    })
}

/// Parse a comma-separated list of MIDI notes, e.g. `"60,64,67"`.
pub fn parse_notes(s: &str) -> anyhow::Result<Vec<u8>> {
    let notes = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<u8>() {
            Ok(note) if note <= 127 => Ok(note),
            _ => Err(anyhow::anyhow!("invalid MIDI note '{part}' (expected 0-127)")),
        })
        .collect::<anyhow::Result<Vec<u8>>>()?;

    if notes.is_empty() {
        anyhow::bail!("No MIDI notes provided. Use format: --notes \"60,64,67\"");
    }
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_notes_accepts_lists() {
        assert_eq!(parse_notes("60,64,67").unwrap(), vec![60, 64, 67]);
        assert_eq!(parse_notes(" 0 , 127 ,").unwrap(), vec![0, 127]);
    }

    #[test]
    fn parse_notes_rejects_bad_input() {
        assert!(parse_notes("").is_err());
        assert!(parse_notes("60,x").is_err());
        assert!(parse_notes("128").is_err());
        assert!(parse_notes("-1").is_err());
    }

    #[test]
    fn cli_waveform_maps_to_engine_waveform() {
        let all = CliWaveform::value_variants();
        let mapped: Vec<Waveform> = all.iter().map(|&w| w.into()).collect();
        assert_eq!(mapped, Waveform::ALL);
    }

    #[test]
    fn factory_patch_lookup() {
        assert_eq!(load_factory_patch("organ").unwrap().name, "Organ");
        let err = load_factory_patch("kazoo").unwrap_err().to_string();
        assert!(err.contains("kazoo") && err.contains("soft_pad"), "got: {err}");
    }
}
