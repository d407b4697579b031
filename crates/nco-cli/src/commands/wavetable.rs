//! Wavetable dump command.

use std::io::{self, Write};

use clap::{Args, ValueEnum};
use nco_core::{Amplitude, mask};
use nco_synth::{Waveform, Wavetable};

use super::common::CliWaveform;

/// Output format for table entries
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EntryFormat {
    /// Raw two's-complement bit pattern
    Hex,
    /// Decimal value
    #[default]
    Float,
}

#[derive(Args)]
pub struct WavetableArgs {
    /// Waveform to tabulate
    #[arg(value_enum)]
    waveform: CliWaveform,

    /// Entry format
    #[arg(long, value_enum, default_value = "float")]
    format: EntryFormat,
}

pub fn run(args: WavetableArgs) -> anyhow::Result<()> {
    let waveform: Waveform = args.waveform.into();
    let Some(table) = Wavetable::for_waveform(waveform) else {
        anyhow::bail!("'{waveform}' is generated per sample and has no wavetable");
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for &entry in &table {
        writeln!(out, "{}", format_entry(entry, args.format))?;
    }
    out.flush()?;
    Ok(())
}

/// One table entry as printed.
fn format_entry(entry: Amplitude, format: EntryFormat) -> String {
    match format {
        EntryFormat::Hex => {
            let width = Amplitude::WORD_BITS.div_ceil(4) as usize;
            let raw = entry.to_bits() as u64 & mask(Amplitude::WORD_BITS);
            format!("{raw:0width$x}")
        }
        EntryFormat::Float => format!("{:.9}", entry.as_float()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amp(v: f64) -> Amplitude {
        Amplitude::from_float(v).unwrap()
    }

    #[test]
    fn hex_is_24_bit_twos_complement() {
        assert_eq!(format_entry(amp(1.0), EntryFormat::Hex), "400000");
        assert_eq!(format_entry(amp(-1.0), EntryFormat::Hex), "c00000");
        assert_eq!(format_entry(amp(0.0), EntryFormat::Hex), "000000");
    }

    #[test]
    fn float_is_fixed_precision() {
        assert_eq!(format_entry(amp(-0.5), EntryFormat::Float), "-0.500000000");
        assert_eq!(format_entry(amp(0.25), EntryFormat::Float), "0.250000000");
    }
}
