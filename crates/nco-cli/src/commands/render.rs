//! Offline render command.
//!
//! Plays a set of notes through a voice assigner for a fixed duration,
//! releasing them part way through, and reports what came out.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use nco_config::Patch;
use nco_synth::{VoiceAssigner, WavetableBank};

use super::common::{load_factory_patch, parse_notes};

#[derive(Args)]
pub struct RenderArgs {
    /// Patch file (TOML)
    #[arg(long, value_name = "FILE", conflicts_with = "preset")]
    patch: Option<PathBuf>,

    /// Factory patch name
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// MIDI notes (comma-separated, e.g., "60,64,67" for C major)
    #[arg(long, default_value = "60,64,67")]
    notes: String,

    /// Total duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f64,

    /// Seconds the notes are held before note-off
    #[arg(long, default_value = "0.5")]
    hold: f64,

    /// Sample rate (overrides the patch)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Seconds between active-voice reports
    #[arg(long, default_value = "0.1")]
    interval: f64,

    /// Print every sample, one per line
    #[arg(long)]
    print_samples: bool,
}

/// What a render produced.
#[derive(Debug, Default, PartialEq)]
pub struct RenderStats {
    /// Samples rendered.
    pub samples: usize,
    /// Largest absolute sample.
    pub peak: f64,
    /// Root mean square of all samples.
    pub rms: f64,
    /// `(sample index, active-voice mask)` at each report point.
    pub activity: Vec<(usize, u32)>,
}

/// Timing of a render, in samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    /// Total samples to render.
    pub total: usize,
    /// Sample at which every note is released.
    pub release_at: usize,
    /// Samples between activity reports (at least 1).
    pub interval: usize,
}

impl Schedule {
    /// Convert durations in seconds to sample counts.
    pub fn new(
        sample_rate: u32,
        duration: f64,
        hold: f64,
        interval: f64,
    ) -> anyhow::Result<Self> {
        for (name, value) in [("duration", duration), ("hold", hold), ("interval", interval)] {
            if !(value.is_finite() && value >= 0.0) {
                anyhow::bail!("--{name} must be a non-negative number of seconds, got {value}");
            }
        }
        let to_samples = |secs: f64| (secs * f64::from(sample_rate)).round() as usize;
        let total = to_samples(duration);
        Ok(Self {
            total,
            release_at: to_samples(hold).min(total),
            interval: to_samples(interval).max(1),
        })
    }
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let mut patch = match (&args.patch, &args.preset) {
        (Some(path), _) => Patch::load(path)?,
        (None, Some(name)) => load_factory_patch(name)?,
        (None, None) => Patch::new("Init"),
    };
    if let Some(sample_rate) = args.sample_rate {
        patch.sample_rate = sample_rate;
    }
    let notes = parse_notes(&args.notes)?;
    let schedule = Schedule::new(patch.sample_rate, args.duration, args.hold, args.interval)?;

    let bank = WavetableBank::new();
    let mut synth: VoiceAssigner = patch.build(&bank)?;
    tracing::info!(patch = %patch.name, sample_rate = patch.sample_rate, ?notes, "rendering");

    println!(
        "Rendering '{}' ({}) at {} Hz",
        patch.name, patch.waveform, patch.sample_rate
    );
    println!("  Notes: {:?}", notes);
    println!("  Held {:.2}s of {:.2}s", args.hold.min(args.duration), args.duration);
    println!();

    let stats = if args.print_samples {
        let stdout = io::stdout();
        let mut out = io::BufWriter::new(stdout.lock());
        let mut result = Ok(());
        let stats = render(&mut synth, &notes, schedule, |i, sample| {
            if result.is_ok() {
                result = writeln!(out, "{i}\t{sample:.9}");
            }
        });
        result?;
        out.flush()?;
        println!();
        stats
    } else {
        render(&mut synth, &notes, schedule, |_, _| {})
    };

    println!("Active voices:");
    let rate = f64::from(patch.sample_rate);
    for &(index, mask) in &stats.activity {
        println!(
            "  {:>8.3}s  {:0width$b}",
            index as f64 / rate,
            mask,
            width = synth.voice_count()
        );
    }
    println!();
    println!("Samples: {}", stats.samples);
    println!("Peak:    {:.6}", stats.peak);
    println!("RMS:     {:.6}", stats.rms);

    Ok(())
}

/// Play `notes` on `synth` according to `schedule`, handing every sample to
/// `sink` and collecting statistics.
pub fn render<const N: usize>(
    synth: &mut VoiceAssigner<'_, N>,
    notes: &[u8],
    schedule: Schedule,
    mut sink: impl FnMut(usize, f64),
) -> RenderStats {
    for &note in notes {
        synth.note_on(note);
    }

    let mut stats = RenderStats::default();
    let mut sum_sq = 0.0;
    for i in 0..schedule.total {
        if i == schedule.release_at {
            for &note in notes {
                synth.note_off(note);
            }
        }
        if i % schedule.interval == 0 {
            stats.activity.push((i, synth.active_voices()));
        }
        let sample = synth.tick();
        sink(i, sample);
        stats.peak = stats.peak.max(sample.abs());
        sum_sq += sample * sample;
    }
    stats.activity.push((schedule.total, synth.active_voices()));

    stats.samples = schedule.total;
    if schedule.total > 0 {
        stats.rms = (sum_sq / schedule.total as f64).sqrt();
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use nco_config::EnvelopeConfig;

    const SR: u32 = 48000;

    #[test]
    fn schedule_converts_seconds() {
        let s = Schedule::new(SR, 1.0, 0.5, 0.1).unwrap();
        assert_eq!(
            s,
            Schedule {
                total: 48000,
                release_at: 24000,
                interval: 4800
            }
        );
        // Hold past the end never releases; a zero interval still advances.
        let s = Schedule::new(SR, 0.1, 5.0, 0.0).unwrap();
        assert_eq!(s.release_at, s.total);
        assert_eq!(s.interval, 1);
    }

    #[test]
    fn schedule_rejects_bad_durations() {
        assert!(Schedule::new(SR, -1.0, 0.5, 0.1).is_err());
        assert!(Schedule::new(SR, 1.0, f64::NAN, 0.1).is_err());
        assert!(Schedule::new(SR, 1.0, 0.5, f64::INFINITY).is_err());
    }

    #[test]
    fn render_reports_activity_and_level() {
        let bank = WavetableBank::new();
        let patch = Patch::new("Test").with_envelope(EnvelopeConfig::new(0.0, 0.0, 1.0, 0.01));
        let mut synth: VoiceAssigner = patch.build(&bank).unwrap();
        let schedule = Schedule::new(SR, 0.2, 0.1, 0.05).unwrap();

        let mut seen = 0;
        let stats = render(&mut synth, &[60, 64, 67], schedule, |_, _| seen += 1);

        assert_eq!(stats.samples, 9600);
        assert_eq!(seen, 9600);
        assert!(stats.peak > 0.0 && stats.peak <= 1.0);
        assert!(stats.rms > 0.0 && stats.rms <= stats.peak);
        assert_eq!(stats.activity.first(), Some(&(0, 0b111)));
        // Release is 10 ms, so everything is idle by the end.
        assert_eq!(stats.activity.last(), Some(&(9600, 0)));
    }

    #[test]
    fn render_of_zero_duration_is_empty() {
        let bank = WavetableBank::new();
        let mut synth: VoiceAssigner = VoiceAssigner::new(&bank, SR).unwrap();
        let schedule = Schedule::new(SR, 0.0, 0.0, 0.1).unwrap();
        let stats = render(&mut synth, &[60], schedule, |_, _| {});
        assert_eq!(stats.samples, 0);
        assert_eq!(stats.rms, 0.0);
    }
}
