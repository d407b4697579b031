//! Criterion benchmarks for nco-synth components
//!
//! Run with: cargo bench -p nco-synth
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use nco_core::Frequency;
use nco_synth::{Envelope, Oscillator, Stage, Voice, VoiceAssigner, Waveform, WavetableBank};

const SAMPLE_RATE: u32 = 48000;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

// ============================================================================
// Wavetable benchmarks
// ============================================================================

fn bench_wavetable_bank(c: &mut Criterion) {
    c.bench_function("WavetableBank_new", |b| {
        b.iter(|| black_box(WavetableBank::new()))
    });
}

// ============================================================================
// Oscillator benchmarks
// ============================================================================

fn bench_oscillator_waveforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Oscillator");
    let bank = WavetableBank::new();
    let frequency = Frequency::from_float(440.0).unwrap();

    for waveform in Waveform::ALL {
        for &block_size in BLOCK_SIZES {
            let mut osc = Oscillator::new(bank.default_table(), SAMPLE_RATE).unwrap();
            match bank.get(waveform) {
                Some(table) => osc.set_wavetable(table),
                None => osc.set_noise(nco_synth::NoiseSource::new()),
            }
            osc.set_frequency(frequency);

            group.bench_with_input(
                BenchmarkId::new(waveform.name(), block_size),
                &block_size,
                |b, &size| {
                    b.iter(|| {
                        let mut sum = 0.0f64;
                        for _ in 0..size {
                            sum += osc.tick().as_float();
                        }
                        black_box(sum)
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_oscillator_retune(c: &mut Criterion) {
    let bank = WavetableBank::new();
    let mut osc = Oscillator::new(bank.default_table(), SAMPLE_RATE).unwrap();
    let frequencies: Vec<Frequency> = (0..128)
        .map(|note| nco_core::midi_note_to_frequency(note, 440.0))
        .map(|hz| Frequency::from_float(hz).unwrap())
        .collect();

    c.bench_function("Oscillator_set_frequency_128", |b| {
        b.iter(|| {
            for &f in &frequencies {
                osc.set_frequency(black_box(f));
            }
            black_box(osc.increment())
        })
    });
}

// ============================================================================
// Envelope benchmarks
// ============================================================================

fn bench_envelope_full_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("Envelope");

    group.bench_function("full_cycle", |b| {
        let mut env = Envelope::new(SAMPLE_RATE);
        env.set(Stage::Attack, 0.005);
        env.set(Stage::Decay, 0.005);
        env.set(Stage::Release, 0.005);
        b.iter(|| {
            env.note_on();
            for _ in 0..1024 {
                black_box(env.advance());
            }
            env.note_off();
            for _ in 0..512 {
                black_box(env.advance());
            }
        })
    });

    group.bench_function("instant_cascade", |b| {
        let mut env = Envelope::new(SAMPLE_RATE);
        env.set(Stage::Attack, 0.0);
        env.set(Stage::Decay, 0.0);
        env.set(Stage::Release, 0.0);
        b.iter(|| {
            env.note_on();
            black_box(env.advance());
            env.note_off();
            black_box(env.advance())
        })
    });

    group.finish();
}

// ============================================================================
// Voice benchmarks
// ============================================================================

fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("Voice");
    let bank = WavetableBank::new();

    for &block_size in BLOCK_SIZES {
        let mut voice = Voice::new(bank.default_table(), SAMPLE_RATE).unwrap();
        voice.note_on(60);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, &size| {
                b.iter(|| {
                    let mut sum = 0.0f64;
                    for _ in 0..size {
                        sum += voice.tick().as_float();
                    }
                    black_box(sum)
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// Voice assigner benchmarks
// ============================================================================

fn bench_assigner_chord(c: &mut Criterion) {
    let mut group = c.benchmark_group("VoiceAssigner");
    let bank = WavetableBank::new();

    for &block_size in BLOCK_SIZES {
        let mut synth: VoiceAssigner = VoiceAssigner::new(&bank, SAMPLE_RATE).unwrap();
        for note in [48, 55, 60, 64, 67, 72, 76, 79] {
            synth.note_on(note);
        }

        group.bench_with_input(
            BenchmarkId::new("8_voices", block_size),
            &block_size,
            |b, &size| {
                b.iter(|| {
                    let mut sum = 0.0f64;
                    for _ in 0..size {
                        sum += synth.tick();
                    }
                    black_box(sum)
                })
            },
        );
    }

    group.finish();
}

fn bench_assigner_voice_stealing(c: &mut Criterion) {
    let mut group = c.benchmark_group("VoiceAssigner_Stealing");
    let bank = WavetableBank::new();

    group.bench_function("round_robin_8voice", |b| {
        let mut synth: VoiceAssigner = VoiceAssigner::new(&bank, SAMPLE_RATE).unwrap();
        b.iter(|| {
            // More notes than voices forces stealing
            for i in 0..12 {
                synth.note_on(48 + i * 2);
                for _ in 0..64 {
                    black_box(synth.tick());
                }
            }
            synth.all_notes_off();
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_wavetable_bank,
    bench_oscillator_waveforms,
    bench_oscillator_retune,
    bench_envelope_full_cycle,
    bench_voice,
    bench_assigner_chord,
    bench_assigner_voice_stealing,
);
criterion_main!(benches);
