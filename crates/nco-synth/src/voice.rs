//! A playable note: two oscillators through one envelope.

use nco_core::{A4_FREQUENCY, Amplitude, Error, Frequency, midi_note_to_frequency, soft_saturate};

use crate::envelope::{Envelope, Stage};
use crate::oscillator::Oscillator;
use crate::wavetable::{NoiseSource, Wavetable};

/// Default offset of the second oscillator in Hz.
pub const DEFAULT_DETUNE_HZ: f64 = 4.0;

/// Two-oscillator voice.
///
/// Oscillator 1 plays the note's pitch (8-foot), oscillator 2 the same pitch
/// plus a fixed detune in Hz. Their sum is soft-saturated into `(-1, 1)` and
/// shaped by the envelope. An idle voice outputs silence without touching
/// its oscillators, so their phase only advances while the note sounds.
///
/// # Example
///
/// ```rust
/// use nco_synth::{Voice, WavetableBank};
///
/// let bank = WavetableBank::new();
/// let mut voice = Voice::new(bank.default_table(), 48000)?;
///
/// voice.note_on(60);
/// assert!(voice.is_active());
/// for _ in 0..1000 {
///     let sample = voice.tick();
///     assert!(sample.as_float().abs() < 1.0);
/// }
/// voice.note_off();
/// # Ok::<(), nco_core::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Voice<'a> {
    oscillators: [Oscillator<'a>; 2],
    envelope: Envelope,
    tuning: f64,
    detune: f64,
}

impl<'a> Voice<'a> {
    /// Idle voice reading from `table`.
    pub fn new(table: &'a Wavetable, sample_rate: u32) -> Result<Self, Error> {
        let oscillator = Oscillator::new(table, sample_rate)?;
        Ok(Self {
            oscillators: [oscillator.clone(), oscillator],
            envelope: Envelope::new(sample_rate),
            tuning: A4_FREQUENCY,
            detune: DEFAULT_DETUNE_HZ,
        })
    }

    /// Start `note` (MIDI note number).
    ///
    /// An oscillator whose frequency falls outside [`Frequency`] keeps its
    /// previous frequency.
    pub fn note_on(&mut self, note: u8) {
        let base = midi_note_to_frequency(note, self.tuning);
        let [primary, companion] = &mut self.oscillators;
        retune(primary, base);
        retune(companion, base + self.detune);
        self.envelope.note_on();
    }

    /// Release the note. The oscillators keep running through the release.
    pub fn note_off(&mut self) {
        self.envelope.note_off();
    }

    /// Silence immediately, skipping the release.
    pub fn kill(&mut self) {
        self.envelope.reset();
    }

    /// Produce one sample.
    #[inline]
    pub fn tick(&mut self) -> Amplitude {
        if !self.envelope.is_active() {
            return Amplitude::ZERO;
        }
        let mix: f64 = self
            .oscillators
            .iter_mut()
            .map(|osc| osc.tick().as_float())
            .sum();
        let shaped = Amplitude::saturating_from_float(soft_saturate(mix));
        self.envelope.tick(shaped)
    }

    /// Point both oscillators at `table`.
    pub fn set_wavetable(&mut self, table: &'a Wavetable) {
        for osc in &mut self.oscillators {
            osc.set_wavetable(table);
        }
    }

    /// Switch both oscillators to noise, each with its own generator.
    pub fn set_noise(&mut self) {
        for (seed, osc) in (NoiseSource::DEFAULT_SEED..).zip(&mut self.oscillators) {
            osc.set_noise(NoiseSource::with_seed(seed));
        }
    }

    /// Forward an envelope parameter.
    pub fn set_envelope(&mut self, stage: Stage, value: f64) {
        self.envelope.set(stage, value);
    }

    /// Pitch of A4 in Hz, applied from the next note-on. Ignored unless
    /// positive and finite.
    pub fn set_tuning(&mut self, hz: f64) {
        if hz.is_finite() && hz > 0.0 {
            self.tuning = hz;
        }
    }

    /// Offset of oscillator 2 in Hz, applied from the next note-on. Ignored
    /// unless finite.
    pub fn set_detune(&mut self, hz: f64) {
        if hz.is_finite() {
            self.detune = hz;
        }
    }

    /// True while the envelope is not idle.
    pub fn is_active(&self) -> bool {
        self.envelope.is_active()
    }

    /// The envelope.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Both oscillators, 8-foot first.
    pub fn oscillators(&self) -> &[Oscillator<'a>; 2] {
        &self.oscillators
    }

    /// Pitch of A4 in Hz.
    pub fn tuning(&self) -> f64 {
        self.tuning
    }

    /// Oscillator 2 offset in Hz.
    pub fn detune(&self) -> f64 {
        self.detune
    }
}

fn retune(osc: &mut Oscillator<'_>, hz: f64) {
    match Frequency::from_float(hz) {
        Ok(frequency) => osc.set_frequency(frequency),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(hz, error = %_err, "note frequency out of range; oscillator left unchanged");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::EnvelopeState;
    use crate::wavetable::{Waveform, WavetableBank};

    const SR: u32 = 48000;

    #[test]
    fn test_voice_starts_idle() {
        let bank = WavetableBank::new();
        let mut voice = Voice::new(bank.default_table(), SR).unwrap();
        assert!(!voice.is_active());
        assert!(voice.tick().is_zero());
    }

    #[test]
    fn test_note_on_sets_frequencies() {
        let bank = WavetableBank::new();
        let mut voice = Voice::new(bank.default_table(), SR).unwrap();
        voice.note_on(69);
        let [a, b] = voice.oscillators();
        assert_eq!(a.frequency().as_float(), 440.0);
        assert_eq!(b.frequency().as_float(), 444.0);
        assert_eq!(voice.envelope().state(), EnvelopeState::Attack);
    }

    #[test]
    fn test_tuning_and_detune() {
        let bank = WavetableBank::new();
        let mut voice = Voice::new(bank.default_table(), SR).unwrap();
        voice.set_tuning(432.0);
        voice.set_detune(-2.0);
        voice.note_on(81);
        let [a, b] = voice.oscillators();
        assert_eq!(a.frequency().as_float(), 864.0);
        assert_eq!(b.frequency().as_float(), 862.0);

        voice.set_tuning(f64::NAN);
        voice.set_tuning(-1.0);
        voice.set_detune(f64::INFINITY);
        assert_eq!(voice.tuning(), 432.0);
        assert_eq!(voice.detune(), -2.0);
    }

    #[test]
    fn test_out_of_range_frequency_keeps_previous() {
        let bank = WavetableBank::new();
        let mut voice = Voice::new(bank.default_table(), SR).unwrap();
        voice.note_on(69);
        // Companion would be negative: 8.18 Hz - 100 Hz.
        voice.set_detune(-100.0);
        voice.note_on(0);
        let [a, b] = voice.oscillators();
        assert!((a.frequency().as_float() - 8.176).abs() < 0.01);
        assert_eq!(b.frequency().as_float(), 444.0);
    }

    #[test]
    fn test_idle_voice_does_not_advance_oscillators() {
        let bank = WavetableBank::new();
        let mut voice = Voice::new(bank.default_table(), SR).unwrap();
        voice.set_envelope(Stage::Release, 0.0);
        voice.note_on(60);
        for _ in 0..10 {
            voice.tick();
        }
        voice.note_off();
        voice.tick();
        assert!(!voice.is_active());
        let phase = voice.oscillators()[0].phase();
        for _ in 0..100 {
            assert!(voice.tick().is_zero());
        }
        assert_eq!(voice.oscillators()[0].phase(), phase);
    }

    #[test]
    fn test_output_is_bounded() {
        let bank = WavetableBank::new();
        let mut voice = Voice::new(bank.get(Waveform::Square).unwrap(), SR).unwrap();
        voice.set_envelope(Stage::Attack, 0.0);
        voice.set_envelope(Stage::Sustain, 1.0);
        voice.note_on(45);
        for _ in 0..4800 {
            let s = voice.tick().as_float();
            assert!(s.abs() < 1.0, "sample {s} out of range");
        }
    }

    #[test]
    fn test_kill_silences_immediately() {
        let bank = WavetableBank::new();
        let mut voice = Voice::new(bank.default_table(), SR).unwrap();
        voice.note_on(60);
        voice.tick();
        voice.kill();
        assert!(!voice.is_active());
        assert!(voice.tick().is_zero());
    }

    #[test]
    fn test_noise_oscillators_differ() {
        let bank = WavetableBank::new();
        let mut voice = Voice::new(bank.default_table(), SR).unwrap();
        voice.set_noise();
        voice.set_envelope(Stage::Attack, 0.0);
        voice.note_on(60);
        let heard: [f64; 8] = core::array::from_fn(|_| voice.tick().as_float());
        assert!(heard.iter().any(|s| *s != 0.0));
        assert!(heard.iter().all(|s| s.abs() < 1.0));
    }
}
