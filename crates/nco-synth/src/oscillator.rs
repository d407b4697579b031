//! Numerically controlled oscillator.
//!
//! A 32-bit phase accumulator advances by a fixed increment every sample; its
//! top 11 bits index the wavetable. The increment is computed without a
//! run-time division:
//!
//! ```text
//! increment = f / (sample_rate / table_size) = f * C,   C = table_size / sample_rate
//! ```
//!
//! `C` is fixed when the oscillator is built, so a frequency change costs one
//! fixed-point multiply. The accumulator wraps by unsigned overflow, which is
//! exactly the wrap from the last table entry back to the first.

use nco_core::{
    Amplitude, Error, Frequency, Phase, PhaseConstant, PhaseProduct, ValueError, WAVETABLE_SIZE,
};

use crate::wavetable::{NoiseSource, Wavetable};

/// What an oscillator reads its samples from.
#[derive(Clone, Debug)]
pub enum Source<'a> {
    /// A shared, read-only wavetable indexed by phase.
    Table(&'a Wavetable),
    /// A private noise generator; the phase is ignored.
    Noise(NoiseSource),
}

/// `C = WAVETABLE_SIZE / sample_rate` as a [`PhaseConstant`].
///
/// Fails when the ratio does not fit `UQ0.14` (sample rates at or below the
/// table size) or rounds to zero (sample rates so high that every frequency
/// would produce a zero increment).
pub fn phase_constant(sample_rate: u32) -> Result<PhaseConstant, Error> {
    let ratio = WAVETABLE_SIZE as f64 / f64::from(sample_rate);
    let constant = PhaseConstant::from_float(ratio)?;
    if constant.is_zero() {
        return Err(ValueError::Underflow { value: ratio }.into());
    }
    Ok(constant)
}

/// Wavetable NCO.
///
/// # Example
///
/// ```rust
/// use nco_core::Frequency;
/// use nco_synth::{Oscillator, Waveform, WavetableBank};
///
/// let bank = WavetableBank::new();
/// let saw = bank.get(Waveform::Sawtooth).unwrap();
///
/// let mut osc = Oscillator::new(saw, 16384)?;
/// osc.set_frequency(Frequency::from_float(8192.0)?); // Nyquist
///
/// assert_eq!(osc.tick().as_float(), -1.0);
/// assert_eq!(osc.tick().as_float(), 0.0);
/// assert_eq!(osc.tick().as_float(), -1.0);
/// # Ok::<(), nco_core::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Oscillator<'a> {
    source: Source<'a>,
    /// Accumulator; the sample for the current tick is read from here.
    phase: Phase,
    increment: Phase,
    frequency: Frequency,
    constant: PhaseConstant,
    sample_rate: u32,
}

impl<'a> Oscillator<'a> {
    /// Oscillator reading from `table` at `sample_rate` Hz, silent (zero
    /// increment) until a frequency is set.
    pub fn new(table: &'a Wavetable, sample_rate: u32) -> Result<Self, Error> {
        Ok(Self {
            source: Source::Table(table),
            phase: Phase::ZERO,
            increment: Phase::ZERO,
            frequency: Frequency::ZERO,
            constant: phase_constant(sample_rate)?,
            sample_rate,
        })
    }

    /// Increment that produces `frequency` at this sample rate.
    ///
    /// The product `f * C` is exact; the cast to [`Phase`] drops integral
    /// bits above the table index, which only matters for frequencies at or
    /// above the sample rate (they alias, as they would in hardware).
    #[inline]
    pub fn phase_increment(&self, frequency: Frequency) -> Phase {
        let product: PhaseProduct = frequency * self.constant;
        product.cast()
    }

    /// Set the frequency. The phase is untouched; only future ticks change.
    pub fn set_frequency(&mut self, frequency: Frequency) {
        self.frequency = frequency;
        self.increment = self.phase_increment(frequency);
    }

    /// Read from `table` starting with the next tick.
    pub fn set_wavetable(&mut self, table: &'a Wavetable) {
        self.source = Source::Table(table);
    }

    /// Read from `noise` starting with the next tick.
    pub fn set_noise(&mut self, noise: NoiseSource) {
        self.source = Source::Noise(noise);
    }

    /// Produce one sample.
    ///
    /// The sample is read at the current phase and only then is the phase
    /// advanced, so the first tick after [`reset`](Self::reset) always reads
    /// table entry 0.
    #[inline]
    pub fn tick(&mut self) -> Amplitude {
        let sample = match &mut self.source {
            Source::Table(table) => table.phase_to_amplitude(self.phase),
            Source::Noise(noise) => noise.next_sample(),
        };
        self.phase = (self.phase + self.increment).cast();
        sample
    }

    /// Return the accumulator to zero.
    pub fn reset(&mut self) {
        self.phase = Phase::ZERO;
    }

    /// Table index the next tick will read.
    pub fn table_index(&self) -> usize {
        self.phase.integral_part() as usize
    }

    /// Current accumulator value.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Per-sample phase increment.
    pub fn increment(&self) -> Phase {
        self.increment
    }

    /// Last frequency set.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// The precomputed `table_size / sample_rate` factor.
    pub fn phase_constant(&self) -> PhaseConstant {
        self.constant
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Current sample source.
    pub fn source(&self) -> &Source<'a> {
        &self.source
    }
}
