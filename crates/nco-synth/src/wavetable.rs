//! One-cycle wavetables, the standard waveform bank, and the noise source.
//!
//! A [`Wavetable`] holds [`WAVETABLE_SIZE`] amplitudes sampled from a
//! waveform function over `[0, 2π)`. Tables are built once and then only
//! read, so any number of oscillators may borrow the same table. The
//! [`WavetableBank`] owns the four standard shapes for the lifetime of the
//! engine.

use core::f64::consts::{FRAC_PI_2, PI, TAU};
use core::fmt;

use nco_core::{Amplitude, Error, Phase, WAVETABLE_SIZE};

/// Waveform selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Waveform {
    /// `sin θ`.
    Sine,
    /// `+1` for the first half cycle (θ ≤ π), `-1` after.
    Square,
    /// Rises from -1 to +1 over the first half cycle and back.
    #[default]
    Triangle,
    /// Rises linearly from -1 to just under +1.
    Sawtooth,
    /// Pseudo-random samples from a [`NoiseSource`]; has no table.
    Noise,
}

impl Waveform {
    /// Every selectable waveform.
    pub const ALL: [Waveform; 5] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Sawtooth,
        Waveform::Noise,
    ];

    /// Lowercase name, as used in patches and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Noise => "noise",
        }
    }

    /// The function sampled to build this waveform's table, or `None` for
    /// noise.
    pub fn function(self) -> Option<fn(f64) -> f64> {
        match self {
            Waveform::Sine => Some(libm::sin),
            Waveform::Square => Some(square),
            Waveform::Triangle => Some(triangle),
            Waveform::Sawtooth => Some(sawtooth),
            Waveform::Noise => None,
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn square(theta: f64) -> f64 {
    if theta <= PI { 1.0 } else { -1.0 }
}

fn triangle(theta: f64) -> f64 {
    let rising = if theta <= PI { theta } else { TAU - theta };
    rising / FRAC_PI_2 - 1.0
}

fn sawtooth(theta: f64) -> f64 {
    theta / PI - 1.0
}

/// Angle of table entry `index`.
#[inline]
fn theta(index: usize) -> f64 {
    TAU * index as f64 / WAVETABLE_SIZE as f64
}

/// One cycle of a waveform as fixed-point amplitudes.
///
/// # Example
///
/// ```rust
/// use nco_synth::Wavetable;
///
/// let saw = Wavetable::new(|theta| theta / core::f64::consts::PI - 1.0);
/// assert_eq!(saw.lookup(0).unwrap().as_float(), -1.0);
/// assert_eq!(saw.lookup(1024).unwrap().as_float(), 0.0);
/// assert!(saw.lookup(2048).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Wavetable {
    samples: [Amplitude; WAVETABLE_SIZE],
}

impl Wavetable {
    /// Sample `f(θ)` at `θ = 2π·k / WAVETABLE_SIZE`.
    ///
    /// Values outside the [`Amplitude`] range are clamped; use
    /// [`try_new`](Self::try_new) to reject them instead.
    pub fn new(f: impl Fn(f64) -> f64) -> Self {
        let mut samples = [Amplitude::ZERO; WAVETABLE_SIZE];
        for (k, sample) in samples.iter_mut().enumerate() {
            *sample = Amplitude::saturating_from_float(f(theta(k)));
        }
        Self { samples }
    }

    /// Like [`new`](Self::new), but fails on the first sample that is not
    /// finite or does not fit an [`Amplitude`].
    pub fn try_new(f: impl Fn(f64) -> f64) -> Result<Self, Error> {
        let mut samples = [Amplitude::ZERO; WAVETABLE_SIZE];
        for (k, sample) in samples.iter_mut().enumerate() {
            *sample = Amplitude::from_float(f(theta(k)))?;
        }
        Ok(Self { samples })
    }

    /// Table for one of the standard shapes. `None` for [`Waveform::Noise`].
    pub fn for_waveform(waveform: Waveform) -> Option<Self> {
        waveform.function().map(Self::new)
    }

    /// Entry at `index`.
    pub fn lookup(&self, index: usize) -> Result<Amplitude, Error> {
        self.samples
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: WAVETABLE_SIZE,
            })
    }

    /// Entry addressed by the integral part of `phase`.
    ///
    /// The index is masked to the table size, so this cannot fail.
    #[inline]
    pub fn phase_to_amplitude(&self, phase: Phase) -> Amplitude {
        self.samples[phase.integral_part() as usize & (WAVETABLE_SIZE - 1)]
    }

    /// Number of entries (always [`WAVETABLE_SIZE`]).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// All entries in phase order.
    pub fn as_slice(&self) -> &[Amplitude] {
        &self.samples
    }

    /// Iterate over the entries in phase order.
    pub fn iter(&self) -> core::slice::Iter<'_, Amplitude> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a Wavetable {
    type Item = &'a Amplitude;
    type IntoIter = core::slice::Iter<'a, Amplitude>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl fmt::Debug for Wavetable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wavetable")
            .field("len", &WAVETABLE_SIZE)
            .field("first", &self.samples[0])
            .field("middle", &self.samples[WAVETABLE_SIZE / 2])
            .finish_non_exhaustive()
    }
}

/// The standard waveform tables, built once and borrowed by every
/// oscillator.
///
/// The bank must outlive the oscillators, voices and assigners that borrow
/// from it; the borrow checker enforces this through their `'a` lifetime.
#[derive(Clone, Debug)]
pub struct WavetableBank {
    sine: Wavetable,
    square: Wavetable,
    triangle: Wavetable,
    sawtooth: Wavetable,
}

impl Default for WavetableBank {
    fn default() -> Self {
        Self::new()
    }
}

impl WavetableBank {
    /// Build the sine, square, triangle and sawtooth tables.
    pub fn new() -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(entries = WAVETABLE_SIZE, "building wavetable bank");

        Self {
            sine: Wavetable::new(libm::sin),
            square: Wavetable::new(square),
            triangle: Wavetable::new(triangle),
            sawtooth: Wavetable::new(sawtooth),
        }
    }

    /// Table for `waveform`, or `None` for [`Waveform::Noise`].
    pub fn get(&self, waveform: Waveform) -> Option<&Wavetable> {
        match waveform {
            Waveform::Sine => Some(&self.sine),
            Waveform::Square => Some(&self.square),
            Waveform::Triangle => Some(&self.triangle),
            Waveform::Sawtooth => Some(&self.sawtooth),
            Waveform::Noise => None,
        }
    }

    /// The triangle table, which voices start on.
    pub fn default_table(&self) -> &Wavetable {
        &self.triangle
    }
}

/// Linear congruential noise generator.
///
/// Each instance carries its own state, so two sources seeded alike produce
/// the same sequence and never disturb each other. The 32-bit state is
/// reinterpreted as an [`Amplitude`] bit pattern (low 24 bits, sign-extended),
/// covering the full `[-2, 2)` range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoiseSource {
    state: u32,
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource {
    /// Seed used by [`new`](Self::new).
    pub const DEFAULT_SEED: u32 = 1;

    const MULTIPLIER: u32 = 1_103_515_245;
    const INCREMENT: u32 = 12_345;

    /// Source seeded with [`DEFAULT_SEED`](Self::DEFAULT_SEED).
    pub fn new() -> Self {
        Self::with_seed(Self::DEFAULT_SEED)
    }

    /// Source with an explicit seed.
    pub fn with_seed(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the generator and return the next sample.
    #[inline]
    pub fn next_sample(&mut self) -> Amplitude {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        Amplitude::from_bits(i64::from(self.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amp(v: f64) -> Amplitude {
        Amplitude::from_float(v).unwrap()
    }

    #[test]
    fn test_table_size() {
        let bank = WavetableBank::new();
        for waveform in Waveform::ALL {
            if let Some(table) = bank.get(waveform) {
                assert_eq!(table.len(), 2048);
                assert_eq!(table.iter().count(), 2048);
            }
        }
    }

    #[test]
    fn test_sawtooth_shape() {
        let bank = WavetableBank::new();
        let saw = bank.get(Waveform::Sawtooth).unwrap();
        assert_eq!(saw.lookup(0).unwrap(), amp(-1.0));
        assert_eq!(saw.lookup(512).unwrap(), amp(-0.5));
        assert_eq!(saw.lookup(1024).unwrap(), amp(0.0));
        assert_eq!(saw.lookup(1536).unwrap(), amp(0.5));
        assert!(saw.lookup(2047).unwrap().as_float() < 1.0);
    }

    #[test]
    fn test_square_shape() {
        let bank = WavetableBank::new();
        let sq = bank.get(Waveform::Square).unwrap();
        assert_eq!(sq.lookup(0).unwrap(), amp(1.0));
        // θ = π exactly is still the high half.
        assert_eq!(sq.lookup(1024).unwrap(), amp(1.0));
        assert_eq!(sq.lookup(1025).unwrap(), amp(-1.0));
        assert_eq!(sq.lookup(2047).unwrap(), amp(-1.0));
    }

    #[test]
    fn test_triangle_shape() {
        let bank = WavetableBank::new();
        let tri = bank.get(Waveform::Triangle).unwrap();
        assert_eq!(tri.lookup(0).unwrap(), amp(-1.0));
        assert_eq!(tri.lookup(512).unwrap(), amp(0.0));
        assert_eq!(tri.lookup(1024).unwrap(), amp(1.0));
        assert_eq!(tri.lookup(1536).unwrap(), amp(0.0));
    }

    #[test]
    fn test_sine_shape() {
        let bank = WavetableBank::new();
        let sine = bank.get(Waveform::Sine).unwrap();
        assert_eq!(sine.lookup(0).unwrap(), amp(0.0));
        assert_eq!(sine.lookup(512).unwrap(), amp(1.0));
        assert_eq!(sine.lookup(1536).unwrap(), amp(-1.0));
    }

    #[test]
    fn test_lookup_out_of_range() {
        let table = Wavetable::new(libm::sin);
        assert_eq!(
            table.lookup(2048),
            Err(Error::IndexOutOfRange {
                index: 2048,
                len: 2048
            })
        );
        assert!(table.lookup(usize::MAX).is_err());
    }

    #[test]
    fn test_phase_to_amplitude_uses_integral_bits() {
        let saw = Wavetable::new(sawtooth);
        let phase = Phase::from_int(1024, 0x1f_ffff).unwrap();
        assert_eq!(saw.phase_to_amplitude(phase), saw.lookup(1024).unwrap());
        assert_eq!(
            saw.phase_to_amplitude(Phase::MAX),
            saw.lookup(2047).unwrap()
        );
    }

    #[test]
    fn test_new_clamps_and_try_new_rejects() {
        let loud = Wavetable::new(|_| 5.0);
        assert_eq!(loud.lookup(0).unwrap(), Amplitude::MAX);
        assert!(Wavetable::try_new(|_| 5.0).is_err());
        assert!(Wavetable::try_new(|_| f64::NAN).is_err());
        assert!(Wavetable::try_new(libm::sin).is_ok());
    }

    #[test]
    fn test_noise_has_no_table() {
        let bank = WavetableBank::new();
        assert!(bank.get(Waveform::Noise).is_none());
        assert!(Wavetable::for_waveform(Waveform::Noise).is_none());
        assert_eq!(
            Wavetable::for_waveform(Waveform::Sine).as_ref(),
            bank.get(Waveform::Sine)
        );
    }

    #[test]
    fn test_noise_is_deterministic_per_instance() {
        let mut a = NoiseSource::new();
        let mut b = NoiseSource::new();
        let first: [Amplitude; 16] = core::array::from_fn(|_| a.next_sample());
        // Interleaving another instance does not disturb `b`.
        let mut other = NoiseSource::with_seed(99);
        let second: [Amplitude; 16] = core::array::from_fn(|_| {
            other.next_sample();
            b.next_sample()
        });
        assert_eq!(first, second);
    }

    #[test]
    fn test_noise_first_sample() {
        let mut noise = NoiseSource::new();
        // 1 * 1103515245 + 12345 = 0x41c67ea6; low 24 bits 0xc67ea6 are negative.
        let expected = Amplitude::from_bits(0x41c6_7ea6);
        assert_eq!(noise.next_sample(), expected);
        assert!(expected.is_negative());
    }

    #[test]
    fn test_waveform_names() {
        let names: [&str; 5] = Waveform::ALL.map(Waveform::name);
        assert_eq!(names, ["sine", "square", "triangle", "sawtooth", "noise"]);
        assert_eq!(Waveform::default(), Waveform::Triangle);
    }
}
