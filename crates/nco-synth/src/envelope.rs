//! Linear ADSR envelope.
//!
//! Attack, decay and release move the level by a constant per-sample delta
//! (`1 / (seconds * sample_rate)`); a delta of zero means the stage is
//! instant. Transitions are evaluated from a small table, re-checked in a
//! loop until the state is stable, so a single tick can pass through several
//! zero-length stages.

use nco_core::Amplitude;

/// Envelope states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeState {
    /// Envelope is inactive; output is zero.
    #[default]
    Idle,
    /// Rising toward 1.0.
    Attack,
    /// Falling from 1.0 toward the sustain level.
    Decay,
    /// Holding the sustain level while the note is held.
    Sustain,
    /// Falling toward zero after note-off.
    Release,
}

/// Parameter selector for [`Envelope::set`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Attack duration in seconds.
    Attack,
    /// Decay duration in seconds.
    Decay,
    /// Sustain level in `[0, 1]`.
    Sustain,
    /// Release duration in seconds.
    Release,
}

/// Upper bound on transitions in one tick (one per state).
const STATE_COUNT: usize = 5;

/// One row of the transition table: a moving state heads for `target` at
/// `rate` per sample and becomes `next` once it gets there.
#[derive(Clone, Copy, Debug)]
struct Segment {
    target: f64,
    rate: f64,
    rising: bool,
    next: EnvelopeState,
}

impl Segment {
    fn reached(&self, level: f64) -> bool {
        if self.rising {
            level >= self.target
        } else {
            level <= self.target
        }
    }

    fn step(&self, level: f64) -> f64 {
        if self.rate == 0.0 {
            self.target
        } else if self.rising {
            (level + self.rate).min(self.target)
        } else {
            (level - self.rate).max(self.target)
        }
    }
}

/// ADSR envelope generator.
///
/// Defaults: attack 50 ms, decay 50 ms, sustain 0.5, release 200 ms.
///
/// # Example
///
/// ```rust
/// use nco_core::Amplitude;
/// use nco_synth::{Envelope, EnvelopeState, Stage};
///
/// let mut env = Envelope::new(48000);
/// env.set(Stage::Attack, 0.0);
///
/// env.note_on();
/// let full = Amplitude::from_float(1.0).unwrap();
/// assert_eq!(env.tick(full).as_float(), 1.0);
///
/// env.note_off();
/// assert_eq!(env.state(), EnvelopeState::Release);
/// ```
#[derive(Clone, Debug)]
pub struct Envelope {
    state: EnvelopeState,
    level: f64,
    sample_rate: f64,
    attack: f64,
    decay: f64,
    sustain: f64,
    release: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new(48000)
    }
}

impl Envelope {
    /// Default attack duration in seconds.
    pub const DEFAULT_ATTACK: f64 = 0.05;
    /// Default decay duration in seconds.
    pub const DEFAULT_DECAY: f64 = 0.05;
    /// Default sustain level.
    pub const DEFAULT_SUSTAIN: f64 = 0.5;
    /// Default release duration in seconds.
    pub const DEFAULT_RELEASE: f64 = 0.2;

    /// Idle envelope with the default stage settings.
    pub fn new(sample_rate: u32) -> Self {
        let mut env = Self {
            state: EnvelopeState::Idle,
            level: 0.0,
            sample_rate: f64::from(sample_rate),
            attack: 0.0,
            decay: 0.0,
            sustain: Self::DEFAULT_SUSTAIN,
            release: 0.0,
        };
        env.set(Stage::Attack, Self::DEFAULT_ATTACK);
        env.set(Stage::Decay, Self::DEFAULT_DECAY);
        env.set(Stage::Release, Self::DEFAULT_RELEASE);
        env
    }

    /// Set a stage parameter.
    ///
    /// Timed stages take a duration in seconds; zero or anything shorter
    /// than one sample makes the stage instant. Sustain takes a level,
    /// clamped to `[0, 1]`. Non-finite values, and negative durations, are
    /// ignored so noisy control data cannot disturb the audio.
    pub fn set(&mut self, stage: Stage, value: f64) {
        match stage {
            Stage::Attack => {
                if let Some(rate) = self.rate_for(value) {
                    self.attack = rate;
                }
            }
            Stage::Decay => {
                if let Some(rate) = self.rate_for(value) {
                    self.decay = rate;
                }
            }
            Stage::Release => {
                if let Some(rate) = self.rate_for(value) {
                    self.release = rate;
                }
            }
            Stage::Sustain => {
                if value.is_finite() {
                    self.sustain = value.clamp(0.0, 1.0);
                }
            }
        }
    }

    fn rate_for(&self, seconds: f64) -> Option<f64> {
        if !seconds.is_finite() || seconds < 0.0 {
            return None;
        }
        let samples = seconds * self.sample_rate;
        if samples < 1.0 {
            Some(0.0)
        } else {
            Some(1.0 / samples)
        }
    }

    /// Start (or restart) the attack. The current level is kept so a
    /// retrigger does not click.
    pub fn note_on(&mut self) {
        self.state = EnvelopeState::Attack;
    }

    /// Start the release, unless the envelope is idle.
    pub fn note_off(&mut self) {
        if self.state != EnvelopeState::Idle {
            self.state = EnvelopeState::Release;
        }
    }

    /// Jump to idle with zero level.
    pub fn reset(&mut self) {
        self.state = EnvelopeState::Idle;
        self.level = 0.0;
    }

    /// Advance one sample and return `input` scaled by the new level.
    #[inline]
    pub fn tick(&mut self, input: Amplitude) -> Amplitude {
        self.advance();
        Amplitude::saturating_from_float(input.as_float() * self.level)
    }

    /// Advance one sample and return the level.
    ///
    /// A moving state takes one step toward its target. When the target is
    /// reached the state changes in the same sample, and if the new state is
    /// instant it is applied too, so zero-length stages never hold a sample.
    /// A state whose exit condition already holds on entry moves on without
    /// stepping.
    pub fn advance(&mut self) -> f64 {
        for _ in 0..STATE_COUNT {
            let Some(segment) = self.segment() else {
                self.level = match self.state {
                    EnvelopeState::Sustain => self.sustain,
                    _ => 0.0,
                };
                break;
            };
            if !segment.reached(self.level) {
                self.level = segment.step(self.level);
                if !segment.reached(self.level) {
                    break;
                }
            }
            self.level = segment.target;
            self.state = segment.next;
            if !self.segment().is_some_and(|next| next.rate == 0.0) {
                break;
            }
        }
        self.level
    }

    fn segment(&self) -> Option<Segment> {
        match self.state {
            EnvelopeState::Idle | EnvelopeState::Sustain => None,
            EnvelopeState::Attack => Some(Segment {
                target: 1.0,
                rate: self.attack,
                rising: true,
                next: EnvelopeState::Decay,
            }),
            EnvelopeState::Decay => Some(Segment {
                target: self.sustain,
                rate: self.decay,
                rising: false,
                next: EnvelopeState::Sustain,
            }),
            EnvelopeState::Release => Some(Segment {
                target: 0.0,
                rate: self.release,
                rising: false,
                next: EnvelopeState::Idle,
            }),
        }
    }

    /// True unless idle.
    pub fn is_active(&self) -> bool {
        self.state != EnvelopeState::Idle
    }

    /// Current state.
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Current level without advancing.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Attack delta per sample (0 = instant).
    pub fn attack_rate(&self) -> f64 {
        self.attack
    }

    /// Decay delta per sample (0 = instant).
    pub fn decay_rate(&self) -> f64 {
        self.decay
    }

    /// Release delta per sample (0 = instant).
    pub fn release_rate(&self) -> f64 {
        self.release
    }

    /// Sustain level.
    pub fn sustain(&self) -> f64 {
        self.sustain
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: u32 = 48000;

    fn unit() -> Amplitude {
        Amplitude::from_float(1.0).unwrap()
    }

    #[test]
    fn test_envelope_idle_state() {
        let mut env = Envelope::new(SR);
        assert_eq!(env.state(), EnvelopeState::Idle);
        for _ in 0..100 {
            assert!(env.tick(unit()).is_zero());
        }
        assert!(!env.is_active());
    }

    #[test]
    fn test_default_rates() {
        let env = Envelope::new(SR);
        assert!((env.attack_rate() - 1.0 / 2400.0).abs() < 1e-15);
        assert!((env.decay_rate() - 1.0 / 2400.0).abs() < 1e-15);
        assert!((env.release_rate() - 1.0 / 9600.0).abs() < 1e-15);
        assert_eq!(env.sustain(), 0.5);
    }

    #[test]
    fn test_attack_is_linear() {
        let mut env = Envelope::new(SR);
        env.set(Stage::Attack, 0.01); // 480 samples
        env.note_on();
        for i in 1..=100 {
            let level = env.advance();
            assert!((level - f64::from(i) / 480.0).abs() < 1e-12);
        }
        assert_eq!(env.state(), EnvelopeState::Attack);
    }

    #[test]
    fn test_settles_at_sustain() {
        let mut env = Envelope::new(SR);
        env.set(Stage::Sustain, 0.3);
        env.note_on();
        for _ in 0..(2400 + 2400 + 10) {
            env.advance();
        }
        assert_eq!(env.state(), EnvelopeState::Sustain);
        assert_eq!(env.level(), 0.3);
    }

    #[test]
    fn test_release_reaches_idle() {
        let mut env = Envelope::new(SR);
        env.note_on();
        for _ in 0..6000 {
            env.advance();
        }
        env.note_off();
        assert_eq!(env.state(), EnvelopeState::Release);
        for _ in 0..9700 {
            env.advance();
        }
        assert_eq!(env.state(), EnvelopeState::Idle);
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn test_instant_attack() {
        let mut env = Envelope::new(SR);
        env.set(Stage::Attack, 0.0);
        env.note_on();
        assert_eq!(env.tick(unit()).as_float(), 1.0);
        // Peak reached, so decay has already begun.
        assert_eq!(env.state(), EnvelopeState::Decay);
        env.advance();
        assert!(env.level() < 1.0);
    }

    #[test]
    fn test_cascade_through_instant_stages() {
        let mut env = Envelope::new(SR);
        env.set(Stage::Attack, 0.0);
        env.set(Stage::Decay, 0.0);
        env.set(Stage::Sustain, 0.25);
        env.note_on();
        // Attack and decay both complete within one sample.
        assert_eq!(env.advance(), 0.25);
        assert_eq!(env.state(), EnvelopeState::Sustain);
    }

    #[test]
    fn test_attack_reaches_peak_then_decays() {
        let mut env = Envelope::new(SR);
        env.set(Stage::Attack, 0.001); // 48 samples
        env.note_on();
        let mut peak_at = None;
        for i in 0..100 {
            let level = env.advance();
            if level == 1.0 {
                peak_at = Some(i);
                assert_eq!(env.state(), EnvelopeState::Decay);
                break;
            }
        }
        let peak_at = peak_at.unwrap();
        assert!((47..=48).contains(&peak_at), "peak at sample {peak_at}");
    }

    #[test]
    fn test_instant_release() {
        let mut env = Envelope::new(SR);
        env.set(Stage::Attack, 0.0);
        env.set(Stage::Release, 0.0);
        env.note_on();
        env.advance();
        env.note_off();
        assert_eq!(env.advance(), 0.0);
        assert_eq!(env.state(), EnvelopeState::Idle);
    }

    #[test]
    fn test_sub_sample_duration_is_instant() {
        let mut env = Envelope::new(SR);
        env.set(Stage::Attack, 1.0 / 96000.0);
        assert_eq!(env.attack_rate(), 0.0);
        env.set(Stage::Attack, 1.0 / 48000.0);
        assert_eq!(env.attack_rate(), 1.0);
    }

    #[test]
    fn test_invalid_input_ignored() {
        let mut env = Envelope::new(SR);
        let before = env.attack_rate();
        env.set(Stage::Attack, f64::NAN);
        env.set(Stage::Attack, -1.0);
        env.set(Stage::Attack, f64::INFINITY);
        assert_eq!(env.attack_rate(), before);
        env.set(Stage::Sustain, f64::NAN);
        assert_eq!(env.sustain(), 0.5);
    }

    #[test]
    fn test_sustain_clamped() {
        let mut env = Envelope::new(SR);
        env.set(Stage::Sustain, 1.5);
        assert_eq!(env.sustain(), 1.0);
        env.set(Stage::Sustain, -0.5);
        assert_eq!(env.sustain(), 0.0);
    }

    #[test]
    fn test_retrigger_keeps_level() {
        let mut env = Envelope::new(SR);
        env.note_on();
        for _ in 0..200 {
            env.advance();
        }
        let before = env.level();
        env.note_off();
        env.advance();
        env.note_on();
        assert_eq!(env.state(), EnvelopeState::Attack);
        assert!((env.level() - before).abs() < 0.001);
    }

    #[test]
    fn test_note_off_while_idle() {
        let mut env = Envelope::new(SR);
        env.note_off();
        assert_eq!(env.state(), EnvelopeState::Idle);
    }

    #[test]
    fn test_tick_scales_input() {
        let mut env = Envelope::new(SR);
        env.set(Stage::Attack, 0.0);
        env.note_on();
        let half = Amplitude::from_float(-0.5).unwrap();
        assert_eq!(env.tick(half).as_float(), -0.5);
    }

    #[test]
    fn test_reset() {
        let mut env = Envelope::new(SR);
        env.note_on();
        env.advance();
        env.reset();
        assert!(!env.is_active());
        assert_eq!(env.level(), 0.0);
    }
}
