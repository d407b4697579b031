//! Fixed-size polyphonic voice pool with round-robin assignment.

use nco_core::Error;

use crate::envelope::Stage;
use crate::voice::Voice;
use crate::wavetable::{Waveform, WavetableBank};

/// Default number of voices.
pub const DEFAULT_VOICES: usize = 8;

#[derive(Clone, Debug)]
struct Slot<'a> {
    voice: Voice<'a>,
    note: Option<u8>,
}

/// Polyphonic voice assigner.
///
/// Notes are assigned to slots in strict rotation. When the slot under the
/// cursor still holds a note, that note is released first and the slot is
/// reused (a voice steal), even if its voice is still sounding. The
/// released voice's tail is cut short because the new note retriggers the
/// same envelope.
///
/// The output is the mean of all voices, so adding notes never raises the
/// peak level beyond a single voice's.
///
/// # Example
///
/// ```rust
/// use nco_synth::{VoiceAssigner, WavetableBank};
///
/// let bank = WavetableBank::new();
/// let mut synth: VoiceAssigner = VoiceAssigner::new(&bank, 48000)?;
///
/// synth.note_on(60);
/// synth.note_on(64);
/// synth.note_on(67);
/// assert_eq!(synth.active_voices(), 0b111);
///
/// let mut peak = 0.0f64;
/// for _ in 0..4800 {
///     peak = peak.max(synth.tick().abs());
/// }
/// assert!(peak > 0.0 && peak <= 1.0);
/// # Ok::<(), nco_core::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct VoiceAssigner<'a, const N: usize = DEFAULT_VOICES> {
    bank: &'a WavetableBank,
    slots: [Slot<'a>; N],
    next: usize,
}

impl<'a, const N: usize> VoiceAssigner<'a, N> {
    const POOL_OK: () = assert!(
        N > 0 && N <= 32,
        "VoiceAssigner supports 1 to 32 voices (active_voices is a u32 mask)"
    );

    /// Pool of `N` idle voices on the triangle table.
    pub fn new(bank: &'a WavetableBank, sample_rate: u32) -> Result<Self, Error> {
        let () = Self::POOL_OK;
        let voice = Voice::new(bank.default_table(), sample_rate)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(voices = N, sample_rate, "voice assigner ready");

        Ok(Self {
            bank,
            slots: core::array::from_fn(|_| Slot {
                voice: voice.clone(),
                note: None,
            }),
            next: 0,
        })
    }

    /// Start `note` on the slot under the cursor, stealing it if needed, and
    /// advance the cursor.
    pub fn note_on(&mut self, note: u8) {
        let index = self.next;
        let slot = &mut self.slots[index];
        if let Some(_previous) = slot.note {
            #[cfg(feature = "tracing")]
            tracing::debug!(slot = index, stolen = _previous, note, "voice steal");
            slot.voice.note_off();
        }
        slot.note = Some(note);
        slot.voice.note_on(note);
        self.next = (index + 1) % N;
    }

    /// Release every slot assigned to `note`.
    pub fn note_off(&mut self, note: u8) {
        for slot in &mut self.slots {
            if slot.note == Some(note) {
                slot.voice.note_off();
                slot.note = None;
            }
        }
    }

    /// Release every assigned slot.
    pub fn all_notes_off(&mut self) {
        for slot in &mut self.slots {
            if slot.note.take().is_some() {
                slot.voice.note_off();
            }
        }
    }

    /// Tick every voice and return the mean of their outputs.
    #[inline]
    pub fn tick(&mut self) -> f64 {
        let sum: f64 = self
            .slots
            .iter_mut()
            .map(|slot| slot.voice.tick().as_float())
            .sum();
        sum / N as f64
    }

    /// Bit `i` is set while slot `i`'s voice is sounding.
    pub fn active_voices(&self) -> u32 {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.voice.is_active())
            .fold(0, |mask, (i, _)| mask | 1 << i)
    }

    /// Switch every voice to `waveform`.
    pub fn set_wavetable(&mut self, waveform: Waveform) {
        let bank = self.bank;
        for slot in &mut self.slots {
            match bank.get(waveform) {
                Some(table) => slot.voice.set_wavetable(table),
                None => slot.voice.set_noise(),
            }
        }
    }

    /// Forward an envelope parameter to every voice.
    pub fn set_envelope(&mut self, stage: Stage, value: f64) {
        for slot in &mut self.slots {
            slot.voice.set_envelope(stage, value);
        }
    }

    /// Set the A4 reference pitch of every voice.
    pub fn set_tuning(&mut self, hz: f64) {
        for slot in &mut self.slots {
            slot.voice.set_tuning(hz);
        }
    }

    /// Set the oscillator 2 offset of every voice.
    pub fn set_detune(&mut self, hz: f64) {
        for slot in &mut self.slots {
            slot.voice.set_detune(hz);
        }
    }

    /// Note assigned to `slot`, if any.
    pub fn assigned_note(&self, slot: usize) -> Option<u8> {
        self.slots.get(slot).and_then(|s| s.note)
    }

    /// Slot the next note-on will use.
    pub fn cursor(&self) -> usize {
        self.next
    }

    /// Iterate over the voices in slot order.
    pub fn voices(&self) -> impl Iterator<Item = &Voice<'a>> {
        self.slots.iter().map(|slot| &slot.voice)
    }

    /// Number of slots.
    pub fn voice_count(&self) -> usize {
        N
    }

    /// The bank voices read their tables from.
    pub fn bank(&self) -> &'a WavetableBank {
        self.bank
    }
}
