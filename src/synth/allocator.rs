#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::synth::voice::{Voice, VoiceState};

/// What to do with a note-on when every voice is busy.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VoiceStealing {
    /// Drop the new note; sounding voices are never interrupted
    #[default]
    Off,
    /// Take over the oldest voice that is already releasing, else drop
    OldestReleasing,
    /// Take over the oldest voice, releasing ones first
    Oldest,
}

/// Pick the voice index a note-on should use.
///
/// First pass finds a free voice. Only when none is free does the stealing
/// policy get a say.
pub fn allocate(voices: &[Voice], policy: VoiceStealing) -> Option<usize> {
    // First pass: find free voice index
    if let Some(idx) = voices.iter().position(Voice::is_free) {
        return Some(idx);
    }

    let oldest_in = |state: VoiceState| {
        voices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.state() == state)
            .min_by_key(|(_, v)| v.age())
            .map(|(idx, _)| idx)
    };

    // Second pass: steal per policy
    match policy {
        VoiceStealing::Off => None,
        VoiceStealing::OldestReleasing => oldest_in(VoiceState::Releasing),
        VoiceStealing::Oldest => {
            oldest_in(VoiceState::Releasing).or_else(|| oldest_in(VoiceState::Active))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(ages: &[u64]) -> Vec<Voice> {
        ages.iter()
            .enumerate()
            .map(|(i, &age)| {
                let mut v = Voice::new();
                v.assign(60 + i as u8, 1.0, age);
                v
            })
            .collect()
    }

    #[test]
    fn free_voice_wins_over_any_policy() {
        let mut voices = pool(&[5, 1, 9]);
        voices.push(Voice::new());
        assert_eq!(allocate(&voices, VoiceStealing::Off), Some(3));
        assert_eq!(allocate(&voices, VoiceStealing::Oldest), Some(3));
    }

    #[test]
    fn full_pool_drops_by_default() {
        let voices = pool(&[5, 1, 9]);
        assert_eq!(allocate(&voices, VoiceStealing::Off), None);
        assert_eq!(allocate(&voices, VoiceStealing::OldestReleasing), None);
    }

    #[test]
    fn oldest_steals_by_age() {
        let voices = pool(&[5, 1, 9]);
        assert_eq!(allocate(&voices, VoiceStealing::Oldest), Some(1));
    }

    #[test]
    fn releasing_voices_are_stolen_first() {
        let mut voices = pool(&[5, 1, 9]);
        voices[2].release();
        assert_eq!(allocate(&voices, VoiceStealing::OldestReleasing), Some(2));
        assert_eq!(allocate(&voices, VoiceStealing::Oldest), Some(2));
    }
}
