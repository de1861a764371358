/// Whether a note starts or stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEventKind {
    NoteOn,
    NoteOff,
}

/// A note event placed at a sample offset inside the current block.
///
/// `pitch` is a semitone number (69 = A4). Events outside the MIDI range
/// 0..=127 are accepted here and ignored by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    pub kind: NoteEventKind,
    pub pitch: i32,
    pub velocity: f32,
    pub offset: usize,
}

impl NoteEvent {
    pub fn note_on(pitch: i32, velocity: f32, offset: usize) -> Self {
        Self {
            kind: NoteEventKind::NoteOn,
            pitch,
            velocity,
            offset,
        }
    }

    pub fn note_off(pitch: i32, offset: usize) -> Self {
        Self {
            kind: NoteEventKind::NoteOff,
            pitch,
            velocity: 0.0,
            offset,
        }
    }
}

/// Convert an integer pitch to a MIDI note, rejecting anything outside 0..=127.
pub(crate) fn midi_pitch(pitch: i32) -> Option<u8> {
    u8::try_from(pitch).ok().filter(|p| *p <= 127)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_range_is_midi() {
        assert_eq!(midi_pitch(0), Some(0));
        assert_eq!(midi_pitch(127), Some(127));
        assert_eq!(midi_pitch(128), None);
        assert_eq!(midi_pitch(-1), None);
    }
}
