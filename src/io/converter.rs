use crate::{
    io::midi::MidiEvent,
    synth::{event::NoteEvent, message::SynthMessage},
};

/// Map note on/off on `channel_filter` to a control message.
///
/// A note-on with velocity 0 is a note-off, per the MIDI spec.
pub fn midi_to_synth(midi: MidiEvent, channel_filter: u8) -> Option<SynthMessage> {
    match midi {
        MidiEvent::NoteOn {
            channel,
            key,
            velocity,
        } if channel == channel_filter && velocity > 0 => Some(SynthMessage::NoteOn {
            note: key,
            velocity,
        }),
        MidiEvent::NoteOn {
            channel,
            key,
            velocity,
        }
        | MidiEvent::NoteOff {
            channel,
            key,
            velocity,
        } if channel == channel_filter => Some(SynthMessage::NoteOff {
            note: key,
            velocity,
        }),
        _ => None,
    }
}

/// Map note on/off on `channel_filter` to a timeline event at `offset`.
pub fn midi_to_note_event(midi: MidiEvent, channel_filter: u8, offset: usize) -> Option<NoteEvent> {
    match midi_to_synth(midi, channel_filter)? {
        SynthMessage::NoteOn { note, velocity } => Some(NoteEvent::note_on(
            note as i32,
            velocity_to_gain(velocity),
            offset,
        )),
        SynthMessage::NoteOff { note, .. } => Some(NoteEvent::note_off(note as i32, offset)),
        SynthMessage::AllNotesOff => None,
    }
}

/// Equal-tempered tuning, A4 = 440 Hz = MIDI note 69.
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// MIDI velocity 0..=127 to 0..1.
pub fn velocity_to_gain(velocity: u8) -> f32 {
    velocity.min(127) as f32 / 127.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::event::NoteEventKind;

    #[test]
    fn tuning_is_equal_tempered() {
        assert!((midi_note_to_freq(69) - 440.0).abs() < 1e-3);
        assert!((midi_note_to_freq(57) - 220.0).abs() < 1e-3);
        assert!((midi_note_to_freq(60) - 261.6256).abs() < 1e-2);

        for note in 0..=127u8 {
            let expected = 440.0 * 2f64.powf((note as f64 - 69.0) / 12.0);
            let actual = midi_note_to_freq(note) as f64;
            assert!((actual - expected).abs() / expected < 1e-5, "note {note}");
        }
    }

    #[test]
    fn zero_velocity_note_on_is_note_off() {
        let midi = MidiEvent::NoteOn { channel: 0, key: 60, velocity: 0 };
        let event = midi_to_note_event(midi, 0, 12).unwrap();
        assert_eq!(event.kind, NoteEventKind::NoteOff);
        assert_eq!(event.offset, 12);
    }

    #[test]
    fn other_channels_are_filtered() {
        let midi = MidiEvent::NoteOn { channel: 3, key: 60, velocity: 90 };
        assert_eq!(midi_to_synth(midi, 0), None);
        assert_eq!(
            midi_to_synth(midi, 3),
            Some(SynthMessage::NoteOn { note: 60, velocity: 90 })
        );
    }

    #[test]
    fn controllers_are_not_notes() {
        let midi = MidiEvent::ControlChange { channel: 0, controller: 7, value: 100 };
        assert_eq!(midi_to_note_event(midi, 0, 0), None);
    }

    #[test]
    fn full_velocity_is_unity_gain() {
        let midi = MidiEvent::NoteOn { channel: 0, key: 69, velocity: 127 };
        let event = midi_to_note_event(midi, 0, 0).unwrap();
        assert_eq!(event.velocity, 1.0);
        assert_eq!(event.pitch, 69);
    }
}
