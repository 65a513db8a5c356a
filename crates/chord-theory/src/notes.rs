use crate::types::{Chord, Interval, NoteWithInterval};

/// Resolve a chord into its ordered note list.
///
/// One entry per formula offset, root first. Pitch classes wrap mod 12;
/// MIDI numbers ascend from middle C plus the root, so upper chord tones
/// land above the root rather than folding back into one octave.
pub fn chord_notes(chord: Chord) -> Vec<NoteWithInterval> {
    chord
        .quality
        .formula()
        .iter()
        .map(|&offset| NoteWithInterval {
            pitch_class: (chord.root + offset) % 12,
            octave: 4,
            interval: Interval::from_semitones(offset),
            midi: 60 + chord.root + offset,
        })
        .collect()
}

/// MIDI numbers for audibly previewing a chord, voiced from `base_octave`.
///
/// Data contract for the audio collaborator; no synthesis happens here.
pub fn playback_midi_notes(chord: Chord, base_octave: u8) -> Vec<u8> {
    let base = 12 * (base_octave + 1);
    chord
        .quality
        .formula()
        .iter()
        .map(|&offset| base + chord.root + offset)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{note_name, ChordQuality};
    use pretty_assertions::assert_eq;

    #[test]
    fn c_major_resolves_to_c_e_g() {
        let notes = chord_notes(Chord::new(0, ChordQuality::Major));
        let names: Vec<&str> = notes.iter().map(|n| note_name(n.pitch_class, false)).collect();
        assert_eq!(names, ["C", "E", "G"]);
        let intervals: Vec<Interval> = notes.iter().map(|n| n.interval).collect();
        assert_eq!(
            intervals,
            [Interval::Root, Interval::Major3, Interval::Perfect5]
        );
    }

    #[test]
    fn closure_over_all_roots_and_qualities() {
        for root in 0..12u8 {
            for quality in ChordQuality::ALL {
                let chord = Chord::new(root, quality);
                let notes = chord_notes(chord);
                assert_eq!(notes.len(), quality.formula().len());
                for note in &notes {
                    assert!(note.pitch_class < 12);
                }
            }
        }
    }

    #[test]
    fn transposition_shifts_every_note_by_one_semitone() {
        for root in 0..12u8 {
            for quality in ChordQuality::ALL {
                let original = chord_notes(Chord::new(root, quality));
                let transposed = chord_notes(Chord::new((root + 1) % 12, quality));
                for (a, b) in original.iter().zip(transposed.iter()) {
                    assert_eq!(a.interval, b.interval);
                    assert_eq!((a.pitch_class + 1) % 12, b.pitch_class);
                }
            }
        }
    }

    #[test]
    fn midi_numbers_ascend_from_middle_c() {
        let notes = chord_notes(Chord::new(11, ChordQuality::Major7));
        let midi: Vec<u8> = notes.iter().map(|n| n.midi).collect();
        // B root: 60 + 11 + each of [0, 4, 7, 11]
        assert_eq!(midi, [71, 75, 78, 82]);
        assert!(midi.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn playback_notes_voiced_in_requested_octave() {
        // C major from octave 3: C3 E3 G3
        let notes = playback_midi_notes(Chord::new(0, ChordQuality::Major), 3);
        assert_eq!(notes, [48, 52, 55]);
        // G7 from octave 3: G3 B3 D4 F4
        let g7 = playback_midi_notes(Chord::new(7, ChordQuality::Dominant7), 3);
        assert_eq!(g7, [55, 59, 62, 65]);
    }
}
