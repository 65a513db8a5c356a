//! Guitar fretboard mapping: curated chord voicings and CAGED shapes.
//!
//! Strings are indexed 0 = high E through 5 = low E, matching the order
//! voicing definitions are written in. Standard tuning only.
//!
//! # Example
//!
//! ```
//! use chord_theory::{Chord, ChordQuality};
//! use fretboard::all_voicings;
//!
//! let g = Chord::new(7, ChordQuality::Major);
//! let voicings = all_voicings(g);
//! assert_eq!(voicings[0].name, "Open");
//! assert_eq!(voicings[0].start_fret, 0);
//! ```

pub mod caged;
pub mod voicings;

pub use caged::{caged_shapes, shape_voicing, CagedShape, ShapeName};
pub use voicings::{all_voicings, chord_voicing, FretPosition, Voicing};

pub const STRING_COUNT: usize = 6;

/// Open-string pitch classes, high E down to low E.
pub const OPEN_STRING_PITCHES: [u8; STRING_COUNT] = [4, 11, 7, 2, 9, 4];

/// Open-string MIDI numbers, high E4 down to low E2.
pub const OPEN_STRING_MIDI: [u8; STRING_COUNT] = [64, 59, 55, 50, 45, 40];

/// Pitch class sounding at a fret on a string.
pub fn note_at_fret(string: usize, fret: u8) -> u8 {
    (OPEN_STRING_PITCHES[string] + fret) % 12
}

/// MIDI number sounding at a fret on a string.
pub fn midi_at_fret(string: usize, fret: u8) -> u8 {
    OPEN_STRING_MIDI[string] + fret
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn open_strings_are_their_own_notes() {
        for string in 0..STRING_COUNT {
            assert_eq!(note_at_fret(string, 0), OPEN_STRING_PITCHES[string]);
            assert_eq!(note_at_fret(string, 12), OPEN_STRING_PITCHES[string]);
        }
    }

    #[test]
    fn fifth_fret_tuning_check() {
        // Fretting a string at the fifth fret sounds the next string up,
        // except on the G string where it is the fourth fret.
        assert_eq!(note_at_fret(5, 5), OPEN_STRING_PITCHES[4]);
        assert_eq!(note_at_fret(4, 5), OPEN_STRING_PITCHES[3]);
        assert_eq!(note_at_fret(3, 5), OPEN_STRING_PITCHES[2]);
        assert_eq!(note_at_fret(2, 4), OPEN_STRING_PITCHES[1]);
        assert_eq!(note_at_fret(1, 5), OPEN_STRING_PITCHES[0]);
    }

    #[test]
    fn midi_matches_pitch_class() {
        for string in 0..STRING_COUNT {
            for fret in 0..15 {
                assert_eq!(midi_at_fret(string, fret) % 12, note_at_fret(string, fret));
            }
        }
    }
}
