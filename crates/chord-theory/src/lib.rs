//! Chord, key, and progression inference over the 12-tone pitch-class space.
//!
//! Everything here is a pure function of its inputs and a handful of fixed
//! static tables (chord formulas, scale tables, the progression catalog).
//! There is no I/O and no shared mutable state; concurrent callers need no
//! locking, and recomputation always yields identical results. "Cannot
//! determine" conditions come back as empty collections or `None`, never as
//! errors — the only fallible surface is parsing symbols from text.
//!
//! # Example
//!
//! ```
//! use chord_theory::{chord_notes, note_name, Chord, ChordQuality};
//!
//! let c = Chord::new(0, ChordQuality::Major);
//! let names: Vec<&str> = chord_notes(c)
//!     .iter()
//!     .map(|n| note_name(n.pitch_class, false))
//!     .collect();
//! assert_eq!(names, ["C", "E", "G"]);
//! ```

pub mod key;
pub mod notes;
pub mod progression;
pub mod types;

pub use key::{
    all_keys, diatonic_chords, is_chord_in_key, relative_chords, roman_numeral,
    roman_numeral_in_key, DiatonicChord, Key, KeyMode,
};
pub use notes::{chord_notes, playback_midi_notes};
pub use progression::{
    detect_pattern, find_compatible_keys, score_candidate, ChordCompatibility, CommonProgression,
    COMMON_PROGRESSIONS, NO_KEY_SCORE,
};
pub use types::{note_name, parse_note, Chord, ChordQuality, Interval, NoteWithInterval, ParseError};
