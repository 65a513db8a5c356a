use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::types::{note_name, Chord, ChordQuality};

const MAJOR_SCALE_INTERVALS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
const MAJOR_SCALE_QUALITIES: [ChordQuality; 7] = [
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Minor,
    ChordQuality::Major,
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Diminished,
];
const MAJOR_NUMERALS: [&str; 7] = ["I", "ii", "iii", "IV", "V", "vi", "vii°"];

const MINOR_SCALE_INTERVALS: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];
const MINOR_SCALE_QUALITIES: [ChordQuality; 7] = [
    ChordQuality::Minor,
    ChordQuality::Diminished,
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Minor,
    ChordQuality::Major,
    ChordQuality::Major,
];
const MINOR_NUMERALS: [&str; 7] = ["i", "ii°", "III", "iv", "v", "VI", "VII"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    Major,
    Minor,
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMode::Major => write!(f, "major"),
            KeyMode::Minor => write!(f, "minor"),
        }
    }
}

fn mode_tables(mode: KeyMode) -> (&'static [u8; 7], &'static [ChordQuality; 7], &'static [&'static str; 7]) {
    match mode {
        KeyMode::Major => (&MAJOR_SCALE_INTERVALS, &MAJOR_SCALE_QUALITIES, &MAJOR_NUMERALS),
        KeyMode::Minor => (&MINOR_SCALE_INTERVALS, &MINOR_SCALE_QUALITIES, &MINOR_NUMERALS),
    }
}

/// A scale-degree chord with its Roman numeral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiatonicChord {
    pub chord: Chord,
    pub numeral: &'static str,
}

/// The seven diatonic chords of a major or natural-minor scale.
pub fn diatonic_chords(tonic: u8, mode: KeyMode) -> [DiatonicChord; 7] {
    let (intervals, qualities, numerals) = mode_tables(mode);
    std::array::from_fn(|i| DiatonicChord {
        chord: Chord::new((tonic + intervals[i]) % 12, qualities[i]),
        numeral: numerals[i],
    })
}

/// The seven diatonic neighbors of a chord.
///
/// The chord's own root is treated as the tonic: a minor-family chord gets
/// its natural-minor scale, anything else the major scale. This does not
/// locate the true key center of a progression; it is a deliberate
/// single-chord-exploration approximation.
pub fn relative_chords(chord: Chord) -> [Chord; 7] {
    let mode = if chord.quality.is_minor_family() {
        KeyMode::Minor
    } else {
        KeyMode::Major
    };
    diatonic_chords(chord.root, mode).map(|dc| dc.chord)
}

/// Roman numeral of a chord considered as its own tonic.
///
/// Always the tonic numeral of the family scale ("I" or "i") by
/// construction; `roman_numeral_in_key` is the key-aware operation.
pub fn roman_numeral(chord: Chord) -> &'static str {
    let mode = if chord.quality.is_minor_family() {
        KeyMode::Minor
    } else {
        KeyMode::Major
    };
    mode_tables(mode).2[0]
}

/// Does `actual` fill a diatonic slot expecting `expected`?
///
/// Exact match, or one of the extended-chord equivalences: a 7th chord
/// counts as its underlying triad.
fn quality_matches(actual: ChordQuality, expected: ChordQuality) -> bool {
    actual == expected
        || matches!(
            (actual, expected),
            (ChordQuality::Dominant7, ChordQuality::Major)
                | (ChordQuality::Minor7, ChordQuality::Minor)
                | (ChordQuality::Major7, ChordQuality::Major)
                | (ChordQuality::Diminished7, ChordQuality::Diminished)
        )
}

/// Roman numeral of a chord within a given key, or `None` when the chord
/// is not diatonic to it.
pub fn roman_numeral_in_key(chord: Chord, key_root: u8, key_mode: KeyMode) -> Option<&'static str> {
    let (intervals, qualities, numerals) = mode_tables(key_mode);
    let interval = (chord.root + 12 - key_root % 12) % 12;
    let degree = intervals.iter().position(|&i| i == interval)?;
    if quality_matches(chord.quality, qualities[degree]) {
        Some(numerals[degree])
    } else {
        None
    }
}

/// One of the 24 keys, with its derived diatonic chord set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Key {
    pub tonic: u8,
    pub mode: KeyMode,
    pub chords: [DiatonicChord; 7],
}

impl Key {
    pub fn name(&self) -> String {
        format!("{} {}", note_name(self.tonic, false), self.mode)
    }
}

/// All 24 keys (12 tonics × 2 modes), major before minor per tonic.
/// Computed once; immutable thereafter.
pub fn all_keys() -> &'static [Key] {
    static KEYS: OnceLock<Vec<Key>> = OnceLock::new();
    KEYS.get_or_init(|| {
        let mut keys = Vec::with_capacity(24);
        for tonic in 0..12u8 {
            for mode in [KeyMode::Major, KeyMode::Minor] {
                keys.push(Key {
                    tonic,
                    mode,
                    chords: diatonic_chords(tonic, mode),
                });
            }
        }
        keys
    })
}

/// True iff some diatonic chord of the key shares the candidate's root and
/// its quality matches exactly or via the extended-chord equivalences.
pub fn is_chord_in_key(chord: Chord, key: &Key) -> bool {
    key.chords
        .iter()
        .any(|dc| dc.chord.root == chord.root && quality_matches(chord.quality, dc.chord.quality))
}
