use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const NOTE_NAMES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const NOTE_NAMES_FLAT: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Display name for a pitch class 0–11. Sharp spellings are the canonical
/// internal form; flats are a display alternative only.
pub fn note_name(pitch_class: u8, use_flats: bool) -> &'static str {
    let idx = (pitch_class % 12) as usize;
    if use_flats {
        NOTE_NAMES_FLAT[idx]
    } else {
        NOTE_NAMES_SHARP[idx]
    }
}

/// Parse a note name ("C", "F#", "Bb") into a pitch class 0–11.
pub fn parse_note(s: &str) -> Result<u8, ParseError> {
    let both = NOTE_NAMES_SHARP
        .iter()
        .chain(NOTE_NAMES_FLAT.iter())
        .position(|&n| n == s);
    match both {
        Some(idx) => Ok((idx % 12) as u8),
        None => Err(ParseError::UnknownNote(s.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown note name: {0}")]
    UnknownNote(String),
    #[error("unknown chord quality: {0}")]
    UnknownQuality(String),
    #[error("empty chord symbol")]
    EmptySymbol,
}

/// The eight chord qualities this engine understands. Closed set; every
/// quality binds a display suffix and an interval formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Dominant7,
    Minor7,
    Major7,
    Diminished7,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 8] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Dominant7,
        ChordQuality::Minor7,
        ChordQuality::Major7,
        ChordQuality::Diminished7,
    ];

    /// Ascending semitone offsets from the root.
    pub fn formula(&self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Diminished7 => &[0, 3, 6, 9],
        }
    }

    /// Suffix for chord symbol display.
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Diminished7 => "dim7",
        }
    }

    /// Full display name.
    pub fn name(&self) -> &'static str {
        match self {
            ChordQuality::Major => "Major",
            ChordQuality::Minor => "minor",
            ChordQuality::Diminished => "diminished",
            ChordQuality::Augmented => "augmented",
            ChordQuality::Dominant7 => "Dominant 7th",
            ChordQuality::Minor7 => "minor 7th",
            ChordQuality::Major7 => "Major 7th",
            ChordQuality::Diminished7 => "diminished 7th",
        }
    }

    /// Qualities built on a minor or diminished third. Picks the
    /// natural-minor scale when a chord is treated as its own tonic.
    pub fn is_minor_family(&self) -> bool {
        matches!(
            self,
            ChordQuality::Minor
                | ChordQuality::Minor7
                | ChordQuality::Diminished
                | ChordQuality::Diminished7
        )
    }
}

impl FromStr for ChordQuality {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "maj" | "M" => Ok(ChordQuality::Major),
            "m" | "min" => Ok(ChordQuality::Minor),
            "dim" | "°" => Ok(ChordQuality::Diminished),
            "aug" | "+" => Ok(ChordQuality::Augmented),
            "7" => Ok(ChordQuality::Dominant7),
            "m7" | "min7" => Ok(ChordQuality::Minor7),
            "maj7" | "M7" => Ok(ChordQuality::Major7),
            "dim7" | "°7" => Ok(ChordQuality::Diminished7),
            other => Err(ParseError::UnknownQuality(other.to_string())),
        }
    }
}

/// Interval label for a chord tone, measured from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    Root,
    Minor3,
    Major3,
    Diminished5,
    Perfect5,
    Augmented5,
    Minor7,
    Major7,
}

impl Interval {
    /// Label an interval by semitone distance from the root.
    ///
    /// 9 semitones maps to a diminished 5th because diminished-7th chords
    /// reuse that label for the double-flat 7th. Offsets outside the table
    /// fall back to Root; this is a documented fallback, not a precision
    /// guarantee.
    pub fn from_semitones(semitones: u8) -> Interval {
        match semitones % 12 {
            0 => Interval::Root,
            3 => Interval::Minor3,
            4 => Interval::Major3,
            6 => Interval::Diminished5,
            7 => Interval::Perfect5,
            8 => Interval::Augmented5,
            9 => Interval::Diminished5,
            10 => Interval::Minor7,
            11 => Interval::Major7,
            _ => Interval::Root,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Interval::Root => "Root",
            Interval::Minor3 => "Minor 3rd",
            Interval::Major3 => "Major 3rd",
            Interval::Diminished5 => "Diminished 5th",
            Interval::Perfect5 => "Perfect 5th",
            Interval::Augmented5 => "Augmented 5th",
            Interval::Minor7 => "Minor 7th",
            Interval::Major7 => "Major 7th",
        };
        write!(f, "{}", s)
    }
}

/// A chord is just (root pitch class, quality). Value type; two chords are
/// equal iff both fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chord {
    /// Pitch class 0–11 (C=0, C#=1, ...)
    pub root: u8,
    pub quality: ChordQuality,
}

impl Chord {
    pub fn new(root: u8, quality: ChordQuality) -> Self {
        Chord {
            root: root % 12,
            quality,
        }
    }

    /// Chord symbol for display: "C", "Am", "G7", "C#dim7".
    pub fn symbol(&self) -> String {
        format!("{}{}", note_name(self.root, false), self.quality.suffix())
    }
}

impl FromStr for Chord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::EmptySymbol);
        }
        // Two-character note names ("C#", "Bb") take precedence over one.
        let (note, rest) = match s.get(..2) {
            Some(head) if head.ends_with('#') || head.ends_with('b') => (head, &s[2..]),
            _ => {
                let head = s
                    .get(..1)
                    .ok_or_else(|| ParseError::UnknownNote(s.to_string()))?;
                (head, &s[1..])
            }
        };
        let root = parse_note(note)?;
        let quality = rest.parse()?;
        Ok(Chord { root, quality })
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A resolved chord tone. Computed on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteWithInterval {
    pub pitch_class: u8,
    /// Display octave; defaults to 4 (the octave around middle C).
    pub octave: u8,
    pub interval: Interval,
    /// Root-relative MIDI number anchored at middle C. Ascends through the
    /// formula, so it can exceed one octave above the root.
    pub midi: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_quality_has_root_first_formula() {
        for quality in ChordQuality::ALL {
            let formula = quality.formula();
            assert_eq!(formula[0], 0, "{:?} formula must start at the root", quality);
            assert!(formula.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn interval_table() {
        assert_eq!(Interval::from_semitones(0), Interval::Root);
        assert_eq!(Interval::from_semitones(3), Interval::Minor3);
        assert_eq!(Interval::from_semitones(4), Interval::Major3);
        assert_eq!(Interval::from_semitones(6), Interval::Diminished5);
        assert_eq!(Interval::from_semitones(7), Interval::Perfect5);
        assert_eq!(Interval::from_semitones(8), Interval::Augmented5);
        // dim7 chords reuse the diminished 5th label for 9 semitones
        assert_eq!(Interval::from_semitones(9), Interval::Diminished5);
        assert_eq!(Interval::from_semitones(10), Interval::Minor7);
        assert_eq!(Interval::from_semitones(11), Interval::Major7);
        // documented fallback for unmapped offsets
        assert_eq!(Interval::from_semitones(1), Interval::Root);
        assert_eq!(Interval::from_semitones(5), Interval::Root);
    }

    #[test]
    fn chord_symbols() {
        assert_eq!(Chord::new(0, ChordQuality::Major).symbol(), "C");
        assert_eq!(Chord::new(9, ChordQuality::Minor).symbol(), "Am");
        assert_eq!(Chord::new(7, ChordQuality::Dominant7).symbol(), "G7");
        assert_eq!(Chord::new(1, ChordQuality::Diminished7).symbol(), "C#dim7");
    }

    #[test]
    fn parse_chord_symbols() {
        assert_eq!("C".parse(), Ok(Chord::new(0, ChordQuality::Major)));
        assert_eq!("Am".parse(), Ok(Chord::new(9, ChordQuality::Minor)));
        assert_eq!("F#m7".parse(), Ok(Chord::new(6, ChordQuality::Minor7)));
        assert_eq!("Bbmaj7".parse(), Ok(Chord::new(10, ChordQuality::Major7)));
        assert_eq!("G7".parse(), Ok(Chord::new(7, ChordQuality::Dominant7)));
        assert!("H".parse::<Chord>().is_err());
        assert!("Cx9".parse::<Chord>().is_err());
        assert!("".parse::<Chord>().is_err());
    }

    #[test]
    fn note_names_round_trip() {
        for pc in 0..12u8 {
            assert_eq!(parse_note(note_name(pc, false)), Ok(pc));
            assert_eq!(parse_note(note_name(pc, true)), Ok(pc));
        }
    }

    #[test]
    fn root_normalized_mod_12() {
        assert_eq!(Chord::new(12, ChordQuality::Major).root, 0);
        assert_eq!(Chord::new(14, ChordQuality::Minor).root, 2);
    }
}
