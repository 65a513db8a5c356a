use chord_theory::{chord_notes, Chord, ChordQuality, Interval};
use serde::{Deserialize, Serialize};

use crate::{midi_at_fret, note_at_fret, STRING_COUNT};

/// A curated fingering for one (root, quality) combination.
///
/// Frets run high E to low E; -1 is muted, 0 is open. `start_fret` is 0 for
/// open-position forms, otherwise the barre position.
struct VoicingDefinition {
    root: u8,
    quality: ChordQuality,
    name: &'static str,
    start_fret: u8,
    frets: [i8; STRING_COUNT],
}

const fn def(
    root: u8,
    quality: ChordQuality,
    name: &'static str,
    start_fret: u8,
    frets: [i8; STRING_COUNT],
) -> VoicingDefinition {
    VoicingDefinition {
        root,
        quality,
        name,
        start_fret,
        frets,
    }
}

use ChordQuality::{Diminished, Dominant7, Major, Minor};

/// The voicing catalog. Per chord: open position first, then barre forms
/// by ascending start fret. Absence of a chord here is valid; lookups fall
/// back to a single root marker.
static CATALOG: &[VoicingDefinition] = &[
    // C major
    def(0, Major, "Open", 0, [0, 1, 0, 2, 3, -1]),
    def(0, Major, "A Shape Barre", 3, [3, 5, 5, 5, 3, -1]),
    def(0, Major, "E Shape Barre", 8, [8, 8, 9, 10, 10, 8]),
    // G major
    def(7, Major, "Open", 0, [3, 3, 0, 0, 2, 3]),
    def(7, Major, "E Shape Barre", 3, [3, 3, 4, 5, 5, 3]),
    // D major
    def(2, Major, "Open", 0, [2, 3, 2, 0, -1, -1]),
    def(2, Major, "A Shape Barre", 5, [5, 7, 7, 7, 5, -1]),
    // A major
    def(9, Major, "Open", 0, [0, 2, 2, 2, 0, -1]),
    def(9, Major, "E Shape Barre", 5, [5, 5, 6, 7, 7, 5]),
    // E major
    def(4, Major, "Open", 0, [0, 0, 1, 2, 2, 0]),
    def(4, Major, "A Shape Barre", 7, [7, 9, 9, 9, 7, -1]),
    // F major has no open form
    def(5, Major, "E Shape Barre", 1, [1, 1, 2, 3, 3, 1]),
    def(5, Major, "A Shape Barre", 8, [8, 10, 10, 10, 8, -1]),
    // A minor
    def(9, Minor, "Open", 0, [0, 1, 2, 2, 0, -1]),
    def(9, Minor, "E Shape Barre", 5, [5, 5, 5, 7, 7, 5]),
    // E minor
    def(4, Minor, "Open", 0, [0, 0, 0, 2, 2, 0]),
    def(4, Minor, "A Shape Barre", 7, [7, 8, 9, 9, 7, -1]),
    // D minor
    def(2, Minor, "Open", 0, [1, 3, 2, 0, -1, -1]),
    def(2, Minor, "A Shape Barre", 5, [5, 6, 7, 7, 5, -1]),
    // C7
    def(0, Dominant7, "Open", 0, [0, 1, 3, 2, 3, -1]),
    def(0, Dominant7, "A Shape Barre", 3, [3, 5, 3, 5, 3, -1]),
    // G7
    def(7, Dominant7, "Open", 0, [1, 0, 0, 0, 2, 3]),
    def(7, Dominant7, "E Shape Barre", 3, [3, 3, 4, 3, 5, 3]),
    // D7
    def(2, Dominant7, "Open", 0, [2, 1, 2, 0, -1, -1]),
    def(2, Dominant7, "A Shape Barre", 5, [5, 7, 5, 7, 5, -1]),
    // A7
    def(9, Dominant7, "Open", 0, [0, 2, 0, 2, 0, -1]),
    def(9, Dominant7, "E Shape Barre", 5, [5, 5, 6, 5, 7, 5]),
    // E7
    def(4, Dominant7, "Open", 0, [0, 0, 1, 0, 2, 0]),
    def(4, Dominant7, "A Shape Barre", 7, [7, 9, 7, 9, 7, -1]),
    // B diminished
    def(11, Diminished, "Open", 2, [-1, 3, 4, 3, 2, -1]),
];

/// One sounded note within a voicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FretPosition {
    /// 0 = high E, 5 = low E
    pub string: u8,
    pub fret: u8,
    pub interval: Interval,
    pub midi: u8,
}

/// A fingering resolved against a chord's note set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voicing {
    pub name: String,
    pub start_fret: u8,
    pub positions: Vec<FretPosition>,
}

/// All catalog voicings for a chord, in catalog order.
///
/// Chords without a catalog entry get a single synthetic root marker on the
/// low E string, so every chord has something renderable.
pub fn all_voicings(chord: Chord) -> Vec<Voicing> {
    let voicings: Vec<Voicing> = CATALOG
        .iter()
        .filter(|d| d.root == chord.root && d.quality == chord.quality)
        .map(|d| resolve_definition(d, chord))
        .collect();
    if voicings.is_empty() {
        vec![fallback_voicing(chord)]
    } else {
        voicings
    }
}

/// The first (typically open or lowest-position) voicing for a chord.
pub fn chord_voicing(chord: Chord) -> Voicing {
    all_voicings(chord).swap_remove(0)
}

fn fallback_voicing(chord: Chord) -> Voicing {
    let fret = chord.root % 12;
    Voicing {
        name: "Root Only".to_string(),
        start_fret: fret,
        positions: vec![FretPosition {
            string: 5,
            fret,
            interval: Interval::Root,
            midi: midi_at_fret(5, fret),
        }],
    }
}

/// Convert raw fret numbers into annotated positions.
///
/// Muted strings are skipped. A sounded pitch class outside the chord's
/// note set is dropped silently: curated fingerings are ground truth and
/// occasionally voice non-strict chord tones. Interval labels come from
/// the pitch distance to the root, not the formula index, so coinciding
/// tones still label correctly.
fn resolve_definition(def: &VoicingDefinition, chord: Chord) -> Voicing {
    let tones: Vec<u8> = chord_notes(chord).iter().map(|n| n.pitch_class).collect();
    let mut positions = Vec::with_capacity(STRING_COUNT);
    for (string, &fret) in def.frets.iter().enumerate() {
        if fret < 0 {
            continue;
        }
        let fret = fret as u8;
        let pitch_class = note_at_fret(string, fret);
        if !tones.contains(&pitch_class) {
            continue;
        }
        let distance = (pitch_class + 12 - chord.root) % 12;
        positions.push(FretPosition {
            string: string as u8,
            fret,
            interval: Interval::from_semitones(distance),
            midi: midi_at_fret(string, fret),
        });
    }
    Voicing {
        name: def.name.to_string(),
        start_fret: def.start_fret,
        positions,
    }
}
