use chord_theory::{Chord, ChordQuality, Interval};
use serde::{Deserialize, Serialize};

use crate::voicings::FretPosition;
use crate::{midi_at_fret, note_at_fret, OPEN_STRING_PITCHES, STRING_COUNT};

/// The five movable CAGED shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeName {
    C,
    A,
    G,
    E,
    D,
}

impl ShapeName {
    pub const ALL: [ShapeName; 5] = [
        ShapeName::C,
        ShapeName::A,
        ShapeName::G,
        ShapeName::E,
        ShapeName::D,
    ];

    /// Display color for fretboard diagrams.
    pub fn color(&self) -> &'static str {
        match self {
            ShapeName::C => "#3fb950",
            ShapeName::A => "#58a6ff",
            ShapeName::G => "#bc8cff",
            ShapeName::E => "#f85149",
            ShapeName::D => "#d29922",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ShapeName::C => "C shape, root on the A string. Mid-neck position.",
            ShapeName::A => "A shape, root on the A string. The most common barre form.",
            ShapeName::G => "G shape, root on the low E string. Wide finger stretch.",
            ShapeName::E => "E shape, root on the low E string. Foundation of barre chords.",
            ShapeName::D => "D shape, root on the D string. Focused on the top four strings.",
        }
    }
}

/// An open-position shape template. Pattern frets are relative to the base
/// position, high E to low E; `root_offset` is how many frets above the
/// base position the root lands on the root string.
struct ShapeTemplate {
    name: ShapeName,
    pattern: [i8; STRING_COUNT],
    root_string: usize,
    root_offset: u8,
}

static MAJOR_TEMPLATES: [ShapeTemplate; 5] = [
    ShapeTemplate {
        name: ShapeName::C,
        pattern: [0, 1, 0, 2, 3, -1],
        root_string: 4,
        root_offset: 3,
    },
    ShapeTemplate {
        name: ShapeName::A,
        pattern: [0, 2, 2, 2, 0, -1],
        root_string: 4,
        root_offset: 0,
    },
    ShapeTemplate {
        name: ShapeName::G,
        pattern: [3, 0, 0, 0, 2, 3],
        root_string: 5,
        root_offset: 3,
    },
    ShapeTemplate {
        name: ShapeName::E,
        pattern: [0, 0, 1, 2, 2, 0],
        root_string: 5,
        root_offset: 0,
    },
    ShapeTemplate {
        name: ShapeName::D,
        pattern: [2, 3, 2, 0, -1, -1],
        root_string: 3,
        root_offset: 0,
    },
];

static MINOR_TEMPLATES: [ShapeTemplate; 5] = [
    // The Cm form is uncommon; kept for shape continuity along the neck
    ShapeTemplate {
        name: ShapeName::C,
        pattern: [-1, 1, 0, 1, 3, -1],
        root_string: 4,
        root_offset: 3,
    },
    ShapeTemplate {
        name: ShapeName::A,
        pattern: [0, 1, 2, 2, 0, -1],
        root_string: 4,
        root_offset: 0,
    },
    // B string plays the 5th; the minor 3rd sits below the open B
    ShapeTemplate {
        name: ShapeName::G,
        pattern: [3, 3, 0, 0, 1, 3],
        root_string: 5,
        root_offset: 3,
    },
    ShapeTemplate {
        name: ShapeName::E,
        pattern: [0, 0, 0, 2, 2, 0],
        root_string: 5,
        root_offset: 0,
    },
    ShapeTemplate {
        name: ShapeName::D,
        pattern: [1, 3, 2, 0, -1, -1],
        root_string: 3,
        root_offset: 0,
    },
];

/// A shape placed at an absolute neck position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CagedShape {
    pub name: ShapeName,
    /// Base fret of the shape (0 = open position).
    pub base_fret: u8,
    /// Absolute frets, high E to low E; -1 muted.
    pub frets: [i8; STRING_COUNT],
    /// 0 = high E, 5 = low E
    pub root_string: u8,
}

/// Place all five CAGED shapes for a chord, sorted by ascending base fret.
///
/// Only the triad quality is reflected: minor and minor-7th chords use the
/// minor templates, everything else the major ones. Seventh and extension
/// tones never appear in these fingerings.
pub fn caged_shapes(chord: Chord) -> Vec<CagedShape> {
    let minor = matches!(chord.quality, ChordQuality::Minor | ChordQuality::Minor7);
    let templates = if minor {
        &MINOR_TEMPLATES
    } else {
        &MAJOR_TEMPLATES
    };

    let mut shapes: Vec<CagedShape> = templates
        .iter()
        .map(|template| {
            let open = OPEN_STRING_PITCHES[template.root_string];
            let root_fret = (chord.root + 12 - open) % 12;
            // Wrap below-the-nut placements up an octave
            let base_fret = if root_fret < template.root_offset {
                root_fret + 12 - template.root_offset
            } else {
                root_fret - template.root_offset
            };
            let frets = std::array::from_fn(|i| {
                if template.pattern[i] < 0 {
                    -1
                } else {
                    template.pattern[i] + base_fret as i8
                }
            });
            CagedShape {
                name: template.name,
                base_fret,
                frets,
                root_string: template.root_string as u8,
            }
        })
        .collect();

    shapes.sort_by_key(|shape| shape.base_fret);
    shapes
}

/// Annotated positions for rendering one placed shape.
///
/// Labels cover Root and the triad tones only; anything else falls back to
/// Root. CAGED is a triad system, so 7ths are not distinguished here.
pub fn shape_voicing(shape: &CagedShape, root: u8) -> Vec<FretPosition> {
    shape
        .frets
        .iter()
        .enumerate()
        .filter(|(_, &fret)| fret >= 0)
        .map(|(string, &fret)| {
            let fret = fret as u8;
            let distance = (note_at_fret(string, fret) + 12 - root % 12) % 12;
            let interval = match distance {
                0 => Interval::Root,
                3 => Interval::Minor3,
                4 => Interval::Major3,
                7 => Interval::Perfect5,
                _ => Interval::Root,
            };
            FretPosition {
                string: string as u8,
                fret,
                interval,
                midi: midi_at_fret(string, fret),
            }
        })
        .collect()
}
