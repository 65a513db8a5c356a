use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::key::{all_keys, is_chord_in_key, roman_numeral_in_key, Key};
use crate::types::Chord;

/// Score reported when the current selection fits no key at all.
/// Non-zero so chromatic suggestions stay visible in a ranked list.
pub const NO_KEY_SCORE: f64 = 0.35;

/// How well a candidate chord fits the keys implied by a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordCompatibility {
    /// 0..=1, or the fixed `NO_KEY_SCORE` fallback.
    pub score: f64,
    pub matching_keys: Vec<String>,
    pub key_count: usize,
}

/// A named Roman-numeral pattern with a genre tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommonProgression {
    pub name: &'static str,
    pub numerals: &'static [&'static str],
    pub genre: &'static str,
}

/// Catalog of recognized progressions. Matching is case-insensitive and
/// rotation-aware, so patterns sharing a cyclic class with an earlier
/// entry would never be reported; every entry here is cyclically distinct.
pub static COMMON_PROGRESSIONS: &[CommonProgression] = &[
    CommonProgression {
        name: "Pop Progression",
        numerals: &["I", "V", "vi", "IV"],
        genre: "Pop",
    },
    CommonProgression {
        name: "50s Progression",
        numerals: &["I", "vi", "IV", "V"],
        genre: "Doo-wop",
    },
    CommonProgression {
        name: "Basic Blues",
        numerals: &["I", "IV", "V"],
        genre: "Blues",
    },
    CommonProgression {
        name: "Jazz Turnaround",
        numerals: &["ii", "V", "I"],
        genre: "Jazz",
    },
    CommonProgression {
        name: "Canon Progression",
        numerals: &["I", "V", "vi", "iii", "IV", "I", "IV", "V"],
        genre: "Classical",
    },
    CommonProgression {
        name: "Andalusian Cadence",
        numerals: &["i", "VII", "VI", "V"],
        genre: "Flamenco",
    },
];

/// Keys containing every chord of the input.
///
/// An empty input yields an empty result: absence of constraints is not
/// universal compatibility, and callers special-case short progressions.
pub fn find_compatible_keys(chords: &[Chord]) -> Vec<&'static Key> {
    if chords.is_empty() {
        return Vec::new();
    }
    all_keys()
        .iter()
        .filter(|key| chords.iter().all(|&chord| is_chord_in_key(chord, key)))
        .collect()
}

/// Score a candidate chord against the already-selected progression.
///
/// The score is the fraction of still-plausible keys that would accept the
/// candidate next. An empty selection imposes no constraint (score 1);
/// a selection no key can unify falls back to `NO_KEY_SCORE`.
pub fn score_candidate(candidate: Chord, selected: &[Chord]) -> ChordCompatibility {
    if selected.is_empty() {
        let matching_keys: Vec<String> = all_keys()
            .iter()
            .filter(|key| is_chord_in_key(candidate, key))
            .map(Key::name)
            .collect();
        return ChordCompatibility {
            score: 1.0,
            key_count: matching_keys.len(),
            matching_keys,
        };
    }

    let compatible = find_compatible_keys(selected);
    if compatible.is_empty() {
        debug!(
            candidate = %candidate.symbol(),
            "selection fits no key, using chromatic fallback score"
        );
        return ChordCompatibility {
            score: NO_KEY_SCORE,
            matching_keys: Vec::new(),
            key_count: 0,
        };
    }

    let matching: Vec<&Key> = compatible
        .iter()
        .filter(|key| is_chord_in_key(candidate, key))
        .copied()
        .collect();
    ChordCompatibility {
        score: matching.len() as f64 / compatible.len() as f64,
        key_count: matching.len(),
        matching_keys: matching.iter().map(|key| key.name()).collect(),
    }
}

/// Lowercased, degree-mark-stripped form used for pattern comparison.
fn normalize(numeral: &str) -> String {
    numeral.replace('°', "").to_lowercase()
}

/// Does the input's prefix equal the pattern or any cyclic rotation of it?
fn matches_pattern(input: &[String], pattern: &[&str]) -> bool {
    let len = pattern.len();
    if input.len() < len {
        return false;
    }
    (0..len).any(|rotation| {
        (0..len).all(|i| input[i] == normalize(pattern[(i + rotation) % len]))
    })
}

/// Match a progression against the catalog of named patterns.
///
/// Needs at least 3 chords. Keys are tried in `all_keys` order; a key where
/// any chord fails to resolve is skipped whole. The first (key, pattern)
/// pair that matches wins — an implementation-defined tie-break when the
/// same input satisfies several.
pub fn detect_pattern(chords: &[Chord]) -> Option<&'static CommonProgression> {
    if chords.len() < 3 {
        return None;
    }

    for key in all_keys() {
        let mut numerals = Vec::with_capacity(chords.len());
        let resolved = chords.iter().all(|&chord| {
            match roman_numeral_in_key(chord, key.tonic, key.mode) {
                Some(numeral) => {
                    numerals.push(normalize(numeral));
                    true
                }
                None => false,
            }
        });
        if !resolved {
            continue;
        }

        for pattern in COMMON_PROGRESSIONS {
            if matches_pattern(&numerals, pattern.numerals) {
                debug!(key = %key.name(), pattern = pattern.name, "progression pattern matched");
                return Some(pattern);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChordQuality;
    use pretty_assertions::assert_eq;

    fn chord(symbol: &str) -> Chord {
        symbol.parse().unwrap()
    }

    #[test]
    fn empty_input_yields_no_keys() {
        assert!(find_compatible_keys(&[]).is_empty());
    }

    #[test]
    fn single_c_major_chord_keys() {
        let keys = find_compatible_keys(&[chord("C")]);
        let names: Vec<String> = keys.iter().map(|k| k.name()).collect();
        // C major triad is diatonic to three major keys and three minor keys
        assert_eq!(keys.len(), 6);
        assert!(names.contains(&"C major".to_string()));
        assert!(names.contains(&"F major".to_string()));
        assert!(names.contains(&"G major".to_string()));
        assert!(names.contains(&"A minor".to_string()));
    }

    #[test]
    fn adding_chords_never_widens_the_key_set() {
        let one = find_compatible_keys(&[chord("C")]);
        let two = find_compatible_keys(&[chord("C"), chord("G")]);
        assert!(two.len() <= one.len());
        for key in &two {
            assert!(one.iter().any(|k| k.tonic == key.tonic && k.mode == key.mode));
        }
    }

    #[test]
    fn empty_selection_scores_one() {
        for quality in ChordQuality::ALL {
            let result = score_candidate(Chord::new(3, quality), &[]);
            assert_eq!(result.score, 1.0);
        }
    }

    #[test]
    fn chromatic_selection_falls_back() {
        // C major and C# major share no key
        let result = score_candidate(chord("G"), &[chord("C"), chord("C#")]);
        assert_eq!(result.score, NO_KEY_SCORE);
        assert_eq!(result.key_count, 0);
        assert!(result.matching_keys.is_empty());
    }

    #[test]
    fn score_is_fraction_of_surviving_keys() {
        let selected = [chord("C"), chord("G")];
        let compatible = find_compatible_keys(&selected);
        let result = score_candidate(chord("Am"), &selected);
        assert_eq!(result.key_count, result.matching_keys.len());
        assert!(result.score > 0.0 && result.score <= 1.0);
        assert_eq!(
            result.score,
            result.key_count as f64 / compatible.len() as f64
        );
        // F# major fits none of the C/G-compatible keys
        let outsider = score_candidate(chord("F#"), &selected);
        assert_eq!(outsider.score, 0.0);
    }

    #[test]
    fn too_short_progressions_are_ignored() {
        assert_eq!(detect_pattern(&[]), None);
        assert_eq!(detect_pattern(&[chord("C"), chord("G")]), None);
    }

    #[test]
    fn pop_progression_detected() {
        let result = detect_pattern(&[chord("C"), chord("G"), chord("Am"), chord("F")]);
        assert_eq!(result.map(|p| p.name), Some("Pop Progression"));
    }

    #[test]
    fn i_vi_iv_v_is_not_the_pop_progression() {
        // Same chords as I-V-vi-IV but in 50s order; no rotation of the
        // pop pattern lines up with it.
        let result = detect_pattern(&[chord("C"), chord("Am"), chord("F"), chord("G")]);
        assert_eq!(result.map(|p| p.name), Some("50s Progression"));
    }

    #[test]
    fn jazz_turnaround_with_seventh_chords() {
        let result = detect_pattern(&[chord("Dm7"), chord("G7"), chord("Cmaj7")]);
        assert_eq!(result.map(|p| p.name), Some("Jazz Turnaround"));
    }

    #[test]
    fn andalusian_cadence_in_natural_minor() {
        // E major would fail to resolve in A natural minor; Em keeps the
        // whole progression diatonic and matches case-insensitively.
        let result = detect_pattern(&[chord("Am"), chord("G"), chord("F"), chord("Em")]);
        assert_eq!(result.map(|p| p.name), Some("Andalusian Cadence"));
    }

    #[test]
    fn unrecognized_progression_returns_none() {
        let result = detect_pattern(&[chord("C"), chord("Dm"), chord("Em")]);
        assert_eq!(result, None);
    }
}
