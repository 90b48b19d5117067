//! Combo attack scoring. Pure functions: the terminal capture and the clock
//! live in the presentation layer, this module only grades what came back.

use rand::Rng;

use crate::core::constants::*;

/// How a combo attempt graded out. Checked strictly in this order: a late
/// submission scores nothing no matter how accurate it was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComboGrade {
    /// Over the time limit. Zero effect.
    TooSlow,
    /// Exact match. `fast` is set when the entry took under half the limit;
    /// the battle engine rolls the stun off that flag.
    Perfect { fast: bool },
    /// Right length, imperfect keys. Accuracy is position-wise matches over
    /// length.
    Partial { accuracy: f64 },
    /// Wrong length entirely.
    WrongLength,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboScore {
    pub grade: ComboGrade,
    pub multiplier: f64,
}

/// Rolls a fresh combo sequence: 3 to 8 keys from the WASDQE alphabet,
/// repeats allowed.
pub fn generate_sequence(rng: &mut impl Rng) -> Vec<char> {
    let length = rng.gen_range(COMBO_MIN_LENGTH..=COMBO_MAX_LENGTH);
    (0..length)
        .map(|_| COMBO_KEYS[rng.gen_range(0..COMBO_KEYS.len())])
        .collect()
}

/// Grades a submitted sequence against the required one. Total over all
/// inputs, including empty submissions.
pub fn score_combo(required: &[char], submitted: &[char], elapsed: f64, limit: f64) -> ComboScore {
    if elapsed > limit {
        return ComboScore {
            grade: ComboGrade::TooSlow,
            multiplier: 0.0,
        };
    }

    if submitted == required {
        return ComboScore {
            grade: ComboGrade::Perfect {
                fast: elapsed < limit * COMBO_FAST_FRACTION,
            },
            multiplier: COMBO_PERFECT_MULTIPLIER,
        };
    }

    if submitted.len() == required.len() {
        let matches = required
            .iter()
            .zip(submitted.iter())
            .filter(|(a, b)| a == b)
            .count();
        let accuracy = matches as f64 / required.len() as f64;
        let multiplier = if accuracy >= COMBO_GOOD_ACCURACY {
            1.0 + accuracy
        } else {
            COMBO_WEAK_MULTIPLIER
        };
        return ComboScore {
            grade: ComboGrade::Partial { accuracy },
            multiplier,
        };
    }

    ComboScore {
        grade: ComboGrade::WrongLength,
        multiplier: COMBO_FUMBLE_MULTIPLIER,
    }
}
