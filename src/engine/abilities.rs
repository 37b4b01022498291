use serde::{Deserialize, Serialize};

use super::validate_answers;
use crate::error::EngineError;
use crate::questions::{
    Q_CHARM, Q_DEVOTION, Q_ENDURANCE, Q_EXPLORE, Q_IMPULSE, Q_INSTINCT, Q_MAGIC, Q_NIMBLE,
    Q_PACT, Q_PEACE, Q_PUZZLES, Q_SECRETS, Q_SOCIAL, Q_TEMPER, Q_TRAINING, Q_WILDS,
};

// Output bounds shared by all six abilities.
const OUT_MIN: u8 = 8;
const OUT_MAX: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

// The six derived ability scores. Invariant: every field is within
// [OUT_MIN, OUT_MAX] after derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

impl AbilityScores {
    pub fn get(&self, ability: Ability) -> u8 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }
}

// How a question's answer enters an ability total.
#[derive(Debug, Clone, Copy)]
enum Treatment {
    // Add the answer value as-is.
    Raw,
    // Add 6 - value, for questions whose low end implies the trait.
    Inverted,
    // Add twice the value, for strong signals (devotion, pacts, innate magic).
    Doubled,
}

struct AbilityWeight {
    question: usize,
    ability: Ability,
    treatment: Treatment,
}

// Hand-authored contribution table. Several questions feed two abilities with
// different treatments, so this is not derivable from the question tags.
const ABILITY_WEIGHTS: &[AbilityWeight] = &[
    // Strength: temper, aversion to conflict (inverted), physical training.
    AbilityWeight { question: Q_TEMPER, ability: Ability::Strength, treatment: Treatment::Raw },
    AbilityWeight { question: Q_PEACE, ability: Ability::Strength, treatment: Treatment::Inverted },
    AbilityWeight { question: Q_TRAINING, ability: Ability::Strength, treatment: Treatment::Raw },
    // Dexterity: impulsiveness, secrecy, footwork.
    AbilityWeight { question: Q_IMPULSE, ability: Ability::Dexterity, treatment: Treatment::Raw },
    AbilityWeight { question: Q_SECRETS, ability: Ability::Dexterity, treatment: Treatment::Raw },
    AbilityWeight { question: Q_NIMBLE, ability: Ability::Dexterity, treatment: Treatment::Raw },
    // Constitution: appetite for the unknown, endurance, training.
    AbilityWeight { question: Q_EXPLORE, ability: Ability::Constitution, treatment: Treatment::Raw },
    AbilityWeight { question: Q_ENDURANCE, ability: Ability::Constitution, treatment: Treatment::Raw },
    AbilityWeight { question: Q_TRAINING, ability: Ability::Constitution, treatment: Treatment::Raw },
    // Intelligence: puzzles, book learning (gut-over-book inverted).
    AbilityWeight { question: Q_PUZZLES, ability: Ability::Intelligence, treatment: Treatment::Raw },
    AbilityWeight { question: Q_INSTINCT, ability: Ability::Intelligence, treatment: Treatment::Inverted },
    // Wisdom: caution (impulse inverted), calm, devotion doubled, instinct,
    // affinity for the wild. The doubled devotion term is why wisdom's input
    // domain is wider than the other abilities'.
    AbilityWeight { question: Q_IMPULSE, ability: Ability::Wisdom, treatment: Treatment::Inverted },
    AbilityWeight { question: Q_PEACE, ability: Ability::Wisdom, treatment: Treatment::Raw },
    AbilityWeight { question: Q_DEVOTION, ability: Ability::Wisdom, treatment: Treatment::Doubled },
    AbilityWeight { question: Q_INSTINCT, ability: Ability::Wisdom, treatment: Treatment::Raw },
    AbilityWeight { question: Q_WILDS, ability: Ability::Wisdom, treatment: Treatment::Raw },
    // Charisma: social appetite, temper (inverted), charm, plus the two
    // doubled class signals that run on force of personality.
    AbilityWeight { question: Q_SOCIAL, ability: Ability::Charisma, treatment: Treatment::Raw },
    AbilityWeight { question: Q_TEMPER, ability: Ability::Charisma, treatment: Treatment::Inverted },
    AbilityWeight { question: Q_CHARM, ability: Ability::Charisma, treatment: Treatment::Raw },
    AbilityWeight { question: Q_PACT, ability: Ability::Charisma, treatment: Treatment::Doubled },
    AbilityWeight { question: Q_MAGIC, ability: Ability::Charisma, treatment: Treatment::Doubled },
];

// Maps a raw weighted total from its per-ability input domain onto the shared
// output range, rounding to the nearest integer and clamping at the bounds.
fn rescale(total: i32, in_min: i32, in_max: i32) -> u8 {
    if in_min == in_max {
        return OUT_MIN;
    }
    let fraction = (total - in_min) as f32 / (in_max - in_min) as f32;
    let scaled = OUT_MIN as f32 + fraction * (OUT_MAX - OUT_MIN) as f32;
    (scaled.round() as i32).clamp(OUT_MIN as i32, OUT_MAX as i32) as u8
}

/// Derives the six ability scores from a full answer vector.
///
/// Each question contributes to zero or more ability totals according to
/// `ABILITY_WEIGHTS`; each total is then rescaled into `[8, 15]`. The input
/// domain of each ability is the sum of the smallest and largest possible
/// contribution of every weight that feeds it, so the table stays the single
/// source of truth.
pub fn derive_abilities(answers: &[u8]) -> Result<AbilityScores, EngineError> {
    validate_answers(answers)?;

    let mut totals = [0i32; 6];
    let mut in_min = [0i32; 6];
    let mut in_max = [0i32; 6];

    for weight in ABILITY_WEIGHTS {
        let value = answers[weight.question] as i32;
        let contribution = match weight.treatment {
            Treatment::Raw => value,
            Treatment::Inverted => 6 - value,
            Treatment::Doubled => value * 2,
        };
        let (lo, hi) = match weight.treatment {
            Treatment::Raw | Treatment::Inverted => (1, 5),
            Treatment::Doubled => (2, 10),
        };
        let slot = weight.ability as usize;
        totals[slot] += contribution;
        in_min[slot] += lo;
        in_max[slot] += hi;
    }

    let score = |ability: Ability| {
        let slot = ability as usize;
        rescale(totals[slot], in_min[slot], in_max[slot])
    };

    Ok(AbilityScores {
        strength: score(Ability::Strength),
        dexterity: score(Ability::Dexterity),
        constitution: score(Ability::Constitution),
        intelligence: score(Ability::Intelligence),
        wisdom: score(Ability::Wisdom),
        charisma: score(Ability::Charisma),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QUESTIONS;

    fn assert_in_bounds(scores: &AbilityScores) {
        for ability in [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ] {
            let value = scores.get(ability);
            assert!((OUT_MIN..=OUT_MAX).contains(&value), "{ability:?} = {value}");
        }
    }

    #[test]
    fn extremes_hit_the_output_bounds() {
        let lows = derive_abilities(&[1; QUESTIONS.len()]).unwrap();
        let highs = derive_abilities(&[5; QUESTIONS.len()]).unwrap();
        assert_in_bounds(&lows);
        assert_in_bounds(&highs);
        // An all-5 vector maxes the raw and doubled terms of every ability
        // that has more raw than inverted feeds.
        assert_eq!(highs.constitution, OUT_MAX);
        assert_eq!(highs.dexterity, OUT_MAX);
    }

    #[test]
    fn every_score_stays_within_bounds_for_mixed_vectors() {
        let patterns: [&[u8]; 4] = [&[1, 5], &[5, 1], &[2, 4, 3], &[3, 1, 5, 2]];
        for pattern in patterns {
            let answers: Vec<u8> = (0..QUESTIONS.len())
                .map(|i| pattern[i % pattern.len()])
                .collect();
            assert_in_bounds(&derive_abilities(&answers).unwrap());
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let answers: Vec<u8> = (0..QUESTIONS.len()).map(|i| (i % 5 + 1) as u8).collect();
        assert_eq!(
            derive_abilities(&answers).unwrap(),
            derive_abilities(&answers).unwrap()
        );
    }

    #[test]
    fn inverted_questions_pull_in_the_opposite_direction() {
        let mut answers = vec![3; QUESTIONS.len()];
        answers[crate::questions::Q_PEACE] = 1; // aggressive
        let aggressive = derive_abilities(&answers).unwrap();
        answers[crate::questions::Q_PEACE] = 5; // peaceful
        let peaceful = derive_abilities(&answers).unwrap();
        assert!(aggressive.strength > peaceful.strength);
        assert!(aggressive.wisdom < peaceful.wisdom);
    }

    #[test]
    fn rescale_collapses_a_degenerate_domain_to_the_minimum() {
        assert_eq!(rescale(7, 7, 7), OUT_MIN);
    }

    #[test]
    fn rejects_wrong_length_before_scoring() {
        assert!(derive_abilities(&[3, 3, 3]).is_err());
    }
}
