use super::abilities::{Ability, AbilityScores};
use super::validate_answers;
use crate::error::EngineError;
use crate::questions::{
    Q_DEVOTION, Q_EXPLORE, Q_HONESTY, Q_LAWFUL, Q_MAGIC, Q_PACT, Q_PEACE, Q_PUZZLES, Q_SECRETS,
    Q_SOCIAL, Q_TEMPER, Q_WILDS,
};

const ANSWER_THRESHOLD: u8 = 4;
pub const FALLBACK_CLASS: &str = "fighter";

// Whether a guard needs all of its ability thresholds or any one of them.
#[derive(Debug, Clone, Copy)]
enum Require {
    All,
    Any,
}

struct ClassGuard {
    class: &'static str,
    // Raw answers that must each reach ANSWER_THRESHOLD.
    answers: &'static [usize],
    // Derived ability thresholds, combined per `require`.
    abilities: &'static [(Ability, u8)],
    require: Require,
}

// The cascade is ordered: the first satisfied guard wins, and caster classes
// are checked before the martial ones. Reordering changes the output for any
// vector that satisfies more than one guard, so the order is part of the
// contract.
const CLASS_CASCADE: &[ClassGuard] = &[
    ClassGuard {
        class: "cleric",
        answers: &[Q_DEVOTION],
        abilities: &[(Ability::Wisdom, 14), (Ability::Charisma, 14)],
        require: Require::Any,
    },
    ClassGuard {
        class: "warlock",
        answers: &[Q_PACT],
        abilities: &[(Ability::Charisma, 13)],
        require: Require::All,
    },
    ClassGuard {
        class: "sorcerer",
        answers: &[Q_MAGIC],
        abilities: &[(Ability::Charisma, 14)],
        require: Require::All,
    },
    ClassGuard {
        class: "wizard",
        answers: &[Q_PUZZLES],
        abilities: &[(Ability::Intelligence, 14)],
        require: Require::All,
    },
    ClassGuard {
        class: "bard",
        answers: &[Q_SOCIAL],
        abilities: &[(Ability::Charisma, 14)],
        require: Require::All,
    },
    ClassGuard {
        class: "druid",
        answers: &[Q_WILDS],
        abilities: &[(Ability::Wisdom, 13)],
        require: Require::All,
    },
    ClassGuard {
        class: "rogue",
        answers: &[Q_SECRETS],
        abilities: &[(Ability::Dexterity, 14)],
        require: Require::All,
    },
    ClassGuard {
        class: "ranger",
        answers: &[Q_EXPLORE],
        abilities: &[(Ability::Dexterity, 13), (Ability::Wisdom, 12)],
        require: Require::All,
    },
    ClassGuard {
        class: "barbarian",
        answers: &[Q_TEMPER],
        abilities: &[(Ability::Strength, 14)],
        require: Require::All,
    },
    ClassGuard {
        class: "paladin",
        answers: &[Q_LAWFUL, Q_HONESTY],
        abilities: &[(Ability::Strength, 13)],
        require: Require::All,
    },
    ClassGuard {
        class: "monk",
        answers: &[Q_PEACE],
        abilities: &[(Ability::Dexterity, 13), (Ability::Wisdom, 13)],
        require: Require::All,
    },
];

/// Recommends a class by walking the guard cascade in order.
///
/// Always returns a class: when no guard matches, a physical ability of 14 or
/// more reads as a fighter, and so does everything else, which makes the
/// fighter default explicit rather than an accident of fallthrough.
pub fn recommend_class(
    answers: &[u8],
    abilities: &AbilityScores,
) -> Result<&'static str, EngineError> {
    validate_answers(answers)?;

    for guard in CLASS_CASCADE {
        let answers_met = guard
            .answers
            .iter()
            .all(|question| answers[*question] >= ANSWER_THRESHOLD);
        if !answers_met {
            continue;
        }
        let abilities_met = match guard.require {
            Require::All => guard
                .abilities
                .iter()
                .all(|(ability, threshold)| abilities.get(*ability) >= *threshold),
            Require::Any => guard
                .abilities
                .iter()
                .any(|(ability, threshold)| abilities.get(*ability) >= *threshold),
        };
        if abilities_met {
            return Ok(guard.class);
        }
    }

    Ok(FALLBACK_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::derive_abilities;
    use crate::questions::{Q_IMPULSE, Q_INSTINCT, QUESTIONS};

    fn abilities_for(answers: &[u8]) -> AbilityScores {
        derive_abilities(answers).unwrap()
    }

    #[test]
    fn midpoint_answers_fall_back_to_fighter() {
        let answers = vec![3; QUESTIONS.len()];
        let abilities = abilities_for(&answers);
        assert_eq!(recommend_class(&answers, &abilities).unwrap(), "fighter");
    }

    #[test]
    fn devotion_with_high_wisdom_wins_before_every_other_guard() {
        // Push every wisdom feed to its limit and the devotion slider to 5.
        // The charisma and strength guards further down would also match, but
        // the cleric guard is checked first.
        let mut answers = vec![5; QUESTIONS.len()];
        answers[Q_IMPULSE] = 1;
        let abilities = abilities_for(&answers);
        assert!(abilities.wisdom >= 14);
        assert_eq!(recommend_class(&answers, &abilities).unwrap(), "cleric");
    }

    #[test]
    fn a_pact_lean_without_devotion_recommends_warlock() {
        let mut answers = vec![3; QUESTIONS.len()];
        answers[Q_PACT] = 5;
        answers[Q_MAGIC] = 5;
        answers[Q_SOCIAL] = 3;
        let abilities = abilities_for(&answers);
        assert!(abilities.charisma >= 13);
        assert_eq!(recommend_class(&answers, &abilities).unwrap(), "warlock");
    }

    #[test]
    fn puzzle_lovers_with_high_intelligence_become_wizards() {
        let mut answers = vec![3; QUESTIONS.len()];
        answers[Q_PUZZLES] = 5;
        answers[Q_INSTINCT] = 1; // bookish raises intelligence
        let abilities = abilities_for(&answers);
        assert!(abilities.intelligence >= 14);
        assert_eq!(recommend_class(&answers, &abilities).unwrap(), "wizard");
    }

    #[test]
    fn recommendation_is_total_and_idempotent() {
        let patterns: [&[u8]; 3] = [&[1, 2, 3, 4, 5], &[5, 4, 3, 2, 1], &[2, 5]];
        for pattern in patterns {
            let answers: Vec<u8> = (0..QUESTIONS.len())
                .map(|i| pattern[i % pattern.len()])
                .collect();
            let abilities = abilities_for(&answers);
            let first = recommend_class(&answers, &abilities).unwrap();
            let second = recommend_class(&answers, &abilities).unwrap();
            assert!(!first.is_empty());
            assert_eq!(first, second);
        }
    }
}
