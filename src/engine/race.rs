use super::validate_answers;
use crate::error::EngineError;
use crate::questions::{
    Q_CHARM, Q_ENDURANCE, Q_MAGIC, Q_NIMBLE, Q_PUZZLES, Q_SOCIAL, Q_TEMPER, Q_WILDS,
};

// Slider thresholds for a race signal. Answers in the 3 band contribute
// nothing.
const HIGH_THRESHOLD: u8 = 4;
const LOW_THRESHOLD: u8 = 2;

pub const DEFAULT_RACE: &str = "human";

// Fixed iteration order. Ties between equal scores resolve to whichever race
// appears first here.
pub const RACES: &[&str] = &[
    "human",
    "elf",
    "dwarf",
    "halfling",
    "half-elf",
    "half-orc",
    "gnome",
    "tiefling",
    "dragonborn",
];

struct RaceSignal {
    question: usize,
    // Affinity weights added when the answer is at or above HIGH_THRESHOLD.
    high: &'static [(&'static str, u32)],
    // Opposing-affinity weights added when the answer is at or below
    // LOW_THRESHOLD. Not every signal has a low-end branch.
    low: &'static [(&'static str, u32)],
}

const RACE_SIGNALS: &[RaceSignal] = &[
    RaceSignal {
        question: Q_PUZZLES,
        high: &[("elf", 2), ("gnome", 1)],
        low: &[("half-orc", 1)],
    },
    RaceSignal {
        question: Q_NIMBLE,
        high: &[("halfling", 2), ("elf", 1)],
        low: &[],
    },
    RaceSignal {
        question: Q_ENDURANCE,
        high: &[("dwarf", 2)],
        low: &[("elf", 1)],
    },
    RaceSignal {
        question: Q_TEMPER,
        high: &[("half-orc", 2), ("dwarf", 1)],
        low: &[],
    },
    RaceSignal {
        question: Q_SOCIAL,
        high: &[("half-elf", 2)],
        low: &[("dwarf", 1)],
    },
    RaceSignal {
        question: Q_CHARM,
        high: &[("half-elf", 1), ("tiefling", 1)],
        low: &[],
    },
    RaceSignal {
        question: Q_MAGIC,
        high: &[("tiefling", 2), ("dragonborn", 1)],
        low: &[],
    },
    RaceSignal {
        question: Q_WILDS,
        high: &[("elf", 1)],
        low: &[("human", 1)],
    },
];

/// Recommends a race from the answer vector, constrained to the candidates
/// the rules source currently offers.
///
/// Scores accumulate per `RACE_SIGNALS`; the winner is the strictly-highest
/// score among candidates present in `available`, ties resolving to the first
/// race in `RACES` order. With no positive score the recommendation falls
/// back to `human`, or to the first available candidate when the rules source
/// does not offer humans.
pub fn recommend_race(answers: &[u8], available: &[String]) -> Result<String, EngineError> {
    validate_answers(answers)?;
    if available.is_empty() {
        return Err(EngineError::NoCandidate(
            "the rules source returned no races".to_string(),
        ));
    }

    let mut scores: Vec<(&str, u32)> = RACES.iter().map(|race| (*race, 0)).collect();
    for signal in RACE_SIGNALS {
        let value = answers[signal.question];
        let weights = if value >= HIGH_THRESHOLD {
            signal.high
        } else if value <= LOW_THRESHOLD {
            signal.low
        } else {
            &[]
        };
        for (race, weight) in weights {
            if let Some(entry) = scores.iter_mut().find(|(name, _)| name == race) {
                entry.1 += weight;
            }
        }
    }

    let mut best: Option<(&str, u32)> = None;
    for (race, score) in &scores {
        if *score == 0 || !available.iter().any(|candidate| candidate == race) {
            continue;
        }
        if best.is_none_or(|(_, top)| *score > top) {
            best = Some((race, *score));
        }
    }

    if let Some((race, _)) = best {
        return Ok(race.to_string());
    }
    if available.iter().any(|candidate| candidate == DEFAULT_RACE) {
        return Ok(DEFAULT_RACE.to_string());
    }
    Ok(available[0].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QUESTIONS;

    fn all_races() -> Vec<String> {
        RACES.iter().map(|race| race.to_string()).collect()
    }

    #[test]
    fn neutral_answers_fall_back_to_human() {
        let race = recommend_race(&[3; QUESTIONS.len()], &all_races()).unwrap();
        assert_eq!(race, "human");
    }

    #[test]
    fn a_strong_puzzle_lean_favors_elves() {
        let mut answers = vec![3; QUESTIONS.len()];
        answers[Q_PUZZLES] = 5;
        assert_eq!(recommend_race(&answers, &all_races()).unwrap(), "elf");
    }

    #[test]
    fn low_answers_feed_the_opposing_affinity() {
        let mut answers = vec![3; QUESTIONS.len()];
        answers[Q_PUZZLES] = 1;
        assert_eq!(recommend_race(&answers, &all_races()).unwrap(), "half-orc");
    }

    #[test]
    fn candidates_outside_the_available_set_are_skipped() {
        let mut answers = vec![3; QUESTIONS.len()];
        answers[Q_PUZZLES] = 5; // elf 2, gnome 1
        let available = vec!["gnome".to_string(), "human".to_string()];
        assert_eq!(recommend_race(&answers, &available).unwrap(), "gnome");
    }

    #[test]
    fn ties_resolve_in_table_order() {
        let mut answers = vec![3; QUESTIONS.len()];
        // elf 1 (wilds high), dwarf 1 (social low): elf precedes dwarf in RACES.
        answers[Q_WILDS] = 5;
        answers[Q_SOCIAL] = 1;
        assert_eq!(recommend_race(&answers, &all_races()).unwrap(), "elf");
    }

    #[test]
    fn missing_human_falls_back_to_the_first_candidate() {
        let available = vec!["dragonborn".to_string(), "gnome".to_string()];
        let race = recommend_race(&[3; QUESTIONS.len()], &available).unwrap();
        assert_eq!(race, "dragonborn");
    }

    #[test]
    fn an_empty_candidate_set_is_an_error() {
        let err = recommend_race(&[3; QUESTIONS.len()], &[]).unwrap_err();
        assert!(matches!(err, EngineError::NoCandidate(_)));
    }
}
