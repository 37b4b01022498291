// The trait-inference engine: pure, synchronous functions mapping a vector of
// Likert answers to derived ability scores, a race, a class and an alignment.
// Nothing in this module performs I/O; every function is deterministic over
// its inputs once the answer vector passes validation.

pub mod abilities;
pub mod alignment;
pub mod class;
pub mod race;
pub mod tables;

pub use abilities::{derive_abilities, Ability, AbilityScores};
pub use alignment::{resolve_alignment, Alignment};
pub use class::recommend_class;
pub use race::recommend_race;
pub use tables::{minimum_xp, proficiency_bonus};

use crate::error::EngineError;
use crate::questions::QUESTIONS;

// Every public engine function starts here. A wrong-length or out-of-range
// vector is a caller contract violation and fails before any scoring runs.
pub fn validate_answers(answers: &[u8]) -> Result<(), EngineError> {
    if answers.len() != QUESTIONS.len() {
        return Err(EngineError::InvalidInput(format!(
            "expected {} answers, got {}",
            QUESTIONS.len(),
            answers.len()
        )));
    }
    for (index, value) in answers.iter().enumerate() {
        if !(1..=5).contains(value) {
            return Err(EngineError::InvalidInput(format!(
                "answer {} is {}, outside 1-5",
                index, value
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_full_vector_of_valid_answers() {
        assert!(validate_answers(&[3; QUESTIONS.len()]).is_ok());
    }

    #[test]
    fn rejects_a_short_vector() {
        let err = validate_answers(&[3; 4]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut answers = vec![3; QUESTIONS.len()];
        answers[7] = 0;
        assert!(validate_answers(&answers).is_err());
        answers[7] = 6;
        assert!(validate_answers(&answers).is_err());
    }
}
