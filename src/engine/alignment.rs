use serde::{Deserialize, Serialize};
use std::fmt;

use super::validate_answers;
use crate::error::EngineError;
use crate::questions::{Q_COMPASSION, Q_LAWFUL, Q_TRADITION};

// Axis thresholds. The order axis is averaged over two answers, so the
// comparison runs on the real-valued average, never on a rounded integer.
const HIGH: f32 = 4.0;
const LOW: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Lawful,
    Neutral,
    Chaotic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Morality {
    Good,
    Neutral,
    Evil,
}

// The nine fixed alignments. The all-neutral cell collapses to the single
// literal "True Neutral".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    #[serde(rename = "Lawful Good")]
    LawfulGood,
    #[serde(rename = "Lawful Neutral")]
    LawfulNeutral,
    #[serde(rename = "Lawful Evil")]
    LawfulEvil,
    #[serde(rename = "Neutral Good")]
    NeutralGood,
    #[serde(rename = "True Neutral")]
    TrueNeutral,
    #[serde(rename = "Neutral Evil")]
    NeutralEvil,
    #[serde(rename = "Chaotic Good")]
    ChaoticGood,
    #[serde(rename = "Chaotic Neutral")]
    ChaoticNeutral,
    #[serde(rename = "Chaotic Evil")]
    ChaoticEvil,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::LawfulGood => write!(f, "Lawful Good"),
            Alignment::LawfulNeutral => write!(f, "Lawful Neutral"),
            Alignment::LawfulEvil => write!(f, "Lawful Evil"),
            Alignment::NeutralGood => write!(f, "Neutral Good"),
            Alignment::TrueNeutral => write!(f, "True Neutral"),
            Alignment::NeutralEvil => write!(f, "Neutral Evil"),
            Alignment::ChaoticGood => write!(f, "Chaotic Good"),
            Alignment::ChaoticNeutral => write!(f, "Chaotic Neutral"),
            Alignment::ChaoticEvil => write!(f, "Chaotic Evil"),
        }
    }
}

fn from_axes(order: Order, morality: Morality) -> Alignment {
    match (order, morality) {
        (Order::Lawful, Morality::Good) => Alignment::LawfulGood,
        (Order::Lawful, Morality::Neutral) => Alignment::LawfulNeutral,
        (Order::Lawful, Morality::Evil) => Alignment::LawfulEvil,
        (Order::Neutral, Morality::Good) => Alignment::NeutralGood,
        (Order::Neutral, Morality::Neutral) => Alignment::TrueNeutral,
        (Order::Neutral, Morality::Evil) => Alignment::NeutralEvil,
        (Order::Chaotic, Morality::Good) => Alignment::ChaoticGood,
        (Order::Chaotic, Morality::Neutral) => Alignment::ChaoticNeutral,
        (Order::Chaotic, Morality::Evil) => Alignment::ChaoticEvil,
    }
}

/// Reduces the answer vector to a two-axis alignment.
///
/// Order axis: the average of the rule-following and tradition answers.
/// Morality axis: the compassion answer alone. Averages land on half-steps,
/// so the order comparison uses the un-rounded value.
pub fn resolve_alignment(answers: &[u8]) -> Result<Alignment, EngineError> {
    validate_answers(answers)?;

    let order_average = (answers[Q_LAWFUL] as f32 + answers[Q_TRADITION] as f32) / 2.0;
    let order = if order_average >= HIGH {
        Order::Lawful
    } else if order_average <= LOW {
        Order::Chaotic
    } else {
        Order::Neutral
    };

    let compassion = answers[Q_COMPASSION] as f32;
    let morality = if compassion >= HIGH {
        Morality::Good
    } else if compassion <= LOW {
        Morality::Evil
    } else {
        Morality::Neutral
    };

    Ok(from_axes(order, morality))
}
