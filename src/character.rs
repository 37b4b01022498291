use serde::{Deserialize, Serialize};

use crate::engine::{Alignment, AbilityScores};

// The free-text personality block the language model fills in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Personality {
    pub traits: String, // One trait per line.
    pub ideal: String,
    pub bond: String,
    pub flaw: String,
}

impl Personality {
    // Used when the language model is unreachable.
    pub fn fallback() -> Self {
        Personality {
            traits: "Adventurous\nFriendly".to_string(),
            ideal: "Freedom".to_string(),
            bond: "My companions".to_string(),
            flaw: "Reckless".to_string(),
        }
    }
}

// The finished character. Built once per form submission; only the portrait
// may be filled in or replaced afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub level: u8,
    pub race: String,
    pub class: String,
    pub background: String,
    pub gender: String,
    pub alignment: Alignment,
    pub abilities: AbilityScores,

    // Combat stats
    pub hit_points: u8,
    pub armor_class: u8,
    pub initiative: i8,
    pub speed: u8,
    pub proficiency_bonus: u8,

    // Proficiencies and features
    pub saving_throws: Vec<String>,
    pub skill_proficiencies: Vec<String>,
    pub features: String,
    pub proficiencies_and_languages: String,

    pub spells: Vec<String>,
    pub personality: Personality,
    pub backstory: String,
    pub experience_points: u32,

    // Base64-encoded PNG, populated by the portrait step.
    pub portrait: Option<String>,
}

/// Standard ability modifier: floor((score - 10) / 2).
pub fn ability_modifier(score: u8) -> i8 {
    (score as i8 - 10).div_euclid(2)
}

/// Formats a modifier with an explicit sign, the way sheets print them.
pub fn format_modifier(modifier: i8) -> String {
    if modifier >= 0 {
        format!("+{modifier}")
    } else {
        modifier.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_floor_toward_negative_infinity() {
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(14), 2);
        assert_eq!(ability_modifier(15), 2);
    }

    #[test]
    fn modifiers_format_with_explicit_signs() {
        assert_eq!(format_modifier(2), "+2");
        assert_eq!(format_modifier(0), "+0");
        assert_eq!(format_modifier(-1), "-1");
    }
}
