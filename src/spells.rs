// Starter spell lists for the casting classes, keyed by class and the exact
// character level. Classes and levels outside the table get no spells.

const CLASS_SPELLS: &[(&str, &[(u8, &[&str])])] = &[
    (
        "wizard",
        &[
            (1, &["Magic Missile", "Shield", "Burning Hands"]),
            (2, &["Mirror Image", "Misty Step", "Hold Person"]),
            (3, &["Fireball", "Counterspell", "Fly"]),
        ],
    ),
    (
        "cleric",
        &[
            (1, &["Cure Wounds", "Bless", "Guiding Bolt"]),
            (2, &["Spiritual Weapon", "Hold Person"]),
            (3, &["Spirit Guardians", "Revivify"]),
        ],
    ),
    (
        "sorcerer",
        &[
            (1, &["Chromatic Orb", "Shield", "Burning Hands"]),
            (2, &["Suggestion", "Web"]),
            (3, &["Fireball", "Haste"]),
        ],
    ),
    (
        "bard",
        &[
            (1, &["Healing Word", "Dissonant Whispers"]),
            (2, &["Blindness/Deafness", "Shatter"]),
            (3, &["Hypnotic Pattern", "Fear"]),
        ],
    ),
    (
        "warlock",
        &[
            (1, &["Eldritch Blast", "Hex"]),
            (2, &["Misty Step", "Darkness"]),
            (3, &["Fly", "Counterspell"]),
        ],
    ),
];

pub fn sample_spells(class: &str, level: u8) -> Vec<String> {
    let class = class.to_lowercase();
    CLASS_SPELLS
        .iter()
        .find(|(name, _)| *name == class)
        .and_then(|(_, levels)| levels.iter().find(|(l, _)| *l == level))
        .map(|(_, spells)| spells.iter().map(|s| s.to_string()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_class_and_level_returns_spells() {
        assert_eq!(
            sample_spells("wizard", 1),
            vec!["Magic Missile", "Shield", "Burning Hands"]
        );
        assert_eq!(sample_spells("Cleric", 3), vec!["Spirit Guardians", "Revivify"]);
    }

    #[test]
    fn martial_classes_and_uncovered_levels_get_none() {
        assert!(sample_spells("fighter", 1).is_empty());
        assert!(sample_spells("wizard", 4).is_empty());
    }
}
