use std::fmt::Write;

use crate::character::{ability_modifier, format_modifier, CharacterRecord};

// Renders the plain-text character sheet, section for section the same
// document the wizard shows on screen and offers as a .txt download.
pub fn render_sheet(record: &CharacterRecord) -> String {
    let mut out = String::new();
    let abilities = &record.abilities;

    let _ = writeln!(out, "========================");
    let _ = writeln!(out, "D&D CHARACTER SHEET");
    let _ = writeln!(out, "========================");
    let _ = writeln!(out, "Name: {}", record.name);
    let _ = writeln!(out, "Level: {}", record.level);
    let _ = writeln!(out, "Race: {}", record.race);
    let _ = writeln!(out, "Class: {}", record.class);
    let _ = writeln!(out, "Alignment: {}", record.alignment);
    let _ = writeln!(out, "Background: {}", record.background);
    let _ = writeln!(out, "Experience Points: {}", record.experience_points);
    let _ = writeln!(out);

    let _ = writeln!(out, "------------------------");
    let _ = writeln!(out, "ABILITIES");
    let _ = writeln!(out, "------------------------");
    for (label, score) in [
        ("STR", abilities.strength),
        ("DEX", abilities.dexterity),
        ("CON", abilities.constitution),
        ("INT", abilities.intelligence),
        ("WIS", abilities.wisdom),
        ("CHA", abilities.charisma),
    ] {
        let _ = writeln!(
            out,
            "{}: {} (Mod: {})",
            label,
            score,
            format_modifier(ability_modifier(score))
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "------------------------");
    let _ = writeln!(out, "COMBAT");
    let _ = writeln!(out, "------------------------");
    let _ = writeln!(out, "Hit Points: {}", record.hit_points);
    let _ = writeln!(out, "Armor Class: {}", record.armor_class);
    let _ = writeln!(out, "Initiative: {}", format_modifier(record.initiative));
    let _ = writeln!(out, "Speed: {} ft.", record.speed);
    let _ = writeln!(out, "Proficiency Bonus: +{}", record.proficiency_bonus);
    let _ = writeln!(out);

    let _ = writeln!(out, "------------------------");
    let _ = writeln!(out, "PROFICIENCIES & FEATURES");
    let _ = writeln!(out, "------------------------");
    let _ = writeln!(out, "Saving Throws: {}", record.saving_throws.join(", "));
    let _ = writeln!(
        out,
        "Skill Proficiencies: {}",
        record.skill_proficiencies.join(", ")
    );
    let _ = writeln!(out, "Features & Traits: {}", record.features);
    let _ = writeln!(
        out,
        "Other Proficiencies & Languages: {}",
        record.proficiencies_and_languages
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "------------------------");
    let _ = writeln!(out, "SPELLS");
    let _ = writeln!(out, "------------------------");
    let spells = if record.spells.is_empty() {
        "None".to_string()
    } else {
        record.spells.join(", ")
    };
    let _ = writeln!(out, "Spells Known: {spells}");
    let _ = writeln!(out);

    let _ = writeln!(out, "------------------------");
    let _ = writeln!(out, "PERSONALITY");
    let _ = writeln!(out, "------------------------");
    let _ = writeln!(out, "Personality Traits:");
    let _ = writeln!(out, "{}", record.personality.traits);
    let _ = writeln!(out);
    let _ = writeln!(out, "Ideal: {}", record.personality.ideal);
    let _ = writeln!(out, "Bond: {}", record.personality.bond);
    let _ = writeln!(out, "Flaw: {}", record.personality.flaw);
    let _ = writeln!(out);

    let _ = writeln!(out, "------------------------");
    let _ = writeln!(out, "BACKSTORY");
    let _ = writeln!(out, "------------------------");
    let _ = writeln!(out, "{}", record.backstory);

    out
}
