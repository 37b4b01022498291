// ../tests/tests.rs
use charforge::*;

use charforge::questions::{Q_COMPASSION, Q_DEVOTION, Q_IMPULSE, Q_LAWFUL, Q_TRADITION};
use charforge::sheet::render_sheet;

fn neutral_answers() -> Vec<u8> {
    vec![3; QUESTIONS.len()]
}

#[test]
fn test_engine_pipeline_is_deterministic_end_to_end() {
    let mut answers = neutral_answers();
    answers[Q_DEVOTION] = 5;
    answers[Q_IMPULSE] = 1;

    let available: Vec<String> = charforge::engine::race::RACES
        .iter()
        .map(|race| race.to_string())
        .collect();

    let abilities = derive_abilities(&answers).unwrap();
    let race = recommend_race(&answers, &available).unwrap();
    let class = recommend_class(&answers, &abilities).unwrap();
    let alignment = resolve_alignment(&answers).unwrap();

    // Re-running the whole pipeline with the same inputs changes nothing.
    assert_eq!(derive_abilities(&answers).unwrap(), abilities);
    assert_eq!(recommend_race(&answers, &available).unwrap(), race);
    assert_eq!(recommend_class(&answers, &abilities).unwrap(), class);
    assert_eq!(resolve_alignment(&answers).unwrap(), alignment);
}

#[test]
fn test_spec_scenarios_from_the_wizard() {
    // Sliders untouched at the midpoint: nothing leans anywhere.
    assert_eq!(
        resolve_alignment(&neutral_answers()).unwrap().to_string(),
        "True Neutral"
    );

    // Both order questions and the morality question pushed to the top.
    let mut answers = neutral_answers();
    answers[Q_LAWFUL] = 5;
    answers[Q_TRADITION] = 5;
    answers[Q_COMPASSION] = 5;
    assert_eq!(
        resolve_alignment(&answers).unwrap().to_string(),
        "Lawful Good"
    );

    assert_eq!(proficiency_bonus(1), 2);
    assert_eq!(proficiency_bonus(5), 3);
    assert_eq!(minimum_xp(3), 900);
}

#[test]
fn test_devout_vectors_recommend_cleric_first() {
    let mut answers = vec![5; QUESTIONS.len()];
    answers[Q_IMPULSE] = 1; // keeps wisdom at its ceiling
    let abilities = derive_abilities(&answers).unwrap();
    assert!(abilities.wisdom >= 14);
    assert_eq!(recommend_class(&answers, &abilities).unwrap(), "cleric");
}

#[test]
fn test_invalid_answer_vectors_fail_fast() {
    assert!(matches!(
        derive_abilities(&[3, 3]),
        Err(EngineError::InvalidInput(_))
    ));
    let mut answers = neutral_answers();
    answers[0] = 9;
    assert!(matches!(
        resolve_alignment(&answers),
        Err(EngineError::InvalidInput(_))
    ));
}

fn sample_record() -> CharacterRecord {
    let answers = neutral_answers();
    CharacterRecord {
        name: "Elara".to_string(),
        level: 3,
        race: "elf".to_string(),
        class: "wizard".to_string(),
        background: "sage".to_string(),
        gender: "female".to_string(),
        alignment: resolve_alignment(&answers).unwrap(),
        abilities: derive_abilities(&answers).unwrap(),
        hit_points: 8,
        armor_class: 11,
        initiative: 1,
        speed: 30,
        proficiency_bonus: 2,
        saving_throws: vec!["Intelligence".to_string(), "Wisdom".to_string()],
        skill_proficiencies: vec!["Arcana".to_string(), "History".to_string()],
        features: "Basic class features.".to_string(),
        proficiencies_and_languages: "Common, Elvish.".to_string(),
        spells: vec!["Fireball".to_string(), "Counterspell".to_string()],
        personality: Personality {
            traits: "Curious\nPatient".to_string(),
            ideal: "Knowledge.".to_string(),
            bond: "My mentor.".to_string(),
            flaw: "Obsessive.".to_string(),
        },
        backstory: "Raised among dusty archives, Elara left home after a fire.".to_string(),
        experience_points: 900,
        portrait: None,
    }
}

#[test]
fn test_text_sheet_contains_every_section() {
    let sheet = render_sheet(&sample_record());
    for heading in [
        "D&D CHARACTER SHEET",
        "ABILITIES",
        "COMBAT",
        "PROFICIENCIES & FEATURES",
        "SPELLS",
        "PERSONALITY",
        "BACKSTORY",
    ] {
        assert!(sheet.contains(heading), "missing section {heading}");
    }
    assert!(sheet.contains("Name: Elara"));
    assert!(sheet.contains("Alignment: True Neutral"));
    assert!(sheet.contains("Spells Known: Fireball, Counterspell"));
    assert!(sheet.contains("Speed: 30 ft."));
}

#[test]
fn test_character_record_serializes_with_readable_alignment() {
    let record = sample_record();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["alignment"], "True Neutral");
    assert_eq!(json["abilities"]["strength"], record.abilities.strength);

    let restored: CharacterRecord = serde_json::from_value(json).unwrap();
    assert_eq!(restored.name, record.name);
    assert_eq!(restored.alignment, record.alignment);
}

#[test]
fn test_generate_request_accepts_a_minimal_payload() {
    let payload = serde_json::json!({
        "answers": vec![3; QUESTIONS.len()],
        "level": 2,
    });
    let request: GenerateRequest = serde_json::from_value(payload).unwrap();
    assert_eq!(request.level, 2);
    assert!(request.name.is_none());
    assert!(request.background.is_none());
    assert!(request.gender.is_none());
}

#[test]
fn test_question_bank_is_complete_and_tagged() {
    assert_eq!(QUESTIONS.len(), 20);
    for question in QUESTIONS {
        assert!(!question.text.is_empty());
        assert!(!question.min_label.is_empty());
        assert!(!question.max_label.is_empty());
        assert!(!question.tags.is_empty());
    }

    // The bank is what the form renders, so it has to serialize cleanly.
    let json = serde_json::to_value(QUESTIONS).unwrap();
    assert_eq!(json.as_array().unwrap().len(), QUESTIONS.len());
    assert_eq!(json[0]["max_label"], "Lawful");
}
