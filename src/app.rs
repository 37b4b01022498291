use log::warn;
use serde::Deserialize;

use crate::character::{ability_modifier, CharacterRecord, Personality};
use crate::engine::{
    derive_abilities, minimum_xp, proficiency_bonus, recommend_class, recommend_race,
    resolve_alignment,
};
use crate::error::{AppError, EngineError};
use crate::narrative::{random_name, NarrativeClient, FALLBACK_BACKSTORY};
use crate::portrait::PortraitClient;
use crate::rules::{default_races, ClassDetails, RulesClient};
use crate::settings::Settings;
use crate::spells::sample_spells;

// One form submission, as the browser posts it.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub answers: Vec<u8>,
    #[serde(default)]
    pub name: Option<String>,
    pub level: u8,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

// The character assembler. Sequences the pure engine, then merges in what
// the external collaborators produce, degrading to fixed defaults when the
// rules source or the language model is unreachable.
pub struct App {
    pub settings: Settings,
    pub rules: RulesClient,
    pub narrative: NarrativeClient,
    pub portrait: PortraitClient,
}

impl App {
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        let rules = RulesClient::new(&settings.rules_api_base_url, settings.cache_dir())?;
        let narrative = NarrativeClient::new(&settings.ollama_base_url, &settings.ollama_model);
        let portrait = PortraitClient::new(&settings.stable_diffusion_base_url)?;
        Ok(Self {
            settings,
            rules,
            narrative,
            portrait,
        })
    }

    /// Runs the whole pipeline short of the portrait: engine, rules lookup,
    /// name and narrative generation, record assembly.
    pub async fn generate_character(
        &self,
        request: &GenerateRequest,
    ) -> Result<CharacterRecord, AppError> {
        if !(1..=20).contains(&request.level) {
            return Err(EngineError::InvalidInput(format!(
                "level {} is outside 1-20",
                request.level
            ))
            .into());
        }

        // The pure core runs first; nothing past this point can change the
        // derived traits.
        let abilities = derive_abilities(&request.answers)?;
        let alignment = resolve_alignment(&request.answers)?;

        let available_races = match self.rules.races().await {
            Ok(races) if !races.is_empty() => races,
            Ok(_) => {
                warn!("[rules] empty race list, using defaults");
                default_races()
            }
            Err(err) => {
                warn!("[rules] race lookup failed ({err}), using defaults");
                default_races()
            }
        };
        let race = recommend_race(&request.answers, &available_races)?;
        let class = recommend_class(&request.answers, &abilities)?;
        let alignment_text = alignment.to_string();

        // Name and class details only depend on the derived traits, so they
        // can run side by side.
        let provided_name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());
        let (name_result, details_result) = tokio::join!(
            async {
                match provided_name {
                    Some(name) => Ok(name.to_string()),
                    None => {
                        self.narrative
                            .generate_name(&race, class, &alignment_text)
                            .await
                    }
                }
            },
            self.rules.class_details(class)
        );
        let name = name_result.unwrap_or_else(|err| {
            warn!("[narrative] name generation failed ({err}), using a local name");
            random_name()
        });
        let details = details_result.unwrap_or_else(|err| {
            warn!("[rules] class details failed ({err}), using defaults");
            ClassDetails::default()
        });

        let (backstory_result, personality_result) = tokio::join!(
            self.narrative
                .generate_backstory(&name, request.level, &race, class, &alignment_text),
            self.narrative
                .generate_personality(&name, request.level, &race, class, &alignment_text)
        );
        let backstory = backstory_result.unwrap_or_else(|err| {
            warn!("[narrative] backstory generation failed ({err}), using fallback");
            FALLBACK_BACKSTORY.to_string()
        });
        let personality = personality_result.unwrap_or_else(|err| {
            warn!("[narrative] personality generation failed ({err}), using fallback");
            Personality::fallback()
        });

        let background = match request
            .background
            .as_deref()
            .map(str::trim)
            .filter(|background| !background.is_empty())
        {
            Some(background) => background.to_string(),
            // No selection made: take the first background the rules source
            // lists, the same one the form would have preselected.
            None => match self.rules.backgrounds().await {
                Ok(list) => list
                    .first()
                    .map(|entry| entry.index.clone())
                    .unwrap_or_else(|| "acolyte".to_string()),
                Err(err) => {
                    warn!("[rules] background lookup failed ({err}), using acolyte");
                    "acolyte".to_string()
                }
            },
        };
        let gender = request
            .gender
            .as_deref()
            .map(str::trim)
            .filter(|gender| !gender.is_empty())
            .unwrap_or("person")
            .to_string();

        Ok(assemble_record(
            name,
            request.level,
            race,
            class.to_string(),
            background,
            gender,
            alignment,
            abilities,
            details,
            personality,
            backstory,
        ))
    }

    /// Generates a portrait for an already-assembled record. A failure here
    /// is terminal for the request but leaves the record itself intact.
    pub async fn attach_portrait(&self, record: &mut CharacterRecord) -> Result<(), AppError> {
        let image = self
            .portrait
            .generate(&record.race, &record.class, &record.name, &record.gender)
            .await?;
        record.portrait = Some(image);
        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn assemble_record(
    name: String,
    level: u8,
    race: String,
    class: String,
    background: String,
    gender: String,
    alignment: crate::engine::Alignment,
    abilities: crate::engine::AbilityScores,
    details: ClassDetails,
    personality: Personality,
    backstory: String,
) -> CharacterRecord {
    let con_mod = ability_modifier(abilities.constitution) as i16;
    let dex_mod = ability_modifier(abilities.dexterity);
    let hit_points = (details.hit_die as i16 + con_mod).max(1) as u8;
    let armor_class = (10 + dex_mod as i16).max(1) as u8;

    let class_proficiencies: Vec<String> = details
        .proficiencies
        .iter()
        .map(|entry| entry.name.clone())
        .collect();
    let proficiencies_and_languages = if class_proficiencies.is_empty() {
        "Common, one other language.".to_string()
    } else {
        format!(
            "{}; Common, one other language.",
            class_proficiencies.join(", ")
        )
    };

    let spells = sample_spells(&class, level);

    CharacterRecord {
        name,
        level,
        race,
        class,
        background,
        gender,
        alignment,
        abilities,
        hit_points,
        armor_class,
        initiative: dex_mod,
        speed: 30,
        proficiency_bonus: proficiency_bonus(level),
        saving_throws: vec!["Strength".to_string(), "Dexterity".to_string()],
        skill_proficiencies: vec!["Acrobatics".to_string(), "Stealth".to_string()],
        features: "Basic class features.".to_string(),
        proficiencies_and_languages,
        spells,
        personality,
        backstory,
        experience_points: minimum_xp(level),
        portrait: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{derive_abilities, resolve_alignment};
    use crate::questions::QUESTIONS;

    fn sample_record() -> CharacterRecord {
        let answers = vec![3; QUESTIONS.len()];
        assemble_record(
            "Borin".to_string(),
            3,
            "dwarf".to_string(),
            "cleric".to_string(),
            "acolyte".to_string(),
            "male".to_string(),
            resolve_alignment(&answers).unwrap(),
            derive_abilities(&answers).unwrap(),
            ClassDetails::default(),
            Personality::fallback(),
            FALLBACK_BACKSTORY.to_string(),
        )
    }

    #[test]
    fn combat_stats_follow_the_ability_modifiers() {
        let record = sample_record();
        let dex_mod = ability_modifier(record.abilities.dexterity);
        assert_eq!(record.initiative, dex_mod);
        assert_eq!(record.armor_class as i16, 10 + dex_mod as i16);
        assert!(record.hit_points >= 1);
        assert_eq!(record.speed, 30);
    }

    #[test]
    fn level_lookups_come_from_the_tables() {
        let record = sample_record();
        assert_eq!(record.experience_points, 900);
        assert_eq!(record.proficiency_bonus, 2);
    }

    #[test]
    fn casters_get_their_starter_spells() {
        let record = sample_record();
        assert_eq!(record.spells, vec!["Spirit Guardians", "Revivify"]);
    }
}
