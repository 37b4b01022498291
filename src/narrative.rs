use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use rand::prelude::IndexedRandom;
use tokio::time::{timeout, Duration};

use crate::character::Personality;
use crate::error::AppError;

const TEXT_TIMEOUT: Duration = Duration::from_secs(60);

pub const FALLBACK_BACKSTORY: &str = "A mysterious adventurer begins their journey...";

// Offline name pool, used when the language model cannot be reached.
const FALLBACK_NAMES: &[&str] = &[
    "Anya", "Borin", "Caelen", "Elara", "Finn", "Gareth", "Lyra", "Orin", "Seraphina", "Thorne",
];

pub fn random_name() -> String {
    let mut rng = rand::rng();
    FALLBACK_NAMES
        .choose(&mut rng)
        .unwrap_or(&FALLBACK_NAMES[0])
        .to_string()
}

// Client for the local language model, spoken to through its
// OpenAI-compatible chat endpoint.
#[derive(Debug, Clone)]
pub struct NarrativeClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl NarrativeClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(format!("{}/v1", base_url.trim_end_matches('/')))
            // Ollama ignores the key but the client requires one.
            .with_api_key("ollama");
        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }

    async fn complete(&self, prompt: String) -> Result<String, AppError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .build()?;

        let response = match timeout(TEXT_TIMEOUT, self.client.chat().create(request)).await {
            Ok(response) => response?,
            Err(_) => return Err(AppError::Timeout),
        };

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AppError::TextGeneration("empty completion".to_string()))
    }

    pub async fn generate_name(
        &self,
        race: &str,
        class: &str,
        alignment: &str,
    ) -> Result<String, AppError> {
        let prompt = format!(
            "Generate a single, appropriate fantasy character name for a {race} {class} \
             with a {alignment} alignment. Respond with ONLY the name, no other text or punctuation."
        );
        let raw = self.complete(prompt).await?;
        let name = clean_name(&raw);
        if name.is_empty() {
            return Err(AppError::TextGeneration("empty name".to_string()));
        }
        Ok(name)
    }

    pub async fn generate_backstory(
        &self,
        name: &str,
        level: u8,
        race: &str,
        class: &str,
        alignment: &str,
    ) -> Result<String, AppError> {
        let prompt = format!(
            "Generate a concise D&D character backstory (around 100-150 words) for a {race} {class}. \
             Name: {name}, Level: {level}, Race: {race}, Class: {class}, Alignment: {alignment}. \
             Emphasize their origins, a key event that led them to adventure, and how their \
             alignment ({alignment}) manifests."
        );
        Ok(self.complete(prompt).await?.trim().to_string())
    }

    pub async fn generate_personality(
        &self,
        name: &str,
        level: u8,
        race: &str,
        class: &str,
        alignment: &str,
    ) -> Result<Personality, AppError> {
        let prompt = format!(
            "Based on the following D&D character details, generate 3 unique personality traits, \
             1 strong ideal, 1 personal bond, and 1 significant flaw. Do NOT include a backstory. \
             Format them clearly as \"Personality Trait: [text]\", \"Ideal: [text]\", \
             \"Bond: [text]\", \"Flaw: [text]\". \
             Details: Name: {name}, Level: {level}, Race: {race}, Class: {class}, \
             Alignment: {alignment}. Consider their {alignment} alignment."
        );
        let text = self.complete(prompt).await?;
        Ok(parse_personality(&text))
    }
}

// Strips quotes, trailing punctuation and stray whitespace from a model
// reply that should be a bare name.
fn clean_name(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(['.', '!', ',', '"', '\''])
        .trim_start_matches(['"', '\''])
        .trim()
        .to_string()
}

// Pulls the labelled lines out of a personality reply. Missing pieces get
// fixed defaults so the sheet never renders blank sections.
fn parse_personality(text: &str) -> Personality {
    let mut traits = Vec::new();
    let mut ideal = String::new();
    let mut bond = String::new();
    let mut flaw = String::new();

    for line in text.lines() {
        let line = line.trim().trim_start_matches(['-', '*']).trim();
        if let Some(rest) = line.strip_prefix("Personality Trait:") {
            traits.push(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("Ideal:") {
            ideal = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Bond:") {
            bond = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("Flaw:") {
            flaw = rest.trim().to_string();
        }
    }

    if traits.is_empty() {
        traits = vec!["Brave".to_string(), "Curious".to_string()];
    }
    if ideal.is_empty() {
        ideal = "To protect the innocent.".to_string();
    }
    if bond.is_empty() {
        bond = "My sacred oath.".to_string();
    }
    if flaw.is_empty() {
        flaw = "Overly trusting.".to_string();
    }

    Personality {
        traits: traits.join("\n"),
        ideal,
        bond,
        flaw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_model_decorations_from_names() {
        assert_eq!(clean_name("  \"Seraphina.\"  "), "Seraphina");
        assert_eq!(clean_name("Thorne"), "Thorne");
        assert_eq!(clean_name("'Elara',"), "Elara");
    }

    #[test]
    fn parses_a_well_formed_personality_reply() {
        let text = "Personality Trait: Stubborn\n\
                    Personality Trait: Loyal\n\
                    Ideal: Honor above all.\n\
                    Bond: My clan.\n\
                    Flaw: Too proud.";
        let personality = parse_personality(text);
        assert_eq!(personality.traits, "Stubborn\nLoyal");
        assert_eq!(personality.ideal, "Honor above all.");
        assert_eq!(personality.bond, "My clan.");
        assert_eq!(personality.flaw, "Too proud.");
    }

    #[test]
    fn fills_defaults_for_missing_sections() {
        let personality = parse_personality("Ideal: Freedom.");
        assert_eq!(personality.traits, "Brave\nCurious");
        assert_eq!(personality.ideal, "Freedom.");
        assert_eq!(personality.bond, "My sacred oath.");
        assert_eq!(personality.flaw, "Overly trusting.");
    }

    #[test]
    fn tolerates_bulleted_replies() {
        let personality = parse_personality("- Personality Trait: Patient\n* Flaw: Greedy");
        assert_eq!(personality.traits, "Patient");
        assert_eq!(personality.flaw, "Greedy");
    }

    #[test]
    fn random_name_draws_from_the_pool() {
        let name = random_name();
        assert!(FALLBACK_NAMES.contains(&name.as_str()));
    }
}
