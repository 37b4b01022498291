pub mod app;
pub mod cache;
pub mod character;
pub mod engine;
pub mod error;
pub mod logging;
pub mod narrative;
pub mod pdf;
pub mod portrait;
pub mod questions;
pub mod rules;
pub mod server;
pub mod settings;
pub mod sheet;
pub mod spells;

// Re-export commonly used items for easier access
pub use app::{App, GenerateRequest};
pub use character::{ability_modifier, CharacterRecord, Personality};
pub use engine::{
    derive_abilities, minimum_xp, proficiency_bonus, recommend_class, recommend_race,
    resolve_alignment, Ability, AbilityScores, Alignment,
};
pub use error::{AppError, EngineError};
pub use questions::{Question, QUESTIONS};
pub use settings::Settings;
