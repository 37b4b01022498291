use log::info;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{RulesCache, CACHE_MAX_AGE};
use crate::engine::race::RACES;
use crate::error::AppError;

const RULES_TIMEOUT: Duration = Duration::from_secs(10);

// A reference entry as the rules API lists them.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    pub index: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ResourceList {
    results: Vec<ResourceRef>,
}

// The slice of class data the assembler needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassDetails {
    #[serde(default = "default_hit_die")]
    pub hit_die: u8,
    #[serde(default)]
    pub proficiencies: Vec<ResourceRef>,
    #[serde(default)]
    pub spellcasting: Option<Value>,
}

fn default_hit_die() -> u8 {
    8
}

impl Default for ClassDetails {
    fn default() -> Self {
        ClassDetails {
            hit_die: default_hit_die(),
            proficiencies: Vec::new(),
            spellcasting: None,
        }
    }
}

// Candidate list used when the rules source cannot be reached. Mirrors the
// engine's scoring table so every scored race stays reachable offline.
pub fn default_races() -> Vec<String> {
    RACES.iter().map(|race| race.to_string()).collect()
}

// Client for the rules-data API, fronted by the on-disk cache.
#[derive(Debug, Clone)]
pub struct RulesClient {
    http: reqwest::Client,
    base_url: String,
    cache: RulesCache,
}

impl RulesClient {
    pub fn new(base_url: &str, cache_dir: PathBuf) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(RULES_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: RulesCache::new(cache_dir, CACHE_MAX_AGE),
        })
    }

    // Fetches an endpoint path such as "races" or "classes/wizard", serving
    // from the cache when the entry is still fresh.
    pub async fn fetch(&self, path: &str) -> Result<Value, AppError> {
        let path = path.trim_matches('/');
        if path.is_empty() || path.split('/').any(|segment| segment == "..") {
            return Err(AppError::Rules(format!("invalid endpoint path: {path:?}")));
        }

        if let Some(value) = self.cache.get(path) {
            return Ok(value);
        }

        info!("[rules] fetching {path}");
        let url = format!("{}/api/{}", self.base_url, path);
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let value: Value = response.json().await?;
        self.cache.put(path, &value);
        Ok(value)
    }

    // The identifiers of the races the rules source currently offers.
    pub async fn races(&self) -> Result<Vec<String>, AppError> {
        let value = self.fetch("races").await?;
        let list: ResourceList = serde_json::from_value(value)?;
        Ok(list.results.into_iter().map(|entry| entry.index).collect())
    }

    pub async fn backgrounds(&self) -> Result<Vec<ResourceRef>, AppError> {
        let value = self.fetch("backgrounds").await?;
        let list: ResourceList = serde_json::from_value(value)?;
        Ok(list.results)
    }

    pub async fn class_details(&self, class: &str) -> Result<ClassDetails, AppError> {
        let value = self.fetch(&format!("classes/{}", class.to_lowercase())).await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_traversal_and_empty_paths() {
        let dir = tempfile::tempdir().unwrap();
        let client = RulesClient::new("https://example.test", dir.path().to_path_buf()).unwrap();
        for path in ["", "/", "../etc/passwd", "races/../secrets"] {
            let result = client.fetch(path).await;
            assert!(matches!(result, Err(AppError::Rules(_))), "path {path:?}");
        }
    }

    #[test]
    fn class_details_tolerate_missing_fields() {
        let details: ClassDetails = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(details.hit_die, 8);
        assert!(details.proficiencies.is_empty());
        assert!(details.spellcasting.is_none());
    }

    #[test]
    fn default_candidates_cover_the_scoring_table() {
        let candidates = default_races();
        assert!(candidates.iter().any(|race| race == "human"));
        assert_eq!(candidates.len(), RACES.len());
    }
}
