// Import necessary libraries and modules for file I/O and serialization.
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "./data/settings.json";

// Define a structure to hold application settings with serialization and
// deserialization capabilities.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub port: u16,
    pub rules_api_base_url: String, // Upstream rules-data API.
    pub ollama_base_url: String,    // Local language model endpoint.
    pub ollama_model: String,
    pub stable_diffusion_base_url: String, // Local image model endpoint.
    pub data_dir: String, // Root for the rules cache, settings and logs.
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            port: 3000,
            rules_api_base_url: "https://www.dnd5eapi.co".to_string(),
            ollama_base_url: "http://127.0.0.1:11434".to_string(),
            ollama_model: "llama3.2:3b".to_string(),
            stable_diffusion_base_url: "http://127.0.0.1:7860".to_string(),
            data_dir: "./data".to_string(),
        }
    }
}

impl Settings {
    // Load settings from the default file path.
    pub fn load() -> io::Result<Self> {
        Self::load_from_file(SETTINGS_FILE)
    }

    // Save current settings to the default file path.
    pub fn save(&self) -> io::Result<()> {
        self.save_to_file(SETTINGS_FILE)
    }

    pub fn load_from_file(path: &str) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&data)?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &str) -> io::Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(data.as_bytes())?;
        Ok(())
    }

    // Environment variables override whatever the settings file says, so a
    // deployment can point at remote model hosts without editing JSON.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port) = env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.port = port;
            }
        }
        if let Ok(url) = env::var("RULES_API_BASE_URL") {
            self.rules_api_base_url = url;
        }
        if let Ok(url) = env::var("OLLAMA_BASE_URL") {
            self.ollama_base_url = url;
        }
        if let Ok(model) = env::var("OLLAMA_MODEL") {
            self.ollama_model = model;
        }
        if let Ok(url) = env::var("STABLE_DIFFUSION_BASE_URL") {
            self.stable_diffusion_base_url = url;
        }
    }

    pub fn cache_dir(&self) -> PathBuf {
        Path::new(&self.data_dir).join("rules_cache")
    }
}
