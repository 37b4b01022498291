use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

// Rules data barely changes, so cached entries stay valid for a month.
pub const CACHE_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

// A file-per-key JSON cache over the rules-data API. Freshness is judged by
// file modification time; a stale or unreadable entry falls through to a
// fresh fetch, and write failures are logged but never fatal.
#[derive(Debug, Clone)]
pub struct RulesCache {
    dir: PathBuf,
    max_age: Duration,
}

impl RulesCache {
    pub fn new(dir: PathBuf, max_age: Duration) -> Self {
        Self { dir, max_age }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key.replace('/', "_")))
    }

    // Returns the cached value only when the entry exists, parses, and is
    // younger than max_age.
    pub fn get(&self, key: &str) -> Option<Value> {
        let path = self.entry_path(key);
        let metadata = fs::metadata(&path).ok()?;
        let modified = metadata.modified().ok()?;
        let age = SystemTime::now().duration_since(modified).ok()?;
        if age > self.max_age {
            info!("[cache] entry expired: {key}");
            return None;
        }

        let data = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&data) {
            Ok(value) => {
                info!("[cache] serving from cache: {key}");
                Some(value)
            }
            Err(err) => {
                warn!("[cache] unreadable entry for {key}: {err}");
                None
            }
        }
    }

    pub fn put(&self, key: &str, value: &Value) {
        if let Err(err) = fs::create_dir_all(&self.dir) {
            warn!("[cache] could not create cache dir: {err}");
            return;
        }
        let path = self.entry_path(key);
        match serde_json::to_string(value) {
            Ok(data) => {
                if let Err(err) = fs::write(&path, data) {
                    warn!("[cache] could not write entry for {key}: {err}");
                } else {
                    info!("[cache] stored entry: {key}");
                }
            }
            Err(err) => warn!("[cache] could not serialize entry for {key}: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_a_fresh_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RulesCache::new(dir.path().to_path_buf(), CACHE_MAX_AGE);
        let value = json!({"results": [{"index": "elf"}]});
        cache.put("races", &value);
        assert_eq!(cache.get("races"), Some(value));
    }

    #[test]
    fn slashes_in_keys_map_to_one_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RulesCache::new(dir.path().to_path_buf(), CACHE_MAX_AGE);
        cache.put("classes/wizard", &json!({"hit_die": 6}));
        assert!(dir.path().join("classes_wizard.json").exists());
        assert!(cache.get("classes/wizard").is_some());
    }

    #[test]
    fn zero_max_age_treats_everything_as_stale() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RulesCache::new(dir.path().to_path_buf(), Duration::ZERO);
        cache.put("races", &json!({}));
        assert_eq!(cache.get("races"), None);
    }

    #[test]
    fn missing_entries_are_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RulesCache::new(dir.path().to_path_buf(), CACHE_MAX_AGE);
        assert_eq!(cache.get("backgrounds"), None);
    }
}
