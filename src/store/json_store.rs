use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::store::schema::{CatalogueData, ProfileData, WordStatsData};

/// File-backed key-value store for everything the app persists. One JSON
/// file per record type under the platform data directory. Writes go
/// through a temp file + rename so a crash mid-write cannot truncate the
/// previous good copy.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocadrill");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_word_stats(&self) -> WordStatsData {
        self.load("word_stats.json")
    }

    pub fn save_word_stats(&self, data: &WordStatsData) -> Result<()> {
        self.save("word_stats.json", data)
    }

    pub fn load_profile(&self) -> ProfileData {
        self.load("profile.json")
    }

    pub fn save_profile(&self, data: &ProfileData) -> Result<()> {
        self.save("profile.json", data)
    }

    pub fn load_catalogue(&self) -> CatalogueData {
        self.load("catalogue.json")
    }

    pub fn save_catalogue(&self, data: &CatalogueData) -> Result<()> {
        self.save("catalogue.json", data)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::store::schema::LearningStat;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_files_load_as_defaults() {
        let (_dir, store) = make_test_store();
        assert!(store.load_word_stats().stats.is_empty());
        assert_eq!(store.load_profile().streak_days, 0);
        assert!(store.load_catalogue().deleted.is_empty());
    }

    #[test]
    fn word_stats_round_trip() {
        let (_dir, store) = make_test_store();
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();

        let mut data = WordStatsData::default();
        data.stats.insert(
            "cat".to_string(),
            LearningStat {
                successful_attempts: 1,
                last_attempt_date: Some(today),
                learned_date: Some(today),
            },
        );
        store.save_word_stats(&data).unwrap();

        let loaded = store.load_word_stats();
        let stat = loaded.stats.get("cat").unwrap();
        assert!(stat.is_learned());
        assert_eq!(stat.learned_date, Some(today));
    }

    #[test]
    fn corrupt_file_loads_as_default() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path("profile.json"), "not json {").unwrap();
        assert_eq!(store.load_profile().streak_days, 0);
    }

    #[test]
    fn save_leaves_no_tmp_file_behind() {
        let (dir, store) = make_test_store();
        store.save_profile(&ProfileData::default()).unwrap();

        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty());
    }
}
