use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: u32 = 1;

/// Per-word learning record. A word counts as "learned" once it has at
/// least one successful attempt; `learned_date` keeps the first date that
/// happened and is never overwritten afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningStat {
    pub successful_attempts: u32,
    pub last_attempt_date: Option<NaiveDate>,
    pub learned_date: Option<NaiveDate>,
}

impl LearningStat {
    pub fn is_learned(&self) -> bool {
        self.successful_attempts >= 1
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WordStatsData {
    pub schema_version: u32,
    pub stats: HashMap<String, LearningStat>,
}

impl Default for WordStatsData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            stats: HashMap::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileData {
    pub schema_version: u32,
    pub total_sessions: u32,
    pub streak_days: u32,
    pub best_streak: u32,
    pub last_active_date: Option<NaiveDate>,
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            total_sessions: 0,
            streak_days: 0,
            best_streak: 0,
            last_active_date: None,
        }
    }
}

/// Learner edits layered over the bundled catalogue asset.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogueData {
    pub schema_version: u32,
    pub favorites: Vec<String>,
    pub deleted: Vec<String>,
}

impl Default for CatalogueData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            favorites: Vec::new(),
            deleted: Vec::new(),
        }
    }
}
