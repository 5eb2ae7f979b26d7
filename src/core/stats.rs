use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use uuid::Uuid;
use crate::query::cache::CacheStats;

/// Identity of one bulk load. The store is replaced wholesale on every load,
/// so a fresh generation id marks every index rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadGeneration {
    pub id: Uuid,
    pub loaded_at: DateTime<Utc>,
    pub record_count: usize,
}

impl LoadGeneration {
    pub fn new(record_count: usize) -> Self {
        LoadGeneration {
            id: Uuid::new_v4(),
            loaded_at: Utc::now(),
            record_count,
        }
    }
}

/// Registry statistics for monitoring
#[derive(Debug, Clone, Serialize)]
pub struct RegistryStats {
    // General info
    pub uptime_secs: u64,

    // Store metrics
    pub total_records: usize,
    pub indexed_courses: usize,
    pub grade_threshold: u32,
    pub generation: Option<LoadGeneration>,

    // Operation metrics
    pub query_count: u64,
    pub sort_count: u64,
    pub cache_stats: CacheStats,
}
