use parking_lot::RwLock;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::stats::{LoadGeneration, RegistryStats};
use crate::core::types::{LearnerRecord, RecordPos};
use crate::index::high_grade::HighGradeIndex;
use crate::ingest::csv_loader::CsvLoader;
use crate::parallel::indexer::ParallelIndexBuilder;
use crate::parallel::sorter::parallel_sort_by_name;
use crate::query::cache::{QueryCache, QueryKey};
use crate::query::engine::query_high_grades;

/// The record store plus everything derived from it.
/// Replaced wholesale on every bulk load; the index always matches the
/// record sequence it sits next to.
struct StoreState {
    records: Vec<LearnerRecord>,
    index: HighGradeIndex,
    generation: Option<LoadGeneration>,
}

/// Owning facade over the learner store: bulk loading, the high-grade
/// intersection query, and the name-ordered working copy.
///
/// Queries take the read lock; a sort clones the records under the read lock
/// and works on the clone, so the store and index are never mutated while
/// either operation runs. Only a bulk load takes the write lock.
pub struct LearnerRegistry {
    config: Config,
    state: RwLock<StoreState>,
    query_cache: QueryCache,

    // Metrics
    start_time: Instant,
    query_count: AtomicU64,
    sort_count: AtomicU64,
}

impl LearnerRegistry {
    pub fn new(config: Config) -> Self {
        let query_cache = QueryCache::new(config.query_cache_size);
        let threshold = config.grade_threshold;

        LearnerRegistry {
            config,
            state: RwLock::new(StoreState {
                records: Vec::new(),
                index: HighGradeIndex::empty(threshold),
                generation: None,
            }),
            query_cache,
            start_time: Instant::now(),
            query_count: AtomicU64::new(0),
            sort_count: AtomicU64::new(0),
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(Config::default())
    }

    /// Replace the store with a new record sequence and rebuild the index in
    /// bulk. Cached query results refer to the previous generation's
    /// positions, so the cache empties here too.
    pub fn load_records(&self, records: Vec<LearnerRecord>) {
        let builder = ParallelIndexBuilder::from_config(&self.config);
        let index = builder.build(&records, self.config.grade_threshold);
        let generation = LoadGeneration::new(records.len());

        let mut state = self.state.write();
        state.index = index;
        state.generation = Some(generation);
        state.records = records;
        drop(state);

        self.query_cache.clear();
    }

    /// Load learners from a CSV export and replace the store with them.
    /// Returns how many rows survived ingestion.
    pub fn load_csv<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let records = CsvLoader::load(path)?;
        let count = records.len();
        self.load_records(records);
        Ok(count)
    }

    /// Positions of learners holding grade >= threshold in every listed
    /// course, ascending. Unknown courses and an empty list both yield an
    /// empty result rather than an error.
    pub fn query_high_grades(&self, courses: &[String]) -> Vec<RecordPos> {
        self.query_count.fetch_add(1, Ordering::Relaxed);

        let key = QueryKey::new(courses);
        if let Some(cached) = self.query_cache.get(&key) {
            return cached;
        }

        let state = self.state.read();
        let result = query_high_grades(&state.index, courses);
        drop(state);

        self.query_cache.put(key, result.clone());
        result
    }

    /// A name-ordered copy of the store. The store itself keeps its load
    /// order and stays queryable while the copy is being sorted.
    pub fn sorted_by_name(&self) -> Vec<LearnerRecord> {
        self.sort_count.fetch_add(1, Ordering::Relaxed);

        let mut working_copy = self.state.read().records.clone();
        parallel_sort_by_name(&mut working_copy);
        working_copy
    }

    /// Snapshot of the store in load order.
    pub fn records(&self) -> Vec<LearnerRecord> {
        self.state.read().records.clone()
    }

    /// Resolve a query position back to its record.
    pub fn record_at(&self, pos: RecordPos) -> Option<LearnerRecord> {
        self.state.read().records.get(pos.as_usize()).cloned()
    }

    pub fn record_count(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> RegistryStats {
        let state = self.state.read();
        RegistryStats {
            uptime_secs: self.start_time.elapsed().as_secs(),
            total_records: state.records.len(),
            indexed_courses: state.index.course_count(),
            grade_threshold: state.index.threshold,
            generation: state.generation.clone(),
            query_count: self.query_count.load(Ordering::Relaxed),
            sort_count: self.sort_count.load(Ordering::Relaxed),
            cache_stats: self.query_cache.stats(),
        }
    }
}
