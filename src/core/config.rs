#[derive(Debug, Clone)]
pub struct Config {
    pub grade_threshold: u32,

    // Parallel bulk index build
    pub index_workers: usize,               // Rayon worker count
    pub index_parallel_min_records: usize,  // Below this the build stays sequential

    // Query result cache
    pub query_cache_size: usize,            // LRU entries
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grade_threshold: 9,                      // "High grade" cutoff
            index_workers: num_cpus::get(),          // One worker per core
            index_parallel_min_records: 4096,        // Small cohorts build sequentially
            query_cache_size: 256,                   // 256 cached course-list queries
        }
    }
}
