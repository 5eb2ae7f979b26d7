use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::core::config::Config;
use crate::core::types::{LearnerRecord, RecordPos};
use crate::index::high_grade::HighGradeIndex;
use crate::index::posting::PostingList;

/// Parallel bulk builder for the high-grade index.
///
/// Records are chunked and scanned on the rayon pool; each chunk yields a
/// partial posting map which is folded back together in chunk order. Chunk
/// order equals store order, so the folded posting lists come out sorted
/// without a fixup pass and the result is identical to the sequential
/// `HighGradeIndex::build`.
pub struct ParallelIndexBuilder {
    pub workers: usize,
    pub min_records: usize,
    pub progress: Arc<AtomicUsize>,
}

impl ParallelIndexBuilder {
    pub fn new(workers: usize) -> Self {
        // Set number of threads for rayon; keep going on the default pool if
        // another component already configured it
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .ok();

        ParallelIndexBuilder {
            workers: workers.max(1),
            min_records: 4096,
            progress: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut builder = Self::new(config.index_workers);
        builder.min_records = config.index_parallel_min_records;
        builder
    }

    /// Records scanned so far in the build currently running.
    pub fn get_progress(&self) -> usize {
        self.progress.load(Ordering::Relaxed)
    }

    pub fn build(&self, records: &[LearnerRecord], threshold: u32) -> HighGradeIndex {
        self.progress.store(0, Ordering::Relaxed);

        // Small cohorts are not worth the fan-out
        if records.len() < self.min_records {
            self.progress.store(records.len(), Ordering::Relaxed);
            return HighGradeIndex::build(records, threshold);
        }

        let chunk_size = records.len().div_ceil(self.workers).max(1);

        // Scan chunks in parallel; each partial map holds ascending positions
        // because the chunk itself is walked in store order
        let partials: Vec<HashMap<String, Vec<RecordPos>>> = records
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(chunk_idx, chunk)| {
                let base = chunk_idx * chunk_size;
                let mut partial: HashMap<String, Vec<RecordPos>> = HashMap::new();

                for (offset, record) in chunk.iter().enumerate() {
                    for (course, &grade) in &record.past_grades {
                        if grade >= threshold {
                            partial
                                .entry(course.clone())
                                .or_default()
                                .push(RecordPos((base + offset) as u32));
                        }
                    }
                }

                self.progress.fetch_add(chunk.len(), Ordering::Relaxed);
                partial
            })
            .collect();

        // Fold partials in chunk order: chunk k's positions all precede
        // chunk k+1's, so plain appends keep every list sorted
        let mut postings: HashMap<String, PostingList> = HashMap::new();
        for partial in partials {
            for (course, positions) in partial {
                let list = postings.entry(course).or_default();
                for pos in positions {
                    list.push_in_order(pos);
                }
            }
        }

        HighGradeIndex {
            postings,
            record_count: records.len(),
            threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::LearnerId;
    use rand::Rng;

    fn random_records(count: usize) -> Vec<LearnerRecord> {
        let mut rng = rand::thread_rng();
        let courses = ["Math", "CS", "DBMS", "OOPS", "CN", "ML"];

        (0..count)
            .map(|i| {
                let mut rec = LearnerRecord::new(
                    format!("Learner-{i}"),
                    LearnerId::Numeric(i as i64),
                    "CSE".to_string(),
                    2020 + (i % 5) as i32,
                );
                for course in courses {
                    if rng.gen_bool(0.6) {
                        rec.add_past_course(course.to_string(), rng.gen_range(0..=10));
                    }
                }
                rec
            })
            .collect()
    }

    #[test]
    fn parallel_build_matches_sequential() {
        let records = random_records(10_000);

        let mut builder = ParallelIndexBuilder::new(4);
        builder.min_records = 0;

        let parallel = builder.build(&records, 9);
        let sequential = HighGradeIndex::build(&records, 9);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn small_cohort_takes_sequential_path() {
        let records = random_records(16);
        let builder = ParallelIndexBuilder::new(4); // min_records default far above 16

        let index = builder.build(&records, 9);
        assert_eq!(index, HighGradeIndex::build(&records, 9));
        assert_eq!(builder.get_progress(), records.len());
    }

    #[test]
    fn progress_reaches_record_count() {
        let records = random_records(5000);
        let mut builder = ParallelIndexBuilder::new(2);
        builder.min_records = 0;

        builder.build(&records, 9);
        assert_eq!(builder.get_progress(), records.len());
    }

    #[test]
    fn empty_records() {
        let builder = ParallelIndexBuilder::new(2);
        let index = builder.build(&[], 9);
        assert!(index.is_empty());
    }

    #[test]
    fn posting_lists_stay_sorted_across_chunk_seams() {
        let records = random_records(1000);
        let mut builder = ParallelIndexBuilder::new(7); // Deliberately uneven chunking
        builder.min_records = 0;

        let index = builder.build(&records, 9);
        for course in index.courses() {
            let postings = index.course_postings(course).unwrap();
            assert!(postings.positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
