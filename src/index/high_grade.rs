use std::collections::HashMap;
use crate::core::types::{LearnerRecord, RecordPos};
use crate::index::posting::PostingList;

/// Inverted index from course name to the positions of records that scored
/// at or above the threshold in that course.
///
/// The index is a pure derivation of the record sequence it was built from:
/// it is discarded and rebuilt in bulk on every load, never patched for a
/// single record.
#[derive(Debug, Clone, PartialEq)]
pub struct HighGradeIndex {
    pub postings: HashMap<String, PostingList>,
    pub record_count: usize,
    pub threshold: u32,
}

impl HighGradeIndex {
    pub fn empty(threshold: u32) -> Self {
        HighGradeIndex {
            postings: HashMap::new(),
            record_count: 0,
            threshold,
        }
    }

    /// Build the index over a record sequence.
    ///
    /// Position `i` lands in the entry for course `c` iff
    /// `records[i].past_grades[c] >= threshold`. Records walk in store order,
    /// so every posting list comes out sorted ascending without a separate
    /// sort pass. Pure over its input: repeated builds from the same records
    /// yield identical contents.
    pub fn build(records: &[LearnerRecord], threshold: u32) -> Self {
        let mut postings: HashMap<String, PostingList> = HashMap::new();

        for (i, record) in records.iter().enumerate() {
            for (course, &grade) in &record.past_grades {
                if grade >= threshold {
                    postings
                        .entry(course.clone())
                        .or_default()
                        .push_in_order(RecordPos(i as u32));
                }
            }
        }

        HighGradeIndex {
            postings,
            record_count: records.len(),
            threshold,
        }
    }

    pub fn course_postings(&self, course: &str) -> Option<&PostingList> {
        self.postings.get(course)
    }

    pub fn contains_course(&self, course: &str) -> bool {
        self.postings.contains_key(course)
    }

    /// Iterator over every indexed course name.
    pub fn courses(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    pub fn course_count(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}
