use crate::core::types::RecordPos;
use crate::index::high_grade::HighGradeIndex;

/// Positions of records holding a high grade in every listed course,
/// ascending by position.
///
/// Absence is data here, not failure: an empty course list and a course with
/// no index entry both fold into an empty result, so this path never errors.
pub fn query_high_grades(index: &HighGradeIndex, courses: &[String]) -> Vec<RecordPos> {
    // Empty query means "no filter given", not "all records"
    let first = match courses.first() {
        Some(course) => course,
        None => return Vec::new(),
    };

    // Seed with the first course; a miss short-circuits the whole query
    let mut running = match index.course_postings(first) {
        Some(postings) => postings.clone(),
        None => return Vec::new(),
    };

    for course in &courses[1..] {
        let postings = match index.course_postings(course) {
            Some(postings) => postings,
            None => return Vec::new(), // Unknown course empties the result
        };

        running = running.intersect(postings);
        if running.is_empty() {
            // Later courses cannot grow an empty intersection, but an absent
            // one must still empty the result - which it already is
            break;
        }
    }

    running.positions
}
