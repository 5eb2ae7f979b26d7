use nom::{IResult, Parser, bytes::complete::*, character::complete::*, combinator::*, sequence::*};
use std::collections::BTreeMap;
use crate::core::types::{CourseRef, LearnerId};

// Cell micro-syntax, as produced by the registrar export:
//   past grades    "DBMS:8|OOPS:9"
//   active courses "CN|ML|101"      (numeric token = coded course)
// Tokens that fail their syntax are skipped, never fatal.

fn full_i64(input: &str) -> IResult<&str, i64> {
    all_consuming(i64).parse(input)
}

fn full_i32(input: &str) -> IResult<&str, i32> {
    all_consuming(i32).parse(input)
}

fn full_u32(input: &str) -> IResult<&str, u32> {
    all_consuming(u32).parse(input)
}

fn grade_entry(input: &str) -> IResult<&str, (&str, u32)> {
    all_consuming(separated_pair(take_till1(|c| c == ':'), char(':'), u32)).parse(input)
}

/// A cell that parses fully as an integer is a numeric roll number,
/// anything else is an institutional code string.
pub fn parse_learner_id(cell: &str) -> LearnerId {
    match full_i64(cell) {
        Ok((_, value)) => LearnerId::Numeric(value),
        Err(_) => LearnerId::Code(cell.to_string()),
    }
}

pub fn parse_year(cell: &str) -> Option<i32> {
    full_i32(cell).ok().map(|(_, year)| year)
}

/// Parse a `COURSE:GRADE|COURSE:GRADE` cell. Entries with broken syntax
/// (missing colon, non-numeric grade) are dropped; later duplicates of a
/// course overwrite earlier ones.
pub fn parse_past_grades_cell(cell: &str) -> BTreeMap<String, u32> {
    let mut grades = BTreeMap::new();
    if cell.is_empty() {
        return grades;
    }

    for token in cell.split('|') {
        if let Ok((_, (course, grade))) = grade_entry(token) {
            grades.insert(course.to_string(), grade);
        }
    }

    grades
}

/// Parse a `NAME|NAME|CODE` cell. Fully-numeric tokens become coded courses,
/// the rest named ones; empty tokens are skipped.
pub fn parse_active_courses_cell(cell: &str) -> Vec<CourseRef> {
    let mut courses = Vec::new();
    if cell.is_empty() {
        return courses;
    }

    for token in cell.split('|') {
        if token.is_empty() {
            continue;
        }
        match full_u32(token) {
            Ok((_, code)) => courses.push(CourseRef::Coded(code)),
            Err(_) => courses.push(CourseRef::Named(token.to_string())),
        }
    }

    courses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learner_id_disambiguation() {
        assert_eq!(parse_learner_id("21522203"), LearnerId::Numeric(21522203));
        assert_eq!(parse_learner_id("-7"), LearnerId::Numeric(-7));
        assert_eq!(
            parse_learner_id("IIITD-42"),
            LearnerId::Code("IIITD-42".to_string())
        );
        // Trailing garbage means the cell is not an integer
        assert_eq!(parse_learner_id("42x"), LearnerId::Code("42x".to_string()));
    }

    #[test]
    fn year_must_consume_fully() {
        assert_eq!(parse_year("2021"), Some(2021));
        assert_eq!(parse_year("2021a"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn grades_cell_happy_path() {
        let grades = parse_past_grades_cell("DBMS:8|OOPS:9");
        assert_eq!(grades.get("DBMS"), Some(&8));
        assert_eq!(grades.get("OOPS"), Some(&9));
        assert_eq!(grades.len(), 2);
    }

    #[test]
    fn grades_cell_skips_broken_entries() {
        let grades = parse_past_grades_cell("DBMS:8|NOCOLON|CN:x|ML:9");
        assert_eq!(grades.len(), 2);
        assert_eq!(grades.get("DBMS"), Some(&8));
        assert_eq!(grades.get("ML"), Some(&9));
    }

    #[test]
    fn grades_cell_empty() {
        assert!(parse_past_grades_cell("").is_empty());
    }

    #[test]
    fn grades_cell_duplicate_course_keeps_last() {
        let grades = parse_past_grades_cell("CN:5|CN:9");
        assert_eq!(grades.get("CN"), Some(&9));
        assert_eq!(grades.len(), 1);
    }

    #[test]
    fn active_cell_mixes_named_and_coded() {
        let courses = parse_active_courses_cell("CN|ML|101");
        assert_eq!(
            courses,
            vec![
                CourseRef::Named("CN".to_string()),
                CourseRef::Named("ML".to_string()),
                CourseRef::Coded(101),
            ]
        );
    }

    #[test]
    fn active_cell_skips_empty_tokens() {
        let courses = parse_active_courses_cell("CN||ML");
        assert_eq!(courses.len(), 2);
    }

    #[test]
    fn active_cell_negative_code_is_a_name() {
        let courses = parse_active_courses_cell("-101");
        assert_eq!(courses, vec![CourseRef::Named("-101".to_string())]);
    }
}
