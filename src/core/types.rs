use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use std::fmt;

/// Position of a record inside the loaded store sequence (zero-based).
/// Query results and index postings refer to records by position; callers
/// resolve positions against whatever sequence the index was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordPos(pub u32);

impl RecordPos {
    pub fn new(pos: u32) -> Self {
        RecordPos(pos)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for RecordPos {
    fn from(pos: u32) -> Self {
        RecordPos(pos)
    }
}

/// Learner identifier - institutes issue either numeric roll numbers or
/// string codes, so exactly one variant holds a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LearnerId {
    Numeric(i64),
    Code(String),
}

impl LearnerId {
    pub fn as_numeric(&self) -> Option<i64> {
        match self {
            LearnerId::Numeric(n) => Some(*n),
            LearnerId::Code(_) => None,
        }
    }

    pub fn as_code(&self) -> Option<&str> {
        match self {
            LearnerId::Numeric(_) => None,
            LearnerId::Code(code) => Some(code),
        }
    }
}

impl fmt::Display for LearnerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LearnerId::Numeric(n) => write!(f, "{}", n),
            LearnerId::Code(code) => write!(f, "{}", code),
        }
    }
}

/// An actively-taken course - some departments name their courses, others
/// assign numeric codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseRef {
    Named(String),
    Coded(u32),
}

impl CourseRef {
    pub fn as_named(&self) -> Option<&str> {
        match self {
            CourseRef::Named(name) => Some(name),
            CourseRef::Coded(_) => None,
        }
    }

    pub fn as_coded(&self) -> Option<u32> {
        match self {
            CourseRef::Named(_) => None,
            CourseRef::Coded(code) => Some(*code),
        }
    }
}

impl fmt::Display for CourseRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CourseRef::Named(name) => write!(f, "{}", name),
            CourseRef::Coded(code) => write!(f, "{}", code),
        }
    }
}

/// A single learner row as loaded from the ingestion layer.
/// Immutable after construction: the two add_* methods exist for the loader
/// to populate the collections, after which the record is only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerRecord {
    pub name: String,
    pub id: LearnerId,
    pub department: String,
    pub enrollment_year: i32,
    pub past_grades: BTreeMap<String, u32>,
    pub active_courses: Vec<CourseRef>,
}

impl LearnerRecord {
    pub fn new(name: String, id: LearnerId, department: String, enrollment_year: i32) -> Self {
        LearnerRecord {
            name,
            id,
            department,
            enrollment_year,
            past_grades: BTreeMap::new(),
            active_courses: Vec::new(),
        }
    }

    pub fn add_past_course(&mut self, course: String, grade: u32) {
        self.past_grades.insert(course, grade);
    }

    pub fn add_active_course(&mut self, course: CourseRef) {
        self.active_courses.push(course);
    }

    pub fn grade(&self, course: &str) -> Option<u32> {
        self.past_grades.get(course).copied()
    }

    /// True when the learner scored at or above `threshold` in `course`.
    pub fn has_high_grade(&self, course: &str, threshold: u32) -> bool {
        match self.grade(course) {
            Some(grade) => grade >= threshold,
            None => false,
        }
    }
}

impl fmt::Display for LearnerRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "-----------------------------------")?;
        writeln!(f, "Name           : {}", self.name)?;
        writeln!(f, "ID             : {}", self.id)?;
        writeln!(f, "Department     : {}", self.department)?;
        writeln!(f, "Enrollment Year: {}", self.enrollment_year)?;

        write!(f, "Past Courses   : ")?;
        if self.past_grades.is_empty() {
            write!(f, "None")?;
        } else {
            for (course, grade) in &self.past_grades {
                write!(f, "{}({}) ", course, grade)?;
            }
        }
        writeln!(f)?;

        write!(f, "Current Courses: ")?;
        if self.active_courses.is_empty() {
            write!(f, "None")?;
        } else {
            for course in &self.active_courses {
                write!(f, "{} ", course)?;
            }
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LearnerRecord {
        let mut record = LearnerRecord::new(
            "Asha Rao".to_string(),
            LearnerId::Numeric(42),
            "CSE".to_string(),
            2021,
        );
        record.add_past_course("DBMS".to_string(), 9);
        record.add_past_course("OOPS".to_string(), 7);
        record.add_active_course(CourseRef::Named("ML".to_string()));
        record.add_active_course(CourseRef::Coded(101));
        record
    }

    #[test]
    fn grade_lookup() {
        let record = sample();
        assert_eq!(record.grade("DBMS"), Some(9));
        assert_eq!(record.grade("Physics"), None);
    }

    #[test]
    fn high_grade_threshold() {
        let record = sample();
        assert!(record.has_high_grade("DBMS", 9));
        assert!(!record.has_high_grade("OOPS", 9));
        assert!(!record.has_high_grade("Physics", 9));
    }

    #[test]
    fn id_variants() {
        assert_eq!(LearnerId::Numeric(7).as_numeric(), Some(7));
        assert_eq!(LearnerId::Numeric(7).as_code(), None);
        let code = LearnerId::Code("IIITD-99".to_string());
        assert_eq!(code.as_code(), Some("IIITD-99"));
        assert_eq!(code.as_numeric(), None);
    }

    #[test]
    fn course_ref_variants() {
        assert_eq!(CourseRef::Coded(101).as_coded(), Some(101));
        assert_eq!(CourseRef::Coded(101).as_named(), None);
        let named = CourseRef::Named("CN".to_string());
        assert_eq!(named.as_named(), Some("CN"));
    }

    #[test]
    fn display_card_marks_empty_collections() {
        let record = LearnerRecord::new(
            "Bo Li".to_string(),
            LearnerId::Code("X1".to_string()),
            "ECE".to_string(),
            2020,
        );
        let card = record.to_string();
        assert!(card.contains("Name           : Bo Li"));
        assert!(card.contains("Past Courses   : None"));
        assert!(card.contains("Current Courses: None"));
    }
}
