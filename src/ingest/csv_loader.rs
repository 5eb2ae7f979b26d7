use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use crate::core::error::Result;
use crate::core::types::LearnerRecord;
use crate::ingest::fields::{
    parse_active_courses_cell, parse_learner_id, parse_past_grades_cell, parse_year,
};

/// Loader for the registrar CSV export:
///
/// ```text
/// name,id,department,year,past,active
/// Asha Rao,21522203,CSE,2021,DBMS:8|OOPS:9,CN|ML|101
/// ```
///
/// The first row is a header and is skipped. Rows missing a mandatory field
/// or carrying an unparseable year are skipped with a warning; the grade and
/// active-course cells are optional. Only an unreadable file is an error.
pub struct CsvLoader;

impl CsvLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<LearnerRecord>> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');

            if line_no == 0 {
                continue; // Header row
            }
            if line.is_empty() {
                continue;
            }

            match Self::parse_row(line) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    eprintln!("Warning: skipping row {} ({}): {}", line_no + 1, reason, line);
                }
            }
        }

        Ok(records)
    }

    /// Parse one data row. The six cells are
    /// name, id, department, year, past grades, active courses; missing
    /// trailing cells read as empty.
    pub fn parse_row(line: &str) -> std::result::Result<LearnerRecord, &'static str> {
        let mut cells = line.split(',');
        let name = cells.next().unwrap_or("");
        let id_cell = cells.next().unwrap_or("");
        let department = cells.next().unwrap_or("");
        let year_cell = cells.next().unwrap_or("");
        let past_cell = cells.next().unwrap_or("");
        let active_cell = cells.next().unwrap_or("");

        if name.is_empty() || id_cell.is_empty() || department.is_empty() || year_cell.is_empty() {
            return Err("missing mandatory fields");
        }

        let year = match parse_year(year_cell) {
            Some(year) => year,
            None => return Err("invalid enrollment year"),
        };

        let mut record = LearnerRecord::new(
            name.to_string(),
            parse_learner_id(id_cell),
            department.to_string(),
            year,
        );

        for (course, grade) in parse_past_grades_cell(past_cell) {
            record.add_past_course(course, grade);
        }
        for course in parse_active_courses_cell(active_cell) {
            record.add_active_course(course);
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{CourseRef, LearnerId};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_valid_rows() {
        let csv = "name,id,department,year,past,active\n\
                   Asha Rao,21522203,CSE,2021,DBMS:8|OOPS:9,CN|ML|101\n\
                   Bo Li,IIITD-7,ECE,2020,,\n";
        let file = write_csv(csv);

        let records = CsvLoader::load(file.path()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].name, "Asha Rao");
        assert_eq!(records[0].id, LearnerId::Numeric(21522203));
        assert_eq!(records[0].grade("DBMS"), Some(8));
        assert_eq!(records[0].active_courses.last(), Some(&CourseRef::Coded(101)));

        assert_eq!(records[1].id, LearnerId::Code("IIITD-7".to_string()));
        assert!(records[1].past_grades.is_empty());
        assert!(records[1].active_courses.is_empty());
    }

    #[test]
    fn skips_malformed_rows() {
        let csv = "name,id,department,year,past,active\n\
                   ,1,CSE,2021,,\n\
                   NoYear,2,CSE,,\n\
                   BadYear,3,CSE,20x1,,\n\
                   Ok Row,4,CSE,2021,,\n";
        let file = write_csv(csv);

        let records = CsvLoader::load(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ok Row");
    }

    #[test]
    fn skips_blank_lines_and_crlf() {
        let csv = "name,id,department,year,past,active\r\n\
                   \r\n\
                   Asha Rao,1,CSE,2021,CN:9,ML\r\n";
        let file = write_csv(csv);

        let records = CsvLoader::load(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].grade("CN"), Some(9));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = CsvLoader::load("/definitely/not/here.csv");
        assert!(result.is_err());
    }

    #[test]
    fn short_row_reads_missing_cells_as_empty() {
        let record = CsvLoader::parse_row("Asha Rao,1,CSE,2021").unwrap();
        assert!(record.past_grades.is_empty());
        assert!(record.active_courses.is_empty());
    }

    #[test]
    fn header_is_never_parsed_as_data() {
        let csv = "name,id,department,year,past,active\n";
        let file = write_csv(csv);
        let records = CsvLoader::load(file.path()).unwrap();
        assert!(records.is_empty());
    }
}
