/// Interactive registry console
///
/// Menu-driven loop over a LearnerRegistry: load a CSV, query high grades,
/// and display the cohort in original or sorted order. A sample export lives
/// at demos/cohort.csv.

use std::io::{self, BufRead, Write};
use gradex::core::registry::LearnerRegistry;
use gradex::core::types::LearnerRecord;

fn print_menu() {
    println!("\n==================== MENU ====================");
    println!("1. Load learners from CSV");
    println!("2. Sort learners (parallel sort)");
    println!("3. Display learners (original order)");
    println!("4. Display learners (sorted order)");
    println!("5. Query learners (high grade in given courses)");
    println!("6. Exit");
    println!("==============================================");
    print!("Enter choice: ");
    io::stdout().flush().ok();
}

fn main() {
    let registry = LearnerRegistry::with_default_config();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut sorted_learners: Vec<LearnerRecord> = Vec::new();
    let mut sorted = false;

    loop {
        print_menu();

        let choice = match lines.next() {
            Some(Ok(line)) => line.trim().to_string(),
            _ => break, // stdin closed
        };

        match choice.as_str() {
            "1" => {
                print!("Enter CSV filename: ");
                io::stdout().flush().ok();
                let filename = match lines.next() {
                    Some(Ok(line)) => line.trim().to_string(),
                    _ => break,
                };

                match registry.load_csv(&filename) {
                    Ok(count) => {
                        println!("[Success] Loaded {} learners from {}", count, filename);
                        sorted = false;
                    }
                    Err(e) => println!("[Error] Failed to load file: {}", e),
                }
            }

            "2" => {
                if registry.is_empty() {
                    println!("[Error] No learners loaded.");
                    continue;
                }

                sorted_learners = registry.sorted_by_name();
                sorted = true;
                println!("[Info] Sorting complete.");
            }

            "3" => {
                if registry.is_empty() {
                    println!("[Error] No learners loaded.");
                    continue;
                }

                println!("\n--- ORIGINAL ORDER ---");
                for record in registry.records() {
                    print!("{}", record);
                }
            }

            "4" => {
                if !sorted {
                    println!("[Error] You must sort first (choose option 2)");
                    continue;
                }

                println!("\n--- SORTED ORDER ---");
                for record in &sorted_learners {
                    print!("{}", record);
                }
            }

            "5" => {
                if registry.is_empty() {
                    println!("[Error] No learners loaded.");
                    continue;
                }

                print!("Enter course names (space separated): ");
                io::stdout().flush().ok();
                let line = match lines.next() {
                    Some(Ok(line)) => line,
                    _ => break,
                };

                let courses: Vec<String> = line.split_whitespace().map(String::from).collect();
                if courses.is_empty() {
                    println!("[Error] No courses provided.");
                    continue;
                }

                let hits = registry.query_high_grades(&courses);
                if hits.is_empty() {
                    println!(
                        "[Info] No learners found with a high grade in ALL given courses."
                    );
                    continue;
                }

                println!("\n--- QUERY RESULTS ---");
                for pos in hits {
                    if let Some(record) = registry.record_at(pos) {
                        print!("{}", record);
                    }
                }
            }

            "6" => {
                println!("Exiting program.");
                break;
            }

            _ => println!("[Error] Invalid option."),
        }
    }
}
