/// Complete gradex API Demo
///
/// Demonstrates the major registry operations:
/// - Bulk loading learner records
/// - High-grade intersection queries
/// - Parallel sort by name
/// - Statistics and JSON export

use gradex::core::registry::LearnerRegistry;
use gradex::core::types::{CourseRef, LearnerId, LearnerRecord};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n╔═══════════════════════════════════════════════╗");
    println!("║     gradex Registry - Complete API Demo       ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    // Step 1: Create registry
    println!("Creating registry...");
    let registry = LearnerRegistry::with_default_config();
    println!("Done!\n");

    // Step 2: LOAD - Bulk load a cohort
    println!("Step 2: LOAD - Loading learner records...");
    let cohort = vec![
        learner("Cara Mehta", LearnerId::Numeric(3), &[("Math", 8), ("CS", 9)], &["ML"]),
        learner("Abel Thomas", LearnerId::Numeric(1), &[("Math", 9)], &["CN", "ML"]),
        learner(
            "Bhavna Iyer",
            LearnerId::Code("IIITD-21".to_string()),
            &[("Math", 10), ("CS", 9)],
            &["101"],
        ),
    ];
    registry.load_records(cohort);
    println!("  Loaded {} learners\n", registry.record_count());

    // Step 3: QUERY - Intersection over course lists
    println!("Step 3: QUERY - High-grade lookups...");
    for wanted in [vec!["Math"], vec!["Math", "CS"], vec!["Physics"]] {
        let courses: Vec<String> = wanted.iter().map(|s| s.to_string()).collect();
        let hits = registry.query_high_grades(&courses);
        println!("  {:?}: {} match(es)", wanted, hits.len());
        for pos in hits {
            if let Some(record) = registry.record_at(pos) {
                println!("    -> {}", record.name);
            }
        }
    }
    println!();

    // Step 4: SORT - Name-ordered working copy
    println!("Step 4: SORT - Parallel sort by name...");
    let sorted = registry.sorted_by_name();
    for record in &sorted {
        println!("  {}", record.name);
    }
    println!("  (store order is untouched)\n");

    // Step 5: EXPORT - Records as JSON
    println!("Step 5: EXPORT - Sorted cohort as JSON:");
    println!("{}", serde_json::to_string_pretty(&sorted)?);
    println!();

    // Step 6: STATS - Registry metrics
    println!("Step 6: STATISTICS - Registry metrics:");
    println!("  ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let stats = registry.stats();
    println!("  Total Records:       {}", stats.total_records);
    println!("  Indexed Courses:     {}", stats.indexed_courses);
    println!("  Grade Threshold:     {}", stats.grade_threshold);
    println!("  Queries Run:         {}", stats.query_count);
    println!("  Sorts Run:           {}", stats.sort_count);
    println!("  Cache Hit Rate:      {:.2}", stats.cache_stats.hit_rate());
    if let Some(generation) = &stats.generation {
        println!("  Load Generation:     {}", generation.id);
        println!("  Loaded At:           {}", generation.loaded_at);
    }

    println!("\n╔════════════════════════════════════════╗");
    println!("║     All API Operations Completed!      ║");
    println!("╚════════════════════════════════════════╝\n");

    Ok(())
}

/// Helper function to build a learner record
fn learner(
    name: &str,
    id: LearnerId,
    grades: &[(&str, u32)],
    active: &[&str],
) -> LearnerRecord {
    let mut record = LearnerRecord::new(name.to_string(), id, "CSE".to_string(), 2021);
    for (course, grade) in grades {
        record.add_past_course(course.to_string(), *grade);
    }
    for token in active {
        match token.parse::<u32>() {
            Ok(code) => record.add_active_course(CourseRef::Coded(code)),
            Err(_) => record.add_active_course(CourseRef::Named(token.to_string())),
        }
    }
    record
}
