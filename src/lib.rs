// PBK Screening - Core Library
// Classification engine used by the CLI and the integration tests

pub mod loader;      // CSV exports → header-keyed rows
pub mod category;    // Subject categories + per-category buckets
pub mod rules;       // Classification rules as data
pub mod course;      // Course rows and classified courses
pub mod sorter;      // (department, number, suffix) ordering
pub mod matcher;     // Course → category lookup
pub mod filter;      // Countable-course filter + dedup
pub mod config;
pub mod reference;   // Country / college code directories
pub mod student;
pub mod categorizer; // Per-student categorization across all sources
pub mod binning;     // Eligibility bins 1..3
pub mod repository;  // Lazily loaded tables for one run
pub mod report;
pub mod pid_check;

// Re-export commonly used types
pub use binning::{EligibilityBin, EligibilityBinner};
pub use categorizer::{Categorizer, ExamCreditOutcome, StudentCourseRows};
pub use category::{class_types, CategoryCode, CategoryLabel, CategorySet, CourseBuckets};
pub use config::{DataFiles, ScreeningConfig, ScreeningPolicy};
pub use course::{
    ClassifiedCourse, ExamCreditCourse, ExamCreditRow, RegularCourseRow,
    TransferCourse, TransferCourseRow, UncategorizedCourse,
};
pub use filter::{CourseFilter, ExclusionReason};
pub use matcher::Matcher;
pub use pid_check::{read_ids, IdComparison};
pub use reference::{CollegeDirectory, CountryDirectory};
pub use report::{ScreeningReport, ROSTER_HEADINGS};
pub use repository::{ScreeningRepository, ScreeningTables};
pub use rules::{ClassificationRule, DivisionScope, RuleTable};
pub use sorter::{compare_courses, sort_courses, CourseKey};
pub use student::{Student, StudentProfile};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
