// 📚 Course Records - Raw rows per source and their classified forms
//
// Four sources feed a student's report: regular coursework, AP credit,
// IB credit, and transfer credit. Each has its own row struct with only
// the columns that source carries; missing columns read as empty.

use crate::category::CategorySet;
use crate::loader::{field, Row};
use crate::sorter::CourseKey;
use serde::{Deserialize, Serialize};

// ============================================================================
// COURSE NUMBER DECOMPOSITION
// ============================================================================

/// Split a course number into (all digits, all letters), discarding
/// anything else. `"101A"` → `("101", "A")`, `" 20 R "` → `("20", "R")`.
pub fn split_digits_and_letters(number: &str) -> (String, String) {
    let digits = number.chars().filter(|c| c.is_ascii_digit()).collect();
    let letters = number.chars().filter(|c| c.is_alphabetic()).collect();
    (digits, letters)
}

/// Split trailing letters off a number: `"18A"` → `("18", "A")`.
/// Numbers without a trailing letter run come back with an empty suffix.
pub fn split_trailing_letters(number: &str) -> (&str, &str) {
    let prefix = number.trim_end_matches(|c: char| c.is_alphabetic());
    (prefix, &number[prefix.len()..])
}

/// Split a trimmed number at the end of its leading digit run:
/// `" 100A "` → `("100", "A")`, `"CALC"` → `("", "CALC")`.
pub fn split_leading_digits(number: &str) -> (&str, &str) {
    let trimmed = number.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed.split_at(end)
}

/// Integer value of the leading digit run. No digits, or a run too long
/// to fit, reads as 0.
pub fn leading_number(number: &str) -> u64 {
    split_leading_digits(number).0.parse().unwrap_or(0)
}

// ============================================================================
// RAW ROWS
// ============================================================================

/// Regular coursework row (`id, dept, crsnum, grade, units`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularCourseRow {
    pub student_id: String,
    pub department: String,
    /// Raw course number; may carry a letter suffix (`"101A"`)
    pub number: String,
    pub grade: String,
    pub units: String,
}

impl RegularCourseRow {
    pub fn from_row(row: &Row) -> Self {
        RegularCourseRow {
            student_id: field(row, "id").to_string(),
            department: field(row, "dept").to_string(),
            number: field(row, "crsnum").to_string(),
            grade: field(row, "grade").to_string(),
            units: field(row, "units").to_string(),
        }
    }
}

/// AP or IB credit row (`id, dept, crsnum, title, units`); the exam
/// exports carry many more columns, none of which matter here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamCreditRow {
    pub student_id: String,
    pub department: String,
    pub number: String,
    pub title: String,
    pub units: String,
}

impl ExamCreditRow {
    pub fn from_row(row: &Row) -> Self {
        ExamCreditRow {
            student_id: field(row, "id").to_string(),
            department: field(row, "dept").to_string(),
            number: field(row, "crsnum").to_string(),
            title: field(row, "title").to_string(),
            units: field(row, "units").to_string(),
        }
    }
}

/// Transfer credit row (`id, dept, crsnum, title, units, grade`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferCourseRow {
    pub student_id: String,
    pub department: String,
    pub number: String,
    pub title: String,
    pub units: String,
    pub grade: String,
}

impl TransferCourseRow {
    pub fn from_row(row: &Row) -> Self {
        TransferCourseRow {
            student_id: field(row, "id").to_string(),
            department: field(row, "dept").to_string(),
            number: field(row, "crsnum").to_string(),
            title: field(row, "title").to_string(),
            units: field(row, "units").to_string(),
            grade: field(row, "grade").to_string(),
        }
    }
}

// ============================================================================
// CLASSIFIED COURSES
// ============================================================================

/// A regular course after classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedCourse {
    #[serde(rename = "dept")]
    pub department: String,

    #[serde(rename = "crsnum")]
    pub number: String,

    pub grade: String,

    /// Final category set, forced inclusions already applied.
    #[serde(rename = "types")]
    pub categories: CategorySet,
}

impl ClassifiedCourse {
    /// Listed under more than one category
    pub fn is_cross_listed(&self) -> bool {
        self.categories.len() > 1
    }
}

/// AP/IB credit placed into at least one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamCreditCourse {
    #[serde(rename = "dept")]
    pub department: String,

    #[serde(rename = "crsnum")]
    pub number: String,

    /// Exam title
    pub description: String,

    pub units: String,

    #[serde(rename = "types")]
    pub categories: CategorySet,
}

impl ExamCreditCourse {
    pub fn is_cross_listed(&self) -> bool {
        self.categories.len() > 1
    }
}

/// AP/IB credit no rule matched. Carried through with a synthesized grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncategorizedCourse {
    #[serde(rename = "dept")]
    pub department: String,

    #[serde(rename = "crsnum")]
    pub number: String,

    pub title: String,
    pub units: String,
    pub grade: String,
}

/// Transfer credit, never classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferCourse {
    #[serde(rename = "dept")]
    pub department: String,

    #[serde(rename = "crsnum")]
    pub number: String,

    pub title: String,
    pub units: String,
    pub grade: String,
}

impl From<&TransferCourseRow> for TransferCourse {
    fn from(row: &TransferCourseRow) -> Self {
        TransferCourse {
            department: row.department.clone(),
            number: row.number.clone(),
            title: row.title.clone(),
            units: row.units.clone(),
            grade: row.grade.clone(),
        }
    }
}

macro_rules! impl_course_key {
    ($($ty:ty),*) => {
        $(
            impl CourseKey for $ty {
                fn department(&self) -> &str {
                    &self.department
                }

                fn course_number(&self) -> &str {
                    &self.number
                }
            }
        )*
    };
}

impl_course_key!(ClassifiedCourse, ExamCreditCourse, UncategorizedCourse, TransferCourse);

// ============================================================================
// TESTS
// ============================================================================
