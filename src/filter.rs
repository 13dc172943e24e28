// 🧹 Course Filter - Which rows count, and which rows are the same row
//
// Regular coursework: drop withdrawals, the excluded course number, and
// low-unit courses. Exam and transfer credit: collapse rows that repeat
// the same course (exports carry one row per articulation detail).

use crate::config::ScreeningPolicy;
use crate::course::{ExamCreditRow, RegularCourseRow, TransferCourseRow};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

// ============================================================================
// EXCLUSION REASONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExclusionReason {
    /// Grade is the withdrawn marker
    Withdrawn,

    /// Course number is the excluded number
    ExcludedNumber,

    /// Units column is not a number
    UnparseableUnits,

    /// Units at or below the minimum
    InsufficientUnits,
}

// ============================================================================
// COURSE FILTER
// ============================================================================

pub struct CourseFilter {
    withdrawn_grade: String,
    excluded_course_number: String,
    minimum_units: f64,
}

impl CourseFilter {
    pub fn new(policy: &ScreeningPolicy) -> Self {
        CourseFilter {
            withdrawn_grade: policy.withdrawn_grade.trim().to_uppercase(),
            excluded_course_number: policy.excluded_course_number.trim().to_string(),
            minimum_units: policy.minimum_units,
        }
    }

    /// Why a regular course does not count, or `None` if it does
    pub fn exclusion_reason(&self, row: &RegularCourseRow) -> Option<ExclusionReason> {
        if row.grade.trim().to_uppercase() == self.withdrawn_grade {
            return Some(ExclusionReason::Withdrawn);
        }

        if row.number.trim() == self.excluded_course_number {
            return Some(ExclusionReason::ExcludedNumber);
        }

        match row.units.trim().parse::<f64>() {
            Ok(units) if units.is_nan() => Some(ExclusionReason::UnparseableUnits),
            Ok(units) if units <= self.minimum_units => Some(ExclusionReason::InsufficientUnits),
            Ok(_) => None,
            Err(_) => Some(ExclusionReason::UnparseableUnits),
        }
    }

    pub fn is_countable(&self, row: &RegularCourseRow) -> bool {
        self.exclusion_reason(row).is_none()
    }
}

impl Default for CourseFilter {
    fn default() -> Self {
        Self::new(&ScreeningPolicy::default())
    }
}

// ============================================================================
// DEDUPLICATION
// ============================================================================

/// Identity of an AP/IB row: `(dept, crsnum, title, units)`
pub fn exam_credit_key(row: &ExamCreditRow) -> (&str, &str, &str, &str) {
    (&row.department, &row.number, &row.title, &row.units)
}

/// Identity of a transfer row: `(dept, crsnum, title, units, grade)`
pub fn transfer_key(row: &TransferCourseRow) -> (&str, &str, &str, &str, &str) {
    (&row.department, &row.number, &row.title, &row.units, &row.grade)
}

/// First occurrence of each key, in input order
pub fn dedup_by_key<'a, T, K, F>(rows: &'a [T], key: F) -> Vec<&'a T>
where
    K: Eq + Hash,
    F: Fn(&'a T) -> K,
{
    let mut seen = HashSet::new();
    rows.iter().filter(|row| seen.insert(key(*row))).collect()
}

// ============================================================================
// TESTS
// ============================================================================
