// 🔢 Course Ordering
// Department, then course number as an integer, then letter suffix

use crate::course::split_leading_digits;
use std::cmp::Ordering;
use std::sync::Arc;

/// Anything that can be placed in catalog order.
pub trait CourseKey {
    fn department(&self) -> &str;
    fn course_number(&self) -> &str;

    fn sort_key(&self) -> CourseSortKey {
        CourseSortKey::new(self.department(), self.course_number())
    }
}

impl<T: CourseKey + ?Sized> CourseKey for Arc<T> {
    fn department(&self) -> &str {
        (**self).department()
    }

    fn course_number(&self) -> &str {
        (**self).course_number()
    }
}

/// `(department, leading number, letter suffix)`.
///
/// `"100A"` → `(100, "A")`, `"2"` → `(2, "")`. A number with no leading
/// digits sorts as 0. The number is kept as its digit string without
/// leading zeros and compared by length first, so runs of any length
/// order numerically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSortKey {
    pub department: String,
    pub digits: String,
    pub suffix: String,
}

impl CourseSortKey {
    pub fn new(department: &str, number: &str) -> Self {
        let (digits, rest) = split_leading_digits(number);

        CourseSortKey {
            department: department.to_string(),
            digits: digits.trim_start_matches('0').to_string(),
            suffix: rest.chars().filter(|c| c.is_alphabetic()).collect(),
        }
    }
}

impl Ord for CourseSortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.department
            .cmp(&other.department)
            .then_with(|| self.digits.len().cmp(&other.digits.len()))
            .then_with(|| self.digits.cmp(&other.digits))
            .then_with(|| self.suffix.cmp(&other.suffix))
    }
}

impl PartialOrd for CourseSortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn compare_courses<T: CourseKey + ?Sized>(a: &T, b: &T) -> Ordering {
    a.sort_key().cmp(&b.sort_key())
}

/// Stable sort into catalog order
pub fn sort_courses<T: CourseKey>(courses: &mut [T]) {
    courses.sort_by_cached_key(|c| c.sort_key());
}

// ============================================================================
// TESTS
// ============================================================================
