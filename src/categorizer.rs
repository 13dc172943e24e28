// 🗂️ Categorizer - One student's rows from one source → category buckets
//
// Regular courses: filter, classify, force Humanities where policy says so.
// AP / IB credit: dedup, classify, unmatched rows go to an overflow list.
// Transfer credit: dedup only.
// Every list that leaves here is in catalog order.

use crate::category::{CategoryCode, CourseBuckets};
use crate::config::ScreeningPolicy;
use crate::course::{
    split_digits_and_letters, ClassifiedCourse, ExamCreditCourse, ExamCreditRow, RegularCourseRow,
    TransferCourse, TransferCourseRow, UncategorizedCourse,
};
use crate::filter::{dedup_by_key, exam_credit_key, transfer_key, CourseFilter};
use crate::matcher::Matcher;
use crate::rules::RuleTable;
use crate::sorter::sort_courses;
use crate::student::{Student, StudentProfile};
use std::sync::Arc;

/// AP or IB result for one student
#[derive(Debug, Clone, Default)]
pub struct ExamCreditOutcome {
    pub buckets: CourseBuckets<ExamCreditCourse>,
    pub uncategorized: Vec<UncategorizedCourse>,
}

/// A student's raw rows, already narrowed to that student
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentCourseRows<'r> {
    pub regular: &'r [RegularCourseRow],
    pub ap: &'r [ExamCreditRow],
    pub ib: &'r [ExamCreditRow],
    pub transfer: &'r [TransferCourseRow],
}

pub struct Categorizer<'a> {
    matcher: Matcher<'a>,
    filter: CourseFilter,
    policy: &'a ScreeningPolicy,
}

impl<'a> Categorizer<'a> {
    pub fn new(rules: &'a RuleTable, policy: &'a ScreeningPolicy) -> Self {
        Categorizer {
            matcher: Matcher::new(rules).with_upper_division_threshold(policy.upper_division_threshold),
            filter: CourseFilter::new(policy),
            policy,
        }
    }

    // ========================================================================
    // REGULAR COURSES
    // ========================================================================

    pub fn categorize_regular(&self, rows: &[RegularCourseRow]) -> CourseBuckets<ClassifiedCourse> {
        let mut buckets = CourseBuckets::new();

        for row in rows {
            if let Some(reason) = self.filter.exclusion_reason(row) {
                log::debug!(
                    "excluding {} {} for {}: {:?}",
                    row.department, row.number, row.student_id, reason
                );
                continue;
            }

            let (digits, letters) = split_digits_and_letters(&row.number);
            let mut categories = self.matcher.classify(&row.department, &digits, &letters);

            // Forced department: Humanities joins the set before placement
            if self.policy.is_forced_humanities(&row.department) {
                categories.insert(CategoryCode::Humanities);
            }

            if categories.is_empty() {
                continue;
            }

            let course = Arc::new(ClassifiedCourse {
                department: row.department.clone(),
                number: row.number.clone(),
                grade: row.grade.clone(),
                categories,
            });
            buckets.place(&course, &course.categories);
        }

        for bucket in buckets.buckets_mut() {
            sort_courses(bucket);
        }
        buckets
    }

    // ========================================================================
    // AP / IB CREDIT
    // ========================================================================

    pub fn categorize_exam_credit(&self, rows: &[ExamCreditRow]) -> ExamCreditOutcome {
        let mut outcome = ExamCreditOutcome::default();

        for row in dedup_by_key(rows, exam_credit_key) {
            let categories = self.matcher.classify(&row.department, &row.number, "");

            if categories.is_empty() {
                outcome.uncategorized.push(UncategorizedCourse {
                    department: row.department.clone(),
                    number: row.number.clone(),
                    title: row.title.clone(),
                    units: row.units.clone(),
                    grade: self.policy.uncategorized_grade.clone(),
                });
                continue;
            }

            let course = Arc::new(ExamCreditCourse {
                department: row.department.clone(),
                number: row.number.clone(),
                description: row.title.clone(),
                units: row.units.clone(),
                categories,
            });
            outcome.buckets.place(&course, &course.categories);
        }

        for bucket in outcome.buckets.buckets_mut() {
            sort_courses(bucket);
        }
        sort_courses(&mut outcome.uncategorized);
        outcome
    }

    // ========================================================================
    // TRANSFER CREDIT
    // ========================================================================

    pub fn collect_transfer(&self, rows: &[TransferCourseRow]) -> Vec<TransferCourse> {
        let mut courses: Vec<TransferCourse> = dedup_by_key(rows, transfer_key)
            .into_iter()
            .map(TransferCourse::from)
            .collect();
        sort_courses(&mut courses);
        courses
    }

    // ========================================================================
    // WHOLE STUDENT
    // ========================================================================

    /// Run all four sources for one student. The bin is left unset; it is
    /// assigned over the full student list afterwards.
    pub fn categorize_student(&self, profile: StudentProfile, rows: StudentCourseRows<'_>) -> Student {
        let mut student = Student::new(profile);

        student.classes = self.categorize_regular(rows.regular);

        let ap = self.categorize_exam_credit(rows.ap);
        student.ap_classes = ap.buckets;
        student.ap_uncategorized = ap.uncategorized;

        let ib = self.categorize_exam_credit(rows.ib);
        student.ib_classes = ib.buckets;
        student.ib_uncategorized = ib.uncategorized;

        student.transfer_classes = self.collect_transfer(rows.transfer);
        student
    }
}

// ============================================================================
// TESTS
// ============================================================================
