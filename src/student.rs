// 🎓 Students - Roster profile plus every categorized course source

use crate::binning::EligibilityBin;
use crate::category::{CategoryCode, CourseBuckets};
use crate::config::ScreeningPolicy;
use crate::course::{ClassifiedCourse, ExamCreditCourse, TransferCourse, UncategorizedCourse};
use crate::loader::{field, Row};
use serde::{Deserialize, Serialize};

// ============================================================================
// PROFILE
// ============================================================================

/// One row of the screening roster export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    /// PID; joins the roster to every course table
    pub id: String,
    pub college: String,
    pub major: String,
    pub major_description: String,
    pub level: String,
    pub gender: String,
    pub cumulative_units: String,
    pub cumulative_gpa: String,
    pub email: String,
    pub mailing_line1: String,
    pub mailing_city: String,
    pub mailing_state: String,
    pub mailing_zip: String,
    /// Permanent-mailing country code
    pub mailing_country: String,
    pub phone: String,
    pub graduating_quarter: String,
    pub registration_status: String,
    pub second_major: String,
    pub second_major_description: String,
    pub application_term: String,
    pub language_proficiency: bool,
}

impl StudentProfile {
    pub fn from_row(row: &Row) -> Self {
        StudentProfile {
            name: field(row, "Full Name").to_string(),
            first_name: field(row, "First Name").to_string(),
            middle_name: field(row, "Middle Name").to_string(),
            last_name: field(row, "Last Name").to_string(),
            id: field(row, "PID").to_string(),
            college: field(row, "College").to_string(),
            major: field(row, "Major Code").to_string(),
            major_description: field(row, "Major Description").to_string(),
            level: field(row, "Class Level").to_string(),
            gender: field(row, "Gender").to_string(),
            cumulative_units: field(row, "Cumulative Units").to_string(),
            cumulative_gpa: field(row, "Cumulative GPA").to_string(),
            email: field(row, "Email(UCSD)").to_string(),
            // The export really does spell it "Addresss"
            mailing_line1: field(row, "Permanent Mailing Addresss Line 1").to_string(),
            mailing_city: field(row, "Permanent Mailing City Line 1").to_string(),
            mailing_state: field(row, "Permanent Mailing State Line 1").to_string(),
            mailing_zip: field(row, "Permanent Mailing Zip Code Line 1").to_string(),
            mailing_country: field(row, "Permanent Mailing Country Line 1").to_string(),
            phone: field(row, "Permanent Phone Number").to_string(),
            graduating_quarter: field(row, "Graduating Quarter").to_string(),
            registration_status: field(row, "Registration Status").to_string(),
            second_major: String::new(),
            second_major_description: String::new(),
            application_term: field(row, "Graduating Quarter").to_string(),
            language_proficiency: false,
        }
    }

    /// Non-seniors are flagged in the rendered roster
    pub fn is_senior(&self) -> bool {
        self.level == "SR"
    }
}

// ============================================================================
// STUDENT AGGREGATE
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub profile: StudentProfile,

    /// Display name of the permanent-mailing country
    pub country: String,

    pub college_name: String,

    pub classes: CourseBuckets<ClassifiedCourse>,
    pub ap_classes: CourseBuckets<ExamCreditCourse>,
    pub ap_uncategorized: Vec<UncategorizedCourse>,
    pub ib_classes: CourseBuckets<ExamCreditCourse>,
    pub ib_uncategorized: Vec<UncategorizedCourse>,
    pub transfer_classes: Vec<TransferCourse>,

    /// Set once by the binner, after every source is in
    pub bin: Option<EligibilityBin>,
}

impl Student {
    pub fn new(profile: StudentProfile) -> Self {
        Student {
            country: profile.mailing_country.clone(),
            college_name: profile.college.clone(),
            profile,
            classes: CourseBuckets::new(),
            ap_classes: CourseBuckets::new(),
            ap_uncategorized: Vec::new(),
            ib_classes: CourseBuckets::new(),
            ib_uncategorized: Vec::new(),
            transfer_classes: Vec::new(),
            bin: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.profile.id
    }

    /// Courses in a category across regular, AP, and IB sources
    pub fn category_count(&self, category: CategoryCode) -> usize {
        self.classes.count(category) + self.ap_classes.count(category) + self.ib_classes.count(category)
    }

    pub fn language_course_count(&self) -> usize {
        self.category_count(CategoryCode::Language)
    }

    /// Regular courses in a category that carry a grade; the rendered
    /// roster prints this as the per-category class count
    pub fn graded_count(&self, category: CategoryCode) -> usize {
        self.classes
            .get(category)
            .iter()
            .filter(|c| !c.grade.trim().is_empty())
            .count()
    }

    pub fn is_domestic(&self, policy: &ScreeningPolicy) -> bool {
        policy.is_domestic_country(&self.profile.mailing_country)
    }
}

// ============================================================================
// TESTS
// ============================================================================
