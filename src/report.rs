// 📋 Screening Report - Run the pipeline over the roster
//
// roster → categorize every source per student → bin → ordered list.
// Rendering is someone else's job; this hands back structured data plus
// the two flat exports the office actually uses (roster CSV, JSON).

use crate::binning::{EligibilityBin, EligibilityBinner};
use crate::categorizer::Categorizer;
use crate::category::{class_types, CategoryLabel};
use crate::config::ScreeningPolicy;
use crate::repository::ScreeningRepository;
use crate::student::Student;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Column headings of the roster export
pub const ROSTER_HEADINGS: [&str; 21] = [
    "Full Name",
    "First Name",
    "Middle Name",
    "Last Name",
    "PID",
    "College",
    "Major Code",
    "Major Description",
    "Class Level",
    "Gender",
    "Cumulative Units",
    "Cumulative GPA",
    "Email(UCSD)",
    "Permanent Mailing Addresss Line 1",
    "Permanent Mailing City Line 1",
    "Permanent Mailing State Line 1",
    "Permanent Mailing Zip Code Line 1",
    "Permanent Mailing Country Line 1",
    "Permanent Phone Number",
    "Graduating Quarter",
    "Registration Status",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub generated_at: DateTime<Utc>,

    /// SHA-256 of the rule table the run classified against
    pub rule_table_fingerprint: String,

    pub class_types: Vec<CategoryLabel>,

    /// Bin 1, then bin 2, then bin 3
    pub students: Vec<Student>,
}

impl ScreeningReport {
    pub fn build(repo: &ScreeningRepository, policy: &ScreeningPolicy) -> Self {
        let rules = repo.rules();
        let categorizer = Categorizer::new(rules, policy);
        let countries = repo.countries();
        let colleges = repo.colleges();

        let students: Vec<Student> = repo
            .students()
            .iter()
            .map(|profile| {
                let rows = repo.course_rows(&profile.id);
                let mut student = categorizer.categorize_student(profile.clone(), rows);
                student.country = countries.name_for(&profile.mailing_country);
                student.college_name = colleges.name_for(&profile.college);
                student
            })
            .collect();

        let students = EligibilityBinner::new(policy).bin_students(students);

        ScreeningReport {
            generated_at: Utc::now(),
            rule_table_fingerprint: rules.fingerprint().to_string(),
            class_types: class_types(),
            students,
        }
    }

    /// Students per bin, indexed bin 1..=3 → 0..=2
    pub fn bin_counts(&self) -> [usize; 3] {
        EligibilityBin::ALL.map(|bin| self.students_in(bin).count())
    }

    pub fn students_in(&self, bin: EligibilityBin) -> impl Iterator<Item = &Student> {
        self.students.iter().filter(move |s| s.bin == Some(bin))
    }

    pub fn summary(&self) -> String {
        let [first, second, third] = self.bin_counts();
        format!(
            "Students: {} (bin 1: {}, bin 2: {}, bin 3: {}), rules {}",
            self.students.len(),
            first,
            second,
            third,
            self.rule_table_fingerprint.chars().take(12).collect::<String>()
        )
    }

    /// Roster CSV in report order
    pub fn write_roster_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(ROSTER_HEADINGS)
            .context("Failed to write roster heading")?;

        for student in &self.students {
            let p = &student.profile;
            wtr.write_record([
                &p.name,
                &p.first_name,
                &p.middle_name,
                &p.last_name,
                &p.id,
                &p.college,
                &p.major,
                &p.major_description,
                &p.level,
                &p.gender,
                &p.cumulative_units,
                &p.cumulative_gpa,
                &p.email,
                &p.mailing_line1,
                &p.mailing_city,
                &p.mailing_state,
                &p.mailing_zip,
                &p.mailing_country,
                &p.phone,
                &p.graduating_quarter,
                &p.registration_status,
            ])
            .with_context(|| format!("Failed to write roster row for {}", p.id))?;
        }

        wtr.flush().context("Failed to flush roster CSV")?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryCode;
    use crate::course::{RegularCourseRow, TransferCourseRow};
    use crate::reference::CountryDirectory;
    use crate::repository::ScreeningTables;
    use crate::rules::{ClassificationRule, DivisionScope, RuleTable};
    use crate::student::StudentProfile;

    fn profile(id: &str, college: &str, country: &str) -> StudentProfile {
        StudentProfile {
            name: format!("Student {}", id),
            id: id.to_string(),
            college: college.to_string(),
            mailing_country: country.to_string(),
            ..StudentProfile::default()
        }
    }

    fn regular(id: &str, dept: &str, num: &str) -> RegularCourseRow {
        RegularCourseRow {
            student_id: id.to_string(),
            department: dept.to_string(),
            number: num.to_string(),
            grade: "A".to_string(),
            units: "4".to_string(),
        }
    }

    fn transfer(id: &str, num: usize) -> TransferCourseRow {
        TransferCourseRow {
            student_id: id.to_string(),
            department: "TRNS".to_string(),
            number: num.to_string(),
            title: format!("Transfer {}", num),
            units: "3".to_string(),
            grade: "A".to_string(),
        }
    }

    fn repo() -> ScreeningRepository {
        ScreeningRepository::in_memory(ScreeningTables {
            rules: RuleTable::from_rules(vec![
                ClassificationRule::new("SPAN", "*", "*", DivisionScope::LowerOnly, "LA"),
                ClassificationRule::new("MATH", "*", "*", DivisionScope::LowerOnly, "MS"),
            ]),
            students: vec![
                profile("A", "MU", "US"),
                profile("B", "MU", "US"),
                profile("C", "RE", "US"),
                profile("D", "WA", "MX"),
            ],
            regular: vec![
                regular("A", "SPAN", "1"),
                regular("B", "MATH", "20"),
                regular("D", "MATH", "20"),
            ],
            transfer: (0..9).map(|i| transfer("C", i)).collect(),
            countries: CountryDirectory::with_entries(&[("US", "United States"), ("MX", "Mexico")]),
            ..ScreeningTables::default()
        })
    }

    #[test]
    fn test_build_bins_and_orders_students() {
        let report = ScreeningReport::build(&repo(), &ScreeningPolicy::default());

        let ids: Vec<&str> = report.students.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["B", "C", "A", "D"]);
        assert_eq!(report.bin_counts(), [1, 1, 2]);
        assert_eq!(report.students_in(EligibilityBin::Remaining).count(), 2);

        let a = &report.students[2];
        assert_eq!(a.language_course_count(), 1);
        assert_eq!(a.classes.count(CategoryCode::Language), 1);

        let d = &report.students[3];
        assert_eq!(d.country, "Mexico");
        assert_eq!(d.college_name, "WA");
        assert_eq!(report.students[1].transfer_classes.len(), 9);
    }

    #[test]
    fn test_report_metadata() {
        let report = ScreeningReport::build(&repo(), &ScreeningPolicy::default());
        assert_eq!(report.rule_table_fingerprint.len(), 64);
        assert_eq!(report.class_types.len(), 5);
        assert!(report.summary().starts_with("Students: 4 (bin 1: 1, bin 2: 1, bin 3: 2)"));
    }

    #[test]
    fn test_roster_csv() {
        let report = ScreeningReport::build(&repo(), &ScreeningPolicy::default());
        let mut out = Vec::new();
        report.write_roster_csv(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Full Name,First Name,Middle Name,Last Name,PID"));
        assert!(lines[1].starts_with("Student B,,,,B,MU"));
    }

    #[test]
    fn test_json_export() {
        let report = ScreeningReport::build(&repo(), &ScreeningPolicy::default());
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["students"][0]["bin"], 1);
        assert_eq!(json["students"][0]["classes"]["MS"][0]["dept"], "MATH");
        assert_eq!(json["students"][0]["classes"]["MS"][0]["types"], serde_json::json!(["MS"]));
        assert_eq!(json["class_types"][0]["code"], "LS");
    }

    #[test]
    fn test_summary_of_loaded_report() {
        let json = r#"{
            "generated_at": "2026-01-01T00:00:00Z",
            "rule_table_fingerprint": "abcdefghijké",
            "class_types": [],
            "students": []
        }"#;
        let report: ScreeningReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.summary(), "Students: 0 (bin 1: 0, bin 2: 0, bin 3: 0), rules abcdefghijké");

        let short = ScreeningReport {
            rule_table_fingerprint: "ab".to_string(),
            ..report
        };
        assert!(short.summary().ends_with("rules ab"));
    }

    #[test]
    fn test_empty_repository() {
        let repo = ScreeningRepository::in_memory(ScreeningTables::default());
        let report = ScreeningReport::build(&repo, &ScreeningPolicy::default());
        assert!(report.students.is_empty());
        assert_eq!(report.bin_counts(), [0, 0, 0]);
    }
}
