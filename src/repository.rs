// 🗄️ Screening Repository - Everything one report run reads
//
// Each table is loaded on first use and then frozen for the rest of the
// run. Course tables are grouped by student id once, so looking up one
// student's rows is a map hit rather than a scan.

use crate::config::DataFiles;
use crate::course::{ExamCreditRow, RegularCourseRow, TransferCourseRow};
use crate::categorizer::StudentCourseRows;
use crate::loader::{self, Row};
use crate::reference::{CollegeDirectory, CountryDirectory};
use crate::rules::RuleTable;
use crate::student::StudentProfile;
use anyhow::Result;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Pre-parsed tables for building a repository without touching disk
#[derive(Debug, Clone, Default)]
pub struct ScreeningTables {
    pub rules: RuleTable,
    pub students: Vec<StudentProfile>,
    pub regular: Vec<RegularCourseRow>,
    pub ap: Vec<ExamCreditRow>,
    pub ib: Vec<ExamCreditRow>,
    pub transfer: Vec<TransferCourseRow>,
    pub countries: CountryDirectory,
    pub colleges: CollegeDirectory,
}

type ByStudent<T> = HashMap<String, Vec<T>>;

fn group_by_student<T, F>(rows: Vec<T>, id: F) -> ByStudent<T>
where
    F: Fn(&T) -> &str,
{
    let mut grouped: ByStudent<T> = HashMap::new();
    for row in rows {
        grouped.entry(id(&row).to_string()).or_default().push(row);
    }
    grouped
}

pub struct ScreeningRepository {
    files: Option<DataFiles>,
    rules: OnceCell<RuleTable>,
    students: OnceCell<Vec<StudentProfile>>,
    regular: OnceCell<ByStudent<RegularCourseRow>>,
    ap: OnceCell<ByStudent<ExamCreditRow>>,
    ib: OnceCell<ByStudent<ExamCreditRow>>,
    transfer: OnceCell<ByStudent<TransferCourseRow>>,
    countries: OnceCell<CountryDirectory>,
    colleges: OnceCell<CollegeDirectory>,
}

impl ScreeningRepository {
    /// Repository backed by CSV files; nothing is read until asked for
    pub fn open(files: DataFiles) -> Self {
        ScreeningRepository {
            files: Some(files),
            rules: OnceCell::new(),
            students: OnceCell::new(),
            regular: OnceCell::new(),
            ap: OnceCell::new(),
            ib: OnceCell::new(),
            transfer: OnceCell::new(),
            countries: OnceCell::new(),
            colleges: OnceCell::new(),
        }
    }

    /// Repository over tables already in memory
    pub fn in_memory(tables: ScreeningTables) -> Self {
        ScreeningRepository {
            files: None,
            rules: OnceCell::from(tables.rules),
            students: OnceCell::from(tables.students),
            regular: OnceCell::from(group_by_student(tables.regular, |r| r.student_id.as_str())),
            ap: OnceCell::from(group_by_student(tables.ap, |r| r.student_id.as_str())),
            ib: OnceCell::from(group_by_student(tables.ib, |r| r.student_id.as_str())),
            transfer: OnceCell::from(group_by_student(tables.transfer, |r| r.student_id.as_str())),
            countries: OnceCell::from(tables.countries),
            colleges: OnceCell::from(tables.colleges),
        }
    }

    fn path(&self, pick: fn(&DataFiles) -> &str) -> Option<PathBuf> {
        self.files.as_ref().map(|files| files.path(pick(files)))
    }

    /// Rows of one table, or none if there is no backing file or it
    /// cannot be read
    fn load(&self, pick: fn(&DataFiles) -> &str) -> Vec<Row> {
        self.load_with(pick, |path| loader::read_rows(path))
    }

    /// Build a table from its backing file; an unreadable file gives the
    /// empty table
    fn load_with<T, F>(&self, pick: fn(&DataFiles) -> &str, build: F) -> T
    where
        T: Default,
        F: FnOnce(&Path) -> Result<T>,
    {
        let Some(path) = self.path(pick) else {
            return T::default();
        };
        match build(&path) {
            Ok(table) => table,
            Err(e) => {
                log::error!("{:#}; continuing with an empty table", e);
                T::default()
            }
        }
    }

    pub fn rules(&self) -> &RuleTable {
        self.rules.get_or_init(|| {
            self.load_with(|f| f.rules.as_str(), |path| RuleTable::from_csv(path))
        })
    }

    /// Roster, in export order
    pub fn students(&self) -> &[StudentProfile] {
        self.students.get_or_init(|| {
            self.load(|f| f.students.as_str())
                .iter()
                .map(StudentProfile::from_row)
                .collect()
        })
    }

    pub fn countries(&self) -> &CountryDirectory {
        self.countries.get_or_init(|| {
            self.load_with(|f| f.countries.as_str(), |path| CountryDirectory::from_csv(path))
        })
    }

    pub fn colleges(&self) -> &CollegeDirectory {
        self.colleges.get_or_init(|| {
            self.load_with(|f| f.colleges.as_str(), |path| CollegeDirectory::from_csv(path))
        })
    }

    pub fn regular_courses(&self, student_id: &str) -> &[RegularCourseRow] {
        let grouped = self.regular.get_or_init(|| {
            let rows: Vec<RegularCourseRow> = self
                .load(|f| f.classes.as_str())
                .iter()
                .map(RegularCourseRow::from_row)
                .collect();
            group_by_student(rows, |r: &RegularCourseRow| r.student_id.as_str())
        });
        rows_for(grouped, student_id)
    }

    pub fn ap_courses(&self, student_id: &str) -> &[ExamCreditRow] {
        let grouped = self.ap.get_or_init(|| {
            let rows: Vec<ExamCreditRow> = self
                .load(|f| f.ap_classes.as_str())
                .iter()
                .map(ExamCreditRow::from_row)
                .collect();
            group_by_student(rows, |r: &ExamCreditRow| r.student_id.as_str())
        });
        rows_for(grouped, student_id)
    }

    pub fn ib_courses(&self, student_id: &str) -> &[ExamCreditRow] {
        let grouped = self.ib.get_or_init(|| {
            let rows: Vec<ExamCreditRow> = self
                .load(|f| f.ib_classes.as_str())
                .iter()
                .map(ExamCreditRow::from_row)
                .collect();
            group_by_student(rows, |r: &ExamCreditRow| r.student_id.as_str())
        });
        rows_for(grouped, student_id)
    }

    pub fn transfer_courses(&self, student_id: &str) -> &[TransferCourseRow] {
        let grouped = self.transfer.get_or_init(|| {
            let rows: Vec<TransferCourseRow> = self
                .load(|f| f.transfer_classes.as_str())
                .iter()
                .map(TransferCourseRow::from_row)
                .collect();
            group_by_student(rows, |r: &TransferCourseRow| r.student_id.as_str())
        });
        rows_for(grouped, student_id)
    }

    /// Every source's rows for one student
    pub fn course_rows(&self, student_id: &str) -> StudentCourseRows<'_> {
        StudentCourseRows {
            regular: self.regular_courses(student_id),
            ap: self.ap_courses(student_id),
            ib: self.ib_courses(student_id),
            transfer: self.transfer_courses(student_id),
        }
    }
}

fn rows_for<'m, T>(grouped: &'m ByStudent<T>, student_id: &str) -> &'m [T] {
    grouped
        .get(student_id)
        .map(|v| v.as_slice())
        .unwrap_or(&[])
}

// ============================================================================
// TESTS
// ============================================================================
