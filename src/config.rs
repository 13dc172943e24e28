// ⚙️ Screening Configuration - Data file locations and policy constants
//
// Everything here has a working default; a TOML file only needs the keys
// it wants to change.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningConfig {
    pub data: DataFiles,
    pub policy: ScreeningPolicy,
}

impl ScreeningConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let config: ScreeningConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;
        Ok(())
    }
}

// ============================================================================
// DATA FILES
// ============================================================================

/// Where each input table lives. File names are relative to `directory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    pub directory: PathBuf,
    pub rules: String,
    pub students: String,
    pub classes: String,
    pub ap_classes: String,
    pub ib_classes: String,
    pub transfer_classes: String,
    pub countries: String,
    pub colleges: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        DataFiles {
            directory: PathBuf::from("."),
            rules: "coursecrit.csv".to_string(),
            students: "pbk_screening.csv".to_string(),
            classes: "pbk_screening_classes.csv".to_string(),
            ap_classes: "pbk_screening_apclasses.csv".to_string(),
            ib_classes: "pbk_screening_ibclasses.csv".to_string(),
            transfer_classes: "pbk_screening_transferclasses.csv".to_string(),
            countries: "country_codes.csv".to_string(),
            colleges: "college_codes.csv".to_string(),
        }
    }
}

impl DataFiles {
    pub fn in_directory<P: Into<PathBuf>>(directory: P) -> Self {
        DataFiles {
            directory: directory.into(),
            ..DataFiles::default()
        }
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.directory.join(file)
    }
}

// ============================================================================
// POLICY
// ============================================================================

/// Screening policy constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningPolicy {
    /// Courses from these departments always count as Humanities
    pub forced_humanities_departments: Vec<String>,

    /// Wildcard rules: `Y` means >= this, `N` means < this
    pub upper_division_threshold: u64,

    /// Regular-course grade that means withdrawn (compared case-insensitively)
    pub withdrawn_grade: String,

    /// Regular-course number that is never counted
    pub excluded_course_number: String,

    /// Regular courses need strictly more units than this
    pub minimum_units: f64,

    /// Grade given to AP/IB credit that matched no category
    pub uncategorized_grade: String,

    /// College codes that never land in bin 1
    pub reserved_colleges: Vec<String>,

    /// Permanent-mailing country code counted as domestic
    pub domestic_country: String,

    /// Minimum transfer-course count for bin 2
    pub transfer_bin_threshold: usize,
}

impl Default for ScreeningPolicy {
    fn default() -> Self {
        ScreeningPolicy {
            forced_humanities_departments: vec!["HUM".to_string()],
            upper_division_threshold: 100,
            withdrawn_grade: "W".to_string(),
            excluded_course_number: "90".to_string(),
            minimum_units: 2.0,
            uncategorized_grade: "P".to_string(),
            reserved_colleges: vec!["RE".to_string(), "FI".to_string()],
            domestic_country: "US".to_string(),
            transfer_bin_threshold: 8,
        }
    }
}

impl ScreeningPolicy {
    pub fn is_forced_humanities(&self, department: &str) -> bool {
        let department = department.trim();
        self.forced_humanities_departments
            .iter()
            .any(|d| d == department)
    }

    pub fn is_reserved_college(&self, college: &str) -> bool {
        let college = college.trim();
        self.reserved_colleges.iter().any(|c| c == college)
    }

    pub fn is_domestic_country(&self, country: &str) -> bool {
        country.trim() == self.domestic_country
    }
}

// ============================================================================
// TESTS
// ============================================================================
