// 🏷️ Classification Rules - Rules as Data
// Course → category rules, loaded once per run and never mutated

use crate::loader::{self, field, Row};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;

/// Course number that turns a rule into a department-wide wildcard
pub const WILDCARD: &str = "*";

// ============================================================================
// DIVISION SCOPE
// ============================================================================

/// The `anyUD` column: which half of a department a wildcard rule covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivisionScope {
    /// `Y` - course numbers at or above the upper-division threshold
    UpperOnly,

    /// `N` - course numbers below the threshold
    LowerOnly,

    /// Column empty or anything else; never satisfies a wildcard
    Unset,
}

impl DivisionScope {
    pub fn from_flag(flag: &str) -> Self {
        match flag {
            "Y" => DivisionScope::UpperOnly,
            "N" => DivisionScope::LowerOnly,
            _ => DivisionScope::Unset,
        }
    }

    pub fn as_flag(&self) -> &'static str {
        match self {
            DivisionScope::UpperOnly => "Y",
            DivisionScope::LowerOnly => "N",
            DivisionScope::Unset => "",
        }
    }

    /// Does a course with this leading number fall inside the scope?
    pub fn admits(&self, course_number: u64, threshold: u64) -> bool {
        match self {
            DivisionScope::UpperOnly => course_number >= threshold,
            DivisionScope::LowerOnly => course_number < threshold,
            DivisionScope::Unset => false,
        }
    }
}

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub department: String,

    /// Course number, or `*` for a department wildcard
    pub number: String,

    pub letter: String,

    pub division: DivisionScope,

    /// Raw `classtype` label. Not guaranteed to be a known category; the
    /// matcher validates it before anything downstream sees it.
    pub category: String,
}

impl ClassificationRule {
    pub fn new(department: &str, number: &str, letter: &str, division: DivisionScope, category: &str) -> Self {
        ClassificationRule {
            department: department.to_string(),
            number: number.to_string(),
            letter: letter.to_string(),
            division,
            category: category.to_string(),
        }
    }

    /// Build from a `coursecrit` row
    /// (`department, coursenumber, courseletter, anyUD, classtype`)
    pub fn from_row(row: &Row) -> Self {
        ClassificationRule {
            department: field(row, "department").to_string(),
            number: field(row, "coursenumber").to_string(),
            letter: field(row, "courseletter").to_string(),
            division: DivisionScope::from_flag(field(row, "anyUD")),
            category: field(row, "classtype").to_string(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.number == WILDCARD
    }
}

// ============================================================================
// RULE TABLE
// ============================================================================

/// Immutable rule set indexed by department.
///
/// Rules keep their load order inside each department; several rules for
/// the same course (or contradictory wildcard rules) are all kept, since
/// matching unions every applicable rule.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    by_department: HashMap<String, Vec<ClassificationRule>>,
    rule_count: usize,
    fingerprint: String,
}

impl RuleTable {
    /// Create an empty table (every lookup misses)
    pub fn new() -> Self {
        RuleTable::from_rules(Vec::new())
    }

    pub fn from_rules(rules: Vec<ClassificationRule>) -> Self {
        let mut hasher = Sha256::new();
        let rule_count = rules.len();
        let mut by_department: HashMap<String, Vec<ClassificationRule>> = HashMap::new();

        for rule in rules {
            hasher.update(rule.department.as_bytes());
            hasher.update([0x1f]);
            hasher.update(rule.number.as_bytes());
            hasher.update([0x1f]);
            hasher.update(rule.letter.as_bytes());
            hasher.update([0x1f]);
            hasher.update(rule.division.as_flag().as_bytes());
            hasher.update([0x1f]);
            hasher.update(rule.category.as_bytes());
            hasher.update([b'\n']);

            by_department
                .entry(rule.department.clone())
                .or_default()
                .push(rule);
        }

        RuleTable {
            by_department,
            rule_count,
            fingerprint: format!("{:x}", hasher.finalize()),
        }
    }

    /// Build from parsed `coursecrit` rows; extra columns are ignored
    pub fn from_rows(rows: &[Row]) -> Self {
        RuleTable::from_rules(rows.iter().map(ClassificationRule::from_row).collect())
    }

    /// Load from a CSV file. A missing file gives an empty table.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let rows = loader::read_rows(path.as_ref())?;
        let table = RuleTable::from_rows(&rows);
        log::info!(
            "loaded {} classification rules from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    /// All rules for a department, in load order
    pub fn for_department(&self, department: &str) -> &[ClassificationRule] {
        self.by_department
            .get(department)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.rule_count
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }

    /// Hex SHA-256 over every rule in load order
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

// ============================================================================
// TESTS
// ============================================================================
