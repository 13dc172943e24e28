// 🌍 Reference Directories - Display names for country and college codes
// Unknown codes fall back to the code itself

use crate::loader::{self, field, Row};
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// Code → display name lookup built from a two-column CSV
#[derive(Debug, Clone, Default)]
pub struct CodeDirectory {
    names: HashMap<String, String>,
}

impl CodeDirectory {
    pub fn from_rows(rows: &[Row], code_column: &str, name_column: &str) -> Self {
        let names = rows
            .iter()
            .map(|row| (field(row, code_column).trim(), field(row, name_column).trim()))
            .filter(|(code, name)| !code.is_empty() && !name.is_empty())
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect();
        CodeDirectory { names }
    }

    pub fn insert(&mut self, code: &str, name: &str) {
        self.names.insert(code.to_string(), name.to_string());
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.names.get(code.trim()).map(|s| s.as_str())
    }

    /// Display name, or the code when the directory has no entry
    pub fn name_for(&self, code: &str) -> String {
        self.get(code).unwrap_or(code).to_string()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// `country_code, country_name`
#[derive(Debug, Clone, Default)]
pub struct CountryDirectory(CodeDirectory);

impl CountryDirectory {
    pub fn from_rows(rows: &[Row]) -> Self {
        CountryDirectory(CodeDirectory::from_rows(rows, "country_code", "country_name"))
    }

    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_rows(&loader::read_rows(path.as_ref())?))
    }

    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let mut directory = CodeDirectory::default();
        for (code, name) in entries {
            directory.insert(code, name);
        }
        CountryDirectory(directory)
    }

    pub fn name_for(&self, code: &str) -> String {
        self.0.name_for(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `college_code, college_name`
#[derive(Debug, Clone, Default)]
pub struct CollegeDirectory(CodeDirectory);

impl CollegeDirectory {
    pub fn from_rows(rows: &[Row]) -> Self {
        CollegeDirectory(CodeDirectory::from_rows(rows, "college_code", "college_name"))
    }

    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_rows(&loader::read_rows(path.as_ref())?))
    }

    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let mut directory = CodeDirectory::default();
        for (code, name) in entries {
            directory.insert(code, name);
        }
        CollegeDirectory(directory)
    }

    pub fn name_for(&self, code: &str) -> String {
        self.0.name_for(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_lookup_with_fallback() {
        let rows = loader::read_rows_from(
            "country_code,country_name\nUS,United States\nCA,Canada\n".as_bytes(),
            "country_codes.csv",
        )
        .unwrap();
        let countries = CountryDirectory::from_rows(&rows);

        assert_eq!(countries.len(), 2);
        assert_eq!(countries.name_for("US"), "United States");
        assert_eq!(countries.name_for("XX"), "XX");
        assert_eq!(countries.name_for(""), "");
    }

    #[test]
    fn test_blank_entries_are_ignored() {
        let rows = loader::read_rows_from(
            "college_code,college_name\nRE,Revelle\n,Nameless\nMU,\n".as_bytes(),
            "college_codes.csv",
        )
        .unwrap();
        let colleges = CollegeDirectory::from_rows(&rows);

        assert_eq!(colleges.len(), 1);
        assert_eq!(colleges.name_for("RE"), "Revelle");
        assert_eq!(colleges.name_for("MU"), "MU");
    }

    #[test]
    fn test_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("college_codes.csv");
        std::fs::write(&path, "college_code,college_name\nWA,Warren\n").unwrap();

        let colleges = CollegeDirectory::from_csv(&path).unwrap();
        assert_eq!(colleges.name_for("WA"), "Warren");

        let countries = CountryDirectory::from_csv(dir.path().join("country_codes.csv")).unwrap();
        assert!(countries.is_empty());
    }

    #[test]
    fn test_with_entries() {
        let colleges = CollegeDirectory::with_entries(&[("SI", "Sixth")]);
        assert_eq!(colleges.name_for("SI"), "Sixth");
        assert!(CountryDirectory::default().is_empty());
    }
}
