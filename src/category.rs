// 🏷️ Category Codes - The closed set of subject categories
//
// Every course that reaches a report is tagged with zero or more of these
// five codes. Anything else coming out of the rule table is noise and is
// dropped at the Matcher → Categorizer boundary.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

// ============================================================================
// CATEGORY CODE
// ============================================================================

/// Subject category a course can count toward.
///
/// Declaration order is the display order of the report columns, and the
/// derived `Ord` follows it, so `BTreeMap<CategoryCode, _>` iterates in
/// report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryCode {
    #[serde(rename = "LS")]
    Humanities,

    #[serde(rename = "SS")]
    SocialSciences,

    #[serde(rename = "NS")]
    NaturalSciences,

    #[serde(rename = "MS")]
    Mathematics,

    #[serde(rename = "LA")]
    Language,
}

/// Set of categories attached to a single course.
pub type CategorySet = BTreeSet<CategoryCode>;

impl CategoryCode {
    /// All codes, in report order.
    pub const ALL: [CategoryCode; 5] = [
        CategoryCode::Humanities,
        CategoryCode::SocialSciences,
        CategoryCode::NaturalSciences,
        CategoryCode::Mathematics,
        CategoryCode::Language,
    ];

    /// Two-letter code as it appears in the rule table
    pub fn code(&self) -> &'static str {
        match self {
            CategoryCode::Humanities => "LS",
            CategoryCode::SocialSciences => "SS",
            CategoryCode::NaturalSciences => "NS",
            CategoryCode::Mathematics => "MS",
            CategoryCode::Language => "LA",
        }
    }

    /// Human-readable column heading
    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryCode::Humanities => "Humanities",
            CategoryCode::SocialSciences => "Social Sciences",
            CategoryCode::NaturalSciences => "Natural Sciences",
            CategoryCode::Mathematics => "Mathematics",
            CategoryCode::Language => "Language",
        }
    }

    /// Parse a rule-table label. Exact, case-sensitive match only; any
    /// other label is not a category.
    pub fn from_code(label: &str) -> Option<CategoryCode> {
        CategoryCode::ALL.into_iter().find(|c| c.code() == label)
    }
}

impl std::fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Code → display name pairs handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLabel {
    pub code: CategoryCode,
    pub name: String,
}

/// The category heading map, in report order.
pub fn class_types() -> Vec<CategoryLabel> {
    CategoryCode::ALL
        .iter()
        .map(|code| CategoryLabel {
            code: *code,
            name: code.display_name().to_string(),
        })
        .collect()
}

// ============================================================================
// COURSE BUCKETS
// ============================================================================

/// One list of courses per category.
///
/// A course tagged with several categories is stored once behind an `Arc`
/// and the same pointer is pushed into every matching bucket, so each
/// placement sees the full category set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseBuckets<T> {
    buckets: BTreeMap<CategoryCode, Vec<Arc<T>>>,
}

impl<T> CourseBuckets<T> {
    /// Empty buckets, one per category
    pub fn new() -> Self {
        CourseBuckets {
            buckets: CategoryCode::ALL.iter().map(|c| (*c, Vec::new())).collect(),
        }
    }

    /// Place a shared course into every bucket named in `categories`
    pub fn place(&mut self, course: &Arc<T>, categories: &CategorySet) {
        for category in categories {
            self.buckets
                .entry(*category)
                .or_default()
                .push(Arc::clone(course));
        }
    }

    pub fn get(&self, category: CategoryCode) -> &[Arc<T>] {
        self.buckets
            .get(&category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn count(&self, category: CategoryCode) -> usize {
        self.get(category).len()
    }

    /// Total placements (a cross-listed course counts once per bucket)
    pub fn total_placements(&self) -> usize {
        self.buckets.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(|v| v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryCode, &[Arc<T>])> {
        self.buckets.iter().map(|(c, v)| (*c, v.as_slice()))
    }

    pub(crate) fn buckets_mut(&mut self) -> impl Iterator<Item = &mut Vec<Arc<T>>> {
        self.buckets.values_mut()
    }
}

impl<T> Default for CourseBuckets<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
