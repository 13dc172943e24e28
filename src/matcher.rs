// 🎯 Matcher - Course code → category labels
//
// Three passes, results unioned:
//   1. Exact: (department, number, letter) equal to a rule
//   2. Reformat: only if exact found nothing; bridges "20"+"R" vs "20R"
//   3. Wildcard: department-wide rules gated by division, skipped for AP/IB

use crate::category::{CategoryCode, CategorySet};
use crate::course::{leading_number, split_trailing_letters};
use crate::rules::{ClassificationRule, RuleTable};
use std::collections::BTreeSet;

/// Departments whose wildcard rules never apply (exam credit pseudo-departments)
pub const WILDCARD_EXEMPT_DEPARTMENTS: [&str; 2] = ["AP", "IB"];

/// Default upper-division cutoff for wildcard rules
pub const DEFAULT_UPPER_DIVISION_THRESHOLD: u64 = 100;

pub struct Matcher<'a> {
    rules: &'a RuleTable,
    upper_division_threshold: u64,
}

impl<'a> Matcher<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Matcher {
            rules,
            upper_division_threshold: DEFAULT_UPPER_DIVISION_THRESHOLD,
        }
    }

    pub fn with_upper_division_threshold(mut self, threshold: u64) -> Self {
        self.upper_division_threshold = threshold;
        self
    }

    /// Category labels exactly as the rule table spells them.
    ///
    /// May contain labels outside the known category set; use
    /// [`Matcher::classify`] for anything that ends up in a report.
    pub fn classify_labels(&self, department: &str, number: &str, letter: &str) -> BTreeSet<String> {
        let rules = self.rules.for_department(department);
        let mut labels = BTreeSet::new();

        // Pass 1: exact
        labels.extend(
            rules
                .iter()
                .filter(|r| r.number == number && r.letter == letter)
                .map(|r| r.category.clone()),
        );

        // Pass 2: reformat, only when exact came up empty
        if labels.is_empty() {
            labels.extend(self.reformat_matches(rules, number, letter));
        }

        // Pass 3: wildcard
        if !WILDCARD_EXEMPT_DEPARTMENTS.contains(&department) {
            let course_number = leading_number(number);
            labels.extend(
                rules
                    .iter()
                    .filter(|r| r.is_wildcard())
                    .filter(|r| r.division.admits(course_number, self.upper_division_threshold))
                    .map(|r| r.category.clone()),
            );
        }

        labels
    }

    /// Validated categories. Labels that are not one of the five known
    /// codes count as no match.
    pub fn classify(&self, department: &str, number: &str, letter: &str) -> CategorySet {
        self.classify_labels(department, number, letter)
            .into_iter()
            .filter_map(|label| {
                let code = CategoryCode::from_code(&label);
                if code.is_none() {
                    log::debug!(
                        "ignoring unknown category label {:?} for {} {}{}",
                        label, department, number, letter
                    );
                }
                code
            })
            .collect()
    }

    fn reformat_matches(&self, rules: &[ClassificationRule], number: &str, letter: &str) -> Vec<String> {
        let (want_number, want_letter) = if !letter.is_empty() {
            // Input split, table combined: "20" + "R" → "20R"
            (format!("{}{}", number, letter), String::new())
        } else {
            // Input combined, table split: "18A" → "18" + "A"
            let (prefix, suffix) = split_trailing_letters(number);
            if suffix.is_empty() {
                return Vec::new();
            }
            (prefix.to_string(), suffix.to_string())
        };

        rules
            .iter()
            .filter(|r| r.number == want_number && r.letter == want_letter)
            .map(|r| r.category.clone())
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryCode::*;
    use crate::rules::DivisionScope::{LowerOnly, UpperOnly};
    use proptest::prelude::*;

    fn basic_table() -> RuleTable {
        RuleTable::from_rules(vec![
            ClassificationRule::new("MATH", "101", "A", LowerOnly, "MS"),
            ClassificationRule::new("HIST", "*", "*", LowerOnly, "SS"),
            ClassificationRule::new("PSYC", "60", "A", LowerOnly, "MS"),
            ClassificationRule::new("PSYC", "60", "A", LowerOnly, "SS"),
            ClassificationRule::new("SIO", "20R", "", LowerOnly, "NS"),
            ClassificationRule::new("COGS", "18", "A", LowerOnly, "SS"),
        ])
    }

    fn complex_table() -> RuleTable {
        RuleTable::from_rules(vec![
            ClassificationRule::new("MATH", "101", "A", LowerOnly, "MS"),
            ClassificationRule::new("HIST", "*", "*", LowerOnly, "SS"),
            ClassificationRule::new("LIT", "*", "*", UpperOnly, "LS"),
            ClassificationRule::new("MIX", "*", "*", LowerOnly, "SS"),
            ClassificationRule::new("MIX", "*", "*", UpperOnly, "LS"),
            ClassificationRule::new("BOTH", "100", "", LowerOnly, "MS"),
            ClassificationRule::new("BOTH", "*", "*", UpperOnly, "SS"),
        ])
    }

    fn set(codes: &[CategoryCode]) -> CategorySet {
        codes.iter().copied().collect()
    }

    #[test]
    fn test_exact_match() {
        let table = basic_table();
        let matcher = Matcher::new(&table);
        assert_eq!(matcher.classify("MATH", "101", "A"), set(&[Mathematics]));
    }

    #[test]
    fn test_multiple_exact_matches_are_unioned() {
        let table = basic_table();
        let matcher = Matcher::new(&table);
        assert_eq!(matcher.classify("PSYC", "60", "A"), set(&[Mathematics, SocialSciences]));
    }

    #[test]
    fn test_reformat_split_input_combined_rule() {
        let table = basic_table();
        let matcher = Matcher::new(&table);
        assert_eq!(matcher.classify("SIO", "20", "R"), set(&[NaturalSciences]));
    }

    #[test]
    fn test_reformat_combined_input_split_rule() {
        let table = basic_table();
        let matcher = Matcher::new(&table);
        assert_eq!(matcher.classify("COGS", "18A", ""), set(&[SocialSciences]));
    }

    #[test]
    fn test_reformat_skipped_when_exact_matched() {
        let table = RuleTable::from_rules(vec![
            ClassificationRule::new("SIO", "20", "R", LowerOnly, "MS"),
            ClassificationRule::new("SIO", "20R", "", LowerOnly, "NS"),
        ]);
        let matcher = Matcher::new(&table);
        assert_eq!(matcher.classify("SIO", "20", "R"), set(&[Mathematics]));
    }

    #[test]
    fn test_wildcard_lower_division() {
        let table = basic_table();
        let matcher = Matcher::new(&table);
        assert_eq!(matcher.classify("HIST", "99", ""), set(&[SocialSciences]));
        assert!(matcher.classify("HIST", "100", "").is_empty());
    }

    #[test]
    fn test_wildcard_upper_division() {
        let table = complex_table();
        let matcher = Matcher::new(&table);
        assert_eq!(matcher.classify("LIT", "105", ""), set(&[Humanities]));
        assert!(matcher.classify("LIT", "50", "").is_empty());
    }

    #[test]
    fn test_contradictory_wildcards_split_by_division() {
        let table = complex_table();
        let matcher = Matcher::new(&table);
        assert_eq!(matcher.classify("MIX", "10", ""), set(&[SocialSciences]));
        assert_eq!(matcher.classify("MIX", "150", ""), set(&[Humanities]));
    }

    #[test]
    fn test_exact_and_wildcard_combine() {
        let table = complex_table();
        let matcher = Matcher::new(&table);
        assert_eq!(matcher.classify("BOTH", "100", ""), set(&[Mathematics, SocialSciences]));
    }

    #[test]
    fn test_unparseable_number_is_lower_division() {
        let table = complex_table();
        let matcher = Matcher::new(&table);
        assert_eq!(matcher.classify("MIX", "XYZ", ""), set(&[SocialSciences]));
    }

    #[test]
    fn test_exam_departments_skip_wildcards() {
        let table = RuleTable::from_rules(vec![
            ClassificationRule::new("AP", "*", "*", LowerOnly, "MS"),
            ClassificationRule::new("IB", "*", "*", UpperOnly, "LS"),
            ClassificationRule::new("AP", "CALC", "", LowerOnly, "MS"),
        ]);
        let matcher = Matcher::new(&table);
        assert!(matcher.classify("AP", "10", "").is_empty());
        assert!(matcher.classify("IB", "150", "").is_empty());
        assert_eq!(matcher.classify("AP", "CALC", ""), set(&[Mathematics]));
    }

    #[test]
    fn test_custom_threshold() {
        let table = complex_table();
        let matcher = Matcher::new(&table).with_upper_division_threshold(50);
        assert_eq!(matcher.classify("LIT", "50", ""), set(&[Humanities]));
    }

    #[test]
    fn test_no_match_and_empty_table() {
        let table = basic_table();
        let matcher = Matcher::new(&table);
        assert!(matcher.classify("ART", "101", "A").is_empty());

        let empty = RuleTable::new();
        assert!(Matcher::new(&empty).classify("MATH", "101", "A").is_empty());
    }

    #[test]
    fn test_unknown_labels_are_dropped() {
        let table = RuleTable::from_rules(vec![
            ClassificationRule::new("ODD", "1", "", LowerOnly, "XX"),
            ClassificationRule::new("ODD", "1", "", LowerOnly, "NS"),
            ClassificationRule::new("JUNK", "1", "", LowerOnly, "ls"),
        ]);
        let matcher = Matcher::new(&table);

        assert_eq!(matcher.classify_labels("ODD", "1", "").len(), 2);
        assert_eq!(matcher.classify("ODD", "1", ""), set(&[NaturalSciences]));
        assert!(matcher.classify("JUNK", "1", "").is_empty());
    }

    proptest! {
        #[test]
        fn prop_classify_is_deterministic(
            dept in prop::sample::select(vec!["MATH", "HIST", "LIT", "MIX", "BOTH", "AP", "ZZZ"]),
            number in "[0-9]{0,3}[A-C]{0,1}",
            letter in "[A-C]{0,1}",
        ) {
            let table = complex_table();
            let matcher = Matcher::new(&table);
            prop_assert_eq!(
                matcher.classify(dept, &number, &letter),
                matcher.classify(dept, &number, &letter)
            );
        }

        #[test]
        fn prop_exact_matches_are_subset_of_result(
            number in "[0-9]{1,3}",
        ) {
            let table = RuleTable::from_rules(vec![
                ClassificationRule::new("MIX", &number, "", LowerOnly, "MS"),
                ClassificationRule::new("MIX", "*", "*", LowerOnly, "SS"),
                ClassificationRule::new("MIX", "*", "*", UpperOnly, "LS"),
            ]);
            let result = Matcher::new(&table).classify("MIX", &number, "");
            prop_assert!(result.contains(&Mathematics));
        }
    }
}
