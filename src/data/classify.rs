use serde::{Deserialize, Serialize};

use super::model::Transaction;

// ---------------------------------------------------------------------------
// Classification table
// ---------------------------------------------------------------------------

/// One company and the case-insensitive substrings that identify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRule {
    pub company: String,
    pub keywords: Vec<String>,
}

impl CompanyRule {
    pub fn new(company: impl Into<String>, keywords: &[&str]) -> Self {
        CompanyRule {
            company: company.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// `lowered` must already be lowercase.
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Ordered company rules. Order matters: when several rules match one
/// description the last one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationTable {
    rules: Vec<CompanyRule>,
}

impl ClassificationTable {
    /// Keywords are trimmed and lowercased; blank keywords are dropped so a
    /// rule can never match everything by accident.
    pub fn new(rules: Vec<CompanyRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| CompanyRule {
                company: rule.company.trim().to_string(),
                keywords: rule
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        ClassificationTable { rules }
    }

    /// The fixed company table shipped with the dashboard.
    pub fn builtin() -> Self {
        ClassificationTable::new(vec![
            CompanyRule::new("Best Websites Ever", &["best websites ever"]),
            CompanyRule::new("Best Jewelery", &["best jewelery"]),
            CompanyRule::new("Luxury Clothes", &["luxury clothes"]),
            CompanyRule::new("Best Inc", &["best inc"]),
        ])
    }

    pub fn rules(&self) -> &[CompanyRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Description cleaning
// ---------------------------------------------------------------------------

/// Optional rewrite of descriptions before they are classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DescriptionCleaning {
    /// Leave descriptions untouched.
    #[default]
    Keep,
    /// Remove every `(` from each description and from every keyword.
    StripOpenParens,
}

impl DescriptionCleaning {
    fn clean(self, text: &str) -> String {
        match self {
            DescriptionCleaning::Keep => text.to_string(),
            DescriptionCleaning::StripOpenParens => text.replace('(', ""),
        }
    }

    pub fn apply(self, transactions: &mut [Transaction]) {
        if self == DescriptionCleaning::Keep {
            return;
        }
        for tx in transactions {
            if tx.description.contains('(') {
                tx.description = self.clean(&tx.description);
            }
        }
    }

    /// Clean keywords the same way as descriptions so both sides of a
    /// match see identical text. Company names are left as they are.
    pub fn apply_to_table(self, table: ClassificationTable) -> ClassificationTable {
        if self == DescriptionCleaning::Keep {
            return table;
        }
        ClassificationTable::new(
            table
                .rules
                .into_iter()
                .map(|rule| CompanyRule {
                    keywords: rule.keywords.iter().map(|k| self.clean(k)).collect(),
                    company: rule.company,
                })
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Overwrite `company` for every transaction matched by a rule, walking
/// rules in table order. Unmatched transactions keep their current label.
/// Returns how many transactions matched at least one rule.
pub fn classify(transactions: &mut [Transaction], table: &ClassificationTable) -> usize {
    let mut matched = 0usize;
    for tx in transactions.iter_mut() {
        let lowered = tx.description.to_lowercase();
        let mut hit = false;
        for rule in &table.rules {
            if rule.matches(&lowered) {
                tx.company.clone_from(&rule.company);
                hit = true;
            }
        }
        if hit {
            matched += 1;
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::OTHER_COMPANY;

    fn tx(description: &str) -> Transaction {
        Transaction::new(description.into(), 1, "Sale".into(), 10.0, "1".into())
    }

    fn companies(txs: &[Transaction]) -> Vec<&str> {
        txs.iter().map(|t| t.company.as_str()).collect()
    }

    #[test]
    fn test_case_insensitive_substring() {
        let table = ClassificationTable::new(vec![CompanyRule::new("Acme", &["ACME"])]);
        let mut txs = vec![tx("Paid by acme corp"), tx("Rent Payment")];
        let matched = classify(&mut txs, &table);
        assert_eq!(matched, 1);
        assert_eq!(companies(&txs), vec!["Acme", OTHER_COMPANY]);
    }

    #[test]
    fn test_any_keyword_matches() {
        let table =
            ClassificationTable::new(vec![CompanyRule::new("Shop", &["jewel", "clothes"])]);
        let mut txs = vec![tx("Luxury Clothes order"), tx("Jewelery")];
        classify(&mut txs, &table);
        assert_eq!(companies(&txs), vec!["Shop", "Shop"]);
    }

    #[test]
    fn test_last_matching_rule_wins() {
        let table = ClassificationTable::new(vec![
            CompanyRule::new("Best", &["best"]),
            CompanyRule::new("Best Inc", &["best inc"]),
        ]);
        let mut txs = vec![tx("Best Inc Daily Wage"), tx("Best Jewelery")];
        classify(&mut txs, &table);
        assert_eq!(companies(&txs), vec!["Best Inc", "Best"]);

        // Reversed order flips the overlapping label.
        let reversed = ClassificationTable::new(vec![
            CompanyRule::new("Best Inc", &["best inc"]),
            CompanyRule::new("Best", &["best"]),
        ]);
        classify(&mut txs, &reversed);
        assert_eq!(companies(&txs), vec!["Best", "Best"]);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let table = ClassificationTable::builtin();
        let mut txs = vec![
            tx("Luxury Clothes Revenue"),
            tx("(Best Inc Daily Wage)"),
            tx("Groceries"),
        ];
        classify(&mut txs, &table);
        let first: Vec<String> = txs.iter().map(|t| t.company.clone()).collect();
        classify(&mut txs, &table);
        let second: Vec<String> = txs.iter().map(|t| t.company.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["Luxury Clothes", "Best Inc", OTHER_COMPANY]);
    }

    #[test]
    fn test_empty_table_leaves_everything_other() {
        let mut txs = vec![tx("Acme Revenue"), tx("Rent")];
        let matched = classify(&mut txs, &ClassificationTable::default());
        assert_eq!(matched, 0);
        assert_eq!(companies(&txs), vec![OTHER_COMPANY, OTHER_COMPANY]);
    }

    #[test]
    fn test_blank_keywords_are_dropped() {
        let table = ClassificationTable::new(vec![CompanyRule::new(" Acme ", &["", "  "])]);
        assert_eq!(table.rules()[0].company, "Acme");
        assert!(table.rules()[0].keywords.is_empty());

        let mut txs = vec![tx("anything at all")];
        classify(&mut txs, &table);
        assert_eq!(companies(&txs), vec![OTHER_COMPANY]);
    }

    #[test]
    fn test_strip_open_parens() {
        let mut txs = vec![tx("(Best Inc Daily Wage)"), tx("plain")];
        DescriptionCleaning::Keep.apply(&mut txs);
        assert_eq!(txs[0].description, "(Best Inc Daily Wage)");

        DescriptionCleaning::StripOpenParens.apply(&mut txs);
        assert_eq!(txs[0].description, "Best Inc Daily Wage)");
        assert_eq!(txs[1].description, "plain");
    }

    #[test]
    fn test_strip_open_parens_cleans_keywords() {
        let table = ClassificationTable::new(vec![
            CompanyRule::new("(Shop)", &["(shop)"]),
            CompanyRule::new("Bracket", &["("]),
        ]);
        let cleaned = DescriptionCleaning::StripOpenParens.apply_to_table(table.clone());
        assert_eq!(cleaned.rules()[0].company, "(Shop)");
        assert_eq!(cleaned.rules()[0].keywords, vec!["shop)"]);
        assert!(cleaned.rules()[1].keywords.is_empty());
        assert_eq!(DescriptionCleaning::Keep.apply_to_table(table.clone()), table);

        let mut txs = vec![tx("Paid (Shop) ltd")];
        DescriptionCleaning::StripOpenParens.apply(&mut txs);
        classify(&mut txs, &cleaned);
        assert_eq!(companies(&txs), vec!["(Shop)"]);
    }
}
