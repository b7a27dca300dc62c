//! Company inference: derive a classification table from the loaded
//! transactions instead of a fixed list.
//!
//! Two signals are used:
//! * income rows such as `"Acme Revenue 500"` name the company before
//!   `" Revenue"`;
//! * wage rows such as `"(Best Inc Daily Wage)"` name the headquarters
//!   inside the parentheses.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use super::classify::{ClassificationTable, CompanyRule};
use super::model::{Polarity, Transaction};

const REVENUE_MARKER: &str = "Revenue";
const REVENUE_SUFFIX: &str = " Revenue";
const WAGE_MARKER: &str = "Daily Wage";

fn wage_pattern() -> &'static Regex {
    static WAGE_RE: OnceLock<Regex> = OnceLock::new();
    WAGE_RE.get_or_init(|| Regex::new(r"\(([^()]+?) Daily Wage\)").expect("valid wage regex"))
}

/// Which headquarters names found in wage rows are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HeadquartersFilter {
    /// Keep every extracted name.
    #[default]
    Any,
    /// Keep only this exact name (e.g. `"Best Inc"`).
    Only(String),
}

impl HeadquartersFilter {
    fn accepts(&self, name: &str) -> bool {
        match self {
            HeadquartersFilter::Any => true,
            HeadquartersFilter::Only(wanted) => wanted == name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceOptions {
    pub headquarters: HeadquartersFilter,
}

/// Where a load gets its company table from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanySource {
    /// A fixed table, reused for every load.
    Static(ClassificationTable),
    /// A table rebuilt from each loaded dataset.
    Inferred(InferenceOptions),
}

impl Default for CompanySource {
    fn default() -> Self {
        CompanySource::Static(ClassificationTable::builtin())
    }
}

impl CompanySource {
    /// Resolve the table to classify `transactions` with.
    pub fn resolve(&self, transactions: &[Transaction]) -> ClassificationTable {
        match self {
            CompanySource::Static(table) => table.clone(),
            CompanySource::Inferred(options) => infer_companies(transactions, options),
        }
    }
}

/// Company named by a positive income row, e.g. `"Acme Revenue 500"` → `"Acme"`.
pub fn revenue_company(tx: &Transaction) -> Option<&str> {
    if tx.polarity != Polarity::Income || tx.magnitude <= 0.0 {
        return None;
    }
    if !tx.description.contains(REVENUE_MARKER) {
        return None;
    }
    let (prefix, _) = tx.description.split_once(REVENUE_SUFFIX)?;
    let name = prefix.trim();
    (!name.is_empty()).then_some(name)
}

/// Headquarters named by a wage row, e.g. `"(Best Inc Daily Wage)"` → `"Best Inc"`.
pub fn headquarters_company(description: &str) -> Option<&str> {
    if !description.contains(WAGE_MARKER) {
        return None;
    }
    let caps = wage_pattern().captures(description)?;
    let name = caps.get(1)?.as_str().trim();
    (!name.is_empty()).then_some(name)
}

/// Build a classification table from the dataset itself.
///
/// Revenue-derived companies come first, then headquarters, each in order of
/// first appearance. Every company gets exactly one keyword: its own name,
/// lowercased.
pub fn infer_companies(
    transactions: &[Transaction],
    options: &InferenceOptions,
) -> ClassificationTable {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut names: Vec<&str> = Vec::new();

    for name in transactions.iter().filter_map(revenue_company) {
        if seen.insert(name) {
            names.push(name);
        }
    }

    let revenue_count = names.len();

    for name in transactions
        .iter()
        .filter_map(|tx| headquarters_company(&tx.description))
        .filter(|name| options.headquarters.accepts(name))
    {
        if seen.insert(name) {
            names.push(name);
        }
    }

    log::debug!(
        "Inferred {} revenue companies and {} headquarters",
        revenue_count,
        names.len() - revenue_count
    );

    ClassificationTable::new(
        names
            .into_iter()
            .map(|name| CompanyRule {
                company: name.to_string(),
                keywords: vec![name.to_lowercase()],
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(description: &str, amount: f64) -> Transaction {
        Transaction::new(description.into(), 1, "Misc".into(), amount, "1".into())
    }

    fn company_names(table: &ClassificationTable) -> Vec<&str> {
        table.rules().iter().map(|r| r.company.as_str()).collect()
    }

    #[test]
    fn test_revenue_prefix_becomes_company() {
        let table = infer_companies(&[tx("Acme Revenue 500", 500.0)], &InferenceOptions::default());
        assert_eq!(table.rules(), &[CompanyRule::new("Acme", &["acme"])]);
    }

    #[test]
    fn test_revenue_requires_positive_amount() {
        let txs = [tx("Acme Revenue", -10.0), tx("Zero Revenue", 0.0)];
        let table = infer_companies(&txs, &InferenceOptions::default());
        assert!(table.is_empty());
    }

    #[test]
    fn test_revenue_without_suffix_is_ignored() {
        assert_eq!(revenue_company(&tx("Revenue share", 5.0)), None);
        assert_eq!(revenue_company(&tx("  Revenue bonus", 5.0)), None);
        assert_eq!(revenue_company(&tx("Best Jewelery  Revenue", 5.0)), Some("Best Jewelery"));
    }

    #[test]
    fn test_headquarters_from_daily_wage() {
        let table = infer_companies(
            &[tx("(Best Inc Daily Wage)", -20.0)],
            &InferenceOptions::default(),
        );
        assert_eq!(company_names(&table), vec!["Best Inc"]);
        assert_eq!(table.rules()[0].keywords, vec!["best inc"]);
    }

    #[test]
    fn test_headquarters_ignores_other_parentheses() {
        assert_eq!(
            headquarters_company("Payroll (night) (Mega Corp Daily Wage)"),
            Some("Mega Corp")
        );
        assert_eq!(headquarters_company("Best Inc Daily Wage"), None);
        assert_eq!(headquarters_company("( Daily Wage)"), None);
    }

    #[test]
    fn test_headquarters_filter_only() {
        let txs = [
            tx("(Best Inc Daily Wage)", -20.0),
            tx("(Mega Corp Daily Wage)", -20.0),
        ];
        let any = infer_companies(&txs, &InferenceOptions::default());
        assert_eq!(company_names(&any), vec!["Best Inc", "Mega Corp"]);

        let only = infer_companies(
            &txs,
            &InferenceOptions {
                headquarters: HeadquartersFilter::Only("Best Inc".into()),
            },
        );
        assert_eq!(company_names(&only), vec!["Best Inc"]);
    }

    #[test]
    fn test_union_is_ordered_and_distinct() {
        let txs = [
            tx("(Best Inc Daily Wage)", -20.0),
            tx("Luxury Clothes Revenue", 80.0),
            tx("Acme Revenue", 10.0),
            tx("Luxury Clothes Revenue", 90.0),
            tx("(Luxury Clothes Daily Wage)", -5.0),
        ];
        let table = infer_companies(&txs, &InferenceOptions::default());
        assert_eq!(
            company_names(&table),
            vec!["Luxury Clothes", "Acme", "Best Inc"]
        );
    }

    #[test]
    fn test_static_source_ignores_data() {
        let source = CompanySource::default();
        let table = source.resolve(&[tx("Acme Revenue", 10.0)]);
        assert_eq!(table, ClassificationTable::builtin());
    }
}
