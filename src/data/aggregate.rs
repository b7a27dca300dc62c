use std::collections::BTreeMap;

use super::model::{Polarity, Transaction, TransactionTable};

/// Label a transaction is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Type,
    Company,
}

impl GroupKey {
    fn label(self, tx: &Transaction) -> &str {
        match self {
            GroupKey::Type => &tx.kind,
            GroupKey::Company => &tx.company,
        }
    }
}

/// Sum of magnitudes per (polarity, label), for stacked bars.
pub fn sum_by_polarity(
    table: &TransactionTable,
    indices: &[usize],
    key: GroupKey,
) -> BTreeMap<(Polarity, String), f64> {
    let mut sums: BTreeMap<(Polarity, String), f64> = BTreeMap::new();
    for tx in indices.iter().filter_map(|&i| table.transactions().get(i)) {
        *sums
            .entry((tx.polarity, key.label(tx).to_string()))
            .or_default() += tx.magnitude;
    }
    sums
}

/// Sum of magnitudes per label, restricted to one polarity, for pies.
pub fn sum_for_polarity(
    table: &TransactionTable,
    indices: &[usize],
    polarity: Polarity,
    key: GroupKey,
) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for tx in indices
        .iter()
        .filter_map(|&i| table.transactions().get(i))
        .filter(|tx| tx.polarity == polarity)
    {
        *sums.entry(key.label(tx).to_string()).or_default() += tx.magnitude;
    }
    sums
}

/// Every chart's data for one filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub by_type: BTreeMap<(Polarity, String), f64>,
    pub by_company: BTreeMap<(Polarity, String), f64>,
    pub expense_by_company: BTreeMap<String, f64>,
    pub expense_by_type: BTreeMap<String, f64>,
    pub income_by_company: BTreeMap<String, f64>,
    pub income_by_type: BTreeMap<String, f64>,
}

impl DashboardSummary {
    pub fn compute(table: &TransactionTable, indices: &[usize]) -> Self {
        DashboardSummary {
            by_type: sum_by_polarity(table, indices, GroupKey::Type),
            by_company: sum_by_polarity(table, indices, GroupKey::Company),
            expense_by_company: sum_for_polarity(table, indices, Polarity::Expense, GroupKey::Company),
            expense_by_type: sum_for_polarity(table, indices, Polarity::Expense, GroupKey::Type),
            income_by_company: sum_for_polarity(table, indices, Polarity::Income, GroupKey::Company),
            income_by_type: sum_for_polarity(table, indices, Polarity::Income, GroupKey::Type),
        }
    }

    /// Total income and expense across the view.
    pub fn totals(&self) -> (f64, f64) {
        (
            self.income_by_type.values().sum(),
            self.expense_by_type.values().sum(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::classify::{classify, ClassificationTable, CompanyRule};
    use crate::data::model::OTHER_COMPANY;

    fn table() -> TransactionTable {
        let mut txs = vec![
            Transaction::new("Acme Revenue".into(), 1, "Sale".into(), 100.0, "1".into()),
            Transaction::new("Acme Revenue".into(), 2, "Sale".into(), 50.0, "2".into()),
            Transaction::new("Rent".into(), 2, "Rent".into(), -40.0, "3".into()),
            Transaction::new("Acme supplies".into(), 3, "Purchase".into(), -10.0, "4".into()),
        ];
        let rules = ClassificationTable::new(vec![CompanyRule::new("Acme", &["acme"])]);
        classify(&mut txs, &rules);
        TransactionTable::new(txs, rules)
    }

    #[test]
    fn test_stacked_sums() {
        let t = table();
        let all: Vec<usize> = (0..t.len()).collect();

        let by_type = sum_by_polarity(&t, &all, GroupKey::Type);
        assert_eq!(by_type[&(Polarity::Income, "Sale".to_string())], 150.0);
        assert_eq!(by_type[&(Polarity::Expense, "Rent".to_string())], 40.0);
        assert_eq!(by_type.len(), 3);

        let by_company = sum_by_polarity(&t, &all, GroupKey::Company);
        assert_eq!(by_company[&(Polarity::Income, "Acme".to_string())], 150.0);
        assert_eq!(by_company[&(Polarity::Expense, "Acme".to_string())], 10.0);
        assert_eq!(by_company[&(Polarity::Expense, OTHER_COMPANY.to_string())], 40.0);
    }

    #[test]
    fn test_pie_sums_respect_polarity() {
        let t = table();
        let all: Vec<usize> = (0..t.len()).collect();
        let summary = DashboardSummary::compute(&t, &all);

        assert_eq!(summary.expense_by_company.len(), 2);
        assert_eq!(summary.expense_by_company["Acme"], 10.0);
        assert_eq!(summary.income_by_company.len(), 1);
        assert_eq!(summary.income_by_company["Acme"], 150.0);
        assert_eq!(summary.expense_by_type["Purchase"], 10.0);
        assert_eq!(summary.totals(), (150.0, 50.0));
    }

    #[test]
    fn test_subset_only() {
        let t = table();
        let summary = DashboardSummary::compute(&t, &[2]);
        assert!(summary.income_by_company.is_empty());
        assert_eq!(summary.expense_by_type["Rent"], 40.0);
    }

    #[test]
    fn test_empty_view_gives_empty_groups() {
        let t = table();
        let summary = DashboardSummary::compute(&t, &[]);
        assert_eq!(summary, DashboardSummary::default());
        assert_eq!(summary.totals(), (0.0, 0.0));
    }
}
