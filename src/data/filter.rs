use std::collections::BTreeSet;

use super::model::TransactionTable;

// ---------------------------------------------------------------------------
// Filter predicate
// ---------------------------------------------------------------------------

/// The three dashboard filter dimensions.
///
/// A transaction passes when its day lies in the inclusive `days` range and
/// both its company and its type are selected. An empty selection set hides
/// everything for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub days: (i64, i64),
    pub companies: BTreeSet<String>,
    pub types: BTreeSet<String>,
}

impl TransactionFilter {
    /// Everything selected (i.e., show all transactions).
    pub fn all(table: &TransactionTable) -> Self {
        TransactionFilter {
            days: table.day_range().unwrap_or((0, 0)),
            companies: table.companies().clone(),
            types: table.types().clone(),
        }
    }
}

/// Return indices of transactions that pass the filter, in table order.
pub fn filtered_indices(table: &TransactionTable, filter: &TransactionFilter) -> Vec<usize> {
    let (lo, hi) = filter.days;
    table
        .transactions()
        .iter()
        .enumerate()
        .filter(|(_, tx)| {
            tx.day >= lo
                && tx.day <= hi
                && filter.companies.contains(&tx.company)
                && filter.types.contains(&tx.kind)
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Quick day ranges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPreset {
    /// The day before the latest one in the data (the latest day may still
    /// be in progress when the log is exported).
    LastDay,
    /// The last seven days up to the latest one.
    LastWeek,
    AllTime,
}

impl DayPreset {
    pub const ALL: [DayPreset; 3] = [DayPreset::LastDay, DayPreset::LastWeek, DayPreset::AllTime];

    pub fn label(self) -> &'static str {
        match self {
            DayPreset::LastDay => "Last Day",
            DayPreset::LastWeek => "Last Week",
            DayPreset::AllTime => "All Time",
        }
    }

    /// Day range for data spanning `(min, max)`, never starting before `min`.
    pub fn range(self, (min, max): (i64, i64)) -> (i64, i64) {
        match self {
            DayPreset::LastDay => {
                let day = max.saturating_sub(1).max(min);
                (day, day)
            }
            DayPreset::LastWeek => (max.saturating_sub(7).max(min), max),
            DayPreset::AllTime => (min, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::classify::ClassificationTable;
    use crate::data::model::Transaction;

    fn table() -> TransactionTable {
        let mut txs = vec![
            Transaction::new("a".into(), 1, "Wage".into(), -10.0, "1".into()),
            Transaction::new("b".into(), 5, "Sale".into(), 20.0, "2".into()),
            Transaction::new("c".into(), 5, "Wage".into(), -30.0, "3".into()),
            Transaction::new("d".into(), 9, "Sale".into(), 40.0, "4".into()),
        ];
        txs[1].company = "Acme".into();
        TransactionTable::new(txs, ClassificationTable::default())
    }

    #[test]
    fn test_all_selects_everything() {
        let t = table();
        let filter = TransactionFilter::all(&t);
        assert_eq!(filter.days, (1, 9));
        assert_eq!(filtered_indices(&t, &filter), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_single_day_range() {
        let t = table();
        let filter = TransactionFilter {
            days: (5, 5),
            ..TransactionFilter::all(&t)
        };
        let idx = filtered_indices(&t, &filter);
        assert_eq!(idx, vec![1, 2]);
        assert!(idx.iter().all(|&i| t.transactions()[i].day == 5));
    }

    #[test]
    fn test_company_and_type_sets() {
        let t = table();
        let mut filter = TransactionFilter::all(&t);
        filter.companies = BTreeSet::from(["Acme".to_string()]);
        assert_eq!(filtered_indices(&t, &filter), vec![1]);

        let mut filter = TransactionFilter::all(&t);
        filter.types = BTreeSet::from(["Wage".to_string()]);
        assert_eq!(filtered_indices(&t, &filter), vec![0, 2]);
    }

    #[test]
    fn test_empty_selection_hides_everything() {
        let t = table();
        let mut filter = TransactionFilter::all(&t);
        filter.types.clear();
        assert!(filtered_indices(&t, &filter).is_empty());
    }

    #[test]
    fn test_presets() {
        assert_eq!(DayPreset::LastDay.range((1, 30)), (29, 29));
        assert_eq!(DayPreset::LastDay.range((4, 4)), (4, 4));
        assert_eq!(DayPreset::LastWeek.range((1, 30)), (23, 30));
        assert_eq!(DayPreset::LastWeek.range((25, 30)), (25, 30));
        assert_eq!(DayPreset::AllTime.range((1, 30)), (1, 30));
    }

    #[test]
    fn test_presets_at_lowest_day() {
        let floor = (i64::MIN, i64::MIN);
        assert_eq!(DayPreset::LastDay.range(floor), floor);
        assert_eq!(DayPreset::LastWeek.range(floor), floor);
        assert_eq!(DayPreset::LastWeek.range((i64::MIN, i64::MIN + 3)), (i64::MIN, i64::MIN + 3));
    }
}
