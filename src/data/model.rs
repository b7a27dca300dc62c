use std::collections::BTreeSet;
use std::fmt;

use super::classify::ClassificationTable;

/// Company label for transactions no rule matched.
pub const OTHER_COMPANY: &str = "Other";

// ---------------------------------------------------------------------------
// Polarity – direction of a transaction
// ---------------------------------------------------------------------------

/// Whether money came in or went out. Captured from the sign of the raw
/// amount before it is replaced by its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Polarity {
    Income,
    Expense,
}

impl Polarity {
    /// Strictly negative amounts are expenses; zero counts as income.
    pub fn from_amount(amount: f64) -> Self {
        if amount < 0.0 {
            Polarity::Expense
        } else {
            Polarity::Income
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Polarity::Income => "Income",
            Polarity::Expense => "Expense",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Transaction – one row of the export
// ---------------------------------------------------------------------------

/// A single normalised transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Free text; the only input to classification.
    pub description: String,
    /// Company bucket, `"Other"` until a rule matches.
    pub company: String,
    /// In-game day.
    pub day: i64,
    /// Source category label ("Type" column), e.g. wage or purchase.
    pub kind: String,
    /// Absolute value of the raw amount.
    pub magnitude: f64,
    pub polarity: Polarity,
    /// Opaque source identifier.
    pub id: String,
}

impl Transaction {
    /// Build a record from already-trimmed fields, deriving polarity and
    /// magnitude from the signed `amount`.
    pub fn new(description: String, day: i64, kind: String, amount: f64, id: String) -> Self {
        Transaction {
            description,
            company: OTHER_COMPANY.to_string(),
            day,
            kind,
            magnitude: amount.abs(),
            polarity: Polarity::from_amount(amount),
            id,
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionTable – the complete classified dataset
// ---------------------------------------------------------------------------

/// The loaded, classified dataset with pre-computed label indices.
///
/// Nothing mutates a table after construction; filters and aggregations
/// work on index views.
#[derive(Debug, Clone)]
pub struct TransactionTable {
    transactions: Vec<Transaction>,
    classification: ClassificationTable,
    day_range: Option<(i64, i64)>,
    companies: BTreeSet<String>,
    types: BTreeSet<String>,
}

impl TransactionTable {
    /// Build label indices from classified transactions.
    pub fn new(transactions: Vec<Transaction>, classification: ClassificationTable) -> Self {
        let mut companies = BTreeSet::new();
        let mut types = BTreeSet::new();
        let mut day_range: Option<(i64, i64)> = None;

        for tx in &transactions {
            companies.insert(tx.company.clone());
            types.insert(tx.kind.clone());
            day_range = Some(match day_range {
                None => (tx.day, tx.day),
                Some((lo, hi)) => (lo.min(tx.day), hi.max(tx.day)),
            });
        }

        TransactionTable {
            transactions,
            classification,
            day_range,
            companies,
            types,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The company table that produced the labels in this dataset.
    pub fn classification(&self) -> &ClassificationTable {
        &self.classification
    }

    /// Inclusive `(min, max)` day, `None` for an empty table.
    pub fn day_range(&self) -> Option<(i64, i64)> {
        self.day_range
    }

    /// Sorted distinct company labels present in the data.
    pub fn companies(&self) -> &BTreeSet<String> {
        &self.companies
    }

    /// Sorted distinct type labels present in the data.
    pub fn types(&self) -> &BTreeSet<String> {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
