use std::io::Read;
use std::path::Path;

use super::classify::{classify, DescriptionCleaning};
use super::error::LoadError;
use super::infer::CompanySource;
use super::model::{Transaction, TransactionTable};

// ---------------------------------------------------------------------------
// Load options
// ---------------------------------------------------------------------------

/// How a loaded export is turned into a classified table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub companies: CompanySource,
    pub cleaning: DescriptionCleaning,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and classify a transaction export from disk.
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<TransactionTable, LoadError> {
    check_extension(path)?;
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    build_table(decode_transactions(&bytes)?, options)
}

/// Load and classify an uploaded export. `name` is the uploaded file name
/// and is only used for the extension check.
pub fn load_bytes(
    name: &str,
    bytes: &[u8],
    options: &LoadOptions,
) -> Result<TransactionTable, LoadError> {
    check_extension(Path::new(name))?;
    build_table(decode_transactions(bytes)?, options)
}

fn check_extension(path: &Path) -> Result<(), LoadError> {
    let ext = match path.extension() {
        Some(ext) => ext.to_string_lossy().to_ascii_lowercase(),
        None => return Err(LoadError::MissingExtension),
    };

    match ext.as_str() {
        "csv" => Ok(()),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

/// Decode file contents as UTF-8 and parse them. Shared by every entry-point.
fn decode_transactions(bytes: &[u8]) -> Result<Vec<Transaction>, LoadError> {
    let text = std::str::from_utf8(bytes)?;
    parse_transactions(text.as_bytes())
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Classify parsed transactions and freeze them into a table.
///
/// The company table is resolved before descriptions are cleaned so that
/// inference always sees the raw text; its keywords then get the same
/// cleaning as the descriptions.
pub fn build_table(
    mut transactions: Vec<Transaction>,
    options: &LoadOptions,
) -> Result<TransactionTable, LoadError> {
    if transactions.is_empty() {
        return Err(LoadError::Empty);
    }

    let table = options
        .cleaning
        .apply_to_table(options.companies.resolve(&transactions));
    if table.is_empty() {
        log::warn!("No company rules; every transaction is labelled Other");
    }
    options.cleaning.apply(&mut transactions);
    let matched = classify(&mut transactions, &table);

    log::info!(
        "Loaded {} transactions, {} matched {} company rules",
        transactions.len(),
        matched,
        table.rules().len()
    );

    Ok(TransactionTable::new(transactions, table))
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// CSV layout: no header, five columns in fixed order
/// `Description, Day, Type, Amount, ID`. Text fields may be double-quoted
/// to embed commas.
pub fn parse_transactions<R: Read>(input: R) -> Result<Vec<Transaction>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut transactions = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|source| LoadError::Csv { row, source })?;

        if record.len() != 5 {
            return Err(LoadError::ColumnCount {
                row,
                found: record.len(),
            });
        }

        let day = parse_day(&record[1], row)?;
        let amount = parse_amount(&record[3], row)?;

        transactions.push(Transaction::new(
            record[0].to_string(),
            day,
            record[2].to_string(),
            amount,
            record[4].to_string(),
        ));
    }

    Ok(transactions)
}

/// Days are whole numbers; `"5.0"` is accepted as day 5.
fn parse_day(s: &str, row: usize) -> Result<i64, LoadError> {
    if let Ok(day) = s.parse::<i64>() {
        return Ok(day);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
        _ => Err(LoadError::InvalidNumber {
            row,
            column: "Day",
            value: s.to_string(),
        }),
    }
}

fn parse_amount(s: &str, row: usize) -> Result<f64, LoadError> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(LoadError::InvalidNumber {
            row,
            column: "Amount",
            value: s.to_string(),
        }),
    }
}
