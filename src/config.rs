use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::data::classify::{ClassificationTable, CompanyRule, DescriptionCleaning};
use crate::data::infer::{CompanySource, HeadquartersFilter, InferenceOptions};
use crate::data::loader::LoadOptions;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Income and expense dashboard for exported game transaction logs
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "ledger-panda", version)]
pub struct Cli {
    /// Transaction export (CSV) to open on startup
    pub csv: Option<PathBuf>,

    /// JSON file with an ordered list of `{"company": .., "keywords": [..]}`
    /// rules, replacing the built-in company table
    #[arg(long, conflicts_with = "infer")]
    pub companies: Option<PathBuf>,

    /// Infer company names from "<name> Revenue" and "(<name> Daily Wage)"
    /// descriptions instead of using a fixed table
    #[arg(long)]
    pub infer: bool,

    /// Keep only this headquarters name when inferring companies
    #[arg(long, requires = "infer")]
    pub headquarters: Option<String>,

    /// Remove every '(' from descriptions before classification
    #[arg(long)]
    pub strip_parens: bool,
}

impl Cli {
    /// Resolve flags into the options every load uses.
    pub fn load_options(&self) -> Result<LoadOptions> {
        let companies = if self.infer {
            CompanySource::Inferred(InferenceOptions {
                headquarters: match &self.headquarters {
                    Some(name) => HeadquartersFilter::Only(name.clone()),
                    None => HeadquartersFilter::Any,
                },
            })
        } else if let Some(path) = &self.companies {
            CompanySource::Static(read_company_table(path)?)
        } else {
            CompanySource::Static(ClassificationTable::builtin())
        };

        let cleaning = if self.strip_parens {
            DescriptionCleaning::StripOpenParens
        } else {
            DescriptionCleaning::Keep
        };

        Ok(LoadOptions {
            companies,
            cleaning,
        })
    }
}

// ---------------------------------------------------------------------------
// Company table file
// ---------------------------------------------------------------------------

/// Read an ordered company table from JSON:
///
/// ```json
/// [
///   { "company": "Best Inc", "keywords": ["best inc"] },
///   { "company": "Luxury Clothes", "keywords": ["luxury clothes", "lux"] }
/// ]
/// ```
pub fn read_company_table(path: &Path) -> Result<ClassificationTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading company table {}", path.display()))?;
    parse_company_table(&text).with_context(|| format!("parsing company table {}", path.display()))
}

pub fn parse_company_table(text: &str) -> Result<ClassificationTable> {
    let rules: Vec<CompanyRule> = serde_json::from_str(text)?;
    log::debug!("Read {} company rules", rules.len());
    Ok(ClassificationTable::new(rules))
}
