use std::path::Path;

use crate::color::ColorMap;
use crate::data::aggregate::DashboardSummary;
use crate::data::error::LoadError;
use crate::data::filter::{filtered_indices, DayPreset, TransactionFilter};
use crate::data::loader::{load_bytes, load_file, LoadOptions};
use crate::data::model::TransactionTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<TransactionTable>,

    /// How every load is classified.
    pub options: LoadOptions,

    /// Current filter selections.
    pub filter: TransactionFilter,

    /// Indices of transactions passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Chart data for the visible transactions (cached).
    pub summary: DashboardSummary,

    /// Stable colours per company and per type label.
    pub company_colors: ColorMap,
    pub type_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Ingest a newly loaded dataset and reset filters to "everything".
    pub fn set_dataset(&mut self, dataset: TransactionTable) {
        self.filter = TransactionFilter::all(&dataset);
        self.company_colors = ColorMap::new(dataset.companies());
        self.type_colors = ColorMap::new(dataset.types());
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Load an export from disk. On failure the previous dataset stays.
    pub fn load_path(&mut self, path: &Path) {
        let result = load_file(path, &self.options);
        self.finish_load(&path.display().to_string(), result);
    }

    /// Load uploaded (dropped) file bytes.
    pub fn load_upload(&mut self, name: &str, bytes: &[u8]) {
        let result = load_bytes(name, bytes, &self.options);
        self.finish_load(name, result);
    }

    fn finish_load(&mut self, source: &str, result: Result<TransactionTable, LoadError>) {
        match result {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} transactions from {source} ({} companies, {} types)",
                    dataset.len(),
                    dataset.companies().len(),
                    dataset.types().len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {source}: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Recompute `visible_indices` and `summary` after a filter change.
    pub fn refilter(&mut self) {
        match &self.dataset {
            Some(ds) => {
                self.visible_indices = filtered_indices(ds, &self.filter);
                self.summary = DashboardSummary::compute(ds, &self.visible_indices);
            }
            None => {
                self.visible_indices.clear();
                self.summary = DashboardSummary::default();
            }
        }
    }

    /// Set the inclusive day range; bounds are swapped if reversed.
    pub fn set_day_range(&mut self, from: i64, to: i64) {
        self.filter.days = (from.min(to), from.max(to));
        self.refilter();
    }

    pub fn apply_preset(&mut self, preset: DayPreset) {
        if let Some(bounds) = self.dataset.as_ref().and_then(|ds| ds.day_range()) {
            self.filter.days = preset.range(bounds);
            self.refilter();
        }
    }

    pub fn toggle_company(&mut self, company: &str) {
        toggle(&mut self.filter.companies, company);
        self.refilter();
    }

    pub fn toggle_type(&mut self, kind: &str) {
        toggle(&mut self.filter.types, kind);
        self.refilter();
    }

    pub fn select_all_companies(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filter.companies = ds.companies().clone();
            self.refilter();
        }
    }

    pub fn select_no_companies(&mut self) {
        self.filter.companies.clear();
        self.refilter();
    }

    pub fn select_all_types(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filter.types = ds.types().clone();
            self.refilter();
        }
    }

    pub fn select_no_types(&mut self) {
        self.filter.types.clear();
        self.refilter();
    }
}

fn toggle(set: &mut std::collections::BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}
