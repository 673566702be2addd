// Loaded dataset and the filter options derived from it
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::salary::SalaryRecord;

/// Distinct values available per filter dimension, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub years: BTreeSet<i32>,
    pub seniorities: BTreeSet<String>,
    pub contract_types: BTreeSet<String>,
    pub company_sizes: BTreeSet<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[SalaryRecord]) -> Self {
        let mut options = Self::default();
        for r in records {
            options.years.insert(r.year);
            options.seniorities.insert(r.seniority.clone());
            options.contract_types.insert(r.contract_type.clone());
            options.company_sizes.insert(r.company_size.clone());
        }
        options
    }
}

/// The immutable, fully loaded dataset. Shared between requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SalaryDataset {
    records: Vec<SalaryRecord>,
    options: FilterOptions,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl SalaryDataset {
    pub fn new(records: Vec<SalaryRecord>, source: impl Into<String>, loaded_at: DateTime<Utc>) -> Self {
        let options = FilterOptions::from_records(&records);
        Self {
            records,
            options,
            source: source.into(),
            loaded_at,
        }
    }

    pub fn records(&self) -> &[SalaryRecord] {
        &self.records
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Where the rows came from (URL or file path).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
