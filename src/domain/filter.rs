// Filter selection and the filter engine
use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::dataset::{FilterOptions, SalaryDataset};
use super::salary::SalaryRecord;

/// The four dimensions a client can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Year,
    Seniority,
    ContractType,
    CompanySize,
}

impl Dimension {
    /// Query-string key for this dimension.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Year => "year",
            Dimension::Seniority => "seniority",
            Dimension::ContractType => "contract_type",
            Dimension::CompanySize => "company_size",
        }
    }

    /// Accepts the English key or the source column name.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "year" | "ano" => Some(Dimension::Year),
            "seniority" | "senioridade" => Some(Dimension::Seniority),
            "contract_type" | "contrato" => Some(Dimension::ContractType),
            "company_size" | "tamanho_empresa" => Some(Dimension::CompanySize),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The set of values selected on each dimension.
///
/// An empty set selects nothing. Values that never occur in the dataset are
/// allowed and simply match no rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub years: BTreeSet<i32>,
    pub seniorities: BTreeSet<String>,
    pub contract_types: BTreeSet<String>,
    pub company_sizes: BTreeSet<String>,
}

impl FilterSelection {
    /// Select every available value (the initial, unfiltered state).
    pub fn all(options: &FilterOptions) -> Self {
        Self {
            years: options.years.clone(),
            seniorities: options.seniorities.clone(),
            contract_types: options.contract_types.clone(),
            company_sizes: options.company_sizes.clone(),
        }
    }

    pub fn matches(&self, record: &SalaryRecord) -> bool {
        self.years.contains(&record.year)
            && self.seniorities.contains(&record.seniority)
            && self.contract_types.contains(&record.contract_type)
            && self.company_sizes.contains(&record.company_size)
    }
}

/// A selection as requested by a client. `None` means the dimension was not
/// mentioned and defaults to every available value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    pub years: Option<BTreeSet<i32>>,
    pub seniorities: Option<BTreeSet<String>>,
    pub contract_types: Option<BTreeSet<String>>,
    pub company_sizes: Option<BTreeSet<String>>,
}

impl SelectionRequest {
    pub fn resolve(&self, options: &FilterOptions) -> FilterSelection {
        FilterSelection {
            years: self.years.clone().unwrap_or_else(|| options.years.clone()),
            seniorities: self
                .seniorities
                .clone()
                .unwrap_or_else(|| options.seniorities.clone()),
            contract_types: self
                .contract_types
                .clone()
                .unwrap_or_else(|| options.contract_types.clone()),
            company_sizes: self
                .company_sizes
                .clone()
                .unwrap_or_else(|| options.company_sizes.clone()),
        }
    }
}

/// Rows of a dataset that passed a selection, in dataset order.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    rows: Vec<&'a SalaryRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a SalaryRecord> + '_ {
        self.rows.iter().copied()
    }

    pub fn salaries(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|r| r.salary_usd)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Keep the rows whose four dimension values are all selected.
pub fn filter_records<'a>(dataset: &'a SalaryDataset, selection: &FilterSelection) -> FilteredView<'a> {
    let rows = dataset
        .records()
        .iter()
        .filter(|r| selection.matches(r))
        .collect();
    FilteredView { rows }
}
