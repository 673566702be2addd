// Query-string parsing for filter selections and paging
use std::collections::BTreeSet;

use crate::application::errors::DashboardError;
use crate::domain::filter::{Dimension, SelectionRequest};

/// Filter selection plus paging parameters from one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardQuery {
    pub selection: SelectionRequest,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

/// Parse a raw query string such as `year=2023&year=2024&seniority=senior,pleno`.
///
/// Repeated keys and comma separated values accumulate. A key given with an
/// empty value selects nothing on that dimension; an absent key leaves the
/// dimension unrestricted. Unknown keys are ignored.
pub fn parse_dashboard_query(raw: Option<&str>) -> Result<DashboardQuery, DashboardError> {
    let mut query = DashboardQuery::default();
    let Some(raw) = raw else {
        return Ok(query);
    };

    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode(raw_key);
        let value = decode(raw_value);

        match key.as_str() {
            "offset" => query.offset = Some(parse_page_param("offset", &value)?),
            "limit" => query.limit = Some(parse_page_param("limit", &value)?),
            other => {
                if let Some(dimension) = Dimension::from_key(other) {
                    add_values(&mut query.selection, dimension, &value)?;
                }
            }
        }
    }

    Ok(query)
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

fn parse_page_param(name: &str, value: &str) -> Result<usize, DashboardError> {
    value
        .trim()
        .parse()
        .map_err(|_| DashboardError::InvalidPage(format!("{name} must be a non-negative integer, got '{value}'")))
}

fn add_values(selection: &mut SelectionRequest, dimension: Dimension, value: &str) -> Result<(), DashboardError> {
    let values = value.split(',').map(str::trim).filter(|v| !v.is_empty());

    match dimension {
        Dimension::Year => {
            let years = selection.years.get_or_insert_with(BTreeSet::new);
            for v in values {
                let year = v.parse::<i32>().map_err(|_| DashboardError::InvalidFilter {
                    dimension,
                    value: v.to_string(),
                })?;
                years.insert(year);
            }
        }
        Dimension::Seniority => extend(&mut selection.seniorities, values),
        Dimension::ContractType => extend(&mut selection.contract_types, values),
        Dimension::CompanySize => extend(&mut selection.company_sizes, values),
    }
    Ok(())
}

fn extend<'a>(target: &mut Option<BTreeSet<String>>, values: impl Iterator<Item = &'a str>) {
    target
        .get_or_insert_with(BTreeSet::new)
        .extend(values.map(str::to_string));
}
