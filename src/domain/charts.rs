// Chart data preparers. Each returns `None` when there is nothing to plot.
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::filter::FilteredView;
use super::salary::SalaryRecord;

pub const TOP_ROLES_LIMIT: usize = 10;
pub const HISTOGRAM_BINS: usize = 30;
pub const FOCUS_ROLE: &str = "Data Scientist";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleSalary {
    pub role: String,
    pub mean_salary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteTypeShare {
    pub remote_type: String,
    pub count: usize,
    /// Fraction of the view, in `[0, 1]`.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySalary {
    pub country_iso3: String,
    pub mean_salary: f64,
}

/// Mean salary per key, ordered by key.
fn group_mean<'a, F>(rows: impl Iterator<Item = &'a SalaryRecord>, key: F) -> BTreeMap<&'a str, f64>
where
    F: Fn(&'a SalaryRecord) -> &'a str,
{
    let mut sums: BTreeMap<&'a str, (f64, usize)> = BTreeMap::new();
    for r in rows {
        let entry = sums.entry(key(r)).or_insert((0.0, 0));
        entry.0 += r.salary_usd;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(k, (sum, n))| (k, sum / n as f64))
        .collect()
}

/// The `limit` roles with the highest mean salary, returned in ascending
/// order so a horizontal bar chart draws the best paid role on top.
pub fn top_roles_by_salary(view: &FilteredView<'_>, limit: usize) -> Option<Vec<RoleSalary>> {
    if view.is_empty() {
        return None;
    }

    let mut roles: Vec<RoleSalary> = group_mean(view.iter(), |r| r.role.as_str())
        .into_iter()
        .map(|(role, mean_salary)| RoleSalary {
            role: role.to_string(),
            mean_salary,
        })
        .collect();

    // highest first, ties by name, then keep the head
    roles.sort_by(|a, b| {
        b.mean_salary
            .total_cmp(&a.mean_salary)
            .then_with(|| a.role.cmp(&b.role))
    });
    roles.truncate(limit);
    roles.sort_by(|a, b| {
        a.mean_salary
            .total_cmp(&b.mean_salary)
            .then_with(|| a.role.cmp(&b.role))
    });
    Some(roles)
}

/// Equal-width bins over `[min, max]` of the view. The last bin is closed on
/// the right so the maximum is counted.
pub fn salary_histogram(view: &FilteredView<'_>, bins: usize) -> Option<Vec<HistogramBin>> {
    if view.is_empty() || bins == 0 {
        return None;
    }

    let min = view.salaries().fold(f64::MAX, f64::min);
    let max = view.salaries().fold(f64::MIN, f64::max);

    if min == max {
        return Some(vec![HistogramBin {
            start: min,
            end: max,
            count: view.len(),
        }]);
    }

    let width = (max - min) / bins as f64;
    // edges[i] is the start of bin i; edges[bins] is the maximum
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { max } else { min + width * i as f64 })
        .collect();

    let mut counts = vec![0usize; bins];
    for salary in view.salaries() {
        // interior edges at or below the value; bucketing on the reported edges
        // keeps every value inside its bin's [start, end)
        let idx = edges[1..bins].partition_point(|&edge| edge <= salary);
        counts[idx] += 1;
    }

    let histogram = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: edges[i],
            end: edges[i + 1],
            count,
        })
        .collect();
    Some(histogram)
}

/// Row count per remote type, most common first.
pub fn remote_type_distribution(view: &FilteredView<'_>) -> Option<Vec<RemoteTypeShare>> {
    if view.is_empty() {
        return None;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in view.iter() {
        *counts.entry(r.remote_type.as_str()).or_default() += 1;
    }

    let total = view.len() as f64;
    let mut shares: Vec<RemoteTypeShare> = counts
        .into_iter()
        .map(|(remote_type, count)| RemoteTypeShare {
            remote_type: remote_type.to_string(),
            count,
            share: count as f64 / total,
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.remote_type.cmp(&b.remote_type)));
    Some(shares)
}

/// Mean salary per residence country for rows whose role is exactly `role`.
pub fn country_average_for_role(view: &FilteredView<'_>, role: &str) -> Option<Vec<CountrySalary>> {
    let matching = view.iter().filter(|r| r.role == role);
    let averages: Vec<CountrySalary> = group_mean(matching, |r| r.residence_iso3.as_str())
        .into_iter()
        .map(|(country, mean_salary)| CountrySalary {
            country_iso3: country.to_string(),
            mean_salary,
        })
        .collect();

    if averages.is_empty() { None } else { Some(averages) }
}
