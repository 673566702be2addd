// Headline metrics over a filtered view
use std::collections::HashMap;

use serde::Serialize;

use super::filter::FilteredView;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub record_count: usize,
    pub most_frequent_role: String,
}

/// A metric ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    pub id: String,
    pub title: String,
    pub value: String,
}

impl MetricTile {
    fn new(id: &str, title: &str, value: String) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            value,
        }
    }
}

impl MetricsSummary {
    pub fn tiles(&self) -> Vec<MetricTile> {
        vec![
            MetricTile::new("mean_salary", "Average salary", format_currency(self.mean_salary)),
            MetricTile::new("max_salary", "Maximum salary", format_currency(self.max_salary)),
            MetricTile::new("record_count", "Total records", self.record_count.to_string()),
            MetricTile::new("most_frequent_role", "Most frequent role", self.most_frequent_role.clone()),
        ]
    }
}

/// Summarize a view. An empty view yields zeros and an empty role.
pub fn summarize(view: &FilteredView<'_>) -> MetricsSummary {
    if view.is_empty() {
        return MetricsSummary::default();
    }

    let record_count = view.len();
    let total: f64 = view.salaries().sum();
    let max_salary = view.salaries().fold(f64::MIN, f64::max);
    let most_frequent_role = most_frequent(view.iter().map(|r| r.role.as_str()))
        .unwrap_or_default()
        .to_string();

    MetricsSummary {
        mean_salary: total / record_count as f64,
        max_salary,
        record_count,
        most_frequent_role,
    }
}

/// Statistical mode. Among equally frequent values the lexicographically
/// smallest wins.
pub fn most_frequent<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by(|(a, count_a), (b, count_b)| count_a.cmp(count_b).then_with(|| b.cmp(a)))
        .map(|(value, _)| value)
}

/// Format as US dollars with thousands separators and two decimals, e.g. `$1,234.50`.
pub fn format_currency(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{filter_records, FilterSelection};
    use crate::test_support::{dataset_of, record, sample_dataset};

    #[test]
    fn test_summarize_empty_view() {
        let summary = summarize(&FilteredView::default());
        assert_eq!(
            summary,
            MetricsSummary {
                mean_salary: 0.0,
                max_salary: 0.0,
                record_count: 0,
                most_frequent_role: String::new(),
            }
        );
    }

    #[test]
    fn test_summarize_small_view() {
        let dataset = dataset_of(vec![
            record(2024, "senior", "integral", "media", "A", 100.0),
            record(2024, "senior", "integral", "media", "B", 300.0),
            record(2024, "senior", "integral", "media", "A", 200.0),
        ]);
        let view = filter_records(&dataset, &FilterSelection::all(dataset.options()));
        let summary = summarize(&view);

        assert_eq!(summary.mean_salary, 200.0);
        assert_eq!(summary.max_salary, 300.0);
        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.most_frequent_role, "A");
    }

    #[test]
    fn test_summarize_sample() {
        let dataset = sample_dataset();
        let view = filter_records(&dataset, &FilterSelection::all(dataset.options()));
        let summary = summarize(&view);

        assert_eq!(summary.record_count, 8);
        assert_eq!(summary.max_salary, 170000.0);
        assert_eq!(summary.mean_salary, 770000.0 / 8.0);
        assert_eq!(summary.most_frequent_role, "Data Scientist");
    }

    #[test]
    fn test_mode_tie_breaks_lexicographically() {
        let roles = ["Zeta", "Alpha", "Zeta", "Alpha", "Beta"];
        assert_eq!(most_frequent(roles), Some("Alpha"));
        assert_eq!(most_frequent(Vec::<&str>::new()), None);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.5), "$999.50");
        assert_eq!(format_currency(1234.567), "$1,234.57");
        assert_eq!(format_currency(96250.0), "$96,250.00");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-1500.0), "-$1,500.00");
    }

    #[test]
    fn test_tiles_cover_every_metric() {
        let summary = MetricsSummary {
            mean_salary: 125000.0,
            max_salary: 300000.0,
            record_count: 42,
            most_frequent_role: "Data Engineer".to_string(),
        };
        let tiles = summary.tiles();
        let values: Vec<&str> = tiles.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["$125,000.00", "$300,000.00", "42", "Data Engineer"]);
    }
}
