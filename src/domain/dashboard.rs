// Dashboard domain model
use serde::Serialize;

use super::charts::{CountrySalary, HistogramBin, RemoteTypeShare, RoleSalary};
use super::dataset::FilterOptions;
use super::filter::{FilterSelection, FilteredView};
use super::metrics::{MetricTile, MetricsSummary};
use super::salary::SalaryRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    HorizontalBar,
    Histogram,
    Pie,
    Choropleth,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "series", content = "points", rename_all = "snake_case")]
pub enum ChartSeries {
    TopRoles(Vec<RoleSalary>),
    SalaryHistogram(Vec<HistogramBin>),
    RemoteTypes(Vec<RemoteTypeShare>),
    CountryAverages(Vec<CountrySalary>),
}

/// One chart panel. Either `data` is present or `no_data` explains why not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPanel {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub data: Option<ChartSeries>,
    pub no_data: Option<String>,
}

impl ChartPanel {
    pub fn new(id: &str, title: &str, kind: ChartKind, x_label: &str, y_label: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            data: None,
            no_data: None,
        }
    }

    /// Attach the series, or the "no data" message when there is none.
    pub fn with_data(mut self, data: Option<ChartSeries>, no_data_message: &str) -> Self {
        match data {
            Some(series) => self.data = Some(series),
            None => self.no_data = Some(no_data_message.to_string()),
        }
        self
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

/// Requested window of the detail table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

/// A window of the filtered rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordPage {
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub rows: Vec<SalaryRecord>,
}

impl RecordPage {
    pub fn from_view(view: &FilteredView<'_>, page: PageRequest) -> Self {
        let rows = view
            .iter()
            .skip(page.offset)
            .take(page.limit)
            .cloned()
            .collect();
        Self {
            total: view.len(),
            offset: page.offset,
            limit: page.limit,
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub subtitle: String,
    pub filters: FilterOptions,
    pub selection: FilterSelection,
    pub metrics: MetricsSummary,
    pub tiles: Vec<MetricTile>,
    pub charts: Vec<ChartPanel>,
    pub table: RecordPage,
}

/// Panel header sent before its data arrives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSkeleton {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
}

impl From<&ChartPanel> for PanelSkeleton {
    fn from(panel: &ChartPanel) -> Self {
        Self {
            id: panel.id.clone(),
            title: panel.title.clone(),
            kind: panel.kind,
        }
    }
}

/// Messages of the progressive dashboard stream, in send order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamMessage {
    Skeleton {
        title: String,
        subtitle: String,
        filters: FilterOptions,
        selection: FilterSelection,
        panels: Vec<PanelSkeleton>,
    },
    Metrics {
        metrics: MetricsSummary,
        tiles: Vec<MetricTile>,
    },
    Chart {
        panel: ChartPanel,
    },
    Table {
        table: RecordPage,
    },
    Complete {
        panels: usize,
        duration_ms: u64,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::filter_records;
    use crate::test_support::sample_dataset;

    #[test]
    fn test_record_page_windows_the_view() {
        let dataset = sample_dataset();
        let view = filter_records(&dataset, &FilterSelection::all(dataset.options()));

        let page = RecordPage::from_view(&view, PageRequest { offset: 6, limit: 5 });
        assert_eq!(page.total, 8);
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.rows[0], dataset.records()[6]);

        let past_end = RecordPage::from_view(&view, PageRequest { offset: 20, limit: 5 });
        assert!(past_end.rows.is_empty());
        assert_eq!(past_end.total, 8);
    }

    #[test]
    fn test_panel_without_data_carries_message() {
        let panel = ChartPanel::new("roles", "Roles", ChartKind::HorizontalBar, "x", "y")
            .with_data(None, "No data to display.");
        assert!(!panel.has_data());

        let json = serde_json::to_value(&panel).unwrap();
        assert_eq!(json["kind"], "horizontal_bar");
        assert!(json["data"].is_null());
        assert_eq!(json["no_data"], "No data to display.");
    }

    #[test]
    fn test_stream_message_is_tagged() {
        let msg = StreamMessage::Complete { panels: 4, duration_ms: 12 };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "complete", "panels": 4, "duration_ms": 12 }));
    }
}
