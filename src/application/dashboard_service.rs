// Dashboard service - Use case for building dashboards from a filter selection
use crate::application::dataset_service::DatasetService;
use crate::application::errors::DashboardError;
use crate::domain::charts::{
    country_average_for_role, remote_type_distribution, salary_histogram, top_roles_by_salary,
};
use crate::domain::dashboard::{ChartKind, ChartPanel, ChartSeries, Dashboard, PageRequest, RecordPage};
use crate::domain::dataset::{FilterOptions, SalaryDataset};
use crate::domain::filter::{filter_records, FilterSelection, FilteredView, SelectionRequest};
use crate::domain::metrics::summarize;
use crate::infrastructure::config::DashboardSettings;
use crate::infrastructure::csv_dataset::write_salary_csv;

#[derive(Clone)]
pub struct DashboardService {
    datasets: DatasetService,
    settings: DashboardSettings,
}

impl DashboardService {
    pub fn new(datasets: DatasetService, settings: DashboardSettings) -> Self {
        Self { datasets, settings }
    }

    pub fn datasets(&self) -> &DatasetService {
        &self.datasets
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Resolve optional paging parameters against the configured sizes.
    pub fn page(&self, offset: Option<usize>, limit: Option<usize>) -> Result<PageRequest, DashboardError> {
        let limit = limit.unwrap_or(self.settings.table_page_size);
        if limit > self.settings.max_page_size {
            return Err(DashboardError::InvalidPage(format!(
                "limit {} exceeds the maximum of {}",
                limit, self.settings.max_page_size
            )));
        }
        Ok(PageRequest {
            offset: offset.unwrap_or(0),
            limit,
        })
    }

    pub async fn filter_options(&self) -> Result<FilterOptions, DashboardError> {
        let dataset = self.datasets.current().await?;
        Ok(dataset.options().clone())
    }

    pub async fn get_dashboard(
        &self,
        request: &SelectionRequest,
        page: PageRequest,
    ) -> Result<Dashboard, DashboardError> {
        let dataset = self.datasets.current().await?;
        let selection = request.resolve(dataset.options());
        Ok(build_dashboard(&dataset, &selection, &self.settings, page))
    }

    pub async fn records(
        &self,
        request: &SelectionRequest,
        page: PageRequest,
    ) -> Result<RecordPage, DashboardError> {
        let dataset = self.datasets.current().await?;
        let selection = request.resolve(dataset.options());
        let view = filter_records(&dataset, &selection);
        Ok(RecordPage::from_view(&view, page))
    }

    /// Every filtered row as CSV.
    pub async fn export_records(&self, request: &SelectionRequest) -> Result<Vec<u8>, DashboardError> {
        let dataset = self.datasets.current().await?;
        let selection = request.resolve(dataset.options());
        let view = filter_records(&dataset, &selection);
        write_salary_csv(view.iter()).map_err(|e| DashboardError::Encoding(format!("{e:#}")))
    }
}

/// Filter the dataset and derive everything the dashboard shows.
pub fn build_dashboard(
    dataset: &SalaryDataset,
    selection: &FilterSelection,
    settings: &DashboardSettings,
    page: PageRequest,
) -> Dashboard {
    let view = filter_records(dataset, selection);
    tracing::debug!("Selection kept {} of {} records", view.len(), dataset.len());

    let metrics = summarize(&view);
    let tiles = metrics.tiles();
    let charts = build_panels(&view, settings);
    tracing::debug!(
        "{} of {} chart panels have data",
        charts.iter().filter(|c| c.has_data()).count(),
        charts.len()
    );

    Dashboard {
        title: settings.title.clone(),
        subtitle: settings.subtitle.clone(),
        filters: dataset.options().clone(),
        selection: selection.clone(),
        metrics,
        tiles,
        charts,
        table: RecordPage::from_view(&view, page),
    }
}

/// The four chart panels, in display order.
pub fn build_panels(view: &FilteredView<'_>, settings: &DashboardSettings) -> Vec<ChartPanel> {
    let top_roles = ChartPanel::new(
        "top_roles",
        &format!("Top {} roles by average salary", settings.top_roles_limit),
        ChartKind::HorizontalBar,
        "Average annual salary (USD)",
        "",
    )
    .with_data(
        top_roles_by_salary(view, settings.top_roles_limit).map(ChartSeries::TopRoles),
        "No data to display in the roles chart.",
    );

    let histogram = ChartPanel::new(
        "salary_histogram",
        "Annual salary distribution",
        ChartKind::Histogram,
        "Salary range (USD)",
        "",
    )
    .with_data(
        salary_histogram(view, settings.histogram_bins).map(ChartSeries::SalaryHistogram),
        "No data to display in the distribution chart.",
    );

    let remote_types = ChartPanel::new(
        "remote_types",
        "Share of work arrangements",
        ChartKind::Pie,
        "Work arrangement",
        "Records",
    )
    .with_data(
        remote_type_distribution(view).map(ChartSeries::RemoteTypes),
        "No data to display in the work arrangement chart.",
    );

    let country_average = ChartPanel::new(
        "country_average",
        &format!("Average {} salary by country", settings.focus_role),
        ChartKind::Choropleth,
        "Country",
        "Average salary (USD)",
    )
    .with_data(
        country_average_for_role(view, &settings.focus_role).map(ChartSeries::CountryAverages),
        "No data to display in the country salary chart.",
    );

    vec![top_roles, histogram, remote_types, country_average]
}
