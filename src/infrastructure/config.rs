use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::charts::{FOCUS_ROLE, HISTOGRAM_BINS, TOP_ROLES_LIMIT};

pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/vqrca/dashboard_salarios_dados/refs/heads/main/dados-imersao-final.csv";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub dataset: DatasetSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatasetSettings {
    pub url: String,
    /// Local CSV file; takes precedence over `url` when set.
    pub path: Option<PathBuf>,
    /// Unset keeps the first load; 0 reloads on every request.
    pub cache_ttl_secs: Option<u64>,
    pub request_timeout_secs: u64,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATASET_URL.to_string(),
            path: None,
            cache_ttl_secs: None,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardSettings {
    pub title: String,
    pub subtitle: String,
    pub top_roles_limit: usize,
    pub histogram_bins: usize,
    pub focus_role: String,
    pub table_page_size: usize,
    pub max_page_size: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: "Data Industry Salary Dashboard".to_string(),
            subtitle: "Explore salaries in the data field over recent years. Use the filters to refine the analysis."
                .to_string(),
            top_roles_limit: TOP_ROLES_LIMIT,
            histogram_bins: HISTOGRAM_BINS,
            focus_role: FOCUS_ROLE.to_string(),
            table_page_size: 100,
            max_page_size: 1000,
        }
    }
}

/// Defaults, then `config/dashboard.*` if present, then `SALARY_DASHBOARD__*`
/// environment variables.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("SALARY_DASHBOARD")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = from_toml("");
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.dataset.url, DEFAULT_DATASET_URL);
        assert!(config.dataset.cache_ttl_secs.is_none());
        assert_eq!(config.dashboard.top_roles_limit, 10);
        assert_eq!(config.dashboard.histogram_bins, 30);
        assert_eq!(config.dashboard.focus_role, "Data Scientist");
    }

    #[test]
    fn test_partial_sections_override_defaults() {
        let config = from_toml(
            r#"
            [dataset]
            path = "data/salaries.csv"
            cache_ttl_secs = 0

            [dashboard]
            focus_role = "Data Engineer"
            "#,
        );
        assert_eq!(config.dataset.path, Some(PathBuf::from("data/salaries.csv")));
        assert_eq!(config.dataset.cache_ttl_secs, Some(0));
        assert_eq!(config.dataset.request_timeout_secs, 30);
        assert_eq!(config.dashboard.focus_role, "Data Engineer");
        assert_eq!(config.dashboard.table_page_size, 100);
    }
}
