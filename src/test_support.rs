// Shared fixtures for unit tests
use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::application::dashboard_service::DashboardService;
use crate::application::dataset_service::DatasetService;
use crate::application::dataset_source::DatasetSource;
use crate::application::errors::DashboardError;
use crate::domain::dataset::SalaryDataset;
use crate::domain::salary::SalaryRecord;
use crate::infrastructure::config::DashboardSettings;

pub fn record(
    year: i32,
    seniority: &str,
    contract_type: &str,
    company_size: &str,
    role: &str,
    salary_usd: f64,
) -> SalaryRecord {
    full_record(year, seniority, contract_type, company_size, role, "remoto", "USA", salary_usd)
}

#[allow(clippy::too_many_arguments)]
pub fn full_record(
    year: i32,
    seniority: &str,
    contract_type: &str,
    company_size: &str,
    role: &str,
    remote_type: &str,
    residence_iso3: &str,
    salary_usd: f64,
) -> SalaryRecord {
    SalaryRecord {
        year,
        seniority: seniority.to_string(),
        contract_type: contract_type.to_string(),
        company_size: company_size.to_string(),
        role: role.to_string(),
        remote_type: remote_type.to_string(),
        residence_iso3: residence_iso3.to_string(),
        salary_usd,
    }
}

/// Eight rows covering every dimension with a few repeats.
pub fn sample_records() -> Vec<SalaryRecord> {
    vec![
        full_record(2022, "junior", "integral", "pequena", "Data Analyst", "hibrido", "BRA", 30000.0),
        full_record(2023, "pleno", "integral", "media", "Data Scientist", "remoto", "BRA", 60000.0),
        full_record(2023, "senior", "pj", "grande", "Data Scientist", "remoto", "USA", 150000.0),
        full_record(2024, "senior", "integral", "grande", "Data Engineer", "presencial", "USA", 140000.0),
        full_record(2024, "pleno", "pj", "media", "Data Analyst", "hibrido", "PRT", 45000.0),
        full_record(2024, "senior", "integral", "media", "Data Scientist", "remoto", "USA", 170000.0),
        full_record(2023, "junior", "pj", "pequena", "ML Engineer", "presencial", "DEU", 55000.0),
        full_record(2022, "senior", "integral", "grande", "Data Engineer", "remoto", "GBR", 120000.0),
    ]
}

pub fn dataset_of(records: Vec<SalaryRecord>) -> SalaryDataset {
    let loaded_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    SalaryDataset::new(records, "memory://sample", loaded_at)
}

pub fn sample_dataset() -> SalaryDataset {
    dataset_of(sample_records())
}

/// The sample rows in the source CSV layout, with an extra column the loader ignores.
pub const SAMPLE_CSV: &str = "\
ano,senioridade,contrato,tamanho_empresa,cargo,salario,usd,remoto,residencia_iso3
2022,junior,integral,pequena,Data Analyst,150000,30000,hibrido,BRA
2023,pleno,integral,media,Data Scientist,300000,60000,remoto,BRA
2023.0,senior,pj,grande,Data Scientist,150000,150000.0,remoto,USA
";

/// Source serving fixed rows, or failing when given `None`.
pub struct StaticSource(pub Option<Vec<SalaryRecord>>);

#[async_trait::async_trait]
impl DatasetSource for StaticSource {
    fn describe(&self) -> String {
        "memory://static".to_string()
    }

    async fn fetch(&self) -> Result<Vec<SalaryRecord>, DashboardError> {
        self.0
            .clone()
            .ok_or_else(|| DashboardError::DatasetUnavailable("offline".to_string()))
    }
}

pub fn dashboard_service(records: Option<Vec<SalaryRecord>>) -> DashboardService {
    let datasets = DatasetService::new(Arc::new(StaticSource(records)), None);
    DashboardService::new(datasets, DashboardSettings::default())
}
