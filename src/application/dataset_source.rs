// Source trait for the salary dataset
use async_trait::async_trait;

use crate::application::errors::DashboardError;
use crate::domain::salary::SalaryRecord;

#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Human readable location (URL or path), used in logs and status output.
    fn describe(&self) -> String;

    /// Fetch and parse every record. Any malformed row fails the whole load.
    async fn fetch(&self) -> Result<Vec<SalaryRecord>, DashboardError>;
}
