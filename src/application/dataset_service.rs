// Dataset service - Loads the dataset once and refreshes it after a TTL
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use crate::application::dataset_source::DatasetSource;
use crate::application::errors::DashboardError;
use crate::domain::dataset::SalaryDataset;

#[derive(Clone)]
pub struct DatasetService {
    source: Arc<dyn DatasetSource>,
    /// `None` keeps the first load forever.
    ttl: Option<TimeDelta>,
    cached: Arc<RwLock<Option<Arc<SalaryDataset>>>>,
}

impl DatasetService {
    pub fn new(source: Arc<dyn DatasetSource>, ttl_secs: Option<u64>) -> Self {
        let ttl = ttl_secs.and_then(|secs| TimeDelta::try_seconds(i64::try_from(secs).ok()?));
        Self {
            source,
            ttl,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// The dataset to answer a request with, loading or refreshing it if needed.
    pub async fn current(&self) -> Result<Arc<SalaryDataset>, DashboardError> {
        {
            let cached = self.cached.read().await;
            if let Some(dataset) = cached.as_ref() {
                if self.is_fresh(dataset, Utc::now()) {
                    return Ok(dataset.clone());
                }
            }
        }

        let mut slot = self.cached.write().await;
        // another request may have refreshed while we waited for the lock
        if let Some(dataset) = slot.as_ref() {
            if self.is_fresh(dataset, Utc::now()) {
                return Ok(dataset.clone());
            }
        }

        let dataset = self.load().await?;
        *slot = Some(dataset.clone());
        Ok(dataset)
    }

    fn is_fresh(&self, dataset: &SalaryDataset, now: DateTime<Utc>) -> bool {
        match self.ttl {
            None => true,
            Some(ttl) => now - dataset.loaded_at() < ttl,
        }
    }

    async fn load(&self) -> Result<Arc<SalaryDataset>, DashboardError> {
        let location = self.source.describe();
        let started = Instant::now();
        tracing::debug!("Loading salary dataset from {}", location);

        let records = self.source.fetch().await.inspect_err(|e| {
            tracing::error!("Dataset load from {} failed: {}", location, e);
        })?;

        let dataset = SalaryDataset::new(records, location, Utc::now());
        if dataset.is_empty() {
            tracing::warn!("Dataset from {} contains no records", dataset.source());
        }
        tracing::info!(
            "Loaded {} salary records from {} in {} ms",
            dataset.len(),
            dataset.source(),
            started.elapsed().as_millis()
        );
        Ok(Arc::new(dataset))
    }
}
