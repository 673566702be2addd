// CSV dataset adapters - HTTP and file sources plus CSV encoding
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use crate::application::dataset_source::DatasetSource;
use crate::application::errors::DashboardError;
use crate::domain::salary::SalaryRecord;

/// Parse salary rows from CSV with the source column names.
///
/// Columns are matched by header name, so extra columns and column order do
/// not matter. The first bad row aborts the parse.
pub fn parse_salary_csv<R: Read>(reader: R) -> Result<Vec<SalaryRecord>, DashboardError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<SalaryRecord>().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|e| DashboardError::MalformedDataset {
            row,
            reason: e.to_string(),
        })?;
        record
            .validate()
            .map_err(|reason| DashboardError::MalformedDataset { row, reason })?;
        records.push(record);
    }
    Ok(records)
}

/// Encode rows as CSV with a header row of field names.
pub fn write_salary_csv<'a, I>(rows: I) -> anyhow::Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a SalaryRecord>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.into_inner().context("flushing CSV output")
}

#[derive(Debug, Clone)]
pub struct HttpCsvSource {
    url: String,
    client: reqwest::Client,
}

impl HttpCsvSource {
    pub fn new(url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { url, client })
    }

    async fn download(&self) -> anyhow::Result<bytes::Bytes> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "text/csv")
            .send()
            .await
            .context("Failed to send request for dataset")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("dataset request failed with status {}", status);
        }

        response.bytes().await.context("Failed to read dataset body")
    }
}

#[async_trait]
impl DatasetSource for HttpCsvSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<SalaryRecord>, DashboardError> {
        let body = self
            .download()
            .await
            .map_err(|e| DashboardError::DatasetUnavailable(format!("{e:#}")))?;
        parse_salary_csv(body.as_ref())
    }
}

#[derive(Debug, Clone)]
pub struct FileCsvSource {
    path: PathBuf,
}

impl FileCsvSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl DatasetSource for FileCsvSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<SalaryRecord>, DashboardError> {
        let body = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))
            .map_err(|e| DashboardError::DatasetUnavailable(format!("{e:#}")))?;
        parse_salary_csv(body.as_slice())
    }
}
