use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{MovieRecord, Row},
    services::merge::merge_records,
};

const DRIVE_SHARE_MARKER: &str = "/d/";

/// Fetches and parses the credits and movies datasets
#[derive(Clone)]
pub struct DatasetLoader {
    http_client: HttpClient,
}

impl DatasetLoader {
    /// `http_client` should carry the bulk fetch timeout
    pub fn new(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Loads both datasets and merges them into corpus records.
    ///
    /// Either dataset failing to load, or coming back empty, is a
    /// `DataUnavailable` error; so is a merge that matches nothing.
    pub async fn load_records(
        &self,
        credits_source: &str,
        movies_source: &str,
    ) -> AppResult<Vec<MovieRecord>> {
        let credits = self.load_dataset("credits", credits_source).await?;
        let movies = self.load_dataset("movies", movies_source).await?;

        let records = merge_records(&credits, &movies);
        if records.is_empty() {
            return Err(AppError::DataUnavailable(
                "no credits rows matched a movie".to_string(),
            ));
        }

        tracing::info!(
            credits = credits.len(),
            movies = movies.len(),
            merged = records.len(),
            "Datasets merged"
        );

        Ok(records)
    }

    async fn load_dataset(&self, name: &str, source: &str) -> AppResult<Vec<Row>> {
        let rows = self.load_rows(source).await.map_err(|e| {
            tracing::error!(dataset = name, source = %source, error = %e, "Failed to load dataset");
            AppError::DataUnavailable(format!("failed to load {} dataset: {}", name, e))
        })?;

        if rows.is_empty() {
            tracing::error!(dataset = name, source = %source, "Dataset is empty");
            return Err(AppError::DataUnavailable(format!(
                "{} dataset is empty",
                name
            )));
        }

        Ok(rows)
    }

    /// Reads one CSV dataset from an http(s) URL or a local path
    pub async fn load_rows(&self, source: &str) -> AppResult<Vec<Row>> {
        let content = if is_remote(source) {
            self.fetch_remote(source).await?
        } else {
            tokio::fs::read_to_string(source).await?
        };

        parse_rows(&content)
    }

    async fn fetch_remote(&self, source: &str) -> AppResult<String> {
        let url = download_url(source);
        tracing::debug!(url = %url, "Fetching dataset");

        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "dataset download returned status {}",
                response.status()
            )));
        }

        // Drive serves the raw file body once the share link is converted
        let bytes = response.bytes().await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| AppError::ExternalApi(format!("dataset is not valid UTF-8: {}", e)))
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Turns a Google Drive share link into a direct download link.
///
/// Anything without a `/d/<file id>` segment is returned unchanged.
pub fn download_url(share_url: &str) -> String {
    let file_id = share_url
        .split_once(DRIVE_SHARE_MARKER)
        .and_then(|(_, rest)| rest.split('/').next())
        .filter(|id| !id.is_empty());

    match file_id {
        Some(file_id) if share_url.contains("drive.google.com") => {
            format!("https://drive.google.com/uc?id={}&export=download", file_id)
        }
        _ => share_url.to_string(),
    }
}

/// Parses CSV text into header-keyed rows.
///
/// Rows the CSV reader rejects are skipped. A row shorter than the header only
/// carries the columns it has.
pub fn parse_rows(content: &str) -> AppResult<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        match result {
            Ok(record) => rows.push(
                headers
                    .iter()
                    .zip(record.iter())
                    .map(|(column, value)| (column.to_string(), value.to_string()))
                    .collect(),
            ),
            Err(e) => {
                skipped += 1;
                tracing::warn!(error = %e, "Skipping malformed CSV row");
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, parsed = rows.len(), "Some CSV rows were skipped");
    }

    Ok(rows)
}
