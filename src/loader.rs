use crate::models::{Config, DataSourceMode, InstitutionRecord};
use anyhow::{Context, Result};
use std::fs;

/// Loads the static cutoff dataset from the configured source. The dataset
/// is fetched once per run and never refreshed.
pub struct CollegeDataLoader {
    client: reqwest::Client,
}

impl CollegeDataLoader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn load_file(&self, file_path: &str) -> Result<Vec<InstitutionRecord>> {
        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read dataset file: {}", file_path))?;

        let colleges: Vec<InstitutionRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse dataset file: {}", file_path))?;

        Ok(colleges)
    }

    pub async fn load_url(&self, url: &str) -> Result<Vec<InstitutionRecord>> {
        println!("🌐 Fetching college data from: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(std::time::Duration::from_secs(30))
            .send()
            .await
            .with_context(|| format!("Failed to fetch URL: {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "HTTP request failed with status: {}",
                response.status()
            ));
        }

        let colleges: Vec<InstitutionRecord> = response
            .json()
            .await
            .with_context(|| format!("Failed to decode dataset from: {}", url))?;

        Ok(colleges)
    }

    pub async fn load(&self, config: &Config) -> Result<Vec<InstitutionRecord>> {
        let data_file = config.data_file.as_deref().unwrap_or("Colleges.json");

        match config.data_source_mode {
            DataSourceMode::Local => {
                println!("📂 Reading college data from: {}", data_file);
                self.load_file(data_file)
            }
            DataSourceMode::Internet => {
                let url = config
                    .dataset_url
                    .as_deref()
                    .context("data_source_mode is \"internet\" but dataset_url is not set")?;
                self.load_url(url).await
            }
            DataSourceMode::Both => {
                // Local copy first, one-shot download as fallback
                println!("📂 Reading college data from: {}", data_file);
                match self.load_file(data_file) {
                    Ok(colleges) => Ok(colleges),
                    Err(e) => {
                        println!("⚠️  Local dataset unavailable ({}), falling back to download", e);
                        let url = config
                            .dataset_url
                            .as_deref()
                            .context("local dataset failed and dataset_url is not set")?;
                        self.load_url(url).await
                    }
                }
            }
        }
    }
}
