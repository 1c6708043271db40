use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::collectors::{EmployerDirectory, EmployerProfile, EmployerSummary, Page, RawVacancy};
use crate::config::ApiConfig;
use crate::error::{AppError, Result};

const PAGE: u32 = 0;
const PAGE_SIZE: u32 = 100;

/// Client for the public HeadHunter API.
pub struct HeadHunter {
    client: reqwest::Client,
    base_url: String,
    area: u32,
}

impl HeadHunter {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            area: config.area,
        })
    }

    fn employers_url(&self) -> String {
        format!("{}/employers", self.base_url)
    }

    /// Query of the employer search: one region, employers with openings, first page.
    fn search_params(&self, keyword: &str) -> Vec<(&'static str, String)> {
        vec![
            ("text", keyword.to_string()),
            ("area", self.area.to_string()),
            ("only_with_vacancies", "true".to_string()),
            ("page", PAGE.to_string()),
            ("per_page", PAGE_SIZE.to_string()),
        ]
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = request
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("HeadHunter request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::Transport(format!(
                "HeadHunter returned {} for {}",
                resp.status(),
                resp.url()
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to parse response: {e}")))
    }
}

#[async_trait]
impl EmployerDirectory for HeadHunter {
    async fn search_employers(&self, keyword: &str) -> Result<Vec<EmployerSummary>> {
        tracing::debug!(keyword, "Searching employers");
        let request = self
            .client
            .get(self.employers_url())
            .query(&self.search_params(keyword));
        let page: Page<EmployerSummary> = self.get_json(request).await?;
        Ok(page.items)
    }

    async fn fetch_profile(&self, employer: &EmployerSummary) -> Result<EmployerProfile> {
        tracing::debug!(url = %employer.url, "Fetching employer profile");
        self.get_json(self.client.get(&employer.url)).await
    }

    async fn fetch_vacancies(&self, employer: &EmployerSummary) -> Result<Vec<RawVacancy>> {
        tracing::debug!(url = %employer.vacancies_url, "Fetching vacancies");
        let request = self
            .client
            .get(&employer.vacancies_url)
            .query(&[("page", PAGE), ("per_page", PAGE_SIZE)]);
        let page: Page<RawVacancy> = self.get_json(request).await?;
        Ok(page.items)
    }
}
