// Collector module: fetches employers and their open vacancies from the
// HeadHunter API and reshapes them into the stored entities.

pub mod headhunter;
pub mod normalize;
pub mod runner;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::error::{AppError, Result};

/// The three directory calls the sync pipeline depends on.
#[async_trait]
pub trait EmployerDirectory: Send + Sync {
    /// Employers whose name loosely matches `keyword`, first page only.
    async fn search_employers(&self, keyword: &str) -> Result<Vec<EmployerSummary>>;

    async fn fetch_profile(&self, employer: &EmployerSummary) -> Result<EmployerProfile>;

    /// Open vacancies of `employer`, first page only.
    async fn fetch_vacancies(&self, employer: &EmployerSummary) -> Result<Vec<RawVacancy>>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployerSummary {
    pub name: String,
    /// Employer detail endpoint.
    pub url: String,
    pub vacancies_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployerProfile {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub open_vacancies: i32,
    pub alternate_url: String,
    pub site_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVacancy {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i32,
    pub name: String,
    pub area: Option<RawArea>,
    pub salary: Option<RawSalary>,
    pub snippet: Option<RawSnippet>,
    pub alternate_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawArea {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSalary {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSnippet {
    pub requirement: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    pub items: Vec<T>,
}

/// The API sends ids as digit strings; numbers are accepted too.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i32),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => text
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid id '{text}'"))),
    }
}

/// Pick the candidate whose name equals `keyword` ignoring case, or the first one.
///
/// The fallback can select the wrong organization when the search only
/// returns loose matches; callers rely on getting some employer back.
pub fn pick_candidate<'a>(
    keyword: &str,
    candidates: &'a [EmployerSummary],
) -> Option<&'a EmployerSummary> {
    let wanted = keyword.to_lowercase();
    candidates
        .iter()
        .find(|c| c.name.to_lowercase() == wanted)
        .or_else(|| {
            let first = candidates.first()?;
            tracing::warn!(
                keyword,
                chosen = %first.name,
                "No exact employer name match, falling back to first search result"
            );
            Some(first)
        })
}

/// Resolve a keyword to one employer and fetch its profile and open vacancies.
#[tracing::instrument(skip(directory, candidates), fields(candidates = candidates.len()))]
pub async fn resolve_employer(
    directory: &dyn EmployerDirectory,
    keyword: &str,
    candidates: &[EmployerSummary],
) -> Result<(EmployerProfile, Vec<RawVacancy>)> {
    let chosen = pick_candidate(keyword, candidates)
        .ok_or_else(|| AppError::NotFound(format!("No employer matches '{keyword}'")))?;

    let profile = directory.fetch_profile(chosen).await?;
    let vacancies = directory.fetch_vacancies(chosen).await?;
    tracing::debug!(
        employer_id = profile.id,
        vacancies = vacancies.len(),
        "Fetched employer"
    );
    Ok((profile, vacancies))
}
