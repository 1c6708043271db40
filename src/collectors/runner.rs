use std::collections::HashSet;

use sqlx::postgres::PgConnectOptions;

use crate::collectors::normalize::normalize;
use crate::collectors::{EmployerDirectory, resolve_employer};
use crate::db;
use crate::error::Result;
use crate::models::employer::EmployerVacancies;
use crate::repository::Repository;

/// Fetch and normalize every employer named in `keywords`, one after another.
/// Stops at the first failure.
pub async fn collect(
    directory: &dyn EmployerDirectory,
    keywords: &[String],
) -> Result<Vec<EmployerVacancies>> {
    let mut seen = HashSet::new();
    let mut collected = Vec::with_capacity(keywords.len());

    for keyword in keywords {
        let candidates = directory.search_employers(keyword).await?;
        let (profile, raw_vacancies) = resolve_employer(directory, keyword, &candidates).await?;
        let (employer, vacancies) = normalize(profile, raw_vacancies);

        if !seen.insert(employer.id) {
            tracing::warn!(
                "'{keyword}' resolved to employer {} ({}) already collected, skipping",
                employer.id,
                employer.name
            );
            continue;
        }

        tracing::info!(
            "'{keyword}' -> {} ({}): {} vacancies",
            employer.name,
            employer.id,
            vacancies.len()
        );
        collected.push(EmployerVacancies {
            employer,
            vacancies,
        });
    }

    Ok(collected)
}

/// Full reload: collect from the directory, rebuild the database, store
/// everything. The fetch runs first so a failing API leaves the old data
/// in place.
pub async fn sync(
    directory: &dyn EmployerDirectory,
    keywords: &[String],
    server: &PgConnectOptions,
    db_name: &str,
) -> Result<Repository> {
    tracing::info!("Collecting {} employers", keywords.len());
    let collected = collect(directory, keywords).await?;

    db::recreate_schema(server, db_name).await?;
    let repository = Repository::new(server, db_name);
    repository.save(&collected).await?;

    tracing::info!("Sync into '{}' complete", repository.database());
    Ok(repository)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::collectors::testing::{InMemoryDirectory, profile};
    use crate::error::AppError;

    fn keywords(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn collects_in_keyword_order() {
        let directory = InMemoryDirectory::default()
            .with_employer(
                "Яндекс",
                profile("1740", "Яндекс"),
                json!([
                    { "id": "1", "name": "Go developer", "alternate_url": "u1" },
                    { "id": "2", "name": "Designer", "alternate_url": "u2" },
                ]),
            )
            .with_employer("OCS", profile("5", "OCS"), json!([]));

        let collected = collect(&directory, &keywords(&["OCS", "Яндекс"]))
            .await
            .unwrap();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].employer.name, "OCS");
        assert!(collected[0].vacancies.is_empty());
        assert_eq!(collected[1].employer.id, 1740);
        assert_eq!(collected[1].vacancies.len(), 2);
        assert!(collected[1].vacancies.iter().all(|v| v.employer_id == 1740));
    }

    #[tokio::test]
    async fn same_employer_from_two_keywords_is_kept_once() {
        let directory = InMemoryDirectory::default()
            .with_employer("Сбер", profile("3529", "СБЕР"), json!([]))
            .with_employer("сбер", profile("3529", "СБЕР"), json!([]));

        let collected = collect(&directory, &keywords(&["Сбер", "сбер"]))
            .await
            .unwrap();
        assert_eq!(collected.len(), 1);
    }

    #[tokio::test]
    async fn unknown_employer_stops_collection() {
        let directory =
            InMemoryDirectory::default().with_employer("OCS", profile("5", "OCS"), json!([]));

        let err = collect(&directory, &keywords(&["OCS", "Nobody"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
