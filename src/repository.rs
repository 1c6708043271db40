use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};

use crate::db;
use crate::error::Result;
use crate::models::employer::{Employer, EmployerVacancies};
use crate::models::report::{AverageSalary, CompanyVacancyCount, VacancyListing};
use crate::models::vacancy::Vacancy;

/// Writes synced employers and answers the report queries.
///
/// Holds connection settings only. Every operation opens its own connection
/// and closes it before returning.
#[derive(Debug, Clone)]
pub struct Repository {
    server: PgConnectOptions,
    database: String,
}

impl Repository {
    pub fn new(server: &PgConnectOptions, database: &str) -> Self {
        Self {
            server: server.clone(),
            database: database.to_string(),
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    async fn connect(&self) -> Result<PgConnection> {
        db::connect(&self.server, &self.database).await
    }

    /// Insert every employer followed by its vacancies in one transaction.
    /// Nothing is stored if any row fails.
    #[tracing::instrument(skip_all, fields(employers = employers.len()))]
    pub async fn save(&self, employers: &[EmployerVacancies]) -> Result<()> {
        let mut conn = self.connect().await?;
        let mut tx = conn.begin().await?;

        let mut vacancy_rows = 0;
        for entry in employers {
            Employer::insert(&mut tx, &entry.employer).await?;
            for vacancy in &entry.vacancies {
                Vacancy::insert(&mut tx, vacancy).await?;
            }
            vacancy_rows += entry.vacancies.len();
        }

        tx.commit().await?;
        conn.close().await?;
        tracing::info!(
            "Saved {} employers and {vacancy_rows} vacancies",
            employers.len()
        );
        Ok(())
    }

    pub async fn companies_with_vacancy_counts(&self) -> Result<Vec<CompanyVacancyCount>> {
        let mut conn = self.connect().await?;
        let rows = CompanyVacancyCount::list(&mut conn).await?;
        conn.close().await?;
        Ok(rows)
    }

    pub async fn all_vacancies(&self) -> Result<Vec<VacancyListing>> {
        let mut conn = self.connect().await?;
        let rows = VacancyListing::list(&mut conn).await?;
        conn.close().await?;
        Ok(rows)
    }

    pub async fn average_salary(&self) -> Result<AverageSalary> {
        let mut conn = self.connect().await?;
        let avg = AverageSalary::compute(&mut conn).await?;
        conn.close().await?;
        Ok(avg)
    }

    pub async fn above_average_salary_vacancies(&self) -> Result<Vec<String>> {
        let mut conn = self.connect().await?;
        let names = Vacancy::above_average_salary(&mut conn).await?;
        conn.close().await?;
        Ok(names)
    }

    pub async fn vacancies_matching(&self, keyword: &str) -> Result<Vec<Vacancy>> {
        let mut conn = self.connect().await?;
        let vacancies = Vacancy::matching(&mut conn, keyword).await?;
        conn.close().await?;
        Ok(vacancies)
    }
}
