use sqlx::PgConnection;

use crate::error::AppError;
use crate::models::vacancy::Vacancy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employer {
    pub id: i32,
    pub name: String,
    pub open_vacancies: i32,
    pub url: String,
    pub site_url: Option<String>,
}

/// One employer together with the postings fetched for it, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployerVacancies {
    pub employer: Employer,
    pub vacancies: Vec<Vacancy>,
}

impl Employer {
    pub async fn insert(conn: &mut PgConnection, employer: &Employer) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO employers (employer_id, employer_name, open_vacancies, url, site_url) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(employer.id)
        .bind(&employer.name)
        .bind(employer.open_vacancies)
        .bind(&employer.url)
        .bind(&employer.site_url)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
