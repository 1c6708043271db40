use std::fmt;

use sqlx::PgConnection;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CompanyVacancyCount {
    pub employer_name: String,
    pub vacancy_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VacancyListing {
    pub vacancy_name: String,
    pub salary_from: Option<i32>,
    pub salary_to: Option<i32>,
    pub salary_currency: Option<String>,
    pub url: String,
    pub employer_name: Option<String>,
}

/// Column-wide salary means; `None` when a column holds no values.
#[derive(Debug, Clone, Copy, PartialEq, sqlx::FromRow)]
pub struct AverageSalary {
    pub avg_from: Option<f64>,
    pub avg_to: Option<f64>,
}

impl CompanyVacancyCount {
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<CompanyVacancyCount>, AppError> {
        let rows = sqlx::query_as::<_, CompanyVacancyCount>(
            "SELECT employer_name, COUNT(vacancy_id) AS vacancy_count
             FROM employers JOIN vacancies USING (employer_id)
             GROUP BY employer_id, employer_name
             ORDER BY employer_name",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }
}

impl VacancyListing {
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<VacancyListing>, AppError> {
        let rows = sqlx::query_as::<_, VacancyListing>(
            "SELECT vacancy_name, salary_from, salary_to, salary_currency, vacancies.url, employer_name
             FROM vacancies LEFT JOIN employers USING (employer_id)
             ORDER BY vacancy_id",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }
}

impl AverageSalary {
    pub async fn compute(conn: &mut PgConnection) -> Result<AverageSalary, AppError> {
        let row = sqlx::query_as::<_, AverageSalary>(
            "SELECT AVG(salary_from)::float8 AS avg_from, AVG(salary_to)::float8 AS avg_to FROM vacancies",
        )
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }
}

impl fmt::Display for CompanyVacancyCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.employer_name, self.vacancy_count)
    }
}

impl fmt::Display for VacancyListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let employer = self.employer_name.as_deref().unwrap_or("-");
        write!(f, "{} | {} | ", self.vacancy_name, employer)?;
        match (self.salary_from, self.salary_to, &self.salary_currency) {
            (Some(from), Some(to), Some(currency)) if from == to => {
                write!(f, "{from} {currency}")?
            }
            (Some(from), Some(to), Some(currency)) => write!(f, "{from}-{to} {currency}")?,
            _ => write!(f, "salary not disclosed")?,
        }
        write!(f, " | {}", self.url)
    }
}

impl fmt::Display for AverageSalary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |value: Option<f64>| match value {
            Some(v) => format!("{v:.0}"),
            None => "n/a".to_string(),
        };
        write!(
            f,
            "average salary from: {}, average salary to: {}",
            show(self.avg_from),
            show(self.avg_to)
        )
    }
}
