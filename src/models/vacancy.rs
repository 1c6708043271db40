use sqlx::PgConnection;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Vacancy {
    #[sqlx(rename = "vacancy_id")]
    pub id: i32,
    #[sqlx(rename = "vacancy_name")]
    pub name: String,
    pub city: Option<String>,
    pub salary_from: Option<i32>,
    pub salary_to: Option<i32>,
    pub salary_currency: Option<String>,
    pub requirements: Option<String>,
    pub url: String,
    pub employer_id: i32,
}

impl Vacancy {
    pub async fn insert(conn: &mut PgConnection, vacancy: &Vacancy) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO vacancies (vacancy_id, vacancy_name, city, salary_from, salary_to, salary_currency, requirements, url, employer_id) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(vacancy.id)
        .bind(&vacancy.name)
        .bind(&vacancy.city)
        .bind(vacancy.salary_from)
        .bind(vacancy.salary_to)
        .bind(&vacancy.salary_currency)
        .bind(&vacancy.requirements)
        .bind(&vacancy.url)
        .bind(vacancy.employer_id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Vacancies whose name contains `keyword` literally, case-sensitive.
    pub async fn matching(conn: &mut PgConnection, keyword: &str) -> Result<Vec<Vacancy>, AppError> {
        let vacancies = sqlx::query_as::<_, Vacancy>(
            "SELECT * FROM vacancies WHERE vacancy_name LIKE '%' || $1 || '%' ESCAPE '\\' ORDER BY vacancy_id",
        )
        .bind(escape_like(keyword))
        .fetch_all(&mut *conn)
        .await?;
        Ok(vacancies)
    }

    /// Names of vacancies whose both bounds are strictly above the column averages.
    pub async fn above_average_salary(conn: &mut PgConnection) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT vacancy_name FROM vacancies
             WHERE salary_from > (SELECT AVG(salary_from) FROM vacancies)
               AND salary_to > (SELECT AVG(salary_to) FROM vacancies)
             ORDER BY vacancy_id",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}

/// Escape LIKE metacharacters so the keyword only ever matches itself.
pub fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
