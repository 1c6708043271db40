#![allow(dead_code)]

use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

use hh_vacancies::db;
use hh_vacancies::models::employer::{Employer, EmployerVacancies};
use hh_vacancies::models::vacancy::Vacancy;
use hh_vacancies::repository::Repository;

/// Server options from DATABASE_URL. Database tests are `#[ignore]`d and run
/// with `cargo test -- --ignored` once DATABASE_URL points at a server.
pub fn server() -> PgConnectOptions {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set to run the database tests");
    PgConnectOptions::from_str(&url).expect("valid DATABASE_URL")
}

/// A freshly recreated database for one test.
pub async fn fresh_repository(server: &PgConnectOptions, name: &str) -> Repository {
    db::recreate_schema(server, name).await.expect("recreate schema");
    Repository::new(server, name)
}

pub fn employer(id: i32, name: &str) -> Employer {
    Employer {
        id,
        name: name.to_string(),
        open_vacancies: 0,
        url: format!("https://hh.ru/employer/{id}"),
        site_url: None,
    }
}

pub fn vacancy(id: i32, name: &str, employer_id: i32, salary: Option<(i32, i32)>) -> Vacancy {
    Vacancy {
        id,
        name: name.to_string(),
        city: Some("Москва".to_string()),
        salary_from: salary.map(|(from, _)| from),
        salary_to: salary.map(|(_, to)| to),
        salary_currency: salary.map(|_| "RUR".to_string()),
        requirements: None,
        url: format!("https://hh.ru/vacancy/{id}"),
        employer_id,
    }
}

pub fn entry(employer: Employer, vacancies: Vec<Vacancy>) -> EmployerVacancies {
    EmployerVacancies {
        employer,
        vacancies,
    }
}
