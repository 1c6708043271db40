use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};

use crate::error::{AppError, Result};

/// Database used to drop and create the target database.
const MAINTENANCE_DB: &str = "postgres";

const CREATE_TABLES: &str = "
CREATE TABLE employers (
    employer_id    int PRIMARY KEY,
    employer_name  varchar(255) NOT NULL,
    open_vacancies int,
    url            varchar(255),
    site_url       varchar(255)
);
CREATE TABLE vacancies (
    vacancy_id      int PRIMARY KEY,
    vacancy_name    varchar(255) NOT NULL,
    city            varchar(100),
    salary_from     int,
    salary_to       int,
    salary_currency char(3),
    requirements    text,
    url             varchar(255),
    employer_id     int NOT NULL REFERENCES employers (employer_id)
);
";

/// Open a single connection to `database` on the configured server.
pub async fn connect(server: &PgConnectOptions, database: &str) -> Result<PgConnection> {
    let options = server.clone().database(database);
    let conn = PgConnection::connect_with(&options).await?;
    Ok(conn)
}

/// Drop the database called `name` if present, create it again and lay out
/// the employers and vacancies tables. Everything stored there is lost.
#[tracing::instrument(skip(server))]
pub async fn recreate_schema(server: &PgConnectOptions, name: &str) -> Result<()> {
    let ident = quote_ident(name);

    let mut admin = connect(server, MAINTENANCE_DB)
        .await
        .map_err(|e| schema_error("connect to maintenance database", e))?;

    let terminated = sqlx::query(
        "SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = $1 AND pid <> pg_backend_pid()",
    )
    .bind(name)
    .execute(&mut admin)
    .await
    .map_err(|e| schema_error("terminate connections", e))?
    .rows_affected();
    if terminated > 0 {
        tracing::warn!("Terminated {terminated} open connections to '{name}'");
    }

    // DROP/CREATE DATABASE refuse to run inside a transaction block.
    let drop_sql = format!("DROP DATABASE IF EXISTS {ident}");
    sqlx::raw_sql(&drop_sql)
        .execute(&mut admin)
        .await
        .map_err(|e| schema_error("drop database", e))?;
    let create_sql = format!("CREATE DATABASE {ident}");
    sqlx::raw_sql(&create_sql)
        .execute(&mut admin)
        .await
        .map_err(|e| schema_error("create database", e))?;
    admin
        .close()
        .await
        .map_err(|e| schema_error("close maintenance connection", e))?;

    let mut conn = connect(server, name)
        .await
        .map_err(|e| schema_error("connect to new database", e))?;
    let mut tx = conn
        .begin()
        .await
        .map_err(|e| schema_error("begin transaction", e))?;
    sqlx::raw_sql(CREATE_TABLES)
        .execute(&mut *tx)
        .await
        .map_err(|e| schema_error("create tables", e))?;
    tx.commit()
        .await
        .map_err(|e| schema_error("commit tables", e))?;
    conn.close()
        .await
        .map_err(|e| schema_error("close connection", e))?;

    tracing::info!("Database '{name}' recreated");
    Ok(())
}

fn schema_error(step: &str, err: impl std::fmt::Display) -> AppError {
    AppError::Schema(format!("{step}: {err}"))
}

/// Quote an identifier for statements that cannot take bind parameters.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
