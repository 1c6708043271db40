use std::str::FromStr;

use clap::Parser;
use sqlx::postgres::PgConnectOptions;
use tracing_subscriber::EnvFilter;

use hh_vacancies::collectors::headhunter::HeadHunter;
use hh_vacancies::collectors::runner;
use hh_vacancies::config::{Command, Config};
use hh_vacancies::menu;
use hh_vacancies::repository::Repository;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hh_vacancies=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    let server = PgConnectOptions::from_str(&config.database_url)?;
    let command = config.resolved_command();

    let repository = match command {
        Command::Run | Command::Sync => {
            let directory = HeadHunter::new(&config.api)?;
            runner::sync(&directory, &config.employers, &server, &config.db_name).await?
        }
        Command::Menu => Repository::new(&server, &config.db_name),
    };

    if command != Command::Sync {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        menu::run(&repository, stdin, &mut std::io::stdout()).await?;
    }

    Ok(())
}
