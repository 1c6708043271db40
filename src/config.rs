use std::time::Duration;

use clap::Parser;

/// Employers loaded when no list is configured.
pub const DEFAULT_EMPLOYERS: [&str; 10] = [
    "Ростелеком",
    "Сбер",
    "Касперский",
    "Ростех",
    "Айтеко",
    "1С",
    "OCS",
    "МОНТ",
    "Яндекс",
    "Газпром",
];

#[derive(Parser, Debug, Clone)]
#[command(name = "hh-vacancies", about = "HeadHunter vacancies loader and reports")]
pub struct Config {
    /// PostgreSQL server URL; the database part is replaced by --db-name
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Database that holds the employers and vacancies tables
    #[arg(long, env = "DB_NAME", default_value = "hh_vacancies")]
    pub db_name: String,

    #[command(flatten)]
    pub api: ApiConfig,

    /// Employer names to search for, comma separated
    #[arg(
        long,
        env = "HH_EMPLOYERS",
        value_delimiter = ',',
        default_values_t = DEFAULT_EMPLOYERS.map(String::from)
    )]
    pub employers: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ApiConfig {
    /// HeadHunter API base URL
    #[arg(long = "api-base-url", env = "HH_API_URL", default_value = "https://api.hh.ru")]
    pub base_url: String,

    /// Region code searches are restricted to (113 is Russia)
    #[arg(long, env = "HH_AREA", default_value = "113")]
    pub area: u32,

    /// User-Agent sent with every request; the API rejects anonymous clients
    #[arg(long, env = "HH_USER_AGENT", default_value = "hh-vacancies/0.1 (hh-vacancies@localhost)")]
    pub user_agent: String,

    /// Request timeout in seconds; requests block indefinitely when unset
    #[arg(long, env = "HH_REQUEST_TIMEOUT")]
    pub request_timeout: Option<u64>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout.map(Duration::from_secs)
    }
}

#[derive(clap::Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reload the database, then open the report menu (default)
    Run,
    /// Reload the database and exit
    Sync,
    /// Open the report menu over an already loaded database
    Menu,
}

impl Config {
    /// Resolve the command, defaulting to Run if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_database_url_given() {
        let config =
            Config::try_parse_from(["hh-vacancies", "--database-url", "postgres://localhost"])
                .unwrap();
        assert_eq!(config.db_name, "hh_vacancies");
        assert_eq!(config.api.area, 113);
        assert_eq!(config.api.base_url, "https://api.hh.ru");
        assert!(config.api.timeout().is_none());
        assert_eq!(config.employers.len(), DEFAULT_EMPLOYERS.len());
        assert_eq!(config.resolved_command(), Command::Run);
    }

    #[test]
    fn employers_split_on_commas() {
        let config = Config::try_parse_from([
            "hh-vacancies",
            "--database-url",
            "postgres://localhost",
            "--employers",
            "Яндекс,OCS",
            "--request-timeout",
            "15",
            "sync",
        ])
        .unwrap();
        assert_eq!(config.employers, vec!["Яндекс", "OCS"]);
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.resolved_command(), Command::Sync);
    }
}
