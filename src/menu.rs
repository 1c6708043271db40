use std::fmt::Display;
use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::repository::Repository;

const MENU: &str = "\
Choose a command:
1 - Companies and vacancy counts
2 - All vacancies
3 - Average salary
4 - Vacancies with above-average salary
5 - Search vacancies by keyword
6 - Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CompanyCounts,
    AllVacancies,
    AverageSalary,
    AboveAverage,
    Search,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<MenuChoice> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(MenuChoice::CompanyCounts),
            2 => Some(MenuChoice::AllVacancies),
            3 => Some(MenuChoice::AverageSalary),
            4 => Some(MenuChoice::AboveAverage),
            5 => Some(MenuChoice::Search),
            6 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Interactive report loop. Returns on `6` or end of input; unknown input and
/// failed reports are printed and the menu is shown again.
pub async fn run<R, W>(repository: &Repository, input: R, out: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        writeln!(out, "{MENU}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(choice) = MenuChoice::parse(&line) else {
            writeln!(out, "Unknown command '{}', try again", line.trim())?;
            continue;
        };

        let result = match choice {
            MenuChoice::Exit => break,
            MenuChoice::CompanyCounts => repository
                .companies_with_vacancy_counts()
                .await
                .map(|rows| print_rows(&mut *out, &rows)),
            MenuChoice::AllVacancies => repository
                .all_vacancies()
                .await
                .map(|rows| print_rows(&mut *out, &rows)),
            MenuChoice::AverageSalary => repository
                .average_salary()
                .await
                .map(|avg| print_rows(&mut *out, &[avg])),
            MenuChoice::AboveAverage => repository
                .above_average_salary_vacancies()
                .await
                .map(|names| print_rows(&mut *out, &names)),
            MenuChoice::Search => {
                writeln!(out, "Enter a keyword:")?;
                out.flush()?;
                let Some(keyword) = lines.next_line().await? else {
                    break;
                };
                repository
                    .vacancies_matching(keyword.trim())
                    .await
                    .map(|rows| {
                        let listing: Vec<String> = rows
                            .iter()
                            .map(|v| format!("{} | {} | {}", v.id, v.name, v.url))
                            .collect();
                        print_rows(&mut *out, &listing)
                    })
            }
        };

        match result {
            Ok(written) => written?,
            Err(e) => {
                tracing::error!("Report failed: {e}");
                writeln!(out, "Error: {e}")?;
            }
        }
    }

    Ok(())
}

fn print_rows<W: Write, T: Display>(out: &mut W, rows: &[T]) -> std::io::Result<()> {
    if rows.is_empty() {
        writeln!(out, "(no results)")?;
    }
    for row in rows {
        writeln!(out, "{row}")?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use sqlx::postgres::PgConnectOptions;

    use super::*;

    fn repository() -> Repository {
        let server = PgConnectOptions::from_str("postgres://localhost:5432/postgres").unwrap();
        Repository::new(&server, "hh_vacancies")
    }

    #[test]
    fn parses_menu_numbers() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::CompanyCounts));
        assert_eq!(MenuChoice::parse(" 5\n"), Some(MenuChoice::Search));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Exit));
    }

    #[test]
    fn rejects_other_input() {
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse("exit"), None);
        assert_eq!(MenuChoice::parse(""), None);
        assert_eq!(MenuChoice::parse("-1"), None);
    }

    #[tokio::test]
    async fn unknown_input_is_reported_and_loops() {
        let input: &[u8] = b"hello\n42\n6\n";
        let mut out = Vec::new();
        run(&repository(), input, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Unknown command 'hello'"));
        assert!(text.contains("Unknown command '42'"));
        assert_eq!(text.matches("6 - Exit").count(), 3);
    }

    #[tokio::test]
    async fn end_of_input_exits() {
        let input: &[u8] = b"";
        let mut out = Vec::new();
        run(&repository(), input, &mut out).await.unwrap();
        assert!(String::from_utf8(out).unwrap().contains("1 - Companies"));
    }

    #[test]
    fn empty_report_is_marked() {
        let mut out = Vec::new();
        print_rows::<_, String>(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(no results)\n\n");
    }
}
