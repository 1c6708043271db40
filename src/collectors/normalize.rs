use crate::collectors::{EmployerProfile, RawSalary, RawVacancy};
use crate::models::employer::Employer;
use crate::models::vacancy::Vacancy;

/// Reshape API records into the stored employer and its vacancies.
pub fn normalize(
    profile: EmployerProfile,
    raw_vacancies: Vec<RawVacancy>,
) -> (Employer, Vec<Vacancy>) {
    let employer = Employer {
        id: profile.id,
        name: profile.name,
        open_vacancies: profile.open_vacancies,
        url: profile.alternate_url,
        site_url: profile.site_url.filter(|url| !url.is_empty()),
    };

    let vacancies = raw_vacancies
        .into_iter()
        .map(|raw| normalize_vacancy(raw, employer.id))
        .collect();

    (employer, vacancies)
}

fn normalize_vacancy(raw: RawVacancy, employer_id: i32) -> Vacancy {
    let (salary_from, salary_to, salary_currency) = salary_fields(raw.salary);
    Vacancy {
        id: raw.id,
        name: raw.name,
        city: raw.area.and_then(|a| a.name),
        salary_from,
        salary_to,
        salary_currency,
        requirements: raw.snippet.and_then(|s| s.requirement),
        url: raw.alternate_url,
        employer_id,
    }
}

/// Salary bounds and currency, all present or all absent.
///
/// A posting that discloses a single bound gets it on both sides. For
/// "from only" postings that stored upper bound is really a floor, which
/// drags the `salary_to` average reported by `average_salary` down towards
/// the lower bounds. Bounds without a currency are dropped.
fn salary_fields(salary: Option<RawSalary>) -> (Option<i32>, Option<i32>, Option<String>) {
    let Some(RawSalary {
        from,
        to,
        currency: Some(currency),
    }) = salary
    else {
        return (None, None, None);
    };

    match (from, to) {
        (Some(from), Some(to)) => (Some(from), Some(to), Some(currency)),
        (Some(bound), None) | (None, Some(bound)) => (Some(bound), Some(bound), Some(currency)),
        (None, None) => (None, None, None),
    }
}
