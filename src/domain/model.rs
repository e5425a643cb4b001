use serde::{Deserialize, Serialize};
use std::fmt;

/// Source-specific numeric identifier of a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownId(pub u64);

impl fmt::Display for TownId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Rub,
    Other(String),
}

impl Currency {
    /// HeadHunter says `RUR`, SuperJob says `rub`.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_ascii_uppercase();
        match code.as_str() {
            "RUR" | "RUB" => Currency::Rub,
            _ => Currency::Other(code),
        }
    }
}

/// Salary data of one vacancy, already adapted from the source's own schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryFields {
    pub from: Option<u64>,
    pub to: Option<u64>,
    pub currency: Option<Currency>,
}

impl SalaryFields {
    /// Zero bounds mean "not specified" on both boards.
    pub fn new(from: Option<u64>, to: Option<u64>, currency: Option<&str>) -> Self {
        Self {
            from: from.filter(|v| *v > 0),
            to: to.filter(|v| *v > 0),
            currency: currency.map(Currency::from_code),
        }
    }
}

/// Pagination metadata returned with a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageInfo {
    /// The source reports the total number of pages up front.
    Total { pages: u32 },
    /// The source only says whether another page exists.
    More(bool),
}

impl PageInfo {
    pub fn has_next(&self, current_page: u32) -> bool {
        match self {
            PageInfo::Total { pages } => current_page + 1 < *pages,
            PageInfo::More(more) => *more,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VacancyPage {
    pub vacancies: Vec<SalaryFields>,
    pub found: u64,
    pub info: PageInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyQuery {
    pub town: TownId,
    pub period: u32,
    pub per_page: u32,
    pub keyword: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStatistic {
    pub vacancies_found: u64,
    pub vacancies_processed: u64,
    pub average_salary: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRow {
    pub language: String,
    #[serde(flatten)]
    pub statistic: LanguageStatistic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub title: String,
    pub rows: Vec<LanguageRow>,
}

impl StatisticsReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, language: impl Into<String>, statistic: LanguageStatistic) {
        self.rows.push(LanguageRow {
            language: language.into(),
            statistic,
        });
    }

    pub fn get(&self, language: &str) -> Option<&LanguageStatistic> {
        self.rows
            .iter()
            .find(|row| row.language == language)
            .map(|row| &row.statistic)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
