use crate::domain::model::LanguageStatistic;

/// Folds normalized salaries of one language into a [`LanguageStatistic`].
#[derive(Debug, Default, Clone)]
pub struct SalaryAggregator {
    found: u64,
    processed: u64,
    total: f64,
}

impl SalaryAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Found count as reported by the source; the latest page wins.
    pub fn record_found(&mut self, found: u64) {
        self.found = found;
    }

    pub fn push(&mut self, salary: Option<f64>) {
        if let Some(salary) = salary {
            self.processed += 1;
            self.total += salary;
        }
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// `None` when no salary could be normalized.
    pub fn finish(self) -> Option<LanguageStatistic> {
        if self.processed == 0 {
            return None;
        }
        let average = (self.total / self.processed as f64).floor() as u64;
        Some(LanguageStatistic {
            vacancies_found: self.found,
            vacancies_processed: self.processed,
            average_salary: average,
        })
    }
}

impl Extend<Option<f64>> for SalaryAggregator {
    fn extend<I: IntoIterator<Item = Option<f64>>>(&mut self, iter: I) {
        for salary in iter {
            self.push(salary);
        }
    }
}
