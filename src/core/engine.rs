use crate::core::aggregate::SalaryAggregator;
use crate::core::pagination::VacancyPages;
use crate::core::report::{render_all, OutputFormat};
use crate::core::salary::normalize;
use crate::domain::model::{Currency, LanguageStatistic, StatisticsReport, TownId, VacancyQuery};
use crate::domain::ports::VacancySource;
use crate::utils::error::{ErrorSeverity, Result, StatsError};

/// What to collect: the same for every source.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub town: String,
    pub period: u32,
    pub per_page: u32,
    pub languages: Vec<String>,
    pub target_currency: Currency,
}

/// A source that stopped early, with the error that stopped it.
#[derive(Debug)]
pub struct SourceFailure {
    pub source_name: String,
    pub error: StatsError,
}

/// Everything a run over several sources produced.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// Reports with at least one row, in source order.
    pub reports: Vec<StatisticsReport>,
    pub failures: Vec<SourceFailure>,
}

impl RunOutcome {
    pub fn worst_severity(&self) -> Option<ErrorSeverity> {
        self.failures.iter().map(|f| f.error.severity()).max()
    }

    /// 0 only when every source completed.
    pub fn exit_code(&self) -> i32 {
        self.worst_severity().map_or(0, ErrorSeverity::exit_code)
    }

    /// The combined output, or `None` when no source has anything to print.
    pub fn render(&self, format: OutputFormat) -> Result<Option<String>> {
        if self.reports.is_empty() {
            return Ok(None);
        }
        render_all(&self.reports, format).map(Some)
    }
}

pub struct StatisticsEngine {
    settings: SearchSettings,
}

impl StatisticsEngine {
    pub fn new(settings: SearchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Builds the report of one source, one language after another.
    pub async fn run(&self, source: &dyn VacancySource) -> Result<StatisticsReport> {
        let town = &self.settings.town;
        tracing::info!("Resolving town '{}' on {}", town, source.name());
        let town_id = source.resolve_town(town).await?;
        tracing::debug!("{} town id for '{}': {}", source.name(), town, town_id);

        let mut report = StatisticsReport::new(format!("{} {}", source.name(), town));
        for language in &self.settings.languages {
            match self.language_statistic(source, town_id, language).await? {
                Some(statistic) => {
                    tracing::info!(
                        "{}: {} found {}, processed {}, average {}",
                        source.name(),
                        language,
                        statistic.vacancies_found,
                        statistic.vacancies_processed,
                        statistic.average_salary
                    );
                    report.push(language.as_str(), statistic);
                }
                None => {
                    tracing::info!("{}: no usable salaries for {}", source.name(), language);
                }
            }
        }
        Ok(report)
    }

    /// Runs every source in order. A failing source is recorded and the next
    /// one still runs; a source without any statistic contributes no report.
    pub async fn run_sources(&self, sources: &[Box<dyn VacancySource>]) -> RunOutcome {
        let mut outcome = RunOutcome::default();
        for source in sources {
            match self.run(source.as_ref()).await {
                Ok(report) if report.is_empty() => {
                    tracing::info!(
                        "{} returned no usable salaries, skipping its table",
                        source.name()
                    );
                }
                Ok(report) => outcome.reports.push(report),
                Err(error) => {
                    tracing::debug!("{} stopped early: {}", source.name(), error);
                    outcome.failures.push(SourceFailure {
                        source_name: source.name().to_string(),
                        error,
                    });
                }
            }
        }
        outcome
    }

    pub async fn language_statistic(
        &self,
        source: &dyn VacancySource,
        town: TownId,
        language: &str,
    ) -> Result<Option<LanguageStatistic>> {
        let query = VacancyQuery {
            town,
            period: self.settings.period,
            per_page: self.settings.per_page,
            keyword: language.to_string(),
        };

        let mut pages = VacancyPages::new(source, query);
        let mut aggregator = SalaryAggregator::new();
        while let Some(page) = pages.next_page().await? {
            aggregator.record_found(page.found);
            aggregator.extend(
                page.vacancies
                    .iter()
                    .map(|vacancy| normalize(vacancy, &self.settings.target_currency)),
            );
        }
        tracing::debug!(
            "{}: {} pages fetched for {}, {} salaries normalized",
            source.name(),
            pages.requests(),
            language,
            aggregator.processed()
        );

        Ok(aggregator.finish())
    }
}
