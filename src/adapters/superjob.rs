//! SuperJob (api.superjob.ru): the recruiting board.
//!
//! Every request carries the application key. Vacancy pages only say whether
//! another page follows (`more`), never how many there are.

use crate::adapters::http::{endpoint, get_json};
use crate::domain::model::{PageInfo, SalaryFields, TownId, VacancyPage, VacancyQuery};
use crate::domain::ports::{TownResolver, VacancySource};
use crate::utils::error::{Result, StatsError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://api.superjob.ru/2.0";
pub const NAME: &str = "SuperJob";
pub const API_KEY_HEADER: &str = "X-Api-App-Id";

#[derive(Debug, Deserialize)]
struct TownsResponse {
    objects: Vec<SjTown>,
}

#[derive(Debug, Deserialize)]
struct SjTown {
    id: u64,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct VacanciesResponse {
    objects: Vec<SjVacancy>,
    total: u64,
    more: bool,
}

#[derive(Debug, Deserialize)]
pub struct SjVacancy {
    payment_from: Option<u64>,
    payment_to: Option<u64>,
    currency: Option<String>,
}

impl From<SjVacancy> for SalaryFields {
    fn from(vacancy: SjVacancy) -> Self {
        SalaryFields::new(
            vacancy.payment_from,
            vacancy.payment_to,
            vacancy.currency.as_deref(),
        )
    }
}

pub struct SuperJob {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl SuperJob {
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(endpoint(&self.endpoint, path))
            .header(API_KEY_HEADER, &self.api_key)
    }
}

#[async_trait]
impl TownResolver for SuperJob {
    async fn resolve_town(&self, town: &str) -> Result<TownId> {
        let request = self.get("towns/").query(&[("keyword", town)]);
        let towns: TownsResponse = get_json(request).await?;

        let first = towns
            .objects
            .into_iter()
            .next()
            .ok_or_else(|| StatsError::TownNotFound {
                source_name: NAME.to_string(),
                town: town.to_string(),
            })?;
        tracing::debug!("{} matched '{}' to town '{}'", NAME, town, first.title);
        Ok(TownId(first.id))
    }
}

#[async_trait]
impl VacancySource for SuperJob {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch_page(&self, query: &VacancyQuery, page: u32) -> Result<VacancyPage> {
        let request = self.get("vacancies/").query(&[
            ("town", query.town.to_string()),
            ("period", query.period.to_string()),
            ("count", query.per_page.to_string()),
            ("keyword", query.keyword.clone()),
            ("page", page.to_string()),
        ]);
        let response: VacanciesResponse = get_json(request).await?;

        Ok(VacancyPage {
            vacancies: response.objects.into_iter().map(SalaryFields::from).collect(),
            found: response.total,
            info: PageInfo::More(response.more),
        })
    }
}
