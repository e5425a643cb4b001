//! HeadHunter (api.hh.ru): the general job board.
//!
//! Towns are looked up through `suggests/area_leaves`, vacancies through
//! `vacancies`, which reports the total number of pages with every page.

use crate::adapters::http::{endpoint, get_json};
use crate::domain::model::{PageInfo, SalaryFields, TownId, VacancyPage, VacancyQuery};
use crate::domain::ports::{TownResolver, VacancySource};
use crate::utils::error::{Result, StatsError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://api.hh.ru";
pub const NAME: &str = "HeadHunter";

#[derive(Debug, Deserialize)]
struct AreaSuggestions {
    items: Vec<AreaSuggestion>,
}

#[derive(Debug, Deserialize)]
struct AreaSuggestion {
    id: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct VacanciesResponse {
    items: Vec<HhVacancy>,
    found: u64,
    pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct HhVacancy {
    salary: Option<HhSalary>,
}

#[derive(Debug, Deserialize)]
struct HhSalary {
    from: Option<u64>,
    to: Option<u64>,
    currency: Option<String>,
}

impl From<HhVacancy> for SalaryFields {
    fn from(vacancy: HhVacancy) -> Self {
        match vacancy.salary {
            Some(salary) => SalaryFields::new(salary.from, salary.to, salary.currency.as_deref()),
            None => SalaryFields::new(None, None, None),
        }
    }
}

pub struct HeadHunter {
    client: Client,
    endpoint: String,
}

impl HeadHunter {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl TownResolver for HeadHunter {
    async fn resolve_town(&self, town: &str) -> Result<TownId> {
        let request = self
            .client
            .get(endpoint(&self.endpoint, "suggests/area_leaves"))
            .query(&[("text", town)]);
        let suggestions: AreaSuggestions = get_json(request).await?;

        let first = suggestions
            .items
            .into_iter()
            .next()
            .ok_or_else(|| StatsError::TownNotFound {
                source_name: NAME.to_string(),
                town: town.to_string(),
            })?;
        tracing::debug!("{} matched '{}' to area '{}'", NAME, town, first.text);

        first
            .id
            .parse()
            .map(TownId)
            .map_err(|_| StatsError::UnexpectedResponse {
                source_name: NAME.to_string(),
                message: format!("area id '{}' is not numeric", first.id),
            })
    }
}

#[async_trait]
impl VacancySource for HeadHunter {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch_page(&self, query: &VacancyQuery, page: u32) -> Result<VacancyPage> {
        let request = self
            .client
            .get(endpoint(&self.endpoint, "vacancies"))
            .query(&[
                ("area", query.town.to_string()),
                ("period", query.period.to_string()),
                ("per_page", query.per_page.to_string()),
                ("text", query.keyword.clone()),
                ("page", page.to_string()),
            ]);
        let response: VacanciesResponse = get_json(request).await?;

        Ok(VacancyPage {
            vacancies: response.items.into_iter().map(SalaryFields::from).collect(),
            found: response.found,
            info: PageInfo::Total {
                pages: response.pages,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::build_client;
    use crate::core::pagination::VacancyPages;
    use crate::domain::model::Currency;
    use httpmock::prelude::*;
    use serde_json::json;

    fn query() -> VacancyQuery {
        VacancyQuery {
            town: TownId(1),
            period: 30,
            per_page: 100,
            keyword: "Python".to_string(),
        }
    }

    #[test]
    fn test_vacancy_without_salary() {
        let vacancy: HhVacancy = serde_json::from_value(json!({"salary": null})).unwrap();
        let fields = SalaryFields::from(vacancy);
        assert_eq!(fields, SalaryFields::new(None, None, None));
    }

    #[test]
    fn test_vacancy_salary_adapter() {
        let vacancy: HhVacancy = serde_json::from_value(json!({
            "id": "93311",
            "salary": {"from": 120000, "to": null, "currency": "RUR", "gross": false}
        }))
        .unwrap();
        let fields = SalaryFields::from(vacancy);
        assert_eq!(fields.from, Some(120_000));
        assert_eq!(fields.to, None);
        assert_eq!(fields.currency, Some(Currency::Rub));
    }

    #[tokio::test]
    async fn test_resolve_town_takes_first_item() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/suggests/area_leaves")
                    .query_param("text", "Москва");
                then.status(200).json_body(json!({
                    "items": [
                        {"id": "1", "text": "Москва"},
                        {"id": "2019", "text": "Московская область"}
                    ]
                }));
            })
            .await;

        let hh = HeadHunter::new(build_client().unwrap(), server.base_url());
        let town = hh.resolve_town("Москва").await.unwrap();

        mock.assert_async().await;
        assert_eq!(town, TownId(1));
    }

    #[tokio::test]
    async fn test_resolve_town_without_match() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/suggests/area_leaves");
                then.status(200).json_body(json!({"items": []}));
            })
            .await;

        let hh = HeadHunter::new(build_client().unwrap(), server.base_url());
        let err = hh.resolve_town("Nowhere").await.unwrap_err();
        assert!(matches!(err, StatsError::TownNotFound { ref town, .. } if town == "Nowhere"));
    }

    #[tokio::test]
    async fn test_pages_are_requested_up_to_reported_total() {
        let server = MockServer::start_async().await;
        let mut mocks = Vec::new();
        for page in 0..3u64 {
            let mock = server
                .mock_async(|when, then| {
                    when.method(GET)
                        .path("/vacancies")
                        .query_param("area", "1")
                        .query_param("period", "30")
                        .query_param("per_page", "100")
                        .query_param("text", "Python")
                        .query_param("page", page.to_string());
                    then.status(200).json_body(json!({
                        "items": [{"salary": {"from": 100 * (page + 1), "to": null, "currency": "RUR"}}],
                        "found": 3,
                        "pages": 3,
                        "page": page,
                        "per_page": 100
                    }));
                })
                .await;
            mocks.push(mock);
        }

        let hh = HeadHunter::new(build_client().unwrap(), server.base_url());
        let mut pages = VacancyPages::new(&hh, query());
        let mut lower_bounds = Vec::new();
        while let Some(page) = pages.next_page().await.unwrap() {
            assert_eq!(page.found, 3);
            lower_bounds.extend(page.vacancies.iter().filter_map(|v| v.from));
        }

        for mock in &mocks {
            mock.assert_hits_async(1).await;
        }
        assert_eq!(pages.requests(), 3);
        assert_eq!(lower_bounds, vec![100, 200, 300]);
    }

    #[tokio::test]
    async fn test_server_error_becomes_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/vacancies");
                then.status(400)
                    .json_body(json!({"errors": [{"type": "bad_argument", "value": "area"}]}));
            })
            .await;

        let hh = HeadHunter::new(build_client().unwrap(), server.base_url());
        let err = hh.fetch_page(&query(), 0).await.unwrap_err();
        match err {
            StatsError::HttpError { status, body, .. } => {
                assert_eq!(status, 400);
                assert!(body.contains("bad_argument"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
