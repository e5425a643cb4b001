use crate::domain::model::{TownId, VacancyPage, VacancyQuery};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TownResolver: Send + Sync {
    /// Returns the first town the source matches for `town`.
    async fn resolve_town(&self, town: &str) -> Result<TownId>;
}

#[async_trait]
pub trait VacancySource: TownResolver {
    /// Human readable board name, used in report titles.
    fn name(&self) -> &str;

    async fn fetch_page(&self, query: &VacancyQuery, page: u32) -> Result<VacancyPage>;
}
