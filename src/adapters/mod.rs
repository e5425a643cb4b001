// Adapters layer: concrete implementations of the domain ports for the job boards.

pub mod headhunter;
pub mod http;
pub mod superjob;

pub use headhunter::HeadHunter;
pub use superjob::SuperJob;

use crate::config::AppConfig;
use crate::domain::ports::VacancySource;
use reqwest::Client;

/// Enabled boards in report order: SuperJob first, then HeadHunter.
pub fn build_sources(config: &AppConfig, client: &Client) -> Vec<Box<dyn VacancySource>> {
    let mut sources: Vec<Box<dyn VacancySource>> = Vec::new();
    if let Some(sj) = &config.superjob {
        sources.push(Box::new(SuperJob::new(
            client.clone(),
            sj.endpoint.clone(),
            sj.api_key.clone(),
        )));
    }
    if let Some(hh) = &config.headhunter {
        sources.push(Box::new(HeadHunter::new(client.clone(), hh.endpoint.clone())));
    }
    sources
}
