use crate::utils::error::{Result, StatsError};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

pub const USER_AGENT: &str = concat!("salary-stats/", env!("CARGO_PKG_VERSION"));

/// Shared client for every board. HeadHunter refuses requests without a User-Agent.
pub fn build_client() -> Result<Client> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}

pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Sends the request and decodes a JSON body, turning non-2xx answers into
/// [`StatsError::HttpError`].
pub(crate) async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    let url = response.url().to_string();
    tracing::debug!("GET {} -> {}", url, status);

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Request to {} failed with {}, body: {}", url, status, body);
        return Err(StatsError::HttpError {
            status: status.as_u16(),
            url,
            body,
        });
    }

    Ok(response.json().await?)
}
