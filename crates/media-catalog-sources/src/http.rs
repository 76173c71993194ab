use media_catalog_config::HttpConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

use crate::error::SourceError;

pub fn create_client(http: &HttpConfig) -> Client {
    Client::builder()
        .user_agent(http.user_agent.as_str())
        .timeout(Duration::from_secs(http.timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Join a base URL and an absolute path without doubling the slash
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Authenticated GET returning a decoded JSON body.
///
/// `api_key` is the (header name, value) pair the service expects.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
    api_key: Option<(&str, &str)>,
) -> Result<T, SourceError> {
    debug!(url, ?query, "GET");

    let mut request = client
        .get(url)
        .query(query)
        .header("Accept", "application/json");
    if let Some((header, key)) = api_key {
        request = request.header(header, key);
    }

    let response = request.send().await.map_err(|source| SourceError::Http {
        url: url.to_string(),
        source,
    })?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body: error_text,
        });
    }

    let body = response.text().await.map_err(|source| SourceError::Http {
        url: url.to_string(),
        source,
    })?;
    trace!(url, bytes = body.len(), "response body received");

    serde_json::from_str(&body).map_err(|source| SourceError::Decode {
        url: url.to_string(),
        source,
    })
}
