use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::Credentials;
use crate::error::{CiStatsError, Result};

pub(super) const MAX_PER_PAGE: usize = 100;

const API_VERSION: &str = "2022-11-28";

/// Thin authenticated wrapper around the GitHub REST API.
///
/// Requests are issued one at a time; there is no retry or rate-limit handling.
pub struct GitHubClient {
    client: Client,
    api_url: Url,
    credentials: Credentials,
}

impl GitHubClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static(API_VERSION),
        );

        let client = Client::builder()
            .user_agent(concat!("ci-stats/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| CiStatsError::Config(format!("Failed to create HTTP client: {e}")))?;

        // Keep any path prefix (GitHub Enterprise serves the API under /api/v3)
        let mut api_url = Url::parse(base_url)?;
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        Ok(Self {
            client,
            api_url,
            credentials,
        })
    }

    /// Resolves an API path such as `repos/owner/name/commits` against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.api_url.join(path.trim_start_matches('/'))?)
    }

    /// Sends an authenticated GET and decodes the JSON body.
    ///
    /// Non-success responses become [`CiStatsError::ApiError`] carrying the
    /// status code and response text.
    pub async fn get_json<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!("GET {url}");

        let response = self
            .credentials
            .authorize(self.client.get(url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(CiStatsError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Walks a paginated listing with `per_page`/`page` query parameters.
    ///
    /// # Arguments
    ///
    /// * `path` - API path relative to the base URL
    /// * `query` - Extra query parameters sent with every page
    /// * `limit` - Stop once this many items are collected; `None` reads every page
    /// * `extract` - Pulls the item list out of one decoded page
    ///
    /// # Returns
    ///
    /// Items in listing order, truncated to `limit` when one is given.
    pub async fn get_pages<R, T, F>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        limit: Option<usize>,
        extract: F,
    ) -> Result<Vec<T>>
    where
        R: DeserializeOwned,
        F: Fn(R) -> Vec<T>,
    {
        let per_page = limit.map_or(MAX_PER_PAGE, |limit| limit.clamp(1, MAX_PER_PAGE));
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            if limit.is_some_and(|limit| items.len() >= limit) {
                break;
            }

            let mut url = self.endpoint(path)?;
            {
                let mut pairs = url.query_pairs_mut();
                for (key, value) in query {
                    pairs.append_pair(key, value);
                }
                pairs.append_pair("per_page", &per_page.to_string());
                pairs.append_pair("page", &page.to_string());
            }

            let batch = extract(self.get_json::<R>(url).await?);
            let batch_len = batch.len();
            items.extend(batch);

            if batch_len < per_page {
                break;
            }

            page += 1;
        }

        if let Some(limit) = limit {
            items.truncate(limit);
        }

        Ok(items)
    }
}
