use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when fetching from the upstream ATM API
#[derive(Debug, Error)]
pub enum NessieError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),
}

/// One page of the upstream ATM listing
#[derive(Debug, Deserialize)]
struct AtmPage {
    /// Raw records; kept as JSON values so one malformed record cannot
    /// fail the whole page
    #[serde(default)]
    data: Vec<Value>,
    #[serde(default)]
    paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
struct Paging {
    #[serde(default)]
    next: Option<String>,
}

/// Client for the upstream ATM listing API
///
/// The listing is paginated; each response carries a `paging.next` path
/// to append to the fixed base host for the following request.
pub struct NessieClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl NessieClient {
    /// Create a new upstream API client
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }

    /// Start a fresh pagination sequence over the full listing
    pub fn pages(&self) -> AtmPages<'_> {
        AtmPages {
            client: self,
            state: PageState::Start,
            stopped_early: false,
        }
    }

    fn initial_url(&self) -> String {
        format!(
            "{}/atms?key={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.api_key)
        )
    }

    fn follow_url(&self, next: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), next)
    }

    async fn fetch_page(&self, url: &str) -> Result<AtmPage, NessieError> {
        tracing::debug!("Fetching ATM page from: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(NessieError::ApiError(format!(
                "Failed to fetch ATM page: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

enum PageState {
    Start,
    Next(String),
    Done,
}

/// Lazy, non-restartable cursor over the upstream ATM pages
///
/// Pages are fetched strictly sequentially because each request depends
/// on the previous response's cursor. A fetch failure ends the sequence
/// instead of failing the run; `stopped_early` records that the listing
/// was cut short so callers can tell a partial run from a complete one.
pub struct AtmPages<'a> {
    client: &'a NessieClient,
    state: PageState,
    stopped_early: bool,
}

impl AtmPages<'_> {
    /// Fetch the next page of raw records
    ///
    /// Returns `None` once the listing is exhausted, a page comes back
    /// empty, or a fetch fails.
    pub async fn next_page(&mut self) -> Option<Vec<Value>> {
        let url = match &self.state {
            PageState::Start => self.client.initial_url(),
            PageState::Next(path) => self.client.follow_url(path),
            PageState::Done => return None,
        };

        let page = match self.client.fetch_page(&url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Stopping pagination after fetch failure: {}", e);
                self.state = PageState::Done;
                self.stopped_early = true;
                return None;
            }
        };

        if page.data.is_empty() {
            self.state = PageState::Done;
            return None;
        }

        // An absent or empty next link means the listing is exhausted
        self.state = match page.paging.and_then(|p| p.next).filter(|n| !n.is_empty()) {
            Some(next) => PageState::Next(next),
            None => PageState::Done,
        };

        Some(page.data)
    }

    /// Whether the sequence ended on a fetch failure rather than
    /// natural exhaustion
    pub fn stopped_early(&self) -> bool {
        self.stopped_early
    }
}
