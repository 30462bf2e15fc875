/// HTTP client for the Board Game Atlas search endpoint.
use tracing::{debug, warn};
use url::Url;

use super::context::CallContext;
use super::errors::AtlasError;
use super::game::SearchResult;

/// Production search endpoint.
pub const SEARCH_URL: &str = "https://api.boardgameatlas.com/api/search";

const USER_AGENT: &str = concat!("boardgameatlas/", env!("CARGO_PKG_VERSION"));

/// Search client bound to one `client_id`.
///
/// Read-only after construction; cloning is cheap because `reqwest::Client`
/// is reference-counted internally.
#[derive(Debug, Clone)]
pub struct BoardgameAtlas {
    client_id: String,
    http: reqwest::Client,
    endpoint: Url,
}

impl BoardgameAtlas {
    /// Client for `endpoint` with a default transport.
    ///
    /// # Errors
    ///
    /// Returns `HttpClient` if the TLS backend cannot be initialised, or
    /// `InvalidRequest` if `endpoint` is not a valid absolute URL.
    pub fn with_endpoint(client_id: impl Into<String>, endpoint: &str) -> Result<Self, AtlasError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(AtlasError::HttpClient)?;
        Self::with_http_client(client_id, http, endpoint)
    }

    /// Client with an explicit transport and endpoint.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if `endpoint` is not a valid absolute URL.
    pub fn with_http_client(
        client_id: impl Into<String>,
        http: reqwest::Client,
        endpoint: &str,
    ) -> Result<Self, AtlasError> {
        Ok(Self {
            client_id: client_id.into(),
            http,
            endpoint: Url::parse(endpoint)?,
        })
    }

    /// Build the request URL: `name`, `limit`, `skip`, `client_id`, form-urlencoded.
    ///
    /// `limit` and `skip` are passed through verbatim; the API decides what
    /// to do with out-of-range values.
    #[must_use]
    pub fn search_url(&self, query: &str, limit: u64, skip: u64) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("name", query)
            .append_pair("limit", &limit.to_string())
            .append_pair("skip", &skip.to_string())
            .append_pair("client_id", &self.client_id);
        url
    }

    /// Search games by name. Issues exactly one GET, never retries.
    ///
    /// # Errors
    ///
    /// - `Cancelled` / `TimedOut` if `ctx` finishes before the body is read
    /// - `Transport` on connection or body read failure
    /// - `Status` for any status >= 400 (the error body is not read)
    /// - `Decode` if the body does not match [`SearchResult`]
    pub async fn search(
        &self,
        ctx: &CallContext,
        query: &str,
        limit: u64,
        skip: u64,
    ) -> Result<SearchResult, AtlasError> {
        ctx.check()?;

        let url = self.search_url(query, limit, skip);
        debug!(url = %redact_client_id(&url), "searching board games");

        let result = ctx.run(self.fetch(url)).await??;
        debug!(
            returned = result.games.len(),
            count = result.count,
            "search complete"
        );
        Ok(result)
    }

    async fn fetch(&self, url: Url) -> Result<SearchResult, AtlasError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(AtlasError::Transport)?;

        let status = response.status();
        if status.as_u16() >= 400 {
            warn!(%status, "search endpoint returned an error status");
            return Err(AtlasError::Status { status });
        }

        let body = response.bytes().await.map_err(AtlasError::Transport)?;
        debug!(bytes = body.len(), %status, "received search response");
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Copy of `url` with the `client_id` value masked, for logging.
fn redact_client_id(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "client_id" { "***".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}
