//! CourtListener search client.
//!
//! A citation is looked up in two phases against the search endpoint: first as a
//! reporter citation (`cite=`), then as free text restricted to opinions
//! (`q=&type=o`). Any `count > 0` means the citation exists. A non-2xx reply is a
//! lookup failure, never "not found".

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::citation::Citation;

use super::CitationLookup;
use super::config::LookupConfig;
use super::error::{LookupError, LookupResult};
use super::types::LookupOutcome;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    count: u64,
    #[serde(default)]
    results: Vec<Value>,
}

/// HTTP client for a CourtListener-compatible search API.
#[derive(Debug, Clone)]
pub struct CourtListenerClient {
    http: HttpClient,
    search_url: String,
    token: Option<String>,
}

impl CourtListenerClient {
    pub fn new(config: &LookupConfig) -> LookupResult<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LookupError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            search_url: config.search_url.clone(),
            token: config.token.clone(),
        })
    }

    async fn search(&self, params: &[(&str, &str)]) -> LookupResult<SearchResponse> {
        let mut request = self.http.get(&self.search_url).query(params);
        if let Some(token) = &self.token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Token {token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl CitationLookup for CourtListenerClient {
    async fn lookup(&self, citation: &Citation) -> LookupResult<LookupOutcome> {
        let query = citation.as_str().trim();
        if query.is_empty() {
            return Err(LookupError::EmptyCitation);
        }

        let by_cite = self.search(&[("cite", query), ("format", "json")]).await?;
        if by_cite.count > 0 {
            debug!(citation = query, count = by_cite.count, "Found by reporter citation");
            return Ok(LookupOutcome::found(by_cite.results));
        }

        let by_text = self
            .search(&[("q", query), ("type", "o"), ("format", "json")])
            .await?;
        if by_text.count > 0 {
            debug!(citation = query, count = by_text.count, "Found by opinion search");
            return Ok(LookupOutcome::found(by_text.results));
        }

        debug!(citation = query, "No matching opinions");
        Ok(LookupOutcome::not_found())
    }

    fn name(&self) -> &'static str {
        "courtlistener"
    }
}
