//! Post search against the Twitter v1.1 standard search API.

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info};
use trends_config::TwitterSettings;

use crate::{PostSearch, SourceError, USER_AGENT, quoted_keywords, token_from_env};

/// Service name used in errors.
const SERVICE: &str = "Twitter";

/// Posts requested per search; the API maximum.
const PAGE_SIZE: &str = "100";

/// Search response envelope.
#[derive(Deserialize)]
struct SearchResponse {
    /// Matching posts.
    statuses: Vec<Status>,
}

/// One post. Extended mode fills `full_text`; compatibility mode fills `text`.
#[derive(Deserialize)]
struct Status {
    /// Untruncated text.
    full_text: Option<String>,
    /// Possibly truncated text.
    text: Option<String>,
}

/// Parses a `search/tweets.json` response body into post texts.
pub fn parse_tweets(body: &str) -> Result<Vec<String>, SourceError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Malformed {
            context: "post search",
            reason: e.to_string(),
        })?;
    Ok(response
        .statuses
        .into_iter()
        .filter_map(|s| s.full_text.or(s.text))
        .collect())
}

/// Blocking Twitter search client using app-only bearer authentication.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    /// HTTP client.
    http: Client,
    /// API root without trailing slash.
    api_base: String,
    /// Bearer token.
    token: String,
}

impl TwitterClient {
    /// Creates a client for `api_base` with a bearer token.
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Result<Self, SourceError> {
        let api_base: String = api_base.into();
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Creates a client from settings. The token variable must be set.
    pub fn from_settings(settings: &TwitterSettings) -> Result<Self, SourceError> {
        let token = token_from_env(&settings.token_env).ok_or_else(|| SourceError::MissingToken {
            var: settings.token_env.clone(),
        })?;
        Self::new(settings.api_base.as_str(), token)
    }
}

impl PostSearch for TwitterClient {
    fn search(&self, keywords: &[String]) -> Result<Vec<String>, SourceError> {
        let url = format!("{}/1.1/search/tweets.json", self.api_base);
        let q = quoted_keywords(keywords);
        debug!(%url, %q, "searching posts");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[
                ("q", q.as_str()),
                ("count", PAGE_SIZE),
                ("tweet_mode", "extended"),
                ("lang", "en"),
            ])
            .send()?;
        if let Some(err) = SourceError::from_response(SERVICE, &response) {
            return Err(err);
        }
        let posts = parse_tweets(&response.text()?)?;
        info!(count = posts.len(), "fetched posts");
        Ok(posts)
    }
}
