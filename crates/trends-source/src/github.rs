//! Repository search against the GitHub REST API.
//!
//! A search is one request to `/search/repositories` followed by one `/readme` request per
//! result. Credential failures on any request abort the search; every other README failure
//! only costs that repository its README text.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::{
    blocking::{Client, RequestBuilder},
    header::{ACCEPT, AUTHORIZATION},
};
use serde::Deserialize;
use tracing::{debug, info, warn};
use trends_config::GitHubSettings;

use crate::{RepositorySearch, SourceError, USER_AGENT, quoted_keywords, token_from_env};

/// Service name used in errors.
const SERVICE: &str = "GitHub";

/// Media type for REST API responses.
const MEDIA_TYPE: &str = "application/vnd.github+json";

/// Parameters of a repository search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryQuery {
    /// Phrases to match; any one is enough.
    pub keywords: Vec<String>,
    /// Only repositories with more stars than this.
    pub min_stars: u32,
    /// Only repositories with more forks than this.
    pub min_forks: u32,
    /// Maximum number of repositories to return.
    pub limit: usize,
}

impl RepositoryQuery {
    /// Renders the `q` parameter: quoted keywords OR-ed together, then the star and fork
    /// qualifiers.
    pub fn to_query_string(&self) -> String {
        format!(
            "{} stars:>{} forks:>{}",
            quoted_keywords(&self.keywords),
            self.min_stars,
            self.min_forks
        )
    }
}

/// One repository returned by a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryItem {
    /// Repository name.
    pub title: String,
    /// Browser URL.
    pub url: String,
    /// API URL, used to fetch the README.
    pub api_url: String,
    /// Description, if the repository has one.
    pub description: Option<String>,
    /// Fork count.
    pub forks: u64,
    /// Star count.
    pub stars: u64,
    /// Cleaned README text; empty when unavailable.
    pub readme: String,
}

impl RepositoryItem {
    /// Name, description and README joined with single spaces. A missing description is
    /// treated as empty.
    pub fn full_text(&self) -> String {
        [
            self.title.as_str(),
            self.description.as_deref().unwrap_or(""),
            self.readme.as_str(),
        ]
        .join(" ")
    }
}

/// Search response envelope.
#[derive(Deserialize)]
struct SearchResponse {
    /// Matching repositories.
    items: Vec<SearchItem>,
}

/// One search hit as returned by the API.
#[derive(Deserialize)]
struct SearchItem {
    /// Repository name.
    name: String,
    /// Browser URL.
    html_url: String,
    /// API URL.
    url: String,
    /// Optional description.
    description: Option<String>,
    /// Fork count.
    #[serde(default)]
    forks: u64,
    /// Star count.
    #[serde(default)]
    stargazers_count: u64,
}

impl From<SearchItem> for RepositoryItem {
    fn from(item: SearchItem) -> Self {
        Self {
            title: item.name,
            url: item.html_url,
            api_url: item.url,
            description: item.description,
            forks: item.forks,
            stars: item.stargazers_count,
            readme: String::new(),
        }
    }
}

/// README endpoint response.
#[derive(Deserialize)]
struct ReadmeResponse {
    /// Base64 file content, wrapped at arbitrary widths.
    content: String,
}

/// Parses a `/search/repositories` response body. README text is left empty.
pub fn parse_search_response(body: &str) -> Result<Vec<RepositoryItem>, SourceError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Malformed {
            context: "repository search",
            reason: e.to_string(),
        })?;
    Ok(response.items.into_iter().map(RepositoryItem::from).collect())
}

/// Decodes base64 README content, ignoring embedded whitespace. Invalid UTF-8 is replaced.
pub fn decode_readme(content: &str) -> Result<String, SourceError> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| SourceError::Malformed {
            context: "README",
            reason: e.to_string(),
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Strips everything except word characters, whitespace and `'.:/`, then turns newlines into
/// spaces.
pub fn clean_readme(text: &str) -> String {
    text.chars()
        .filter(|c| {
            c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '\'' | '.' | ':' | '/')
        })
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}

/// Blocking GitHub REST client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// HTTP client.
    http: Client,
    /// API root without trailing slash.
    api_base: String,
    /// Personal access token, if configured.
    token: Option<String>,
}

impl GitHubClient {
    /// Creates a client for `api_base`, authenticating with `token` when given.
    pub fn new(api_base: impl Into<String>, token: Option<String>) -> Result<Self, SourceError> {
        let api_base: String = api_base.into();
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Creates a client from settings, reading the token from the configured variable.
    ///
    /// A missing token is not an error; requests are then sent unauthenticated.
    pub fn from_settings(settings: &GitHubSettings) -> Result<Self, SourceError> {
        let token = token_from_env(&settings.token_env);
        if token.is_none() {
            debug!(var = %settings.token_env, "no GitHub token, searching unauthenticated");
        }
        Self::new(settings.api_base.as_str(), token)
    }

    /// Starts a GET request with the API headers.
    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.http.get(url).header(ACCEPT, MEDIA_TYPE);
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("token {token}")),
            None => request,
        }
    }

    /// Runs the search request alone, without READMEs.
    fn search_repositories(
        &self,
        query: &RepositoryQuery,
    ) -> Result<Vec<RepositoryItem>, SourceError> {
        let url = format!("{}/search/repositories", self.api_base);
        let q = query.to_query_string();
        let per_page = query.limit.to_string();
        debug!(%url, %q, limit = query.limit, "searching repositories");

        let response = self
            .get(&url)
            .query(&[
                ("q", q.as_str()),
                ("sort", "stars"),
                ("per_page", per_page.as_str()),
            ])
            .send()?;
        if let Some(err) = SourceError::from_response(SERVICE, &response) {
            return Err(err);
        }
        parse_search_response(&response.text()?)
    }

    /// Fetches and cleans one repository's README.
    fn readme(&self, api_url: &str) -> Result<String, SourceError> {
        let url = format!("{}/readme", api_url.trim_end_matches('/'));
        debug!(%url, "fetching README");

        let response = self.get(&url).send()?;
        if let Some(err) = SourceError::from_response(SERVICE, &response) {
            return Err(err);
        }
        let body: ReadmeResponse =
            serde_json::from_str(&response.text()?).map_err(|e| SourceError::Malformed {
                context: "README",
                reason: e.to_string(),
            })?;
        Ok(clean_readme(&decode_readme(&body.content)?))
    }
}

/// Fills in each item's README text using `fetch`.
///
/// A rejected credential aborts the whole search. Any other failure is logged and leaves that
/// item's README empty; the item itself is kept.
pub fn attach_readmes<F>(items: &mut [RepositoryItem], mut fetch: F) -> Result<(), SourceError>
where
    F: FnMut(&RepositoryItem) -> Result<String, SourceError>,
{
    for (i, item) in items.iter_mut().enumerate() {
        debug!(n = i + 1, repository = %item.url, "fetching repository README");
        item.readme = match fetch(item) {
            Ok(text) => text,
            Err(err @ SourceError::Auth { .. }) => return Err(err),
            Err(err) => {
                warn!(repository = %item.url, error = %err, "README unavailable");
                String::new()
            }
        };
    }
    Ok(())
}

impl RepositorySearch for GitHubClient {
    fn search(&self, query: &RepositoryQuery) -> Result<Vec<RepositoryItem>, SourceError> {
        let mut items = self.search_repositories(query)?;
        info!(count = items.len(), "fetched repositories");
        attach_readmes(&mut items, |item| self.readme(&item.api_url))?;
        Ok(items)
    }
}
