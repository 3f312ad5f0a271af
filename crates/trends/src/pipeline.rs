//! Fetch-and-score pipeline.
//!
//! A [`Pipeline`] is built once from configuration and holds only read-only state: the
//! stopword set and the search and ranking bounds. Adapters are passed in per call, so the
//! same pipeline runs against live services or test fixtures.

use std::num::NonZeroUsize;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use trends_config::{ItemOrder, MAX_REPOSITORIES, Normalization, SearchSettings, TermSettings};
use trends_source::{PostSearch, RepositoryItem, RepositoryQuery, RepositorySearch, SourceError};
use trends_text::{RankedTermList, Stopwords, TextRecord, rank_records, score};

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A search adapter failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// There is nothing to search for.
    #[error("no keywords to search for")]
    NoKeywords,
}

/// A repository with its relevancy to the search keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredItem {
    /// Repository name.
    pub title: String,
    /// Browser URL.
    pub url: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Fork count.
    pub forks: u64,
    /// Star count.
    pub stars: u64,
    /// Keyword occurrences in name, description and README.
    pub relevancy: u64,
}

/// Output of one full pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    /// Keywords the report was built from.
    pub keywords: Vec<String>,
    /// Scored repositories in output order.
    pub repositories: Vec<ScoredItem>,
    /// Top terms across repository text.
    pub repository_terms: RankedTermList,
    /// Top terms across social posts, when a post source was used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_terms: Option<RankedTermList>,
}

/// Request-scoped analysis context.
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Stopwords applied during normalization.
    stopwords: Stopwords,
    /// Row normalization for TF-IDF weights.
    normalization: Normalization,
    /// Output order of scored repositories.
    order: ItemOrder,
    /// Star floor for repository search.
    min_stars: u32,
    /// Fork floor for repository search.
    min_forks: u32,
    /// Repositories fetched per search.
    repositories: usize,
    /// Default number of terms to report.
    term_limit: NonZeroUsize,
}

impl Pipeline {
    /// Builds a pipeline from search and term settings.
    ///
    /// The repository count is clamped to `1..=MAX_REPOSITORIES`; a zero term limit is
    /// raised to one.
    pub fn new(search: &SearchSettings, terms: &TermSettings) -> Self {
        let repositories = search.repositories.clamp(1, MAX_REPOSITORIES);
        if repositories != search.repositories {
            warn!(
                requested = search.repositories,
                used = repositories,
                "repository count out of range"
            );
        }
        Self {
            stopwords: Stopwords::with_extra(terms.extra_stopwords.iter().map(String::as_str)),
            normalization: terms.normalization,
            order: search.order,
            min_stars: search.min_stars,
            min_forks: search.min_forks,
            repositories,
            term_limit: NonZeroUsize::new(terms.limit).unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Returns the configured number of terms to report.
    pub fn term_limit(&self) -> NonZeroUsize {
        self.term_limit
    }

    /// Builds the repository query for `keywords`.
    pub fn query(&self, keywords: &[String]) -> RepositoryQuery {
        RepositoryQuery {
            keywords: keywords.to_vec(),
            min_stars: self.min_stars,
            min_forks: self.min_forks,
            limit: self.repositories,
        }
    }

    /// Fetches repositories matching `keywords`.
    pub fn fetch_repositories(
        &self,
        source: &dyn RepositorySearch,
        keywords: &[String],
    ) -> Result<Vec<RepositoryItem>, PipelineError> {
        let keywords = non_empty(keywords)?;
        let items = source.search(&self.query(&keywords))?;
        info!(count = items.len(), "repositories fetched");
        Ok(items)
    }

    /// Scores fetched repositories against `keywords`, in the configured order.
    ///
    /// Relevancy ordering is stable: equally relevant repositories keep the service order.
    pub fn score_items(&self, items: &[RepositoryItem], keywords: &[String]) -> Vec<ScoredItem> {
        let mut scored: Vec<ScoredItem> = items
            .iter()
            .map(|item| ScoredItem {
                title: item.title.clone(),
                url: item.url.clone(),
                description: item.description.clone(),
                forks: item.forks,
                stars: item.stars,
                relevancy: score(&item.full_text(), keywords),
            })
            .collect();

        if self.order == ItemOrder::Relevancy {
            scored.sort_by(|a, b| b.relevancy.cmp(&a.relevancy));
        }
        scored
    }

    /// Fetches and scores repositories matching `keywords`.
    ///
    /// Blank keywords are dropped before both the search and the scoring.
    pub fn scored_repositories(
        &self,
        source: &dyn RepositorySearch,
        keywords: &[String],
    ) -> Result<Vec<ScoredItem>, PipelineError> {
        let keywords = non_empty(keywords)?;
        let items = self.fetch_repositories(source, &keywords)?;
        Ok(self.score_items(&items, &keywords))
    }

    /// Fetches social posts matching `keywords`.
    pub fn fetch_posts(
        &self,
        source: &dyn PostSearch,
        keywords: &[String],
    ) -> Result<Vec<String>, PipelineError> {
        let keywords = non_empty(keywords)?;
        let posts = source.search(&keywords)?;
        info!(count = posts.len(), "posts fetched");
        Ok(posts)
    }

    /// Ranks the top `n` terms across repository text.
    pub fn repository_terms(&self, items: &[RepositoryItem], n: NonZeroUsize) -> RankedTermList {
        let records: Vec<TextRecord> = items
            .iter()
            .map(|item| TextRecord::new(item.url.as_str(), item.full_text()))
            .collect();
        self.rank_texts(&records, n)
    }

    /// Ranks the top `n` terms across social posts.
    pub fn post_terms(&self, posts: &[String], n: NonZeroUsize) -> RankedTermList {
        let records: Vec<TextRecord> = posts
            .iter()
            .enumerate()
            .map(|(i, text)| TextRecord::new(i.to_string(), text.as_str()))
            .collect();
        self.rank_texts(&records, n)
    }

    /// Normalizes, weighs and ranks arbitrary records.
    pub fn rank_texts(&self, records: &[TextRecord], n: NonZeroUsize) -> RankedTermList {
        debug!(documents = records.len(), n = n.get(), "ranking terms");
        rank_records(records, &self.stopwords, self.normalization, n)
    }

    /// Runs one full fetch-and-score cycle.
    ///
    /// Posts are searched only when `posts` is given. Any adapter failure aborts the run.
    pub fn report(
        &self,
        repositories: &dyn RepositorySearch,
        posts: Option<&dyn PostSearch>,
        keywords: &[String],
    ) -> Result<TrendReport, PipelineError> {
        let keywords = non_empty(keywords)?;
        let items = self.fetch_repositories(repositories, &keywords)?;

        let post_terms = match posts {
            Some(source) => {
                let texts = self.fetch_posts(source, &keywords)?;
                Some(self.post_terms(&texts, self.term_limit))
            }
            None => None,
        };

        Ok(TrendReport {
            repositories: self.score_items(&items, &keywords),
            repository_terms: self.repository_terms(&items, self.term_limit),
            post_terms,
            keywords,
        })
    }
}

/// Drops blank keywords, failing if none remain.
fn non_empty(keywords: &[String]) -> Result<Vec<String>, PipelineError> {
    let kept: Vec<String> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(ToString::to_string)
        .collect();
    if kept.is_empty() {
        return Err(PipelineError::NoKeywords);
    }
    Ok(kept)
}
