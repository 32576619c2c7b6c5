use url::Url;

use crate::results::{reduce, ResultsAction, ResultsState};
use crate::view_model::SearchView;

pub const DEFAULT_ENDPOINT: &str = "https://hn.algolia.com/api/v1/search";
pub const DEFAULT_QUERY: &str = "react";

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    /// Identity; the aggregator serves it as a JSON string (`objectID`).
    pub id: String,
    pub title: String,
    pub url: String,
    pub author: String,
    pub num_comments: u32,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    endpoint: Url,
}

impl SearchConfig {
    pub fn new(endpoint: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
        })
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    config: SearchConfig,
    draft_query: String,
    committed_query: String,
    committed_url: String,
    results: ResultsState,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SearchConfig::default(), "")
    }
}

impl AppState {
    pub(crate) fn new(config: SearchConfig, initial_query: impl Into<String>) -> Self {
        Self {
            config,
            draft_query: initial_query.into(),
            committed_query: String::new(),
            committed_url: String::new(),
            results: ResultsState::default(),
            next_request_id: 1,
            dirty: false,
        }
    }

    pub fn view(&self) -> SearchView {
        let needle = self.draft_query.to_lowercase();
        let visible_stories = self
            .results
            .stories
            .iter()
            .filter(|story| story.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        SearchView {
            draft_query: self.draft_query.clone(),
            is_loading: self.results.is_loading,
            is_error: self.results.is_error,
            submit_enabled: !self.draft_query.is_empty(),
            visible_stories,
        }
    }

    pub fn draft_query(&self) -> &str {
        &self.draft_query
    }

    /// The exact request URL of the last committed search, empty before the
    /// first commit.
    pub fn committed_url(&self) -> &str {
        &self.committed_url
    }

    /// The raw result set, untouched by draft filtering.
    pub fn results(&self) -> &ResultsState {
        &self.results
    }

    /// Returns whether the view changed since the last call and clears the
    /// flag.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn set_draft(&mut self, text: String) {
        self.draft_query = text;
    }

    /// Rebuilds the committed target from the draft. Returns false when the
    /// target is unchanged, in which case nothing was committed.
    pub(crate) fn commit_draft(&mut self) -> bool {
        let url = search_url(&self.config.endpoint, &self.draft_query);
        if url == self.committed_url {
            return false;
        }
        self.committed_query = self.draft_query.clone();
        self.committed_url = url;
        true
    }

    pub(crate) fn committed_query(&self) -> &str {
        &self.committed_query
    }

    pub(crate) fn apply_results(&mut self, action: ResultsAction) {
        let results = std::mem::take(&mut self.results);
        self.results = reduce(results, action);
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

// The form-urlencoded target string also defines target identity for the
// fire-once trigger.
fn search_url(endpoint: &Url, query: &str) -> String {
    let mut url = endpoint.clone();
    url.query_pairs_mut().append_pair("query", query);
    url.into()
}
