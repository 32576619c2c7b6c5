use std::fmt;

use serde::Deserialize;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoryRecord {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub num_comments: Option<u32>,
    #[serde(default)]
    pub points: Option<i64>,
}

// Everything beyond `hits` is ignored, but `hits` itself has to be present
// for the body to count as a result payload.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub hits: Vec<StoryRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFailureKind {
    InvalidUrl,
    Network,
    Decode,
}

impl fmt::Display for SearchFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchFailureKind::InvalidUrl => write!(f, "invalid url"),
            SearchFailureKind::Network => write!(f, "network error"),
            SearchFailureKind::Decode => write!(f, "malformed payload"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchError {
    pub kind: SearchFailureKind,
    pub message: String,
}

impl SearchError {
    pub(crate) fn new(kind: SearchFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SearchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCompletion {
    pub request_id: RequestId,
    pub result: Result<Vec<StoryRecord>, SearchError>,
}
