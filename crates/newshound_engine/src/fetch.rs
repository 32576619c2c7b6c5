use crate::types::{SearchError, SearchFailureKind, SearchResponse, StoryRecord};

#[async_trait::async_trait]
pub trait StoryFetcher: Send + Sync {
    async fn search(&self, url: &str) -> Result<Vec<StoryRecord>, SearchError>;
}

/// HTTP fetcher with no timeouts: an unresponsive server leaves the request
/// outstanding instead of surfacing a late failure.
#[derive(Debug, Clone, Default)]
pub struct ReqwestStoryFetcher {
    client: reqwest::Client,
}

impl ReqwestStoryFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl StoryFetcher for ReqwestStoryFetcher {
    async fn search(&self, url: &str) -> Result<Vec<StoryRecord>, SearchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| SearchError::new(SearchFailureKind::InvalidUrl, err.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // The status code is not inspected: any body that decodes as a result
        // payload counts as a result, everything else collapses into the same
        // failure path as a transport error.
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let payload: SearchResponse = serde_json::from_slice(&body)
            .map_err(|err| SearchError::new(SearchFailureKind::Decode, err.to_string()))?;
        Ok(payload.hits)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SearchError {
    SearchError::new(SearchFailureKind::Network, err.to_string())
}
