//! Newshound engine: runs search requests off the session thread.
mod engine;
mod fetch;
mod types;

pub use engine::EngineHandle;
pub use fetch::{ReqwestStoryFetcher, StoryFetcher};
pub use types::{RequestId, SearchCompletion, SearchError, SearchFailureKind, StoryRecord};
