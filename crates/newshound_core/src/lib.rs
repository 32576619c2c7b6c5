//! Newshound core: the pure search state machine and its view model.
mod effect;
mod msg;
mod results;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use results::{reduce, ResultsAction, ResultsState};
pub use state::{AppState, RequestId, SearchConfig, Story, DEFAULT_ENDPOINT, DEFAULT_QUERY};
pub use update::{init, update};
pub use view_model::SearchView;
