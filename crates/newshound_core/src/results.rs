//! Reducer for the asynchronous fetch lifecycle of one result set.

use crate::state::Story;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultsState {
    pub stories: Vec<Story>,
    pub is_loading: bool,
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsAction {
    /// A fetch cycle started.
    FetchInit,
    /// A fetch resolved; the payload replaces the result set wholesale.
    FetchSuccess(Vec<Story>),
    /// A fetch failed; the previous result set is retained.
    FetchFailure,
    /// The user dismissed a story; every entry sharing its id is dropped.
    RemoveStory(Story),
}

/// Pure transition function: describes state movement, never performs IO.
pub fn reduce(state: ResultsState, action: ResultsAction) -> ResultsState {
    match action {
        ResultsAction::FetchInit => ResultsState {
            is_loading: true,
            is_error: false,
            ..state
        },
        ResultsAction::FetchSuccess(stories) => ResultsState {
            stories,
            is_loading: false,
            is_error: false,
        },
        ResultsAction::FetchFailure => ResultsState {
            is_loading: false,
            is_error: true,
            ..state
        },
        ResultsAction::RemoveStory(story) => {
            let mut state = state;
            state.stories.retain(|entry| entry.id != story.id);
            state
        }
    }
}
