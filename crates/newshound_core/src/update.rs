use crate::results::ResultsAction;
use crate::state::AppState;
use crate::{Effect, Msg, SearchConfig};

/// Builds the initial state and runs the construction-time trigger: one
/// fetch cycle starts immediately for a non-empty initial draft.
pub fn init(config: SearchConfig, initial_query: impl Into<String>) -> (AppState, Vec<Effect>) {
    let mut state = AppState::new(config, initial_query);
    let effects = commit_search(&mut state);
    (state, effects)
}

/// Applies one message to the state and returns the follow-up effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryEdited(text) => {
            if text == state.draft_query() {
                Vec::new()
            } else {
                state.set_draft(text.clone());
                state.mark_dirty();
                vec![Effect::PersistQuery { value: text }]
            }
        }
        Msg::SearchSubmitted => commit_search(&mut state),
        Msg::StoryDismissed(story) => {
            let before = state.results().stories.len();
            state.apply_results(ResultsAction::RemoveStory(story));
            if state.results().stories.len() != before {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::StoriesLoaded(stories) => {
            state.apply_results(ResultsAction::FetchSuccess(stories));
            state.mark_dirty();
            Vec::new()
        }
        Msg::SearchFailed => {
            state.apply_results(ResultsAction::FetchFailure);
            state.mark_dirty();
            Vec::new()
        }
    };

    (state, effects)
}

/// Recommits the target from the draft; a distinct target starts exactly
/// one fetch cycle. An empty query commits without fetching.
fn commit_search(state: &mut AppState) -> Vec<Effect> {
    if !state.commit_draft() {
        // Same target as before; the trigger fires once per distinct value.
        return Vec::new();
    }
    if state.committed_query().is_empty() {
        return Vec::new();
    }
    state.apply_results(ResultsAction::FetchInit);
    state.mark_dirty();
    let request_id = state.next_request_id();
    vec![Effect::IssueSearch {
        request_id,
        url: state.committed_url().to_owned(),
    }]
}
