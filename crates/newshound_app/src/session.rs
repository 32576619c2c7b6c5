use newshound_core::{
    init, update, AppState, Effect, Msg, SearchConfig, SearchView, Story, DEFAULT_QUERY,
};
use newshound_engine::{EngineHandle, StoryRecord};

use crate::persistence::{PersistedCell, PrefStore};

/// Storage key for the search draft, shared across sessions.
const SEARCH_PREF_KEY: &str = "search";

/// Owns one user's search state plus the engine, the persisted draft and
/// the render listeners. All methods run on the caller's thread;
/// completions only apply when [`SearchSession::pump`] drains them.
pub struct SearchSession {
    state: AppState,
    engine: EngineHandle,
    query_cell: PersistedCell,
    listeners: Vec<Box<dyn FnMut(&SearchView)>>,
}

impl SearchSession {
    /// Restores the persisted draft and immediately starts the first search
    /// for it.
    pub fn new(config: SearchConfig, store: Box<dyn PrefStore>) -> Self {
        let query_cell = PersistedCell::create(SEARCH_PREF_KEY, DEFAULT_QUERY, store);
        let (state, effects) = init(config, query_cell.value());
        let mut session = Self {
            state,
            engine: EngineHandle::new(),
            query_cell,
            listeners: Vec::new(),
        };
        session.run_effects(effects);
        // The construction-time trigger marks the state dirty; spend the
        // flag now, subscribers get the current view replayed anyway.
        session.state.consume_dirty();
        session
    }

    /// Registers a listener and immediately replays the current view to it.
    pub fn subscribe(&mut self, mut listener: impl FnMut(&SearchView) + 'static) {
        let view = self.state.view();
        listener(&view);
        self.listeners.push(Box::new(listener));
    }

    pub fn current_view(&self) -> SearchView {
        self.state.view()
    }

    pub fn on_draft_change(&mut self, text: &str) {
        self.dispatch(Msg::QueryEdited(text.to_owned()));
    }

    pub fn on_submit(&mut self) {
        self.dispatch(Msg::SearchSubmitted);
    }

    pub fn on_dismiss(&mut self, story: &Story) {
        self.dispatch(Msg::StoryDismissed(story.clone()));
    }

    /// Drains finished searches and applies them in arrival order.
    pub fn pump(&mut self) {
        while let Some(completion) = self.engine.try_recv() {
            match completion.result {
                Ok(records) => {
                    log::info!(
                        "search #{} returned {} stories",
                        completion.request_id,
                        records.len()
                    );
                    let stories = records.into_iter().map(story_from_record).collect();
                    self.dispatch(Msg::StoriesLoaded(stories));
                }
                Err(err) => {
                    log::warn!("search #{} failed: {err}", completion.request_id);
                    self.dispatch(Msg::SearchFailed);
                }
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.run_effects(effects);
        self.notify_if_dirty();
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::IssueSearch { request_id, url } => {
                    log::info!("search #{request_id} issued: {url}");
                    self.engine.issue(request_id, url);
                }
                Effect::PersistQuery { value } => {
                    self.query_cell.set(&value);
                }
            }
        }
    }

    fn notify_if_dirty(&mut self) {
        if !self.state.consume_dirty() {
            return;
        }
        let view = self.state.view();
        for listener in &mut self.listeners {
            listener(&view);
        }
    }
}

/// Fills the aggregator's omitted fields with empty defaults.
fn story_from_record(record: StoryRecord) -> Story {
    Story {
        id: record.object_id,
        title: record.title.unwrap_or_default(),
        url: record.url.unwrap_or_default(),
        author: record.author.unwrap_or_default(),
        num_comments: record.num_comments.unwrap_or_default(),
        points: record.points.unwrap_or_default(),
    }
}
