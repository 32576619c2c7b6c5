use crate::state::Story;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchView {
    pub draft_query: String,
    pub is_loading: bool,
    pub is_error: bool,
    pub submit_enabled: bool,
    /// Stories whose title contains the draft as a case-insensitive
    /// substring; the underlying result set is never touched.
    pub visible_stories: Vec<Story>,
}
