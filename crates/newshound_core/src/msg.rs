use crate::state::Story;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search input (draft text).
    QueryEdited(String),
    /// User submitted the current draft as a search.
    SearchSubmitted,
    /// User dismissed a story from the result list.
    StoryDismissed(Story),
    /// An issued search resolved with a page of stories.
    StoriesLoaded(Vec<Story>),
    /// An issued search failed; the cause stays in the shell's log.
    SearchFailed,
}
