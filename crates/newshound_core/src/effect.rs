use crate::state::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    IssueSearch { request_id: RequestId, url: String },
    PersistQuery { value: String },
}
