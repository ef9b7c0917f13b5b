use serde::{Deserialize, Serialize};

use crate::models::{Identified, Timestamp, User};

// -- Pagination --

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

/// One page of a listing plus the opaque cursors to move around it.
///
/// Both cursors are `None` exactly when `rows` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub sort: SortOrder,
    pub rows: Vec<T>,
    pub cursor_next: Option<String>,
    pub cursor_prev: Option<String>,
}

// -- Conversations --

#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    pub page_size: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: String,
    pub participants: Vec<User>,
    pub last_message: Option<MessageView>,
}

impl Identified for ConversationSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

// -- Messages --

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    /// Kept as a string so a bad value can be reported instead of rejected
    /// by the extractor.
    pub page_size: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateMessageRequest {
    pub sender_id: String,
    pub text: String,
}

/// A message with its sender resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: String,
    pub text: String,
    pub sender: User,
    pub created_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
