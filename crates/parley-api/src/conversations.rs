use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::debug;

use parley_db::Store;
use parley_types::api::{ConversationQuery, ConversationSummary, Page, SortOrder};
use parley_types::models::{Conversation, Document};

use crate::cursor::Cursor;
use crate::error::{ApiError, ApiResult};
use crate::extract::Query;
use crate::messages::view_message;
use crate::pagination::{
    clamp_page_size, effective_sort, into_page, parse_page_size, select_page, sort_rows,
};
use crate::state::AppState;

/// One page of the conversations `account_id` takes part in, each with its
/// participants and newest message.
///
/// The cursor anchor is looked up in the same filtered and sorted list the
/// page is cut from, and `next`/`prev` move the same way as for messages.
/// The whole page is built from one snapshot of the store.
pub fn list_conversations(
    store: &Store,
    account_id: &str,
    page_size: Option<usize>,
    sort: SortOrder,
    cursor: Option<&str>,
) -> ApiResult<Page<ConversationSummary>> {
    let page_size = clamp_page_size(page_size);
    let cursor = Cursor::from_param(cursor)?;
    let sort = effective_sort(sort, cursor.as_ref());

    let rows = store.db().with_data(|doc| {
        let mut rows: Vec<&Conversation> = doc.conversations_for(account_id).collect();
        sort_rows(&mut rows, sort, |c| c.created_at);

        let total = rows.len();
        let rows = select_page(rows, page_size, cursor.as_ref()).and_then(|page| {
            page.into_iter()
                .map(|conversation| summarize(doc, conversation))
                .collect::<ApiResult<Vec<_>>>()
        });
        if let Ok(rows) = &rows {
            debug!(
                "Listed {} of {} conversations for {} ({:?})",
                rows.len(),
                total,
                account_id,
                sort
            );
        }
        Ok(rows)
    })??;

    Ok(into_page(sort, rows))
}

fn summarize(doc: &Document, conversation: &Conversation) -> ApiResult<ConversationSummary> {
    let last_message = doc
        .latest_message(&conversation.id)
        .map(|message| view_message(doc, message))
        .transpose()?;

    Ok(ConversationSummary {
        id: conversation.id.clone(),
        participants: doc.users_in(&conversation.participant_ids).cloned().collect(),
        last_message,
    })
}

pub fn get_conversation(store: &Store, id: &str) -> ApiResult<Option<Conversation>> {
    Ok(store.db().get_conversation(id)?)
}

pub async fn get_conversations(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Query(query): Query<ConversationQuery>,
) -> ApiResult<impl IntoResponse> {
    let page_size = parse_page_size(query.page_size.as_deref())?;
    let page = list_conversations(
        &state.store,
        &account_id,
        Some(page_size),
        query.sort,
        query.cursor.as_deref(),
    )?;
    Ok(Json(page))
}

pub async fn show_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let conversation = get_conversation(&state.store, &conversation_id)?
        .ok_or_else(|| ApiError::not_found("conversation", conversation_id))?;
    Ok(Json(conversation))
}
