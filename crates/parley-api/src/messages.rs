use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{debug, info};

use parley_db::Store;
use parley_db::models::NewMessage;
use parley_types::api::{CreateMessageRequest, MessageQuery, MessageView, Page, SortOrder};
use parley_types::models::{Document, Message};

use crate::cursor::Cursor;
use crate::error::{ApiError, ApiResult};
use crate::extract::{self, Query};
use crate::pagination::{effective_sort, into_page, parse_page_size, select_page, sort_rows};
use crate::state::AppState;

/// One page of a conversation's messages.
///
/// A cursor overrides `sort` with the order it was minted under. An absent
/// `page_size` means [`DEFAULT_PAGE_SIZE`](crate::pagination::DEFAULT_PAGE_SIZE).
pub fn list_messages(
    store: &Store,
    conversation_id: &str,
    page_size: Option<&str>,
    sort: SortOrder,
    cursor: Option<&str>,
) -> ApiResult<Page<Message>> {
    let page_size = parse_page_size(page_size)?;
    let cursor = Cursor::from_param(cursor)?;
    let sort = effective_sort(sort, cursor.as_ref());

    let mut rows = store.db().get_messages(conversation_id)?;
    sort_rows(&mut rows, sort, |m| m.created_at);

    let total = rows.len();
    let rows = select_page(rows, page_size, cursor.as_ref())?;
    debug!(
        "Listed {} of {} messages in {} ({:?})",
        rows.len(),
        total,
        conversation_id,
        sort
    );

    Ok(into_page(sort, rows))
}

/// A message with its sender resolved. `None` in, `None` out.
pub fn get_message(store: &Store, id: Option<&str>) -> ApiResult<Option<MessageView>> {
    let Some(id) = id else {
        return Ok(None);
    };

    store.db().with_data(|doc| {
        Ok(doc
            .message(id)
            .ok_or_else(|| ApiError::not_found("message", id))
            .and_then(|message| view_message(doc, message))
            .map(Some))
    })?
}

/// Resolve the sender of a message within one snapshot.
pub(crate) fn view_message(doc: &Document, message: &Message) -> ApiResult<MessageView> {
    let sender = doc
        .user(&message.sent_by_id)
        .ok_or_else(|| ApiError::not_found("user", &message.sent_by_id))?;

    Ok(MessageView {
        id: message.id.clone(),
        text: message.text.clone(),
        sender: sender.clone(),
        created_at: message.created_at,
    })
}

/// Append a message. Sender and conversation are taken as given.
pub async fn create_message(
    store: &Store,
    sender_id: &str,
    text: &str,
    conversation_id: &str,
) -> ApiResult<Message> {
    let message = store
        .append_message(NewMessage {
            sent_by_id: sender_id.to_string(),
            text: text.to_string(),
            conversation_id: conversation_id.to_string(),
        })
        .await?;

    info!("Message {} created in {}", message.id, message.conversation_id);
    Ok(message)
}

pub async fn get_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    Query(query): Query<MessageQuery>,
) -> ApiResult<impl IntoResponse> {
    let page = list_messages(
        &state.store,
        &conversation_id,
        query.page_size.as_deref(),
        query.sort,
        query.cursor.as_deref(),
    )?;
    Ok(Json(page))
}

pub async fn show_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let message = get_message(&state.store, Some(&message_id))?
        .ok_or_else(|| ApiError::not_found("message", message_id))?;
    Ok(Json(message))
}

pub async fn send_message(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    extract::Json(req): extract::Json<CreateMessageRequest>,
) -> ApiResult<impl IntoResponse> {
    let message = create_message(&state.store, &req.sender_id, &req.text, &conversation_id).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
