use axum::{
    Router,
    routing::get,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::conversations;
use crate::messages;
use crate::state::AppState;
use crate::users;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/accounts/{account_id}/conversations", get(conversations::get_conversations))
        .route("/conversations/{conversation_id}", get(conversations::show_conversation))
        .route(
            "/conversations/{conversation_id}/messages",
            get(messages::get_messages).post(messages::send_message),
        )
        .route("/messages/{message_id}", get(messages::show_message))
        .route("/users/{user_id}", get(users::show_user))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}
