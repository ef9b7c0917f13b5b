use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use parley_db::Store;
use parley_types::models::User;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn get_user(store: &Store, id: &str) -> ApiResult<User> {
    store
        .db()
        .get_user(id)?
        .ok_or_else(|| ApiError::not_found("user", id))
}

pub async fn show_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(get_user(&state.store, &user_id)?))
}
