use axum::{
    Json, Router,
    extract::{Path, State},
    routing::delete,
};

use app::persistence::games::delete_game;
use app::state::AppState;
use models::schemas::response::DeleteResponse;

use crate::error::ApiError;

#[utoipa::path(
    delete,
    path = "/api/games/{id}",
    tag = "games",
    params(("id" = String, Path, description = "Storage id of the game")),
    responses(
        (status = 200, description = "Game deleted", body = DeleteResponse),
        (status = 500, description = "Game missing or storage failure", body = models::schemas::response::ApiErrorResponse),
    )
)]
pub(crate) async fn games_id_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    delete_game(&state.conn, &id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete game", e))?;

    Ok(Json(DeleteResponse::ok()))
}

pub fn create_game_router() -> Router<AppState> {
    Router::new().route("/{id}", delete(games_id_delete))
}
