use axum::{
    Json, Router,
    extract::{Path, State},
    routing::delete,
};

use app::persistence::games::delete_round_games;
use app::state::AppState;
use models::schemas::response::DeleteResponse;

use crate::error::ApiError;

#[utoipa::path(
    delete,
    path = "/api/rounds/{round_id}/games",
    tag = "rounds",
    params(("round_id" = String, Path, description = "Storage id of the round")),
    responses(
        (status = 200, description = "All games of the round deleted, possibly none", body = DeleteResponse),
        (status = 500, description = "Storage failure", body = models::schemas::response::ApiErrorResponse),
    )
)]
pub(crate) async fn rounds_id_games_delete(
    State(state): State<AppState>,
    Path(round_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = delete_round_games(&state.conn, &round_id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete games", e))?;

    tracing::info!(round_id = %round_id, "Deleted {} games", deleted);
    Ok(Json(DeleteResponse::ok()))
}

pub fn create_round_router() -> Router<AppState> {
    Router::new().route("/{round_id}/games", delete(rounds_id_games_delete))
}
