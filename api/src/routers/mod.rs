use axum::Router;

pub mod games;
pub mod rounds;

use app::state::AppState;
use games::create_game_router;
use rounds::create_round_router;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/games", create_game_router())
        .nest("/api/rounds", create_round_router())
        .with_state(state)
}
