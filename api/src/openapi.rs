use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Broadcast Sync API",
        version = "0.1.0",
        description = "Maintenance endpoints for synchronised chess broadcast games",
        license(name = "MIT"),
    ),
    paths(
        crate::routers::games::games_id_delete,
        crate::routers::rounds::rounds_id_games_delete,
    ),
    components(schemas(
        models::schemas::response::DeleteResponse,
        models::schemas::response::ApiErrorResponse,
    )),
    tags(
        (name = "games", description = "Single game removal"),
        (name = "rounds", description = "Bulk removal of a round's games"),
    )
)]
pub struct ApiDoc;
