use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set,
    sea_query::Expr,
};

use models::domains::sea_orm_active_enums::ImportStatus;
use models::domains::{games, rounds};
use models::schemas::broadcast::BroadcastRound;

pub async fn get_round(db: &DbConn, id: &str) -> Result<Option<rounds::Model>, DbErr> {
    rounds::Entity::find_by_id(id).one(db).await
}

/// Creates the round under `tournament_id` or overwrites its broadcast fields.
/// `import_status` is only set on creation.
pub async fn upsert_round(
    db: &DbConn,
    tournament_id: &str,
    round: &BroadcastRound,
) -> Result<(), DbErr> {
    let model = rounds::ActiveModel {
        id: Set(round.id.clone()),
        tournament_id: Set(tournament_id.to_string()),
        name: Set(round.name.clone()),
        slug: Set(round.slug.clone()),
        created_at: Set(round.created_at),
        starts_at: Set(round.starts_at),
        finished_at: Set(round.finished_at),
        finished: Set(round.finished),
        url: Set(round.url.clone()),
        import_status: Set(ImportStatus::NotStarted),
    };

    rounds::Entity::insert(model)
        .on_conflict(
            OnConflict::column(rounds::Column::Id)
                .update_columns([
                    rounds::Column::TournamentId,
                    rounds::Column::Name,
                    rounds::Column::Slug,
                    rounds::Column::CreatedAt,
                    rounds::Column::StartsAt,
                    rounds::Column::FinishedAt,
                    rounds::Column::Finished,
                    rounds::Column::Url,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(())
}

pub async fn set_import_status(
    db: &DbConn,
    round_id: &str,
    status: ImportStatus,
) -> Result<(), DbErr> {
    rounds::Entity::update_many()
        .col_expr(rounds::Column::ImportStatus, Expr::value(status))
        .filter(rounds::Column::Id.eq(round_id))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn count_round_games(db: &DbConn, round_id: &str) -> Result<u64, DbErr> {
    games::Entity::find()
        .filter(games::Column::RoundId.eq(round_id))
        .count(db)
        .await
}
