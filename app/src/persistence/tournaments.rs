use sea_orm::sea_query::OnConflict;
use sea_orm::{DbConn, DbErr, EntityTrait, Set};

use models::domains::tournaments;
use models::schemas::broadcast::BroadcastTour;

pub async fn get_tournament(db: &DbConn, id: &str) -> Result<Option<tournaments::Model>, DbErr> {
    tournaments::Entity::find_by_id(id).one(db).await
}

/// Creates the tournament or overwrites every stored field with `tour`.
pub async fn upsert_tournament(db: &DbConn, tour: &BroadcastTour) -> Result<(), DbErr> {
    let model = tournaments::ActiveModel {
        id: Set(tour.id.clone()),
        name: Set(tour.name.clone()),
        slug: Set(tour.slug.clone()),
        info: Set(tour.info.clone()),
        tier: Set(tour.tier),
        url: Set(tour.url.clone()),
        image: Set(tour.image.clone()),
        dates: Set(tour.dates.clone()),
        created_at: Set(tour.created_at),
    };

    tournaments::Entity::insert(model)
        .on_conflict(
            OnConflict::column(tournaments::Column::Id)
                .update_columns([
                    tournaments::Column::Name,
                    tournaments::Column::Slug,
                    tournaments::Column::Info,
                    tournaments::Column::Tier,
                    tournaments::Column::Url,
                    tournaments::Column::Image,
                    tournaments::Column::Dates,
                    tournaments::Column::CreatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(())
}
