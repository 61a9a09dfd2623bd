use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::ImportStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "rounds")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub tournament_id: String,
    pub name: String,
    pub slug: String,
    pub created_at: DateTimeUtc,
    pub starts_at: Option<DateTimeUtc>,
    pub finished_at: Option<DateTimeUtc>,
    pub finished: bool,
    pub url: String,
    pub import_status: ImportStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tournaments::Entity",
        from = "Column::TournamentId",
        to = "super::tournaments::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Tournaments,
    #[sea_orm(has_many = "super::games::Entity")]
    Games,
}

impl Related<super::tournaments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tournaments.def()
    }
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Games.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
