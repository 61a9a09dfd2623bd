use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub round_id: String,
    pub event: String,
    pub site: String,
    pub date: String,
    pub round: String,
    pub white: String,
    pub black: String,
    pub result: String,
    pub white_team: Option<String>,
    pub black_team: Option<String>,
    pub white_fide_id: Option<String>,
    pub black_fide_id: Option<String>,
    pub white_title: Option<String>,
    pub black_title: Option<String>,
    pub white_elo: Option<i32>,
    pub black_elo: Option<i32>,
    pub variant: Option<String>,
    pub eco: Option<String>,
    pub opening: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub pgn: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rounds::Entity",
        from = "Column::RoundId",
        to = "super::rounds::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Rounds,
}

impl Related<super::rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
