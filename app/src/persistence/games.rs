use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};

use models::domains::games;

use super::{GAME_ID_LENGTH, ID_ALPHABET};

/// The fields that identify a game within a round. Games carry no upstream id,
/// so two records agreeing on all of these are the same game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameKey<'a> {
    pub round_id: &'a str,
    pub white: &'a str,
    pub black: &'a str,
    pub date: &'a str,
    pub round: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
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
    pub pgn: String,
}

impl NewGame {
    pub fn key(&self) -> GameKey<'_> {
        GameKey {
            round_id: &self.round_id,
            white: &self.white,
            black: &self.black,
            date: &self.date,
            round: &self.round,
        }
    }
}

pub async fn find_game(db: &DbConn, key: GameKey<'_>) -> Result<Option<games::Model>, DbErr> {
    games::Entity::find()
        .filter(games::Column::RoundId.eq(key.round_id))
        .filter(games::Column::White.eq(key.white))
        .filter(games::Column::Black.eq(key.black))
        .filter(games::Column::Date.eq(key.date))
        .filter(games::Column::Round.eq(key.round))
        .one(db)
        .await
}

pub async fn create_game(db: &DbConn, game: NewGame) -> Result<games::Model, DbErr> {
    let id = nanoid::nanoid!(GAME_ID_LENGTH, &ID_ALPHABET);

    games::ActiveModel {
        id: Set(id),
        round_id: Set(game.round_id),
        event: Set(game.event),
        site: Set(game.site),
        date: Set(game.date),
        round: Set(game.round),
        white: Set(game.white),
        black: Set(game.black),
        result: Set(game.result),
        white_team: Set(game.white_team),
        black_team: Set(game.black_team),
        white_fide_id: Set(game.white_fide_id),
        black_fide_id: Set(game.black_fide_id),
        white_title: Set(game.white_title),
        black_title: Set(game.black_title),
        white_elo: Set(game.white_elo),
        black_elo: Set(game.black_elo),
        variant: Set(game.variant),
        eco: Set(game.eco),
        opening: Set(game.opening),
        pgn: Set(game.pgn),
    }
    .insert(db)
    .await
}

pub async fn get_round_games(db: &DbConn, round_id: &str) -> Result<Vec<games::Model>, DbErr> {
    games::Entity::find()
        .filter(games::Column::RoundId.eq(round_id))
        .order_by_asc(games::Column::Round)
        .all(db)
        .await
}

/// Removes one game. A missing id is an error.
pub async fn delete_game(db: &DbConn, id: &str) -> Result<(), DbErr> {
    let result = games::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotFound(format!("game {id} not found")));
    }
    Ok(())
}

/// Removes every game of a round and returns how many went. Zero is fine.
pub async fn delete_round_games(db: &DbConn, round_id: &str) -> Result<u64, DbErr> {
    let result = games::Entity::delete_many()
        .filter(games::Column::RoundId.eq(round_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
