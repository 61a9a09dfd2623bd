use models::domains::{games, rounds, tournaments};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(tournaments::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(tournaments::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(tournaments::Column::Name).string().not_null())
                    .col(ColumnDef::new(tournaments::Column::Slug).string().not_null())
                    .col(ColumnDef::new(tournaments::Column::Info).json().null())
                    .col(ColumnDef::new(tournaments::Column::Tier).integer().null())
                    .col(ColumnDef::new(tournaments::Column::Url).string().not_null())
                    .col(ColumnDef::new(tournaments::Column::Image).string().null())
                    .col(ColumnDef::new(tournaments::Column::Dates).json().null())
                    .col(
                        ColumnDef::new(tournaments::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(rounds::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(rounds::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(rounds::Column::TournamentId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(rounds::Column::Name).string().not_null())
                    .col(ColumnDef::new(rounds::Column::Slug).string().not_null())
                    .col(
                        ColumnDef::new(rounds::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(rounds::Column::StartsAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(rounds::Column::FinishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(rounds::Column::Finished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(rounds::Column::Url).string().not_null())
                    .col(
                        ColumnDef::new(rounds::Column::ImportStatus)
                            .string_len(16)
                            .not_null()
                            .default("not_started"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-rounds-tournament_id")
                            .from(rounds::Entity, rounds::Column::TournamentId)
                            .to(tournaments::Entity, tournaments::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(games::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(games::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(games::Column::RoundId).string().not_null())
                    .col(ColumnDef::new(games::Column::Event).string().not_null())
                    .col(ColumnDef::new(games::Column::Site).string().not_null())
                    .col(ColumnDef::new(games::Column::Date).string().not_null())
                    .col(ColumnDef::new(games::Column::Round).string().not_null())
                    .col(ColumnDef::new(games::Column::White).string().not_null())
                    .col(ColumnDef::new(games::Column::Black).string().not_null())
                    .col(ColumnDef::new(games::Column::Result).string().not_null())
                    .col(ColumnDef::new(games::Column::WhiteTeam).string().null())
                    .col(ColumnDef::new(games::Column::BlackTeam).string().null())
                    .col(ColumnDef::new(games::Column::WhiteFideId).string().null())
                    .col(ColumnDef::new(games::Column::BlackFideId).string().null())
                    .col(ColumnDef::new(games::Column::WhiteTitle).string().null())
                    .col(ColumnDef::new(games::Column::BlackTitle).string().null())
                    .col(ColumnDef::new(games::Column::WhiteElo).integer().null())
                    .col(ColumnDef::new(games::Column::BlackElo).integer().null())
                    .col(ColumnDef::new(games::Column::Variant).string().null())
                    .col(ColumnDef::new(games::Column::Eco).string().null())
                    .col(ColumnDef::new(games::Column::Opening).string().null())
                    .col(ColumnDef::new(games::Column::Pgn).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-games-round_id")
                            .from(games::Entity, games::Column::RoundId)
                            .to(rounds::Entity, rounds::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Not unique: duplicates are filtered by lookup before insert.
        manager
            .create_index(
                Index::create()
                    .name("idx-games-round_pairing")
                    .table(games::Entity)
                    .col(games::Column::RoundId)
                    .col(games::Column::White)
                    .col(games::Column::Black)
                    .col(games::Column::Date)
                    .col(games::Column::Round)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(games::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(rounds::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(tournaments::Entity).to_owned())
            .await?;

        Ok(())
    }
}
