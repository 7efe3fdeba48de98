use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum BattlepassSeasons {
    Table,
    Id,
    SeasonNumber,
    Name,
    StartDate,
    EndDate,
    IsActive,
    Rewards,
}

#[derive(DeriveIden)]
enum UserBattlepassProgress {
    Table,
    Id,
    Uid,
    SeasonId,
    CurrentDay,
    ClaimedDays,
    LastClaimDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StatusChecks {
    Table,
    Id,
    ClientName,
    Timestamp,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BattlepassSeasons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BattlepassSeasons::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BattlepassSeasons::SeasonNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BattlepassSeasons::Name).string().not_null())
                    .col(
                        ColumnDef::new(BattlepassSeasons::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BattlepassSeasons::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BattlepassSeasons::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(BattlepassSeasons::Rewards)
                            .json_binary()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // at most one active season; plain unique index would also forbid
        // a second inactive row, so this has to be partial
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_battlepass_seasons_active \
                 ON battlepass_seasons (is_active) WHERE is_active",
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserBattlepassProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserBattlepassProgress::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserBattlepassProgress::Uid)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserBattlepassProgress::SeasonId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserBattlepassProgress::CurrentDay)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(UserBattlepassProgress::ClaimedDays)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserBattlepassProgress::LastClaimDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UserBattlepassProgress::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // one progress row per (uid, season)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_user_battlepass_progress_uid_season")
                    .table(UserBattlepassProgress::Table)
                    .col(UserBattlepassProgress::Uid)
                    .col(UserBattlepassProgress::SeasonId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StatusChecks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StatusChecks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StatusChecks::ClientName).string().not_null())
                    .col(
                        ColumnDef::new(StatusChecks::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StatusChecks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserBattlepassProgress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BattlepassSeasons::Table).to_owned())
            .await?;
        Ok(())
    }
}
