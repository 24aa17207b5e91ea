use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StudySessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudySessions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudySessions::UserId).big_integer().not_null())
                    .col(ColumnDef::new(StudySessions::Mode).string().not_null())
                    .col(
                        ColumnDef::new(StudySessions::DurationSecs)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudySessions::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StudySessions::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudySessions::EndedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudySessions::Table, StudySessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(StudySessions::Table)
                    .col(StudySessions::UserId)
                    .name("idx_study_sessions_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudySessions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum StudySessions {
    Table,
    Id,
    UserId,
    Mode,
    DurationSecs,
    Completed,
    StartedAt,
    EndedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
