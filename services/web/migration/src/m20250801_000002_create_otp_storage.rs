use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OtpStorage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OtpStorage::Email)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OtpStorage::Code).string().not_null())
                    .col(
                        ColumnDef::new(OtpStorage::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OtpStorage::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OtpStorage {
    Table,
    Email,
    Code,
    ExpiresAt,
}
