use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(License::Table)
                    .if_not_exists()
                    .col(pk_auto(License::Id))
                    .col(string(License::Key))
                    .col(string(License::Identifier))
                    .col(string(License::LicenseType))
                    .col(timestamp_with_time_zone(License::ValidUntil))
                    .col(big_integer(License::RequestLimit))
                    .col(big_integer(License::RequestCount).default(0))
                    .col(json(License::Ips))
                    .col(integer_null(License::MaxIps))
                    .col(json(License::Hwid))
                    .col(integer(License::Version).default(0))
                    .col(timestamp_with_time_zone(License::CreatedAt))
                    .col(timestamp_with_time_zone(License::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // A key is only unique within its identifier
        manager
            .create_index(
                Index::create()
                    .name("idx_license_key_identifier")
                    .table(License::Table)
                    .col(License::Key)
                    .col(License::Identifier)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_license_key_identifier")
                    .table(License::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(License::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum License {
    Table,
    Id,
    Key,
    Identifier,
    LicenseType,
    ValidUntil,
    RequestLimit,
    RequestCount,
    Ips,
    MaxIps,
    Hwid,
    Version,
    CreatedAt,
    UpdatedAt,
}
