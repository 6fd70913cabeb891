use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_uuid(Users::Id))
                    .col(string_null(Users::Name))
                    .col(string_uniq(Users::Email))
                    .col(string(Users::PasswordHash))
                    .col(string_len_null(Users::Phone, 50))
                    .col(string_null(Users::Avatar))
                    .col(text_null(Users::Address))
                    .col(
                        timestamp_with_time_zone(Users::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Users::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_created_at")
                    .table(Users::Table)
                    .col(Users::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Create admin_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(AdminStatus::Enum)
                    .values([AdminStatus::Active, AdminStatus::Inactive, AdminStatus::Blocked])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(pk_uuid(Admins::Id))
                    .col(string_len_uniq(Admins::Username, 100))
                    .col(string_len_null(Admins::Name, 100))
                    .col(string_null(Admins::Avatar))
                    .col(string_uniq(Admins::Email))
                    .col(string(Admins::PasswordHash))
                    .col(
                        ColumnDef::new(Admins::Status)
                            .enumeration(
                                AdminStatus::Enum,
                                [AdminStatus::Active, AdminStatus::Inactive, AdminStatus::Blocked],
                            )
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        timestamp_with_time_zone(Admins::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(AdminStatus::Enum).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Phone,
    Avatar,
    Address,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Admins {
    Table,
    Id,
    Username,
    Name,
    Avatar,
    Email,
    PasswordHash,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AdminStatus {
    #[sea_orm(iden = "admin_status")]
    Enum,
    #[sea_orm(iden = "active")]
    Active,
    #[sea_orm(iden = "inactive")]
    Inactive,
    #[sea_orm(iden = "blocked")]
    Blocked,
}
