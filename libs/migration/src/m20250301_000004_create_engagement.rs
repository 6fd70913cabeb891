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
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(pk_uuid(Reviews::Id))
                    .col(uuid(Reviews::ProductId))
                    .col(uuid(Reviews::UserId))
                    .col(small_integer(Reviews::Rating))
                    .col(text_null(Reviews::Comment))
                    .col(
                        timestamp_with_time_zone(Reviews::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_product_id")
                            .from(Reviews::Table, Reviews::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_user_id")
                            .from(Reviews::Table, Reviews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE reviews ADD CONSTRAINT chk_reviews_rating_range CHECK (rating BETWEEN 1 AND 5)",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_reviews_user_product")
                    .table(Reviews::Table)
                    .col(Reviews::UserId)
                    .col(Reviews::ProductId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_product_id")
                    .table(Reviews::Table)
                    .col(Reviews::ProductId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Wishlists::Table)
                    .if_not_exists()
                    .col(pk_uuid(Wishlists::Id))
                    .col(uuid(Wishlists::UserId))
                    .col(uuid(Wishlists::ProductId))
                    .col(
                        timestamp_with_time_zone(Wishlists::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlists_user_id")
                            .from(Wishlists::Table, Wishlists::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlists_product_id")
                            .from(Wishlists::Table, Wishlists::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_wishlists_user_product")
                    .table(Wishlists::Table)
                    .col(Wishlists::UserId)
                    .col(Wishlists::ProductId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create contact enums
        manager
            .create_type(
                Type::create()
                    .as_enum(ContactType::Enum)
                    .values(contact_types())
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(ContactStatus::Enum)
                    .values(contact_statuses())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(pk_uuid(Contacts::Id))
                    .col(string(Contacts::Name))
                    .col(string(Contacts::Email))
                    .col(string_len_null(Contacts::Phone, 50))
                    .col(string(Contacts::Subject))
                    .col(text(Contacts::Message))
                    .col(
                        ColumnDef::new(Contacts::Type)
                            .enumeration(ContactType::Enum, contact_types())
                            .not_null()
                            .default("inquiry"),
                    )
                    .col(
                        ColumnDef::new(Contacts::Status)
                            .enumeration(ContactStatus::Enum, contact_statuses())
                            .not_null()
                            .default("pending"),
                    )
                    .col(text_null(Contacts::Response))
                    .col(uuid_null(Contacts::UserId))
                    .col(
                        timestamp_with_time_zone(Contacts::SubmittedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Contacts::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contacts_user_id")
                            .from(Contacts::Table, Contacts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_contacts_submitted_at")
                    .table(Contacts::Table)
                    .col(Contacts::SubmittedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contacts::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ContactStatus::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ContactType::Enum).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Wishlists::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;

        Ok(())
    }
}

fn contact_types() -> [ContactType; 4] {
    [
        ContactType::Inquiry,
        ContactType::Support,
        ContactType::Complaint,
        ContactType::Feedback,
    ]
}

fn contact_statuses() -> [ContactStatus; 4] {
    [
        ContactStatus::Pending,
        ContactStatus::InProgress,
        ContactStatus::Resolved,
        ContactStatus::Closed,
    ]
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    ProductId,
    UserId,
    Rating,
    Comment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Wishlists {
    Table,
    Id,
    UserId,
    ProductId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Contacts {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Subject,
    Message,
    Type,
    Status,
    Response,
    UserId,
    SubmittedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ContactType {
    #[sea_orm(iden = "contact_type")]
    Enum,
    #[sea_orm(iden = "inquiry")]
    Inquiry,
    #[sea_orm(iden = "support")]
    Support,
    #[sea_orm(iden = "complaint")]
    Complaint,
    #[sea_orm(iden = "feedback")]
    Feedback,
}

#[derive(DeriveIden)]
enum ContactStatus {
    #[sea_orm(iden = "contact_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "in_progress")]
    InProgress,
    #[sea_orm(iden = "resolved")]
    Resolved,
    #[sea_orm(iden = "closed")]
    Closed,
}
