use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create payment_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(PaymentStatus::Enum)
                    .values(payment_statuses())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(pk_uuid(Payments::Id))
                    .col(uuid(Payments::OrderId))
                    .col(uuid(Payments::UserId))
                    .col(double(Payments::Amount))
                    .col(string_len(Payments::Method, 100))
                    .col(
                        ColumnDef::new(Payments::Status)
                            .enumeration(PaymentStatus::Enum, payment_statuses())
                            .not_null()
                            .default("pending"),
                    )
                    .col(timestamp_with_time_zone_null(Payments::PaidAt))
                    .col(
                        timestamp_with_time_zone(Payments::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Payments::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_order_id")
                            .from(Payments::Table, Payments::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_user_id")
                            .from(Payments::Table, Payments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE payments ADD CONSTRAINT chk_payments_amount_positive CHECK (amount > 0)",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_order_id")
                    .table(Payments::Table)
                    .col(Payments::OrderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_user_id")
                    .table(Payments::Table)
                    .col(Payments::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_status_paid_at")
                    .table(Payments::Table)
                    .col(Payments::Status)
                    .col(Payments::PaidAt)
                    .to_owned(),
            )
            .await?;

        // Create shipment_status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(ShipmentStatus::Enum)
                    .values(shipment_statuses())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Shipments::Table)
                    .if_not_exists()
                    .col(pk_uuid(Shipments::Id))
                    .col(uuid(Shipments::OrderId))
                    .col(string_len_null(Shipments::Carrier, 100))
                    .col(string_len_null(Shipments::TrackingNumber, 100).unique_key())
                    .col(
                        ColumnDef::new(Shipments::Status)
                            .enumeration(ShipmentStatus::Enum, shipment_statuses())
                            .not_null()
                            .default("pending"),
                    )
                    .col(timestamp_with_time_zone_null(Shipments::ShippedAt))
                    .col(timestamp_with_time_zone_null(Shipments::DeliveredAt))
                    .col(
                        timestamp_with_time_zone(Shipments::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Shipments::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shipments_order_id")
                            .from(Shipments::Table, Shipments::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shipments_order_id")
                    .table(Shipments::Table)
                    .col(Shipments::OrderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Shipments::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ShipmentStatus::Enum).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(PaymentStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

fn payment_statuses() -> [PaymentStatus; 4] {
    [
        PaymentStatus::Pending,
        PaymentStatus::Completed,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ]
}

fn shipment_statuses() -> [ShipmentStatus; 4] {
    [
        ShipmentStatus::Pending,
        ShipmentStatus::Shipped,
        ShipmentStatus::Delivered,
        ShipmentStatus::Returned,
    ]
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    OrderId,
    UserId,
    Amount,
    Method,
    Status,
    PaidAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Shipments {
    Table,
    Id,
    OrderId,
    Carrier,
    TrackingNumber,
    Status,
    ShippedAt,
    DeliveredAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PaymentStatus {
    #[sea_orm(iden = "payment_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "completed")]
    Completed,
    #[sea_orm(iden = "failed")]
    Failed,
    #[sea_orm(iden = "refunded")]
    Refunded,
}

#[derive(DeriveIden)]
enum ShipmentStatus {
    #[sea_orm(iden = "shipment_status")]
    Enum,
    #[sea_orm(iden = "pending")]
    Pending,
    #[sea_orm(iden = "shipped")]
    Shipped,
    #[sea_orm(iden = "delivered")]
    Delivered,
    #[sea_orm(iden = "returned")]
    Returned,
}
