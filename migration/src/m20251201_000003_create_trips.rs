use sea_orm_migration::prelude::*;

use crate::m20251201_000001_create_users::Users;
use crate::m20251201_000002_create_fleet::{Matatus, Routes};

#[derive(DeriveIden)]
enum Trips {
    Table,
    Id,
    MatatuId,
    RouteId,
    DriverId,
    ConductorId,
    ScheduledDeparture,
    ActualDeparture,
    ScheduledArrival,
    ActualArrival,
    Status,
    CurrentLocationLat,
    CurrentLocationLng,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PassengerTrips {
    Table,
    Id,
    PassengerId,
    TripId,
    BoardingStop,
    AlightingStop,
    FarePaid,
    PaymentMethod,
    PaymentReference,
    PaymentQrCode,
    CreditsEarned,
    IsPaid,
    BoardedAt,
    AlightedAt,
    TransactionTime,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    PassengerId,
    PaymentType,
    Amount,
    TransactionId,
    PaymentMethod,
    Status,
    Description,
    CreatedAt,
    CompletedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trips::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Trips::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Trips::MatatuId).integer().not_null())
                    .col(ColumnDef::new(Trips::RouteId).integer().not_null())
                    .col(ColumnDef::new(Trips::DriverId).integer().null())
                    .col(ColumnDef::new(Trips::ConductorId).integer().null())
                    .col(
                        ColumnDef::new(Trips::ScheduledDeparture)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Trips::ActualDeparture)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Trips::ScheduledArrival)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Trips::ActualArrival)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Trips::Status)
                            .string_len(20)
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(ColumnDef::new(Trips::CurrentLocationLat).double().null())
                    .col(ColumnDef::new(Trips::CurrentLocationLng).double().null())
                    .col(
                        ColumnDef::new(Trips::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_matatu")
                            .from(Trips::Table, Trips::MatatuId)
                            .to(Matatus::Table, Matatus::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_route")
                            .from(Trips::Table, Trips::RouteId)
                            .to(Routes::Table, Routes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_driver")
                            .from(Trips::Table, Trips::DriverId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trips_conductor")
                            .from(Trips::Table, Trips::ConductorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PassengerTrips::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PassengerTrips::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PassengerTrips::PassengerId).integer().not_null())
                    .col(ColumnDef::new(PassengerTrips::TripId).integer().not_null())
                    .col(
                        ColumnDef::new(PassengerTrips::BoardingStop)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PassengerTrips::AlightingStop)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PassengerTrips::FarePaid)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PassengerTrips::PaymentMethod)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PassengerTrips::PaymentReference)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(PassengerTrips::PaymentQrCode)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PassengerTrips::CreditsEarned)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PassengerTrips::IsPaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PassengerTrips::BoardedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PassengerTrips::AlightedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PassengerTrips::TransactionTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_passenger_trips_passenger")
                            .from(PassengerTrips::Table, PassengerTrips::PassengerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_passenger_trips_trip")
                            .from(PassengerTrips::Table, PassengerTrips::TripId)
                            .to(Trips::Table, Trips::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // unique (passenger_id, trip_id)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_passenger_trips_passenger_trip")
                    .table(PassengerTrips::Table)
                    .col(PassengerTrips::PassengerId)
                    .col(PassengerTrips::TripId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::PassengerId).integer().not_null())
                    .col(ColumnDef::new(Payments::PaymentType).string_len(20).not_null())
                    .col(ColumnDef::new(Payments::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Payments::TransactionId)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Payments::PaymentMethod)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Payments::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Payments::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Payments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Payments::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payments_passenger")
                            .from(Payments::Table, Payments::PassengerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(PassengerTrips::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Trips::Table).to_owned())
            .await?;
        Ok(())
    }
}
