use sea_orm_migration::prelude::*;

use crate::m20251201_000001_create_users::Users;

#[derive(DeriveIden)]
pub(crate) enum Saccos {
    Table,
    Id,
    Name,
    RegistrationNumber,
    ContactPerson,
    ContactPhone,
    ContactEmail,
    Address,
    Logo,
    IsActive,
    DateRegistered,
    AdminId,
}

#[derive(DeriveIden)]
pub(crate) enum Matatus {
    Table,
    Id,
    PlateNumber,
    FleetNumber,
    SaccoId,
    VehicleType,
    Capacity,
    QrCode,
    QrCodeData,
    IsActive,
    RegistrationDate,
    CurrentDriverId,
    CurrentConductorId,
}

#[derive(DeriveIden)]
pub(crate) enum Routes {
    Table,
    Id,
    Name,
    StartPoint,
    EndPoint,
    DistanceKm,
    EstimatedDurationMinutes,
    StandardFare,
    SaccoId,
    IsActive,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Saccos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Saccos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Saccos::Name)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Saccos::RegistrationNumber)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Saccos::ContactPerson)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Saccos::ContactPhone).string_len(15).not_null())
                    .col(
                        ColumnDef::new(Saccos::ContactEmail)
                            .string_len(254)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Saccos::Address).text().not_null())
                    .col(ColumnDef::new(Saccos::Logo).string_len(255).null())
                    .col(
                        ColumnDef::new(Saccos::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Saccos::DateRegistered)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Saccos::AdminId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saccos_admin")
                            .from(Saccos::Table, Saccos::AdminId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Matatus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Matatus::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Matatus::PlateNumber)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Matatus::FleetNumber).string_len(50).not_null())
                    .col(ColumnDef::new(Matatus::SaccoId).integer().not_null())
                    .col(
                        ColumnDef::new(Matatus::VehicleType)
                            .string_len(20)
                            .not_null()
                            .default("minibus"),
                    )
                    .col(ColumnDef::new(Matatus::Capacity).integer().not_null())
                    .col(ColumnDef::new(Matatus::QrCode).string_len(255).null())
                    .col(
                        ColumnDef::new(Matatus::QrCodeData)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Matatus::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Matatus::RegistrationDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Matatus::CurrentDriverId).integer().null())
                    .col(ColumnDef::new(Matatus::CurrentConductorId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matatus_sacco")
                            .from(Matatus::Table, Matatus::SaccoId)
                            .to(Saccos::Table, Saccos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matatus_current_driver")
                            .from(Matatus::Table, Matatus::CurrentDriverId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matatus_current_conductor")
                            .from(Matatus::Table, Matatus::CurrentConductorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Routes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Routes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Routes::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Routes::StartPoint).string_len(255).not_null())
                    .col(ColumnDef::new(Routes::EndPoint).string_len(255).not_null())
                    .col(ColumnDef::new(Routes::DistanceKm).double().not_null())
                    .col(
                        ColumnDef::new(Routes::EstimatedDurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Routes::StandardFare).big_integer().not_null())
                    .col(ColumnDef::new(Routes::SaccoId).integer().not_null())
                    .col(
                        ColumnDef::new(Routes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_routes_sacco")
                            .from(Routes::Table, Routes::SaccoId)
                            .to(Saccos::Table, Saccos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // unique (sacco_id, name)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_routes_sacco_name")
                    .table(Routes::Table)
                    .col(Routes::SaccoId)
                    .col(Routes::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Routes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Matatus::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Saccos::Table).to_owned())
            .await?;
        Ok(())
    }
}
