use sea_orm_migration::prelude::*;

use crate::m20251201_000001_create_users::Users;
use crate::m20251201_000002_create_fleet::Saccos;

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    Title,
    Message,
    NotificationType,
    CreatedById,
    CreatedAt,
    IsActive,
}

#[derive(DeriveIden)]
enum NotificationRecipients {
    Table,
    NotificationId,
    UserId,
}

#[derive(DeriveIden)]
enum NotificationSaccos {
    Table,
    NotificationId,
    SaccoId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(
                        ColumnDef::new(Notifications::NotificationType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::CreatedById).integer().not_null())
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notifications_created_by")
                            .from(Notifications::Table, Notifications::CreatedById)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NotificationRecipients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NotificationRecipients::NotificationId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NotificationRecipients::UserId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(NotificationRecipients::NotificationId)
                            .col(NotificationRecipients::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_recipients_notification")
                            .from(
                                NotificationRecipients::Table,
                                NotificationRecipients::NotificationId,
                            )
                            .to(Notifications::Table, Notifications::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_recipients_user")
                            .from(NotificationRecipients::Table, NotificationRecipients::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NotificationSaccos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NotificationSaccos::NotificationId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(NotificationSaccos::SaccoId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(NotificationSaccos::NotificationId)
                            .col(NotificationSaccos::SaccoId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_saccos_notification")
                            .from(NotificationSaccos::Table, NotificationSaccos::NotificationId)
                            .to(Notifications::Table, Notifications::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_saccos_sacco")
                            .from(NotificationSaccos::Table, NotificationSaccos::SaccoId)
                            .to(Saccos::Table, Saccos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(NotificationSaccos::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(NotificationRecipients::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Notifications::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
