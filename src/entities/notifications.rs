use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::rules::{changed_required_user, ensure_user_role};
use super::users::UserType;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    #[sea_orm(string_value = "price_change")]
    PriceChange,
    #[sea_orm(string_value = "system")]
    System,
    #[sea_orm(string_value = "promotion")]
    Promotion,
    #[sea_orm(string_value = "trip_update")]
    TripUpdate,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub notification_type: NotificationType,
    pub created_by_id: i32,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedById",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    CreatedBy,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::notification_recipients::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::notification_recipients::Relation::Notification.def().rev())
    }
}

impl Related<super::saccos::Entity> for Entity {
    fn to() -> RelationDef {
        super::notification_saccos::Relation::Sacco.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::notification_saccos::Relation::Notification.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        ensure_user_role(
            db,
            "created_by",
            changed_required_user(&self.created_by_id),
            &[UserType::SuperAdmin, UserType::SaccoAdmin],
        )
        .await?;
        if insert && self.created_at.is_not_set() {
            self.created_at = ActiveValue::Set(Utc::now());
        }
        Ok(self)
    }
}
