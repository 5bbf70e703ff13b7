use chrono::{DateTime, Utc};
use sea_orm::ActiveValue;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::rules::{changed_user, ensure_user_role};
use super::users::UserType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "saccos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub registration_number: String,
    pub contact_person: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub address: String,
    pub logo: Option<String>,
    pub is_active: bool,
    pub date_registered: DateTime<Utc>,
    pub admin_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AdminId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    Admin,
    #[sea_orm(has_many = "super::matatus::Entity")]
    Matatus,
    #[sea_orm(has_many = "super::routes::Entity")]
    Routes,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admin.def()
    }
}

impl Related<super::matatus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matatus.def()
    }
}

impl Related<super::routes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Routes.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        ensure_user_role(db, "admin", changed_user(&self.admin_id), &[UserType::SaccoAdmin])
            .await?;
        if insert && self.date_registered.is_not_set() {
            self.date_registered = ActiveValue::Set(Utc::now());
        }
        Ok(self)
    }
}
