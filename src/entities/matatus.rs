use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::rules::{changed_user, ensure_user_role};
use super::users::UserType;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    /// 14-seater
    #[sea_orm(string_value = "minibus")]
    Minibus,
    #[sea_orm(string_value = "shuttle")]
    Shuttle,
    #[sea_orm(string_value = "bus")]
    Bus,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matatus")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub plate_number: String,
    pub fleet_number: String,
    pub sacco_id: i32,
    pub vehicle_type: VehicleType,
    pub capacity: i32,
    pub qr_code: Option<String>,
    #[sea_orm(unique)]
    pub qr_code_data: String,
    pub is_active: bool,
    pub registration_date: DateTime<Utc>,
    pub current_driver_id: Option<i32>,
    pub current_conductor_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::saccos::Entity",
        from = "Column::SaccoId",
        to = "super::saccos::Column::Id",
        on_delete = "Cascade"
    )]
    Sacco,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CurrentDriverId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    CurrentDriver,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CurrentConductorId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    CurrentConductor,
    #[sea_orm(has_many = "super::trips::Entity")]
    Trips,
}

impl Related<super::saccos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sacco.def()
    }
}

impl Related<super::trips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trips.def()
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
            "current_driver",
            changed_user(&self.current_driver_id),
            &[UserType::Driver],
        )
        .await?;
        ensure_user_role(
            db,
            "current_conductor",
            changed_user(&self.current_conductor_id),
            &[UserType::Conductor],
        )
        .await?;
        if insert && self.registration_date.is_not_set() {
            self.registration_date = ActiveValue::Set(Utc::now());
        }
        Ok(self)
    }
}
