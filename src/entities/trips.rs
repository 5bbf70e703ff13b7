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
pub enum TripStatus {
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub matatu_id: i32,
    pub route_id: i32,
    pub driver_id: Option<i32>,
    pub conductor_id: Option<i32>,
    pub scheduled_departure: DateTime<Utc>,
    pub actual_departure: Option<DateTime<Utc>>,
    pub scheduled_arrival: DateTime<Utc>,
    pub actual_arrival: Option<DateTime<Utc>>,
    pub status: TripStatus,
    pub current_location_lat: Option<f64>,
    pub current_location_lng: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matatus::Entity",
        from = "Column::MatatuId",
        to = "super::matatus::Column::Id",
        on_delete = "Cascade"
    )]
    Matatu,
    #[sea_orm(
        belongs_to = "super::routes::Entity",
        from = "Column::RouteId",
        to = "super::routes::Column::Id",
        on_delete = "Cascade"
    )]
    Route,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::DriverId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    Driver,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ConductorId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    Conductor,
    #[sea_orm(has_many = "super::passenger_trips::Entity")]
    PassengerTrips,
}

impl Related<super::matatus::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matatu.def()
    }
}

impl Related<super::routes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Route.def()
    }
}

impl Related<super::passenger_trips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PassengerTrips.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        ensure_user_role(db, "driver", changed_user(&self.driver_id), &[UserType::Driver]).await?;
        ensure_user_role(
            db,
            "conductor",
            changed_user(&self.conductor_id),
            &[UserType::Conductor],
        )
        .await?;
        if insert && self.created_at.is_not_set() {
            self.created_at = ActiveValue::Set(Utc::now());
        }
        Ok(self)
    }
}
