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
pub enum PaymentMethod {
    #[sea_orm(string_value = "credits")]
    Credits,
    #[sea_orm(string_value = "mpesa")]
    Mpesa,
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "card")]
    Card,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "passenger_trips")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub passenger_id: i32,
    pub trip_id: i32,
    pub boarding_stop: String,
    pub alighting_stop: String,
    /// Cents.
    pub fare_paid: i64,
    pub payment_method: PaymentMethod,
    pub payment_reference: String,
    pub payment_qr_code: Option<String>,
    /// Cents.
    pub credits_earned: i64,
    pub is_paid: bool,
    pub boarded_at: Option<DateTime<Utc>>,
    pub alighted_at: Option<DateTime<Utc>>,
    pub transaction_time: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PassengerId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Passenger,
    #[sea_orm(
        belongs_to = "super::trips::Entity",
        from = "Column::TripId",
        to = "super::trips::Column::Id",
        on_delete = "Cascade"
    )]
    Trip,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Passenger.def()
    }
}

impl Related<super::trips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trip.def()
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
            "passenger",
            changed_required_user(&self.passenger_id),
            &[UserType::Passenger],
        )
        .await?;
        if insert && self.transaction_time.is_not_set() {
            self.transaction_time = ActiveValue::Set(Utc::now());
        }
        Ok(self)
    }
}
