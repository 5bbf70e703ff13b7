use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    #[sea_orm(string_value = "passenger")]
    Passenger,
    #[sea_orm(string_value = "conductor")]
    Conductor,
    #[sea_orm(string_value = "driver")]
    Driver,
    #[sea_orm(string_value = "sacco_admin")]
    SaccoAdmin,
    #[sea_orm(string_value = "super_admin")]
    SuperAdmin,
}

impl UserType {
    pub fn label(&self) -> &'static str {
        match self {
            UserType::Passenger => "Passenger",
            UserType::Conductor => "Conductor",
            UserType::Driver => "Driver",
            UserType::SaccoAdmin => "Sacco Admin",
            UserType::SuperAdmin => "Super Admin",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Passenger => write!(f, "passenger"),
            UserType::Conductor => write!(f, "conductor"),
            UserType::Driver => write!(f, "driver"),
            UserType::SaccoAdmin => write!(f, "sacco_admin"),
            UserType::SuperAdmin => write!(f, "super_admin"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_type: UserType,
    #[sea_orm(unique)]
    pub id_number: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub phone_number: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub profile_picture: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    /// Prepaid balance in cents.
    pub credits: i64,
}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::passenger_trips::Entity")]
    PassengerTrips,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::passenger_trips::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PassengerTrips.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        super::notification_recipients::Relation::Notification.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::notification_recipients::Relation::User.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.date_joined.is_not_set() {
            self.date_joined = ActiveValue::Set(Utc::now());
        }
        Ok(self)
    }
}
