use sea_orm::{ActiveValue::Set, IntoActiveModel, NotSet};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::matatu_entity::{self, VehicleType};
use crate::entities::{route_entity, sacco_entity};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewSacco {
    pub name: String,
    pub registration_number: String,
    pub contact_person: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub address: String,
    pub logo: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Must reference a sacco admin.
    pub admin_id: Option<i32>,
}

impl IntoActiveModel<sacco_entity::ActiveModel> for NewSacco {
    fn into_active_model(self) -> sacco_entity::ActiveModel {
        sacco_entity::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            registration_number: Set(self.registration_number),
            contact_person: Set(self.contact_person),
            contact_phone: Set(self.contact_phone),
            contact_email: Set(self.contact_email),
            address: Set(self.address),
            logo: Set(self.logo),
            is_active: Set(self.is_active),
            date_registered: NotSet,
            admin_id: Set(self.admin_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewMatatu {
    pub plate_number: String,
    pub fleet_number: String,
    pub sacco_id: i32,
    #[serde(default = "default_vehicle_type")]
    pub vehicle_type: VehicleType,
    pub capacity: i32,
    pub qr_code: Option<String>,
    pub qr_code_data: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub current_driver_id: Option<i32>,
    pub current_conductor_id: Option<i32>,
}

fn default_vehicle_type() -> VehicleType {
    VehicleType::Minibus
}

impl IntoActiveModel<matatu_entity::ActiveModel> for NewMatatu {
    fn into_active_model(self) -> matatu_entity::ActiveModel {
        matatu_entity::ActiveModel {
            id: NotSet,
            plate_number: Set(self.plate_number),
            fleet_number: Set(self.fleet_number),
            sacco_id: Set(self.sacco_id),
            vehicle_type: Set(self.vehicle_type),
            capacity: Set(self.capacity),
            qr_code: Set(self.qr_code),
            qr_code_data: Set(self.qr_code_data),
            is_active: Set(self.is_active),
            registration_date: NotSet,
            current_driver_id: Set(self.current_driver_id),
            current_conductor_id: Set(self.current_conductor_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewRoute {
    pub name: String,
    pub start_point: String,
    pub end_point: String,
    pub distance_km: f64,
    pub estimated_duration_minutes: i32,
    /// Fare in cents.
    pub standard_fare: i64,
    pub sacco_id: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl IntoActiveModel<route_entity::ActiveModel> for NewRoute {
    fn into_active_model(self) -> route_entity::ActiveModel {
        route_entity::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            start_point: Set(self.start_point),
            end_point: Set(self.end_point),
            distance_km: Set(self.distance_km),
            estimated_duration_minutes: Set(self.estimated_duration_minutes),
            standard_fare: Set(self.standard_fare),
            sacco_id: Set(self.sacco_id),
            is_active: Set(self.is_active),
        }
    }
}
