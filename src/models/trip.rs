use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::Set, IntoActiveModel, NotSet};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::passenger_trip_entity::{self, PaymentMethod};
use crate::entities::trip_entity::{self, TripStatus};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewTrip {
    pub matatu_id: i32,
    pub route_id: i32,
    pub driver_id: Option<i32>,
    pub conductor_id: Option<i32>,
    pub scheduled_departure: DateTime<Utc>,
    pub scheduled_arrival: DateTime<Utc>,
    pub actual_departure: Option<DateTime<Utc>>,
    pub actual_arrival: Option<DateTime<Utc>>,
    #[serde(default = "default_status")]
    pub status: TripStatus,
    pub current_location_lat: Option<f64>,
    pub current_location_lng: Option<f64>,
}

fn default_status() -> TripStatus {
    TripStatus::Scheduled
}

impl IntoActiveModel<trip_entity::ActiveModel> for NewTrip {
    fn into_active_model(self) -> trip_entity::ActiveModel {
        trip_entity::ActiveModel {
            id: NotSet,
            matatu_id: Set(self.matatu_id),
            route_id: Set(self.route_id),
            driver_id: Set(self.driver_id),
            conductor_id: Set(self.conductor_id),
            scheduled_departure: Set(self.scheduled_departure),
            actual_departure: Set(self.actual_departure),
            scheduled_arrival: Set(self.scheduled_arrival),
            actual_arrival: Set(self.actual_arrival),
            status: Set(self.status),
            current_location_lat: Set(self.current_location_lat),
            current_location_lng: Set(self.current_location_lng),
            created_at: NotSet,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewPassengerTrip {
    pub passenger_id: i32,
    pub trip_id: i32,
    pub boarding_stop: String,
    pub alighting_stop: String,
    /// Fare in cents.
    pub fare_paid: i64,
    pub payment_method: PaymentMethod,
    pub payment_reference: String,
    pub payment_qr_code: Option<String>,
    #[serde(default)]
    pub credits_earned: i64,
    #[serde(default)]
    pub is_paid: bool,
    pub boarded_at: Option<DateTime<Utc>>,
    pub alighted_at: Option<DateTime<Utc>>,
}

impl IntoActiveModel<passenger_trip_entity::ActiveModel> for NewPassengerTrip {
    fn into_active_model(self) -> passenger_trip_entity::ActiveModel {
        passenger_trip_entity::ActiveModel {
            id: NotSet,
            passenger_id: Set(self.passenger_id),
            trip_id: Set(self.trip_id),
            boarding_stop: Set(self.boarding_stop),
            alighting_stop: Set(self.alighting_stop),
            fare_paid: Set(self.fare_paid),
            payment_method: Set(self.payment_method),
            payment_reference: Set(self.payment_reference),
            payment_qr_code: Set(self.payment_qr_code),
            credits_earned: Set(self.credits_earned),
            is_paid: Set(self.is_paid),
            boarded_at: Set(self.boarded_at),
            alighted_at: Set(self.alighted_at),
            transaction_time: NotSet,
        }
    }
}
