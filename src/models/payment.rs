use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::Set, IntoActiveModel, NotSet};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::payment_entity::{self, PaymentStatus, PaymentType};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewPayment {
    pub passenger_id: i32,
    pub payment_type: PaymentType,
    /// Amount in cents.
    pub amount: i64,
    pub transaction_id: String,
    pub payment_method: String,
    #[serde(default = "default_status")]
    pub status: PaymentStatus,
    #[serde(default)]
    pub description: String,
    pub completed_at: Option<DateTime<Utc>>,
}

fn default_status() -> PaymentStatus {
    PaymentStatus::Pending
}

impl IntoActiveModel<payment_entity::ActiveModel> for NewPayment {
    fn into_active_model(self) -> payment_entity::ActiveModel {
        payment_entity::ActiveModel {
            id: NotSet,
            passenger_id: Set(self.passenger_id),
            payment_type: Set(self.payment_type),
            amount: Set(self.amount),
            transaction_id: Set(self.transaction_id),
            payment_method: Set(self.payment_method),
            status: Set(self.status),
            description: Set(self.description),
            created_at: NotSet,
            completed_at: Set(self.completed_at),
        }
    }
}
