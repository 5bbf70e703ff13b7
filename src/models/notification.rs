use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::notification_entity::{self, NotificationType};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublishNotificationRequest {
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    #[serde(default)]
    pub recipient_ids: Vec<i32>,
    #[serde(default)]
    pub sacco_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponse {
    pub id: i32,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub created_by_id: i32,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<notification_entity::Model> for NotificationResponse {
    fn from(n: notification_entity::Model) -> Self {
        Self {
            id: n.id,
            title: n.title,
            message: n.message,
            notification_type: n.notification_type,
            created_by_id: n.created_by_id,
            created_at: n.created_at,
            is_active: n.is_active,
        }
    }
}
