use std::collections::BTreeSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entities::{
    notification_entity as notifications, notification_recipients, notification_saccos,
    user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;

#[derive(Clone)]
pub struct NotificationService {
    pool: DatabaseConnection,
}

impl NotificationService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Stores a notification together with its recipient and sacco audiences.
    pub async fn publish(
        &self,
        created_by: i32,
        request: PublishNotificationRequest,
    ) -> AppResult<NotificationResponse> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(AppError::ValidationError("Title is required".to_string()));
        }
        if title.chars().count() > 200 {
            return Err(AppError::ValidationError(
                "Title must be at most 200 characters".to_string(),
            ));
        }
        if request.message.trim().is_empty() {
            return Err(AppError::ValidationError("Message is required".to_string()));
        }

        let recipients: BTreeSet<i32> = request.recipient_ids.into_iter().collect();
        let saccos: BTreeSet<i32> = request.sacco_ids.into_iter().collect();

        let txn = self.pool.begin().await?;

        let notification = notifications::ActiveModel {
            title: Set(title.to_string()),
            message: Set(request.message),
            notification_type: Set(request.notification_type),
            created_by_id: Set(created_by),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !recipients.is_empty() {
            let rows = recipients.iter().map(|&user_id| notification_recipients::ActiveModel {
                notification_id: Set(notification.id),
                user_id: Set(user_id),
            });
            notification_recipients::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }
        if !saccos.is_empty() {
            let rows = saccos.iter().map(|&sacco_id| notification_saccos::ActiveModel {
                notification_id: Set(notification.id),
                sacco_id: Set(sacco_id),
            });
            notification_saccos::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        log::info!(
            "Notification {} published by user {created_by} to {} users and {} saccos",
            notification.id,
            recipients.len(),
            saccos.len()
        );
        Ok(notification.into())
    }

    /// Active notifications addressed to the user, newest first.
    pub async fn inbox(&self, user: &users::Model) -> AppResult<Vec<NotificationResponse>> {
        let rows = user
            .find_related(notifications::Entity)
            .filter(notifications::Column::IsActive.eq(true))
            .order_by_desc(notifications::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::notification_entity::NotificationType;
    use crate::entities::user_entity::UserType;
    use crate::test_support::{create_user, setup_db};
    use sea_orm::{IntoActiveModel, PaginatorTrait};

    fn request(recipients: Vec<i32>, saccos: Vec<i32>) -> PublishNotificationRequest {
        PublishNotificationRequest {
            title: "Fare change".to_string(),
            message: "CBD to Rongai is now KES 120".to_string(),
            notification_type: NotificationType::PriceChange,
            recipient_ids: recipients,
            sacco_ids: saccos,
        }
    }

    #[actix_web::test]
    async fn test_publish_reaches_recipients_inbox() {
        let db = setup_db().await;
        let admin = create_user(&db, UserType::SuperAdmin, 1, "password1").await;
        let rider = create_user(&db, UserType::Passenger, 2, "password2").await;
        let other = create_user(&db, UserType::Passenger, 3, "password3").await;
        let sacco = NewSacco {
            name: "Super Metro".to_string(),
            registration_number: "SM-001".to_string(),
            contact_person: "Jane".to_string(),
            contact_phone: "+254711000000".to_string(),
            contact_email: "ops@supermetro.co.ke".to_string(),
            address: "Nairobi".to_string(),
            logo: None,
            is_active: true,
            admin_id: None,
        }
        .into_active_model()
        .insert(&db)
        .await
        .unwrap();
        let svc = NotificationService::new(db.clone());

        let published = svc
            .publish(admin.id, request(vec![rider.id, rider.id], vec![sacco.id]))
            .await
            .unwrap();
        assert_eq!(published.created_by_id, admin.id);

        let inbox = svc.inbox(&rider).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].title, "Fare change");
        assert!(svc.inbox(&other).await.unwrap().is_empty());

        let sacco_rows = notification_saccos::Entity::find().count(&db).await.unwrap();
        assert_eq!(sacco_rows, 1);
    }

    #[actix_web::test]
    async fn test_only_admins_publish() {
        let db = setup_db().await;
        let driver = create_user(&db, UserType::Driver, 4, "password4").await;
        let svc = NotificationService::new(db.clone());

        let err = svc.publish(driver.id, request(vec![], vec![])).await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(sea_orm::DbErr::Custom(_))));
        assert_eq!(notifications::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_unknown_recipient_rolls_back() {
        let db = setup_db().await;
        let admin = create_user(&db, UserType::SaccoAdmin, 5, "password5").await;
        let svc = NotificationService::new(db.clone());

        assert!(svc.publish(admin.id, request(vec![9999], vec![])).await.is_err());
        assert_eq!(notifications::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_blank_title_is_rejected() {
        let db = setup_db().await;
        let admin = create_user(&db, UserType::SuperAdmin, 6, "password6").await;
        let svc = NotificationService::new(db);

        let mut req = request(vec![], vec![]);
        req.title = "  ".to_string();
        assert!(matches!(
            svc.publish(admin.id, req).await,
            Err(AppError::ValidationError(_))
        ));
    }
}
