use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::config::AdminConfig;
use crate::entities::user_entity::{self as users, UserType};
use crate::error::{AppError, AppResult};
use crate::utils::{
    format_kenyan_phone, hash_password, normalize_email, normalize_id_number,
    validate_kenyan_phone, validate_password,
};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn find_user(&self, user_id: i32) -> AppResult<Option<users::Model>> {
        Ok(users::Entity::find_by_id(user_id).one(&self.pool).await?)
    }

    /// Creates the configured super admin unless a user with that email exists.
    ///
    /// Returns the new user, or `None` when nothing was created.
    pub async fn ensure_superuser(&self, admin: &AdminConfig) -> AppResult<Option<users::Model>> {
        if admin.email.trim().is_empty() {
            return Err(AppError::ConfigError("The Email field must be set".to_string()));
        }
        let email = normalize_email(&admin.email)?;

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            log::info!("Super admin {email} already exists");
            return Ok(None);
        }

        let id_number = normalize_id_number(&admin.id_number)?;
        let phone_number = format_kenyan_phone(&admin.phone_number);
        validate_kenyan_phone(&phone_number)?;
        validate_password(&admin.password)?;

        let user = users::ActiveModel {
            user_type: Set(UserType::SuperAdmin),
            id_number: Set(id_number),
            first_name: Set(admin.first_name.trim().to_string()),
            last_name: Set(admin.last_name.trim().to_string()),
            phone_number: Set(phone_number),
            email: Set(email),
            password: Set(hash_password(&admin.password)?),
            is_active: Set(true),
            is_verified: Set(true),
            is_staff: Set(true),
            credits: Set(0),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Created super admin user {}", user.id);
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_user, setup_db};

    fn admin_config(email: &str) -> AdminConfig {
        AdminConfig {
            email: email.to_string(),
            password: "matwana-admin".to_string(),
            first_name: "Admin".to_string(),
            last_name: "Admin".to_string(),
            id_number: "30000001".to_string(),
            phone_number: "0733000001".to_string(),
        }
    }

    #[actix_web::test]
    async fn test_ensure_superuser_creates_staff_super_admin() {
        let svc = UserService::new(setup_db().await);

        let admin = svc
            .ensure_superuser(&admin_config("Root@Matwana.co.ke"))
            .await
            .unwrap()
            .expect("created");
        assert_eq!(admin.user_type, UserType::SuperAdmin);
        assert_eq!(admin.email, "root@matwana.co.ke");
        assert_eq!(admin.phone_number, "+254733000001");
        assert!(admin.is_staff);

        let again = svc
            .ensure_superuser(&admin_config("root@matwana.co.ke"))
            .await
            .unwrap();
        assert!(again.is_none());
    }

    #[actix_web::test]
    async fn test_ensure_superuser_leaves_existing_email_alone() {
        let db = setup_db().await;
        let existing = create_user(&db, UserType::Passenger, 9, "password9").await;
        let svc = UserService::new(db);

        let created = svc.ensure_superuser(&admin_config(&existing.email)).await.unwrap();
        assert!(created.is_none());

        let still = svc.find_user(existing.id).await.unwrap().unwrap();
        assert_eq!(still.user_type, UserType::Passenger);
    }

    #[actix_web::test]
    async fn test_ensure_superuser_requires_email() {
        let svc = UserService::new(setup_db().await);
        let err = svc.ensure_superuser(&admin_config("  ")).await.unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
