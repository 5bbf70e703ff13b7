use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QuerySelect, Set, SqlErr,
};

use crate::entities::user_entity::{self as users, UserType};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{hash_password, verify_password};

const ACCOUNT_NOT_FOUND: &str = "Account not found with that Email or ID";

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Registers a passenger. Field problems come back as `AppError::InvalidForm`.
    pub async fn signup(&self, form: &SignupForm) -> AppResult<users::Model> {
        let clean = form.clean().map_err(AppError::InvalidForm)?;

        let mut errors = FormErrors::default();
        if self.taken(users::Column::IdNumber, &clean.id_number).await? {
            errors.add("id_number", "A passenger with this ID number already exists.");
        }
        if self.taken(users::Column::PhoneNumber, &clean.phone_number).await? {
            errors.add("phone_number", "A user with this phone number already exists.");
        }
        if self.taken(users::Column::Email, &clean.email).await? {
            errors.add("email", "A passenger with this email already exists.");
        }
        if !errors.is_empty() {
            return Err(AppError::InvalidForm(errors));
        }

        let password = hash_password(&clean.password)?;
        let user = users::ActiveModel {
            user_type: Set(UserType::Passenger),
            id_number: Set(clean.id_number),
            first_name: Set(clean.first_name),
            last_name: Set(clean.last_name),
            phone_number: Set(clean.phone_number),
            email: Set(clean.email),
            password: Set(password),
            is_active: Set(true),
            is_verified: Set(false),
            is_staff: Set(false),
            credits: Set(0),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| match e.sql_err() {
            // lost a race with a concurrent signup
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::InvalidForm(FormErrors::single(
                NON_FIELD_ERRORS,
                "A user with these details already exists.",
            )),
            _ => AppError::from(e),
        })?;

        log::info!("New passenger registered: user {}", user.id);
        Ok(user)
    }

    /// Resolves the identifier and checks the password. Records `last_login` on success.
    pub async fn login(&self, form: &LoginForm) -> AppResult<users::Model> {
        let (identifier, password) = form.clean().map_err(AppError::InvalidForm)?;

        let mut matches = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::IdNumber.eq(identifier.as_str()))
                    .add(users::Column::Email.eq(identifier.to_lowercase()))
                    .add(users::Column::FirstName.eq(identifier.as_str())),
            )
            .limit(2)
            .all(&self.pool)
            .await?
            .into_iter();

        let user = match (matches.next(), matches.next()) {
            (Some(user), None) => user,
            (Some(_), Some(_)) => {
                log::warn!("Login identifier matched more than one account");
                return Err(not_found());
            }
            (None, _) => return Err(not_found()),
        };

        if !verify_password(&password, &user.password)? {
            log::warn!("Failed login for user {}", user.id);
            return Err(AppError::InvalidForm(FormErrors::single(
                "password",
                "Incorrect password",
            )));
        }

        let mut active = user.into_active_model();
        active.last_login = Set(Some(Utc::now()));
        let user = active.update(&self.pool).await?;

        log::info!("User {} logged in", user.id);
        Ok(user)
    }

    /// Validates the address. No mail is sent and the result never reveals
    /// whether an account exists.
    pub async fn forgot_password(&self, form: &ForgotPasswordForm) -> AppResult<()> {
        let email = form.clean().map_err(AppError::InvalidForm)?;
        log::info!("Password reset requested for {email}");
        Ok(())
    }

    async fn taken(&self, column: users::Column, value: &str) -> AppResult<bool> {
        let count = users::Entity::find()
            .filter(column.eq(value))
            .count(&self.pool)
            .await?;
        Ok(count > 0)
    }
}

fn not_found() -> AppError {
    AppError::InvalidForm(FormErrors::single("username", ACCOUNT_NOT_FOUND))
}
