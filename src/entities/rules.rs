//! Role rules for foreign keys that may only point at users of a given type.

use sea_orm::{ActiveValue, ConnectionTrait, DbErr, EntityTrait};

use super::users::{self, UserType};

/// Checks that `user_id` (when present) refers to a user whose type is one of `allowed`.
///
/// The error is a `DbErr::Custom` carrying a field-scoped message so the
/// caller can surface it as a validation failure.
pub async fn ensure_user_role<C>(
    db: &C,
    field: &str,
    user_id: Option<i32>,
    allowed: &[UserType],
) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let Some(user_id) = user_id else {
        return Ok(());
    };

    let user = users::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::Custom(format!("{field}: user {user_id} does not exist")))?;

    if allowed.contains(&user.user_type) {
        Ok(())
    } else {
        let expected = allowed
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" or ");
        Err(DbErr::Custom(format!(
            "{field}: user {user_id} must be a {expected}, not a {}",
            user.user_type
        )))
    }
}

/// The user id a nullable foreign key is about to be written with.
///
/// Only `Set` values are returned; unchanged keys were checked when they were written.
pub fn changed_user(value: &ActiveValue<Option<i32>>) -> Option<i32> {
    match value {
        ActiveValue::Set(v) => *v,
        _ => None,
    }
}

/// Same as [`changed_user`] for non-nullable foreign keys.
pub fn changed_required_user(value: &ActiveValue<i32>) -> Option<i32> {
    match value {
        ActiveValue::Set(v) => Some(*v),
        _ => None,
    }
}
