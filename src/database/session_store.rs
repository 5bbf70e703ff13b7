//! Server-side session storage for `actix-session`.
//!
//! The cookie only carries a random session key; the session state lives in
//! the `sessions` table next to the rest of the data.

use std::collections::HashMap;

use actix_session::storage::{LoadError, SaveError, SessionKey, SessionStore, UpdateError};
use actix_web::cookie::time::Duration;
use chrono::Utc;
use rand::Rng;
use rand::distributions::Alphanumeric;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::database::DbPool;
use crate::entities::session_entity as sessions;

const SESSION_KEY_LEN: usize = 64;

type SessionState = HashMap<String, String>;

#[derive(Clone)]
pub struct DbSessionStore {
    pool: DbPool,
}

impl DbSessionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Deletes every expired session row and returns how many went.
    pub async fn purge_expired(&self) -> Result<u64, sea_orm::DbErr> {
        let res = sessions::Entity::delete_many()
            .filter(sessions::Column::ExpiresAt.lte(Utc::now()))
            .exec(&self.pool)
            .await?;
        Ok(res.rows_affected)
    }
}

fn generate_session_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_KEY_LEN)
        .map(char::from)
        .collect()
}

fn expiry(ttl: &Duration) -> chrono::DateTime<Utc> {
    Utc::now() + chrono::Duration::seconds(ttl.whole_seconds())
}

impl SessionStore for DbSessionStore {
    async fn load(&self, session_key: &SessionKey) -> Result<Option<SessionState>, LoadError> {
        let row = sessions::Entity::find_by_id(session_key.as_ref().to_string())
            .filter(sessions::Column::ExpiresAt.gt(Utc::now()))
            .one(&self.pool)
            .await
            .map_err(|e| LoadError::Other(e.into()))?;

        match row {
            Some(row) => {
                let state = serde_json::from_str(&row.state)
                    .map_err(|e| LoadError::Deserialization(e.into()))?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    async fn save(
        &self,
        session_state: SessionState,
        ttl: &Duration,
    ) -> Result<SessionKey, SaveError> {
        let state =
            serde_json::to_string(&session_state).map_err(|e| SaveError::Serialization(e.into()))?;
        let key = generate_session_key();

        sessions::ActiveModel {
            session_key: Set(key.clone()),
            state: Set(state),
            expires_at: Set(expiry(ttl)),
        }
        .insert(&self.pool)
        .await
        .map_err(|e| SaveError::Other(e.into()))?;

        SessionKey::try_from(key).map_err(|e| SaveError::Other(anyhow::anyhow!(e)))
    }

    async fn update(
        &self,
        session_key: SessionKey,
        session_state: SessionState,
        ttl: &Duration,
    ) -> Result<SessionKey, UpdateError> {
        let state = serde_json::to_string(&session_state)
            .map_err(|e| UpdateError::Serialization(e.into()))?;

        let res = sessions::Entity::update_many()
            .col_expr(sessions::Column::State, Expr::value(state))
            .col_expr(sessions::Column::ExpiresAt, Expr::value(expiry(ttl)))
            .filter(sessions::Column::SessionKey.eq(session_key.as_ref()))
            .exec(&self.pool)
            .await
            .map_err(|e| UpdateError::Other(e.into()))?;

        if res.rows_affected == 0 {
            // the row expired and was purged between load and update
            return self.save(session_state, ttl).await.map_err(|e| match e {
                SaveError::Serialization(e) => UpdateError::Serialization(e),
                SaveError::Other(e) => UpdateError::Other(e),
            });
        }

        Ok(session_key)
    }

    async fn update_ttl(&self, session_key: &SessionKey, ttl: &Duration) -> anyhow::Result<()> {
        sessions::Entity::update_many()
            .col_expr(sessions::Column::ExpiresAt, Expr::value(expiry(ttl)))
            .filter(sessions::Column::SessionKey.eq(session_key.as_ref()))
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, session_key: &SessionKey) -> anyhow::Result<()> {
        sessions::Entity::delete_by_id(session_key.as_ref().to_string())
            .exec(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_db;

    fn state(pairs: &[(&str, &str)]) -> SessionState {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_generated_keys_are_random_tokens() {
        let a = generate_session_key();
        let b = generate_session_key();
        assert_eq!(a.len(), SESSION_KEY_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[actix_web::test]
    async fn test_save_load_update_delete() {
        let store = DbSessionStore::new(setup_db().await);
        let ttl = Duration::hours(1);

        let key = store
            .save(state(&[("user_id", "7")]), &ttl)
            .await
            .unwrap();
        let loaded = store.load(&key).await.unwrap().unwrap();
        assert_eq!(loaded.get("user_id").map(String::as_str), Some("7"));

        let key = store
            .update(key, state(&[("user_id", "8")]), &ttl)
            .await
            .unwrap();
        let loaded = store.load(&key).await.unwrap().unwrap();
        assert_eq!(loaded.get("user_id").map(String::as_str), Some("8"));

        store.delete(&key).await.unwrap();
        assert!(store.load(&key).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_expired_sessions_are_invisible_and_purged() {
        let store = DbSessionStore::new(setup_db().await);

        let key = store
            .save(state(&[("user_id", "1")]), &Duration::seconds(-5))
            .await
            .unwrap();
        assert!(store.load(&key).await.unwrap().is_none());

        let live = store
            .save(state(&[("user_id", "2")]), &Duration::hours(1))
            .await
            .unwrap();

        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert!(store.load(&live).await.unwrap().is_some());
    }
}
