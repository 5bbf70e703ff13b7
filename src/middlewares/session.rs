//! Session helpers so handlers deal in user ids and flash messages
//! instead of raw session keys.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::error::{AppError, AppResult};
use crate::models::{FlashLevel, FlashMessage};

pub(crate) const USER_ID_KEY: &str = "user_id";
const MESSAGES_KEY: &str = "_messages";

#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Starts an authenticated session under a fresh key.
    pub fn log_in(&self, user_id: i32) -> AppResult<()> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id)
            .map_err(|e| AppError::SessionError(format!("failed to persist session: {e}")))
    }

    /// An unreadable id counts as anonymous.
    pub fn user_id(&self) -> Option<i32> {
        match self.0.get::<i32>(USER_ID_KEY) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("Unreadable user id in session: {e}");
                None
            }
        }
    }

    /// Drops all state and the old server-side row. Messages flashed
    /// afterwards travel in the replacement session.
    pub fn reset(&self) {
        self.0.clear();
        self.0.renew();
    }

    pub fn flash(&self, level: FlashLevel, text: impl Into<String>) -> AppResult<()> {
        let mut messages = self.pending_messages()?;
        messages.push(FlashMessage::new(level, text));
        self.0
            .insert(MESSAGES_KEY, messages)
            .map_err(|e| AppError::SessionError(format!("failed to store message: {e}")))
    }

    pub fn success(&self, text: impl Into<String>) -> AppResult<()> {
        self.flash(FlashLevel::Success, text)
    }

    pub fn error(&self, text: impl Into<String>) -> AppResult<()> {
        self.flash(FlashLevel::Error, text)
    }

    /// Removes and returns every queued message.
    pub fn take_messages(&self) -> AppResult<Vec<FlashMessage>> {
        let messages = self.pending_messages()?;
        if !messages.is_empty() {
            self.0.remove(MESSAGES_KEY);
        }
        Ok(messages)
    }

    fn pending_messages(&self) -> AppResult<Vec<FlashMessage>> {
        self.0
            .get::<Vec<FlashMessage>>(MESSAGES_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|e| AppError::SessionError(format!("failed to read messages: {e}")))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn cookie_session() -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_name("sessionid".to_owned())
            .cookie_secure(false)
            .build()
    }

    #[actix_web::test]
    async fn test_user_id_and_messages_survive_requests() {
        let app = test::init_service(
            App::new()
                .wrap(cookie_session())
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.log_in(7)?;
                        session.success("Welcome")?;
                        Ok::<_, AppError>(HttpResponse::Ok().finish())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let id = session.user_id();
                        let messages = session.take_messages()?;
                        Ok::<_, AppError>(HttpResponse::Ok().json((id, messages)))
                    }),
                ),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == "sessionid")
            .expect("session cookie")
            .into_owned();

        let req = test::TestRequest::get().uri("/get").cookie(cookie).to_request();
        let (id, messages): (Option<i32>, Vec<FlashMessage>) =
            test::call_and_read_body_json(&app, req).await;
        assert_eq!(id, Some(7));
        assert_eq!(messages, vec![FlashMessage::new(FlashLevel::Success, "Welcome")]);
    }

    #[actix_web::test]
    async fn test_reset_keeps_later_messages_only() {
        let app = test::init_service(
            App::new().wrap(cookie_session()).route(
                "/reset",
                web::get().to(|session: SessionContext| async move {
                    session.log_in(3)?;
                    session.success("stale")?;
                    session.reset();
                    session.success("You have been logged out successfully.")?;
                    let id = session.user_id();
                    let messages = session.take_messages()?;
                    Ok::<_, AppError>(HttpResponse::Ok().json((id, messages)))
                }),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/reset").to_request();
        let (id, messages): (Option<i32>, Vec<FlashMessage>) =
            test::call_and_read_body_json(&app, req).await;
        assert_eq!(id, None);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "You have been logged out successfully.");
    }

    #[actix_web::test]
    async fn test_unreadable_user_id_is_anonymous() {
        let app = test::init_service(
            App::new().wrap(cookie_session()).route(
                "/",
                web::get().to(|session: SessionContext| async move {
                    session.0.insert(USER_ID_KEY, "not-a-number")?;
                    Ok::<_, actix_web::Error>(HttpResponse::Ok().json(session.user_id()))
                }),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let id: Option<i32> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(id, None);
    }
}
