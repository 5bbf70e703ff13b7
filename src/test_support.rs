//! Shared fixtures for the in-crate tests.

use actix_http::Request;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use bcrypt::hash;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

use crate::database::DbSessionStore;
use crate::entities::user_entity::{self as users, UserType};
use crate::handlers;
use crate::services::{AuthService, BackofficeService, NotificationService, UserService};

pub const SESSION_COOKIE: &str = "sessionid";

/// Fresh in-memory SQLite database with every migration applied.
///
/// A single connection keeps the whole test on the same in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// Inserts a user of the given type. `n` keeps the unique fields apart.
pub async fn create_user(
    db: &DatabaseConnection,
    user_type: UserType,
    n: u32,
    password: &str,
) -> users::Model {
    users::ActiveModel {
        user_type: Set(user_type),
        id_number: Set(format!("{:08}", 10_000_000 + n)),
        first_name: Set(format!("User{n}")),
        last_name: Set("Test".to_string()),
        phone_number: Set(format!("+254700{:06}", n)),
        email: Set(format!("user{n}@example.com")),
        // low cost keeps the suite fast
        password: Set(hash(password, 4).expect("hash fixture password")),
        is_staff: Set(user_type == UserType::SuperAdmin),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert fixture user")
}

/// Server-side sessions on the test database with a throwaway key.
pub fn session_middleware(db: DatabaseConnection) -> SessionMiddleware<DbSessionStore> {
    SessionMiddleware::builder(DbSessionStore::new(db), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Services and routes as the server wires them.
pub fn app_config(db: DatabaseConnection) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(AuthService::new(db.clone())))
            .app_data(web::Data::new(UserService::new(db.clone())))
            .app_data(web::Data::new(NotificationService::new(db.clone())))
            .app_data(web::Data::new(BackofficeService::new(db)))
            .configure(handlers::auth_config)
            .configure(handlers::dashboard_config)
            .configure(handlers::backoffice_config);
    }
}

pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .expect("session cookie")
        .into_owned()
}

/// Logs in through the form and returns the authenticated session cookie.
pub async fn log_in(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
    password: &str,
) -> Cookie<'static> {
    let req = test::TestRequest::post()
        .uri("/login/")
        .set_form([("username", username), ("password", password)])
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER, "login as {username}");
    session_cookie(&res)
}
