use actix_session::{SessionMiddleware, config::PersistentSession};
use actix_web::cookie::{Key, SameSite, time::Duration};
use actix_web::{App, HttpServer, middleware::Logger, web};
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use chrono::Local;  // timestamp in log lines

use matwana_backend::{
    config::Config,
    database::{DbSessionStore, create_pool, run_migrations},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
    tasks,
};

/// Cookie signing key from the configured secret, or a per-process one.
fn session_key(secret: &str) -> Key {
    match Key::try_from(secret.as_bytes()) {
        Ok(key) => key,
        Err(_) => {
            log::warn!(
                "Session secret missing or shorter than 64 bytes; sessions will not survive a restart"
            );
            Key::generate()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let auth_service = AuthService::new(pool.clone());
    let user_service = UserService::new(pool.clone());
    let notification_service = NotificationService::new(pool.clone());
    let backoffice_service = BackofficeService::new(pool.clone());
    let session_store = DbSessionStore::new(pool.clone());

    if let Some(admin) = &config.admin
        && let Err(e) = user_service.ensure_superuser(admin).await
    {
        log::error!("Failed to create super admin: {e}");
    }

    tasks::spawn_all(session_store.clone());

    let key = session_key(&config.session.secret);
    let session_config = config.session.clone();
    let cors_config = config.cors.clone();

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        let session = SessionMiddleware::builder(session_store.clone(), key.clone())
            .cookie_name(session_config.cookie_name.clone())
            .cookie_path("/".into())
            .cookie_secure(session_config.cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .session_lifecycle(
                PersistentSession::default()
                    .session_ttl(Duration::seconds(session_config.ttl_seconds)),
            )
            .build();

        App::new()
            .wrap(session)
            .wrap(Logger::default())
            .wrap(create_cors(&cors_config))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(notification_service.clone()))
            .app_data(web::Data::new(backoffice_service.clone()))
            .configure(swagger_config)
            .configure(handlers::auth_config)
            .configure(handlers::dashboard_config)
            .configure(handlers::backoffice_config)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
