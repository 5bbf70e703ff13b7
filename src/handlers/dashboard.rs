use actix_web::{HttpResponse, ResponseError, Result, web};

use super::page::{DASHBOARD_PATH, LOGIN_PATH, redirect, render};
use crate::entities::user_entity as users;
use crate::error::AppResult;
use crate::middlewares::SessionContext;
use crate::models::*;
use crate::services::{NotificationService, UserService};

/// The session's user, or the redirect that replaces the page.
pub(crate) async fn require_user(
    session: &SessionContext,
    user_service: &UserService,
) -> Result<users::Model, HttpResponse> {
    match session_user(session, user_service).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(redirect(LOGIN_PATH)),
        Err(e) => Err(e.error_response()),
    }
}

async fn session_user(
    session: &SessionContext,
    user_service: &UserService,
) -> AppResult<Option<users::Model>> {
    let Some(user_id) = session.user_id() else {
        session.error("Please login to access dashboard")?;
        return Ok(None);
    };
    let user = user_service.find_user(user_id).await?;
    if user.is_none() {
        log::warn!("Session refers to missing user {user_id}");
        session.reset();
        session.error("User not found")?;
    }
    Ok(user)
}

async fn render_dashboard(
    session: &SessionContext,
    notification_service: &NotificationService,
    dashboard: Dashboard,
    user: users::Model,
) -> AppResult<HttpResponse> {
    let notifications = notification_service.inbox(&user).await?;
    let context = DashboardContext {
        role: user.user_type.label().to_string(),
        user: user.into(),
        notifications,
    };
    render(session, dashboard.template(), serde_json::to_value(context)?)
}

async fn role_dashboard(
    dashboard: Dashboard,
    session: SessionContext,
    user_service: web::Data<UserService>,
    notification_service: web::Data<NotificationService>,
) -> Result<HttpResponse> {
    let user = match require_user(&session, &user_service).await {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if !dashboard.admits(user.user_type) {
        log::warn!(
            "User {} ({}) refused access to {}",
            user.id,
            user.user_type,
            dashboard.template()
        );
        session.error("You do not have access to that page")?;
        return Ok(redirect(DASHBOARD_PATH));
    }

    match render_dashboard(&session, &notification_service, dashboard, user).await {
        Ok(response) => Ok(response),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/dashboard/",
    tag = "dashboard",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Dashboard for the session user's role", body = Page),
        (status = 303, description = "No valid session, redirect to login")
    )
)]
pub async fn dashboard(
    session: SessionContext,
    user_service: web::Data<UserService>,
    notification_service: web::Data<NotificationService>,
) -> Result<HttpResponse> {
    let user = match require_user(&session, &user_service).await {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let dashboard = Dashboard::for_user_type(user.user_type);
    match render_dashboard(&session, &notification_service, dashboard, user).await {
        Ok(response) => Ok(response),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/passenger/",
    tag = "dashboard",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Passenger dashboard", body = Page),
        (status = 303, description = "Redirect to login or to the user's own dashboard")
    )
)]
pub async fn passenger(
    session: SessionContext,
    user_service: web::Data<UserService>,
    notification_service: web::Data<NotificationService>,
) -> Result<HttpResponse> {
    role_dashboard(Dashboard::Passenger, session, user_service, notification_service).await
}

#[utoipa::path(
    get,
    path = "/conductor/",
    tag = "dashboard",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Conductor dashboard", body = Page),
        (status = 303, description = "Redirect to login or to the user's own dashboard")
    )
)]
pub async fn conductor(
    session: SessionContext,
    user_service: web::Data<UserService>,
    notification_service: web::Data<NotificationService>,
) -> Result<HttpResponse> {
    role_dashboard(Dashboard::Conductor, session, user_service, notification_service).await
}

#[utoipa::path(
    get,
    path = "/driver/",
    tag = "dashboard",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Driver dashboard", body = Page),
        (status = 303, description = "Redirect to login or to the user's own dashboard")
    )
)]
pub async fn driver(
    session: SessionContext,
    user_service: web::Data<UserService>,
    notification_service: web::Data<NotificationService>,
) -> Result<HttpResponse> {
    role_dashboard(Dashboard::Driver, session, user_service, notification_service).await
}

#[utoipa::path(
    get,
    path = "/sacco/",
    tag = "dashboard",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Sacco admin dashboard", body = Page),
        (status = 303, description = "Redirect to login or to the user's own dashboard")
    )
)]
pub async fn sacco(
    session: SessionContext,
    user_service: web::Data<UserService>,
    notification_service: web::Data<NotificationService>,
) -> Result<HttpResponse> {
    role_dashboard(Dashboard::Sacco, session, user_service, notification_service).await
}

#[utoipa::path(
    get,
    path = "/admin/",
    tag = "dashboard",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Super admin dashboard", body = Page),
        (status = 303, description = "Redirect to login or to the user's own dashboard")
    )
)]
pub async fn admin(
    session: SessionContext,
    user_service: web::Data<UserService>,
    notification_service: web::Data<NotificationService>,
) -> Result<HttpResponse> {
    role_dashboard(Dashboard::Admin, session, user_service, notification_service).await
}

pub fn dashboard_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard/", web::get().to(dashboard))
        .route("/passenger/", web::get().to(passenger))
        .route("/conductor/", web::get().to(conductor))
        .route("/driver/", web::get().to(driver))
        .route("/sacco/", web::get().to(sacco))
        .route("/admin/", web::get().to(admin));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user_entity::UserType;
    use crate::test_support::{app_config, create_user, log_in, session_middleware, setup_db};
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use sea_orm::{EntityTrait, ModelTrait};
    use serde_json::Value;

    fn location(res: &actix_web::dev::ServiceResponse) -> &str {
        res.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn test_dashboard_requires_login() {
        let db = setup_db().await;
        let app = test::init_service(
            App::new()
                .wrap(session_middleware(db.clone()))
                .configure(app_config(db)),
        )
        .await;

        let req = test::TestRequest::get().uri("/dashboard/").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), LOGIN_PATH);
        let cookie = crate::test_support::session_cookie(&res);

        let req = test::TestRequest::get().uri("/login/").cookie(cookie).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["messages"][0]["text"], "Please login to access dashboard");
        assert_eq!(body["data"]["messages"][0]["level"], "error");
    }

    #[actix_web::test]
    async fn test_dashboard_renders_the_users_role() {
        let db = setup_db().await;
        let driver = create_user(&db, UserType::Driver, 1, "password1").await;
        let app = test::init_service(
            App::new()
                .wrap(session_middleware(db.clone()))
                .configure(app_config(db)),
        )
        .await;
        let cookie = log_in(&app, &driver.id_number, "password1").await;

        let req = test::TestRequest::get().uri("/dashboard/").cookie(cookie.clone()).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["template"], "driver/dashboard.html");
        assert_eq!(body["data"]["context"]["user"]["id"], driver.id);
        assert_eq!(body["data"]["context"]["role"], "Driver");
        assert!(body["data"]["context"]["user"].get("password").is_none());

        let req = test::TestRequest::get().uri("/driver/").cookie(cookie).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["data"]["template"], "driver/dashboard.html");
    }

    #[actix_web::test]
    async fn test_role_mismatch_redirects_to_own_dashboard() {
        let db = setup_db().await;
        let conductor = create_user(&db, UserType::Conductor, 2, "password2").await;
        let app = test::init_service(
            App::new()
                .wrap(session_middleware(db.clone()))
                .configure(app_config(db)),
        )
        .await;
        let cookie = log_in(&app, &conductor.email, "password2").await;

        for path in ["/sacco/", "/admin/", "/driver/", "/passenger/"] {
            let req = test::TestRequest::get().uri(path).cookie(cookie.clone()).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::SEE_OTHER, "{path}");
            assert_eq!(location(&res), DASHBOARD_PATH);
        }

        let req = test::TestRequest::get().uri("/dashboard/").cookie(cookie).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["template"], "conductor/dashboard.html");
        assert_eq!(
            body["data"]["messages"][0]["text"],
            "You do not have access to that page"
        );
    }

    #[actix_web::test]
    async fn test_super_admin_opens_every_dashboard() {
        let db = setup_db().await;
        let root = create_user(&db, UserType::SuperAdmin, 3, "password3").await;
        let app = test::init_service(
            App::new()
                .wrap(session_middleware(db.clone()))
                .configure(app_config(db)),
        )
        .await;
        let cookie = log_in(&app, &root.email, "password3").await;

        for (path, template) in [
            ("/passenger/", "passenger/dashboard.html"),
            ("/conductor/", "conductor/dashboard.html"),
            ("/driver/", "driver/dashboard.html"),
            ("/sacco/", "sacco/dashboard.html"),
            ("/admin/", "admin/dashboard.html"),
        ] {
            let req = test::TestRequest::get().uri(path).cookie(cookie.clone()).to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["data"]["template"], template);
        }
    }

    #[actix_web::test]
    async fn test_deleted_user_session_is_dropped() {
        let db = setup_db().await;
        let rider = create_user(&db, UserType::Passenger, 4, "password4").await;
        let app = test::init_service(
            App::new()
                .wrap(session_middleware(db.clone()))
                .configure(app_config(db.clone())),
        )
        .await;
        let cookie = log_in(&app, &rider.id_number, "password4").await;

        let found = users::Entity::find_by_id(rider.id).one(&db).await.unwrap().unwrap();
        found.delete(&db).await.unwrap();

        let req = test::TestRequest::get().uri("/passenger/").cookie(cookie).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), LOGIN_PATH);
        let fresh = crate::test_support::session_cookie(&res);

        let req = test::TestRequest::get().uri("/login/").cookie(fresh).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["messages"][0]["text"], "User not found");
    }
}
