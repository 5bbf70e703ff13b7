use std::collections::HashMap;

use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::entities::user_entity::{self as users, UserType};
use crate::error::{AppError, AppResult};
use crate::middlewares::SessionContext;
use crate::models::*;
use crate::services::{BackofficeService, NotificationService, UserService};

/// Staff members and super admins only.
async fn require_staff(
    session: &SessionContext,
    user_service: &UserService,
) -> AppResult<users::Model> {
    let user_id = session
        .user_id()
        .ok_or_else(|| AppError::AuthError("Login required".to_string()))?;
    let user = user_service
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::AuthError("Login required".to_string()))?;
    if !(user.is_staff || user.user_type == UserType::SuperAdmin) {
        log::warn!("User {} is not allowed into the back-office", user.id);
        return Err(AppError::Forbidden);
    }
    Ok(user)
}

#[utoipa::path(
    get,
    path = "/backoffice/",
    tag = "backoffice",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Registered models with their list configuration"),
        (status = 401, description = "No session"),
        (status = 403, description = "Not staff")
    )
)]
pub async fn index(
    session: SessionContext,
    user_service: web::Data<UserService>,
    backoffice_service: web::Data<BackofficeService>,
) -> Result<HttpResponse> {
    if let Err(e) = require_staff(&session, &user_service).await {
        return Ok(e.error_response());
    }
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": backoffice_service.registrations()
    })))
}

#[utoipa::path(
    get,
    path = "/backoffice/{model}/",
    tag = "backoffice",
    security(("session_cookie" = [])),
    params(
        ("model" = String, Path, description = "Registered model name, e.g. matatus"),
        ("page" = Option<u64>, Query, description = "1-based page"),
        ("per_page" = Option<u64>, Query, description = "Rows per page, at most 100"),
        ("q" = Option<String>, Query, description = "Substring searched across the search fields")
    ),
    responses(
        (status = 200, description = "Paginated rows projected to the display fields"),
        (status = 400, description = "Unknown filter or bad value"),
        (status = 404, description = "Unknown model")
    )
)]
pub async fn list(
    session: SessionContext,
    user_service: web::Data<UserService>,
    backoffice_service: web::Data<BackofficeService>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse> {
    if let Err(e) = require_staff(&session, &user_service).await {
        return Ok(e.error_response());
    }
    let (model, query) = match path
        .parse::<AdminModel>()
        .and_then(|model| Ok((model, ListQuery::from_params(query.into_inner())?)))
    {
        Ok(parsed) => parsed,
        Err(e) => return Ok(e.error_response()),
    };

    match backoffice_service.list(model, &query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/backoffice/{model}/{id}/",
    tag = "backoffice",
    security(("session_cookie" = [])),
    params(
        ("model" = String, Path, description = "Registered model name"),
        ("id" = i32, Path, description = "Row id")
    ),
    responses(
        (status = 200, description = "The row"),
        (status = 404, description = "Unknown model or row")
    )
)]
pub async fn detail(
    session: SessionContext,
    user_service: web::Data<UserService>,
    backoffice_service: web::Data<BackofficeService>,
    path: web::Path<(String, i32)>,
) -> Result<HttpResponse> {
    if let Err(e) = require_staff(&session, &user_service).await {
        return Ok(e.error_response());
    }
    let (name, id) = path.into_inner();
    let model = match name.parse::<AdminModel>() {
        Ok(model) => model,
        Err(e) => return Ok(e.error_response()),
    };

    match backoffice_service.get(model, id).await {
        Ok(row) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": row
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/backoffice/{model}/",
    tag = "backoffice",
    security(("session_cookie" = [])),
    params((
        "model" = String,
        Path,
        description = "saccos, matatus, routes, trips, passenger_trips or payments; \
                       the JSON body is the matching New* schema"
    )),
    responses(
        (status = 201, description = "Created row"),
        (status = 400, description = "Invalid body or role rule violated"),
        (status = 409, description = "Unique value already taken")
    )
)]
pub async fn create(
    session: SessionContext,
    user_service: web::Data<UserService>,
    backoffice_service: web::Data<BackofficeService>,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse> {
    if let Err(e) = require_staff(&session, &user_service).await {
        return Ok(e.error_response());
    }
    let model = match path.parse::<AdminModel>() {
        Ok(model) => model,
        Err(e) => return Ok(e.error_response()),
    };

    match backoffice_service.create(model, body.into_inner()).await {
        Ok(row) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": row
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/backoffice/{model}/{id}/",
    tag = "backoffice",
    security(("session_cookie" = [])),
    params(
        ("model" = String, Path, description = "Registered model name"),
        ("id" = i32, Path, description = "Row id")
    ),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Unknown model or row")
    )
)]
pub async fn delete(
    session: SessionContext,
    user_service: web::Data<UserService>,
    backoffice_service: web::Data<BackofficeService>,
    path: web::Path<(String, i32)>,
) -> Result<HttpResponse> {
    let staff = match require_staff(&session, &user_service).await {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };
    let (name, id) = path.into_inner();
    let model = match name.parse::<AdminModel>() {
        Ok(model) => model,
        Err(e) => return Ok(e.error_response()),
    };

    match backoffice_service.delete(model, id).await {
        Ok(()) => {
            log::info!("User {} deleted {} {id}", staff.id, model.as_str());
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Deleted"
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/backoffice/notifications/publish/",
    tag = "backoffice",
    security(("session_cookie" = [])),
    request_body = PublishNotificationRequest,
    responses(
        (status = 201, description = "Notification published", body = NotificationResponse),
        (status = 400, description = "Invalid notification or creator role")
    )
)]
pub async fn publish_notification(
    session: SessionContext,
    user_service: web::Data<UserService>,
    notification_service: web::Data<NotificationService>,
    request: web::Json<PublishNotificationRequest>,
) -> Result<HttpResponse> {
    let staff = match require_staff(&session, &user_service).await {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match notification_service.publish(staff.id, request.into_inner()).await {
        Ok(notification) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": notification
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn backoffice_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/backoffice")
            .route("/", web::get().to(index))
            .route("/notifications/publish/", web::post().to(publish_notification))
            .route("/{model}/", web::get().to(list))
            .route("/{model}/", web::post().to(create))
            .route("/{model}/{id}/", web::get().to(detail))
            .route("/{model}/{id}/", web::delete().to(delete)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app_config, create_user, log_in, session_middleware, setup_db};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_backoffice_is_staff_only() {
        let db = setup_db().await;
        let rider = create_user(&db, UserType::Passenger, 1, "password1").await;
        let app = test::init_service(
            App::new()
                .wrap(session_middleware(db.clone()))
                .configure(app_config(db)),
        )
        .await;

        let req = test::TestRequest::get().uri("/backoffice/").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let cookie = log_in(&app, &rider.email, "password1").await;
        let req = test::TestRequest::get().uri("/backoffice/users/").cookie(cookie).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_staff_manage_fleet_and_notify() {
        let db = setup_db().await;
        let root = create_user(&db, UserType::SuperAdmin, 2, "password2").await;
        let driver = create_user(&db, UserType::Driver, 3, "password3").await;
        let app = test::init_service(
            App::new()
                .wrap(session_middleware(db.clone()))
                .configure(app_config(db)),
        )
        .await;
        let cookie = log_in(&app, &root.email, "password2").await;

        let req = test::TestRequest::get().uri("/backoffice/").cookie(cookie.clone()).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(8));

        let req = test::TestRequest::post()
            .uri("/backoffice/saccos/")
            .cookie(cookie.clone())
            .set_json(json!({
                "name": "Embassava",
                "registration_number": "EMB-7",
                "contact_person": "Kevin",
                "contact_phone": "+254720000000",
                "contact_email": "info@embassava.co.ke",
                "address": "Embakasi"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let sacco: Value = test::read_body_json(res).await;
        let sacco_id = sacco["data"]["id"].clone();

        let matatu = json!({
            "plate_number": "KCX 901B",
            "fleet_number": "E-21",
            "sacco_id": sacco_id,
            "vehicle_type": "shuttle",
            "capacity": 33,
            "qr_code_data": "matatu:KCX901B",
            "current_driver_id": driver.id
        });
        let req = test::TestRequest::post()
            .uri("/backoffice/matatus/")
            .cookie(cookie.clone())
            .set_json(&matatu)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/backoffice/matatus/")
            .cookie(cookie.clone())
            .set_json(&matatu)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get()
            .uri("/backoffice/matatus/?vehicle_type=shuttle&q=KCX")
            .cookie(cookie.clone())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["pagination"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["plate_number"], "KCX 901B");
        assert!(body["data"]["items"][0].get("qr_code_data").is_none());

        let req = test::TestRequest::post()
            .uri("/backoffice/notifications/publish/")
            .cookie(cookie.clone())
            .set_json(json!({
                "title": "Route closed",
                "message": "Outering Road is closed today",
                "notification_type": "trip_update",
                "recipient_ids": [driver.id]
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let published: Value = test::read_body_json(res).await;
        assert_eq!(published["data"]["created_by_id"], root.id);

        let driver_cookie = log_in(&app, &driver.email, "password3").await;
        let req = test::TestRequest::get().uri("/dashboard/").cookie(driver_cookie).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["context"]["notifications"][0]["title"], "Route closed");

        let req = test::TestRequest::get()
            .uri("/backoffice/passwords/")
            .cookie(cookie)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_staff_delete_rows() {
        let db = setup_db().await;
        let root = create_user(&db, UserType::SuperAdmin, 4, "password4").await;
        let rider = create_user(&db, UserType::Passenger, 5, "password5").await;
        let app = test::init_service(
            App::new()
                .wrap(session_middleware(db.clone()))
                .configure(app_config(db)),
        )
        .await;
        let cookie = log_in(&app, &root.email, "password4").await;

        let uri = format!("/backoffice/users/{}/", rider.id);
        let req = test::TestRequest::get().uri(&uri).cookie(cookie.clone()).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["email"], rider.email);
        assert!(body["data"].get("password").is_none());

        let req = test::TestRequest::delete().uri(&uri).cookie(cookie.clone()).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri(&uri).cookie(cookie).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
