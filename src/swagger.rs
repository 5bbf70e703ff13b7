use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{
    matatu_entity::VehicleType,
    notification_entity::NotificationType,
    passenger_trip_entity::PaymentMethod,
    payment_entity::{PaymentStatus, PaymentType},
    trip_entity::TripStatus,
    user_entity::UserType,
};
use crate::handlers;
use crate::models::*;
use crate::utils::{PaginationInfo, PaginationParams};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "sessionid",
                    "Session cookie. The name follows session.cookie_name, sessionid by default.",
                ))),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login_page,
        handlers::auth::login,
        handlers::auth::signup_page,
        handlers::auth::signup,
        handlers::auth::logout,
        handlers::auth::forgot_password_page,
        handlers::auth::forgot_password,
        handlers::dashboard::dashboard,
        handlers::dashboard::passenger,
        handlers::dashboard::conductor,
        handlers::dashboard::driver,
        handlers::dashboard::sacco,
        handlers::dashboard::admin,
        handlers::backoffice::index,
        handlers::backoffice::list,
        handlers::backoffice::detail,
        handlers::backoffice::create,
        handlers::backoffice::delete,
        handlers::backoffice::publish_notification,
    ),
    components(
        schemas(
            Page,
            FormState,
            FormErrors,
            FlashMessage,
            FlashLevel,
            LoginForm,
            SignupForm,
            ForgotPasswordForm,
            UserResponse,
            UserType,
            DashboardContext,
            NotificationResponse,
            NotificationType,
            PublishNotificationRequest,
            NewSacco,
            NewMatatu,
            VehicleType,
            NewRoute,
            NewTrip,
            TripStatus,
            NewPassengerTrip,
            PaymentMethod,
            NewPayment,
            PaymentType,
            PaymentStatus,
            PaginationParams,
            PaginationInfo,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Signup, login, logout and password reset pages"),
        (name = "dashboard", description = "Role dashboards"),
        (name = "backoffice", description = "Staff back-office"),
    ),
    info(
        title = "Matwana API",
        version = "0.1.0",
        description = "Matatu operations: passengers, saccos, fleet and trips"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
