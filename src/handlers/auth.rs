use actix_web::{HttpResponse, ResponseError, Result, web};

use super::page::{DASHBOARD_PATH, LOGIN_PATH, redirect, render_form};
use crate::error::AppError;
use crate::middlewares::SessionContext;
use crate::models::*;
use crate::services::AuthService;

const LOGIN_TEMPLATE: &str = "auth/login.html";
const SIGNUP_TEMPLATE: &str = "auth/signup.html";
const FORGOT_PASSWORD_TEMPLATE: &str = "auth/forgot_password.html";

#[utoipa::path(
    get,
    path = "/login/",
    tag = "auth",
    responses((status = 200, description = "Login page", body = Page))
)]
pub async fn login_page(session: SessionContext) -> Result<HttpResponse> {
    Ok(render_form(&session, LOGIN_TEMPLATE, &LoginForm::default(), FormErrors::default())?)
}

#[utoipa::path(
    post,
    path = "/login/",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in, redirect to the dashboard"),
        (status = 400, description = "Login page with field errors", body = Page)
    )
)]
pub async fn login(
    auth_service: web::Data<AuthService>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    match auth_service.login(&form).await {
        Ok(user) => {
            session.log_in(user.id)?;
            Ok(redirect(DASHBOARD_PATH))
        }
        Err(AppError::InvalidForm(errors)) => {
            Ok(render_form(&session, LOGIN_TEMPLATE, &form, errors)?)
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/signup/",
    tag = "auth",
    responses((status = 200, description = "Signup page", body = Page))
)]
pub async fn signup_page(session: SessionContext) -> Result<HttpResponse> {
    Ok(render_form(&session, SIGNUP_TEMPLATE, &SignupForm::default(), FormErrors::default())?)
}

#[utoipa::path(
    post,
    path = "/signup/",
    tag = "auth",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created, redirect to login"),
        (status = 400, description = "Signup page with field errors", body = Page)
    )
)]
pub async fn signup(
    auth_service: web::Data<AuthService>,
    session: SessionContext,
    form: web::Form<SignupForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    match auth_service.signup(&form).await {
        Ok(_) => {
            session.success("Account created successfully! Please login.")?;
            Ok(redirect(LOGIN_PATH))
        }
        Err(AppError::InvalidForm(errors)) => {
            Ok(render_form(&session, SIGNUP_TEMPLATE, &form, errors)?)
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/logout/",
    tag = "auth",
    responses((status = 303, description = "Session ended, redirect to login"))
)]
pub async fn logout(session: SessionContext) -> Result<HttpResponse> {
    if let Some(user_id) = session.user_id() {
        log::info!("User {user_id} logged out");
    }
    session.reset();
    session.success("You have been logged out successfully.")?;
    Ok(redirect(LOGIN_PATH))
}

#[utoipa::path(
    get,
    path = "/forgot_password/",
    tag = "auth",
    responses((status = 200, description = "Forgot password page", body = Page))
)]
pub async fn forgot_password_page(session: SessionContext) -> Result<HttpResponse> {
    Ok(render_form(
        &session,
        FORGOT_PASSWORD_TEMPLATE,
        &ForgotPasswordForm::default(),
        FormErrors::default(),
    )?)
}

#[utoipa::path(
    post,
    path = "/forgot_password/",
    tag = "auth",
    request_body(content = ForgotPasswordForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Instructions queued, redirect to login"),
        (status = 400, description = "Page with field errors", body = Page)
    )
)]
pub async fn forgot_password(
    auth_service: web::Data<AuthService>,
    session: SessionContext,
    form: web::Form<ForgotPasswordForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    match auth_service.forgot_password(&form).await {
        Ok(()) => {
            session.success("Password reset instructions have been sent to your email.")?;
            Ok(redirect(LOGIN_PATH))
        }
        Err(AppError::InvalidForm(errors)) => {
            Ok(render_form(&session, FORGOT_PASSWORD_TEMPLATE, &form, errors)?)
        }
        Err(e) => Ok(e.error_response()),
    }
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(login_page))
        .route("/", web::post().to(login))
        .route("/login/", web::get().to(login_page))
        .route("/login/", web::post().to(login))
        .route("/signup/", web::get().to(signup_page))
        .route("/signup/", web::post().to(signup))
        .route("/logout/", web::get().to(logout))
        .route("/logout/", web::post().to(logout))
        .route("/forgot_password/", web::get().to(forgot_password_page))
        .route("/forgot_password/", web::post().to(forgot_password));
}
