use actix_web::HttpResponse;
use actix_web::http::{StatusCode, header};
use serde::Serialize;
use serde_json::json;

use crate::error::AppResult;
use crate::middlewares::SessionContext;
use crate::models::{FormErrors, FormState, Page};

pub const LOGIN_PATH: &str = "/login/";
pub const DASHBOARD_PATH: &str = "/dashboard/";

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Renders a page, draining the session's queued messages into it.
pub fn render(
    session: &SessionContext,
    template: &str,
    context: serde_json::Value,
) -> AppResult<HttpResponse> {
    respond(session, template, context, None)
}

/// Renders a form page. Any errors make the response a 400.
pub fn render_form<F: Serialize>(
    session: &SessionContext,
    template: &str,
    form: &F,
    errors: FormErrors,
) -> AppResult<HttpResponse> {
    let state = FormState {
        data: serde_json::to_value(form)?,
        errors,
    };
    respond(session, template, json!({}), Some(state))
}

fn respond(
    session: &SessionContext,
    template: &str,
    context: serde_json::Value,
    form: Option<FormState>,
) -> AppResult<HttpResponse> {
    let valid = form.as_ref().is_none_or(|f| f.errors.is_empty());
    let page = Page {
        template: template.to_string(),
        context,
        form,
        messages: session.take_messages()?,
    };
    let status = if valid {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok(HttpResponse::build(status).json(json!({
        "success": valid,
        "data": page
    })))
}
