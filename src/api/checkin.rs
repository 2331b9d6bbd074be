use actix_web::{HttpRequest, HttpResponse, http::header::ContentType, web};
use tracing::{error, info, instrument, warn};

use super::{pages, redirect, request_url};
use crate::{
    error::AppError,
    models::{CheckInForm, FormQuery},
    service::{AttendanceService, CheckInOutcome},
    utils::validation::escape_name,
};

/// Check-in form, or the thank-you page when `name` is present
#[utoipa::path(
    get,
    path = "/",
    params(FormQuery),
    responses(
        (status = 200, description = "Check-in form (with optional error banner) or thank-you page", content_type = "text/html", body = String),
        (status = 500, description = "Store unavailable")
    ),
    tag = "Check-in"
)]
pub async fn check_in_form(
    service: web::Data<AttendanceService>,
    query: web::Query<FormQuery>,
) -> Result<HttpResponse, AppError> {
    let FormQuery { name, err } = query.into_inner();

    let body = match name.filter(|n| !n.is_empty()) {
        Some(name) => pages::thank_you(&name),
        None => {
            let token = service.current_token().await.map_err(|e| {
                error!(error = %e, "Failed to read access token");
                AppError::Store(e)
            })?;
            pages::check_in_form(token.as_deref().unwrap_or_default(), err.as_deref())
        }
    };

    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(body))
}

/// Submit a check-in
///
/// Always answers with a redirect back to the form: `?name=` on success,
/// `?err=` on failure.
#[utoipa::path(
    post,
    path = "/",
    request_body(content = CheckInForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirect carrying `name` (recorded) or `err` (rejected)")
    ),
    tag = "Check-in"
)]
#[instrument(
    name = "check_in",
    skip(req, service, form),
    fields(nusnet = %form.nusnet)
)]
pub async fn submit_check_in(
    req: HttpRequest,
    service: web::Data<AttendanceService>,
    form: web::Form<CheckInForm>,
) -> Result<HttpResponse, AppError> {
    let mut location = request_url(&req)?;
    let form = form.into_inner();
    let display_name = escape_name(form.name.trim());

    let param = match service.check_in(form.into()).await {
        Ok(CheckInOutcome::Recorded { identifier, mark }) => {
            info!(identifier = %identifier, date = %mark.date, time = %mark.time, "Attendance recorded");
            ("name", display_name)
        }
        Ok(CheckInOutcome::AlreadyRecorded { identifier }) => {
            info!(identifier = %identifier, "Already checked in today");
            ("name", display_name)
        }
        // Indistinguishable from success on purpose.
        Err(AppError::NotAllowed) => {
            info!("Identifier not on allow-list, nothing recorded");
            ("name", display_name)
        }
        Err(e @ (AppError::ServiceUnavailable | AppError::Forbidden | AppError::InvalidInput(_))) => {
            warn!(error = %e, "Check-in rejected");
            ("err", e.public_message())
        }
        Err(e) => {
            error!(error = %e, "Check-in failed");
            ("err", e.public_message())
        }
    };

    location.query_pairs_mut().append_pair(param.0, &param.1);
    Ok(redirect(&location))
}
