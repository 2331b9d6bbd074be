use actix_web::{HttpRequest, HttpResponse, http::header};
use url::Url;

use crate::error::AppError;

pub mod admin;
pub mod checkin;
pub mod pages;
pub mod qr;

/// Absolute URL of the current request, without query.
pub(crate) fn request_url(req: &HttpRequest) -> Result<Url, AppError> {
    let info = req.connection_info();
    Url::parse(&format!("{}://{}{}", info.scheme(), info.host(), req.path()))
        .map_err(|_| AppError::InvalidInput("Malformed request URL".to_string()))
}

/// `scheme://host/` of the current request.
pub(crate) fn site_root(req: &HttpRequest) -> Result<Url, AppError> {
    let mut url = request_url(req)?;
    url.set_path("/");
    Ok(url)
}

pub(crate) fn redirect(location: &Url) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.as_str()))
        .finish()
}
