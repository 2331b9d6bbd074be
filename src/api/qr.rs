use actix_web::{HttpRequest, HttpResponse, http::header::ContentType};
use qrcode::{Color, QrCode};
use tracing::error;

use super::{pages, site_root};
use crate::error::AppError;

/// Square module matrix for `text`, `true` = dark.
pub fn encode(text: &str) -> Result<Vec<Vec<bool>>, AppError> {
    let code = QrCode::new(text.as_bytes()).map_err(|e| AppError::Render(e.to_string()))?;
    let width = code.width();

    Ok(code
        .to_colors()
        .chunks(width)
        .map(|row| row.iter().map(|c| *c == Color::Dark).collect())
        .collect())
}

/// QR code pointing at this site's check-in form
#[utoipa::path(
    get,
    path = "/qr",
    responses(
        (status = 200, description = "Page drawing the QR code on a canvas", content_type = "text/html", body = String)
    ),
    tag = "Check-in"
)]
pub async fn qr_page(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let target = site_root(&req)?;
    let matrix = encode(target.as_str()).map_err(|e| {
        error!(error = %e, url = %target, "QR encoding failed");
        e
    })?;
    let matrix_json = serde_json::to_string(&matrix)?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(pages::qr_page(target.as_str(), &matrix_json)))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test as actix_test, web};

    use super::*;

    #[test]
    fn matrix_is_square_with_finder_corner() {
        let matrix = encode("http://localhost:8080/").unwrap();
        let n = matrix.len();

        // Smallest symbol is 21 modules, each version adds 4.
        assert!(n >= 21 && (n - 21) % 4 == 0);
        assert!(matrix.iter().all(|row| row.len() == n));
        // Top-left finder pattern: dark ring, light ring, dark core.
        assert!(matrix[0][0] && matrix[0][6] && matrix[6][0]);
        assert!(!matrix[1][1]);
        assert!(matrix[3][3]);
    }

    #[actix_web::test]
    async fn page_encodes_site_root() {
        let app = actix_test::init_service(App::new().route("/qr", web::get().to(qr_page))).await;

        let req = actix_test::TestRequest::get()
            .uri("/qr?x=1")
            .insert_header(("host", "attend.example.org"))
            .to_request();
        let body = actix_test::call_and_read_body(&app, req).await;
        let html = String::from_utf8(body.to_vec()).unwrap();

        assert!(html.contains("<p>http://attend.example.org/</p>"));
        assert!(html.contains(r#"<canvas id="qr" width="400" height="400">"#));
        assert!(html.contains(r#"<script id="qr-data" type="application/json">[[true"#));
    }
}
