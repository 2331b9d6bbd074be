use actix_web::{HttpRequest, HttpResponse, http::header::ContentType, web};
use tracing::{error, info, instrument, warn};

use super::{pages, redirect, site_root};
use crate::{
    error::AppError,
    models::AdminLoginForm,
    service::{AttendanceService, AttendanceTable},
};

/// Admin login form
#[utoipa::path(
    get,
    path = "/list",
    responses(
        (status = 200, description = "Password form", content_type = "text/html", body = String)
    ),
    tag = "Admin"
)]
pub async fn login_form() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(pages::admin_login())
}

/// Attendance table for the admin
///
/// A wrong password is answered with a redirect to the site root rather
/// than an authentication error.
#[utoipa::path(
    post,
    path = "/list",
    request_body(content = AdminLoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Attendance table", content_type = "text/html", body = String),
        (status = 302, description = "Wrong password, redirected to /"),
        (status = 500, description = "Listing failed")
    ),
    tag = "Admin"
)]
#[instrument(name = "admin_list", skip_all)]
pub async fn list_attendance(
    req: HttpRequest,
    service: web::Data<AttendanceService>,
    form: web::Form<AdminLoginForm>,
) -> Result<HttpResponse, AppError> {
    if !service.verify_admin(&form.pswd) {
        warn!("Admin listing refused: wrong password");
        return Ok(redirect(&site_root(&req)?));
    }

    let records = service.list_attendance().await.map_err(|e| {
        error!(error = %e, "Attendance listing failed");
        e
    })?;
    let table = AttendanceTable::pivot(&records);
    let records_json = serde_json::to_string(&records)?;

    info!(rows = table.rows.len(), columns = table.columns.len(), "Attendance table rendered");

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(pages::attendance_page(&table, &records_json)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, http::header, test as actix_test};

    use super::*;
    use crate::model::attendance::{AttendanceMark, AttendanceRecord};
    use crate::service::test_support::{
        ADMIN_PASSWORD, MutableClock, UnavailableStore, harness, service_over,
    };
    use crate::store::KvStore;

    #[actix_web::test]
    async fn wrong_password_redirects_without_data() {
        let h = harness();
        h.store
            .put("E1", &serde_json::to_string(&AttendanceRecord::new("Ana".into())).unwrap())
            .await
            .unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(h.service))
                .route("/list", web::post().to(list_attendance)),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/list")
            .set_form([("pswd", "nope")])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
        assert!(location.ends_with('/'));
        assert!(!location.contains("list"));
        let body = actix_test::read_body(resp).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn correct_password_returns_full_table() {
        let h = harness();
        for (key, name, date) in [("A", "Ana", "01/03/2024"), ("B", "Bo", "03/03/2024")] {
            let record = AttendanceRecord {
                name: vec![name.into()],
                attendance: vec![AttendanceMark {
                    date: date.into(),
                    time: "19:00:00".into(),
                }],
            };
            h.store
                .put(key, &serde_json::to_string(&record).unwrap())
                .await
                .unwrap();
        }
        h.service.rotate_token().await.unwrap();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(h.service))
                .route("/list", web::post().to(list_attendance)),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/list")
            .set_form([("pswd", ADMIN_PASSWORD)])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let html = String::from_utf8(actix_test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("<th>01/03</th><th>03/03</th>"));
        assert!(html.contains("<td>Ana</td>"));
        assert!(html.contains("<td>Bo</td>"));
        assert!(!html.contains("access_token"));
    }

    #[actix_web::test]
    async fn listing_failure_is_a_server_error() {
        let service = service_over(
            Arc::new(UnavailableStore),
            Arc::new(MutableClock::sgt(2024, 3, 4, 19, 0)),
            false,
        );
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(service))
                .route("/list", web::post().to(list_attendance)),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/list")
            .set_form([("pswd", ADMIN_PASSWORD)])
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = String::from_utf8(actix_test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains("Something went wrong, please try again"));
        assert!(!body.contains("connection refused"));
    }
}
