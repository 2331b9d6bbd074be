use crate::models::{AdminLoginForm, CheckInForm};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Check-In",
        version = "0.1.0",
        description = r#"
## QR code attendance check-in

* `GET /` serves the check-in form; `POST /` records at most one check-in per
  identifier per day, inside the configured day and time window.
* `GET /qr` shows a QR code pointing at the form.
* `GET /list` / `POST /list` is the password-gated attendance table.

All pages are HTML. Submissions answer with redirects carrying `name` or `err`.
"#,
    ),
    paths(
        crate::api::checkin::check_in_form,
        crate::api::checkin::submit_check_in,
        crate::api::qr::qr_page,
        crate::api::admin::login_form,
        crate::api::admin::list_attendance,
    ),
    components(schemas(CheckInForm, AdminLoginForm)),
    tags(
        (name = "Check-in", description = "Attendee facing pages"),
        (name = "Admin", description = "Attendance listing"),
    )
)]
pub struct ApiDoc;
