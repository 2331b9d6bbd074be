use crate::{
    api::{admin, checkin, qr},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

// Helper to build per-route limiter. Config guarantees a non-zero rate.
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let per_ms = 60_000 / u64::from(requests_per_min.max(1));
    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms.max(1))
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("period and burst are non-zero");
    Governor::new(&cfg)
}

/// Method + path dispatch:
///
/// * `POST /list` → admin listing, `GET /list` → admin login form
/// * `GET /qr` → QR page
/// * `POST` anything else → check-in, any other request → check-in form
///
/// Limits apply to the POSTs only; page loads are not counted.
pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    let admin_limiter = Arc::new(build_limiter(config.rate_admin_per_min));
    let checkin_limiter = Arc::new(build_limiter(config.rate_checkin_per_min));

    let check_in = || web::post().to(checkin::submit_check_in).wrap(checkin_limiter.clone());

    cfg.service(
        web::resource("/list")
            .route(web::post().to(admin::list_attendance).wrap(admin_limiter))
            .route(web::get().to(admin::login_form))
            .default_service(web::to(checkin::check_in_form)),
    )
    .service(
        web::resource("/qr")
            .route(web::get().to(qr::qr_page))
            .route(check_in())
            .default_service(web::to(checkin::check_in_form)),
    )
    .service(
        web::resource("/{tail:.*}")
            .route(check_in())
            .default_service(web::to(checkin::check_in_form)),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, http::header, test as actix_test, web::Data};
    use std::net::SocketAddr;

    use super::*;
    use crate::config::tests::test_config;
    use crate::service::test_support::harness;

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    #[actix_web::test]
    async fn dispatches_on_method_and_path() {
        let h = harness();
        let config = test_config();
        let app = actix_test::init_service(
            App::new()
                .app_data(Data::new(h.service))
                .configure(|cfg| configure(cfg, &config)),
        )
        .await;

        let get = |uri: &'static str| {
            actix_test::TestRequest::get()
                .uri(uri)
                .peer_addr(peer())
                .to_request()
        };

        let html = actix_test::call_and_read_body(&app, get("/list")).await;
        assert!(String::from_utf8_lossy(&html).contains(r#"name="pswd""#));

        let html = actix_test::call_and_read_body(&app, get("/qr")).await;
        assert!(String::from_utf8_lossy(&html).contains(r#"id="qr""#));

        let html = actix_test::call_and_read_body(&app, get("/anything/else")).await;
        assert!(String::from_utf8_lossy(&html).contains(r#"name="nusnet""#));

        let html = actix_test::call_and_read_body(&app, get("/?err=Closed")).await;
        assert!(String::from_utf8_lossy(&html).contains(r#"<p class="error">Closed</p>"#));

        let put = actix_test::TestRequest::put()
            .uri("/")
            .peer_addr(peer())
            .to_request();
        let html = actix_test::call_and_read_body(&app, put).await;
        assert!(String::from_utf8_lossy(&html).contains(r#"name="nusnet""#));

        // POST to a non-list path is a check-in attempt.
        let post = actix_test::TestRequest::post()
            .uri("/somewhere")
            .peer_addr(peer())
            .set_form([("name", "Ana"), ("nusnet", "E1"), ("token", "x")])
            .to_request();
        let resp = actix_test::call_service(&app, post).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
        assert!(location.contains("/somewhere?err="));

        // A known path with an unhandled method still reaches the check-in.
        let post = actix_test::TestRequest::post()
            .uri("/qr")
            .peer_addr(peer())
            .set_form([("name", "Ana"), ("nusnet", "E1"), ("token", "x")])
            .to_request();
        let resp = actix_test::call_service(&app, post).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
        assert!(location.contains("/qr?err="));

        for req in [
            actix_test::TestRequest::put().uri("/list"),
            actix_test::TestRequest::delete().uri("/qr"),
        ] {
            let resp = actix_test::call_service(&app, req.peer_addr(peer()).to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let html = actix_test::read_body(resp).await;
            assert!(String::from_utf8_lossy(&html).contains(r#"name="nusnet""#));
        }

        // POST /list is the admin listing.
        let post = actix_test::TestRequest::post()
            .uri("/list")
            .peer_addr(peer())
            .set_form([("pswd", "wrong")])
            .to_request();
        let resp = actix_test::call_service(&app, post).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert!(
            resp.headers()
                .get(header::LOCATION)
                .unwrap()
                .to_str()
                .unwrap()
                .ends_with(":8080/")
        );
    }

    #[actix_web::test]
    async fn only_submissions_count_against_the_limit() {
        let h = harness();
        let mut config = test_config();
        config.rate_checkin_per_min = 1;
        let app = actix_test::init_service(
            App::new()
                .app_data(Data::new(h.service))
                .configure(|cfg| configure(cfg, &config)),
        )
        .await;

        for _ in 0..3 {
            let req = actix_test::TestRequest::get()
                .uri("/")
                .peer_addr(peer())
                .to_request();
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let post = || {
            actix_test::TestRequest::post()
                .uri("/")
                .peer_addr(peer())
                .set_form([("name", "Ana"), ("nusnet", "E1"), ("token", "x")])
                .to_request()
        };
        let resp = actix_test::call_service(&app, post()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        let resp = actix_test::call_service(&app, post()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
