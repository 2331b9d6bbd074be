use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::{Context, Result};
use mockable::DefaultClock;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod models;
mod routes;
mod scheduler;
mod service;
mod store;
mod utils;

use config::Config;
use db::init_db;
use service::AttendanceService;
use store::{KvStore, MemoryStore, MySqlStore, StoreBackend};

use crate::docs::ApiDoc;
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "attendsys.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(if config.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(backend = %config.store_backend, debug = config.debug, "Server starting...");
    if config.debug {
        warn!("DEBUG is set: day/time window gate disabled");
    }

    let store: Arc<dyn KvStore> = match config.store_backend {
        StoreBackend::Memory => {
            warn!("Using in-memory store; attendance is lost on restart");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Mysql => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;
            Arc::new(MySqlStore::new(init_db(url).await?))
        }
    };

    let service = Data::new(AttendanceService::new(
        store,
        Arc::new(DefaultClock),
        config.check_in_policy(),
        config.admin_credential.clone(),
    ));

    service
        .ensure_token()
        .await
        .context("Failed to initialise access token")?;
    scheduler::spawn_token_rotation(service.clone().into_inner(), config.token_rotation);

    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(service.clone())
            .configure(|cfg| routes::configure(cfg, &config))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
