#![forbid(unsafe_code)]
#![allow(clippy::let_unit_value)]
#[macro_use]
extern crate diesel;
#[macro_use]
extern crate derive_new;
#[macro_use]
extern crate diesel_derive_newtype;

pub mod actions;
pub mod config;
pub mod errors;
pub mod models;
mod routes;
mod schema;
pub mod telemetry;
pub mod types;
pub mod utils;

use std::time::SystemTime;

use actix_cors::Cors;
use actix_web::web::{Data, ServiceConfig};
use actix_web::{web, App, HttpServer};
use actix_web_grants::GrantsMiddleware;
pub use config::EnvConfig;
use errors::DomainError;
use jwt_simple::prelude::HS256Key;
use serde::Deserialize;
use telemetry::DomainRootSpanBuilder;
use tracing_actix_web::TracingLogger;
use types::DbPool;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LoggerFormat {
    Json,
    Pretty,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub hash_cost: u32,
    pub token_expiry_secs: u64,
    pub static_dir: String,
    pub serve_static: bool,
}

pub struct AppData {
    pub start_time: SystemTime,
    pub config: AppConfig,
    pub pool: DbPool,
    pub jwt_key: HS256Key,
}

pub fn configure_app(
    app_data: Data<AppData>,
) -> Box<dyn Fn(&mut ServiceConfig)> {
    Box::new(move |cfg: &mut ServiceConfig| {
        let cfg = cfg
            .app_data(app_data.clone())
            // malformed bodies and params surface as the same flat
            // error shape the handlers use
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                DomainError::new_field_validation_error(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(
                |err, _req| {
                    DomainError::new_field_validation_error(err.to_string())
                        .into()
                },
            ))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                DomainError::new_field_validation_error(err.to_string()).into()
            }))
            .service(
                web::scope("/hc")
                    .route("", web::get().to(routes::healthcheck::healthcheck)),
            )
            .service(
                web::scope("/api/auth")
                    .route(
                        "/register",
                        web::post().to(routes::auth::register),
                    )
                    .route("/login", web::post().to(routes::auth::login))
                    .route(
                        "/profile",
                        web::get().to(routes::auth::get_profile),
                    )
                    .route(
                        "/profile",
                        web::put().to(routes::auth::update_profile),
                    ),
            )
            .service(
                web::scope("/api/jobs")
                    .route("", web::get().to(routes::jobs::search_jobs))
                    .route("", web::post().to(routes::jobs::create_job))
                    .route("/my-jobs", web::get().to(routes::jobs::my_jobs))
                    .route("/applied", web::get().to(routes::jobs::applied_jobs))
                    .route(
                        "/applicants",
                        web::get().to(routes::jobs::all_applicants),
                    )
                    .route("/{job_id}", web::get().to(routes::jobs::get_job))
                    .route("/{job_id}", web::put().to(routes::jobs::update_job))
                    .route(
                        "/{job_id}",
                        web::delete().to(routes::jobs::delete_job),
                    )
                    .route(
                        "/{job_id}/apply",
                        web::post().to(routes::jobs::apply_to_job),
                    )
                    .route(
                        "/{job_id}/applicants",
                        web::get().to(routes::jobs::job_applicants),
                    )
                    .route(
                        "/{job_id}/applications/{application_id}/status",
                        web::put()
                            .to(routes::jobs::update_application_status),
                    ),
            )
            .service(
                web::scope("/api/admin")
                    .wrap(GrantsMiddleware::with_extractor(
                        routes::auth::extract,
                    ))
                    .service(
                        web::scope("/users")
                            .route("", web::get().to(routes::admin::list_users))
                            .route(
                                "",
                                web::post().to(routes::admin::create_user),
                            )
                            .route(
                                "/{user_id}",
                                web::get().to(routes::admin::get_user),
                            )
                            .route(
                                "/{user_id}",
                                web::put().to(routes::admin::update_user),
                            )
                            .route(
                                "/{user_id}",
                                web::delete().to(routes::admin::delete_user),
                            ),
                    )
                    .service(
                        web::scope("/jobs")
                            .route("", web::get().to(routes::admin::list_jobs))
                            .route(
                                "/{job_id}",
                                web::put().to(routes::admin::update_job),
                            )
                            .route(
                                "/{job_id}",
                                web::delete().to(routes::admin::delete_job),
                            ),
                    )
                    .route(
                        "/analytics",
                        web::get().to(routes::admin::analytics),
                    )
                    .route(
                        "/reports/{report_type}",
                        web::get().to(routes::admin::export_report),
                    ),
            );
        if app_data.config.serve_static {
            let _ = cfg.service(
                actix_files::Files::new("/", &app_data.config.static_dir)
                    .index_file("index.html"),
            );
        }
    })
}

pub async fn run(addr: String, app_data: Data<AppData>) -> anyhow::Result<()> {
    let _ = tracing::info!(
        "Starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    let app = move || {
        App::new()
            .configure(configure_app(app_data.clone()))
            .wrap(Cors::permissive())
            .wrap(TracingLogger::<DomainRootSpanBuilder>::new())
    };
    HttpServer::new(app)
        .bind(addr)?
        .run()
        .await
        .map_err(|err| anyhow::anyhow!(err))
}
