#![forbid(unsafe_code)]
#![allow(clippy::let_unit_value)]
use actix_web::web::Data;
use anyhow::Context;
use diesel::r2d2::ConnectionManager;
use diesel_migrations::{FileBasedMigrations, MigrationHarness};
use diesel_tracing::pg::InstrumentedPgConnection;
use job_portal::actions::misc::create_database_if_needed;
use job_portal::{AppConfig, AppData, EnvConfig, LoggerFormat};
use jwt_simple::prelude::HS256Key;
use std::time::SystemTime;
use tracing::subscriber::set_global_default;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{
    layer::SubscriberExt, EnvFilter, FmtSubscriber, Registry,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let env_config = envy::prefixed("JOB_PORTAL_")
        .from_env::<EnvConfig>()
        .context("Failed to parse config")?;

    //bind guard to variable instead of _
    let _guard = setup_logger(env_config.logger_format.clone())?;

    let connspec = &env_config.database_url;
    let _ = create_database_if_needed(connspec).with_context(|| {
        format!("Failed to create/detect database. URL was {connspec}")
    })?;
    let manager = ConnectionManager::<InstrumentedPgConnection>::new(connspec);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .context("Failed to create db pool")?;

    let _ = {
        let mut conn = pool.get().context("Failed to get connection")?;

        let migrations: FileBasedMigrations =
            FileBasedMigrations::find_migrations_directory()
                .context("Error running migrations")?;
        let _ = conn
            .run_pending_migrations(migrations)
            .map_err(|e| anyhow::anyhow!(e))
            .context("Error running migrations")?;
    };

    let jwt_key = HS256Key::from_bytes(env_config.jwt_key.as_bytes());

    let app_data = Data::new(AppData {
        start_time: SystemTime::now(),
        config: AppConfig {
            hash_cost: env_config.hash_cost,
            token_expiry_secs: env_config.token_expiry_secs,
            static_dir: env_config.static_dir.clone(),
            serve_static: env_config.serve_static,
        },
        pool,
        jwt_key,
    });

    let addr =
        format!("{}:{}", env_config.http_host, env_config.http_port);
    job_portal::run(addr, app_data).await
}

pub fn setup_logger(format: LoggerFormat) -> anyhow::Result<WorkerGuard> {
    let env_filter = EnvFilter::try_from_env("JOB_PORTAL_RUST_LOG")
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to set up env logger")?;

    let (non_blocking, _guard) =
        tracing_appender::non_blocking(std::io::stdout());

    let _ = LogTracer::init().context("Failed to set up log tracer")?;

    let _ = match format {
        LoggerFormat::Json => {
            let formatting_layer = BunyanFormattingLayer::new(
                format!(
                    "{}-{}",
                    env!("CARGO_PKG_NAME"),
                    env!("CARGO_PKG_VERSION")
                ),
                // Output the formatted spans to non-blocking writer
                non_blocking,
            );
            let subscriber = Registry::default()
                .with(env_filter)
                .with(JsonStorageLayer)
                .with(formatting_layer);
            let _ = set_global_default(subscriber)
                .context("Failed to set subscriber")?;
        }

        LoggerFormat::Pretty => {
            let subscriber = FmtSubscriber::builder()
                .pretty()
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .with_env_filter(env_filter)
                .with_writer(non_blocking)
                .with_thread_names(true)
                .finish();
            let _ = set_global_default(subscriber)
                .context("Failed to set subscriber")?;
        }
    };
    Ok(_guard)
}
