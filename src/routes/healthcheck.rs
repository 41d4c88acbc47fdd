use std::collections::HashMap;

use crate::AppData;
use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use diesel::prelude::*;
use serde::Serialize;

#[derive(Serialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Unhealthy(String),
}

#[derive(Serialize)]
struct HealthCheckResponse {
    version: String,
    timestamp: String,
    uptime: std::time::Duration,
    success: bool,
    services: HashMap<String, ServiceStatus>,
}

async fn check_database(data: &Data<AppData>) -> ServiceStatus {
    let pool = data.pool.clone();
    let res = web::block(move || {
        let mut conn = pool.get()?;
        diesel::sql_query("select 1")
            .execute(&mut conn)
            .map_err(crate::errors::DomainError::from)
    })
    .await;
    match res {
        Ok(Ok(_)) => ServiceStatus::Healthy,
        Ok(Err(err)) => ServiceStatus::Unhealthy(err.to_string()),
        Err(err) => ServiceStatus::Unhealthy(err.to_string()),
    }
}

pub async fn healthcheck(data: Data<AppData>) -> impl Responder {
    let uptime = data
        .start_time
        .elapsed()
        .unwrap_or_default();

    let db_status = check_database(&data).await;
    let success = matches!(db_status, ServiceStatus::Healthy);

    let mut services = HashMap::new();
    services.insert("database".to_owned(), db_status);

    let response = HealthCheckResponse {
        version: env!("CARGO_PKG_VERSION").to_owned(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime,
        success,
        services,
    };

    if success {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
