use std::str::FromStr;

use crate::actions;
use crate::errors::DomainError;
use crate::models::jobs::{JobId, JobUpdate};
use crate::models::misc::MessageResponse;
use crate::models::reports::{ReportFormat, ReportQuery, ReportType};
use crate::models::roles::RoleEnum;
use crate::models::users::{AdminUserUpdate, NewUser, UserId};
use crate::utils::csv::{to_csv, CsvRecord};
use crate::AppData;
use actix_web::http::header;
use actix_web::web::{self, Data, Json, Path, Query};
use actix_web::HttpResponse;
use actix_web_grants::authorities::{AuthDetails, AuthoritiesCheck};

fn ensure_admin(auth: &AuthDetails<RoleEnum>) -> Result<(), DomainError> {
    if auth.has_authority(&RoleEnum::Admin) {
        Ok(())
    } else {
        Err(DomainError::new_forbidden_error(
            "requires role admin".to_owned(),
        ))
    }
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn list_users(
    auth: AuthDetails<RoleEnum>,
    app_data: Data<AppData>,
) -> Result<HttpResponse, DomainError> {
    ensure_admin(&auth)?;
    let pool = app_data.pool.clone();
    let users = web::block(move || {
        let mut conn = pool.get()?;
        actions::users::get_all_users(&mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().json(users))
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn create_user(
    auth: AuthDetails<RoleEnum>,
    app_data: Data<AppData>,
    payload: Json<NewUser>,
) -> Result<HttpResponse, DomainError> {
    ensure_admin(&auth)?;
    let new_user = payload.into_inner();
    let hash_cost = app_data.config.hash_cost;
    let pool = app_data.pool.clone();
    let _ = web::block(move || {
        let mut conn = pool.get()?;
        actions::users::insert_new_user(new_user, hash_cost, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Created()
        .json(MessageResponse::new("User created successfully".to_owned())))
}

#[tracing::instrument(level = "info", skip(auth, app_data))]
pub async fn get_user(
    auth: AuthDetails<RoleEnum>,
    app_data: Data<AppData>,
    user_id: Path<UserId>,
) -> Result<HttpResponse, DomainError> {
    ensure_admin(&auth)?;
    let user_id = user_id.into_inner();
    let pool = app_data.pool.clone();
    let mb_profile = web::block(move || {
        let mut conn = pool.get()?;
        actions::users::find_profile_by_uid(&user_id, &mut conn)
    })
    .await??;
    match mb_profile {
        Some(profile) => Ok(HttpResponse::Ok().json(profile)),
        None => Err(DomainError::new_entity_does_not_exist_error(
            "User not found".to_owned(),
        )),
    }
}

#[tracing::instrument(level = "info", skip(auth, app_data, payload))]
pub async fn update_user(
    auth: AuthDetails<RoleEnum>,
    app_data: Data<AppData>,
    user_id: Path<UserId>,
    payload: Json<AdminUserUpdate>,
) -> Result<HttpResponse, DomainError> {
    ensure_admin(&auth)?;
    let user_id = user_id.into_inner();
    let changes = payload.into_inner();
    let response =
        MessageResponse::new("User updated successfully".to_owned());
    if changes.is_empty() {
        return Ok(HttpResponse::Ok().json(response));
    }
    let pool = app_data.pool.clone();
    let updated = web::block(move || {
        let mut conn = pool.get()?;
        actions::users::admin_update_user(&user_id, &changes, &mut conn)
    })
    .await??;
    if updated == 0 {
        Err(DomainError::new_entity_does_not_exist_error(
            "User not found".to_owned(),
        ))
    } else {
        Ok(HttpResponse::Ok().json(response))
    }
}

#[tracing::instrument(level = "info", skip(auth, app_data))]
pub async fn delete_user(
    auth: AuthDetails<RoleEnum>,
    app_data: Data<AppData>,
    user_id: Path<UserId>,
) -> Result<HttpResponse, DomainError> {
    ensure_admin(&auth)?;
    let user_id = user_id.into_inner();
    let pool = app_data.pool.clone();
    let deleted = web::block(move || {
        let mut conn = pool.get()?;
        actions::users::delete_user(&user_id, &mut conn)
    })
    .await??;
    if deleted == 0 {
        Err(DomainError::new_entity_does_not_exist_error(
            "User not found".to_owned(),
        ))
    } else {
        Ok(HttpResponse::Ok()
            .json(MessageResponse::new("User deleted".to_owned())))
    }
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn list_jobs(
    auth: AuthDetails<RoleEnum>,
    app_data: Data<AppData>,
) -> Result<HttpResponse, DomainError> {
    ensure_admin(&auth)?;
    let pool = app_data.pool.clone();
    let jobs = web::block(move || {
        let mut conn = pool.get()?;
        actions::jobs::get_all_jobs(&mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().json(jobs))
}

#[tracing::instrument(level = "info", skip(auth, app_data, payload))]
pub async fn update_job(
    auth: AuthDetails<RoleEnum>,
    app_data: Data<AppData>,
    job_id: Path<JobId>,
    payload: Json<JobUpdate>,
) -> Result<HttpResponse, DomainError> {
    ensure_admin(&auth)?;
    let job_id = job_id.into_inner();
    let changes = payload.into_inner();
    let response = MessageResponse::new("Job updated successfully".to_owned());
    if changes.is_empty() {
        return Ok(HttpResponse::Ok().json(response));
    }
    let pool = app_data.pool.clone();
    let updated = web::block(move || {
        let mut conn = pool.get()?;
        actions::jobs::update_job(&job_id, &changes, &mut conn)
    })
    .await??;
    if updated == 0 {
        Err(DomainError::new_entity_does_not_exist_error(
            "Job not found".to_owned(),
        ))
    } else {
        Ok(HttpResponse::Ok().json(response))
    }
}

#[tracing::instrument(level = "info", skip(auth, app_data))]
pub async fn delete_job(
    auth: AuthDetails<RoleEnum>,
    app_data: Data<AppData>,
    job_id: Path<JobId>,
) -> Result<HttpResponse, DomainError> {
    ensure_admin(&auth)?;
    let job_id = job_id.into_inner();
    let pool = app_data.pool.clone();
    let deleted = web::block(move || {
        let mut conn = pool.get()?;
        actions::jobs::delete_job(&job_id, &mut conn)
    })
    .await??;
    if deleted == 0 {
        Err(DomainError::new_entity_does_not_exist_error(
            "Job not found".to_owned(),
        ))
    } else {
        Ok(HttpResponse::Ok()
            .json(MessageResponse::new("Job deleted".to_owned())))
    }
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn analytics(
    auth: AuthDetails<RoleEnum>,
    app_data: Data<AppData>,
) -> Result<HttpResponse, DomainError> {
    ensure_admin(&auth)?;
    let pool = app_data.pool.clone();
    let summary = web::block(move || {
        let mut conn = pool.get()?;
        actions::reports::get_analytics_summary(&mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().json(summary))
}

fn csv_response(report_type: ReportType, body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}-report.csv\"",
                report_type.as_str()
            ),
        ))
        .body(body)
}

fn render_report<T: CsvRecord + serde::Serialize>(
    report_type: ReportType,
    format: ReportFormat,
    rows: Vec<T>,
) -> HttpResponse {
    match format {
        ReportFormat::Csv => csv_response(report_type, to_csv(&rows)),
        ReportFormat::Json => HttpResponse::Ok().json(rows),
    }
}

#[tracing::instrument(level = "info", skip(auth, app_data))]
pub async fn export_report(
    auth: AuthDetails<RoleEnum>,
    app_data: Data<AppData>,
    report_type: Path<String>,
    query: Query<ReportQuery>,
) -> Result<HttpResponse, DomainError> {
    ensure_admin(&auth)?;
    let report_type = ReportType::from_str(&report_type.into_inner())?;
    let format = query.into_inner().format;
    let pool = app_data.pool.clone();
    let response = match report_type {
        ReportType::Users => {
            let rows = web::block(move || {
                let mut conn = pool.get()?;
                actions::reports::get_users_report(&mut conn)
            })
            .await??;
            render_report(report_type, format, rows)
        }
        ReportType::Jobs => {
            let rows = web::block(move || {
                let mut conn = pool.get()?;
                actions::reports::get_jobs_report(&mut conn)
            })
            .await??;
            render_report(report_type, format, rows)
        }
        ReportType::Applications => {
            let rows = web::block(move || {
                let mut conn = pool.get()?;
                actions::reports::get_applications_report(&mut conn)
            })
            .await??;
            render_report(report_type, format, rows)
        }
    };
    Ok(response)
}
