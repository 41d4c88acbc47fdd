use crate::actions;
use crate::errors::DomainError;
use crate::models::applications::{
    ApplicationId, NewApplication, StatusUpdate,
};
use crate::models::jobs::{JobId, JobInput, JobSearchQuery, JobUpdate, NewJob};
use crate::models::misc::MessageResponse;
use crate::models::roles::RoleEnum;
use crate::models::users::{UserId, VerifiedAuthDetails};
use crate::types::DbConnection;
use crate::AppData;
use actix_web::web::{self, Data, Json, Path, Query};
use actix_web::HttpResponse;

/// Fails unless the job exists and was posted by the given employer.
fn ensure_job_owner(
    job_id: &JobId,
    employer_id: &UserId,
    conn: &mut DbConnection,
) -> Result<(), DomainError> {
    let owner = actions::jobs::find_job_owner(job_id, conn)?.ok_or_else(
        || DomainError::new_entity_does_not_exist_error("Job not found".to_owned()),
    )?;
    if &owner == employer_id {
        Ok(())
    } else {
        Err(DomainError::new_forbidden_error(
            "job belongs to another employer".to_owned(),
        ))
    }
}

#[tracing::instrument(level = "info", skip(app_data))]
pub async fn search_jobs(
    app_data: Data<AppData>,
    query: Query<JobSearchQuery>,
) -> Result<HttpResponse, DomainError> {
    let query = query.into_inner();
    let pool = app_data.pool.clone();
    let jobs = web::block(move || {
        let mut conn = pool.get()?;
        actions::jobs::search_jobs(&query, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().json(jobs))
}

#[tracing::instrument(level = "info", skip(app_data))]
pub async fn get_job(
    app_data: Data<AppData>,
    job_id: Path<JobId>,
) -> Result<HttpResponse, DomainError> {
    let job_id = job_id.into_inner();
    let pool = app_data.pool.clone();
    let mb_job = web::block(move || {
        let mut conn = pool.get()?;
        actions::jobs::find_job_by_id(&job_id, &mut conn)
    })
    .await??;
    match mb_job {
        Some(job) => Ok(HttpResponse::Ok().json(job)),
        None => Err(DomainError::new_entity_does_not_exist_error(
            "Job not found".to_owned(),
        )),
    }
}

#[tracing::instrument(level = "info", skip(app_data))]
pub async fn my_jobs(
    auth: VerifiedAuthDetails,
    app_data: Data<AppData>,
) -> Result<HttpResponse, DomainError> {
    auth.require_role(&RoleEnum::Employer)?;
    let pool = app_data.pool.clone();
    let jobs = web::block(move || {
        let mut conn = pool.get()?;
        actions::jobs::get_jobs_by_employer(&auth.user_id, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().json(jobs))
}

#[tracing::instrument(level = "info", skip(app_data, payload))]
pub async fn create_job(
    auth: VerifiedAuthDetails,
    app_data: Data<AppData>,
    payload: Json<JobInput>,
) -> Result<HttpResponse, DomainError> {
    auth.require_role(&RoleEnum::Employer)?;
    let new_job = NewJob::from_input(auth.user_id, payload.into_inner());
    let pool = app_data.pool.clone();
    let _ = web::block(move || {
        let mut conn = pool.get()?;
        actions::jobs::insert_new_job(&new_job, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Created()
        .json(MessageResponse::new("Job posted successfully".to_owned())))
}

#[tracing::instrument(level = "info", skip(app_data, payload))]
pub async fn update_job(
    auth: VerifiedAuthDetails,
    app_data: Data<AppData>,
    job_id: Path<JobId>,
    payload: Json<JobUpdate>,
) -> Result<HttpResponse, DomainError> {
    auth.require_role(&RoleEnum::Employer)?;
    let job_id = job_id.into_inner();
    let changes = payload.into_inner();
    let pool = app_data.pool.clone();
    let _ = web::block(move || {
        let mut conn = pool.get()?;
        ensure_job_owner(&job_id, &auth.user_id, &mut conn)?;
        if changes.is_empty() {
            Ok(0)
        } else {
            actions::jobs::update_job(&job_id, &changes, &mut conn)
        }
    })
    .await??;
    Ok(HttpResponse::Ok()
        .json(MessageResponse::new("Job updated successfully".to_owned())))
}

#[tracing::instrument(level = "info", skip(app_data))]
pub async fn delete_job(
    auth: VerifiedAuthDetails,
    app_data: Data<AppData>,
    job_id: Path<JobId>,
) -> Result<HttpResponse, DomainError> {
    auth.require_role(&RoleEnum::Employer)?;
    let job_id = job_id.into_inner();
    let pool = app_data.pool.clone();
    let _ = web::block(move || {
        let mut conn = pool.get()?;
        ensure_job_owner(&job_id, &auth.user_id, &mut conn)?;
        actions::jobs::delete_job(&job_id, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok()
        .json(MessageResponse::new("Job deleted successfully".to_owned())))
}

#[tracing::instrument(level = "info", skip(app_data))]
pub async fn apply_to_job(
    auth: VerifiedAuthDetails,
    app_data: Data<AppData>,
    job_id: Path<JobId>,
) -> Result<HttpResponse, DomainError> {
    auth.require_role(&RoleEnum::JobSeeker)?;
    let job_id = job_id.into_inner();
    let pool = app_data.pool.clone();
    let _ = web::block(move || {
        let mut conn = pool.get()?;
        let _ = actions::jobs::find_job_owner(&job_id, &mut conn)?.ok_or_else(
            || {
                DomainError::new_entity_does_not_exist_error(
                    "Job not found".to_owned(),
                )
            },
        )?;
        // friendly pre-check; a lost race still hits the unique constraint
        if actions::applications::has_applied(
            &job_id,
            &auth.user_id,
            &mut conn,
        )? {
            return Err(DomainError::new_duplicate_value_error(
                "Already applied".to_owned(),
            ));
        }
        let application = NewApplication::new(job_id, auth.user_id);
        actions::applications::insert_application(&application, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Created()
        .json(MessageResponse::new("Applied successfully".to_owned())))
}

#[tracing::instrument(level = "info", skip(app_data))]
pub async fn applied_jobs(
    auth: VerifiedAuthDetails,
    app_data: Data<AppData>,
) -> Result<HttpResponse, DomainError> {
    auth.require_role(&RoleEnum::JobSeeker)?;
    let pool = app_data.pool.clone();
    let jobs = web::block(move || {
        let mut conn = pool.get()?;
        actions::applications::get_applied_jobs(&auth.user_id, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().json(jobs))
}

#[tracing::instrument(level = "info", skip(app_data))]
pub async fn job_applicants(
    auth: VerifiedAuthDetails,
    app_data: Data<AppData>,
    job_id: Path<JobId>,
) -> Result<HttpResponse, DomainError> {
    auth.require_role(&RoleEnum::Employer)?;
    let job_id = job_id.into_inner();
    let pool = app_data.pool.clone();
    let applicants = web::block(move || {
        let mut conn = pool.get()?;
        ensure_job_owner(&job_id, &auth.user_id, &mut conn)?;
        actions::applications::get_applicants_for_job(&job_id, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Ok().json(applicants))
}

#[tracing::instrument(level = "info", skip(app_data))]
pub async fn all_applicants(
    auth: VerifiedAuthDetails,
    app_data: Data<AppData>,
) -> Result<HttpResponse, DomainError> {
    auth.require_role(&RoleEnum::Employer)?;
    let pool = app_data.pool.clone();
    let applicants = web::block(move || {
        let mut conn = pool.get()?;
        actions::applications::get_applicants_for_employer(
            &auth.user_id,
            &mut conn,
        )
    })
    .await??;
    Ok(HttpResponse::Ok().json(applicants))
}

#[tracing::instrument(level = "info", skip(app_data, payload))]
pub async fn update_application_status(
    auth: VerifiedAuthDetails,
    app_data: Data<AppData>,
    path: Path<(JobId, ApplicationId)>,
    payload: Json<StatusUpdate>,
) -> Result<HttpResponse, DomainError> {
    auth.require_role(&RoleEnum::Employer)?;
    let (job_id, application_id) = path.into_inner();
    let new_status = payload.into_inner().status;
    let pool = app_data.pool.clone();
    let updated = web::block(move || {
        let mut conn = pool.get()?;
        ensure_job_owner(&job_id, &auth.user_id, &mut conn)?;
        actions::applications::update_application_status(
            &job_id,
            &application_id,
            new_status,
            &mut conn,
        )
    })
    .await??;
    if updated == 0 {
        Err(DomainError::new_entity_does_not_exist_error(
            "Application not found".to_owned(),
        ))
    } else {
        Ok(HttpResponse::Ok()
            .json(MessageResponse::new("Status updated".to_owned())))
    }
}
