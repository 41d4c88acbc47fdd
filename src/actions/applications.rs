use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;

use crate::errors::DomainError;
use crate::models::applications::{
    ApplicationId, ApplicationStatus, AppliedJob, EmployerApplicant,
    JobApplicant, NewApplication,
};
use crate::models::jobs::JobId;
use crate::models::users::UserId;
use crate::types::DbConnection;

pub fn has_applied(
    job_id: &JobId,
    seeker_id: &UserId,
    conn: &mut DbConnection,
) -> Result<bool, DomainError> {
    use crate::schema::applications::dsl as applications;
    Ok(diesel::select(diesel::dsl::exists(
        applications::applications
            .filter(applications::job_id.eq(job_id))
            .filter(applications::seeker_id.eq(seeker_id)),
    ))
    .get_result::<bool>(conn)?)
}

/// Inserts an application. Losing a race against a concurrent identical
/// apply hits the (job_id, seeker_id) unique constraint, which surfaces
/// the same way as the friendly pre-check.
pub fn insert_application(
    new_application: &NewApplication,
    conn: &mut DbConnection,
) -> Result<usize, DomainError> {
    use crate::schema::applications::dsl as applications;
    diesel::insert_into(applications::applications)
        .values(new_application)
        .execute(conn)
        .map_err(|err| match err {
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _,
            ) => DomainError::new_duplicate_value_error(
                "Already applied".to_owned(),
            ),
            err => DomainError::from(err),
        })
}

/// Applications for one job, joined with each seeker's profile.
pub fn get_applicants_for_job(
    job_id: &JobId,
    conn: &mut DbConnection,
) -> Result<Vec<JobApplicant>, DomainError> {
    use crate::schema::applications::dsl as applications;
    use crate::schema::users::dsl as users;
    Ok(applications::applications
        .inner_join(users::users)
        .select((
            applications::id,
            applications::status,
            users::name,
            users::email,
            users::skills,
            users::resume,
        ))
        .filter(applications::job_id.eq(job_id))
        .load::<JobApplicant>(conn)?)
}

/// Applications across every job owned by one employer, newest first.
pub fn get_applicants_for_employer(
    employer_id: &UserId,
    conn: &mut DbConnection,
) -> Result<Vec<EmployerApplicant>, DomainError> {
    use crate::schema::applications::dsl as applications;
    use crate::schema::jobs::dsl as jobs;
    use crate::schema::users::dsl as users;
    Ok(applications::applications
        .inner_join(jobs::jobs)
        .inner_join(users::users)
        .select((
            applications::id,
            applications::job_id,
            applications::status,
            jobs::title,
            users::name,
            users::email,
            users::skills,
            users::resume,
        ))
        .filter(jobs::employer_id.eq(employer_id))
        .order_by(applications::id.desc())
        .load::<EmployerApplicant>(conn)?)
}

pub fn get_applied_jobs(
    seeker_id: &UserId,
    conn: &mut DbConnection,
) -> Result<Vec<AppliedJob>, DomainError> {
    use crate::schema::applications::dsl as applications;
    use crate::schema::jobs::dsl as jobs;
    Ok(applications::applications
        .inner_join(jobs::jobs)
        .select((
            applications::id,
            jobs::title,
            jobs::description,
            jobs::location,
            applications::status,
        ))
        .filter(applications::seeker_id.eq(seeker_id))
        .load::<AppliedJob>(conn)?)
}

/// Moves one application to a new status. Scoped to the job so an
/// application id from some other job cannot be touched.
pub fn update_application_status(
    job_id: &JobId,
    application_id: &ApplicationId,
    new_status: ApplicationStatus,
    conn: &mut DbConnection,
) -> Result<usize, DomainError> {
    use crate::schema::applications::dsl as applications;
    Ok(diesel::update(
        applications::applications
            .filter(applications::id.eq(application_id))
            .filter(applications::job_id.eq(job_id)),
    )
    .set(applications::status.eq(new_status))
    .execute(conn)?)
}
