use diesel::prelude::*;

use crate::errors::DomainError;
use crate::models::jobs::{
    AdminJobListing, JobId, JobListing, JobSearchQuery, JobUpdate, NewJob,
};
use crate::models::users::UserId;
use crate::types::DbConnection;

pub fn search_jobs(
    query: &JobSearchQuery,
    conn: &mut DbConnection,
) -> Result<Vec<JobListing>, DomainError> {
    use crate::schema::jobs::dsl as jobs;
    use crate::schema::users::dsl as users;

    let mut q = jobs::jobs
        .inner_join(users::users)
        .select((
            jobs::id,
            jobs::employer_id,
            jobs::title,
            jobs::description,
            jobs::requirements,
            jobs::salary,
            jobs::location,
            jobs::company_name,
            users::name,
        ))
        .into_boxed();

    if let Some(keyword) = &query.keyword {
        let pattern = format!("%{keyword}%");
        q = q.filter(
            jobs::title
                .like(pattern.clone())
                .or(jobs::description.like(pattern.clone()))
                .or(jobs::requirements.assume_not_null().like(pattern)),
        );
    }
    if let Some(location) = &query.location {
        q = q.filter(
            jobs::location
                .assume_not_null()
                .like(format!("%{location}%")),
        );
    }
    if let Some(min) = query.salary_min {
        q = q.filter(jobs::salary.ge(min));
    }
    if let Some(max) = query.salary_max {
        q = q.filter(jobs::salary.le(max));
    }

    let limit = query.limit.clone().unwrap_or_default();
    let offset = query.offset.clone().unwrap_or_default();

    Ok(q.order_by(jobs::id.desc())
        .offset(offset.as_uint().into())
        .limit(limit.as_uint().into())
        .load::<JobListing>(conn)?)
}

pub fn find_job_by_id(
    job_id: &JobId,
    conn: &mut DbConnection,
) -> Result<Option<JobListing>, DomainError> {
    use crate::schema::jobs::dsl as jobs;
    use crate::schema::users::dsl as users;
    Ok(jobs::jobs
        .inner_join(users::users)
        .select((
            jobs::id,
            jobs::employer_id,
            jobs::title,
            jobs::description,
            jobs::requirements,
            jobs::salary,
            jobs::location,
            jobs::company_name,
            users::name,
        ))
        .filter(jobs::id.eq(job_id))
        .first::<JobListing>(conn)
        .optional()?)
}

pub fn get_jobs_by_employer(
    employer_id: &UserId,
    conn: &mut DbConnection,
) -> Result<Vec<JobListing>, DomainError> {
    use crate::schema::jobs::dsl as jobs;
    use crate::schema::users::dsl as users;
    Ok(jobs::jobs
        .inner_join(users::users)
        .select((
            jobs::id,
            jobs::employer_id,
            jobs::title,
            jobs::description,
            jobs::requirements,
            jobs::salary,
            jobs::location,
            jobs::company_name,
            users::name,
        ))
        .filter(jobs::employer_id.eq(employer_id))
        .order_by(jobs::id.desc())
        .load::<JobListing>(conn)?)
}

pub fn get_all_jobs(
    conn: &mut DbConnection,
) -> Result<Vec<AdminJobListing>, DomainError> {
    use crate::schema::jobs::dsl as jobs;
    use crate::schema::users::dsl as users;
    Ok(jobs::jobs
        .inner_join(users::users)
        .select((
            jobs::id,
            jobs::title,
            jobs::description,
            jobs::requirements,
            jobs::salary,
            jobs::location,
            users::name,
            users::company_name,
            users::company_description,
        ))
        .order_by(jobs::id.desc())
        .load::<AdminJobListing>(conn)?)
}

/// Looks up who posted a job, for the ownership checks on mutation.
pub fn find_job_owner(
    job_id: &JobId,
    conn: &mut DbConnection,
) -> Result<Option<UserId>, DomainError> {
    use crate::schema::jobs::dsl as jobs;
    Ok(jobs::jobs
        .select(jobs::employer_id)
        .filter(jobs::id.eq(job_id))
        .first::<UserId>(conn)
        .optional()?)
}

pub fn insert_new_job(
    new_job: &NewJob,
    conn: &mut DbConnection,
) -> Result<usize, DomainError> {
    use crate::schema::jobs::dsl as jobs;
    Ok(diesel::insert_into(jobs::jobs)
        .values(new_job)
        .execute(conn)?)
}

pub fn update_job(
    job_id: &JobId,
    changes: &JobUpdate,
    conn: &mut DbConnection,
) -> Result<usize, DomainError> {
    use crate::schema::jobs::dsl as jobs;
    Ok(diesel::update(jobs::jobs.filter(jobs::id.eq(job_id)))
        .set(changes)
        .execute(conn)?)
}

pub fn delete_job(
    job_id: &JobId,
    conn: &mut DbConnection,
) -> Result<usize, DomainError> {
    use crate::schema::jobs::dsl as jobs;
    Ok(diesel::delete(jobs::jobs.filter(jobs::id.eq(job_id)))
        .execute(conn)?)
}
