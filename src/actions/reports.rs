use diesel::dsl::count_star;
use diesel::prelude::*;

use crate::errors::DomainError;
use crate::models::reports::{
    AnalyticsSummary, ApplicationReportRow, JobReportRow, RoleCount,
    StatusCount, UserReportRow,
};
use crate::types::DbConnection;

pub fn get_analytics_summary(
    conn: &mut DbConnection,
) -> Result<AnalyticsSummary, DomainError> {
    use crate::schema::applications::dsl as applications;
    use crate::schema::jobs::dsl as jobs;
    use crate::schema::users::dsl as users;

    let total_users = users::users.count().get_result::<i64>(conn)?;
    let total_jobs = jobs::jobs.count().get_result::<i64>(conn)?;
    let total_applications =
        applications::applications.count().get_result::<i64>(conn)?;
    let users_by_role = users::users
        .group_by(users::role)
        .select((users::role, count_star()))
        .load::<RoleCount>(conn)?;
    let applications_by_status = applications::applications
        .group_by(applications::status)
        .select((applications::status, count_star()))
        .load::<StatusCount>(conn)?;

    Ok(AnalyticsSummary {
        total_users,
        total_jobs,
        total_applications,
        users_by_role,
        applications_by_status,
    })
}

pub fn get_users_report(
    conn: &mut DbConnection,
) -> Result<Vec<UserReportRow>, DomainError> {
    use crate::schema::users::dsl as users;
    Ok(users::users
        .select((
            users::id,
            users::name,
            users::email,
            users::role,
            users::skills,
            users::resume,
            users::company_name,
            users::company_description,
        ))
        .order_by(users::id.desc())
        .load::<UserReportRow>(conn)?)
}

pub fn get_jobs_report(
    conn: &mut DbConnection,
) -> Result<Vec<JobReportRow>, DomainError> {
    use crate::schema::jobs::dsl as jobs;
    use crate::schema::users::dsl as users;
    Ok(jobs::jobs
        .inner_join(users::users)
        .select((
            jobs::id,
            jobs::title,
            jobs::location,
            jobs::salary,
            jobs::company_name,
            users::name,
        ))
        .order_by(jobs::id.desc())
        .load::<JobReportRow>(conn)?)
}

pub fn get_applications_report(
    conn: &mut DbConnection,
) -> Result<Vec<ApplicationReportRow>, DomainError> {
    use crate::schema::applications::dsl as applications;
    use crate::schema::jobs::dsl as jobs;
    use crate::schema::users::dsl as users;
    Ok(applications::applications
        .inner_join(jobs::jobs)
        .inner_join(users::users)
        .select((
            applications::id,
            applications::job_id,
            applications::seeker_id,
            applications::status,
            jobs::title,
            users::name,
            users::email,
        ))
        .order_by(applications::id.desc())
        .load::<ApplicationReportRow>(conn)?)
}
