use serde::{Deserialize, Serialize};

use super::misc::{PaginationLimit, PaginationOffset};
use super::users::UserId;
use crate::schema::jobs;
use derive_more::{Display, Into};

#[derive(
    Debug,
    Clone,
    Eq,
    Hash,
    PartialEq,
    Deserialize,
    Serialize,
    Display,
    Into,
    DieselNewType,
)]
pub struct JobId(i32);

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable)]
#[diesel(table_name = jobs)]
pub struct Job {
    pub id: JobId,
    pub employer_id: UserId,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub salary: Option<f64>,
    pub location: Option<String>,
    pub company_name: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

/// Request body for posting a job. The employer id always comes from the
/// caller's token, never from the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct JobInput {
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub salary: Option<f64>,
    pub location: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = jobs)]
pub struct NewJob {
    pub employer_id: UserId,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub salary: Option<f64>,
    pub location: Option<String>,
    pub company_name: Option<String>,
}

impl NewJob {
    pub fn from_input(employer_id: UserId, input: JobInput) -> NewJob {
        NewJob::new(
            employer_id,
            input.title,
            input.description,
            input.requirements,
            input.salary,
            input.location,
            input.company_name,
        )
    }
}

#[derive(Debug, Clone, Deserialize, AsChangeset)]
#[diesel(table_name = jobs)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary: Option<f64>,
    pub location: Option<String>,
    pub company_name: Option<String>,
}

impl JobUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.requirements.is_none()
            && self.salary.is_none()
            && self.location.is_none()
            && self.company_name.is_none()
    }
}

/// Job row joined with the posting employer's display name.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
pub struct JobListing {
    pub id: JobId,
    pub employer_id: UserId,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub salary: Option<f64>,
    pub location: Option<String>,
    pub company_name: Option<String>,
    pub employer_name: String,
}

/// Admin view of a job, joined with the employer's company profile.
#[derive(Debug, Clone, Serialize, Queryable)]
pub struct AdminJobListing {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub salary: Option<f64>,
    pub location: Option<String>,
    pub employer_name: String,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
}

/// Query string accepted by the public job search. All filters are
/// optional and AND-combined.
#[derive(Debug, Clone, Deserialize)]
pub struct JobSearchQuery {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub limit: Option<PaginationLimit>,
    pub offset: Option<PaginationOffset>,
}
