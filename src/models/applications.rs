use std::fmt;

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

use super::jobs::JobId;
use super::users::UserId;
use crate::schema::applications;
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
pub struct ApplicationId(i32);

#[derive(DbEnum, Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
#[ExistingTypePath = "crate::schema::sql_types::ApplicationStatus"]
#[DbValueStyle = "snake_case"]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    Reviewed,
    Shortlisted,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable)]
#[diesel(table_name = applications)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub seeker_id: UserId,
    pub status: ApplicationStatus,
    pub created_at: chrono::NaiveDateTime,
}

// status is filled in by the store default ('applied')
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = applications)]
pub struct NewApplication {
    pub job_id: JobId,
    pub seeker_id: UserId,
}

/// Body of the employer-side status change. Deserializing into the enum
/// is what rejects statuses outside the closed set.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

/// One applicant for a single job, as seen by the owning employer.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
pub struct JobApplicant {
    pub application_id: ApplicationId,
    pub status: ApplicationStatus,
    pub name: String,
    pub email: String,
    pub skills: Option<String>,
    pub resume: Option<String>,
}

/// Applicant row across all of an employer's jobs.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
pub struct EmployerApplicant {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub status: ApplicationStatus,
    pub job_title: String,
    pub name: String,
    pub email: String,
    pub skills: Option<String>,
    pub resume: Option<String>,
}

/// A seeker's own application joined with the job it targets.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
pub struct AppliedJob {
    pub application_id: ApplicationId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub status: ApplicationStatus,
}
