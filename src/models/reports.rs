use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::applications::{ApplicationId, ApplicationStatus};
use super::jobs::JobId;
use super::roles::RoleEnum;
use super::users::UserId;
use crate::errors::DomainError;
use crate::utils::csv::CsvRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Users,
    Jobs,
    Applications,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Users => "users",
            ReportType::Jobs => "jobs",
            ReportType::Applications => "applications",
        }
    }
}

impl FromStr for ReportType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(ReportType::Users),
            "jobs" => Ok(ReportType::Jobs),
            "applications" => Ok(ReportType::Applications),
            _ => Err(DomainError::new_field_validation_error(
                "Invalid report type. Use users|jobs|applications".to_owned(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub format: ReportFormat,
}

#[derive(Debug, Clone, Serialize, Queryable)]
pub struct RoleCount {
    pub role: RoleEnum,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Queryable)]
pub struct StatusCount {
    pub status: ApplicationStatus,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_users: i64,
    pub total_jobs: i64,
    pub total_applications: i64,
    pub users_by_role: Vec<RoleCount>,
    pub applications_by_status: Vec<StatusCount>,
}

#[derive(Debug, Clone, Serialize, Queryable)]
pub struct UserReportRow {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: RoleEnum,
    pub skills: Option<String>,
    pub resume: Option<String>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
}

impl CsvRecord for UserReportRow {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "email",
            "role",
            "skills",
            "resume",
            "company_name",
            "company_description",
        ]
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.role.to_string(),
            self.skills.clone().unwrap_or_default(),
            self.resume.clone().unwrap_or_default(),
            self.company_name.clone().unwrap_or_default(),
            self.company_description.clone().unwrap_or_default(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Queryable)]
pub struct JobReportRow {
    pub id: JobId,
    pub title: String,
    pub location: Option<String>,
    pub salary: Option<f64>,
    pub company_name: Option<String>,
    pub employer_name: String,
}

impl CsvRecord for JobReportRow {
    fn headers() -> &'static [&'static str] {
        &["id", "title", "location", "salary", "company_name", "employer_name"]
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.location.clone().unwrap_or_default(),
            self.salary.map(|s| s.to_string()).unwrap_or_default(),
            self.company_name.clone().unwrap_or_default(),
            self.employer_name.clone(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Queryable)]
pub struct ApplicationReportRow {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub seeker_id: UserId,
    pub status: ApplicationStatus,
    pub job_title: String,
    pub seeker_name: String,
    pub seeker_email: String,
}

impl CsvRecord for ApplicationReportRow {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "job_id",
            "seeker_id",
            "status",
            "job_title",
            "seeker_name",
            "seeker_email",
        ]
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.job_id.to_string(),
            self.seeker_id.to_string(),
            self.status.to_string(),
            self.job_title.clone(),
            self.seeker_name.clone(),
            self.seeker_email.clone(),
        ]
    }
}
