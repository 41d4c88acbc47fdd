use std::fmt;
use std::str::FromStr;

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

#[derive(DbEnum, Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
#[ExistingTypePath = "crate::schema::sql_types::UserRole"]
#[DbValueStyle = "snake_case"]
#[serde(rename_all = "snake_case")]
pub enum RoleEnum {
    JobSeeker,
    Employer,
    Admin,
}

impl RoleEnum {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleEnum::JobSeeker => "job_seeker",
            RoleEnum::Employer => "employer",
            RoleEnum::Admin => "admin",
        }
    }
}

impl fmt::Display for RoleEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleEnum {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "job_seeker" => Ok(RoleEnum::JobSeeker),
            "employer" => Ok(RoleEnum::Employer),
            "admin" => Ok(RoleEnum::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}
