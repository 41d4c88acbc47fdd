use serde::{Deserialize, Serialize};

use super::roles::RoleEnum;
use crate::errors::DomainError;
use crate::schema::users;
use derive_more::{Display, Into};
use std::convert::TryFrom;
use std::{convert::TryInto, str::FromStr};
use validators::prelude::*;

///newtype to constrain id to positive int values
#[derive(
    Debug,
    Clone,
    Eq,
    Hash,
    PartialEq,
    Deserialize,
    Display,
    Into,
    Serialize,
    DieselNewType,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct UserId(i32);

impl UserId {
    pub fn as_uint(&self) -> u32 {
        //safe to unwrap since the newtype does not allow negative values
        self.0.try_into().unwrap()
    }
}

impl From<UserId> for u32 {
    fn from(s: UserId) -> u32 {
        s.as_uint()
    }
}

impl FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(num) = s.parse::<u32>() {
            num.try_into()
        } else {
            Err("expected unsigned int, received string".to_owned())
        }
    }
}

impl TryFrom<u32> for UserId {
    type Error = String;
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        value
            .try_into()
            .map_err(|err| format!("error while converting user_id: {}", err))
            .map(UserId)
    }
}

#[derive(Validator, Debug, Clone, DieselNewType)]
#[validator(line(char_length(max = 200)))]
pub struct Password(String);

impl Password {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The custom claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedAuthDetails {
    pub user_id: UserId,
    pub role: RoleEnum,
}

impl VerifiedAuthDetails {
    pub fn require_role(
        &self,
        role: &RoleEnum,
    ) -> Result<(), DomainError> {
        if &self.role == role {
            Ok(())
        } else {
            Err(DomainError::new_forbidden_error(format!(
                "requires role {role}"
            )))
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Queryable, Identifiable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: Password,
    pub role: RoleEnum,
    pub skills: Option<String>,
    pub resume: Option<String>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

/// Everything a client may see about a user. Never carries the password.
#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: RoleEnum,
    pub skills: Option<String>,
    pub resume: Option<String>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: RoleEnum,
}

/// Row shape used by the login path only.
#[derive(Debug, Clone, Queryable)]
pub struct UserAuthDetails {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: RoleEnum,
}

#[derive(Debug, Clone, Insertable, Deserialize)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: Password,
    pub role: RoleEnum,
    pub skills: Option<String>,
    pub resume: Option<String>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: Password,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

/// Partial self-service update. Absent fields are left untouched.
#[derive(Debug, Clone, Deserialize, AsChangeset)]
#[diesel(table_name = users)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub skills: Option<String>,
    pub resume: Option<String>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.skills.is_none()
            && self.resume.is_none()
            && self.company_name.is_none()
            && self.company_description.is_none()
    }
}

/// Admin-side partial update. The only path that may change a role.
#[derive(Debug, Clone, Deserialize, AsChangeset)]
#[diesel(table_name = users)]
pub struct AdminUserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<RoleEnum>,
    pub skills: Option<String>,
    pub resume: Option<String>,
    pub company_name: Option<String>,
    pub company_description: Option<String>,
}

impl AdminUserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.skills.is_none()
            && self.resume.is_none()
            && self.company_name.is_none()
            && self.company_description.is_none()
    }
}
