use crate::models::misc::ErrorResponse;
use actix_web::{HttpResponse, ResponseError};
use bcrypt::BcryptError;
use custom_error::custom_error;
use diesel::result::DatabaseErrorKind;
use std::convert::From;

custom_error! { #[derive(new)] #[allow(clippy::enum_variant_names)]
    pub DomainError
    PwdHashError {source: BcryptError} = "Failed to hash password",
    FieldValidationError {message: String} = "Validation error - {message}",
    DbError {source: diesel::result::Error} = "Database error",
    DbPoolError {source: r2d2::Error} = "Failed to get connection from pool",
    EntityDoesNotExistError {message: String} = "Entity does not exist - {message}",
    BlockingError {source: actix_web::error::BlockingError} = "Blocking error - {source}",
    UnauthorizedError {message: String} = "Authentication Error - {message}",
    ForbiddenError {message: String} = "Forbidden - {message}",
    DuplicateValueError {message: String} = "{message}",
    UninitializedError {message: String} = "A required component was not initialized - {message}",
    InternalError {message: String} = "An internal error occured - {message}"
}

impl DomainError {
    pub fn anyhow_unauthorized(
        message: &str,
        err: anyhow::Error,
    ) -> DomainError {
        DomainError::new_unauthorized_error(format!("{message}, {err:#}"))
    }
}

impl ResponseError for DomainError {
    fn error_response(&self) -> HttpResponse {
        let _ = tracing::error!("{:?}", self);
        let err = ErrorResponse::new(self.to_string());
        match self {
            DomainError::PwdHashError { source: _ } => {
                HttpResponse::InternalServerError().json(err)
            }
            DomainError::FieldValidationError { message: _ } => {
                HttpResponse::BadRequest().json(err)
            }
            DomainError::DbError { source } => match source {
                // unique violations are handled at the insert sites; any
                // that reach here still get a stable message rather than
                // the raw constraint text
                diesel::result::Error::DatabaseError(
                    DatabaseErrorKind::UniqueViolation,
                    _,
                ) => HttpResponse::BadRequest().json(ErrorResponse::new(
                    "Duplicate value".to_owned(),
                )),
                source => HttpResponse::InternalServerError()
                    .json(ErrorResponse::new(source.to_string())),
            },
            DomainError::DbPoolError { source: _ } => {
                HttpResponse::InternalServerError().json(err)
            }
            DomainError::EntityDoesNotExistError { message: _ } => {
                HttpResponse::NotFound().json(err)
            }
            DomainError::BlockingError { source: _ } => {
                HttpResponse::InternalServerError().json(err)
            }
            DomainError::UnauthorizedError { message: _ } => {
                HttpResponse::Unauthorized().json(err)
            }
            DomainError::ForbiddenError { message: _ } => {
                HttpResponse::Forbidden().json(err)
            }
            DomainError::DuplicateValueError { message: _ } => {
                HttpResponse::BadRequest().json(err)
            }
            DomainError::UninitializedError { message: _ } => {
                HttpResponse::InternalServerError().json(err)
            }
            DomainError::InternalError { message: _ } => {
                HttpResponse::InternalServerError().json(err)
            }
        }
    }
}
