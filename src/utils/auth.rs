use actix_web::http::header;

use crate::errors::DomainError;

/// Pulls the raw token out of an `Authorization: Bearer <token>` header.
pub fn extract_auth_token(
    headers: &header::HeaderMap,
) -> Result<String, DomainError> {
    let header_value = headers.get(header::AUTHORIZATION).ok_or_else(|| {
        DomainError::new_unauthorized_error(
            "Missing authorization header".to_owned(),
        )
    })?;
    let value = header_value.to_str().map_err(|_| {
        DomainError::new_unauthorized_error(
            "Malformed authorization header".to_owned(),
        )
    })?;
    value
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            DomainError::new_unauthorized_error(
                "Expected bearer authorization".to_owned(),
            )
        })
}
