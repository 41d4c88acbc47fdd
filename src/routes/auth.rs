use std::collections::HashSet;
use std::future::{ready, Ready};

use crate::actions;
use crate::errors::DomainError;
use crate::models::misc::MessageResponse;
use crate::models::roles::RoleEnum;
use crate::models::users::{
    LoginResponse, NewUser, ProfileUpdate, UserLogin, UserSummary,
    VerifiedAuthDetails,
};
use crate::{utils, AppData};
use actix_web::dev::{Payload, ServiceRequest};
use actix_web::web::{self, Data};
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse};
use bcrypt::verify;
use jwt_simple::prelude::*;

pub fn get_claims(
    jwt_key: &HS256Key,
    token: &str,
) -> Result<JWTClaims<VerifiedAuthDetails>, DomainError> {
    jwt_key
        .verify_token::<VerifiedAuthDetails>(token, None)
        .map_err(|err| {
            DomainError::anyhow_unauthorized("Failed to verify token", err)
        })
}

/// Authenticates a request by decoding the bearer token into the
/// caller's identity. Role checks happen in the handlers.
impl FromRequest for VerifiedAuthDetails {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let res = req
            .app_data::<Data<AppData>>()
            .ok_or_else(|| {
                DomainError::new_uninitialized_error(
                    "app data was not initialized".to_owned(),
                )
            })
            .and_then(|app_data| {
                let token = utils::extract_auth_token(req.headers())?;
                let claims = get_claims(&app_data.jwt_key, &token)?;
                Ok(claims.custom)
            });
        ready(res)
    }
}

/// Role extractor for the grants middleware on the admin scope.
pub async fn extract(
    req: &mut ServiceRequest,
) -> Result<HashSet<RoleEnum>, Error> {
    let app_data =
        req.app_data::<Data<AppData>>().cloned().ok_or_else(|| {
            Error::from(DomainError::new_uninitialized_error(
                "app data was not initialized".to_owned(),
            ))
        })?;
    let token = utils::extract_auth_token(req.headers()).map_err(Error::from)?;
    let claims = get_claims(&app_data.jwt_key, &token).map_err(Error::from)?;
    Ok(HashSet::from([claims.custom.role]))
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn register(
    app_data: Data<AppData>,
    payload: web::Json<NewUser>,
) -> Result<HttpResponse, DomainError> {
    let new_user = payload.into_inner();
    let hash_cost = app_data.config.hash_cost;
    let pool = app_data.pool.clone();
    let _ = web::block(move || {
        let mut conn = pool.get()?;
        actions::users::insert_new_user(new_user, hash_cost, &mut conn)
    })
    .await??;
    Ok(HttpResponse::Created().json(MessageResponse::new(
        "User registered successfully".to_owned(),
    )))
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn login(
    app_data: Data<AppData>,
    payload: web::Json<UserLogin>,
) -> Result<HttpResponse, DomainError> {
    let UserLogin { email, password } = payload.into_inner();
    let pool = app_data.pool.clone();
    let lookup_email = email.clone();
    let mb_user = web::block(move || {
        let mut conn = pool.get()?;
        actions::users::get_user_auth_details(&lookup_email, &mut conn)
    })
    .await??;
    // one generic message for both unknown email and wrong password,
    // so callers cannot enumerate accounts
    let user = mb_user.ok_or_else(|| {
        DomainError::new_unauthorized_error("Invalid credentials".to_owned())
    })?;
    let password_hash = user.password.clone();
    let valid =
        web::block(move || verify(password.as_str(), &password_hash)).await??;
    if !valid {
        return Err(DomainError::new_unauthorized_error(
            "Invalid credentials".to_owned(),
        ));
    }

    let auth_details = VerifiedAuthDetails {
        user_id: user.id.clone(),
        role: user.role.clone(),
    };
    let claims = Claims::with_custom_claims(
        auth_details,
        Duration::from_secs(app_data.config.token_expiry_secs),
    );
    let token = app_data.jwt_key.authenticate(claims).map_err(|err| {
        DomainError::anyhow_unauthorized("Failed to sign token", err)
    })?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: UserSummary {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        },
    }))
}

#[tracing::instrument(level = "info", skip(app_data))]
pub async fn get_profile(
    auth: VerifiedAuthDetails,
    app_data: Data<AppData>,
) -> Result<HttpResponse, DomainError> {
    let pool = app_data.pool.clone();
    let uid = auth.user_id.clone();
    let mb_profile = web::block(move || {
        let mut conn = pool.get()?;
        actions::users::find_profile_by_uid(&uid, &mut conn)
    })
    .await??;
    match mb_profile {
        Some(profile) => Ok(HttpResponse::Ok().json(profile)),
        None => Err(DomainError::new_entity_does_not_exist_error(
            "User not found".to_owned(),
        )),
    }
}

#[tracing::instrument(level = "info", skip(app_data, payload))]
pub async fn update_profile(
    auth: VerifiedAuthDetails,
    app_data: Data<AppData>,
    payload: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, DomainError> {
    let changes = payload.into_inner();
    let response = MessageResponse::new("Profile updated successfully".to_owned());
    if changes.is_empty() {
        // nothing to write, mirror the success the client expects
        return Ok(HttpResponse::Ok().json(response));
    }
    let pool = app_data.pool.clone();
    let uid = auth.user_id.clone();
    let updated = web::block(move || {
        let mut conn = pool.get()?;
        actions::users::update_profile(&uid, &changes, &mut conn)
    })
    .await??;
    if updated == 0 {
        Err(DomainError::new_entity_does_not_exist_error(
            "User not found".to_owned(),
        ))
    } else {
        Ok(HttpResponse::Ok().json(response))
    }
}
