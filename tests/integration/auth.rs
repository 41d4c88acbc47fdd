use crate::common;

use actix_web::dev::Service as _;
use actix_web::http::StatusCode;
use actix_web::test;
use job_portal::models::misc::ErrorResponse;
use job_portal::models::roles::RoleEnum;

#[actix_rt::test]
async fn profile_without_token_is_unauthorized() {
    let app = common::test_app().await;
    let req = test::TestRequest::get().uri("/api/auth/profile").to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(
        body,
        ErrorResponse::new(
            "Authentication Error - Missing authorization header".to_owned()
        )
    );
}

#[actix_rt::test]
async fn profile_with_non_bearer_scheme_is_unauthorized() {
    let app = common::test_app().await;
    let req = test::TestRequest::get()
        .uri("/api/auth/profile")
        .append_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn profile_with_garbage_token_is_unauthorized() {
    let app = common::test_app().await;
    let req = test::TestRequest::get()
        .uri("/api/auth/profile")
        .append_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn profile_with_token_from_wrong_key_is_unauthorized() {
    use jwt_simple::prelude::*;

    let key = HS256Key::from_bytes(b"some-other-key");
    let details = job_portal::models::users::VerifiedAuthDetails {
        user_id: 1u32.try_into().unwrap(),
        role: RoleEnum::JobSeeker,
    };
    let claims = Claims::with_custom_claims(details, Duration::from_hours(1));
    let token = key.authenticate(claims).unwrap();

    let app = common::test_app().await;
    let req = test::TestRequest::get()
        .uri("/api/auth/profile")
        .append_header(common::bearer(&token))
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn registering_twice_with_same_email_is_rejected() {
    let (_pg, connspec) = common::pg_database().await.unwrap();
    let app = common::db_test_app(&connspec).await.unwrap();

    let status =
        common::register_user("jane@example.com", "hunter22", "job_seeker", &app)
            .await;
    assert_eq!(status, StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .append_header(("content-type", "application/json"))
        .set_payload(
            r#"{"name":"jane2","email":"jane@example.com","password":"other","role":"employer"}"#,
        )
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body, ErrorResponse::new("User already exists".to_owned()));

    // the original credentials still log in
    let login = common::login_user("jane@example.com", "hunter22", &app).await;
    assert_eq!(login.user.email, "jane@example.com");
}

#[actix_rt::test]
async fn login_failures_share_one_message() {
    let (_pg, connspec) = common::pg_database().await.unwrap();
    let app = common::db_test_app(&connspec).await.unwrap();

    let status =
        common::register_user("jane@example.com", "hunter22", "job_seeker", &app)
            .await;
    assert_eq!(status, StatusCode::CREATED);

    let attempt = |email: &str, password: &str| {
        test::TestRequest::post()
            .uri("/api/auth/login")
            .append_header(("content-type", "application/json"))
            .set_payload(format!(
                r#"{{"email":"{email}","password":"{password}"}}"#
            ))
            .to_request()
    };

    let wrong_password =
        app.call(attempt("jane@example.com", "nope")).await.unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password: ErrorResponse =
        test::read_body_json(wrong_password).await;

    let unknown_email =
        app.call(attempt("nobody@example.com", "nope")).await.unwrap();
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email: ErrorResponse =
        test::read_body_json(unknown_email).await;

    // no way to tell a bad password from a missing account
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(
        wrong_password,
        ErrorResponse::new(
            "Authentication Error - Invalid credentials".to_owned()
        )
    );
}

#[actix_rt::test]
async fn issued_token_matches_the_authenticated_row() {
    use jwt_simple::prelude::*;

    let (_pg, connspec) = common::pg_database().await.unwrap();
    let app = common::db_test_app(&connspec).await.unwrap();

    let status =
        common::register_user("boss@example.com", "hunter22", "employer", &app)
            .await;
    assert_eq!(status, StatusCode::CREATED);
    let login = common::login_user("boss@example.com", "hunter22", &app).await;

    let key = HS256Key::from_bytes(common::TEST_JWT_KEY.as_bytes());
    let claims = key
        .verify_token::<job_portal::models::users::VerifiedAuthDetails>(
            &login.token,
            None,
        )
        .unwrap();
    assert_eq!(claims.custom.user_id, login.user.id);
    assert_eq!(claims.custom.role, RoleEnum::Employer);
    assert_eq!(login.user.role, RoleEnum::Employer);
}

#[actix_rt::test]
async fn login_with_malformed_body_is_bad_request() {
    let app = common::test_app().await;
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .append_header(("content-type", "application/json"))
        .set_payload(r#"{"email":"jane@example.com"}"#)
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn register_with_unknown_role_is_bad_request() {
    let app = common::test_app().await;
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .append_header(("content-type", "application/json"))
        .set_payload(
            r#"{"name":"jane","email":"jane@example.com","password":"hunter22","role":"wizard"}"#,
        )
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
