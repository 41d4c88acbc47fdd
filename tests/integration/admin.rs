use crate::common;

use actix_web::dev::Service as _;
use actix_web::http::StatusCode;
use actix_web::test;
use job_portal::models::misc::ErrorResponse;
use job_portal::models::roles::RoleEnum;

#[actix_rt::test]
async fn admin_scope_without_token_is_unauthorized() {
    let app = common::test_app().await;
    let req = test::TestRequest::get().uri("/api/admin/users").to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn admin_scope_with_seeker_token_is_forbidden() {
    let app = common::test_app().await;
    let token = common::token_for(1, RoleEnum::JobSeeker);
    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .append_header(common::bearer(&token))
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(
        body,
        ErrorResponse::new("Forbidden - requires role admin".to_owned())
    );
}

#[actix_rt::test]
async fn analytics_with_employer_token_is_forbidden() {
    let app = common::test_app().await;
    let token = common::token_for(2, RoleEnum::Employer);
    let req = test::TestRequest::get()
        .uri("/api/admin/analytics")
        .append_header(common::bearer(&token))
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn report_with_unknown_type_is_bad_request() {
    let app = common::test_app().await;
    let token = common::token_for(3, RoleEnum::Admin);
    let req = test::TestRequest::get()
        .uri("/api/admin/reports/invoices")
        .append_header(common::bearer(&token))
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(
        body,
        ErrorResponse::new(
            "Validation error - Invalid report type. Use users|jobs|applications"
                .to_owned()
        )
    );
}

#[actix_rt::test]
async fn report_with_unknown_format_is_bad_request() {
    let app = common::test_app().await;
    let token = common::token_for(3, RoleEnum::Admin);
    let req = test::TestRequest::get()
        .uri("/api/admin/reports/users?format=xml")
        .append_header(common::bearer(&token))
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
