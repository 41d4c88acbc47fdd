use crate::common;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::Error as AxError;
use job_portal::models::jobs::JobListing;
use job_portal::models::misc::{ErrorResponse, MessageResponse};
use job_portal::models::roles::RoleEnum;

async fn post_job(
    token: &str,
    body: &str,
    app: &impl Service<
        Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = AxError,
    >,
) -> StatusCode {
    let req = test::TestRequest::post()
        .uri("/api/jobs")
        .append_header(common::bearer(token))
        .append_header(("content-type", "application/json"))
        .set_payload(body.to_owned())
        .to_request();
    app.call(req).await.unwrap().status()
}

async fn search_jobs(
    uri: &str,
    app: &impl Service<
        Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = AxError,
    >,
) -> Vec<JobListing> {
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    test::read_body_json(resp).await
}

#[actix_rt::test]
async fn search_with_non_numeric_limit_is_bad_request() {
    let app = common::test_app().await;
    let req = test::TestRequest::get()
        .uri("/api/jobs?limit=abc")
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn search_with_negative_offset_is_bad_request() {
    let app = common::test_app().await;
    let req = test::TestRequest::get()
        .uri("/api/jobs?offset=-1")
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn search_with_non_numeric_salary_is_bad_request() {
    let app = common::test_app().await;
    let req = test::TestRequest::get()
        .uri("/api/jobs?salary_min=lots")
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn get_job_with_non_numeric_id_is_bad_request() {
    let app = common::test_app().await;
    let req = test::TestRequest::get().uri("/api/jobs/abc").to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn posting_a_job_without_token_is_unauthorized() {
    let app = common::test_app().await;
    let req = test::TestRequest::post()
        .uri("/api/jobs")
        .append_header(("content-type", "application/json"))
        .set_payload(r#"{"title":"Backend dev","description":"Rust"}"#)
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn posting_a_job_as_seeker_is_forbidden() {
    let app = common::test_app().await;
    let token = common::token_for(1, RoleEnum::JobSeeker);
    let req = test::TestRequest::post()
        .uri("/api/jobs")
        .append_header(common::bearer(&token))
        .append_header(("content-type", "application/json"))
        .set_payload(r#"{"title":"Backend dev","description":"Rust"}"#)
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(
        body,
        ErrorResponse::new("Forbidden - requires role employer".to_owned())
    );
}

#[actix_rt::test]
async fn listing_applied_jobs_as_employer_is_forbidden() {
    let app = common::test_app().await;
    let token = common::token_for(2, RoleEnum::Employer);
    let req = test::TestRequest::get()
        .uri("/api/jobs/applied")
        .append_header(common::bearer(&token))
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn applying_as_employer_is_forbidden() {
    let app = common::test_app().await;
    let token = common::token_for(2, RoleEnum::Employer);
    let req = test::TestRequest::post()
        .uri("/api/jobs/1/apply")
        .append_header(common::bearer(&token))
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn posted_job_is_owned_by_the_caller() {
    let (_pg, connspec) = common::pg_database().await.unwrap();
    let app = common::db_test_app(&connspec).await.unwrap();

    let _ =
        common::register_user("boss@example.com", "hunter22", "employer", &app)
            .await;
    let login = common::login_user("boss@example.com", "hunter22", &app).await;

    let status = post_job(
        &login.token,
        r#"{"title":"Backend dev","description":"Rust services"}"#,
        &app,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let jobs = search_jobs("/api/jobs", &app).await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].employer_id, login.user.id);
    assert_eq!(jobs[0].title, "Backend dev");
}

#[actix_rt::test]
async fn applying_twice_to_the_same_job_is_rejected() {
    let (_pg, connspec) = common::pg_database().await.unwrap();
    let app = common::db_test_app(&connspec).await.unwrap();

    let _ =
        common::register_user("boss@example.com", "hunter22", "employer", &app)
            .await;
    let employer =
        common::login_user("boss@example.com", "hunter22", &app).await;
    let _ = post_job(
        &employer.token,
        r#"{"title":"Backend dev","description":"Rust services"}"#,
        &app,
    )
    .await;
    let job_id = search_jobs("/api/jobs", &app).await[0].id.clone();

    let _ = common::register_user(
        "jane@example.com",
        "hunter22",
        "job_seeker",
        &app,
    )
    .await;
    let seeker = common::login_user("jane@example.com", "hunter22", &app).await;

    let apply = || {
        test::TestRequest::post()
            .uri(&format!("/api/jobs/{job_id}/apply"))
            .append_header(common::bearer(&seeker.token))
            .to_request()
    };

    let first = app.call(apply()).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let first: MessageResponse = test::read_body_json(first).await;
    assert_eq!(first, MessageResponse::new("Applied successfully".to_owned()));

    let second = app.call(apply()).await.unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let second: ErrorResponse = test::read_body_json(second).await;
    assert_eq!(second, ErrorResponse::new("Already applied".to_owned()));
}

#[actix_rt::test]
async fn deleting_a_job_is_restricted_to_its_owner() {
    let (_pg, connspec) = common::pg_database().await.unwrap();
    let app = common::db_test_app(&connspec).await.unwrap();

    let _ =
        common::register_user("owner@example.com", "hunter22", "employer", &app)
            .await;
    let owner =
        common::login_user("owner@example.com", "hunter22", &app).await;
    let _ = post_job(
        &owner.token,
        r#"{"title":"Backend dev","description":"Rust services"}"#,
        &app,
    )
    .await;
    let job_id = search_jobs("/api/jobs", &app).await[0].id.clone();

    let _ = common::register_user(
        "jane@example.com",
        "hunter22",
        "job_seeker",
        &app,
    )
    .await;
    let seeker = common::login_user("jane@example.com", "hunter22", &app).await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/jobs/{job_id}/apply"))
        .append_header(common::bearer(&seeker.token))
        .to_request();
    assert_eq!(app.call(req).await.unwrap().status(), StatusCode::CREATED);

    let _ = common::register_user(
        "other@example.com",
        "hunter22",
        "employer",
        &app,
    )
    .await;
    let other =
        common::login_user("other@example.com", "hunter22", &app).await;
    let req = test::TestRequest::delete()
        .uri(&format!("/api/jobs/{job_id}"))
        .append_header(common::bearer(&other.token))
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/jobs/{job_id}"))
        .append_header(common::bearer(&owner.token))
        .to_request();
    assert_eq!(app.call(req).await.unwrap().status(), StatusCode::OK);

    // the seeker's application went away with the job
    let req = test::TestRequest::get()
        .uri("/api/jobs/applied")
        .append_header(common::bearer(&seeker.token))
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let applied: Vec<serde_json::Value> = test::read_body_json(resp).await;
    assert!(applied.is_empty());
}

#[actix_rt::test]
async fn salary_filter_is_inclusive_and_newest_first() {
    let (_pg, connspec) = common::pg_database().await.unwrap();
    let app = common::db_test_app(&connspec).await.unwrap();

    let _ =
        common::register_user("boss@example.com", "hunter22", "employer", &app)
            .await;
    let login = common::login_user("boss@example.com", "hunter22", &app).await;
    for salary in [1000, 2000, 3000] {
        let status = post_job(
            &login.token,
            &format!(
                r#"{{"title":"Job {salary}","description":"d","salary":{salary}}}"#
            ),
            &app,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let jobs = search_jobs("/api/jobs?salary_min=1500", &app).await;
    let salaries: Vec<Option<f64>> =
        jobs.iter().map(|job| job.salary).collect();
    assert_eq!(salaries, vec![Some(3000.0), Some(2000.0)]);
}

#[actix_rt::test]
async fn duplicate_application_insert_hits_the_unique_constraint() {
    use actix_web::web;
    use job_portal::actions;
    use job_portal::errors::DomainError;
    use job_portal::models::applications::NewApplication;
    use job_portal::models::jobs::{JobInput, NewJob};
    use job_portal::models::users::{NewUser, Password};
    use validators::prelude::*;

    let (_pg, connspec) = common::pg_database().await.unwrap();
    let data = common::db_app_data(&connspec).await.unwrap();
    let pool = data.pool.clone();

    // insert the same application twice without the route's pre-check;
    // the store itself rejects the duplicate with the client message
    let err = web::block(move || {
        let mut conn = pool.get()?;
        let employer = actions::users::insert_new_user(
            NewUser {
                name: "boss".to_owned(),
                email: "boss@example.com".to_owned(),
                password: Password::parse_str("hunter22").unwrap(),
                role: RoleEnum::Employer,
                skills: None,
                resume: None,
                company_name: None,
                company_description: None,
            },
            4,
            &mut conn,
        )?;
        let seeker = actions::users::insert_new_user(
            NewUser {
                name: "jane".to_owned(),
                email: "jane@example.com".to_owned(),
                password: Password::parse_str("hunter22").unwrap(),
                role: RoleEnum::JobSeeker,
                skills: None,
                resume: None,
                company_name: None,
                company_description: None,
            },
            4,
            &mut conn,
        )?;
        let _ = actions::jobs::insert_new_job(
            &NewJob::from_input(
                employer.id.clone(),
                JobInput {
                    title: "Backend dev".to_owned(),
                    description: "Rust services".to_owned(),
                    requirements: None,
                    salary: None,
                    location: None,
                    company_name: None,
                },
            ),
            &mut conn,
        )?;
        let job_id = actions::jobs::get_jobs_by_employer(
            &employer.id,
            &mut conn,
        )?[0]
            .id
            .clone();
        let application = NewApplication::new(job_id, seeker.id);
        let _ =
            actions::applications::insert_application(&application, &mut conn)?;
        actions::applications::insert_application(&application, &mut conn)
    })
    .await
    .unwrap()
    .unwrap_err();

    assert!(matches!(err, DomainError::DuplicateValueError { .. }));
    assert_eq!(err.to_string(), "Already applied");
}

#[actix_rt::test]
async fn status_update_outside_the_closed_set_is_bad_request() {
    let app = common::test_app().await;
    let token = common::token_for(2, RoleEnum::Employer);
    let req = test::TestRequest::put()
        .uri("/api/jobs/1/applications/1/status")
        .append_header(common::bearer(&token))
        .append_header(("content-type", "application/json"))
        .set_payload(r#"{"status":"maybe"}"#)
        .to_request();
    let resp = app.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
