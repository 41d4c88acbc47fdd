pub mod sql_types {
    #[derive(diesel::query_builder::QueryId, diesel::sql_types::SqlType)]
    #[diesel(postgres_type(name = "user_role"))]
    pub struct UserRole;

    #[derive(diesel::query_builder::QueryId, diesel::sql_types::SqlType)]
    #[diesel(postgres_type(name = "application_status"))]
    pub struct ApplicationStatus;
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::UserRole;

    users (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        password -> Varchar,
        role -> UserRole,
        skills -> Nullable<Text>,
        resume -> Nullable<Text>,
        company_name -> Nullable<Varchar>,
        company_description -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    jobs (id) {
        id -> Int4,
        employer_id -> Int4,
        title -> Varchar,
        description -> Text,
        requirements -> Nullable<Text>,
        salary -> Nullable<Float8>,
        location -> Nullable<Varchar>,
        company_name -> Nullable<Varchar>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    use diesel::sql_types::*;
    use super::sql_types::ApplicationStatus;

    applications (id) {
        id -> Int4,
        job_id -> Int4,
        seeker_id -> Int4,
        status -> ApplicationStatus,
        created_at -> Timestamp,
    }
}

diesel::joinable!(jobs -> users (employer_id));
diesel::joinable!(applications -> jobs (job_id));
diesel::joinable!(applications -> users (seeker_id));

diesel::allow_tables_to_appear_in_same_query!(applications, jobs, users,);
