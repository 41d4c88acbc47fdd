pub mod admin;
pub mod auth;
pub mod healthcheck;
pub mod jobs;
