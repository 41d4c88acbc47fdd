mod common;

mod admin;
mod auth;
mod jobs;
