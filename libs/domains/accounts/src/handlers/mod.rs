//! HTTP endpoints, mounted by the binary under `/auth` and `/users`.

pub mod auth;
pub mod users;
