//! Sea-ORM entities for the `users` and `admins` tables

pub mod admin;
pub mod user;
