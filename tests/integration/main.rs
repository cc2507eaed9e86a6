//! HTTP integration tests driving the full router against PostgreSQL.

mod helpers;

mod assignment_test;
mod auth_test;
mod billing_test;
mod catalog_test;
