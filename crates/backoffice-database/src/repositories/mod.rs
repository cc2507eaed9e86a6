//! Repository implementations for all back-office entities.

pub mod assignment;
pub mod category;
pub mod customer;
pub mod product;
pub mod user;

pub use assignment::AssignmentRepository;
pub use category::CategoryRepository;
pub use customer::CustomerRepository;
pub use product::ProductRepository;
pub use user::UserRepository;

use backoffice_core::error::{AppError, ErrorKind};

/// Name of the constraint reported by a failed statement, if any.
fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}

/// Wrap a store failure as a database error carrying the sqlx cause.
fn database_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// SQLSTATE `numeric_value_out_of_range`.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Like [`database_error`], but reports a quantity pushed past the column
/// range as a validation error.
fn quantity_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let out_of_range = match &e {
            sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE),
            _ => false,
        };
        if out_of_range {
            AppError::validation("Quantity exceeds the supported maximum")
        } else {
            database_error(context)(e)
        }
    }
}
