//! Database repositories for spdxhub.
//!
//! Thin sqlx wrappers over the four tables. Upload records are insert-only:
//! the `result` column is written at creation and never updated.

mod uploads;
mod users;

pub use uploads::{CompareUploadRepository, ConvertUploadRepository, ValidateUploadRepository};
pub use users::{NewUser, UserRepository};
