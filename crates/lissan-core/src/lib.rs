//! Types shared across the Lissan crates

mod error;

pub use error::{ErrorBody, HttpError};
