//! DNS MX resolution helpers.
//!
//! The public entry point is [`check_mx`], which performs a synchronous lookup
//! using the system resolver and returns a [`MxStatus`] describing the outcome.
//! [`primary_mx`] picks the host the STARTTLS probe should talk to.

mod error;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use resolver::{LookupMx, SystemResolver, check_mx, check_mx_with, primary_mx};
pub use types::{MxRecord, MxStatus};

#[cfg(test)]
pub(crate) mod tests;
