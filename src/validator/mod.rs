//! Address-level checks that never touch the network.

mod format;
mod normalize;

pub use format::{MAX_ADDRESS_LEN, format_violations, is_valid_format};
pub use normalize::{extract_domain, normalize_email};
