//! CSV dialect and record parsing.

mod dialect;
mod record;

pub use dialect::Dialect;
pub(crate) use record::{Record, read_record};
