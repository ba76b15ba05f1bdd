//! CLI command handlers, one per file.

mod check;
mod status;
mod validate;

pub use check::run_check;
pub use status::run_status;
pub use validate::run_validate;
