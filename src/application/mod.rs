// Application layer - the ledger and its operations.
// Validation lives here; the CLI decides how to present results and errors.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
