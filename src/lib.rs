pub mod application;
pub mod cli;
pub mod domain;
pub mod storage;

pub use application::Ledger;
pub use domain::*;
pub use storage::Repository;
