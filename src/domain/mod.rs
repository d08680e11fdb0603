mod expense;
mod money;

pub use expense::*;
pub use money::*;
