mod repository;

pub use repository::*;
