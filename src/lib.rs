pub mod error;
pub mod validation;
pub mod config;
pub mod model;
pub mod storage;
pub mod ops;
pub mod queries;
pub mod session;
pub mod cli;

pub use session::ContactBook;
