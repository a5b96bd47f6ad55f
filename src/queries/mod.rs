pub mod contact_queries;

pub use contact_queries::Category;
