pub mod ids;
pub mod contact;
pub mod credential;

// Re-exports for convenience
pub use ids::Id;
pub use contact::{Contact, ContactDraft, ContactPatch, Group};
pub use credential::{Credential, Session};
