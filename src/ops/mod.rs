pub mod contact_ops;
pub mod credential_ops;
pub mod transfer_ops;

pub use contact_ops::ContactRepository;
pub use transfer_ops::ImportReport;
