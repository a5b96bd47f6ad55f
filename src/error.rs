use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactsError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    #[error("{field} is not a valid email address")]
    MalformedEmail { field: String },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Not logged in")]
    NoActiveSession,

    #[error("Invalid import file: {0}")]
    Format(String),

    #[error("Storage quota exceeded writing {key}: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used when reporting an outcome to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Auth,
    Format,
    Persistence,
    NotFound,
    Session,
}

impl ContactsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContactsError::BlankField { .. }
            | ContactsError::TooShort { .. }
            | ContactsError::MalformedEmail { .. }
            | ContactsError::PasswordMismatch
            | ContactsError::AlreadyExists { .. } => ErrorKind::Validation,
            ContactsError::InvalidCredentials => ErrorKind::Auth,
            ContactsError::Format(_) => ErrorKind::Format,
            ContactsError::NotFound { .. } => ErrorKind::NotFound,
            ContactsError::NoActiveSession => ErrorKind::Session,
            ContactsError::QuotaExceeded { .. }
            | ContactsError::Database(_)
            | ContactsError::Io(_)
            | ContactsError::Json(_) => ErrorKind::Persistence,
        }
    }

    pub(crate) fn contact_not_found(id: impl ToString) -> Self {
        ContactsError::NotFound {
            entity_type: "Contact".into(),
            id: id.to_string(),
        }
    }
}

pub type ContactsResult<T> = Result<T, ContactsError>;
