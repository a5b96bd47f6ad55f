use serde::{Deserialize, Serialize};

/// A registered user. The password is stored and compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Credential {
    pub fn create(email: String, password: String, name: String) -> Self {
        Self {
            email,
            password,
            name,
        }
    }

    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

/// The logged-in user, persisted so a restart resumes without a new login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
}

impl Session {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}
