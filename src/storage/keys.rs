/// Directory of registered users.
pub const USERS: &str = "contacts-app-users";

/// Email of the logged-in user.
pub const CURRENT_USER: &str = "contacts-app-current-user";

const CONTACTS_PREFIX: &str = "contacts-app-data";

/// Key of one user's contact list. Lists are never shared between users.
pub fn contacts_for(email: &str) -> String {
    format!("{}:{}", CONTACTS_PREFIX, email)
}
