use tracing::info;

use crate::error::{ContactsError, ContactsResult};
use crate::model::{Credential, Session};
use crate::storage::{KeyValueStore, Persistence};
use crate::validation::{self, MIN_PASSWORD_LEN};

/// Registers a new user and makes them the active session.
///
/// All inputs are trimmed before validation and storage.
pub fn register<S: KeyValueStore>(
    persistence: &mut Persistence<S>,
    email: &str,
    password: &str,
    name: &str,
) -> ContactsResult<Credential> {
    let valid_name = validation::non_blank(name, "name")?;
    let valid_email = validation::non_blank(email, "email")?;
    let valid_password = validation::non_blank(password, "password")?;

    validation::min_length(&valid_password, MIN_PASSWORD_LEN, "password")?;
    validation::email_shape(&valid_email, "email")?;

    let mut users = persistence.load_users()?;
    if users.iter().any(|u| u.email == valid_email) {
        return Err(ContactsError::AlreadyExists {
            entity_type: "User".into(),
            identifier: valid_email,
        });
    }

    let user = Credential::create(valid_email, valid_password, valid_name);
    users.push(user.clone());
    persistence.save_users(&users)?;
    persistence.save_session(&Session::new(user.email.clone()))?;

    info!(email = %user.email, "registered user");
    Ok(user)
}

/// Checks email and password against the directory, exactly and
/// case-sensitively after trimming, and starts a session on success.
pub fn authenticate<S: KeyValueStore>(
    persistence: &mut Persistence<S>,
    email: &str,
    password: &str,
) -> ContactsResult<Credential> {
    let email = validation::non_blank(email, "email")?;
    let password = validation::non_blank(password, "password")?;

    let user = persistence
        .load_users()?
        .into_iter()
        .find(|u| u.matches(&email, &password))
        .ok_or(ContactsError::InvalidCredentials)?;

    persistence.save_session(&Session::new(user.email.clone()))?;

    info!(email = %user.email, "logged in");
    Ok(user)
}

pub fn logout<S: KeyValueStore>(persistence: &mut Persistence<S>) -> ContactsResult<()> {
    persistence.clear_session()?;
    info!("logged out");
    Ok(())
}

pub fn find_user<S: KeyValueStore>(
    persistence: &Persistence<S>,
    email: &str,
) -> ContactsResult<Option<Credential>> {
    Ok(persistence
        .load_users()?
        .into_iter()
        .find(|u| u.email == email))
}
