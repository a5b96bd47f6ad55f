use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ContactsResult;
use crate::model::{Contact, Credential, Session};

use super::{keys, KeyValueStore};

/// Typed JSON records on top of a `KeyValueStore`.
///
/// Reads are best-effort: a record that no longer parses is logged and
/// treated as absent (directory, session) or empty (contact list). Writes
/// always surface the store's error.
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn load_users(&self) -> ContactsResult<Vec<Credential>> {
        Ok(self.read_json(keys::USERS)?.unwrap_or_default())
    }

    pub fn save_users(&mut self, users: &[Credential]) -> ContactsResult<()> {
        self.write_json(keys::USERS, users)
    }

    pub fn load_session(&self) -> ContactsResult<Option<Session>> {
        let email = self.store.get(keys::CURRENT_USER)?;
        Ok(email.filter(|e| !e.is_empty()).map(Session::new))
    }

    pub fn save_session(&mut self, session: &Session) -> ContactsResult<()> {
        self.store.set(keys::CURRENT_USER, &session.email)
    }

    pub fn clear_session(&mut self) -> ContactsResult<()> {
        self.store.remove(keys::CURRENT_USER)
    }

    /// `None` when nothing was ever stored for this user.
    pub fn load_contacts(&self, email: &str) -> ContactsResult<Option<Vec<Contact>>> {
        let key = keys::contacts_for(email);
        let Some(raw) = self.store.get(&key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(contacts) => Ok(Some(contacts)),
            Err(e) => {
                warn!(key = %key, error = %e, "stored contact list is unreadable, starting empty");
                Ok(Some(Vec::new()))
            }
        }
    }

    pub fn save_contacts(&mut self, email: &str, contacts: &[Contact]) -> ContactsResult<()> {
        self.write_json(&keys::contacts_for(email), contacts)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> ContactsResult<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "ignoring unreadable record");
                Ok(None)
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> ContactsResult<()> {
        let json = serde_json::to_string(value)?;
        debug!(key, bytes = json.len(), "writing record");
        self.store.set(key, &json)
    }
}
