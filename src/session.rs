use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{ContactsError, ContactsResult};
use crate::model::{Contact, ContactDraft, ContactPatch, Credential, Id};
use crate::ops::{credential_ops, transfer_ops, ContactRepository, ImportReport};
use crate::queries::{contact_queries, Category};
use crate::storage::{KeyValueStore, Persistence};

/// The logged-in user together with their loaded contacts.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub user: Credential,
    pub contacts: ContactRepository,
}

/// Application state: the store plus, after login, the active session.
///
/// `register`/`login`/`resume` set the session up and `logout` tears it
/// down. Contact operations fail with `NoActiveSession` in between.
pub struct ContactBook<S> {
    persistence: Persistence<S>,
    active: Option<ActiveSession>,
}

impl<S: KeyValueStore> ContactBook<S> {
    pub fn new(store: S) -> Self {
        Self {
            persistence: Persistence::new(store),
            active: None,
        }
    }

    /// Like `new`, then resumes a persisted session if there is one.
    pub fn open(store: S) -> ContactsResult<Self> {
        let mut book = Self::new(store);
        book.resume()?;
        Ok(book)
    }

    /// Restores the session pointer left by a previous run. A pointer to a
    /// user that is no longer in the directory is discarded.
    pub fn resume(&mut self) -> ContactsResult<Option<Credential>> {
        let Some(session) = self.persistence.load_session()? else {
            return Ok(None);
        };

        match credential_ops::find_user(&self.persistence, &session.email)? {
            Some(user) => {
                info!(email = %user.email, "resumed session");
                self.start(user.clone())?;
                Ok(Some(user))
            }
            None => {
                warn!(email = %session.email, "session points at unknown user, clearing it");
                self.persistence.clear_session()?;
                Ok(None)
            }
        }
    }

    pub fn register(&mut self, email: &str, password: &str, name: &str) -> ContactsResult<Credential> {
        let user = credential_ops::register(&mut self.persistence, email, password, name)?;
        self.start(user.clone())?;
        Ok(user)
    }

    pub fn login(&mut self, email: &str, password: &str) -> ContactsResult<Credential> {
        let user = credential_ops::authenticate(&mut self.persistence, email, password)?;
        self.start(user.clone())?;
        Ok(user)
    }

    pub fn logout(&mut self) -> ContactsResult<()> {
        credential_ops::logout(&mut self.persistence)?;
        self.active = None;
        Ok(())
    }

    pub fn current_user(&self) -> Option<&Credential> {
        self.active.as_ref().map(|a| &a.user)
    }

    pub fn is_logged_in(&self) -> bool {
        self.active.is_some()
    }

    pub fn repository(&self) -> ContactsResult<&ContactRepository> {
        self.active
            .as_ref()
            .map(|a| &a.contacts)
            .ok_or(ContactsError::NoActiveSession)
    }

    pub fn contacts(&self) -> ContactsResult<&[Contact]> {
        Ok(self.repository()?.contacts())
    }

    pub fn filter(&self, query: &str, category: &Category) -> ContactsResult<Vec<&Contact>> {
        Ok(contact_queries::filter(self.contacts()?, query, category))
    }

    pub fn add(&mut self, draft: ContactDraft) -> ContactsResult<Contact> {
        let active = self.active.as_mut().ok_or(ContactsError::NoActiveSession)?;
        active.contacts.add(&mut self.persistence, draft)
    }

    pub fn update(&mut self, id: &Id<Contact>, patch: ContactPatch) -> ContactsResult<Contact> {
        let active = self.active.as_mut().ok_or(ContactsError::NoActiveSession)?;
        active.contacts.update(&mut self.persistence, id, patch)
    }

    pub fn remove(&mut self, id: &Id<Contact>) -> ContactsResult<Option<Contact>> {
        let active = self.active.as_mut().ok_or(ContactsError::NoActiveSession)?;
        active.contacts.remove(&mut self.persistence, id)
    }

    pub fn toggle_favorite(&mut self, id: &Id<Contact>) -> ContactsResult<Contact> {
        let active = self.active.as_mut().ok_or(ContactsError::NoActiveSession)?;
        active.contacts.toggle_favorite(&mut self.persistence, id)
    }

    pub fn export_json(&self) -> ContactsResult<Vec<u8>> {
        transfer_ops::export_json(self.contacts()?)
    }

    pub fn export_to_dir(&self, dir: &Path, date: NaiveDate) -> ContactsResult<PathBuf> {
        transfer_ops::export_to_dir(dir, self.contacts()?, date)
    }

    pub fn import_bytes(&mut self, bytes: &[u8]) -> ContactsResult<ImportReport> {
        let active = self.active.as_mut().ok_or(ContactsError::NoActiveSession)?;
        transfer_ops::import_bytes(&mut active.contacts, &mut self.persistence, bytes)
    }

    pub fn import_file(&mut self, path: &Path) -> ContactsResult<ImportReport> {
        let active = self.active.as_mut().ok_or(ContactsError::NoActiveSession)?;
        transfer_ops::import_file(&mut active.contacts, &mut self.persistence, path)
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut Persistence<S> {
        &mut self.persistence
    }

    pub fn into_store(self) -> S {
        self.persistence.into_store()
    }

    fn start(&mut self, user: Credential) -> ContactsResult<()> {
        let contacts = ContactRepository::load(&mut self.persistence, &user.email)?;
        self.active = Some(ActiveSession { user, contacts });
        Ok(())
    }
}
