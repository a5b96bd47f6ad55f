use tracing::{debug, info, warn};

use crate::error::{ContactsError, ContactsResult};
use crate::model::{Contact, ContactDraft, ContactPatch, Group, Id};
use crate::storage::{KeyValueStore, Persistence};
use crate::validation::{self, trim_optional};

/// The active user's contacts, in insertion order.
///
/// Every successful mutation writes the whole list back through the
/// `Persistence` it is handed. When that write fails the error is returned
/// but the in-memory change stays; the next successful write catches the
/// store up.
#[derive(Debug, Clone)]
pub struct ContactRepository {
    owner: String,
    contacts: Vec<Contact>,
}

impl ContactRepository {
    pub fn new(owner: impl Into<String>, contacts: Vec<Contact>) -> Self {
        Self {
            owner: owner.into(),
            contacts,
        }
    }

    /// Loads the owner's list, seeding the example contacts the first time.
    pub fn load<S: KeyValueStore>(
        persistence: &mut Persistence<S>,
        owner: &str,
    ) -> ContactsResult<Self> {
        match persistence.load_contacts(owner)? {
            Some(contacts) => {
                debug!(owner, count = contacts.len(), "loaded contacts");
                Ok(Self::new(owner, contacts))
            }
            None => {
                let repo = Self::new(owner, Contact::seed());
                if let Err(e) = repo.flush(persistence) {
                    warn!(owner, error = %e, "could not store seed contacts");
                }
                info!(owner, "seeded example contacts");
                Ok(repo)
            }
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, id: &Id<Contact>) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    pub fn add<S: KeyValueStore>(
        &mut self,
        persistence: &mut Persistence<S>,
        draft: ContactDraft,
    ) -> ContactsResult<Contact> {
        let name = validation::non_blank(&draft.name, "name")?;
        let phone = validation::non_blank(&draft.phone, "phone")?;

        let mut contact = Contact::create(
            name,
            phone,
            draft.email.trim().to_string(),
            normalize_group(draft.group),
        );
        contact.avatar = trim_optional(draft.avatar.as_deref());
        while self.get(&contact.id).is_some() {
            contact.id = Id::generate();
        }

        self.contacts.push(contact.clone());
        info!(id = %contact.id, "added contact");
        self.flush(persistence)?;
        Ok(contact)
    }

    pub fn update<S: KeyValueStore>(
        &mut self,
        persistence: &mut Persistence<S>,
        id: &Id<Contact>,
        patch: ContactPatch,
    ) -> ContactsResult<Contact> {
        let index = self
            .position(id)
            .ok_or_else(|| ContactsError::contact_not_found(id))?;

        let mut updated = self.contacts[index].clone();
        if let Some(name) = patch.name {
            updated.name = name;
        }
        if let Some(phone) = patch.phone {
            updated.phone = phone;
        }
        if let Some(email) = patch.email {
            updated.email = email.trim().to_string();
        }
        if let Some(avatar) = patch.avatar {
            updated.avatar = trim_optional(avatar.as_deref());
        }
        if let Some(group) = patch.group {
            updated.group = normalize_group(group);
        }
        updated.name = validation::non_blank(&updated.name, "name")?;
        updated.phone = validation::non_blank(&updated.phone, "phone")?;

        self.contacts[index] = updated.clone();
        info!(id = %id, "updated contact");
        self.flush(persistence)?;
        Ok(updated)
    }

    /// Returns the removed contact, or `None` (and writes nothing) if the id
    /// is unknown.
    pub fn remove<S: KeyValueStore>(
        &mut self,
        persistence: &mut Persistence<S>,
        id: &Id<Contact>,
    ) -> ContactsResult<Option<Contact>> {
        let Some(index) = self.position(id) else {
            debug!(id = %id, "remove of unknown contact ignored");
            return Ok(None);
        };

        let removed = self.contacts.remove(index);
        info!(id = %id, "removed contact");
        self.flush(persistence)?;
        Ok(Some(removed))
    }

    pub fn toggle_favorite<S: KeyValueStore>(
        &mut self,
        persistence: &mut Persistence<S>,
        id: &Id<Contact>,
    ) -> ContactsResult<Contact> {
        let index = self
            .position(id)
            .ok_or_else(|| ContactsError::contact_not_found(id))?;

        let contact = &mut self.contacts[index];
        contact.is_favorite = !contact.is_favorite;
        let toggled = contact.clone();

        info!(id = %id, favorite = toggled.is_favorite, "toggled favorite");
        self.flush(persistence)?;
        Ok(toggled)
    }

    /// Swaps in a whole new list without validating individual records.
    pub fn replace_all<S: KeyValueStore>(
        &mut self,
        persistence: &mut Persistence<S>,
        contacts: Vec<Contact>,
    ) -> ContactsResult<usize> {
        self.contacts = contacts;
        info!(count = self.contacts.len(), "replaced all contacts");
        self.flush(persistence)?;
        Ok(self.contacts.len())
    }

    fn position(&self, id: &Id<Contact>) -> Option<usize> {
        self.contacts.iter().position(|c| &c.id == id)
    }

    fn flush<S: KeyValueStore>(&self, persistence: &mut Persistence<S>) -> ContactsResult<()> {
        persistence
            .save_contacts(&self.owner, &self.contacts)
            .inspect_err(|e| warn!(owner = %self.owner, error = %e, "failed to persist contacts"))
    }
}

fn normalize_group(group: Group) -> Group {
    let label = group.as_str().trim();
    if label.is_empty() {
        Group::default()
    } else {
        Group::new(label)
    }
}
