use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ContactsError, ContactsResult};
use crate::model::{Contact, Id};
use crate::storage::{KeyValueStore, Persistence};

use super::ContactRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    /// Records that arrived without an id, or with one already taken, and
    /// were given a fresh id.
    pub reassigned_ids: usize,
}

/// Pretty-printed JSON array of the full list.
pub fn export_json(contacts: &[Contact]) -> ContactsResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(contacts)?)
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("contacts-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Writes the backup file into `dir` and returns its path.
pub fn export_to_dir(dir: &Path, contacts: &[Contact], date: NaiveDate) -> ContactsResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(date));
    fs::write(&path, export_json(contacts)?)?;
    info!(path = %path.display(), count = contacts.len(), "exported contacts");
    Ok(path)
}

/// Parses an import payload. Accepts any JSON array whose elements are
/// objects.
///
/// Record contents are not validated: field values of the wrong type read as
/// empty (see `Contact`). Ids are kept unless blank or repeated, in which case
/// a fresh one is assigned. Returns the contacts and the number of
/// reassigned ids.
pub fn parse_import(bytes: &[u8]) -> ContactsResult<(Vec<Contact>, usize)> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ContactsError::Format(format!("not valid JSON ({})", e)))?;

    let Value::Array(items) = value else {
        return Err(ContactsError::Format("expected a JSON array of contacts".into()));
    };

    let mut contacts = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            return Err(ContactsError::Format(format!(
                "record {} is not an object",
                index + 1
            )));
        }
        let contact: Contact = serde_json::from_value(item).map_err(|e| {
            ContactsError::Format(format!("record {} is not a contact ({})", index + 1, e))
        })?;
        contacts.push(contact);
    }

    let mut seen = HashSet::new();
    let mut reassigned = 0;
    for contact in &mut contacts {
        if contact.id.is_blank() || seen.contains(&contact.id) {
            let mut fresh = Id::generate();
            while seen.contains(&fresh) {
                fresh = Id::generate();
            }
            contact.id = fresh;
            reassigned += 1;
        }
        seen.insert(contact.id.clone());
    }

    Ok((contacts, reassigned))
}

/// Replaces the repository with the payload's contacts. On a format error the
/// repository is left untouched.
pub fn import_bytes<S: KeyValueStore>(
    repo: &mut ContactRepository,
    persistence: &mut Persistence<S>,
    bytes: &[u8],
) -> ContactsResult<ImportReport> {
    let (contacts, reassigned_ids) = parse_import(bytes).inspect_err(|e| {
        warn!(error = %e, "rejected import");
    })?;
    let imported = repo.replace_all(persistence, contacts)?;
    info!(imported, reassigned_ids, "imported contacts");
    Ok(ImportReport {
        imported,
        reassigned_ids,
    })
}

pub fn import_file<S: KeyValueStore>(
    repo: &mut ContactRepository,
    persistence: &mut Persistence<S>,
    path: &Path,
) -> ContactsResult<ImportReport> {
    let bytes = fs::read(path).map_err(|e| {
        ContactsError::Format(format!("cannot read {} ({})", path.display(), e))
    })?;
    import_bytes(repo, persistence, &bytes)
}
