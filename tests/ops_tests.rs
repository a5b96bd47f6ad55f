use std::collections::HashSet;

use contacts::error::{ContactsError, ErrorKind};
use contacts::model::*;
use contacts::ops::*;
use contacts::storage::*;

fn setup() -> (Persistence<MemoryStore>, ContactRepository) {
    let mut persistence = Persistence::new(MemoryStore::new());
    let repo = ContactRepository::load(&mut persistence, "alice@x.com").unwrap();
    (persistence, repo)
}

fn stored(persistence: &Persistence<MemoryStore>) -> Vec<Contact> {
    persistence.load_contacts("alice@x.com").unwrap().unwrap()
}

// ==========================================================================
// CREDENTIAL OPS TESTS
// ==========================================================================

#[test]
fn register_stores_user_and_session() {
    let mut p = Persistence::new(MemoryStore::new());
    let user = credential_ops::register(&mut p, "alice@x.com", "secret1", "Alice").unwrap();

    assert_eq!(user.name, "Alice");
    assert_eq!(p.load_users().unwrap(), vec![user]);
    assert_eq!(p.load_session().unwrap(), Some(Session::new("alice@x.com")));
}

#[test]
fn register_trims_inputs() {
    let mut p = Persistence::new(MemoryStore::new());
    let user = credential_ops::register(&mut p, "  alice@x.com ", " secret1 ", " Alice ").unwrap();
    assert_eq!(user.email, "alice@x.com");
    assert_eq!(user.password, "secret1");
    assert_eq!(user.name, "Alice");
}

#[test]
fn register_rejects_blank_fields() {
    let mut p = Persistence::new(MemoryStore::new());
    for (email, password, name) in [
        ("", "secret1", "Alice"),
        ("alice@x.com", "", "Alice"),
        ("alice@x.com", "secret1", "   "),
    ] {
        let err = credential_ops::register(&mut p, email, password, name).unwrap_err();
        assert!(matches!(err, ContactsError::BlankField { .. }));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
    assert!(p.load_users().unwrap().is_empty());
}

#[test]
fn register_rejects_short_password() {
    let mut p = Persistence::new(MemoryStore::new());
    let err = credential_ops::register(&mut p, "alice@x.com", "12345", "Alice").unwrap_err();
    assert!(matches!(err, ContactsError::TooShort { min: 6, .. }));
}

#[test]
fn register_rejects_malformed_email() {
    let mut p = Persistence::new(MemoryStore::new());
    let err = credential_ops::register(&mut p, "alice.x.com", "secret1", "Alice").unwrap_err();
    assert!(matches!(err, ContactsError::MalformedEmail { .. }));
}

#[test]
fn register_rejects_duplicate_email() {
    let mut p = Persistence::new(MemoryStore::new());
    credential_ops::register(&mut p, "alice@x.com", "secret1", "Alice").unwrap();
    let err = credential_ops::register(&mut p, "alice@x.com", "other12", "Alice 2").unwrap_err();
    assert!(matches!(err, ContactsError::AlreadyExists { .. }));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(p.load_users().unwrap().len(), 1);
}

#[test]
fn register_keeps_distinct_case_emails_apart() {
    let mut p = Persistence::new(MemoryStore::new());
    credential_ops::register(&mut p, "alice@x.com", "secret1", "Alice").unwrap();
    credential_ops::register(&mut p, "Alice@x.com", "secret1", "Alice").unwrap();
    assert_eq!(p.load_users().unwrap().len(), 2);
}

#[test]
fn authenticate_matches_exactly() {
    let mut p = Persistence::new(MemoryStore::new());
    credential_ops::register(&mut p, "alice@x.com", "secret1", "Alice").unwrap();
    credential_ops::logout(&mut p).unwrap();

    let err = credential_ops::authenticate(&mut p, "alice@x.com", "Secret1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Auth);
    let err = credential_ops::authenticate(&mut p, "bob@x.com", "secret1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(p.load_session().unwrap(), None);

    let user = credential_ops::authenticate(&mut p, " alice@x.com ", "secret1").unwrap();
    assert_eq!(user.name, "Alice");
    assert_eq!(p.load_session().unwrap(), Some(Session::new("alice@x.com")));
}

#[test]
fn authenticate_rejects_blank_input() {
    let mut p = Persistence::new(MemoryStore::new());
    let err = credential_ops::authenticate(&mut p, "", "secret1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn find_user_by_email() {
    let mut p = Persistence::new(MemoryStore::new());
    credential_ops::register(&mut p, "alice@x.com", "secret1", "Alice").unwrap();
    assert!(credential_ops::find_user(&p, "alice@x.com").unwrap().is_some());
    assert!(credential_ops::find_user(&p, "bob@x.com").unwrap().is_none());
}

// ==========================================================================
// CONTACT REPOSITORY TESTS
// ==========================================================================

#[test]
fn load_seeds_and_persists_first_time() {
    let (p, repo) = setup();
    assert_eq!(repo.owner(), "alice@x.com");
    assert_eq!(repo.contacts(), Contact::seed().as_slice());
    assert_eq!(stored(&p), Contact::seed());
}

#[test]
fn load_keeps_existing_empty_list() {
    let mut p = Persistence::new(MemoryStore::new());
    p.save_contacts("alice@x.com", &[]).unwrap();
    let repo = ContactRepository::load(&mut p, "alice@x.com").unwrap();
    assert!(repo.is_empty());
}

#[test]
fn add_appends_with_fresh_id() {
    let (mut p, mut repo) = setup();
    let before: HashSet<Id<Contact>> = repo.contacts().iter().map(|c| c.id.clone()).collect();

    let draft = ContactDraft::new("Bob", "555").group("Друзья");
    let bob = repo.add(&mut p, draft).unwrap();

    assert_eq!(repo.len(), 5);
    assert!(!before.contains(&bob.id));
    assert!(!bob.is_favorite);
    assert_eq!(bob.email, "");
    assert_eq!(repo.contacts().last(), Some(&bob));
    assert_eq!(stored(&p).len(), 5);
}

#[test]
fn add_many_keeps_ids_unique() {
    let (mut p, mut repo) = setup();
    for i in 0..20 {
        repo.add(&mut p, ContactDraft::new(format!("C{}", i), "1")).unwrap();
    }
    let ids: HashSet<&Id<Contact>> = repo.contacts().iter().map(|c| &c.id).collect();
    assert_eq!(ids.len(), repo.len());
}

#[test]
fn add_trims_and_defaults_blank_group() {
    let (mut p, mut repo) = setup();
    let mut draft = ContactDraft::new("  Bob ", " 555 ").email(" bob@x.com ");
    draft.group = Group::new("  ");
    let bob = repo.add(&mut p, draft).unwrap();
    assert_eq!(bob.name, "Bob");
    assert_eq!(bob.phone, "555");
    assert_eq!(bob.email, "bob@x.com");
    assert_eq!(bob.group, Group::default());
}

#[test]
fn add_rejects_missing_name_or_phone() {
    let (mut p, mut repo) = setup();
    assert!(repo.add(&mut p, ContactDraft::new("", "555")).is_err());
    assert!(repo.add(&mut p, ContactDraft::new("Bob", "  ")).is_err());
    assert_eq!(repo.len(), 4);
}

#[test]
fn update_replaces_in_place() {
    let (mut p, mut repo) = setup();
    let id = Id::new("2");
    let patch = ContactPatch {
        phone: Some("+7 000".into()),
        group: Some(Group::new(Group::WORK)),
        ..ContactPatch::default()
    };
    let updated = repo.update(&mut p, &id, patch).unwrap();

    assert_eq!(updated.name, "Дмитрий Иванов");
    assert_eq!(updated.phone, "+7 000");
    assert_eq!(repo.contacts()[1], updated);
    assert_eq!(stored(&p)[1].phone, "+7 000");
}

#[test]
fn update_can_clear_email_and_set_avatar() {
    let (mut p, mut repo) = setup();
    let patch = ContactPatch {
        email: Some(String::new()),
        avatar: Some(Some("https://example.com/a.png".into())),
        ..ContactPatch::default()
    };
    let updated = repo.update(&mut p, &Id::new("1"), patch).unwrap();
    assert!(!updated.has_email());
    assert_eq!(updated.avatar.as_deref(), Some("https://example.com/a.png"));
}

#[test]
fn update_rejects_blank_result() {
    let (mut p, mut repo) = setup();
    let patch = ContactPatch {
        name: Some("  ".into()),
        ..ContactPatch::default()
    };
    assert!(repo.update(&mut p, &Id::new("1"), patch).is_err());
    assert_eq!(repo.contacts()[0].name, "Анна Петрова");
}

#[test]
fn update_unknown_id_is_not_found() {
    let (mut p, mut repo) = setup();
    let err = repo
        .update(&mut p, &Id::new("nope"), ContactPatch::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn remove_twice_is_noop() {
    let (mut p, mut repo) = setup();
    let id = Id::new("3");

    let removed = repo.remove(&mut p, &id).unwrap();
    assert_eq!(removed.map(|c| c.name), Some("Мария Сидорова".to_string()));
    assert_eq!(repo.len(), 3);

    assert_eq!(repo.remove(&mut p, &id).unwrap(), None);
    assert_eq!(repo.len(), 3);
    assert_eq!(stored(&p).len(), 3);
}

#[test]
fn toggle_favorite_twice_restores_flag() {
    let (mut p, mut repo) = setup();
    let id = Id::new("2");
    let original = repo.get(&id).unwrap().is_favorite;

    assert_eq!(repo.toggle_favorite(&mut p, &id).unwrap().is_favorite, !original);
    assert_eq!(stored(&p)[1].is_favorite, !original);
    assert_eq!(repo.toggle_favorite(&mut p, &id).unwrap().is_favorite, original);
}

#[test]
fn toggle_favorite_unknown_id() {
    let (mut p, mut repo) = setup();
    assert!(matches!(
        repo.toggle_favorite(&mut p, &Id::new("x")),
        Err(ContactsError::NotFound { .. })
    ));
}

#[test]
fn replace_all_skips_validation() {
    let (mut p, mut repo) = setup();
    let blank = Contact {
        id: Id::new("9"),
        name: String::new(),
        phone: String::new(),
        email: String::new(),
        avatar: None,
        is_favorite: true,
        group: Group::new("Anything"),
    };
    assert_eq!(repo.replace_all(&mut p, vec![blank.clone()]).unwrap(), 1);
    assert_eq!(repo.contacts(), &[blank.clone()]);
    assert_eq!(stored(&p), vec![blank]);
}

#[test]
fn flush_failure_keeps_in_memory_change() {
    let (mut p, mut repo) = setup();
    let before = stored(&p);
    p.store_mut().set_quota(Some(16));

    let err = repo.add(&mut p, ContactDraft::new("Bob", "555")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Persistence);
    assert_eq!(repo.len(), 5);
    assert_eq!(stored(&p), before);

    p.store_mut().set_quota(None);
    repo.toggle_favorite(&mut p, &Id::new("1")).unwrap();
    assert_eq!(stored(&p).len(), 5);
}

#[test]
fn seed_is_kept_in_memory_when_store_is_full() {
    let mut p = Persistence::new(MemoryStore::with_quota(8));
    let repo = ContactRepository::load(&mut p, "alice@x.com").unwrap();
    assert_eq!(repo.len(), 4);
    assert_eq!(p.load_contacts("alice@x.com").unwrap(), None);
}

// ==========================================================================
// TRANSFER OPS TESTS
// ==========================================================================

#[test]
fn export_then_import_is_identity() {
    let (mut p, mut repo) = setup();
    repo.add(&mut p, ContactDraft::new("Bob", "555").email("bob@x.com").group("Друзья"))
        .unwrap();
    repo.add(&mut p, ContactDraft::new("Eve", "777").avatar("https://e.x/a.png"))
        .unwrap();
    repo.remove(&mut p, &Id::new("2")).unwrap();
    repo.toggle_favorite(&mut p, &Id::new("4")).unwrap();
    let patch = ContactPatch {
        name: Some("Анна П.".into()),
        ..ContactPatch::default()
    };
    repo.update(&mut p, &Id::new("1"), patch).unwrap();
    let original = repo.contacts().to_vec();

    let bytes = transfer_ops::export_json(repo.contacts()).unwrap();

    let (mut p2, mut other) = {
        let mut p2 = Persistence::new(MemoryStore::new());
        let other = ContactRepository::load(&mut p2, "bob@x.com").unwrap();
        (p2, other)
    };
    let report = transfer_ops::import_bytes(&mut other, &mut p2, &bytes).unwrap();

    assert_eq!(report.imported, original.len());
    assert_eq!(report.reassigned_ids, 0);
    assert_eq!(other.contacts(), original.as_slice());
}

#[test]
fn export_is_pretty_json_array() {
    let bytes = transfer_ops::export_json(&Contact::seed()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("[\n"));
    assert!(text.contains("\"isFavorite\": true"));
}

#[test]
fn import_non_array_leaves_repository_unchanged() {
    let (mut p, mut repo) = setup();
    let before = repo.contacts().to_vec();

    let err = transfer_ops::import_bytes(&mut repo, &mut p, br#"{"foo":1}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(repo.contacts(), before.as_slice());
    assert_eq!(stored(&p), before);
}

#[test]
fn import_accepts_null_email_and_numeric_id() {
    let (mut p, mut repo) = setup();
    let json = br#"[
        {"id": "1", "name": "A", "phone": "1", "email": null, "isFavorite": false, "group": "Work"},
        {"id": 2, "name": "B", "phone": "2", "email": "b@x.com", "isFavorite": true, "group": "Work"}
    ]"#;
    let report = transfer_ops::import_bytes(&mut repo, &mut p, json).unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.reassigned_ids, 0);
    assert_eq!(repo.contacts()[0].email, "");
    assert_eq!(repo.contacts()[1].id.as_str(), "2");
    assert!(repo.contacts()[1].is_favorite);
    assert_eq!(stored(&p).len(), 2);
}

#[test]
fn import_invalid_json_is_format_error() {
    let (mut p, mut repo) = setup();
    let err = transfer_ops::import_bytes(&mut repo, &mut p, b"[{").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(repo.len(), 4);
}

#[test]
fn import_replaces_wholesale() {
    let (mut p, mut repo) = setup();
    let json = r#"[{"id":"a","name":"Only","phone":"1","email":"","isFavorite":false,"group":"Семья"}]"#;
    let report = transfer_ops::import_bytes(&mut repo, &mut p, json.as_bytes()).unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(repo.contacts()[0].name, "Only");
    assert_eq!(stored(&p).len(), 1);
}

#[test]
fn export_and_import_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let (mut p, mut repo) = setup();
    let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();

    let path = transfer_ops::export_to_dir(dir.path(), repo.contacts(), date).unwrap();
    assert_eq!(path.file_name().unwrap(), "contacts-backup-2025-01-31.json");

    repo.replace_all(&mut p, Vec::new()).unwrap();
    let report = transfer_ops::import_file(&mut repo, &mut p, &path).unwrap();
    assert_eq!(report.imported, 4);
    assert_eq!(repo.contacts(), Contact::seed().as_slice());
}

#[test]
fn import_missing_file_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let (mut p, mut repo) = setup();
    let err = transfer_ops::import_file(&mut repo, &mut p, &dir.path().join("nope.json"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(repo.len(), 4);
}
