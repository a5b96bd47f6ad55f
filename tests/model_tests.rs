use contacts::model::*;

// ==========================================================================
// ID TESTS
// ==========================================================================

#[test]
fn id_generate_creates_unique_ids() {
    let id1 = Id::<Contact>::generate();
    let id2 = Id::<Contact>::generate();
    assert_ne!(id1, id2);
}

// ==========================================================================
// CONTACT TESTS
// ==========================================================================

#[test]
fn contact_create_defaults() {
    let contact = Contact::create("Bob".into(), "555".into(), String::new(), Group::default());
    assert!(!contact.is_favorite);
    assert!(!contact.has_email());
    assert_eq!(contact.group.as_str(), Group::FRIENDS);
    assert_eq!(contact.avatar, None);
}

#[test]
fn contact_initials() {
    let contact = Contact::create("Анна Петрова".into(), "1".into(), String::new(), Group::default());
    assert_eq!(contact.initials(), "АП");

    let single = Contact::create("  Bob  ".into(), "1".into(), String::new(), Group::default());
    assert_eq!(single.initials(), "B");
}

#[test]
fn seed_has_four_distinct_contacts() {
    let seed = Contact::seed();
    assert_eq!(seed.len(), 4);
    let ids: Vec<&str> = seed.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
    assert_eq!(seed[0].name, "Анна Петрова");
    assert_eq!(seed.iter().filter(|c| c.is_favorite).count(), 2);
    assert!(seed.iter().all(|c| c.group.is_preset()));
}

#[test]
fn contact_json_uses_backup_field_names() {
    let contact = Contact::seed().remove(0);
    let json = serde_json::to_value(&contact).unwrap();
    assert_eq!(json["id"], "1");
    assert_eq!(json["isFavorite"], true);
    assert_eq!(json["group"], "Работа");
    assert!(json.get("avatar").is_none());
}

#[test]
fn contact_json_accepts_backup_record_with_avatar() {
    let json = r#"{
        "id": "1712345678901",
        "name": "Ivan",
        "phone": "+7 999 000-00-00",
        "email": "",
        "avatar": "https://example.com/a.png",
        "isFavorite": false,
        "group": "Учеба"
    }"#;
    let contact: Contact = serde_json::from_str(json).unwrap();
    assert_eq!(contact.id.as_str(), "1712345678901");
    assert_eq!(contact.avatar.as_deref(), Some("https://example.com/a.png"));
    assert_eq!(contact.group.as_str(), Group::STUDY);
}

#[test]
fn group_presets_in_display_order() {
    let labels: Vec<String> = Group::presets().iter().map(|g| g.to_string()).collect();
    assert_eq!(labels, vec!["Работа", "Друзья", "Семья", "Учеба"]);
    assert!(!Group::new("Соседи").is_preset());
}

#[test]
fn draft_builder() {
    let draft = ContactDraft::new("Bob", "555").email("bob@x.com").group("Семья");
    assert_eq!(draft.name, "Bob");
    assert_eq!(draft.email, "bob@x.com");
    assert_eq!(draft.group, Group::new(Group::FAMILY));
    assert_eq!(ContactDraft::new("a", "b").group, Group::default());
}

#[test]
fn empty_patch() {
    assert!(ContactPatch::default().is_empty());
    let patch = ContactPatch {
        phone: Some("1".into()),
        ..ContactPatch::default()
    };
    assert!(!patch.is_empty());
}

// ==========================================================================
// CREDENTIAL TESTS
// ==========================================================================

#[test]
fn credential_matches_exactly() {
    let user = Credential::create("alice@x.com".into(), "secret1".into(), "Alice".into());
    assert!(user.matches("alice@x.com", "secret1"));
    assert!(!user.matches("Alice@x.com", "secret1"));
    assert!(!user.matches("alice@x.com", "Secret1"));
}
