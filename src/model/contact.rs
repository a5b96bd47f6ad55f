use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::Id;

/// Category label attached to a contact. One of the presets or free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group(pub String);

impl Group {
    pub const WORK: &'static str = "Работа";
    pub const FRIENDS: &'static str = "Друзья";
    pub const FAMILY: &'static str = "Семья";
    pub const STUDY: &'static str = "Учеба";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Preset groups, in display order.
    pub fn presets() -> Vec<Group> {
        [Self::WORK, Self::FRIENDS, Self::FAMILY, Self::STUDY]
            .iter()
            .map(|label| Group::new(*label))
            .collect()
    }

    pub fn is_preset(&self) -> bool {
        Self::presets().contains(self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Group {
    fn default() -> Self {
        Group::new(Group::FRIENDS)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single address-book entry. Field names on the wire match the backup
/// file format (`isFavorite` etc).
///
/// Reading is lenient: `null` or a non-scalar value in any field reads as the
/// field's empty value, and numbers or booleans in string fields are kept as
/// their text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Blank when a record was read without one; see `transfer_ops::parse_import`.
    #[serde(default = "blank_id", deserialize_with = "lenient_id")]
    pub id: Id<Contact>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    /// Empty when the contact has no email.
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_favorite: bool,
    #[serde(default, deserialize_with = "lenient_group")]
    pub group: Group,
}

impl Contact {
    pub fn create(name: String, phone: String, email: String, group: Group) -> Self {
        Self {
            id: Id::generate(),
            name,
            phone,
            email,
            avatar: None,
            is_favorite: false,
            group,
        }
    }

    pub fn has_email(&self) -> bool {
        !self.email.is_empty()
    }

    /// First letter of each word of the name, for avatar placeholders.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }

    /// Example contacts a new user starts with.
    pub fn seed() -> Vec<Contact> {
        [
            ("1", "Анна Петрова", "+7 999 123-45-67", "anna@example.com", true, Group::WORK),
            ("2", "Дмитрий Иванов", "+7 999 234-56-78", "dmitry@example.com", false, Group::FRIENDS),
            ("3", "Мария Сидорова", "+7 999 345-67-89", "maria@example.com", true, Group::FAMILY),
            ("4", "Алексей Козлов", "+7 999 456-78-90", "alexey@example.com", false, Group::FRIENDS),
        ]
        .iter()
        .map(|(id, name, phone, email, is_favorite, group)| Contact {
            id: Id::new(*id),
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            avatar: None,
            is_favorite: *is_favorite,
            group: Group::new(*group),
        })
        .collect()
    }
}

fn blank_id() -> Id<Contact> {
    Id::new(String::new())
}

/// Any JSON value, reduced to what a contact field can hold.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Flag(bool),
    Other(IgnoredAny),
}

impl Loose {
    fn into_text(self) -> Option<String> {
        match self {
            Loose::Text(s) => Some(s),
            Loose::Unsigned(n) => Some(n.to_string()),
            Loose::Signed(n) => Some(n.to_string()),
            Loose::Float(n) => Some(n.to_string()),
            Loose::Flag(b) => Some(b.to_string()),
            Loose::Other(_) => None,
        }
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_optional_string(deserializer)?.unwrap_or_default())
}

fn lenient_optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<Loose>::deserialize(deserializer)?.and_then(Loose::into_text))
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Id<Contact>, D::Error> {
    lenient_string(deserializer).map(Id::new)
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(
        Option::<Loose>::deserialize(deserializer)?,
        Some(Loose::Flag(true))
    ))
}

fn lenient_group<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Group, D::Error> {
    let label = lenient_string(deserializer)?;
    Ok(if label.trim().is_empty() {
        Group::default()
    } else {
        Group::new(label)
    })
}

/// Input for creating a contact. Fields are validated by `ContactRepository::add`.
#[derive(Debug, Clone, Default)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub avatar: Option<String>,
    pub group: Group,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Group::new(group);
        self
    }

    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// Partial edit of a contact. `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<Option<String>>,
    pub group: Option<Group>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.avatar.is_none()
            && self.group.is_none()
    }
}
