use std::fmt;

use crate::model::{Contact, Group};

/// Which slice of the list to show, alongside the text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Category {
    #[default]
    All,
    Favorites,
    Group(Group),
}

impl Category {
    /// `"all"` and `"favorites"` are reserved; anything else names a group.
    pub fn parse(s: &str) -> Self {
        match s {
            "all" => Category::All,
            "favorites" => Category::Favorites,
            label => Category::Group(Group::new(label)),
        }
    }

    pub fn includes(&self, contact: &Contact) -> bool {
        match self {
            Category::All => true,
            Category::Favorites => contact.is_favorite,
            Category::Group(group) => &contact.group == group,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::All => f.write_str("all"),
            Category::Favorites => f.write_str("favorites"),
            Category::Group(group) => write!(f, "{}", group),
        }
    }
}

/// Text match: case-insensitive on name and email, literal on phone.
pub fn matches_query(contact: &Contact, query: &str) -> bool {
    let folded = query.to_lowercase();
    contact.name.to_lowercase().contains(&folded)
        || contact.email.to_lowercase().contains(&folded)
        || contact.phone.contains(query)
}

/// Contacts matching both the query and the category, in list order.
pub fn filter<'a>(contacts: &'a [Contact], query: &str, category: &Category) -> Vec<&'a Contact> {
    contacts
        .iter()
        .filter(|c| matches_query(c, query) && category.includes(c))
        .collect()
}

/// Tab counts: everything, favorites, then each preset group.
pub fn category_counts(contacts: &[Contact]) -> Vec<(Category, usize)> {
    let mut counts = vec![
        (Category::All, contacts.len()),
        (
            Category::Favorites,
            contacts.iter().filter(|c| c.is_favorite).count(),
        ),
    ];
    counts.extend(Group::presets().into_iter().map(|group| {
        let n = contacts.iter().filter(|c| c.group == group).count();
        (Category::Group(group), n)
    }));
    counts
}

/// Case-insensitive substring match on the name only.
pub fn find_by_name<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    let lower = query.to_lowercase();
    contacts
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&lower))
        .collect()
}

/// Outcome of resolving a user-typed contact reference.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    Found(&'a Contact),
    NotFound,
    Ambiguous(Vec<&'a Contact>),
}

/// Resolves `#<id>` or a bare exact id first, then a name substring.
/// Among several name matches, a single exact (case-insensitive) name wins.
pub fn resolve<'a>(contacts: &'a [Contact], reference: &str) -> Resolution<'a> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Resolution::NotFound;
    }

    let id = reference.strip_prefix('#').unwrap_or(reference);
    if let Some(contact) = contacts.iter().find(|c| c.id.as_str() == id) {
        return Resolution::Found(contact);
    }
    if reference.starts_with('#') {
        return Resolution::NotFound;
    }

    let matches = find_by_name(contacts, reference);
    match matches.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Found(matches[0]),
        _ => {
            let lower = reference.to_lowercase();
            let exact: Vec<&Contact> = matches
                .iter()
                .copied()
                .filter(|c| c.name.to_lowercase() == lower)
                .collect();
            match exact.len() {
                1 => Resolution::Found(exact[0]),
                0 => Resolution::Ambiguous(matches),
                _ => Resolution::Ambiguous(exact),
            }
        }
    }
}
