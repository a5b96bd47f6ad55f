use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ContactsError, ContactsResult};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> ContactsResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(ContactsError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates that a string has at least `min` characters (not bytes).
pub fn min_length(value: &str, min: usize, field: &str) -> ContactsResult<()> {
    if value.chars().count() < min {
        Err(ContactsError::TooShort {
            field: field.to_string(),
            min,
        })
    } else {
        Ok(())
    }
}

/// Checks the `local@domain.tld` shape. Nothing stricter.
pub fn email_shape(value: &str, field: &str) -> ContactsResult<()> {
    if EMAIL_SHAPE.is_match(value) {
        Ok(())
    } else {
        Err(ContactsError::MalformedEmail {
            field: field.to_string(),
        })
    }
}

pub fn passwords_match(password: &str, confirmation: &str) -> ContactsResult<()> {
    if password.trim() == confirmation.trim() {
        Ok(())
    } else {
        Err(ContactsError::PasswordMismatch)
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_trims_whitespace() {
        assert_eq!(non_blank("  hello  ", "name").unwrap(), "hello");
    }

    #[test]
    fn non_blank_rejects_whitespace_only() {
        assert!(non_blank("   ", "name").is_err());
        assert!(non_blank("", "name").is_err());
    }

    #[test]
    fn min_length_counts_chars() {
        assert!(min_length("пароль", 6, "password").is_ok());
        assert!(min_length("abc12", 6, "password").is_err());
    }

    #[test]
    fn email_shape_accepts_plain_address() {
        assert!(email_shape("alice@x.com", "email").is_ok());
        assert!(email_shape("a.b@mail.example.org", "email").is_ok());
    }

    #[test]
    fn email_shape_rejects_malformed() {
        assert!(email_shape("alice", "email").is_err());
        assert!(email_shape("alice@x", "email").is_err());
        assert!(email_shape("al ice@x.com", "email").is_err());
        assert!(email_shape("@x.com", "email").is_err());
        assert!(email_shape("a@@x.com", "email").is_err());
    }

    #[test]
    fn passwords_match_ignores_surrounding_whitespace() {
        assert!(passwords_match("secret1", " secret1 ").is_ok());
        assert!(matches!(
            passwords_match("secret1", "secret2"),
            Err(ContactsError::PasswordMismatch)
        ));
    }

    #[test]
    fn trim_optional_returns_none_for_blank() {
        assert_eq!(trim_optional(Some("   ")), None);
        assert_eq!(trim_optional(Some(" hi ")), Some("hi".to_string()));
        assert_eq!(trim_optional(None), None);
    }
}
