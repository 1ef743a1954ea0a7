use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::page::{Field, Node, Page};

// `\s` plus the byte order mark, which browsers count as whitespace
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").expect("email pattern is valid")
});

/// Minimum lengths in UTF-16 code units, the unit form inputs report.
const MIN_NAME_LEN: usize = 2;
const MIN_MESSAGE_LEN: usize = 10;

/// A failed rule. The display text is what the visitor sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter your email address")]
    NewsletterEmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Message is required")]
    MessageRequired,
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

fn input_len(value: &str) -> usize {
    value.encode_utf16().count()
}

fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Strips the same characters a browser's `trim()` does.
fn trim_input(value: &str) -> &str {
    value.trim_matches(is_blank)
}

/// Submit-time rule for one field. `value` is trimmed here.
pub fn check_field(field: Field, value: &str) -> Result<(), ValidationError> {
    let value = trim_input(value);
    match field {
        Field::Name if value.is_empty() => Err(ValidationError::NameRequired),
        Field::Name if input_len(value) < MIN_NAME_LEN => Err(ValidationError::NameTooShort),
        Field::Email if value.is_empty() => Err(ValidationError::EmailRequired),
        Field::Email if !is_valid_email(value) => Err(ValidationError::EmailInvalid),
        Field::Message if value.is_empty() => Err(ValidationError::MessageRequired),
        Field::Message if input_len(value) < MIN_MESSAGE_LEN => {
            Err(ValidationError::MessageTooShort)
        }
        _ => Ok(()),
    }
}

/// Blur-time rule: an empty field is not complained about yet.
pub fn check_on_blur(field: Field, value: &str) -> Option<ValidationError> {
    if trim_input(value).is_empty() {
        return None;
    }
    check_field(field, value).err()
}

pub fn check_newsletter_email(value: &str) -> Result<String, ValidationError> {
    let email = trim_input(value);
    if email.is_empty() {
        return Err(ValidationError::NewsletterEmailRequired);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(email.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn read(page: &impl Page) -> Self {
        Self {
            name: page.value(&Node::Field(Field::Name)),
            email: page.value(&Node::Field(Field::Email)),
            message: page.value(&Node::Field(Field::Message)),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// Every failing field in form order.
    pub fn validate(&self) -> Vec<(Field, ValidationError)> {
        Field::ALL
            .into_iter()
            .filter_map(|field| check_field(field, self.value(field)).err().map(|e| (field, e)))
            .collect()
    }
}

/// Error slots that are missing from the markup are skipped.
pub fn show_error(page: &mut impl Page, field: Field, error: &ValidationError) {
    let slot = Node::ErrorSlot(field);
    if page.exists(&slot) {
        page.set_text(&slot, &error.to_string());
        page.set_style(&slot, "display", "block");
    }
}

pub fn clear_error(page: &mut impl Page, field: Field) {
    let slot = Node::ErrorSlot(field);
    if page.exists(&slot) {
        page.set_text(&slot, "");
        page.set_style(&slot, "display", "none");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePage;

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@@b.c"));
        assert!(!is_valid_email("@b.c"));
    }

    #[test]
    fn all_empty_fails_everything() {
        let errors = submission("", "", "").validate();
        assert_eq!(
            errors,
            vec![
                (Field::Name, ValidationError::NameRequired),
                (Field::Email, ValidationError::EmailRequired),
                (Field::Message, ValidationError::MessageRequired),
            ]
        );
    }

    #[test]
    fn short_name_passes_at_two_chars() {
        let errors = submission("Al", "not-an-email", "short").validate();
        assert_eq!(
            errors,
            vec![
                (Field::Email, ValidationError::EmailInvalid),
                (Field::Message, ValidationError::MessageTooShort),
            ]
        );
    }

    #[test]
    fn whitespace_is_trimmed_before_length_checks() {
        let errors = submission("  A  ", " a@b.co ", "   123456789   ").validate();
        assert_eq!(
            errors,
            vec![
                (Field::Name, ValidationError::NameTooShort),
                (Field::Message, ValidationError::MessageTooShort),
            ]
        );
        assert!(submission("Ann", "a@b.co", "This is long enough.").validate().is_empty());
    }

    #[test]
    fn lengths_count_utf16_units() {
        assert_eq!(check_field(Field::Message, "😀😀😀😀😀"), Ok(()));
        assert_eq!(
            check_field(Field::Message, "😀😀😀😀"),
            Err(ValidationError::MessageTooShort)
        );
        assert_eq!(check_field(Field::Name, "😀"), Ok(()));
        assert_eq!(check_field(Field::Name, "é"), Err(ValidationError::NameTooShort));
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        let errors = submission("\u{feff}A", "a@b.co\u{feff}", "\u{feff}\u{feff}").validate();
        assert_eq!(
            errors,
            vec![
                (Field::Name, ValidationError::NameTooShort),
                (Field::Message, ValidationError::MessageRequired),
            ]
        );
        assert_eq!(check_on_blur(Field::Name, "\u{feff} "), None);
        assert!(!is_valid_email("a\u{feff}b@c.de"));
        assert_eq!(check_newsletter_email("\u{feff}"), Err(ValidationError::NewsletterEmailRequired));
    }

    #[test]
    fn blur_ignores_empty_fields() {
        assert_eq!(check_on_blur(Field::Name, "   "), None);
        assert_eq!(check_on_blur(Field::Name, "A"), Some(ValidationError::NameTooShort));
        assert_eq!(check_on_blur(Field::Email, "x@"), Some(ValidationError::EmailInvalid));
        assert_eq!(check_on_blur(Field::Message, "long enough text"), None);
    }

    #[test]
    fn newsletter_messages() {
        assert_eq!(
            check_newsletter_email("  ").unwrap_err().to_string(),
            "Please enter your email address"
        );
        assert_eq!(
            check_newsletter_email("nope").unwrap_err().to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(check_newsletter_email(" user@example.com ").as_deref(), Ok("user@example.com"));
    }

    #[test]
    fn error_slot_visibility_follows_text() {
        let mut page = FakePage::landing(3);
        show_error(&mut page, Field::Name, &ValidationError::NameRequired);
        let slot = Node::ErrorSlot(Field::Name);
        assert_eq!(page.text(&slot), "Name is required");
        assert_eq!(page.style(&slot, "display"), Some("block"));

        clear_error(&mut page, Field::Name);
        assert_eq!(page.text(&slot), "");
        assert_eq!(page.style(&slot, "display"), Some("none"));
    }

    #[test]
    fn missing_error_slot_is_a_no_op() {
        let mut page = FakePage::landing(3);
        page.remove(&Node::ErrorSlot(Field::Email));
        show_error(&mut page, Field::Email, &ValidationError::EmailInvalid);
        clear_error(&mut page, Field::Email);
        assert!(!page.exists(&Node::ErrorSlot(Field::Email)));
    }
}
