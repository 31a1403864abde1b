//! Contact intake form: validation and submit flow

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;

lazy_static! {
    /// Loose syntactic check: one `@`, something before it, a dotted domain after
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Inquiry category; unknown values fall back to [`Subject::General`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Subject {
    #[default]
    General,
    Partnership,
    Quote,
    Support,
    Media,
}

impl Subject {
    pub const ALL: [Subject; 5] = [
        Subject::General,
        Subject::Partnership,
        Subject::Quote,
        Subject::Support,
        Subject::Media,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Subject::General => "general",
            Subject::Partnership => "partnership",
            Subject::Quote => "quote",
            Subject::Support => "support",
            Subject::Media => "media",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Subject::General => "General Inquiry",
            Subject::Partnership => "Partnership Opportunity",
            Subject::Quote => "Request a Quote",
            Subject::Support => "Technical Support",
            Subject::Media => "Media & Press",
        }
    }
}

impl From<String> for Subject {
    fn from(value: String) -> Self {
        Subject::ALL
            .into_iter()
            .find(|s| s.value() == value.trim())
            .unwrap_or_default()
    }
}

impl Serialize for Subject {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value())
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Form fields, as posted by the contact page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Company,
    Phone,
    Message,
    Subject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub message: String,
    pub subject: Subject,
}

/// Per-field error messages; only required fields can fail
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }

    pub fn clear(&mut self, field: Field) {
        match field {
            Field::Name => self.name = None,
            Field::Email => self.email = None,
            Field::Message => self.message = None,
            Field::Company | Field::Phone | Field::Subject => {}
        }
    }
}

pub fn validate_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        Some("Name is required".to_string())
    } else if name.chars().count() < NAME_MIN_CHARS {
        Some(format!(
            "Name must be at least {} characters",
            NAME_MIN_CHARS
        ))
    } else {
        None
    }
}

pub fn validate_email(email: &str) -> Option<String> {
    if email.trim().is_empty() {
        Some("Email is required".to_string())
    } else if !EMAIL_RE.is_match(email) {
        Some("Please enter a valid email address".to_string())
    } else {
        None
    }
}

pub fn validate_message(message: &str) -> Option<String> {
    let message = message.trim();
    if message.is_empty() {
        Some("Message is required".to_string())
    } else if message.chars().count() < MESSAGE_MIN_CHARS {
        Some(format!(
            "Message must be at least {} characters",
            MESSAGE_MIN_CHARS
        ))
    } else {
        None
    }
}

impl ContactForm {
    pub fn validate(&self) -> FieldErrors {
        FieldErrors {
            name: validate_name(&self.name),
            email: validate_email(&self.email),
            message: validate_message(&self.message),
        }
    }

    pub fn set(&mut self, field: Field, value: &str) {
        let value = value.to_string();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Company => self.company = value,
            Field::Phone => self.phone = value,
            Field::Message => self.message = value,
            Field::Subject => self.subject = Subject::from(value),
        }
    }
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blocked by validation; errors are shown inline
    Rejected,
    /// Accepted; carries the submitted form
    Accepted(ContactForm),
}

/// Interactive form state: field values, inline errors, success flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormState {
    pub form: ContactForm,
    pub errors: FieldErrors,
    pub submitted: bool,
}

impl ContactFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update a field; an error already shown for it is cleared right away
    pub fn on_change(&mut self, field: Field, value: &str) {
        self.form.set(field, value);
        self.errors.clear(field);
    }

    /// Re-validate every field and submit only when nothing is wrong
    ///
    /// An accepted submit resets the form and flips the success flag.
    pub fn submit(&mut self) -> Submission {
        self.errors = self.form.validate();
        if !self.errors.is_empty() {
            return Submission::Rejected;
        }
        let form = std::mem::take(&mut self.form);
        self.submitted = true;
        Submission::Accepted(form)
    }

    /// Leave the success view for a fresh form
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            ..ContactForm::default()
        }
    }

    #[test]
    fn test_name_boundary() {
        assert!(validate_name("A").is_some());
        assert!(validate_name("  A ").is_some());
        assert!(validate_name("Al").is_none());
        assert_eq!(validate_name("   ").as_deref(), Some("Name is required"));
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("a@b.co").is_none());
        assert_eq!(validate_email("").as_deref(), Some("Email is required"));
        assert!(validate_email("no-at-sign").is_some());
        assert!(validate_email("a@b").is_some());
        assert!(validate_email("a@@b.co").is_some());
        assert!(validate_email("a b@c.co").is_some());
    }

    #[test]
    fn test_message_boundary() {
        assert!(validate_message("1234567890").is_none());
        assert!(validate_message("123456789").is_some());
        assert!(validate_message(" 123456789 ").is_some());
    }

    #[test]
    fn test_optional_fields_never_fail() {
        let mut f = form("Al", "x@y.com", "1234567890");
        f.company = String::new();
        f.phone = "not a phone".to_string();
        assert!(f.validate().is_empty());
    }

    #[test]
    fn test_subject_default_and_parse() {
        assert_eq!(ContactForm::default().subject, Subject::General);
        assert_eq!(Subject::from("quote".to_string()), Subject::Quote);
        assert_eq!(Subject::from("bogus".to_string()), Subject::General);
        assert_eq!(Subject::Media.to_string(), "Media & Press");
    }

    #[test]
    fn test_submit_boundary_scenario() {
        let mut state = ContactFormState::new();
        state.on_change(Field::Name, "Al");
        state.on_change(Field::Email, "x@y.com");
        state.on_change(Field::Message, "1234567890");
        state.on_change(Field::Subject, "partnership");

        match state.submit() {
            Submission::Accepted(sent) => {
                assert_eq!(sent.name, "Al");
                assert_eq!(sent.subject, Subject::Partnership);
            }
            Submission::Rejected => panic!("expected the form to be accepted"),
        }
        assert!(state.submitted);
        assert_eq!(state.form, ContactForm::default());

        let mut state = ContactFormState::new();
        state.form = form("Al", "x@y.com", "123456789");
        assert_eq!(state.submit(), Submission::Rejected);
        assert!(state.errors.message.is_some());
        assert!(!state.submitted);
    }

    #[test]
    fn test_reset_leaves_success_view() {
        let mut state = ContactFormState::new();
        state.form = form("Al", "x@y.com", "1234567890");
        assert!(matches!(state.submit(), Submission::Accepted(_)));
        assert!(state.submitted);

        state.reset();
        assert_eq!(state, ContactFormState::default());
        assert!(!state.submitted);

        // A rejected attempt's inline errors are dropped as well
        assert_eq!(state.submit(), Submission::Rejected);
        state.reset();
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_change_clears_only_that_field() {
        let mut state = ContactFormState::new();
        assert_eq!(state.submit(), Submission::Rejected);
        assert!(state.errors.name.is_some());
        assert!(state.errors.email.is_some());

        // Cleared on edit even though the value is still invalid
        state.on_change(Field::Name, "A");
        assert!(state.errors.name.is_none());
        assert!(state.errors.email.is_some());

        assert_eq!(state.submit(), Submission::Rejected);
        assert!(state.errors.name.is_some());
    }

    #[test]
    fn test_form_decodes_from_urlencoded_shape() {
        let f: ContactForm = serde_json::from_value(serde_json::json!({
            "name": "Al",
            "email": "x@y.com",
            "message": "1234567890",
            "subject": "media"
        }))
        .unwrap();
        assert_eq!(f.subject, Subject::Media);
        assert_eq!(f.company, "");
    }
}
