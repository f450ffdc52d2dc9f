use chrono::{DateTime, Utc};

use crate::macros::nutype_string;

/// A message submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: ContactMessageName,
    pub email: ContactMessageEmail,
    pub message: ContactMessageText,
    pub submitted_at: DateTime<Utc>,
}

nutype_string!(
    /// Name of the person submitting the form
    ContactMessageName
);

nutype_string!(
    /// Reply address as entered by the person submitting the form. Its
    /// format is not validated.
    ContactMessageEmail
);

nutype_string!(
    /// Body of the message
    ContactMessageText
);

/// Unvalidated contact form input as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// The fields of a [`ContactSubmission`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
