//! Mail address value object

use std::fmt;

/// A mail address together with the name it should be displayed as.
///
/// The address is carried as an opaque string: no syntax validation is
/// performed, and the address must be non-empty by the time the mail is
/// handed to a transport. Each list holding a [`MailAddress`] owns it
/// exclusively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailAddress {
    mail: String,
    display_name: Option<String>,
}

impl MailAddress {
    /// Creates a mail address without a display name.
    pub fn new(mail: impl Into<String>) -> Self {
        Self {
            mail: mail.into(),
            display_name: None,
        }
    }

    /// Creates a mail address with a display name.
    pub fn with_display_name(mail: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            mail: mail.into(),
            display_name: Some(display_name.into()),
        }
    }

    /// Gets the bare mail address.
    pub fn mail(&self) -> &str {
        &self.mail
    }

    /// Gets the display name, if one was provided.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

/// Renders as `Name <mail@example.com>` when a non-empty display name was
/// provided, or simply as `mail@example.com` otherwise.
impl fmt::Display for MailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => write!(f, "{} <{}>", name, self.mail),
            _ => write!(f, "{}", self.mail),
        }
    }
}
