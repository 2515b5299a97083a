//! Mail composition errors

use std::io;
use std::path::PathBuf;

use css_inline::InlineError;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when registering a CSS file on a mail.
#[derive(Debug, Error)]
pub enum CssFileError {
    /// The CSS file could not be opened or read
    #[error("css resource unavailable: {path}")]
    ResourceUnavailable {
        /// The path that could not be read
        path: PathBuf,

        /// The underlying io failure
        #[source]
        source: io::Error,
    },
}

/// Errors that can occur while resolving CSS into the HTML body.
#[derive(Debug, Error)]
pub enum StyleInlineError {
    /// The inlining engine could not process the supplied HTML or CSS
    #[error("could not inline styles into the html body")]
    EngineRejected(#[source] anyhow::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for StyleInlineError {
    fn from(err: anyhow::Error) -> Self {
        StyleInlineError::UnknownError(err)
    }
}

impl From<InlineError> for StyleInlineError {
    fn from(err: InlineError) -> Self {
        debug!("InlineError -> StyleInlineError");

        StyleInlineError::EngineRejected(anyhow::Error::new(err))
    }
}

/// Errors surfaced by a mail transport during delivery.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// An error occurred while sending the mail
    #[error("an error occurred while sending the mail")]
    SendError,

    /// The transport rejected one of the mail addresses
    #[error("invalid mail address")]
    InvalidAddress,

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for DeliveryError {
    fn from(err: anyhow::Error) -> Self {
        DeliveryError::UnknownError(err)
    }
}
