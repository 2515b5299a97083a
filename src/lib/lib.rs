#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Transport-agnostic mail composition.
//!
//! A [`domain::mail::Mail`] is composed field by field, resolves registered
//! CSS into inline `style` attributes on its HTML body, derives a plain-text
//! body from the resolved HTML when none was supplied, and is then handed to
//! a [`domain::mail::MailTransport`] for delivery.

pub mod domain;
pub mod infrastructure;
