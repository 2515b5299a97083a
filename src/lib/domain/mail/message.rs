//! Mail message aggregate

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::infrastructure::styling::CssInlineEngine;

use super::address::MailAddress;
use super::attachment::Attachment;
use super::errors::{CssFileError, StyleInlineError};
use super::strip::HtmlStripper;
use super::style::StyleInliner;

/// Transformation applied to the HTML body right before style inlining.
pub type PreInlineTransform = dyn Fn(&str) -> String + Send + Sync;

/// A mail to be handed to a mail transport once composed.
///
/// The mail carries an HTML body and, when no explicit text body has been
/// set, derives a plain-text body from it by stripping markup. CSS
/// registered through [`Mail::add_css_text`] or [`Mail::add_css_file`] is
/// resolved into inline `style` attributes before the HTML body is
/// considered final, and text derivation always works on that resolved
/// HTML.
///
/// The mail exclusively owns its recipient and attachment lists; give
/// another mail clones, not the same values. Default encoding is `utf-8`.
#[derive(Clone)]
pub struct Mail {
    title: String,
    body_text: Option<String>,
    body_html: Option<String>,
    from: Option<MailAddress>,
    to_recipients: Vec<MailAddress>,
    cc_recipients: Vec<MailAddress>,
    bcc_recipients: Vec<MailAddress>,
    attachments: Vec<Attachment>,
    encoding: String,
    css: Option<String>,
    autocreate_missing_text: bool,
    inliner: Arc<dyn StyleInliner>,
    pre_inline: Option<Arc<PreInlineTransform>>,
}

impl Mail {
    /// Creates a new mail with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body_text: None,
            body_html: None,
            from: None,
            to_recipients: Vec::new(),
            cc_recipients: Vec::new(),
            bcc_recipients: Vec::new(),
            attachments: Vec::new(),
            encoding: "utf-8".to_string(),
            css: None,
            autocreate_missing_text: true,
            inliner: Arc::new(CssInlineEngine::new()),
            pre_inline: None,
        }
    }

    /// Creates a new mail with the given title and an explicit text body.
    pub fn with_body_text(title: impl Into<String>, body_text: impl Into<String>) -> Self {
        let mut mail = Self::new(title);
        mail.body_text = Some(body_text.into());
        mail
    }

    /// Gets the mail title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the mail title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Sets the mail text body.
    ///
    /// An explicitly set text body always wins over derivation, even when
    /// it is empty.
    pub fn set_body_text(&mut self, body_text: impl Into<String>) {
        self.body_text = Some(body_text.into());
    }

    /// Sets the mail HTML body.
    pub fn set_body_html(&mut self, body_html: impl Into<String>) {
        self.body_html = Some(body_html.into());
    }

    /// Controls whether a missing text body is derived from the HTML body.
    ///
    /// Defaults to `true`.
    pub fn set_autocreate_missing_text(&mut self, autocreate: bool) {
        self.autocreate_missing_text = autocreate;
    }

    /// Whether a missing text body is derived from the HTML body.
    pub fn autocreate_missing_text(&self) -> bool {
        self.autocreate_missing_text
    }

    /// Gets the "From" mail address.
    pub fn from(&self) -> Option<&MailAddress> {
        self.from.as_ref()
    }

    /// Sets the "From" mail address.
    pub fn set_from(&mut self, from: MailAddress) {
        self.from = Some(from);
    }

    /// Gets the recipients.
    pub fn to_recipients(&self) -> &[MailAddress] {
        &self.to_recipients
    }

    /// Replaces the recipients. The mail takes ownership of the list.
    pub fn set_to_recipients(&mut self, to_recipients: Vec<MailAddress>) {
        self.to_recipients = to_recipients;
    }

    /// Adds a recipient. Insertion order is preserved and duplicates are
    /// allowed.
    pub fn add_to_recipient(&mut self, to_recipient: MailAddress) {
        self.to_recipients.push(to_recipient);
    }

    /// Gets the recipients in Cc.
    pub fn cc_recipients(&self) -> &[MailAddress] {
        &self.cc_recipients
    }

    /// Replaces the recipients in Cc. The mail takes ownership of the list.
    pub fn set_cc_recipients(&mut self, cc_recipients: Vec<MailAddress>) {
        self.cc_recipients = cc_recipients;
    }

    /// Adds a recipient in Cc.
    pub fn add_cc_recipient(&mut self, cc_recipient: MailAddress) {
        self.cc_recipients.push(cc_recipient);
    }

    /// Gets the recipients in Bcc.
    pub fn bcc_recipients(&self) -> &[MailAddress] {
        &self.bcc_recipients
    }

    /// Replaces the recipients in Bcc. The mail takes ownership of the list.
    pub fn set_bcc_recipients(&mut self, bcc_recipients: Vec<MailAddress>) {
        self.bcc_recipients = bcc_recipients;
    }

    /// Adds a recipient in Bcc.
    pub fn add_bcc_recipient(&mut self, bcc_recipient: MailAddress) {
        self.bcc_recipients.push(bcc_recipient);
    }

    /// Gets the attachments of the mail.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Replaces the attachments. The mail takes ownership of the list.
    pub fn set_attachments(&mut self, attachments: Vec<Attachment>) {
        self.attachments = attachments;
    }

    /// Adds an attachment.
    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    /// Gets the encoding label of the mail.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Sets the encoding label. Free-form; not validated against a charset
    /// registry.
    pub fn set_encoding(&mut self, encoding: impl Into<String>) {
        self.encoding = encoding.into();
    }

    /// Registers CSS to be applied to the HTML body.
    ///
    /// All registered CSS accumulates by literal concatenation in
    /// registration order, without deduplication; cascade resolution
    /// belongs to the style inliner.
    pub fn add_css_text(&mut self, css: &str) {
        self.css.get_or_insert_with(String::new).push_str(css);
    }

    /// Registers the contents of a CSS file to be applied to the HTML body.
    ///
    /// The file is read eagerly and released before returning.
    ///
    /// # Errors
    /// Fails with [`CssFileError::ResourceUnavailable`] when the path cannot
    /// be opened or read; nothing is registered in that case.
    pub fn add_css_file(&mut self, path: impl AsRef<Path>) -> Result<(), CssFileError> {
        let path = path.as_ref();

        let css = fs::read_to_string(path).map_err(|source| CssFileError::ResourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("registered css file: {}", path.display());

        self.add_css_text(&css);

        Ok(())
    }

    /// Whether any CSS has been registered on this mail.
    pub fn has_css(&self) -> bool {
        self.css.is_some()
    }

    /// Gets the accumulated CSS, if any was registered.
    pub fn css(&self) -> Option<&str> {
        self.css.as_deref()
    }

    /// Replaces the style inlining engine used to produce the final HTML
    /// body.
    pub fn set_style_inliner(&mut self, inliner: Arc<dyn StyleInliner>) {
        self.inliner = inliner;
    }

    /// Installs a transformation applied to the HTML body right before
    /// style inlining.
    pub fn set_pre_inline_transform<F>(&mut self, transform: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.pre_inline = Some(Arc::new(transform));
    }

    /// Returns the final HTML body.
    ///
    /// The pre-inline transform is applied first when one is installed.
    /// When CSS has been registered, the result is the style inliner's
    /// output for the current HTML and accumulated CSS; otherwise the HTML
    /// is returned unchanged. Recomputed on every call.
    ///
    /// # Errors
    /// Fails with [`StyleInlineError`] when the inlining engine rejects the
    /// input. The failure propagates; it is neither retried nor swallowed.
    pub fn body_html(&self) -> Result<Option<String>, StyleInlineError> {
        let Some(raw) = self.body_html.as_deref() else {
            return Ok(None);
        };

        let html = match &self.pre_inline {
            Some(transform) => transform(raw),
            None => raw.to_string(),
        };

        match &self.css {
            Some(css) => Ok(Some(self.inliner.inline(&html, css)?)),
            None => Ok(Some(html)),
        }
    }

    /// Returns the final text body.
    ///
    /// An explicitly set text body is returned verbatim and is never run
    /// through the markup stripper. Otherwise, when autocreation is
    /// enabled, the *style-resolved* HTML body is stripped down to plain
    /// text, so text readers never see un-inlined markup artifacts.
    /// Returns `None` when there is nothing to derive from or autocreation
    /// is disabled.
    ///
    /// # Errors
    /// Fails with [`StyleInlineError`] when deriving requires inlining and
    /// the engine rejects the input.
    pub fn body_text(&self) -> Result<Option<String>, StyleInlineError> {
        if let Some(text) = &self.body_text {
            return Ok(Some(text.clone()));
        }

        if !self.autocreate_missing_text {
            return Ok(None);
        }

        match self.body_html()? {
            Some(html) => Ok(Some(HtmlStripper::default().strip(&html))),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for Mail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mail")
            .field("title", &self.title)
            .field("body_text", &self.body_text)
            .field("body_html", &self.body_html)
            .field("from", &self.from)
            .field("to_recipients", &self.to_recipients)
            .field("cc_recipients", &self.cc_recipients)
            .field("bcc_recipients", &self.bcc_recipients)
            .field("attachments", &self.attachments)
            .field("encoding", &self.encoding)
            .field("css", &self.css)
            .field("autocreate_missing_text", &self.autocreate_missing_text)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::process;

    use testresult::TestResult;

    use crate::domain::mail::tests::MockStyleInliner;

    use super::*;

    #[test]
    fn test_explicit_text_body_wins() -> TestResult {
        let mut mail = Mail::new("Welcome");
        mail.set_body_text("hello");
        mail.set_body_html("<p>Hi <b>Bob</b></p>");

        assert_eq!(mail.body_text()?, Some("hello".to_string()));

        Ok(())
    }

    #[test]
    fn test_empty_explicit_text_body_is_a_value() -> TestResult {
        let mut mail = Mail::new("Welcome");
        mail.set_body_text("");
        mail.set_body_html("<p>Hi</p>");

        assert_eq!(mail.body_text()?, Some(String::new()));

        Ok(())
    }

    #[test]
    fn test_text_body_derived_from_html() -> TestResult {
        let mut mail = Mail::new("Welcome");
        mail.set_body_html("<p>Hi <b>Bob</b></p>");

        assert_eq!(mail.body_html()?, Some("<p>Hi <b>Bob</b></p>".to_string()));
        assert_eq!(mail.body_text()?, Some("Hi Bob".to_string()));

        Ok(())
    }

    #[test]
    fn test_no_derivation_when_autocreate_disabled() -> TestResult {
        let mut mail = Mail::new("Welcome");
        mail.set_body_html("<p>Hi</p>");
        mail.set_autocreate_missing_text(false);

        assert_eq!(mail.body_text()?, None);

        Ok(())
    }

    #[test]
    fn test_no_bodies_when_nothing_set() -> TestResult {
        let mail = Mail::new("Welcome");

        assert_eq!(mail.body_html()?, None);
        assert_eq!(mail.body_text()?, None);

        Ok(())
    }

    #[test]
    fn test_html_body_untouched_without_css() -> TestResult {
        let mut mail = Mail::new("Welcome");
        mail.set_body_html("<p>Hi</p>");

        assert!(!mail.has_css());
        assert_eq!(mail.body_html()?, Some("<p>Hi</p>".to_string()));

        Ok(())
    }

    #[test]
    fn test_css_accumulates_in_registration_order() {
        let mut mail = Mail::new("Welcome");
        mail.add_css_text("A");
        mail.add_css_text("B");

        assert_eq!(mail.css(), Some("AB"));
    }

    #[test]
    fn test_registered_css_routes_through_the_inliner_once() -> TestResult {
        let mut inliner = MockStyleInliner::new();

        inliner
            .expect_inline()
            .times(1)
            .withf(|html, css| html == "<p>Hi</p>" && css == "p { color: red }")
            .returning(|_, _| Ok("<p style=\"color: red\">Hi</p>".to_string()));

        let mut mail = Mail::new("Welcome");
        mail.set_body_html("<p>Hi</p>");
        mail.add_css_text("p { color: red }");
        mail.set_style_inliner(Arc::new(inliner));

        assert_eq!(
            mail.body_html()?,
            Some("<p style=\"color: red\">Hi</p>".to_string())
        );

        Ok(())
    }

    #[test]
    fn test_registered_but_empty_css_still_routes_through_the_inliner() -> TestResult {
        let mut inliner = MockStyleInliner::new();

        inliner
            .expect_inline()
            .times(1)
            .withf(|html, css| html == "<p>Hi</p>" && css.is_empty())
            .returning(|html, _| Ok(html.to_string()));

        let mut mail = Mail::new("Welcome");
        mail.set_body_html("<p>Hi</p>");
        mail.add_css_text("");
        mail.set_style_inliner(Arc::new(inliner));

        assert!(mail.has_css());
        assert_eq!(mail.body_html()?, Some("<p>Hi</p>".to_string()));

        Ok(())
    }

    #[test]
    fn test_text_derivation_strips_the_resolved_html() -> TestResult {
        let mut inliner = MockStyleInliner::new();

        inliner
            .expect_inline()
            .times(1)
            .returning(|_, _| Ok("<p style=\"color: red\">Hi <b>Bob</b></p>".to_string()));

        let mut mail = Mail::new("Welcome");
        mail.set_body_html("<p>Hi <b>Bob</b></p>");
        mail.add_css_text("p { color: red }");
        mail.set_style_inliner(Arc::new(inliner));

        assert_eq!(mail.body_text()?, Some("Hi Bob".to_string()));

        Ok(())
    }

    #[test]
    fn test_pre_inline_transform_feeds_the_inliner() -> TestResult {
        let mut inliner = MockStyleInliner::new();

        inliner
            .expect_inline()
            .times(1)
            .withf(|html, _| html == "<div><p>Hi</p></div>")
            .returning(|html, _| Ok(html.to_string()));

        let mut mail = Mail::new("Welcome");
        mail.set_body_html("<p>Hi</p>");
        mail.add_css_text("p {}");
        mail.set_pre_inline_transform(|html| format!("<div>{html}</div>"));
        mail.set_style_inliner(Arc::new(inliner));

        assert_eq!(mail.body_html()?, Some("<div><p>Hi</p></div>".to_string()));

        Ok(())
    }

    #[test]
    fn test_pre_inline_transform_applies_without_css() -> TestResult {
        let mut mail = Mail::new("Welcome");
        mail.set_body_html("<p>Hi</p>");
        mail.set_pre_inline_transform(|html| format!("<div>{html}</div>"));

        assert_eq!(mail.body_html()?, Some("<div><p>Hi</p></div>".to_string()));

        Ok(())
    }

    #[test]
    fn test_inliner_failure_propagates() {
        let mut inliner = MockStyleInliner::new();

        inliner.expect_inline().times(1).returning(|_, _| {
            Err(StyleInlineError::EngineRejected(anyhow::anyhow!(
                "bad css"
            )))
        });

        let mut mail = Mail::new("Welcome");
        mail.set_body_html("<p>Hi</p>");
        mail.add_css_text("p { color: }");
        mail.set_style_inliner(Arc::new(inliner));

        assert!(mail.body_html().is_err());
    }

    #[test]
    fn test_add_css_file_appends_contents() -> TestResult {
        let path = env::temp_dir().join(format!("mailforge-css-{}.css", process::id()));
        fs::write(&path, "p { color: red }")?;

        let mut mail = Mail::new("Welcome");
        mail.add_css_text("A");
        mail.add_css_file(&path)?;

        fs::remove_file(&path)?;

        assert_eq!(mail.css(), Some("Ap { color: red }"));

        Ok(())
    }

    #[test]
    fn test_add_css_file_unreadable_path_fails() {
        let mut mail = Mail::new("Welcome");
        mail.add_css_text("A");

        let result = mail.add_css_file("/nonexistent/mailforge.css");

        assert!(matches!(
            result.unwrap_err(),
            CssFileError::ResourceUnavailable { .. }
        ));
        assert_eq!(mail.css(), Some("A"));
    }

    #[test]
    fn test_recipient_lists_preserve_order_and_duplicates() {
        let mut mail = Mail::new("Welcome");
        mail.add_to_recipient(MailAddress::new("a@example.com"));
        mail.add_to_recipient(MailAddress::new("b@example.com"));
        mail.add_to_recipient(MailAddress::new("a@example.com"));

        let mails: Vec<&str> = mail.to_recipients().iter().map(|a| a.mail()).collect();

        assert_eq!(mails, ["a@example.com", "b@example.com", "a@example.com"]);
    }

    #[test]
    fn test_cloned_mail_owns_its_lists() {
        let mut mail = Mail::new("Welcome");
        mail.add_to_recipient(MailAddress::new("a@example.com"));

        let mut other = mail.clone();
        other.add_to_recipient(MailAddress::new("b@example.com"));

        assert_eq!(mail.to_recipients().len(), 1);
        assert_eq!(other.to_recipients().len(), 2);
    }

    #[test]
    fn test_composition_accessors() {
        let mut mail = Mail::with_body_text("Welcome", "hello");
        mail.set_from(MailAddress::with_display_name("noreply@example.com", "App"));
        mail.add_cc_recipient(MailAddress::new("cc@example.com"));
        mail.add_bcc_recipient(MailAddress::new("bcc@example.com"));
        mail.add_attachment(Attachment::new("report.bin", vec![1, 2, 3]));
        mail.set_encoding("iso-8859-1");

        assert_eq!(mail.title(), "Welcome");
        assert_eq!(mail.from().map(|a| a.mail()), Some("noreply@example.com"));
        assert_eq!(mail.cc_recipients().len(), 1);
        assert_eq!(mail.bcc_recipients().len(), 1);
        assert_eq!(mail.attachments().len(), 1);
        assert_eq!(mail.encoding(), "iso-8859-1");
    }
}
