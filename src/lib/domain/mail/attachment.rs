//! Mail attachment value object

use std::fmt;

/// Content transfer encoding of an attachment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransferEncoding {
    /// 7bit transfer encoding
    SevenBit,

    /// 8bit transfer encoding
    EightBit,

    /// quoted-printable transfer encoding
    QuotedPrintable,

    /// base64 transfer encoding
    #[default]
    Base64,
}

impl TransferEncoding {
    /// Gets the conventional header token for this encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferEncoding::SevenBit => "7bit",
            TransferEncoding::EightBit => "8bit",
            TransferEncoding::QuotedPrintable => "quoted-printable",
            TransferEncoding::Base64 => "base64",
        }
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an attachment is presented to the recipient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Disposition {
    /// Offered as a separate downloadable file
    #[default]
    Attachment,

    /// Rendered inside the HTML body, e.g. an embedded image
    Inline,
}

impl Disposition {
    /// Gets the conventional header token for this disposition.
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Attachment => "attachment",
            Disposition::Inline => "inline",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file attached to a mail.
///
/// Built once with [`Attachment::new`] and the `with_*` builders, owned by a
/// single mail and immutable afterwards.
///
/// An inline attachment referenced from the HTML body through a `cid:` URI
/// must carry a content id. That obligation rests with the caller; the type
/// performs no validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    content: Vec<u8>,
    file_name: String,
    mime_type: String,
    transfer_encoding: TransferEncoding,
    disposition: Disposition,
    content_id: Option<String>,
}

impl Attachment {
    /// Creates an attachment with the default `application/octet-stream`
    /// mime type, base64 transfer encoding and `attachment` disposition.
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            content,
            file_name: file_name.into(),
            mime_type: "application/octet-stream".to_string(),
            transfer_encoding: TransferEncoding::default(),
            disposition: Disposition::default(),
            content_id: None,
        }
    }

    /// Sets the mime type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Sets the transfer encoding.
    pub fn with_transfer_encoding(mut self, transfer_encoding: TransferEncoding) -> Self {
        self.transfer_encoding = transfer_encoding;
        self
    }

    /// Sets the disposition.
    pub fn with_disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = disposition;
        self
    }

    /// Sets the content id used by `cid:` references in the HTML body.
    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }

    /// Gets the content of the file to attach, as an octet stream.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Gets the name of the file in the mail.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Gets the mime type of the attachment.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Gets the transfer encoding of the attachment.
    pub fn transfer_encoding(&self) -> TransferEncoding {
        self.transfer_encoding
    }

    /// Gets the disposition of the attachment.
    pub fn disposition(&self) -> Disposition {
        self.disposition
    }

    /// Gets the content id of the attachment, if one was provided.
    pub fn content_id(&self) -> Option<&str> {
        self.content_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_defaults() {
        let attachment = Attachment::new("report.bin", vec![0x1f, 0x8b]);

        assert_eq!(attachment.file_name(), "report.bin");
        assert_eq!(attachment.content(), &[0x1f, 0x8b]);
        assert_eq!(attachment.mime_type(), "application/octet-stream");
        assert_eq!(attachment.transfer_encoding(), TransferEncoding::Base64);
        assert_eq!(attachment.disposition(), Disposition::Attachment);
        assert_eq!(attachment.content_id(), None);
    }

    #[test]
    fn test_inline_attachment_with_content_id() {
        let attachment = Attachment::new("logo.png", vec![0x89, 0x50, 0x4e, 0x47])
            .with_mime_type("image/png")
            .with_disposition(Disposition::Inline)
            .with_content_id("logo");

        assert_eq!(attachment.mime_type(), "image/png");
        assert_eq!(attachment.disposition(), Disposition::Inline);
        assert_eq!(attachment.content_id(), Some("logo"));
    }

    #[test]
    fn test_header_tokens() {
        assert_eq!(TransferEncoding::SevenBit.as_str(), "7bit");
        assert_eq!(TransferEncoding::EightBit.as_str(), "8bit");
        assert_eq!(
            TransferEncoding::QuotedPrintable.to_string(),
            "quoted-printable"
        );
        assert_eq!(TransferEncoding::Base64.to_string(), "base64");
        assert_eq!(Disposition::Attachment.to_string(), "attachment");
        assert_eq!(Disposition::Inline.to_string(), "inline");
    }
}
