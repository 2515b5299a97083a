//! Composes a styled mail with an inline attachment and prints both final
//! bodies.

use anyhow::Result;
use mailforge::domain::mail::{Attachment, Disposition, Mail, MailAddress};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut mail = Mail::new("Monthly report");

    mail.set_from(MailAddress::with_display_name(
        "reports@example.com",
        "Reports",
    ));
    mail.add_to_recipient(MailAddress::with_display_name("alice@example.com", "Alice"));
    mail.add_cc_recipient(MailAddress::new("archive@example.com"));

    mail.set_body_html(
        "<h1>March</h1><p>All systems <b>green</b>.</p>\
         <p><img src=\"cid:chart\" alt=\"chart\"/></p>",
    );
    mail.add_css_text("h1 { color: #333333 } p { font-family: sans-serif }");

    mail.add_attachment(
        Attachment::new("chart.png", vec![0x89, 0x50, 0x4e, 0x47])
            .with_mime_type("image/png")
            .with_disposition(Disposition::Inline)
            .with_content_id("chart"),
    );

    println!("html: {}", mail.body_html()?.unwrap_or_default());
    println!("text: {}", mail.body_text()?.unwrap_or_default());

    Ok(())
}
