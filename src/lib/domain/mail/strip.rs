//! Conversion of HTML markup into readable plain text

use std::collections::BTreeSet;

// Sentinels standing in for kept tag markers between passes. U+0001 and
// U+0002 never occur in HTML text.
const KEEP_OPEN_MARK: char = '\u{1}';
const KEEP_CLOSE_MARK: char = '\u{2}';

/// Tag removal policy turning an HTML body into plain text.
///
/// The conversion works over the raw string with sequential passes and no
/// HTML parser: comments go first, tags listed in `drop_with_content` are
/// removed together with everything inside them, every remaining `<...>`
/// span is removed while its inner text stays, and tags listed in
/// `keep_tags` survive untouched.
///
/// The conversion is total: any input produces a result, HTML entities pass
/// through undecoded, and malformed markup degrades to partial stripping
/// rather than failing. The span scan is purely textual, so a same-named
/// element nested inside a dropped tag terminates the removal span at its
/// first closing marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlStripper {
    keep_tags: BTreeSet<String>,
    drop_with_content: BTreeSet<String>,
}

impl Default for HtmlStripper {
    /// The default policy keeps no tags and drops `script`, `style`,
    /// `noframes`, `select` and `option` together with their content.
    fn default() -> Self {
        Self {
            keep_tags: BTreeSet::new(),
            drop_with_content: ["script", "style", "noframes", "select", "option"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl HtmlStripper {
    /// Creates a stripper with an explicit policy.
    ///
    /// Tag names are matched textually and are expected in the lowercase
    /// form they take in the markup.
    pub fn new<K, D>(keep_tags: K, drop_with_content: D) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            keep_tags: keep_tags.into_iter().map(Into::into).collect(),
            drop_with_content: drop_with_content.into_iter().map(Into::into).collect(),
        }
    }

    /// Converts `html` to plain text under this policy and returns the
    /// trimmed result.
    pub fn strip(&self, html: &str) -> String {
        // Leading pad keeps every marker search strictly past index 0.
        let mut text = String::with_capacity(html.len() + 1);
        text.push(' ');
        text.push_str(html);

        for tag in &self.keep_tags {
            text = text.replace(
                &format!("<{tag}"),
                &format!("{KEEP_OPEN_MARK}{tag}"),
            );
            text = text.replace(
                &format!("</{tag}"),
                &format!("{KEEP_CLOSE_MARK}{tag}"),
            );
        }

        remove_comments(&mut text);

        for tag in &self.drop_with_content {
            remove_tag_with_content(&mut text, tag);
        }

        remove_tag_spans(&mut text);

        for tag in &self.keep_tags {
            text = text.replace(
                &format!("{KEEP_OPEN_MARK}{tag}"),
                &format!("<{tag}"),
            );
            text = text.replace(
                &format!("{KEEP_CLOSE_MARK}{tag}"),
                &format!("</{tag}"),
            );
        }

        text.trim().to_string()
    }
}

/// Removes `<!-- ... -->` blocks, leftmost first. An unterminated comment
/// opener is left in place for the later tag-span pass.
fn remove_comments(text: &mut String) {
    while let Some(start) = text.find("<!--") {
        match text[start + 4..].find("-->") {
            Some(close) => {
                text.replace_range(start..start + 4 + close + 3, "");
            }
            None => break,
        }
    }
}

/// Removes every span from `<tag` through the next `tag>`, including the
/// content in between. The scan is not depth-aware: the first occurrence of
/// the closing marker terminates the span.
fn remove_tag_with_content(text: &mut String, tag: &str) {
    let open = format!("<{tag}");
    let close = format!("{tag}>");

    while let Some(start) = text.find(&open) {
        match text[start + open.len()..].find(&close) {
            Some(end) => {
                text.replace_range(start..start + open.len() + end + close.len(), "");
            }
            None => break,
        }
    }
}

/// Removes every remaining `<...>` span, leaving inner text in place. A `<`
/// with no `>` after it ends the pass with the rest of the string intact.
fn remove_tag_spans(text: &mut String) {
    while let Some(start) = text.find('<') {
        match text[start..].find('>') {
            Some(end) => {
                text.replace_range(start..start + end + 1, "");
            }
            None => break,
        }
    }
}
