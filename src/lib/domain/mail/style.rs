//! Style inlining capability

#[cfg(test)]
use mockall::mock;

use super::errors::StyleInlineError;

/// CSS inlining capability consumed when producing the final HTML body.
///
/// Implementations receive exactly the two strings and only the returned
/// string is used; the engine's algorithm is outside this crate's concern.
pub trait StyleInliner: Send + Sync {
    /// Resolves `css` into inline `style` attributes on the matching
    /// elements of `html`, returning the rewritten document.
    ///
    /// # Errors
    /// Fails with [`StyleInlineError`] when the engine cannot process the
    /// supplied HTML or CSS.
    fn inline(&self, html: &str, css: &str) -> Result<String, StyleInlineError>;
}

#[cfg(test)]
mock! {
    pub StyleInliner {}

    impl StyleInliner for StyleInliner {
        fn inline(&self, html: &str, css: &str) -> Result<String, StyleInlineError>;
    }
}
