//! css-inline backed style inlining engine

use css_inline::CSSInliner;

use crate::domain::mail::{StyleInlineError, StyleInliner};

/// Style inlining engine backed by the `css-inline` crate.
///
/// The accumulated CSS is handed to the engine as extra CSS on top of
/// whatever `<style>` blocks the document itself carries. Remote stylesheet
/// loading is disabled: the engine works over exactly the two strings it is
/// given.
#[derive(Clone, Copy, Debug, Default)]
pub struct CssInlineEngine;

impl CssInlineEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }
}

impl StyleInliner for CssInlineEngine {
    fn inline(&self, html: &str, css: &str) -> Result<String, StyleInlineError> {
        let inliner = CSSInliner::options()
            .load_remote_stylesheets(false)
            .extra_css(Some(css.into()))
            .build();

        Ok(inliner.inline(html)?)
    }
}
