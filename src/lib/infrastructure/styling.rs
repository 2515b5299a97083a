//! Style inlining engine implementations

mod engine;

pub use engine::CssInlineEngine;
