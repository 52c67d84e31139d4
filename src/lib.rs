//! docshift: convert Python doc-comments between reST, Epytext, Google and
//! Numpydoc, producing unified-diff patches instead of rewriting files.
//!
//! Pipeline: [`segment`] → [`signature`] → [`parser`] → [`adapter`] →
//! [`render`] → [`patch`].

pub mod adapter;
pub mod config;
pub mod model;
pub mod parser;
pub mod patch;
pub mod render;
pub mod segment;
pub mod signature;

pub use config::{Dialect, FormatConfig};
pub use model::DocComment;
pub use patch::PatchLabels;

/// Canonical models for every documentable doc-comment in `source`.
pub fn models(source: &str) -> Vec<DocComment> {
    let lines = segment::split_lines(source);
    let mut items = segment::segment(&lines);
    signature::annotate(&mut items);
    adapter::adapt(&items)
}

/// `source` with every documentable doc-comment rewritten.
pub fn convert(source: &str, config: &FormatConfig) -> String {
    let lines = segment::split_lines(source);
    patch::rewrite(&lines, &models(source), config)
}

/// Unified diff from `source` to its converted form; empty when nothing changes.
pub fn patch(source: &str, name: &str, config: &FormatConfig, labels: &PatchLabels) -> String {
    let lines = segment::split_lines(source);
    patch::emit(&lines, &models(source), config, name, labels)
}
