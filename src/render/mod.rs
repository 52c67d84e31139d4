//! Renderer module: trait-based dialect dispatch.
//!
//! Every renderer lays out the same skeleton: the opening delimiter glued to
//! the summary, a blank line, the description, then one block per element
//! group separated by blank lines, and the closing delimiter on its own line.

pub mod field;
pub mod google;
pub mod normalize;
pub mod numpydoc;
pub mod wrap;

use crate::config::{Dialect, FormatConfig};
use crate::model::DocComment;

/// Trait for laying out a normalized doc-comment in a target dialect.
pub trait Renderer {
    /// Output lines without terminators, delimiters included.
    fn render(&self, doc: &DocComment, config: &FormatConfig) -> Vec<String>;
}

/// Create the renderer for a target dialect.
pub fn create_renderer(dialect: Dialect) -> Box<dyn Renderer> {
    match dialect {
        Dialect::Google => Box::new(google::GoogleRenderer),
        Dialect::Numpydoc => Box::new(numpydoc::NumpydocRenderer),
        Dialect::Rest => Box::new(field::FieldRenderer::Rest),
        Dialect::Epytext => Box::new(field::FieldRenderer::Epytext),
    }
}

/// Normalize `doc` and render it in `config.dialect`.
pub fn render(doc: &DocComment, config: &FormatConfig) -> Vec<String> {
    let doc = normalize::normalize(doc, config.dialect);
    create_renderer(config.dialect).render(&doc, config)
}

/// Line sink shared by the renderers. Levels count tab stops past the
/// doc-comment's own indentation.
pub(crate) struct DocWriter<'a> {
    config: &'a FormatConfig,
    indent: &'a str,
    delimiter: &'static str,
    trailer: &'a str,
    lines: Vec<String>,
}

impl<'a> DocWriter<'a> {
    pub(crate) fn new(doc: &'a DocComment, config: &'a FormatConfig) -> Self {
        DocWriter {
            config,
            indent: &doc.indent,
            delimiter: config.quote.unwrap_or(doc.quote).delimiter(),
            trailer: &doc.trailer,
            lines: Vec::new(),
        }
    }

    fn prefix(&self, level: usize) -> String {
        format!("{}{}", self.indent, self.tab().repeat(level))
    }

    fn tab(&self) -> String {
        " ".repeat(self.config.tab_width)
    }

    /// Opening delimiter with the summary, then the description.
    pub(crate) fn head(&mut self, doc: &DocComment) {
        let summary = doc.summary.as_deref().unwrap_or_default();
        self.text(0, &format!("{}{}", self.delimiter, summary));
        if let Some(description) = &doc.description {
            self.blank();
            self.text(0, description);
        }
    }

    pub(crate) fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// A single line, never wrapped.
    pub(crate) fn line(&mut self, level: usize, text: &str) {
        let line = format!("{}{}", self.prefix(level), text);
        self.lines.push(line);
    }

    /// Paragraph text; wrapped lines stay at `level`.
    pub(crate) fn text(&mut self, level: usize, text: &str) {
        let prefix = self.prefix(level);
        self.lines.extend(wrap::wrap_block(
            text,
            &prefix,
            "",
            self.config.max_line_width,
        ));
    }

    /// Entry text; continuation lines hang one tab stop deeper.
    pub(crate) fn entry(&mut self, level: usize, text: &str) {
        let prefix = self.prefix(level);
        let hang = self.tab();
        self.lines.extend(wrap::wrap_block(
            text,
            &prefix,
            &hang,
            self.config.max_line_width,
        ));
    }

    /// Code and other pre-formatted text.
    pub(crate) fn verbatim(&mut self, level: usize, text: &str) {
        let prefix = self.prefix(level);
        self.lines.extend(wrap::verbatim_block(text, &prefix));
    }

    /// Close the doc-comment and hand back its lines.
    pub(crate) fn finish(mut self) -> Vec<String> {
        let closing = format!("{}{}{}", self.indent, self.delimiter, self.trailer);
        self.lines.push(closing);
        self.lines
    }
}
