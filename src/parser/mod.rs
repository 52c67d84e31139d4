//! Parser module: dialect classification and dispatch.
//!
//! Parsers turn raw doc-comment text into a [`ParsedDoc`]: a summary, a
//! free-form description and a list of keyed entries. The adapter turns the
//! entries into canonical elements.

pub mod classify;
pub mod field;
pub mod google;

pub use classify::{classify, SourceDialect};

use crate::model::Quote;

/// Parse a doc-comment written in `dialect`.
pub fn parse(text: &str, quote: Quote, dialect: SourceDialect) -> ParsedDoc {
    match dialect {
        SourceDialect::Rest => field::parse(text, quote, ':'),
        SourceDialect::Epytext => field::parse(text, quote, '@'),
        SourceDialect::Google => google::parse(text, quote),
    }
}

/// What a parsed entry documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Param,
    /// Type of a previously or later documented parameter (`:type x:`).
    ParamType,
    Return,
    ReturnType,
    Raise,
    Yield,
    /// Type of a documented yield (`:ytype:`).
    YieldType,
    Attribute,
    /// Type of a documented attribute (`:vartype x:`).
    AttributeType,
    Note,
    Example,
    Todo,
    Warn,
    SeeAlso,
    Reference,
    Receive,
    Custom(String),
}

impl EntryKind {
    /// Map a reST / Epytext field key.
    pub fn from_key(key: &str) -> EntryKind {
        match key.to_ascii_lowercase().as_str() {
            "param" | "parameter" | "arg" | "argument" | "key" | "keyword" => EntryKind::Param,
            "type" => EntryKind::ParamType,
            "return" | "returns" => EntryKind::Return,
            "rtype" => EntryKind::ReturnType,
            "raise" | "raises" | "except" | "exception" => EntryKind::Raise,
            "yield" | "yields" => EntryKind::Yield,
            "ytype" => EntryKind::YieldType,
            "var" | "ivar" | "cvar" | "attribute" | "attr" => EntryKind::Attribute,
            "vartype" => EntryKind::AttributeType,
            "note" | "notes" => EntryKind::Note,
            "example" | "examples" => EntryKind::Example,
            "todo" => EntryKind::Todo,
            "warn" | "warns" | "warning" => EntryKind::Warn,
            "see" | "seealso" => EntryKind::SeeAlso,
            "reference" | "references" => EntryKind::Reference,
            "receive" | "receives" => EntryKind::Receive,
            _ => EntryKind::Custom(key.to_string()),
        }
    }
}

/// One structured entry, still keyed by what the source dialect said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub name: Option<String>,
    pub type_name: Option<String>,
    /// Entry text, newlines kept, continuation lines dedented.
    pub statement: String,
}

/// Parser output.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedDoc {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub entries: Vec<Entry>,
    /// Whatever follows the closing delimiter on its line.
    pub trailer: String,
}

impl ParsedDoc {
    fn from_body(body: &Body<'_>) -> Self {
        ParsedDoc {
            summary: body.summary.and_then(non_empty),
            trailer: body.trailer.to_string(),
            ..Default::default()
        }
    }

    /// Close out a statement in progress.
    ///
    /// The description slot is only filled once. Entries with no name, no
    /// type and no text (what a bare section header leaves behind) are dropped.
    pub(crate) fn commit(&mut self, pending: Pending) {
        let statement = pending.statement();
        let Some(kind) = pending.kind else {
            if self.description.is_none() {
                self.description = non_empty(&statement);
            }
            return;
        };
        if pending.name.is_none() && pending.type_name.is_none() && statement.is_empty() {
            return;
        }
        self.entries.push(Entry {
            kind,
            name: pending.name,
            type_name: pending.type_name,
            statement,
        });
    }
}

/// Statement being accumulated line by line.
#[derive(Debug, Default)]
pub(crate) struct Pending {
    /// `None` while collecting the description.
    kind: Option<EntryKind>,
    name: Option<String>,
    type_name: Option<String>,
    /// Text on the marker / entry line itself.
    head: String,
    /// Raw continuation lines.
    rest: Vec<String>,
}

impl Pending {
    pub(crate) fn description() -> Self {
        Pending::default()
    }

    pub(crate) fn entry(
        kind: EntryKind,
        name: Option<&str>,
        type_name: Option<&str>,
        head: &str,
    ) -> Self {
        Pending {
            kind: Some(kind),
            name: name.and_then(non_empty),
            type_name: type_name.and_then(non_empty),
            head: head.trim().to_string(),
            rest: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, line: &str) {
        self.rest.push(line.to_string());
    }

    pub(crate) fn set_head(&mut self, type_name: Option<&str>, head: &str) {
        self.type_name = type_name.and_then(non_empty);
        self.head = head.trim().to_string();
    }

    fn statement(&self) -> String {
        let body = dedent(&self.rest);
        let mut text = self.head.clone();
        if !body.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&body);
        }
        text.trim_end().to_string()
    }
}

/// Doc-comment text with delimiters removed: the summary line and the raw
/// lines that follow it (trailing blank lines dropped).
pub(crate) struct Body<'a> {
    pub summary: Option<&'a str>,
    pub lines: Vec<&'a str>,
    /// Text after the closing delimiter, trailing whitespace dropped.
    pub trailer: &'a str,
}

/// The body ends at the first closing delimiter; anything after it on that
/// line becomes the trailer.
pub(crate) fn split_body(text: &str, quote: Quote) -> Body<'_> {
    let delimiter = quote.delimiter();
    let text = text.trim();
    let inner = text.strip_prefix(delimiter).unwrap_or(text);
    let (inner, trailer) = match inner.find(delimiter) {
        Some(at) => (&inner[..at], inner[at + delimiter.len()..].trim_end()),
        None => (inner, ""),
    };
    // leading blank lines go, indentation of the rest stays
    let inner = inner.trim_end().trim_start_matches(['\n', '\r', ' ', '\t']);

    let mut lines = inner.lines();
    let summary = lines.next().map(str::trim).filter(|s| !s.is_empty());
    let mut lines: Vec<&str> = lines.collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    Body {
        summary,
        lines,
        trailer,
    }
}

/// Columns of leading whitespace (spaces and tabs count one each).
pub(crate) fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// Remove the common indentation of non-blank lines, drop leading blank lines
/// and trailing whitespace.
fn dedent(lines: &[String]) -> String {
    let common = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_width(l))
        .min()
        .unwrap_or(0);

    let joined = lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                ""
            } else {
                l[common..].trim_end()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    joined.trim_start_matches('\n').trim_end().to_string()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_strips_delimiters_and_blank_edges() {
        let text = "    \"\"\"Summary line.\n\n    Details.\n\n    \"\"\"\n";
        let body = split_body(text, Quote::Double);
        assert_eq!(body.summary, Some("Summary line."));
        assert_eq!(body.lines, vec!["", "    Details."]);
    }

    #[test]
    fn body_stops_at_the_closing_delimiter() {
        let body = split_body("    \"\"\"Summary.\"\"\"  # noqa\n", Quote::Double);
        assert_eq!(body.summary, Some("Summary."));
        assert!(body.lines.is_empty());
        assert_eq!(body.trailer, "  # noqa");

        let body = split_body("\"\"\"Summary.\n\n    Details.\n    \"\"\"  # type: ignore", Quote::Double);
        assert_eq!(body.lines, vec!["", "    Details."]);
        assert_eq!(body.trailer, "  # type: ignore");
    }

    #[test]
    fn body_with_summary_on_second_line() {
        let text = "'''\n    Summary.\n    '''";
        let body = split_body(text, Quote::Single);
        assert_eq!(body.summary, Some("Summary."));
        assert!(body.lines.is_empty());
    }

    #[test]
    fn empty_doc_comment_has_no_summary() {
        let body = split_body("\"\"\"\"\"\"", Quote::Double);
        assert_eq!(body.summary, None);
        assert!(body.lines.is_empty());
    }

    #[test]
    fn dedent_keeps_relative_indentation() {
        let lines: Vec<String> = ["", "      first", "          nested", "", "      last"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(dedent(&lines), "first\n    nested\n\nlast");
    }

    #[test]
    fn commit_drops_bare_headers_keeps_named_entries() {
        let mut doc = ParsedDoc::default();
        doc.commit(Pending::entry(EntryKind::Param, None, None, ""));
        assert!(doc.entries.is_empty());
        doc.commit(Pending::entry(EntryKind::Param, Some("x"), None, ""));
        assert_eq!(doc.entries.len(), 1);
        assert_eq!(doc.entries[0].statement, "");
    }

    #[test]
    fn description_is_set_once() {
        let mut doc = ParsedDoc::default();
        let mut first = Pending::description();
        first.push("    Life can be good,");
        first.push("    Life can be bad.");
        doc.commit(first);
        let mut second = Pending::description();
        second.push("ignored");
        doc.commit(second);
        assert_eq!(
            doc.description.as_deref(),
            Some("Life can be good,\nLife can be bad.")
        );
    }

    #[test]
    fn field_keys() {
        assert_eq!(EntryKind::from_key("raises"), EntryKind::Raise);
        assert_eq!(EntryKind::from_key("rtype"), EntryKind::ReturnType);
        assert_eq!(EntryKind::from_key("ytype"), EntryKind::YieldType);
        assert_eq!(EntryKind::from_key("ivar"), EntryKind::Attribute);
        assert_eq!(
            EntryKind::from_key("deprecated"),
            EntryKind::Custom("deprecated".to_string())
        );
    }
}
