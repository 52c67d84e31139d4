//! Google-style parser: named sections at the doc-comment's base indentation.

use super::{indent_width, split_body, EntryKind, ParsedDoc, Pending};
use crate::model::Quote;
use regex::Regex;
use std::sync::LazyLock;

/// Google section kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Args,
    Attributes,
    Raises,
    Warns,
    Receives,
    Returns,
    Yields,
    Examples,
    Notes,
    Todos,
    SeeAlso,
    References,
}

/// How lines inside a section are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// `name (type): statement` entries.
    Entries,
    /// Optional `type: statement` first line, then prose.
    Returns,
    /// Everything verbatim up to the next header.
    FreeText,
}

const HEADERS: &[(&str, Section)] = &[
    ("Args", Section::Args),
    ("Arg", Section::Args),
    ("Arguments", Section::Args),
    ("Attributes", Section::Attributes),
    ("Attribute", Section::Attributes),
    ("Raises", Section::Raises),
    ("Raise", Section::Raises),
    ("Warns", Section::Warns),
    ("Warn", Section::Warns),
    ("Receives", Section::Receives),
    ("Receive", Section::Receives),
    ("Returns", Section::Returns),
    ("Return", Section::Returns),
    ("Yields", Section::Yields),
    ("Yield", Section::Yields),
    ("Examples", Section::Examples),
    ("Example", Section::Examples),
    ("Notes", Section::Notes),
    ("Note", Section::Notes),
    ("Todos", Section::Todos),
    ("Todo", Section::Todos),
    ("See Also", Section::SeeAlso),
    ("References", Section::References),
    ("Reference", Section::References),
];

// name, optional (type), colon, optional statement
static RE_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\*{0,2}[A-Za-z_][\w.]*)[ \t]*(?:\(([^)]*)\))?[ \t]*:(?:[ \t]+(.*))?$").unwrap()
});

// `type: statement` inside an entry statement
static RE_INLINE_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\s:]+):[ \t]+(.*)$").unwrap());

/// Section named by a trimmed `Header:` line.
pub fn header_section(trimmed: &str) -> Option<Section> {
    let name = trimmed.strip_suffix(':')?;
    HEADERS
        .iter()
        .find(|(header, _)| *header == name)
        .map(|(_, section)| *section)
}

impl Section {
    fn layout(self) -> Layout {
        match self {
            Section::Args
            | Section::Attributes
            | Section::Raises
            | Section::Warns
            | Section::Receives => Layout::Entries,
            Section::Returns | Section::Yields => Layout::Returns,
            Section::Examples
            | Section::Notes
            | Section::Todos
            | Section::SeeAlso
            | Section::References => Layout::FreeText,
        }
    }

    fn entry_kind(self) -> EntryKind {
        match self {
            Section::Args => EntryKind::Param,
            Section::Attributes => EntryKind::Attribute,
            Section::Raises => EntryKind::Raise,
            Section::Warns => EntryKind::Warn,
            Section::Receives => EntryKind::Receive,
            Section::Returns => EntryKind::Return,
            Section::Yields => EntryKind::Yield,
            Section::Examples => EntryKind::Example,
            Section::Notes => EntryKind::Note,
            Section::Todos => EntryKind::Todo,
            Section::SeeAlso => EntryKind::SeeAlso,
            Section::References => EntryKind::Reference,
        }
    }

    /// Whether `name: type: statement` is read as a typed entry.
    fn takes_inline_type(self) -> bool {
        matches!(self, Section::Args | Section::Attributes | Section::Receives)
    }
}

/// Parse a Google-style doc-comment.
pub fn parse(text: &str, quote: Quote) -> ParsedDoc {
    let base = text.lines().next().map(indent_width).unwrap_or(0);
    let body = split_body(text, quote);
    let mut doc = ParsedDoc::from_body(&body);
    let mut pending = Pending::description();
    let mut section: Option<Section> = None;
    // indentation of the current section's entry lines, once seen
    let mut entry_indent: Option<usize> = None;

    for line in body.lines {
        let trimmed = line.trim();
        let indent = indent_width(line);

        if indent == base {
            if let Some(next) = header_section(trimmed) {
                let header = Pending::entry(next.entry_kind(), None, None, "");
                doc.commit(std::mem::replace(&mut pending, header));
                section = Some(next);
                entry_indent = None;
                continue;
            }
        }

        let Some(current) = section else {
            pending.push(line);
            continue;
        };
        if trimmed.is_empty() {
            pending.push(line);
            continue;
        }

        match current.layout() {
            Layout::FreeText => pending.push(line),
            Layout::Returns => {
                if entry_indent.is_none() {
                    entry_indent = Some(indent);
                    if let Some((type_name, statement)) = split_return_type(trimmed) {
                        pending.set_head(Some(type_name), statement);
                        continue;
                    }
                }
                pending.push(line);
            }
            Layout::Entries => {
                let at_entry_level = entry_indent.map_or(true, |i| i == indent);
                match RE_ENTRY.captures(trimmed).filter(|_| at_entry_level) {
                    Some(caps) => {
                        entry_indent = Some(indent);
                        let next = parse_entry(current, &caps);
                        doc.commit(std::mem::replace(&mut pending, next));
                    }
                    None => pending.push(line),
                }
            }
        }
    }
    doc.commit(pending);
    doc
}

fn parse_entry(section: Section, caps: &regex::Captures<'_>) -> Pending {
    let name = &caps[1];
    let mut type_name = caps.get(2).map(|m| m.as_str());
    let mut statement = caps.get(3).map_or("", |m| m.as_str());

    if type_name.is_none() && section.takes_inline_type() {
        if let Some(inline) = RE_INLINE_TYPE.captures(statement) {
            type_name = inline.get(1).map(|m| m.as_str());
            statement = inline.get(2).map_or("", |m| m.as_str());
        }
    }
    Pending::entry(section.entry_kind(), Some(name), type_name, statement)
}

/// `type: statement` on the first line of a Returns/Yields section.
fn split_return_type(trimmed: &str) -> Option<(&str, &str)> {
    let (prefix, rest) = trimmed.split_once(':')?;
    let prefix = prefix.trim();
    if prefix.is_empty() || !(rest.is_empty() || rest.starts_with([' ', '\t'])) {
        return None;
    }
    let looks_like_type = !prefix.contains(char::is_whitespace)
        || (prefix.contains('[') && prefix.ends_with(']'));
    looks_like_type.then(|| (prefix, rest.trim()))
}
