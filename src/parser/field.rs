//! reST (`:key:`) and Epytext (`@key`) field-list parser.
//!
//! A marker line is `<m>key[ [type ]name]: [type:] statement`; the statement
//! runs on over following non-marker lines.

use super::{split_body, EntryKind, ParsedDoc, Pending};
use crate::model::Quote;

/// Parse a field-list doc-comment whose marker character is `marker`.
pub fn parse(text: &str, quote: Quote, marker: char) -> ParsedDoc {
    let body = split_body(text, quote);
    let mut doc = ParsedDoc::from_body(&body);
    let mut pending = Pending::description();

    for line in body.lines {
        match line.trim().strip_prefix(marker) {
            Some(field) => doc.commit(std::mem::replace(&mut pending, parse_field(field))),
            None => pending.push(line),
        }
    }
    doc.commit(pending);
    doc
}

/// Parse the text after the marker character.
fn parse_field(field: &str) -> Pending {
    let (head, mut statement) = field.split_once(':').unwrap_or((field, ""));

    let tokens: Vec<&str> = head.split_whitespace().collect();
    let key = tokens.first().copied().unwrap_or("");
    let (mut type_name, name) = match tokens.len() {
        0 | 1 => (None, None),
        2 => (None, Some(tokens[1])),
        n => (Some(tokens[1..n - 1].join(" ")), Some(tokens[n - 1])),
    };

    // `name: type: statement` with a single space-free token between the colons
    if type_name.is_none() {
        if let Some((candidate, after)) = statement.split_once(':') {
            let candidate = candidate.trim();
            if !candidate.is_empty()
                && !candidate.contains(char::is_whitespace)
                && !after.starts_with("//")
            {
                type_name = Some(candidate.to_string());
                statement = after;
            }
        }
    }

    Pending::entry(
        EntryKind::from_key(key),
        name,
        type_name.as_deref(),
        statement,
    )
}
