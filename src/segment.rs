//! Line segmenter: partitions source into declaration, doc-comment and
//! plain-code items with a three-state scanner.
//!
//! Every input line lands in exactly one item; items come out in source
//! order and their ranges concatenate to `[0, lines.len())`.

use crate::model::{Item, ItemKind, Quote};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static RE_DECL_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:def|class|async[ \t]+def)[ \t]").unwrap());

// Header ends in a colon, optionally followed by a line comment.
static RE_DECL_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#":[ \t]*(?:#[^'"]*)?$"#).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InDeclaration,
    InDocComment(Quote),
}

struct Segmenter<'a> {
    lines: &'a [&'a str],
    items: Vec<Item>,
    state: State,
    /// First line of the span currently being collected.
    start: usize,
}

/// Split source text into lines, keeping line terminators.
pub fn split_lines(source: &str) -> Vec<&str> {
    source.split_inclusive('\n').collect()
}

/// Partition `lines` into items.
pub fn segment<'a>(lines: &'a [&'a str]) -> Vec<Item> {
    let mut s = Segmenter {
        lines,
        items: Vec::new(),
        state: State::Normal,
        start: 0,
    };

    for (index, line) in lines.iter().enumerate() {
        s.process_line(index, line);
    }

    // Salvage whatever is still open.
    let end = lines.len();
    match s.state {
        State::Normal => s.flush(ItemKind::PlainCode, None, end),
        State::InDeclaration => {
            debug!(line = s.start + 1, "unterminated declaration at end of input");
            s.flush(ItemKind::Declaration, None, end);
        }
        State::InDocComment(quote) => {
            debug!(line = s.start + 1, "unterminated doc-comment at end of input");
            s.flush(ItemKind::DocComment, Some(quote), end);
        }
    }
    s.items
}

impl Segmenter<'_> {
    fn process_line(&mut self, index: usize, line: &str) {
        let trimmed = line.trim();
        match self.state {
            State::Normal => {
                if let Some(quote) = Quote::opening(trimmed) {
                    self.flush(ItemKind::PlainCode, None, index);
                    if trimmed.matches(quote.delimiter()).count() >= 2 {
                        self.flush(ItemKind::DocComment, Some(quote), index + 1);
                    } else {
                        self.state = State::InDocComment(quote);
                    }
                } else if RE_DECL_START.is_match(trimmed) {
                    self.flush(ItemKind::PlainCode, None, index);
                    if RE_DECL_END.is_match(trimmed) {
                        self.flush(ItemKind::Declaration, None, index + 1);
                    } else {
                        self.state = State::InDeclaration;
                    }
                }
                // anything else extends the pending plain-code span
            }
            State::InDeclaration => {
                if RE_DECL_END.is_match(trimmed) {
                    self.flush(ItemKind::Declaration, None, index + 1);
                    self.state = State::Normal;
                }
            }
            State::InDocComment(quote) => {
                if trimmed.contains(quote.delimiter()) {
                    self.flush(ItemKind::DocComment, Some(quote), index + 1);
                    self.state = State::Normal;
                }
            }
        }
    }

    /// Close the span `[start, end)` as an item of `kind`; empty spans are skipped.
    fn flush(&mut self, kind: ItemKind, quote: Option<Quote>, end: usize) {
        if end > self.start {
            let mut item = Item::new(kind, self.start, end, self.lines[self.start..end].concat());
            item.meta.quote = quote;
            self.items.push(item);
        }
        self.start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(items: &[Item]) -> Vec<(ItemKind, usize, usize)> {
        items.iter().map(|i| (i.kind, i.start, i.end)).collect()
    }

    fn assert_partition(items: &[Item], len: usize) {
        let mut next = 0;
        for item in items {
            assert_eq!(item.start, next, "gap or overlap before {:?}", item);
            assert!(item.end > item.start);
            next = item.end;
        }
        assert_eq!(next, len);
    }

    #[test]
    fn function_docstring_and_body() {
        let src = "import os\n\ndef f(a, b):\n    \"\"\"Summary.\n\n    More.\n    \"\"\"\n    return a\n";
        let lines = split_lines(src);
        let items = segment(&lines);
        assert_eq!(
            kinds(&items),
            vec![
                (ItemKind::PlainCode, 0, 2),
                (ItemKind::Declaration, 2, 3),
                (ItemKind::DocComment, 3, 7),
                (ItemKind::PlainCode, 7, 8),
            ]
        );
        assert_eq!(items[2].meta.quote, Some(Quote::Double));
        assert!(items[2].text.starts_with("    \"\"\"Summary."));
        assert_partition(&items, lines.len());
    }

    #[test]
    fn multi_line_declaration_with_trailing_comment() {
        let src = "async def fetch(url,\n          timeout=3):  # network\n    '''Fetch.'''\n";
        let lines = split_lines(src);
        let items = segment(&lines);
        assert_eq!(
            kinds(&items),
            vec![(ItemKind::Declaration, 0, 2), (ItemKind::DocComment, 2, 3)]
        );
        assert_eq!(items[1].meta.quote, Some(Quote::Single));
    }

    #[test]
    fn single_line_docstring_closes_immediately() {
        let lines = split_lines("class A:\n    \"\"\"One liner.\"\"\"\n    x = 1\n");
        let items = segment(&lines);
        assert_eq!(
            kinds(&items),
            vec![
                (ItemKind::Declaration, 0, 1),
                (ItemKind::DocComment, 1, 2),
                (ItemKind::PlainCode, 2, 3),
            ]
        );
    }

    #[test]
    fn other_delimiter_does_not_close() {
        let lines = split_lines("\"\"\"Module.\n''' not the end\n\"\"\"\n");
        let items = segment(&lines);
        assert_eq!(kinds(&items), vec![(ItemKind::DocComment, 0, 3)]);
    }

    #[test]
    fn unterminated_spans_are_salvaged() {
        let lines = split_lines("def f(\n    a,\n");
        let items = segment(&lines);
        assert_eq!(kinds(&items), vec![(ItemKind::Declaration, 0, 2)]);

        let lines = split_lines("def f():\n    \"\"\"Never closed\n    text\n");
        let items = segment(&lines);
        assert_eq!(
            kinds(&items),
            vec![(ItemKind::Declaration, 0, 1), (ItemKind::DocComment, 1, 3)]
        );
        assert_eq!(items[1].meta.quote, Some(Quote::Double));
    }

    #[test]
    fn partition_holds_for_mixed_input() {
        let src = concat!(
            "#!/usr/bin/env python\n",
            "\"\"\"Module doc.\"\"\"\n",
            "x = 1\n",
            "def a(): pass\n",
            "y = 2\n",
            "def b(self,\n",
            "      c: int = 3) -> int:\n",
            "    '''\n",
            "    Doc.\n",
            "    '''\n",
            "\n",
            "class C(object):\n",
            "    pass\n",
            "\"\"\"dangling",
        );
        let lines = split_lines(src);
        let items = segment(&lines);
        assert_partition(&items, lines.len());
        assert_eq!(items.last().map(|i| i.kind), Some(ItemKind::DocComment));
    }

    #[test]
    fn empty_input_has_no_items() {
        assert!(segment(&[]).is_empty());
    }

    #[test]
    fn metadata_is_fresh_per_item() {
        let lines = split_lines("def f():\n    \"\"\"A.\"\"\"\nx = 1\n");
        let mut items = segment(&lines);
        items[0].meta.signature = Some(Default::default());
        assert!(items[1].meta.signature.is_none());
        assert!(items[2].meta.signature.is_none());
        assert_eq!(items[2].meta.quote, None);
    }
}
