//! Width-aware line layout on top of `textwrap`.

use textwrap::{wrap, Options, WordSeparator, WordSplitter, WrapAlgorithm};

/// Lay out `text` one logical line at a time.
///
/// Every logical line starts at `indent` plus its own relative indentation and
/// is broken at spaces to fit within `width` columns. Overflow of the first
/// logical line, and every later logical line, sit `hang` deeper. Words longer
/// than the available room are left whole. Blank lines stay blank.
pub fn wrap_block(text: &str, indent: &str, hang: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let content = line.trim();
        if content.is_empty() {
            out.push(String::new());
            continue;
        }
        let relative = &line[..line.len() - line.trim_start().len()];
        let deeper = format!("{indent}{hang}{relative}");
        let first = if index == 0 {
            format!("{indent}{relative}")
        } else {
            deeper.clone()
        };
        out.extend(wrap_line(content, &first, &deeper, width));
    }
    out
}

/// Lines of `text` prefixed with `indent`, never re-flowed.
pub fn verbatim_block(text: &str, indent: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect()
}

fn wrap_line(content: &str, first: &str, rest: &str, width: usize) -> Vec<String> {
    let options = Options::new(width)
        .initial_indent(first)
        .subsequent_indent(rest)
        .break_words(false)
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation);
    wrap(content, options)
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .collect()
}
