//! Patch emitter: splices rendered doc-comments into the source and diffs the
//! result against the original.

use crate::config::FormatConfig;
use crate::model::DocComment;
use crate::render::render;
use similar::TextDiff;
use tracing::warn;

/// Path prefixes shown in the `---` / `+++` header lines.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PatchLabels {
    pub source_prefix: String,
    pub target_prefix: String,
}

impl PatchLabels {
    /// Prefixes lose a leading `/` and gain a trailing `/` when non-empty.
    pub fn new(source_prefix: &str, target_prefix: &str) -> Self {
        PatchLabels {
            source_prefix: normalize_prefix(source_prefix),
            target_prefix: normalize_prefix(target_prefix),
        }
    }

    pub fn source(&self, name: &str) -> String {
        format!("a/{}{}", self.source_prefix, name)
    }

    pub fn target(&self, name: &str) -> String {
        format!("b/{}{}", self.target_prefix, name)
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let prefix = prefix.strip_prefix('/').unwrap_or(prefix);
    if prefix.is_empty() || prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{prefix}/")
    }
}

/// Source text with every model's line range replaced by its rendering.
///
/// `docs` must be in source order; a model overlapping an earlier one or
/// reaching past the end of `lines` is left out.
pub fn rewrite(lines: &[&str], docs: &[DocComment], config: &FormatConfig) -> String {
    let mut out = String::new();
    let mut next = 0;

    for doc in docs {
        if doc.start < next || doc.end > lines.len() || doc.start >= doc.end {
            warn!(start = doc.start + 1, end = doc.end, "doc-comment range out of order, skipped");
            continue;
        }
        out.extend(lines[next..doc.start].iter().copied());

        let rendered = render(doc, config);
        let eol = match line_ending(lines[doc.start]) {
            "" => "\n",
            eol => eol,
        };
        let last_eol = line_ending(lines[doc.end - 1]);
        let count = rendered.len();
        for (index, line) in rendered.iter().enumerate() {
            out.push_str(line);
            out.push_str(if index + 1 < count { eol } else { last_eol });
        }
        next = doc.end;
    }
    out.extend(lines[next..].iter().copied());
    out
}

fn line_ending(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

/// Unified diff (3 lines of context) of `original` against `rewritten`;
/// empty when they are equal.
pub fn diff(original: &str, rewritten: &str, name: &str, labels: &PatchLabels) -> String {
    if original == rewritten {
        return String::new();
    }
    let text_diff = TextDiff::from_lines(original, rewritten);
    text_diff
        .unified_diff()
        .context_radius(3)
        .header(&labels.source(name), &labels.target(name))
        .to_string()
}

/// Rewrite `lines` and diff the result.
pub fn emit(
    lines: &[&str],
    docs: &[DocComment],
    config: &FormatConfig,
    name: &str,
    labels: &PatchLabels,
) -> String {
    let original = lines.concat();
    let rewritten = rewrite(lines, docs, config);
    diff(&original, &rewritten, name, labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dialect;
    use crate::model::Quote;
    use crate::segment::split_lines;

    fn doc(start: usize, end: usize) -> DocComment {
        DocComment {
            start,
            end,
            indent: "    ".to_string(),
            quote: Quote::Double,
            summary: Some("Summary.".to_string()),
            description: Some("Details.".to_string()),
            elements: Vec::new(),
            trailer: String::new(),
        }
    }

    const SOURCE: &str = "def f():\n    \"\"\"Summary.\n    Details.\n    \"\"\"\n    return 1\n";

    #[test]
    fn prefixes_are_normalized() {
        let labels = PatchLabels::new("/src", "out/");
        assert_eq!(labels.source("m.py"), "a/src/m.py");
        assert_eq!(labels.target("m.py"), "b/out/m.py");
        assert_eq!(PatchLabels::default().source("m.py"), "a/m.py");
    }

    #[test]
    fn rewrite_replaces_only_model_ranges() {
        let lines = split_lines(SOURCE);
        let config = FormatConfig::with_dialect(Dialect::Google);
        let rewritten = rewrite(&lines, &[doc(1, 4)], &config);
        assert_eq!(
            rewritten,
            "def f():\n    \"\"\"Summary.\n\n    Details.\n    \"\"\"\n    return 1\n"
        );
    }

    #[test]
    fn patch_has_labels_and_hunk() {
        let lines = split_lines(SOURCE);
        let config = FormatConfig::with_dialect(Dialect::Google);
        let patch = emit(&lines, &[doc(1, 4)], &config, "m.py", &PatchLabels::new("", "fixed"));
        assert!(patch.starts_with("--- a/m.py\n+++ b/fixed/m.py\n"), "{patch}");
        assert!(patch.contains("@@"));
        assert!(patch.contains("+\n"));
        assert!(patch.contains(" def f():\n"));
    }

    #[test]
    fn no_models_no_patch() {
        let lines = split_lines(SOURCE);
        let config = FormatConfig::default();
        assert_eq!(emit(&lines, &[], &config, "m.py", &PatchLabels::default()), "");
    }

    #[test]
    fn already_formatted_source_gives_empty_patch() {
        let src = "def f():\n    \"\"\"Summary.\n\n    Details.\n    \"\"\"\n";
        let lines = split_lines(src);
        let config = FormatConfig::with_dialect(Dialect::Google);
        assert_eq!(emit(&lines, &[doc(1, 5)], &config, "m.py", &PatchLabels::default()), "");
    }

    #[test]
    fn missing_final_newline_is_kept() {
        let src = "def f():\n    \"\"\"Summary.\n\n    Details.\n    \"\"\"";
        let lines = split_lines(src);
        let config = FormatConfig::with_dialect(Dialect::Google);
        assert_eq!(rewrite(&lines, &[doc(1, 5)], &config), src);
    }

    #[test]
    fn crlf_sources_keep_their_line_endings() {
        let src = "def f():\r\n    \"\"\"Summary.\r\n    Details.\r\n    \"\"\"\r\n    return 1\r\n";
        let lines = split_lines(src);
        let config = FormatConfig::with_dialect(Dialect::Google);
        assert_eq!(
            rewrite(&lines, &[doc(1, 4)], &config),
            "def f():\r\n    \"\"\"Summary.\r\n\r\n    Details.\r\n    \"\"\"\r\n    return 1\r\n"
        );
    }

    #[test]
    fn overlapping_models_are_skipped() {
        let lines = split_lines(SOURCE);
        let config = FormatConfig::with_dialect(Dialect::Google);
        let rewritten = rewrite(&lines, &[doc(1, 4), doc(2, 3)], &config);
        assert_eq!(rewritten.matches("Summary.").count(), 1);
    }
}
