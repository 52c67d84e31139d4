//! Dialect guessing by counting marker lines.

use super::google;

/// Dialects the parsers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceDialect {
    Rest,
    Epytext,
    Google,
}

/// Guess which grammar a doc-comment uses.
///
/// Counts, over every non-blank line after the first, lines starting with `:`
/// (reST), with `@` (Epytext), and lines that are exactly a Google section
/// header. The highest count wins; ties go reST, then Epytext, then Google.
/// Nothing counted at all also means reST.
pub fn classify(text: &str) -> SourceDialect {
    let (mut rest, mut epytext, mut google) = (0usize, 0usize, 0usize);

    for line in text.lines().skip(1) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with(':') {
            rest += 1;
        } else if trimmed.starts_with('@') {
            epytext += 1;
        } else if google::header_section(trimmed).is_some() {
            google += 1;
        }
    }

    if rest >= epytext && rest >= google {
        SourceDialect::Rest
    } else if epytext >= google {
        SourceDialect::Epytext
    } else {
        SourceDialect::Google
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epytext_markers() {
        let text = "\"\"\"Summary.\n    @param x: int: first\n    @return: value\n    \"\"\"";
        assert_eq!(classify(text), SourceDialect::Epytext);
    }

    #[test]
    fn rest_markers() {
        let text = "\"\"\"Summary.\n    :param x: first\n    :returns: value\n    :raises KeyError: boom\n\"\"\"";
        assert_eq!(classify(text), SourceDialect::Rest);
    }

    #[test]
    fn google_headers() {
        let text = concat!(
            "    \"\"\"Summary.\n",
            "    Args:\n",
            "      x: first\n",
            "    Returns:\n",
            "      bool: value\n",
            "    Raises:\n",
            "      KeyError: boom\n",
            "    Note:\n",
            "      text\n",
            "    \"\"\"\n",
        );
        assert_eq!(classify(text), SourceDialect::Google);
    }

    #[test]
    fn no_markers_defaults_to_rest() {
        assert_eq!(classify("\"\"\"Just prose.\n\nMore prose.\n\"\"\""), SourceDialect::Rest);
    }

    #[test]
    fn ties_prefer_rest_then_epytext() {
        assert_eq!(classify("\"\"\"S.\n:a: x\n@b: y\n\"\"\""), SourceDialect::Rest);
        assert_eq!(classify("\"\"\"S.\n@a: x\nArgs:\n\"\"\""), SourceDialect::Epytext);
    }

    #[test]
    fn first_line_is_not_counted() {
        assert_eq!(classify(":param x: y\nArgs:\n"), SourceDialect::Google);
    }

    #[test]
    fn deterministic() {
        let text = "\"\"\"S.\nArgs:\n  a: b\n:rtype: int\n\"\"\"";
        assert_eq!(classify(text), classify(text));
    }
}
