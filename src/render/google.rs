//! Google-style renderer.

use crate::config::FormatConfig;
use crate::model::{DocComment, DocElement, ElementKind, OtherKind};
use crate::render::{DocWriter, Renderer};

pub struct GoogleRenderer;

impl Renderer for GoogleRenderer {
    fn render(&self, doc: &DocComment, config: &FormatConfig) -> Vec<String> {
        let mut out = DocWriter::new(doc, config);
        out.head(doc);

        for (kind, elements) in doc.groups() {
            out.blank();
            out.line(0, &format!("{}:", section_name(&kind, elements.len() > 1)));
            for element in elements {
                render_element(&mut out, element);
            }
        }
        out.finish()
    }
}

fn section_name(kind: &ElementKind, plural: bool) -> &str {
    let (single, many) = match kind {
        ElementKind::Param => ("Arg", "Args"),
        ElementKind::Return | ElementKind::ReturnType => ("Return", "Returns"),
        ElementKind::Raise => ("Raise", "Raises"),
        ElementKind::Attribute => ("Attribute", "Attributes"),
        ElementKind::Yield => ("Yield", "Yields"),
        ElementKind::Receive => ("Receive", "Receives"),
        ElementKind::Warn => ("Warn", "Warns"),
        ElementKind::Example => ("Example", "Examples"),
        ElementKind::Note => ("Note", "Notes"),
        ElementKind::Todo => ("Todo", "Todos"),
        ElementKind::SeeAlso => ("See Also", "See Also"),
        ElementKind::Reference => ("Reference", "References"),
        ElementKind::Custom(label) => (label.as_str(), label.as_str()),
    };
    if plural {
        many
    } else {
        single
    }
}

fn render_element(out: &mut DocWriter<'_>, element: &DocElement) {
    let description = element.description().unwrap_or_default();
    match element {
        DocElement::Param {
            name, type_name, ..
        } => out.entry(1, &labelled(name, type_name.as_deref(), description)),
        DocElement::Return {
            type_name: Some(type_name),
            ..
        } => out.entry(1, &format!("{type_name}: {description}")),
        DocElement::Raise { type_name, .. } if !type_name.is_empty() => {
            out.entry(1, &format!("{type_name}: {description}"))
        }
        DocElement::Other {
            kind: OtherKind::Example,
            ..
        } => out.verbatim(1, description),
        DocElement::Other {
            name: Some(name),
            type_name,
            ..
        } => out.entry(1, &labelled(name, type_name.as_deref(), description)),
        DocElement::Return { .. } | DocElement::Raise { .. } | DocElement::Other { .. } => {
            out.entry(1, description)
        }
    }
}

/// `name (type): description` or `name: description`.
fn labelled(name: &str, type_name: Option<&str>, description: &str) -> String {
    match type_name {
        Some(type_name) => format!("{name} ({type_name}): {description}"),
        None => format!("{name}: {description}"),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Dialect, FormatConfig};
    use crate::model::{DocComment, DocElement, OtherKind, Quote};
    use crate::render::render;

    fn doc(elements: Vec<DocElement>) -> DocComment {
        DocComment {
            indent: "    ".to_string(),
            quote: Quote::Double,
            summary: Some("Summary.".to_string()),
            description: Some("Life can be good,\nLife can be bad.".to_string()),
            elements,
            ..Default::default()
        }
    }

    fn other(kind: OtherKind, description: &str) -> DocElement {
        DocElement::Other {
            kind,
            name: None,
            type_name: None,
            description: Some(description.to_string()),
        }
    }

    #[test]
    fn sections_in_fixed_order() {
        let doc = doc(vec![
            other(OtherKind::Note, "This is a note: with colons."),
            DocElement::Raise {
                type_name: "KeyError".to_string(),
                description: Some("raises key exception".to_string()),
            },
            DocElement::Param {
                name: "param1".to_string(),
                type_name: Some("int".to_string()),
                default: None,
                description: Some("This is the first parameter.".to_string()),
            },
            DocElement::Param {
                name: "param2".to_string(),
                type_name: None,
                default: Some("'default val'".to_string()),
                description: None,
            },
            DocElement::Return {
                name: None,
                type_name: None,
                description: Some("The return value.".to_string()),
                is_generator: false,
            },
            DocElement::Other {
                kind: OtherKind::ReturnType,
                name: None,
                type_name: None,
                description: Some("bool".to_string()),
            },
        ]);
        let lines = render(&doc, &FormatConfig::with_dialect(Dialect::Google));
        assert_eq!(
            lines,
            vec![
                "    \"\"\"Summary.",
                "",
                "    Life can be good,",
                "    Life can be bad.",
                "",
                "    Args:",
                "        param1 (int): This is the first parameter.",
                "        param2: The 1st parameter. The default value is 'default val'",
                "",
                "    Return:",
                "        bool: The return value.",
                "",
                "    Raise:",
                "        KeyError: raises key exception",
                "",
                "    Note:",
                "        This is a note: with colons.",
                "    \"\"\"",
            ]
        );
    }

    #[test]
    fn examples_are_verbatim() {
        let code = ">>> compute(1, 2)\n3";
        let lines = render(
            &doc(vec![other(OtherKind::Example, code)]),
            &FormatConfig::with_dialect(Dialect::Google),
        );
        let at = lines.iter().position(|l| l == "    Example:").unwrap();
        assert_eq!(lines[at + 1], "        >>> compute(1, 2)");
        assert_eq!(lines[at + 2], "        3");
    }

    #[test]
    fn long_entry_hangs_one_stop_deeper() {
        let description = "word ".repeat(30);
        let lines = render(
            &doc(vec![DocElement::Param {
                name: "x".to_string(),
                type_name: None,
                default: None,
                description: Some(description),
            }]),
            &FormatConfig {
                max_line_width: 40,
                ..FormatConfig::with_dialect(Dialect::Google)
            },
        );
        let at = lines.iter().position(|l| l == "    Arg:").unwrap();
        assert!(lines[at + 1].starts_with("        x: word"));
        assert!(lines[at + 2].starts_with("            word"));
        assert!(lines.iter().all(|l| l.len() <= 40));
    }
}
