//! Numpydoc renderer: underlined section headers, `name : type` lines with
//! the description one level deeper.

use crate::config::FormatConfig;
use crate::model::{DocComment, DocElement, ElementKind, OtherKind};
use crate::render::{DocWriter, Renderer};

pub struct NumpydocRenderer;

impl Renderer for NumpydocRenderer {
    fn render(&self, doc: &DocComment, config: &FormatConfig) -> Vec<String> {
        let mut out = DocWriter::new(doc, config);
        out.head(doc);

        for (kind, elements) in doc.groups() {
            let header = section_name(&kind, elements.len() > 1);
            out.blank();
            out.line(0, header);
            out.line(0, &"-".repeat(header.chars().count()));
            for element in elements {
                render_element(&mut out, element);
            }
        }
        out.finish()
    }
}

fn section_name(kind: &ElementKind, plural: bool) -> &str {
    let (single, many) = match kind {
        ElementKind::Param => ("Parameter", "Parameters"),
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
        } => {
            out.line(0, &name_and_type(name, type_name.as_deref()));
            out.text(1, description);
        }
        DocElement::Return {
            name, type_name, ..
        } => {
            match (name, type_name) {
                (Some(name), type_name) => out.line(0, &name_and_type(name, type_name.as_deref())),
                (None, Some(type_name)) => out.line(0, type_name),
                (None, None) => {}
            }
            out.text(1, description);
        }
        DocElement::Raise { type_name, .. } => {
            if !type_name.is_empty() {
                out.line(0, type_name);
            }
            out.text(1, description);
        }
        DocElement::Other {
            kind: OtherKind::SeeAlso,
            name: Some(name),
            ..
        } => out.entry(0, &format!("{name} : {description}")),
        DocElement::Other {
            kind: OtherKind::Example,
            ..
        } => out.verbatim(0, description),
        DocElement::Other {
            name: Some(name),
            type_name,
            ..
        } => {
            out.line(0, &name_and_type(name, type_name.as_deref()));
            out.text(1, description);
        }
        DocElement::Other { name: None, .. } => out.text(0, description),
    }
}

fn name_and_type(name: &str, type_name: Option<&str>) -> String {
    match type_name {
        Some(type_name) => format!("{name} : {type_name}"),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::adapter::adapt;
    use crate::config::{Dialect, FormatConfig};
    use crate::render::render;
    use crate::segment::{segment, split_lines};
    use crate::signature::annotate;

    const REST_SOURCE: &str = concat!(
        "def func_rest(param1: int, param2='default val') -> bool:\n",
        "    \"\"\"This is an example function with docstrings in reST style.\n",
        "\n",
        "    :param param1: This is the first parameter.\n",
        "    :param param2: This is the second parameter.\n",
        "    :returns: The return value.\n",
        "    :raises keyError: raises key exception\n",
        "    \"\"\"\n",
    );

    #[test]
    fn rest_source_renders_numpydoc_sections() {
        let lines = split_lines(REST_SOURCE);
        let mut items = segment(&lines);
        annotate(&mut items);
        let docs = adapt(&items);
        let rendered = render(&docs[0], &FormatConfig::with_dialect(Dialect::Numpydoc));
        assert_eq!(
            rendered,
            vec![
                "    \"\"\"This is an example function with docstrings in reST style.",
                "",
                "    This is more detailed description.",
                "",
                "    Parameters",
                "    ----------",
                "    param1 : int",
                "        This is the first parameter.",
                "    param2",
                "        This is the second parameter.",
                "",
                "    Return",
                "    ------",
                "    bool",
                "        The return value.",
                "",
                "    Raise",
                "    -----",
                "    keyError",
                "        raises key exception",
                "    \"\"\"",
            ]
        );
    }

    #[test]
    fn underline_matches_header_length() {
        let lines = split_lines(REST_SOURCE);
        let mut items = segment(&lines);
        annotate(&mut items);
        let rendered = render(&adapt(&items)[0], &FormatConfig::with_dialect(Dialect::Numpydoc));
        for (index, line) in rendered.iter().enumerate() {
            let trimmed = line.trim();
            if !trimmed.is_empty() && trimmed.chars().all(|c| c == '-') {
                assert_eq!(trimmed.len(), rendered[index - 1].trim().len());
            }
        }
    }
}
