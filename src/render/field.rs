//! reST (`:key:`) and Epytext (`@key`) field-list renderer.

use crate::config::FormatConfig;
use crate::model::{DocComment, DocElement, ElementKind, OtherKind};
use crate::render::{DocWriter, Renderer};

/// Field-list flavour; the two differ in marker and in where a type goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRenderer {
    /// `:param type name: text`
    Rest,
    /// `@param name: type: text`
    Epytext,
}

impl FieldRenderer {
    fn marker(self) -> char {
        match self {
            FieldRenderer::Rest => ':',
            FieldRenderer::Epytext => '@',
        }
    }

    /// Field line for a named, possibly typed element. Epytext cannot carry a
    /// type containing spaces inline, so that goes on a separate `type_key` field.
    fn named(
        self,
        key: &str,
        name: &str,
        type_name: Option<&str>,
        type_key: Option<&str>,
        description: &str,
    ) -> Vec<String> {
        let m = self.marker();
        match (self, type_name) {
            (_, None) => vec![format!("{m}{key} {name}: {description}")],
            (FieldRenderer::Rest, Some(t)) => vec![format!("{m}{key} {t} {name}: {description}")],
            (FieldRenderer::Epytext, Some(t)) if !t.contains(char::is_whitespace) => {
                vec![format!("{m}{key} {name}: {t}: {description}")]
            }
            (FieldRenderer::Epytext, Some(t)) => {
                let mut fields = vec![format!("{m}{key} {name}: {description}")];
                if let Some(type_key) = type_key {
                    fields.push(format!("{m}{type_key} {name}: {t}"));
                }
                fields
            }
        }
    }

    fn render_element(self, out: &mut DocWriter<'_>, kind: &ElementKind, element: &DocElement) {
        let m = self.marker();
        let key = field_key(kind);
        let description = element.description().unwrap_or_default();

        let fields = match element {
            DocElement::Param {
                name, type_name, ..
            } => self.named(key, name, type_name.as_deref(), Some("type"), description),
            DocElement::Raise { type_name, .. } if !type_name.is_empty() => {
                vec![format!("{m}{key} {type_name}: {description}")]
            }
            DocElement::Other {
                kind: OtherKind::Example,
                ..
            } => {
                out.line(0, &format!("{m}{key}:"));
                out.verbatim(1, description);
                return;
            }
            DocElement::Other {
                kind: OtherKind::Attribute,
                name: Some(name),
                type_name,
                ..
            } => self.named(key, name, type_name.as_deref(), Some("vartype"), description),
            DocElement::Other {
                name: Some(name),
                type_name,
                ..
            } => self.named(key, name, type_name.as_deref(), None, description),
            DocElement::Return {
                type_name: Some(t),
                is_generator: true,
                ..
            } => vec![format!("{m}{key}: {description}"), format!("{m}ytype: {t}")],
            DocElement::Return { .. } | DocElement::Raise { .. } | DocElement::Other { .. } => {
                vec![format!("{m}{key}: {description}")]
            }
        };
        for field in fields {
            out.entry(0, &field);
        }
    }
}

impl Renderer for FieldRenderer {
    fn render(&self, doc: &DocComment, config: &FormatConfig) -> Vec<String> {
        let mut out = DocWriter::new(doc, config);
        out.head(doc);

        let groups = doc.groups();
        if !groups.is_empty() {
            out.blank();
        }
        for (kind, elements) in &groups {
            for element in elements {
                self.render_element(&mut out, kind, element);
            }
        }
        out.finish()
    }
}

/// Field key; the same for one element or many.
fn field_key(kind: &ElementKind) -> &str {
    match kind {
        ElementKind::Param => "param",
        ElementKind::Return => "return",
        ElementKind::ReturnType => "rtype",
        ElementKind::Raise => "raise",
        ElementKind::Attribute => "attribute",
        ElementKind::Yield => "yield",
        ElementKind::Receive => "receive",
        ElementKind::Warn => "warn",
        ElementKind::Example => "example",
        ElementKind::Note => "note",
        ElementKind::Todo => "todo",
        ElementKind::SeeAlso => "seealso",
        ElementKind::Reference => "reference",
        ElementKind::Custom(label) => label,
    }
}
