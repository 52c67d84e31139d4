//! Dialect-agnostic data model shared by every pipeline stage.

use std::collections::HashMap;

// -- Source segments ----------------------------------------------------------

/// Kind of a contiguous source segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// `def` / `async def` / `class` header, up to its terminating colon.
    Declaration,
    /// Triple-quoted block.
    DocComment,
    /// Everything else.
    PlainCode,
}

/// Triple-quote delimiter variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quote {
    #[default]
    Double,
    Single,
}

impl Quote {
    pub fn delimiter(self) -> &'static str {
        match self {
            Quote::Double => "\"\"\"",
            Quote::Single => "'''",
        }
    }

    /// Delimiter opening a (left-trimmed) line, if any.
    pub fn opening(trimmed: &str) -> Option<Quote> {
        if trimmed.starts_with(Quote::Double.delimiter()) {
            Some(Quote::Double)
        } else if trimmed.starts_with(Quote::Single.delimiter()) {
            Some(Quote::Single)
        } else {
            None
        }
    }
}

impl std::str::FromStr for Quote {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "double" | "\"" | "\"\"\"" => Ok(Quote::Double),
            "single" | "'" | "'''" => Ok(Quote::Single),
            _ => Err(anyhow::anyhow!(
                "unknown quote style: {}. Use double or single",
                s
            )),
        }
    }
}

/// Metadata attached to a single item. Always freshly built per item.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ItemMeta {
    /// Delimiter that opened a DocComment.
    pub quote: Option<Quote>,
    /// Parameter and return info of a Declaration, once analyzed.
    pub signature: Option<Signature>,
}

/// A classified line range `[start, end)` of the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    pub start: usize,
    pub end: usize,
    /// Raw text of the covered lines, terminators included.
    pub text: String,
    pub meta: ItemMeta,
}

impl Item {
    pub fn new(kind: ItemKind, start: usize, end: usize, text: String) -> Self {
        Item {
            kind,
            start,
            end,
            text,
            meta: ItemMeta::default(),
        }
    }
}

// -- Declarations -------------------------------------------------------------

/// One parameter recovered from a declaration header.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SignatureParam {
    pub name: String,
    pub type_name: Option<String>,
    pub default: Option<String>,
}

/// Parameters (receiver excluded) and return-type hints of a declaration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<SignatureParam>,
    pub return_hints: Vec<String>,
}

impl Signature {
    /// Look up a parameter by name, ignoring leading `*` on either side.
    pub fn param(&self, name: &str) -> Option<&SignatureParam> {
        let wanted = name.trim_start_matches('*');
        self.params
            .iter()
            .find(|p| p.name.trim_start_matches('*') == wanted)
    }
}

// -- Canonical doc-comment model ----------------------------------------------

/// Label of an [`DocElement::Other`] element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OtherKind {
    Note,
    Example,
    Todo,
    Attribute,
    SeeAlso,
    Reference,
    Warn,
    Receive,
    /// Stand-alone return type (`:rtype:` / `@rtype`); the type lives in `description`.
    ReturnType,
    /// Unrecognized field key, kept verbatim.
    Custom(String),
}

/// One structured entry of a doc-comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocElement {
    Param {
        name: String,
        type_name: Option<String>,
        default: Option<String>,
        description: Option<String>,
    },
    Return {
        name: Option<String>,
        type_name: Option<String>,
        description: Option<String>,
        is_generator: bool,
    },
    Raise {
        type_name: String,
        description: Option<String>,
    },
    Other {
        kind: OtherKind,
        name: Option<String>,
        type_name: Option<String>,
        description: Option<String>,
    },
}

/// Grouping key used when rendering sections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Param,
    Return,
    ReturnType,
    Raise,
    Attribute,
    Yield,
    Receive,
    Warn,
    Example,
    Note,
    Todo,
    SeeAlso,
    Reference,
    Custom(String),
}

impl ElementKind {
    /// Section order; custom kinds follow in first-appearance order.
    pub const FIXED_ORDER: [ElementKind; 13] = [
        ElementKind::Param,
        ElementKind::Return,
        ElementKind::ReturnType,
        ElementKind::Raise,
        ElementKind::Attribute,
        ElementKind::Yield,
        ElementKind::Receive,
        ElementKind::Warn,
        ElementKind::Example,
        ElementKind::Note,
        ElementKind::Todo,
        ElementKind::SeeAlso,
        ElementKind::Reference,
    ];

    /// Noun used in synthesized descriptions ("The 0th parameter").
    pub fn noun(&self) -> &str {
        match self {
            ElementKind::Param => "parameter",
            ElementKind::Return => "return value",
            ElementKind::ReturnType => "return type",
            ElementKind::Raise => "possible exception",
            ElementKind::Attribute => "attribute",
            ElementKind::Yield => "yield",
            ElementKind::Receive => "receive value",
            ElementKind::Warn => "warning",
            ElementKind::Example => "example",
            ElementKind::Note => "note",
            ElementKind::Todo => "TODO",
            ElementKind::SeeAlso => "see also message",
            ElementKind::Reference => "reference",
            ElementKind::Custom(label) => label,
        }
    }
}

impl DocElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            DocElement::Param { .. } => ElementKind::Param,
            DocElement::Return {
                is_generator: false,
                ..
            } => ElementKind::Return,
            DocElement::Return {
                is_generator: true,
                ..
            } => ElementKind::Yield,
            DocElement::Raise { .. } => ElementKind::Raise,
            DocElement::Other { kind, .. } => match kind {
                OtherKind::Note => ElementKind::Note,
                OtherKind::Example => ElementKind::Example,
                OtherKind::Todo => ElementKind::Todo,
                OtherKind::Attribute => ElementKind::Attribute,
                OtherKind::SeeAlso => ElementKind::SeeAlso,
                OtherKind::Reference => ElementKind::Reference,
                OtherKind::Warn => ElementKind::Warn,
                OtherKind::Receive => ElementKind::Receive,
                OtherKind::ReturnType => ElementKind::ReturnType,
                OtherKind::Custom(label) => ElementKind::Custom(label.clone()),
            },
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            DocElement::Param { description, .. }
            | DocElement::Return { description, .. }
            | DocElement::Raise { description, .. }
            | DocElement::Other { description, .. } => description.as_deref(),
        }
    }

    pub fn description_mut(&mut self) -> &mut Option<String> {
        match self {
            DocElement::Param { description, .. }
            | DocElement::Return { description, .. }
            | DocElement::Raise { description, .. }
            | DocElement::Other { description, .. } => description,
        }
    }

    /// Trim every string field; optional fields left empty become `None`.
    pub fn trim_fields(&mut self) {
        match self {
            DocElement::Param {
                name,
                type_name,
                default,
                description,
            } => {
                *name = name.trim().to_string();
                trim_opt(type_name);
                trim_opt(default);
                trim_opt(description);
            }
            DocElement::Return {
                name,
                type_name,
                description,
                ..
            } => {
                trim_opt(name);
                trim_opt(type_name);
                trim_opt(description);
            }
            DocElement::Raise {
                type_name,
                description,
            } => {
                *type_name = type_name.trim().to_string();
                trim_opt(description);
            }
            DocElement::Other {
                name,
                type_name,
                description,
                ..
            } => {
                trim_opt(name);
                trim_opt(type_name);
                trim_opt(description);
            }
        }
    }
}

fn trim_opt(field: &mut Option<String>) {
    *field = field
        .take()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
}

/// Canonical, dialect-independent doc-comment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocComment {
    /// First line of the doc-comment in the original source (inclusive).
    pub start: usize,
    /// One past the closing-delimiter line.
    pub end: usize,
    /// Leading whitespace of the opening line.
    pub indent: String,
    pub quote: Quote,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub elements: Vec<DocElement>,
    /// Text after the closing delimiter on its line, such as `  # noqa`.
    pub trailer: String,
}

impl DocComment {
    pub fn trim_fields(&mut self) {
        trim_opt(&mut self.summary);
        trim_opt(&mut self.description);
        for element in &mut self.elements {
            element.trim_fields();
        }
    }

    /// Elements grouped by kind in section order, insertion order kept within a group.
    pub fn groups(&self) -> Vec<(ElementKind, Vec<&DocElement>)> {
        let mut by_kind: HashMap<ElementKind, Vec<&DocElement>> = HashMap::new();
        let mut custom: Vec<ElementKind> = Vec::new();
        for element in &self.elements {
            let kind = element.kind();
            if matches!(kind, ElementKind::Custom(_)) && !custom.contains(&kind) {
                custom.push(kind.clone());
            }
            by_kind.entry(kind).or_default().push(element);
        }

        ElementKind::FIXED_ORDER
            .into_iter()
            .chain(custom)
            .filter_map(|kind| by_kind.remove(&kind).map(|elements| (kind, elements)))
            .collect()
    }
}
