//! Model adapter: parsed doc-comments plus declaration signatures become
//! canonical [`DocComment`] models.

use crate::model::{DocComment, DocElement, ElementKind, Item, ItemKind, OtherKind, Signature};
use crate::parser::{self, Entry, EntryKind};
use crate::signature;
use tracing::debug;

/// Build a model for every documentable doc-comment, in source order.
pub fn adapt(items: &[Item]) -> Vec<DocComment> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let previous = index.checked_sub(1).map(|p| &items[p]);
            adapt_item(item, previous)
        })
        .collect()
}

/// Model for `item`, or `None` unless it is a DocComment directly after a Declaration.
pub fn adapt_item(item: &Item, previous: Option<&Item>) -> Option<DocComment> {
    if item.kind != ItemKind::DocComment {
        return None;
    }
    let declaration = previous.filter(|p| p.kind == ItemKind::Declaration)?;
    let signature = match &declaration.meta.signature {
        Some(signature) => signature.clone(),
        None => signature::analyze(&declaration.text),
    };

    let quote = item.meta.quote.unwrap_or_default();
    let dialect = parser::classify(&item.text);
    debug!(line = item.start + 1, ?dialect, "classified doc-comment");
    let parsed = parser::parse(&item.text, quote, dialect);

    let mut elements = build_elements(parsed.entries);
    merge_signature(&mut elements, &signature);

    Some(DocComment {
        start: item.start,
        end: item.end,
        indent: leading_whitespace(&item.text).to_string(),
        quote,
        summary: parsed.summary,
        description: parsed.description,
        elements,
        trailer: parsed.trailer,
    })
}

/// Which element a `:type x:` / `:vartype x:` entry annotates.
#[derive(Clone, Copy, PartialEq, Eq)]
enum TypeTarget {
    Param,
    Attribute,
}

fn build_elements(entries: Vec<Entry>) -> Vec<DocElement> {
    let mut elements = Vec::with_capacity(entries.len());
    let mut type_hints: Vec<(TypeTarget, Option<String>, Option<String>)> = Vec::new();
    let mut yield_types = Vec::new();

    for Entry {
        kind,
        name,
        type_name,
        statement,
    } in entries
    {
        let description = Some(statement).filter(|s| !s.is_empty());
        let other_kind = match kind {
            EntryKind::Param => {
                elements.push(DocElement::Param {
                    name: name.unwrap_or_default(),
                    type_name,
                    default: None,
                    description,
                });
                continue;
            }
            EntryKind::ParamType => {
                type_hints.push((TypeTarget::Param, name, type_name.or(description)));
                continue;
            }
            EntryKind::AttributeType => {
                type_hints.push((TypeTarget::Attribute, name, type_name.or(description)));
                continue;
            }
            EntryKind::Return => {
                elements.push(DocElement::Return {
                    name,
                    type_name,
                    description,
                    is_generator: false,
                });
                continue;
            }
            EntryKind::Yield => {
                elements.push(DocElement::Return {
                    name,
                    type_name,
                    description,
                    is_generator: true,
                });
                continue;
            }
            EntryKind::YieldType => {
                yield_types.extend(type_name.or(description));
                continue;
            }
            EntryKind::Raise => {
                elements.push(DocElement::Raise {
                    type_name: name.or(type_name).unwrap_or_default(),
                    description,
                });
                continue;
            }
            EntryKind::ReturnType => OtherKind::ReturnType,
            EntryKind::Attribute => OtherKind::Attribute,
            EntryKind::Note => OtherKind::Note,
            EntryKind::Example => OtherKind::Example,
            EntryKind::Todo => OtherKind::Todo,
            EntryKind::Warn => OtherKind::Warn,
            EntryKind::SeeAlso => OtherKind::SeeAlso,
            EntryKind::Reference => OtherKind::Reference,
            EntryKind::Receive => OtherKind::Receive,
            EntryKind::Custom(label) => OtherKind::Custom(label),
        };
        elements.push(DocElement::Other {
            kind: other_kind,
            name,
            type_name,
            description,
        });
    }

    for hint in type_hints {
        match hint {
            (target, Some(name), Some(type_name)) => {
                apply_type_hint(&mut elements, target, name, type_name)
            }
            _ => debug!("type field without a name or a type, dropped"),
        }
    }
    for hint in yield_types {
        apply_yield_type(&mut elements, hint);
    }
    elements
}

/// Type the first untyped Yield, or add a typed one.
fn apply_yield_type(elements: &mut Vec<DocElement>, hint: String) {
    let slot = elements.iter_mut().find_map(|element| match element {
        DocElement::Return {
            type_name,
            is_generator: true,
            ..
        } if type_name.is_none() => Some(type_name),
        _ => None,
    });
    match slot {
        Some(type_name) => *type_name = Some(hint),
        None => elements.push(DocElement::Return {
            name: None,
            type_name: Some(hint),
            description: None,
            is_generator: true,
        }),
    }
}

fn apply_type_hint(elements: &mut Vec<DocElement>, target: TypeTarget, name: String, hint: String) {
    let slot = elements.iter_mut().find_map(|element| match element {
        DocElement::Param {
            name: n, type_name, ..
        } if target == TypeTarget::Param && same_name(n.as_str(), &name) => Some(type_name),
        DocElement::Other {
            kind: OtherKind::Attribute,
            name: Some(n),
            type_name,
            ..
        } if target == TypeTarget::Attribute && same_name(n.as_str(), &name) => Some(type_name),
        _ => None,
    });

    match slot {
        Some(type_name) => {
            type_name.get_or_insert(hint);
        }
        None if target == TypeTarget::Param => elements.push(DocElement::Param {
            name,
            type_name: Some(hint),
            default: None,
            description: None,
        }),
        None => elements.push(DocElement::Other {
            kind: OtherKind::Attribute,
            name: Some(name),
            type_name: Some(hint),
            description: None,
        }),
    }
}

/// Fold signature information into documented elements.
///
/// Documented parameters take the signature's type and default when they have
/// none; undocumented parameters are appended. Return hints become Returns
/// when nothing documents the return value, or type the single untyped Return.
pub fn merge_signature(elements: &mut Vec<DocElement>, signature: &Signature) {
    for element in elements.iter_mut() {
        if let DocElement::Param {
            name,
            type_name,
            default,
            ..
        } = element
        {
            if let Some(param) = signature.param(name) {
                if type_name.is_none() {
                    type_name.clone_from(&param.type_name);
                }
                if default.is_none() {
                    default.clone_from(&param.default);
                }
            }
        }
    }

    for param in &signature.params {
        let documented = elements
            .iter()
            .any(|e| matches!(e, DocElement::Param { name, .. } if same_name(name, &param.name)));
        if !documented {
            elements.push(DocElement::Param {
                name: param.name.clone(),
                type_name: param.type_name.clone(),
                default: param.default.clone(),
                description: None,
            });
        }
    }

    if signature.return_hints.is_empty()
        || elements.iter().any(|e| e.kind() == ElementKind::ReturnType)
    {
        return;
    }
    let returns: Vec<usize> = elements
        .iter()
        .enumerate()
        .filter(|(_, e)| e.kind() == ElementKind::Return)
        .map(|(index, _)| index)
        .collect();
    match returns.as_slice() {
        [] => elements.extend(signature.return_hints.iter().map(|hint| DocElement::Return {
            name: None,
            type_name: Some(hint.clone()),
            description: None,
            is_generator: false,
        })),
        [only] => {
            if let DocElement::Return { type_name, .. } = &mut elements[*only] {
                type_name.get_or_insert_with(|| signature.return_hints.join(", "));
            }
        }
        _ => {}
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim_start_matches('*') == b.trim_start_matches('*')
}

fn leading_whitespace(text: &str) -> &str {
    let first = text.lines().next().unwrap_or("");
    &first[..first.len() - first.trim_start().len()]
}
