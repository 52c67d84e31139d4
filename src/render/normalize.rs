//! Pre-render normalization: trimming, placeholder text and return-type
//! folding for the target dialect.

use crate::config::Dialect;
use crate::model::{DocComment, DocElement, ElementKind, OtherKind};
use std::collections::HashMap;
use tracing::debug;

pub const SUMMARY_PLACEHOLDER: &str = "This is summary.";
pub const DESCRIPTION_PLACEHOLDER: &str = "This is more detailed description.";

/// Copy of `doc` ready for a `dialect` renderer.
pub fn normalize(doc: &DocComment, dialect: Dialect) -> DocComment {
    let mut doc = doc.clone();
    doc.trim_fields();
    match dialect {
        Dialect::Google | Dialect::Numpydoc => fold_return_types(&mut doc.elements),
        Dialect::Rest | Dialect::Epytext => split_return_types(&mut doc.elements),
    }
    doc.summary
        .get_or_insert_with(|| SUMMARY_PLACEHOLDER.to_string());
    doc.description
        .get_or_insert_with(|| DESCRIPTION_PLACEHOLDER.to_string());
    fill_descriptions(&mut doc.elements);
    doc
}

/// English ordinal: 0th, 1st, 2nd, 3rd, 4th, ..., 11th, 12th, 13th, 21st.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Move stand-alone return types onto Return elements.
fn fold_return_types(elements: &mut Vec<DocElement>) {
    let (return_types, mut kept): (Vec<DocElement>, Vec<DocElement>) = std::mem::take(elements)
        .into_iter()
        .partition(|e| e.kind() == ElementKind::ReturnType);

    for element in return_types {
        let Some(hint) = element.description().map(str::to_string) else {
            debug!("return type without a type, dropped");
            continue;
        };
        let slot = kept.iter_mut().find_map(|e| match e {
            DocElement::Return {
                type_name,
                is_generator: false,
                ..
            } if type_name.is_none() => Some(type_name),
            _ => None,
        });
        match slot {
            Some(type_name) => *type_name = Some(hint),
            None => kept.push(DocElement::Return {
                name: None,
                type_name: Some(hint),
                description: None,
                is_generator: false,
            }),
        }
    }
    *elements = kept;
}

/// Give typed Returns an `rtype` field unless one is already there.
fn split_return_types(elements: &mut Vec<DocElement>) {
    if elements.iter().any(|e| e.kind() == ElementKind::ReturnType) {
        return;
    }
    let return_types: Vec<DocElement> = elements
        .iter()
        .filter_map(|e| match e {
            DocElement::Return {
                type_name: Some(type_name),
                is_generator: false,
                ..
            } => Some(DocElement::Other {
                kind: OtherKind::ReturnType,
                name: None,
                type_name: None,
                description: Some(type_name.clone()),
            }),
            _ => None,
        })
        .collect();
    elements.extend(return_types);
}

/// "The <ordinal> <noun>" for every element without a description.
fn fill_descriptions(elements: &mut [DocElement]) {
    let mut seen: HashMap<ElementKind, usize> = HashMap::new();
    for element in elements.iter_mut() {
        let kind = element.kind();
        let counter = seen.entry(kind.clone()).or_insert(0);
        let index = *counter;
        *counter += 1;

        if element.description().is_some() {
            continue;
        }
        let mut text = format!("The {} {}", ordinal(index), kind.noun());
        if let DocElement::Param {
            default: Some(default),
            ..
        } = &*element
        {
            text.push_str(". The default value is ");
            text.push_str(default);
        }
        *element.description_mut() = Some(text);
    }
}
