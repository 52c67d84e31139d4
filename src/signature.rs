//! Declaration header analysis: parameter names, annotations, defaults and
//! return-type hints.
//!
//! The parameter list is the text between the first `(` and the first `)`,
//! split on every comma. Nested brackets are not tracked, so defaults that
//! are calls or annotations with comma-separated arguments get mis-split.

use crate::model::{Item, ItemKind, Signature, SignatureParam};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static RE_LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#[^\n]*").unwrap());

static RE_CLASS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^class\b").unwrap());

/// Implicit receivers, skipped when they are the first parameter.
const RECEIVERS: &[&str] = &["self", "cls"];

/// Analyze a declaration's text. Class headers and headers without a
/// parameter list yield an empty signature.
pub fn analyze(text: &str) -> Signature {
    let text = text.trim();
    if RE_CLASS.is_match(text) {
        return Signature::default();
    }
    let code = RE_LINE_COMMENT.replace_all(text, "");

    let Some(params) = parse_params(&code) else {
        return Signature::default();
    };
    Signature {
        params,
        return_hints: parse_return_hints(&code),
    }
}

/// Attach a signature to every Declaration item.
pub fn annotate(items: &mut [Item]) {
    for item in items.iter_mut().filter(|i| i.kind == ItemKind::Declaration) {
        item.meta.signature = Some(analyze(&item.text));
    }
}

fn parse_params(code: &str) -> Option<Vec<SignatureParam>> {
    let (Some(open), Some(close)) = (code.find('('), code.find(')')) else {
        debug!(header = code.lines().next().unwrap_or(""), "no parameter list found");
        return None;
    };
    if close < open {
        debug!(header = code.lines().next().unwrap_or(""), "malformed parameter list");
        return None;
    }

    let mut params: Vec<SignatureParam> = Vec::new();
    for (index, token) in code[open + 1..close].split(',').enumerate() {
        let token = token.trim();
        // bare `*` / `/` only separate keyword-only and positional-only params
        if token.is_empty() || token == "*" || token == "/" {
            continue;
        }
        let param = parse_param(token);
        if index == 0 && RECEIVERS.contains(&param.name.as_str()) {
            continue;
        }
        if params.iter().any(|p| p.name == param.name) {
            continue;
        }
        params.push(param);
    }
    Some(params)
}

/// `name`, `name: type`, `name=default` or `name: type = default`.
fn parse_param(token: &str) -> SignatureParam {
    let (head, default) = match token.split_once('=') {
        Some((head, default)) => (head, non_empty(default)),
        None => (token, None),
    };
    let (name, type_name) = match head.split_once(": ") {
        Some((name, type_name)) => (name, non_empty(type_name)),
        None => (head, None),
    };
    SignatureParam {
        name: name.trim().to_string(),
        type_name,
        default,
    }
}

fn parse_return_hints(code: &str) -> Vec<String> {
    let Some(pos) = code.find("->") else {
        return Vec::new();
    };
    code[pos + 2..]
        .trim_matches(|c: char| c == ':' || c == '(' || c == ')' || c.is_whitespace())
        .split(',')
        .filter_map(non_empty)
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
