//! Formatting configuration threaded through the pipeline.

use crate::model::Quote;
use anyhow::anyhow;
use std::fmt;
use std::str::FromStr;

/// Doc-comment dialects that can be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Google,
    Numpydoc,
    Rest,
    Epytext,
}

impl FromStr for Dialect {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "Google" | "google" => Ok(Dialect::Google),
            "Numpydoc" | "numpydoc" | "numpy" => Ok(Dialect::Numpydoc),
            "reST" | "rest" | "ReST" => Ok(Dialect::Rest),
            "Epytext" | "epytext" => Ok(Dialect::Epytext),
            _ => Err(anyhow!(
                "invalid docstring style: {}. Use Numpydoc, Google, reST or Epytext",
                s
            )),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dialect::Google => "Google",
            Dialect::Numpydoc => "Numpydoc",
            Dialect::Rest => "reST",
            Dialect::Epytext => "Epytext",
        };
        f.write_str(name)
    }
}

/// Rendering options for [`crate::render::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Target dialect.
    pub dialect: Dialect,
    /// Spaces per indentation level.
    pub tab_width: usize,
    /// Wrap column, indentation included.
    pub max_line_width: usize,
    /// Delimiter for rewritten doc-comments; `None` keeps each one's own.
    pub quote: Option<Quote>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            dialect: Dialect::Numpydoc,
            tab_width: 4,
            max_line_width: 80,
            quote: None,
        }
    }
}

impl FormatConfig {
    pub fn with_dialect(dialect: Dialect) -> Self {
        FormatConfig {
            dialect,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_names() {
        assert_eq!("Google".parse::<Dialect>().unwrap(), Dialect::Google);
        assert_eq!("reST".parse::<Dialect>().unwrap(), Dialect::Rest);
        assert_eq!("numpy".parse::<Dialect>().unwrap(), Dialect::Numpydoc);
        assert_eq!(Dialect::Epytext.to_string(), "Epytext");
    }

    #[test]
    fn unknown_dialect_lists_choices() {
        let err = "Sphinx".parse::<Dialect>().unwrap_err();
        assert!(err.to_string().contains("Numpydoc, Google, reST or Epytext"));
    }

    #[test]
    fn defaults() {
        let config = FormatConfig::default();
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.max_line_width, 80);
        assert_eq!(config.dialect, Dialect::Numpydoc);
        assert_eq!(config.quote, None);
    }
}
