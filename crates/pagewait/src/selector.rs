// Selector - How an element reference finds its nodes
//
// Two strategies are supported, matching what the entity page objects use:
// - by id: `by::id("jh-create-entity")`
// - by css: `by::css("div table .btn-danger")`
//
// Selectors are plain values. They are resolved against the live page only
// when an element reference is queried.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Matches ids that can be written as `#ident` without escaping.
static PLAIN_CSS_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*$").expect("valid regex"));

/// A node lookup strategy and its value.
///
/// Deserializing goes through the same checks as [`Selector::id`] and
/// [`Selector::css`], so an empty value is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSelector", into = "RawSelector")]
pub enum Selector {
    /// Match the node whose `id` attribute equals the value
    Id(String),
    /// Match nodes by CSS expression
    Css(String),
}

impl Selector {
    /// Creates an id selector, rejecting empty ids.
    pub fn id(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::InvalidSelector("id must not be empty".to_string()));
        }
        Ok(Selector::Id(id))
    }

    /// Creates a CSS selector, rejecting empty expressions.
    pub fn css(expr: impl Into<String>) -> Result<Self> {
        let expr = expr.into();
        if expr.trim().is_empty() {
            return Err(Error::InvalidSelector(
                "css expression must not be empty".to_string(),
            ));
        }
        Ok(Selector::Css(expr))
    }

    /// Returns the raw selector value (id or CSS expression).
    pub fn value(&self) -> &str {
        match self {
            Selector::Id(v) | Selector::Css(v) => v,
        }
    }

    /// Renders this selector as a CSS expression.
    ///
    /// Ids that are not plain CSS identifiers (e.g. `storeApp.productCategory.delete.question`)
    /// are rendered as an attribute selector so the dots are not read as class selectors.
    pub fn to_css(&self) -> String {
        match self {
            Selector::Css(expr) => expr.clone(),
            Selector::Id(id) if PLAIN_CSS_IDENT.is_match(id) => format!("#{}", id),
            Selector::Id(id) => {
                let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
                format!("[id=\"{}\"]", escaped)
            }
        }
    }
}

/// Wire shape of a [`Selector`]: `{"using": "id", "value": "..."}`.
#[derive(Serialize, Deserialize)]
#[serde(tag = "using", content = "value", rename_all = "lowercase")]
enum RawSelector {
    Id(String),
    Css(String),
}

impl TryFrom<RawSelector> for Selector {
    type Error = Error;

    fn try_from(raw: RawSelector) -> Result<Self> {
        match raw {
            RawSelector::Id(id) => Selector::id(id),
            RawSelector::Css(expr) => Selector::css(expr),
        }
    }
}

impl From<Selector> for RawSelector {
    fn from(selector: Selector) -> Self {
        match selector {
            Selector::Id(id) => RawSelector::Id(id),
            Selector::Css(expr) => RawSelector::Css(expr),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "by.id('{}')", id),
            Selector::Css(expr) => write!(f, "by.css('{}')", expr),
        }
    }
}

/// Selector constructors in the familiar `by.id(..)` / `by.css(..)` shape.
///
/// These are meant for the fixed, literal selectors page objects declare.
/// Use [`Selector::id`] / [`Selector::css`] when the value comes from input.
pub mod by {
    use super::Selector;

    /// Selector matching the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty or only whitespace.
    pub fn id(id: &str) -> Selector {
        assert!(!id.trim().is_empty(), "by::id requires a non-empty id");
        Selector::Id(id.to_string())
    }

    /// Selector matching nodes by CSS expression.
    ///
    /// # Panics
    ///
    /// Panics if `expr` is empty or only whitespace.
    pub fn css(expr: &str) -> Selector {
        assert!(
            !expr.trim().is_empty(),
            "by::css requires a non-empty expression"
        );
        Selector::Css(expr.to_string())
    }
}
