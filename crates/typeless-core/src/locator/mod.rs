//! Structural locators: a CSS selector subset evaluated over parsed HTML documents.
//!
//! Supported syntax: type selectors (`td`, `*`), `#id`, `.class`, `[attr]`,
//! `[attr=value]`, `:first-child`, `:last-child`, `:nth-child(n)`, the
//! descendant (whitespace) and child (`>`) combinators, and `,` groups.

mod parser;

use std::fmt;

use scraper::{ElementRef, Html};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocatorError {
    #[error("Invalid locator '{locator}': {reason}")]
    Parse { locator: String, reason: String },
}

pub type LocatorResult<T> = Result<T, LocatorError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeSelector {
    Any,
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Filter {
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
    FirstChild,
    LastChild,
    NthChild(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Compound {
    pub(crate) element: Option<TypeSelector>,
    pub(crate) filters: Vec<Filter>,
}

/// One compound selector and how it relates to the step before it.
/// The combinator of the first step is never consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) combinator: Combinator,
    pub(crate) compound: Compound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ComplexSelector {
    pub(crate) steps: Vec<Step>,
}

/// A compiled locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<ComplexSelector>,
}

impl Selector {
    pub fn parse(locator: &str) -> LocatorResult<Self> {
        let alternatives = parser::parse_group(locator).map_err(|reason| LocatorError::Parse {
            locator: locator.to_string(),
            reason,
        })?;
        Ok(Self {
            source: locator.to_string(),
            alternatives,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `element` is matched by any alternative of this selector.
    pub fn matches(&self, element: ElementRef<'_>) -> bool {
        self.alternatives
            .iter()
            .any(|complex| matches_steps(&complex.steps, element))
    }

    /// First matching element strictly below `scope`, in document order.
    pub fn select_first<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        descendant_elements(scope).find(|e| self.matches(*e))
    }

    /// Every matching element strictly below `scope`, in document order.
    pub fn select_all<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        descendant_elements(scope)
            .filter(|e| self.matches(*e))
            .collect()
    }

    /// Every matching element of `document`, the root element included.
    pub fn select_document<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        let root = document.root_element();
        std::iter::once(root)
            .chain(descendant_elements(root))
            .filter(|e| self.matches(*e))
            .collect()
    }
}

fn descendant_elements(scope: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    scope.descendants().skip(1).filter_map(ElementRef::wrap)
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::str::FromStr for Selector {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn matches_steps(steps: &[Step], element: ElementRef<'_>) -> bool {
    let Some((last, rest)) = steps.split_last() else {
        return true;
    };
    if !last.compound.matches(element) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }

    match last.combinator {
        Combinator::Child => element
            .parent()
            .and_then(ElementRef::wrap)
            .is_some_and(|parent| matches_steps(rest, parent)),
        Combinator::Descendant => element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| matches_steps(rest, ancestor)),
    }
}

impl Compound {
    fn matches(&self, element: ElementRef<'_>) -> bool {
        let element_ok = match &self.element {
            None | Some(TypeSelector::Any) => true,
            Some(TypeSelector::Named(name)) => element.value().name().eq_ignore_ascii_case(name),
        };
        element_ok && self.filters.iter().all(|f| f.matches(element))
    }
}

impl Filter {
    fn matches(&self, element: ElementRef<'_>) -> bool {
        let node = element.value();
        match self {
            Self::Id(id) => node.id() == Some(id.as_str()),
            Self::Class(class) => node.classes().any(|c| c == class.as_str()),
            Self::Attribute { name, value: None } => attribute(element, name).is_some(),
            Self::Attribute {
                name,
                value: Some(expected),
            } => attribute(element, name) == Some(expected.as_str()),
            Self::FirstChild => element.prev_siblings().find_map(ElementRef::wrap).is_none(),
            Self::LastChild => element.next_siblings().find_map(ElementRef::wrap).is_none(),
            Self::NthChild(n) => element_position(element) == *n,
        }
    }
}

/// HTML attribute names are case-insensitive.
fn attribute<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attrs()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

/// One-based position of `element` among its sibling elements.
fn element_position(element: ElementRef<'_>) -> usize {
    element.prev_siblings().filter_map(ElementRef::wrap).count() + 1
}

/// Rendered text of an element: descendant text joined, whitespace runs
/// collapsed to one space, ends trimmed.
pub fn text_content(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
