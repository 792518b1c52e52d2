use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::dedup;
use crate::extract::RawEntity;

/// Parent type assigned to all-uppercase entity names that declare no parent.
pub const NODE_BASE_TYPE: &str = "Node";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Failed, argument with name '{argument}' missing")]
    MissingArgument { argument: &'static str },
}

pub type ModelResult<T> = Result<T, ModelError>;

/// A type expression that cannot be split into its referenced type names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeExprError {
    #[error("Type expression '{expression}' names no type")]
    NoTypeName { expression: String },
}

/// A named, typed property of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl TypedProperty {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Validated description of one extracted entity.
///
/// Immutable once built. Every derived view (referenced types, declaration,
/// property block, full interface text) is computed from the three fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    name: String,
    typed_properties: Vec<TypedProperty>,
    inherits: Option<String>,
}

impl TypeDescriptor {
    pub fn new(
        name: impl Into<String>,
        typed_properties: Vec<TypedProperty>,
        inherits: Option<String>,
    ) -> ModelResult<Self> {
        Self::from_parts(Some(name.into()), Some(typed_properties), inherits)
    }

    /// Builds a descriptor from possibly-missing parts.
    ///
    /// `name` is checked before `typed_properties`; an empty name counts as
    /// missing. An empty `inherits` counts as not supplied, in which case an
    /// all-uppercase name inherits from [`NODE_BASE_TYPE`].
    pub fn from_parts(
        name: Option<String>,
        typed_properties: Option<Vec<TypedProperty>>,
        inherits: Option<String>,
    ) -> ModelResult<Self> {
        let name = name
            .filter(|n| !n.is_empty())
            .ok_or(ModelError::MissingArgument { argument: "name" })?;
        let typed_properties = typed_properties.ok_or(ModelError::MissingArgument {
            argument: "typedProperties",
        })?;

        let inherits = inherits
            .filter(|parent| !parent.is_empty())
            .or_else(|| (name.to_uppercase() == name).then(|| NODE_BASE_TYPE.to_string()));

        Ok(Self {
            name,
            typed_properties,
            inherits,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn typed_properties(&self) -> &[TypedProperty] {
        &self.typed_properties
    }

    pub fn inherits(&self) -> Option<&str> {
        self.inherits.as_deref()
    }

    /// Distinct type names referenced by this entity, parent first, then
    /// property types in declaration order.
    ///
    /// Best effort: if any type expression names no type at all (`<>`, `[]`)
    /// the whole result degrades to an empty list. Use [`Self::try_unique_types`] to
    /// see the failure.
    pub fn unique_types(&self) -> Vec<String> {
        self.try_unique_types().unwrap_or_else(|err| {
            debug!(entity = %self.name, error = %err, "type decomposition degraded to empty set");
            Vec::new()
        })
    }

    pub fn try_unique_types(&self) -> Result<Vec<String>, TypeExprError> {
        let expressions = self
            .inherits
            .iter()
            .map(String::as_str)
            .chain(self.typed_properties.iter().map(|p| p.type_name.as_str()));

        let mut names = Vec::new();
        for expression in expressions {
            names.extend(decompose(expression)?);
        }

        Ok(dedup::unique(names))
    }
}

impl TryFrom<RawEntity> for TypeDescriptor {
    type Error = ModelError;

    fn try_from(raw: RawEntity) -> ModelResult<Self> {
        Self::from_parts(raw.name, raw.properties, raw.inherits)
    }
}

/// Splits `Base<A, B>` into `[Base, A, B]` after removing one trailing `[]`.
///
/// Brackets need not balance: `Map<String, Effect` still yields
/// `[Map, String, Effect]`. Blank expressions yield nothing.
fn decompose(expression: &str) -> Result<Vec<String>, TypeExprError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Ok(Vec::new());
    }

    let names: Vec<String> = strip_array(expression)
        .split(|c: char| matches!(c, '<' | '>' | ','))
        .map(|part| strip_array(part.trim()).trim())
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect();

    if names.is_empty() {
        Err(TypeExprError::NoTypeName {
            expression: expression.to_string(),
        })
    } else {
        Ok(names)
    }
}

fn strip_array(expression: &str) -> &str {
    expression.strip_suffix("[]").unwrap_or(expression)
}
