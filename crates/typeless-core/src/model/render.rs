use serde::{Deserialize, Serialize};

use super::descriptor::TypeDescriptor;

/// Type names that never produce a dependency statement unless configured otherwise.
pub const DEFAULT_BUILTIN_TYPES: [&str; 4] = ["Number", "String", "Boolean", "Map"];

/// Module syntax used for dependency statements and the exported interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationStyle {
    /// `import T from "./T";` / `export default interface ...`
    #[default]
    EsModule,
    /// `const T = require("./T");` / `module.exports = interface ...`
    CommonJs,
}

impl DeclarationStyle {
    pub fn dependency_line(self, type_name: &str) -> String {
        match self {
            Self::EsModule => format!("import {type_name} from \"./{type_name}\";"),
            Self::CommonJs => format!("const {type_name} = require(\"./{type_name}\");"),
        }
    }

    pub const fn export_prefix(self) -> &'static str {
        match self {
            Self::EsModule => "export default ",
            Self::CommonJs => "module.exports = ",
        }
    }
}

impl std::str::FromStr for DeclarationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "es_module" | "esm" => Ok(Self::EsModule),
            "common_js" | "commonjs" | "cjs" => Ok(Self::CommonJs),
            other => Err(format!("unknown declaration style: {other}")),
        }
    }
}

/// Rendering options passed explicitly to every rendering call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub style: DeclarationStyle,
    /// Types that are globally available and need no dependency statement.
    pub builtin_types: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: DeclarationStyle::default(),
            builtin_types: DEFAULT_BUILTIN_TYPES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub fn with_style(mut self, style: DeclarationStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_builtin_types(mut self, types: Vec<String>) -> Self {
        self.builtin_types = types;
        self
    }

    pub fn is_builtin(&self, type_name: &str) -> bool {
        self.builtin_types.iter().any(|t| t == type_name)
    }
}

impl TypeDescriptor {
    /// One dependency line per referenced non-builtin type, in
    /// [`Self::unique_types`] order.
    pub fn dependency_statements(&self, config: &RenderConfig) -> String {
        self.unique_types()
            .iter()
            .filter(|t| !config.is_builtin(t))
            .map(|t| config.style.dependency_line(t))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn interface_declaration(&self) -> String {
        match self.inherits() {
            Some(parent) => format!("interface {} extends {parent}", self.name()),
            None => format!("interface {}", self.name()),
        }
    }

    pub fn interface_properties(&self) -> String {
        self.typed_properties()
            .iter()
            .map(|p| format!("{}: {};", p.name, p.type_name))
            .collect::<Vec<_>>()
            .join("\n  ")
    }

    /// Complete interface file: dependencies, a blank line, then the
    /// exported declaration with its indented property block.
    pub fn render(&self, config: &RenderConfig) -> String {
        format!(
            "{}\n\n{}{} {{\n  {}\n}}",
            self.dependency_statements(config),
            config.style.export_prefix(),
            self.interface_declaration(),
            self.interface_properties(),
        )
        .trim()
        .to_string()
    }
}
