mod descriptor;
mod render;

pub use descriptor::{
    ModelError, ModelResult, TypeDescriptor, TypeExprError, TypedProperty, NODE_BASE_TYPE,
};
pub use render::{DeclarationStyle, RenderConfig, DEFAULT_BUILTIN_TYPES};
