pub mod config;
pub mod dedup;
pub mod document;
pub mod error;
pub mod extract;
pub mod locator;
pub mod model;
pub mod pipeline;

pub use config::{ConfigError, ProfileSet, ScrapeConfig};
pub use document::{
    AddressLoader, DocumentError, DocumentHandle, DocumentLoader, FetchConfig, FileLoader,
    HttpLoader, OpenDocument,
};
pub use error::{Error, Result};
pub use extract::{ExtractError, LocatorConfig, RawEntity, StructuralExtractor};
pub use locator::{LocatorError, Selector};
pub use model::{
    DeclarationStyle, ModelError, RenderConfig, TypeDescriptor, TypeExprError, TypedProperty,
    NODE_BASE_TYPE,
};
pub use pipeline::{construct_descriptors, Pipeline, PipelineError};
