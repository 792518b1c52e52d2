use thiserror::Error;

/// Top-level error for callers that do not care which stage failed.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] crate::model::ModelError),

    #[error(transparent)]
    Locator(#[from] crate::locator::LocatorError),

    #[error(transparent)]
    Document(#[from] crate::document::DocumentError),

    #[error(transparent)]
    Extract(#[from] crate::extract::ExtractError),

    #[error(transparent)]
    Pipeline(#[from] crate::pipeline::PipelineError),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
