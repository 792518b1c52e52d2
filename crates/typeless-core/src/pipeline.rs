use thiserror::Error;
use tracing::{info, warn};

use crate::document::{AddressLoader, DocumentError, DocumentLoader, OpenDocument};
use crate::extract::{ExtractError, ExtractResult, LocatorConfig, RawEntity, StructuralExtractor};
use crate::locator::LocatorError;
use crate::model::{ModelError, ModelResult, TypeDescriptor};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Locator error: {0}")]
    Locator(#[from] LocatorError),
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),
    #[error("Invalid entity: {0}")]
    Model(#[from] ModelError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Turns a document address and its locators into type descriptors.
pub struct Pipeline {
    loader: Box<dyn DocumentLoader>,
}

impl Pipeline {
    #[must_use]
    pub fn new() -> Self {
        Self {
            loader: Box::new(AddressLoader::default()),
        }
    }

    #[must_use]
    pub fn with_loader(mut self, loader: Box<dyn DocumentLoader>) -> Self {
        self.loader = loader;
        self
    }

    /// Loads `address`, extracts every entity row and validates it.
    ///
    /// The document is closed on every path once it has been opened, including
    /// when this future is dropped before completing. Any failure aborts the
    /// whole run: no partial results are returned.
    pub async fn extract(
        &self,
        address: &str,
        locators: &LocatorConfig,
    ) -> PipelineResult<Vec<TypeDescriptor>> {
        let extractor = StructuralExtractor::new(locators)?;

        let mut document = OpenDocument::new(self.loader.open(address).await?);
        info!(address, "document opened");

        let scraped = scrape(&mut document, &extractor).await;

        match document.close().await {
            Ok(()) => info!(address, "document closed"),
            Err(err) => warn!(address, error = %err, "failed to close document"),
        }

        let records = scraped?;
        info!(address, rows = records.len(), "entity rows extracted");

        let descriptors = construct_descriptors(records)?;
        info!(address, count = descriptors.len(), "type descriptors constructed");

        Ok(descriptors)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

async fn scrape(
    document: &mut OpenDocument,
    extractor: &StructuralExtractor,
) -> ExtractResult<Vec<RawEntity>> {
    let source = document.content().await?;
    extractor.extract(&source)
}

/// Validates raw records in order. The first invalid record fails the batch.
pub fn construct_descriptors(records: Vec<RawEntity>) -> ModelResult<Vec<TypeDescriptor>> {
    records.into_iter().map(TypeDescriptor::try_from).collect()
}
