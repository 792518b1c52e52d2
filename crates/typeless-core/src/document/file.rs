use std::path::PathBuf;

use tracing::warn;
use url::Url;

use super::{DocumentError, DocumentHandle, DocumentLoader, DocumentResult};

/// Loads documents from the local file system, by path or `file://` URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl FileLoader {
    pub fn resolve(address: &str) -> DocumentResult<PathBuf> {
        if address.starts_with("file:") {
            Url::parse(address)
                .ok()
                .and_then(|url| url.to_file_path().ok())
                .ok_or_else(|| DocumentError::InvalidAddress(address.to_string()))
        } else {
            Ok(PathBuf::from(address))
        }
    }
}

#[async_trait::async_trait]
impl DocumentLoader for FileLoader {
    async fn open(&self, address: &str) -> DocumentResult<Box<dyn DocumentHandle>> {
        let path = Self::resolve(address)?;
        let source = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| DocumentError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(Box::new(FileDocument {
            address: address.to_string(),
            source: Some(source),
        }))
    }
}

pub struct FileDocument {
    address: String,
    source: Option<String>,
}

#[async_trait::async_trait]
impl DocumentHandle for FileDocument {
    fn address(&self) -> &str {
        &self.address
    }

    async fn content(&mut self) -> DocumentResult<String> {
        self.source
            .clone()
            .ok_or_else(|| DocumentError::Closed(self.address.clone()))
    }

    fn release(&mut self) {
        self.source = None;
    }

    fn is_closed(&self) -> bool {
        self.source.is_none()
    }
}

impl Drop for FileDocument {
    fn drop(&mut self) {
        if !self.is_closed() {
            warn!(address = %self.address, "document dropped without being closed");
            self.release();
        }
    }
}
