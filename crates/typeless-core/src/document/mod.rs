//! Document access: loading an address into a handle that yields its source
//! text and must be closed once extraction is done.

mod file;
mod http;

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;
use url::Url;

pub use file::{FileDocument, FileLoader};
pub use http::{FetchConfig, HttpDocument, HttpLoader};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid document address: {0}")]
    InvalidAddress(String),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Request to {address} failed with status {status}")]
    Status { address: String, status: u16 },
    #[error("Document {0} is already closed")]
    Closed(String),
}

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Opens documents by address.
#[async_trait::async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn open(&self, address: &str) -> DocumentResult<Box<dyn DocumentHandle>>;
}

/// A loaded document. Must be closed exactly once its content is no longer needed.
#[async_trait::async_trait]
pub trait DocumentHandle: Send {
    fn address(&self) -> &str;

    /// Source text of the document. Fails once the handle is closed.
    async fn content(&mut self) -> DocumentResult<String>;

    /// Releases the document. Closing twice is a no-op.
    async fn close(&mut self) -> DocumentResult<()> {
        self.release();
        Ok(())
    }

    /// Synchronous release, usable from `Drop`. Afterwards `is_closed` is true.
    fn release(&mut self);

    fn is_closed(&self) -> bool;
}

/// An opened document that is released when dropped.
///
/// Covers every exit that skips [`OpenDocument::close`]: early returns,
/// panics, and cancellation of the future holding it.
pub struct OpenDocument {
    handle: Box<dyn DocumentHandle>,
}

impl OpenDocument {
    #[must_use]
    pub fn new(handle: Box<dyn DocumentHandle>) -> Self {
        Self { handle }
    }

    pub fn address(&self) -> &str {
        self.handle.address()
    }

    pub async fn content(&mut self) -> DocumentResult<String> {
        self.handle.content().await
    }

    pub fn is_closed(&self) -> bool {
        self.handle.is_closed()
    }

    pub async fn close(mut self) -> DocumentResult<()> {
        self.handle.close().await
    }
}

impl From<Box<dyn DocumentHandle>> for OpenDocument {
    fn from(handle: Box<dyn DocumentHandle>) -> Self {
        Self::new(handle)
    }
}

impl Drop for OpenDocument {
    fn drop(&mut self) {
        if !self.handle.is_closed() {
            debug!(address = %self.handle.address(), "releasing document without close");
            self.handle.release();
        }
    }
}

/// Picks the file or HTTP loader from the address scheme.
///
/// Bare paths (including Windows drive paths) are treated as files.
#[derive(Debug, Clone, Default)]
pub struct AddressLoader {
    fetch: FetchConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddressKind {
    File,
    Http,
}

impl AddressLoader {
    #[must_use]
    pub fn new(fetch: FetchConfig) -> Self {
        Self { fetch }
    }

    fn classify(address: &str) -> DocumentResult<AddressKind> {
        match Url::parse(address) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(AddressKind::Http),
                "file" => Ok(AddressKind::File),
                scheme if scheme.len() == 1 => Ok(AddressKind::File),
                _ => Err(DocumentError::InvalidAddress(address.to_string())),
            },
            Err(_) => Ok(AddressKind::File),
        }
    }
}

#[async_trait::async_trait]
impl DocumentLoader for AddressLoader {
    async fn open(&self, address: &str) -> DocumentResult<Box<dyn DocumentHandle>> {
        match Self::classify(address)? {
            AddressKind::File => FileLoader.open(address).await,
            AddressKind::Http => HttpLoader::new(self.fetch.clone())?.open(address).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_classify_addresses() {
        assert_eq!(
            AddressLoader::classify("https://www.figma.com/developers/api").unwrap(),
            AddressKind::Http
        );
        assert_eq!(
            AddressLoader::classify("http://localhost:8080/types").unwrap(),
            AddressKind::Http
        );
        assert_eq!(
            AddressLoader::classify("file:///tmp/types.html").unwrap(),
            AddressKind::File
        );
        assert_eq!(
            AddressLoader::classify("docs/types.html").unwrap(),
            AddressKind::File
        );
        assert_eq!(
            AddressLoader::classify("/var/docs/types.html").unwrap(),
            AddressKind::File
        );
        assert_eq!(
            AddressLoader::classify(r"C:\docs\types.html").unwrap(),
            AddressKind::File
        );
    }

    #[test]
    fn test_classify_rejects_unknown_scheme() {
        assert!(matches!(
            AddressLoader::classify("ftp://example.com/types.html"),
            Err(DocumentError::InvalidAddress(_))
        ));
    }

    struct FlagDocument {
        closed: Arc<AtomicBool>,
    }

    #[async_trait::async_trait]
    impl DocumentHandle for FlagDocument {
        fn address(&self) -> &str {
            "memory://flag"
        }

        async fn content(&mut self) -> DocumentResult<String> {
            Ok(String::new())
        }

        fn release(&mut self) {
            self.closed.store(true, Ordering::SeqCst);
        }

        fn is_closed(&self) -> bool {
            self.closed.load(Ordering::SeqCst)
        }
    }

    fn flag_document() -> (OpenDocument, Arc<AtomicBool>) {
        let closed = Arc::new(AtomicBool::new(false));
        let handle = FlagDocument {
            closed: Arc::clone(&closed),
        };
        (OpenDocument::new(Box::new(handle)), closed)
    }

    #[test]
    fn test_open_document_released_on_drop() {
        let (document, closed) = flag_document();
        assert!(!document.is_closed());

        drop(document);
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_open_document_close() {
        let (mut document, closed) = flag_document();
        assert_eq!(document.address(), "memory://flag");
        assert_eq!(document.content().await.unwrap(), "");

        document.close().await.unwrap();
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let loader = AddressLoader::default();
        let result = loader.open("/definitely/not/here.html").await;
        assert!(matches!(result, Err(DocumentError::Io { .. })));
    }
}
