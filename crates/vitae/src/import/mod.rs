//! Import pipeline: document kind detection, text extraction, oracle-first
//! structured extraction, heuristic fallback, and JSON import.
//!
//! Binary extraction and AI extraction sit behind trait objects so hosts
//! can swap backends; the bundled [`FileTextExtractor`] covers text and PDF
//! files out of the box. One import runs at a time: the in-flight flag is
//! released by a drop guard, so an abandoned import frees the slot.

pub mod heuristics;
pub mod normalize;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::{Error, Result};
use crate::model::Resume;
use crate::oracle::{DisabledOracle, OpenRouterOracle, ResumeOracle};

pub use heuristics::{extract_resume_from_text, scan_text, TextScan};
pub use normalize::normalize;

/// An uploaded document: a file name (for kind detection) plus its bytes.
#[derive(Debug, Clone)]
pub struct ImportFile {
    pub name: String,
    pub bytes: Bytes,
}

impl ImportFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        ImportFile {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Accepted upload formats, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
}

impl DocumentKind {
    pub fn from_name(name: &str) -> Result<Self> {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("docx") => Ok(DocumentKind::Docx),
            Some("txt") => Ok(DocumentKind::Txt),
            Some(other) => Err(Error::UnsupportedFormat(other.to_string())),
            None => Err(Error::UnsupportedFormat(name.to_string())),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Text extraction collaborator
// ────────────────────────────────────────────────────────────────────────────

/// Black-box extraction of plain text from an uploaded document.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, file: &ImportFile) -> Result<String>;
}

/// Bundled extractor: UTF-8 for text files, `pdf-extract` for PDFs. DOCX
/// needs a host-supplied backend and is rejected here.
pub struct FileTextExtractor;

#[async_trait]
impl TextExtractor for FileTextExtractor {
    async fn extract_text(&self, file: &ImportFile) -> Result<String> {
        match DocumentKind::from_name(&file.name)? {
            DocumentKind::Txt => Ok(String::from_utf8_lossy(&file.bytes).into_owned()),
            DocumentKind::Pdf => pdf_extract::extract_text_from_mem(&file.bytes)
                .map_err(|e| Error::Extraction(e.to_string())),
            DocumentKind::Docx => Err(Error::Extraction(
                "DOCX extraction requires a host-supplied TextExtractor backend".to_string(),
            )),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Importer
// ────────────────────────────────────────────────────────────────────────────

/// Drives a document or JSON payload all the way to a canonical [`Resume`].
pub struct Importer {
    extractor: Arc<dyn TextExtractor>,
    oracle: Arc<dyn ResumeOracle>,
    busy: AtomicBool,
}

impl Importer {
    pub fn new(extractor: Arc<dyn TextExtractor>, oracle: Arc<dyn ResumeOracle>) -> Self {
        Importer {
            extractor,
            oracle,
            busy: AtomicBool::new(false),
        }
    }

    /// Bundled extractor plus whichever oracle the configuration allows.
    pub fn from_config(config: &Config) -> Self {
        let oracle: Arc<dyn ResumeOracle> = match OpenRouterOracle::from_config(config) {
            Some(oracle) => Arc::new(oracle),
            None => Arc::new(DisabledOracle),
        };
        Importer::new(Arc::new(FileTextExtractor), oracle)
    }

    /// Full document import: refuse if one is already running, extract the
    /// text, ask the oracle, fall back to heuristics.
    pub async fn import_document(&self, file: &ImportFile) -> Result<Resume> {
        let _guard = self.begin()?;
        let kind = DocumentKind::from_name(&file.name)?;
        info!(file = %file.name, ?kind, "importing document");

        let text = self.extractor.extract_text(file).await?;
        debug!(chars = text.chars().count(), "extracted document text");
        Ok(self.resume_from_text(&text).await)
    }

    /// Imports a JSON payload (file body or pasted text). A syntax error is
    /// a whole-import rejection; shape problems are absorbed by the
    /// normalizer.
    pub fn import_json(&self, raw: &str) -> Result<Resume> {
        let data: Value = serde_json::from_str(raw)?;
        Ok(normalize(&data))
    }

    async fn resume_from_text(&self, text: &str) -> Resume {
        if let Some(value) = self.oracle.extract(text).await {
            info!("oracle extraction succeeded");
            return normalize(&value);
        }
        info!("oracle unavailable, using heuristic extraction");
        extract_resume_from_text(text)
    }

    fn begin(&self) -> Result<ImportGuard<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::ImportInProgress);
        }
        Ok(ImportGuard { busy: &self.busy })
    }
}

/// Releases the import slot when dropped, including on cancellation.
struct ImportGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for ImportGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
