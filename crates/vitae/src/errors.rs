use thiserror::Error;

/// Engine-level error type.
///
/// Shape problems inside resume data never surface here — the normalizer and
/// the text extractor degrade field-by-field instead of failing. What remains
/// is I/O-level import trouble, the export precondition gate, and PDF
/// assembly faults.
#[derive(Debug, Error)]
pub enum Error {
    /// The import body was not parseable JSON. The in-memory resume is left
    /// untouched when this is returned.
    #[error("Malformed import: {0}")]
    MalformedImport(#[from] serde_json::Error),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Unsupported file format '{0}'. Please upload PDF, DOCX, or TXT files")]
    UnsupportedFormat(String),

    /// A second import was attempted while one is still awaiting its
    /// collaborators. The caller should retry after the first settles.
    #[error("An import is already in progress")]
    ImportInProgress,

    /// Export refused before any layout work: one of the required personal
    /// fields is blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("PDF assembly error: {0}")]
    Pdf(#[from] lopdf::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
