//! Structured resume building, normalization, and export.
//!
//! The crate turns arbitrary resume inputs — its own JSON exports,
//! third-party JSON with alternate key names, or raw text pulled out of
//! PDF/DOCX/TXT files — into one canonical [`model::Resume`], lets a host
//! edit it through the [`store`] command reducer, and renders it two ways
//! that cannot disagree on content order: a measured, windowed screen
//! preview and a paginated A4 PDF.
//!
//! [`Workspace`] is the front door:
//!
//! ```no_run
//! use vitae::{Config, ImportFile, Workspace};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let mut workspace = Workspace::new(&config);
//!
//! let file = ImportFile::new("resume.pdf", std::fs::read("resume.pdf")?);
//! workspace.import_document(&file).await?;
//!
//! let pdf = workspace.export_pdf()?;
//! std::fs::write(&pdf.filename, &pdf.bytes)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod export;
pub mod import;
pub mod layout;
pub mod model;
pub mod oracle;
pub mod store;
pub mod workspace;

pub use config::Config;
pub use errors::{Error, Result};
pub use export::ExportBundle;
pub use import::{FileTextExtractor, ImportFile, Importer, TextExtractor};
pub use model::Resume;
pub use oracle::ResumeOracle;
pub use store::{Command, Store};
pub use workspace::{PreviewLayout, Workspace};
