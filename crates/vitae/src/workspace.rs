//! Session facade: one resume, one importer, one paginator.
//!
//! `Workspace` is what a host (CLI, service, UI shell) holds for the
//! lifetime of an editing session. Edits go through [`dispatch`], imports
//! replace the whole resume atomically through the same command path, and
//! the preview and export surfaces only ever read the store's current
//! snapshot, so none of them can observe a half-applied change.
//!
//! [`dispatch`]: Workspace::dispatch

use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::errors::Result;
use crate::export::{self, ExportBundle};
use crate::import::{ImportFile, Importer, TextExtractor};
use crate::layout::blocks::{build_blocks, Block};
use crate::layout::pagination::{fit_scale, measure_content_height, PageWindow, Paginator};
use crate::model::Resume;
use crate::oracle::ResumeOracle;
use crate::store::{Command, Store};

/// One settled preview pass: the block sequence, its measured height, and
/// the page windows that height implies. `scale` is the fit-to-container
/// transform; it is derived after measurement and never feeds back into it.
#[derive(Debug)]
pub struct PreviewLayout {
    pub blocks: Vec<Block>,
    pub content_height_px: f32,
    pub windows: Vec<PageWindow>,
    pub page_count: usize,
    pub scale: f32,
}

/// Owns the session's store and its import collaborators.
pub struct Workspace {
    store: Store,
    importer: Importer,
    paginator: Paginator,
}

impl Workspace {
    /// Builds the importer from configuration: the bundled file extractor
    /// plus the OpenRouter oracle when a key is configured.
    pub fn new(config: &Config) -> Self {
        Workspace {
            store: Store::default(),
            importer: Importer::from_config(config),
            paginator: Paginator::new(),
        }
    }

    /// Injects custom collaborators, e.g. a host-side DOCX extractor or a
    /// stub oracle in tests.
    pub fn with_collaborators(
        extractor: Arc<dyn TextExtractor>,
        oracle: Arc<dyn ResumeOracle>,
    ) -> Self {
        Workspace {
            store: Store::default(),
            importer: Importer::new(extractor, oracle),
            paginator: Paginator::new(),
        }
    }

    pub fn resume(&self) -> &Resume {
        self.store.resume()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Applies an edit command; returns whether the snapshot changed.
    pub fn dispatch(&mut self, command: Command) -> bool {
        self.store.dispatch(command)
    }

    /// Parses and normalizes a JSON export (ours or a third party's) and
    /// swaps it in wholesale. A parse failure leaves the store untouched.
    pub fn import_json(&mut self, raw: &str) -> Result<()> {
        let resume = self.importer.import_json(raw)?;
        self.store.dispatch(Command::Replace(Box::new(resume)));
        Ok(())
    }

    /// Runs the full document pipeline: extension detection, text
    /// extraction, oracle-or-heuristics structuring, then atomic replace.
    pub async fn import_document(&mut self, file: &ImportFile) -> Result<()> {
        let resume = self.importer.import_document(file).await?;
        self.store.dispatch(Command::Replace(Box::new(resume)));
        Ok(())
    }

    pub fn export_json(&self) -> Result<ExportBundle> {
        export::export_json(self.store.resume())
    }

    pub fn export_pdf(&self) -> Result<ExportBundle> {
        export::export_pdf(self.store.resume())
    }

    /// Measures the current snapshot at native page width and settles the
    /// paginator on the implied page count.
    pub fn preview_layout(&mut self, container_width_px: f32) -> PreviewLayout {
        let blocks = build_blocks(self.store.resume());
        let content_height_px = measure_content_height(&blocks);
        let changed = self.paginator.observe_content_height(content_height_px);
        if changed {
            debug!(
                page_count = self.paginator.page_count(),
                content_height_px, "preview page count changed"
            );
        }
        PreviewLayout {
            blocks,
            content_height_px,
            windows: self.paginator.windows().to_vec(),
            page_count: self.paginator.page_count(),
            scale: fit_scale(container_width_px),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
