//! Export surface: the precondition gate, JSON serialization, and
//! download-style filenames.
//!
//! Both exporters refuse to run when the required personal fields are
//! blank. The check happens before any layout work, because producing a
//! half-filled document is worse than telling the user what is missing.

pub mod pdf;

use tracing::info;

use crate::errors::{Error, Result};
use crate::model::Resume;

/// A finished export: suggested filename plus the file body.
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Export eligibility: full name, email, and phone must be non-blank.
pub fn validate_for_export(resume: &Resume) -> Result<()> {
    let personal = &resume.personal;
    if personal.full_name.trim().is_empty() {
        return Err(Error::MissingField("fullName"));
    }
    if personal.email.trim().is_empty() {
        return Err(Error::MissingField("email"));
    }
    if personal.phone.trim().is_empty() {
        return Err(Error::MissingField("phone"));
    }
    Ok(())
}

/// The full name with every whitespace run collapsed to one underscore.
pub fn filename_stem(full_name: &str) -> String {
    let mut stem = String::with_capacity(full_name.len());
    let mut in_run = false;
    for c in full_name.chars() {
        if c.is_whitespace() {
            if !in_run {
                stem.push('_');
                in_run = true;
            }
        } else {
            stem.push(c);
            in_run = false;
        }
    }
    stem
}

/// Pretty-printed canonical JSON, exactly what a later import reads back.
pub fn export_json(resume: &Resume) -> Result<ExportBundle> {
    validate_for_export(resume)?;
    let body = serde_json::to_string_pretty(resume)?;
    let filename = format!("{}_data.json", filename_stem(&resume.personal.full_name));
    info!(%filename, bytes = body.len(), "exported resume JSON");
    Ok(ExportBundle {
        filename,
        bytes: body.into_bytes(),
    })
}

/// A4 PDF per the document renderer.
pub fn export_pdf(resume: &Resume) -> Result<ExportBundle> {
    validate_for_export(resume)?;
    let bytes = pdf::render(resume)?;
    let filename = format!("{}_ATS.pdf", filename_stem(&resume.personal.full_name));
    info!(%filename, bytes = bytes.len(), "exported resume PDF");
    Ok(ExportBundle { filename, bytes })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_exportable() -> Resume {
        let mut resume = Resume::default();
        resume.personal.full_name = "Jane Doe".to_string();
        resume.personal.email = "jane@x.com".to_string();
        resume.personal.phone = "555-123-4567".to_string();
        resume
    }

    #[test]
    fn test_validation_reports_first_missing_field() {
        let mut resume = make_exportable();
        resume.personal.full_name = "   ".to_string();
        assert!(matches!(
            validate_for_export(&resume),
            Err(Error::MissingField("fullName"))
        ));

        let mut resume = make_exportable();
        resume.personal.email = String::new();
        assert!(matches!(
            validate_for_export(&resume),
            Err(Error::MissingField("email"))
        ));

        let mut resume = make_exportable();
        resume.personal.phone = String::new();
        assert!(matches!(
            validate_for_export(&resume),
            Err(Error::MissingField("phone"))
        ));

        assert!(validate_for_export(&make_exportable()).is_ok());
    }

    #[test]
    fn test_pdf_export_refuses_before_layout() {
        let mut resume = make_exportable();
        resume.personal.full_name = String::new();
        let err = export_pdf(&resume).unwrap_err();
        assert!(matches!(err, Error::MissingField("fullName")));
    }

    #[test]
    fn test_filename_stem_collapses_whitespace_runs() {
        assert_eq!(filename_stem("Jane Doe"), "Jane_Doe");
        assert_eq!(filename_stem("Jane \t  van\nDoe"), "Jane_van_Doe");
        assert_eq!(filename_stem(" Jane Doe "), "_Jane_Doe_");
    }

    #[test]
    fn test_pdf_bundle_writes_a_loadable_file() {
        let bundle = export_pdf(&make_exportable()).unwrap();
        assert_eq!(bundle.filename, "Jane_Doe_ATS.pdf");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(&bundle.filename);
        std::fs::write(&path, &bundle.bytes).unwrap();
        let doc = lopdf::Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_json_export_round_trips() {
        let resume = make_exportable();
        let bundle = export_json(&resume).unwrap();
        assert_eq!(bundle.filename, "Jane_Doe_data.json");

        let body = String::from_utf8(bundle.bytes).unwrap();
        assert!(
            body.starts_with("{\n  \""),
            "pretty-printed with 2-space indent, got: {}",
            &body[..20.min(body.len())]
        );
        let back: Resume = serde_json::from_str(&body).unwrap();
        assert_eq!(back, resume);
    }
}
