//! Section identifiers and order-list manipulation.
//!
//! `sectionOrder` stores stable identifiers rather than indices, so a move
//! is expressed as "relocate this id to where that id sits" and survives
//! concurrent insertions without index drift. Built-in sections carry fixed
//! names; user-created sections get a `custom-` prefixed id so the renderer
//! can tell from the id's shape alone which lookup path to take.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a renderable section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionId {
    Experience,
    Education,
    Skills,
    Certifications,
    Languages,
    Projects,
    /// A user-defined section, carrying its full `custom-…` identifier.
    /// Unrecognized identifiers also land here; the renderer resolves them
    /// against `customSections` and silently drops dangling ones.
    Custom(String),
}

impl SectionId {
    /// Mints an id for a new user-defined section.
    pub fn new_custom() -> Self {
        SectionId::Custom(format!("custom-{}", Uuid::new_v4()))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, SectionId::Custom(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            SectionId::Experience => "experience",
            SectionId::Education => "education",
            SectionId::Skills => "skills",
            SectionId::Certifications => "certifications",
            SectionId::Languages => "languages",
            SectionId::Projects => "projects",
            SectionId::Custom(key) => key,
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SectionId {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "experience" => SectionId::Experience,
            "education" => SectionId::Education,
            "skills" => SectionId::Skills,
            "certifications" => SectionId::Certifications,
            "languages" => SectionId::Languages,
            "projects" => SectionId::Projects,
            _ => SectionId::Custom(raw),
        }
    }
}

impl From<SectionId> for String {
    fn from(id: SectionId) -> Self {
        id.as_str().to_string()
    }
}

/// Order used for brand-new resumes and for imports that carry no order of
/// their own: skills first, then the reverse-chronological sections, with
/// languages last.
pub fn default_section_order() -> Vec<SectionId> {
    vec![
        SectionId::Skills,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Projects,
        SectionId::Certifications,
        SectionId::Languages,
    ]
}

/// Relocates `from` to the slot currently occupied by `to`, shifting the
/// displaced run by one. Relative order of all other elements is preserved.
/// Returns `false` without touching the list when the move is a no-op:
/// `from == to`, or either id is absent.
pub fn move_section(order: &mut Vec<SectionId>, from: &SectionId, to: &SectionId) -> bool {
    if from == to {
        return false;
    }
    let Some(from_idx) = order.iter().position(|id| id == from) else {
        return false;
    };
    if !order.iter().any(|id| id == to) {
        return false;
    }
    let moved = order.remove(from_idx);
    // Recompute after removal so the insertion lands where `to` now sits.
    let to_idx = order
        .iter()
        .position(|id| id == to)
        .unwrap_or(order.len());
    order.insert(to_idx, moved);
    true
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
