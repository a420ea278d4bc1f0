//! Canonical resume schema.
//!
//! Every other part of the engine reads and writes this one shape: imports
//! normalize into it, the form edits it field-by-field through store
//! commands, and both renderers (preview measurement and PDF export) walk
//! it through the same block sequence. Wire names are camelCase to match
//! the JSON export format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::sections::{default_section_order, SectionId};

// ────────────────────────────────────────────────────────────────────────────
// Root aggregate
// ────────────────────────────────────────────────────────────────────────────

/// The resume document. A session owns exactly one, replaced wholesale on
/// import and serialized wholesale on export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    pub personal: Personal,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Skills,
    pub certifications: Vec<Certification>,
    pub projects: Vec<Project>,
    pub languages: Vec<LanguageSkill>,
    /// User-defined sections, keyed by their full `custom-…` identifier.
    pub custom_sections: BTreeMap<String, CustomSection>,
    /// Render order for everything below the personal header. `personal`
    /// always renders first and never appears here.
    pub section_order: Vec<SectionId>,
}

impl Default for Resume {
    fn default() -> Self {
        Resume {
            personal: Personal::default(),
            education: Vec::new(),
            experience: Vec::new(),
            skills: Skills::default(),
            certifications: Vec::new(),
            projects: Vec::new(),
            languages: Vec::new(),
            custom_sections: BTreeMap::new(),
            section_order: default_section_order(),
        }
    }
}

impl Resume {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a section has anything to render. Empty sections are skipped
    /// by both renderers; a dangling custom id counts as empty.
    pub fn section_is_empty(&self, id: &SectionId) -> bool {
        match id {
            SectionId::Experience => self.experience.is_empty(),
            SectionId::Education => self.education.is_empty(),
            SectionId::Skills => {
                self.skills.technical.is_empty() && self.skills.soft.is_empty()
            }
            SectionId::Certifications => self.certifications.is_empty(),
            SectionId::Languages => self.languages.is_empty(),
            SectionId::Projects => self.projects.is_empty(),
            SectionId::Custom(key) => match self.custom_sections.get(key) {
                Some(section) => section.items.iter().all(|item| item.trim().is_empty()),
                None => true,
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Personal header
// ────────────────────────────────────────────────────────────────────────────

/// Contact block. All fields are free-form strings; `full_name`, `email`,
/// and `phone` must be non-blank before export is allowed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Personal {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub portfolio: String,
    pub summary: String,
}

impl Personal {
    /// The centered contact line under the name: non-empty fields joined by
    /// `" | "`, in the order location, email, phone, linkedin.
    pub fn contact_line(&self) -> String {
        [&self.location, &self.email, &self.phone, &self.linkedin]
            .into_iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section entry types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// May contain blank strings while the form is mid-edit; renderers
    /// filter those out.
    pub responsibilities: Vec<String>,
}

impl Default for Experience {
    fn default() -> Self {
        Experience {
            id: Uuid::new_v4(),
            title: String::new(),
            company: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            // The form seeds one empty bullet so the user has a row to type in.
            responsibilities: vec![String::new()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub gpa: String,
    pub start_date: String,
    pub end_date: String,
}

impl Default for Education {
    fn default() -> Self {
        Education {
            id: Uuid::new_v4(),
            degree: String::new(),
            institution: String::new(),
            location: String::new(),
            gpa: String::new(),
            start_date: String::new(),
            end_date: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub technologies: String,
    /// Free text. A newline-containing description renders as one bullet per
    /// line; a single-line description renders as a wrapped paragraph.
    pub description: String,
    pub link: String,
}

impl Default for Project {
    fn default() -> Self {
        Project {
            id: Uuid::new_v4(),
            name: String::new(),
            technologies: String::new(),
            description: String::new(),
            link: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    pub date: String,
}

impl Default for Certification {
    fn default() -> Self {
        Certification {
            id: Uuid::new_v4(),
            name: String::new(),
            issuer: String::new(),
            date: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageSkill {
    pub language: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
}

/// A user-defined section: a title plus free-form bullet items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomSection {
    pub title: String,
    pub items: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
