//! Single update entry point for the canonical resume.
//!
//! Every edit is a [`Command`] reduced against the current snapshot into a
//! fresh value; readers only ever observe complete snapshots, never a
//! half-applied edit. The [`Store`] wrapper pairs the snapshot with a
//! monotonic revision so consumers (preview remeasure, autosave hooks) can
//! detect change without diffing, and structural no-ops — unknown entry
//! ids, moving a section onto itself — leave the revision untouched.

use tracing::debug;
use uuid::Uuid;

use crate::model::{
    move_section, Certification, CustomSection, Education, Experience, LanguageSkill, Project,
    Resume, SectionId, Skills,
};

// ────────────────────────────────────────────────────────────────────────────
// Commands
// ────────────────────────────────────────────────────────────────────────────

/// A single field on the personal block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Location,
    Linkedin,
    Portfolio,
    Summary,
}

/// Partial update for an experience entry; `None` fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct ExperiencePatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub responsibilities: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct EducationPatch {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub location: Option<String>,
    pub gpa: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub technologies: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CertificationPatch {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LanguagePatch {
    pub language: Option<String>,
    pub proficiency: Option<String>,
}

/// Every way the resume can change.
///
/// Entry updates are keyed by the entry's stable id; languages carry no id
/// in the schema, so their commands address by position instead.
#[derive(Debug, Clone)]
pub enum Command {
    /// Swap in a whole new resume. This is the import path: the aggregate
    /// is replaced atomically, never merged field-by-field.
    Replace(Box<Resume>),
    SetPersonal { field: PersonalField, value: String },
    SetSkills(Skills),

    AddExperience(Experience),
    UpdateExperience { id: Uuid, patch: ExperiencePatch },
    RemoveExperience { id: Uuid },

    AddEducation(Education),
    UpdateEducation { id: Uuid, patch: EducationPatch },
    RemoveEducation { id: Uuid },

    AddProject(Project),
    UpdateProject { id: Uuid, patch: ProjectPatch },
    RemoveProject { id: Uuid },

    AddCertification(Certification),
    UpdateCertification { id: Uuid, patch: CertificationPatch },
    RemoveCertification { id: Uuid },

    AddLanguage(LanguageSkill),
    UpdateLanguage { index: usize, patch: LanguagePatch },
    RemoveLanguage { index: usize },

    MoveSection { from: SectionId, to: SectionId },
    /// Mints a fresh `custom-…` id, appends it to the order, and creates an
    /// empty titled section under it.
    AddCustomSection { title: String },
    RenameCustomSection { id: String, title: String },
    SetCustomItems { id: String, items: Vec<String> },
    /// Drops the section from the order; a custom section also loses its
    /// `customSections` entry.
    RemoveSection(SectionId),
}

// ────────────────────────────────────────────────────────────────────────────
// Reducer
// ────────────────────────────────────────────────────────────────────────────

fn patch<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}

/// Produces the next snapshot, or `None` when the command changes nothing
/// (unknown id or index, no-op move, dangling custom-section reference).
pub fn reduce(resume: &Resume, command: &Command) -> Option<Resume> {
    match command {
        Command::Replace(next) => Some((**next).clone()),

        Command::SetPersonal { field, value } => {
            let mut next = resume.clone();
            let slot = match field {
                PersonalField::FullName => &mut next.personal.full_name,
                PersonalField::Email => &mut next.personal.email,
                PersonalField::Phone => &mut next.personal.phone,
                PersonalField::Location => &mut next.personal.location,
                PersonalField::Linkedin => &mut next.personal.linkedin,
                PersonalField::Portfolio => &mut next.personal.portfolio,
                PersonalField::Summary => &mut next.personal.summary,
            };
            *slot = value.clone();
            Some(next)
        }

        Command::SetSkills(skills) => {
            let mut next = resume.clone();
            next.skills = skills.clone();
            Some(next)
        }

        Command::AddExperience(entry) => {
            let mut next = resume.clone();
            next.experience.push(entry.clone());
            Some(next)
        }
        Command::UpdateExperience { id, patch: p } => {
            let i = resume.experience.iter().position(|e| e.id == *id)?;
            let mut next = resume.clone();
            let entry = &mut next.experience[i];
            patch(&mut entry.title, &p.title);
            patch(&mut entry.company, &p.company);
            patch(&mut entry.location, &p.location);
            patch(&mut entry.start_date, &p.start_date);
            patch(&mut entry.end_date, &p.end_date);
            patch(&mut entry.responsibilities, &p.responsibilities);
            Some(next)
        }
        Command::RemoveExperience { id } => {
            let i = resume.experience.iter().position(|e| e.id == *id)?;
            let mut next = resume.clone();
            next.experience.remove(i);
            Some(next)
        }

        Command::AddEducation(entry) => {
            let mut next = resume.clone();
            next.education.push(entry.clone());
            Some(next)
        }
        Command::UpdateEducation { id, patch: p } => {
            let i = resume.education.iter().position(|e| e.id == *id)?;
            let mut next = resume.clone();
            let entry = &mut next.education[i];
            patch(&mut entry.degree, &p.degree);
            patch(&mut entry.institution, &p.institution);
            patch(&mut entry.location, &p.location);
            patch(&mut entry.gpa, &p.gpa);
            patch(&mut entry.start_date, &p.start_date);
            patch(&mut entry.end_date, &p.end_date);
            Some(next)
        }
        Command::RemoveEducation { id } => {
            let i = resume.education.iter().position(|e| e.id == *id)?;
            let mut next = resume.clone();
            next.education.remove(i);
            Some(next)
        }

        Command::AddProject(entry) => {
            let mut next = resume.clone();
            next.projects.push(entry.clone());
            Some(next)
        }
        Command::UpdateProject { id, patch: p } => {
            let i = resume.projects.iter().position(|e| e.id == *id)?;
            let mut next = resume.clone();
            let entry = &mut next.projects[i];
            patch(&mut entry.name, &p.name);
            patch(&mut entry.technologies, &p.technologies);
            patch(&mut entry.description, &p.description);
            patch(&mut entry.link, &p.link);
            Some(next)
        }
        Command::RemoveProject { id } => {
            let i = resume.projects.iter().position(|e| e.id == *id)?;
            let mut next = resume.clone();
            next.projects.remove(i);
            Some(next)
        }

        Command::AddCertification(entry) => {
            let mut next = resume.clone();
            next.certifications.push(entry.clone());
            Some(next)
        }
        Command::UpdateCertification { id, patch: p } => {
            let i = resume.certifications.iter().position(|e| e.id == *id)?;
            let mut next = resume.clone();
            let entry = &mut next.certifications[i];
            patch(&mut entry.name, &p.name);
            patch(&mut entry.issuer, &p.issuer);
            patch(&mut entry.date, &p.date);
            Some(next)
        }
        Command::RemoveCertification { id } => {
            let i = resume.certifications.iter().position(|e| e.id == *id)?;
            let mut next = resume.clone();
            next.certifications.remove(i);
            Some(next)
        }

        Command::AddLanguage(entry) => {
            let mut next = resume.clone();
            next.languages.push(entry.clone());
            Some(next)
        }
        Command::UpdateLanguage { index, patch: p } => {
            if *index >= resume.languages.len() {
                return None;
            }
            let mut next = resume.clone();
            let entry = &mut next.languages[*index];
            patch(&mut entry.language, &p.language);
            patch(&mut entry.proficiency, &p.proficiency);
            Some(next)
        }
        Command::RemoveLanguage { index } => {
            if *index >= resume.languages.len() {
                return None;
            }
            let mut next = resume.clone();
            next.languages.remove(*index);
            Some(next)
        }

        Command::MoveSection { from, to } => {
            let mut order = resume.section_order.clone();
            if !move_section(&mut order, from, to) {
                return None;
            }
            let mut next = resume.clone();
            next.section_order = order;
            Some(next)
        }

        Command::AddCustomSection { title } => {
            let id = SectionId::new_custom();
            let mut next = resume.clone();
            next.custom_sections.insert(
                id.as_str().to_string(),
                CustomSection {
                    title: title.clone(),
                    items: Vec::new(),
                },
            );
            next.section_order.push(id);
            Some(next)
        }

        Command::RenameCustomSection { id, title } => {
            if !resume.custom_sections.contains_key(id) {
                return None;
            }
            let mut next = resume.clone();
            if let Some(section) = next.custom_sections.get_mut(id) {
                section.title = title.clone();
            }
            Some(next)
        }

        Command::SetCustomItems { id, items } => {
            if !resume.custom_sections.contains_key(id) {
                return None;
            }
            let mut next = resume.clone();
            if let Some(section) = next.custom_sections.get_mut(id) {
                section.items = items.clone();
            }
            Some(next)
        }

        Command::RemoveSection(id) => {
            let in_order = resume.section_order.iter().position(|s| s == id);
            let in_map = match id {
                SectionId::Custom(key) => resume.custom_sections.contains_key(key),
                _ => false,
            };
            if in_order.is_none() && !in_map {
                return None;
            }
            let mut next = resume.clone();
            if let Some(i) = in_order {
                next.section_order.remove(i);
            }
            if let SectionId::Custom(key) = id {
                next.custom_sections.remove(key);
            }
            Some(next)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

/// Current snapshot plus a monotonically increasing revision.
#[derive(Debug, Default)]
pub struct Store {
    current: Resume,
    revision: u64,
}

impl Store {
    pub fn new(resume: Resume) -> Self {
        Store {
            current: resume,
            revision: 0,
        }
    }

    pub fn resume(&self) -> &Resume {
        &self.current
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies the command and reports whether the snapshot changed.
    pub fn dispatch(&mut self, command: Command) -> bool {
        match reduce(&self.current, &command) {
            Some(next) => {
                self.current = next;
                self.revision += 1;
                debug!(revision = self.revision, "resume snapshot advanced");
                true
            }
            None => false,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
