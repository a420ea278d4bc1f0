//! Canonical data model shared by the normalizer, store, and renderers.

pub mod resume;
pub mod sections;

pub use resume::{
    Certification, CustomSection, Education, Experience, LanguageSkill, Personal, Project,
    Resume, Skills,
};
pub use sections::{default_section_order, move_section, SectionId};
