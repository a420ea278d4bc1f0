//! Flattens a [`Resume`] into the ordered block sequence both renderers
//! consume.
//!
//! The preview measurer and the PDF generator must agree on what content
//! exists and in what order, or a page boundary computed on screen lands
//! somewhere else in the exported document. Building that order in exactly
//! one place is how the two stay in sync: renderers only decide geometry,
//! never content.
//!
//! Advances and gaps carried on blocks are in millimetres, the export unit;
//! the preview measurer converts to pixels at 96 dpi.

use crate::model::{Resume, SectionId};

/// One renderable unit. A block is the atomic pagination unit: it is placed
/// entirely on one page, never split across a boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Full name, largest face, centered.
    Name(String),
    /// Contact line under the name, small face, centered.
    Contact(String),
    /// Upper-cased section title with a rule beneath it.
    SectionHeader(String),
    /// Bold single line that never wraps (company, institution row lead,
    /// project name).
    EntryHeading(String),
    /// Regular single line that never wraps (institution + location).
    DetailLine(String),
    /// Left text with an optional right-aligned date range on the same row.
    SplitRow {
        left: String,
        right: Option<String>,
        emphasis: Emphasis,
    },
    /// Indented bullet with word-wrapped text. `line_advance_mm` is the
    /// vertical advance per wrapped line (4 mm for responsibility-style
    /// bullets, 5 mm for certification-style ones).
    Bullet { text: String, line_advance_mm: f32 },
    /// Small-face single line (GPA, project link).
    SmallLine(String),
    /// Word-wrapped body text followed by a fixed gap.
    Paragraph {
        text: String,
        italic: bool,
        gap_after_mm: f32,
    },
    /// Pure vertical space. Exempt from page-break checks: a gap at the
    /// bottom of a page is simply swallowed.
    Gap(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Bold,
    Italic,
}

/// `start – end`, with an empty end date standing in for the present.
pub fn format_date_range(start: &str, end: &str) -> String {
    let end = if end.is_empty() { "Present" } else { end };
    format!("{start} – {end}")
}

/// Builds the full block sequence: personal header, summary, then every
/// section in `sectionOrder`, skipping sections with nothing to render.
pub fn build_blocks(resume: &Resume) -> Vec<Block> {
    let mut blocks = vec![
        Block::Name(resume.personal.full_name.clone()),
        Block::Contact(resume.personal.contact_line()),
    ];

    if !resume.personal.summary.trim().is_empty() {
        blocks.push(header("Professional Summary"));
        blocks.push(Block::Paragraph {
            text: resume.personal.summary.clone(),
            italic: false,
            gap_after_mm: 4.0,
        });
    }

    for id in &resume.section_order {
        if resume.section_is_empty(id) {
            continue;
        }
        match id {
            SectionId::Skills => push_skills(resume, &mut blocks),
            SectionId::Experience => push_experience(resume, &mut blocks),
            SectionId::Education => push_education(resume, &mut blocks),
            SectionId::Projects => push_projects(resume, &mut blocks),
            SectionId::Certifications => push_certifications(resume, &mut blocks),
            SectionId::Languages => push_languages(resume, &mut blocks),
            SectionId::Custom(key) => push_custom(resume, key, &mut blocks),
        }
    }
    blocks
}

fn header(title: &str) -> Block {
    Block::SectionHeader(title.to_uppercase())
}

fn push_skills(resume: &Resume, blocks: &mut Vec<Block>) {
    blocks.push(header("Core Competencies"));
    if !resume.skills.technical.is_empty() {
        blocks.push(Block::Paragraph {
            text: format!("Technical Skills: {}", resume.skills.technical.join(", ")),
            italic: false,
            gap_after_mm: 2.0,
        });
    }
    if !resume.skills.soft.is_empty() {
        blocks.push(Block::Paragraph {
            text: format!("Soft Skills: {}", resume.skills.soft.join(", ")),
            italic: false,
            gap_after_mm: 2.0,
        });
    }
    blocks.push(Block::Gap(2.0));
}

fn push_experience(resume: &Resume, blocks: &mut Vec<Block>) {
    blocks.push(header("Professional Experience"));
    for entry in &resume.experience {
        let mut company = entry.company.clone();
        if !entry.location.is_empty() {
            company.push_str(" — ");
            company.push_str(&entry.location);
        }
        blocks.push(Block::EntryHeading(company));
        blocks.push(Block::SplitRow {
            left: entry.title.clone(),
            right: Some(format_date_range(&entry.start_date, &entry.end_date)),
            emphasis: Emphasis::Italic,
        });
        for item in &entry.responsibilities {
            if item.trim().is_empty() {
                continue;
            }
            blocks.push(Block::Bullet {
                text: item.clone(),
                line_advance_mm: 4.0,
            });
        }
        blocks.push(Block::Gap(3.0));
    }
}

fn push_education(resume: &Resume, blocks: &mut Vec<Block>) {
    blocks.push(header("Education"));
    for entry in &resume.education {
        // The date range only shows when both ends are known.
        let dates = if !entry.start_date.is_empty() && !entry.end_date.is_empty() {
            Some(format!("{} – {}", entry.start_date, entry.end_date))
        } else {
            None
        };
        blocks.push(Block::SplitRow {
            left: entry.degree.clone(),
            right: dates,
            emphasis: Emphasis::Bold,
        });
        let mut institution = entry.institution.clone();
        if !entry.location.is_empty() {
            institution.push_str(", ");
            institution.push_str(&entry.location);
        }
        blocks.push(Block::DetailLine(institution));
        if !entry.gpa.is_empty() {
            blocks.push(Block::SmallLine(format!("GPA: {}", entry.gpa)));
        }
        blocks.push(Block::Gap(2.0));
    }
}

fn push_projects(resume: &Resume, blocks: &mut Vec<Block>) {
    blocks.push(header("Projects"));
    for entry in &resume.projects {
        blocks.push(Block::EntryHeading(entry.name.clone()));
        if !entry.technologies.is_empty() {
            blocks.push(Block::Paragraph {
                text: format!("Technologies: {}", entry.technologies),
                italic: true,
                gap_after_mm: 2.0,
            });
        }
        if entry.description.contains('\n') {
            for line in entry.description.lines() {
                if line.trim().is_empty() {
                    continue;
                }
                blocks.push(Block::Bullet {
                    text: line.trim().to_string(),
                    line_advance_mm: 4.0,
                });
            }
            blocks.push(Block::Gap(2.0));
        } else if !entry.description.trim().is_empty() {
            blocks.push(Block::Paragraph {
                text: entry.description.clone(),
                italic: false,
                gap_after_mm: 3.0,
            });
        }
        if !entry.link.is_empty() {
            blocks.push(Block::SmallLine(entry.link.clone()));
        }
    }
}

fn push_certifications(resume: &Resume, blocks: &mut Vec<Block>) {
    blocks.push(header("Certifications"));
    for entry in &resume.certifications {
        let mut text = entry.name.clone();
        if !entry.issuer.is_empty() {
            text.push_str(" — ");
            text.push_str(&entry.issuer);
        }
        if !entry.date.is_empty() {
            text.push_str(&format!(" ({})", entry.date));
        }
        blocks.push(Block::Bullet {
            text,
            line_advance_mm: 5.0,
        });
    }
}

fn push_languages(resume: &Resume, blocks: &mut Vec<Block>) {
    blocks.push(header("Languages"));
    for entry in &resume.languages {
        if entry.language.trim().is_empty() {
            continue;
        }
        let text = if entry.proficiency.is_empty() {
            entry.language.clone()
        } else {
            format!("{} — {}", entry.language, entry.proficiency)
        };
        blocks.push(Block::Bullet {
            text,
            line_advance_mm: 5.0,
        });
    }
}

fn push_custom(resume: &Resume, key: &str, blocks: &mut Vec<Block>) {
    // Emptiness (including dangling keys) was already checked by the caller.
    let Some(section) = resume.custom_sections.get(key) else {
        return;
    };
    blocks.push(header(&section.title));
    for item in &section.items {
        if item.trim().is_empty() {
            continue;
        }
        blocks.push(Block::Bullet {
            text: item.clone(),
            line_advance_mm: 4.0,
        });
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
