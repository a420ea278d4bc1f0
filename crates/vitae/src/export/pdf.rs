//! A4 PDF generator: walks the shared block sequence with a millimetre
//! cursor and emits one content stream per page.
//!
//! The layout is fully deterministic: text is wrapped with the same metric
//! tables the preview measurer uses, so a page break computed here lands on
//! the same content boundary the preview predicted. Pages use the three
//! standard Times faces with WinAnsi encoding, which keeps the file free of
//! embedded fonts and safe for the typographic punctuation (en dashes,
//! bullets) the block builder produces.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use tracing::warn;

use crate::errors::Result;
use crate::layout::blocks::{build_blocks, Block, Emphasis};
use crate::layout::font_metrics::{get_metrics, Font, FontMetricTable};
use crate::model::Resume;

// ────────────────────────────────────────────────────────────────────────────
// Geometry and type scale
// ────────────────────────────────────────────────────────────────────────────

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

const PT_PER_MM: f32 = 72.0 / 25.4;

const NAME_PT: f32 = 18.0;
const CONTACT_PT: f32 = 9.0;
const HEADER_PT: f32 = 12.0;
const BODY_PT: f32 = 11.0;
const SMALL_PT: f32 = 9.0;

const NAME_ADVANCE_MM: f32 = 8.0;
const CONTACT_ADVANCE_MM: f32 = 8.0;
const HEADER_ADVANCE_MM: f32 = 6.0;
const ROW_ADVANCE_MM: f32 = 5.0;
const SMALL_ADVANCE_MM: f32 = 4.0;
/// Wrapped body lines advance 0.35 mm per point of font size.
const LINE_FACTOR_MM_PER_PT: f32 = 0.35;

const RULE_WIDTH_MM: f32 = 0.5;
const BULLET_GLYPH_INDENT_MM: f32 = 2.0;
const BULLET_TEXT_INDENT_MM: f32 = 6.0;

/// #003366, the accent used for the name and section headers.
const ACCENT_RGB: (f32, f32, f32) = (0.0, 0.2, 0.4);
const BLACK_RGB: (f32, f32, f32) = (0.0, 0.0, 0.0);

// ────────────────────────────────────────────────────────────────────────────
// Faces and measurement
// ────────────────────────────────────────────────────────────────────────────

/// The three Type1 faces registered in every page's resource dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Regular,
    Bold,
    Italic,
}

impl Face {
    fn resource_name(self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
            Face::Italic => "F3",
        }
    }

    fn metrics(self) -> &'static FontMetricTable {
        match self {
            Face::Regular => get_metrics(Font::TimesRoman),
            Face::Bold => get_metrics(Font::TimesBold),
            Face::Italic => get_metrics(Font::TimesItalic),
        }
    }
}

fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Rendered width of `s` in millimetres at `size_pt`.
fn text_width_mm(face: Face, size_pt: f32, s: &str) -> f32 {
    face.metrics().measure_str(s) * size_pt / PT_PER_MM
}

/// Word-wraps `s` into lines that fit `width_mm` at `size_pt`.
fn wrap_lines(face: Face, size_pt: f32, width_mm: f32, s: &str) -> Vec<String> {
    face.metrics().wrap(s, mm_to_pt(width_mm) / size_pt)
}

/// Transcodes to WinAnsi so typographic punctuation survives the standard
/// Times faces. Characters without a WinAnsi slot degrade to `?`.
fn encode_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{2013}' => 0x96, // en dash
            '\u{2014}' => 0x97, // em dash
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95, // bullet
            '\u{2026}' => 0x85, // ellipsis
            c if (c as u32) < 0x100 => c as u8,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Page composition
// ────────────────────────────────────────────────────────────────────────────

/// Millimetre cursor over a growing list of page content streams.
///
/// `ensure_room` runs the uniform break rule: a block that would cross the
/// bottom margin starts a new page instead. Gaps bypass the check entirely,
/// so trailing space at the bottom of a page is swallowed rather than
/// spilling onto a fresh one.
struct Composer {
    done: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    y: f32,
}

impl Composer {
    fn new() -> Self {
        Composer {
            done: Vec::new(),
            ops: Vec::new(),
            y: MARGIN_MM,
        }
    }

    fn ensure_room(&mut self, height_mm: f32) {
        if self.y + height_mm <= PAGE_HEIGHT_MM - MARGIN_MM {
            return;
        }
        if !self.ops.is_empty() {
            self.done.push(std::mem::take(&mut self.ops));
        }
        self.y = MARGIN_MM;
        if self.y + height_mm > PAGE_HEIGHT_MM - MARGIN_MM {
            warn!(height_mm, "block taller than one page, it will overrun the bottom margin");
        }
    }

    /// Draws one line of text with its baseline `baseline_mm` below the top
    /// edge. PDF's origin is bottom-left, so the vertical flip happens here.
    fn text(
        &mut self,
        x_mm: f32,
        baseline_mm: f32,
        face: Face,
        size_pt: f32,
        color: (f32, f32, f32),
        s: &str,
    ) {
        let (r, g, b) = color;
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![face.resource_name().into(), size_pt.into()],
        ));
        self.ops
            .push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        self.ops.push(Operation::new(
            "Td",
            vec![
                mm_to_pt(x_mm).into(),
                mm_to_pt(PAGE_HEIGHT_MM - baseline_mm).into(),
            ],
        ));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(s), StringFormat::Literal)],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// Accent-colored rule across the content width at `y_mm` below the top.
    fn rule(&mut self, y_mm: f32) {
        let (r, g, b) = ACCENT_RGB;
        let y = mm_to_pt(PAGE_HEIGHT_MM - y_mm);
        self.ops
            .push(Operation::new("w", vec![mm_to_pt(RULE_WIDTH_MM).into()]));
        self.ops
            .push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
        self.ops
            .push(Operation::new("m", vec![mm_to_pt(MARGIN_MM).into(), y.into()]));
        self.ops.push(Operation::new(
            "l",
            vec![mm_to_pt(PAGE_WIDTH_MM - MARGIN_MM).into(), y.into()],
        ));
        self.ops.push(Operation::new("S", vec![]));
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.done.push(self.ops);
        self.done
    }
}

/// Text centered on the page, clamped so an overlong line still starts
/// inside the left margin.
fn centered_x(face: Face, size_pt: f32, s: &str) -> f32 {
    ((PAGE_WIDTH_MM - text_width_mm(face, size_pt, s)) / 2.0).max(MARGIN_MM)
}

fn render_block(c: &mut Composer, block: &Block) {
    match block {
        Block::Name(text) => {
            c.ensure_room(NAME_ADVANCE_MM);
            let baseline = c.y + NAME_ADVANCE_MM;
            c.text(
                centered_x(Face::Bold, NAME_PT, text),
                baseline,
                Face::Bold,
                NAME_PT,
                ACCENT_RGB,
                text,
            );
            c.y += NAME_ADVANCE_MM;
        }
        Block::Contact(text) => {
            c.ensure_room(CONTACT_ADVANCE_MM);
            let baseline = c.y + CONTACT_ADVANCE_MM;
            c.text(
                centered_x(Face::Regular, CONTACT_PT, text),
                baseline,
                Face::Regular,
                CONTACT_PT,
                BLACK_RGB,
                text,
            );
            c.y += CONTACT_ADVANCE_MM;
        }
        Block::SectionHeader(title) => {
            c.ensure_room(HEADER_ADVANCE_MM);
            // The rule sits one millimetre under the baseline, flush with
            // the bottom of the header band.
            let baseline = c.y + HEADER_ADVANCE_MM - 1.0;
            c.text(MARGIN_MM, baseline, Face::Bold, HEADER_PT, ACCENT_RGB, title);
            c.rule(baseline + 1.0);
            c.y += HEADER_ADVANCE_MM;
        }
        Block::EntryHeading(text) => {
            c.ensure_room(ROW_ADVANCE_MM);
            let baseline = c.y + ROW_ADVANCE_MM;
            c.text(MARGIN_MM, baseline, Face::Bold, BODY_PT, BLACK_RGB, text);
            c.y += ROW_ADVANCE_MM;
        }
        Block::DetailLine(text) => {
            c.ensure_room(ROW_ADVANCE_MM);
            let baseline = c.y + ROW_ADVANCE_MM;
            c.text(MARGIN_MM, baseline, Face::Regular, BODY_PT, BLACK_RGB, text);
            c.y += ROW_ADVANCE_MM;
        }
        Block::SplitRow {
            left,
            right,
            emphasis,
        } => {
            c.ensure_room(ROW_ADVANCE_MM);
            let baseline = c.y + ROW_ADVANCE_MM;
            let face = match emphasis {
                Emphasis::Bold => Face::Bold,
                Emphasis::Italic => Face::Italic,
            };
            c.text(MARGIN_MM, baseline, face, BODY_PT, BLACK_RGB, left);
            if let Some(right) = right {
                let x = PAGE_WIDTH_MM - MARGIN_MM - text_width_mm(Face::Regular, BODY_PT, right);
                c.text(x, baseline, Face::Regular, BODY_PT, BLACK_RGB, right);
            }
            c.y += ROW_ADVANCE_MM;
        }
        Block::Bullet {
            text,
            line_advance_mm,
        } => {
            let lines = wrap_lines(
                Face::Regular,
                BODY_PT,
                CONTENT_WIDTH_MM - BULLET_TEXT_INDENT_MM,
                text,
            );
            c.ensure_room(lines.len().max(1) as f32 * line_advance_mm);
            for (i, line) in lines.iter().enumerate() {
                let baseline = c.y + (i + 1) as f32 * line_advance_mm;
                if i == 0 {
                    c.text(
                        MARGIN_MM + BULLET_GLYPH_INDENT_MM,
                        baseline,
                        Face::Regular,
                        BODY_PT,
                        BLACK_RGB,
                        "\u{2022}",
                    );
                }
                c.text(
                    MARGIN_MM + BULLET_TEXT_INDENT_MM,
                    baseline,
                    Face::Regular,
                    BODY_PT,
                    BLACK_RGB,
                    line,
                );
            }
            c.y += lines.len().max(1) as f32 * line_advance_mm;
        }
        Block::SmallLine(text) => {
            c.ensure_room(SMALL_ADVANCE_MM);
            let baseline = c.y + SMALL_ADVANCE_MM;
            c.text(MARGIN_MM, baseline, Face::Regular, SMALL_PT, BLACK_RGB, text);
            c.y += SMALL_ADVANCE_MM;
        }
        Block::Paragraph {
            text,
            italic,
            gap_after_mm,
        } => {
            let face = if *italic { Face::Italic } else { Face::Regular };
            let lines = wrap_lines(face, BODY_PT, CONTENT_WIDTH_MM, text);
            let advance = BODY_PT * LINE_FACTOR_MM_PER_PT;
            c.ensure_room(lines.len().max(1) as f32 * advance + gap_after_mm);
            for (i, line) in lines.iter().enumerate() {
                let baseline = c.y + (i + 1) as f32 * advance;
                c.text(MARGIN_MM, baseline, face, BODY_PT, BLACK_RGB, line);
            }
            c.y += lines.len().max(1) as f32 * advance + gap_after_mm;
        }
        Block::Gap(mm) => {
            c.y += mm;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document assembly
// ────────────────────────────────────────────────────────────────────────────

/// Renders the resume into a finished PDF file body.
///
/// The export precondition gate runs upstream; this function lays out
/// whatever it is given, including an all-empty resume (one blank-ish page).
pub fn render(resume: &Resume) -> Result<Vec<u8>> {
    let mut composer = Composer::new();
    for block in &build_blocks(resume) {
        render_block(&mut composer, block);
    }
    let pages = composer.finish();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Roman",
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let font_italic = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Italic",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_regular,
            "F2" => font_bold,
            "F3" => font_italic,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let encoded = Content { operations }.encode()?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                mm_to_pt(PAGE_WIDTH_MM).into(),
                mm_to_pt(PAGE_HEIGHT_MM).into(),
            ],
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal("vitae"),
        "CreationDate" => Object::string_literal(
            Utc::now().format("D:%Y%m%d%H%M%SZ").to_string(),
        ),
    });
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(lopdf::Error::from)?;
    Ok(bytes)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Certification, CustomSection, Experience, LanguageSkill, Resume};

    fn make_resume() -> Resume {
        let mut resume = Resume::default();
        resume.personal.full_name = "Jane Doe".to_string();
        resume.personal.email = "jane@example.com".to_string();
        resume.personal.phone = "555-123-4567".to_string();
        resume.experience.push(Experience {
            title: "Senior Engineer".to_string(),
            company: "Acme Corp".to_string(),
            location: "Remote".to_string(),
            start_date: "2019".to_string(),
            end_date: "2022".to_string(),
            responsibilities: vec!["Built the ingestion platform".to_string()],
            ..Default::default()
        });
        resume
    }

    fn page_count(bytes: &[u8]) -> usize {
        Document::load_mem(bytes)
            .expect("generated PDF should parse")
            .get_pages()
            .len()
    }

    // ── WinAnsi transcoding ─────────────────────────────────────────────────

    #[test]
    fn test_win_ansi_passes_ascii_through() {
        assert_eq!(encode_win_ansi("Acme Corp"), b"Acme Corp".to_vec());
    }

    #[test]
    fn test_win_ansi_maps_typographic_punctuation() {
        assert_eq!(encode_win_ansi("2019 \u{2013} 2022"), b"2019 \x96 2022".to_vec());
        assert_eq!(encode_win_ansi("\u{2022}"), vec![0x95]);
        assert_eq!(encode_win_ansi("\u{2014}"), vec![0x97]);
    }

    #[test]
    fn test_win_ansi_degrades_unmapped_chars() {
        assert_eq!(encode_win_ansi("\u{4F60}\u{597D}"), b"??".to_vec());
        // Latin-1 accents survive untouched.
        assert_eq!(encode_win_ansi("r\u{E9}sum\u{E9}"), b"r\xE9sum\xE9".to_vec());
    }

    // ── Measurement helpers ─────────────────────────────────────────────────

    #[test]
    fn test_text_width_matches_metric_table() {
        // "Rust" in Times-Roman is 1.834 em: 18.34 pt at 10 pt, 6.47 mm.
        let width = text_width_mm(Face::Regular, 10.0, "Rust");
        assert!(
            (width - 6.470).abs() < 0.01,
            "expected ~6.47 mm, got {width}"
        );
    }

    #[test]
    fn test_centered_x_clamps_to_margin() {
        let long = "x".repeat(400);
        assert_eq!(centered_x(Face::Bold, NAME_PT, &long), MARGIN_MM);
    }

    // ── Whole-document rendering ────────────────────────────────────────────

    #[test]
    fn test_small_resume_renders_one_loadable_page() {
        let bytes = render(&make_resume()).unwrap();
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_empty_resume_still_renders_one_page() {
        let bytes = render(&Resume::default()).unwrap();
        assert_eq!(page_count(&bytes), 1, "zero content is one page, not zero");
    }

    #[test]
    fn test_all_sections_render() {
        let mut resume = make_resume();
        resume.personal.summary = "Engineer with a decade of storage work.".to_string();
        resume.skills.technical = vec!["Rust".to_string(), "PostgreSQL".to_string()];
        resume.skills.soft = vec!["Mentoring".to_string()];
        resume.certifications.push(Certification {
            name: "AWS Certified".to_string(),
            issuer: "Amazon".to_string(),
            date: "2021".to_string(),
            ..Default::default()
        });
        resume.languages.push(LanguageSkill {
            language: "Spanish".to_string(),
            proficiency: "Fluent".to_string(),
        });
        resume.custom_sections.insert(
            "custom-awards".to_string(),
            CustomSection {
                title: "Awards".to_string(),
                items: vec!["Dean's list".to_string()],
            },
        );
        resume
            .section_order
            .push(crate::model::SectionId::Custom("custom-awards".to_string()));

        let bytes = render(&resume).unwrap();
        assert_eq!(page_count(&bytes), 1);
    }

    // ── Page breaking ───────────────────────────────────────────────────────

    #[test]
    fn test_overflowing_bullet_opens_a_second_page() {
        // 15 (top margin) + 8 (name) + 8 (contact) + 6 (section header)
        // + 5 (company) + 5 (title row) = 47 mm before the first bullet.
        // One-line bullets advance 4 mm against a 282 mm floor, so bullet 59
        // is the first that no longer fits.
        let mut resume = make_resume();
        resume.experience[0].responsibilities =
            (0..58).map(|i| format!("Item {i}")).collect();
        let bytes = render(&resume).unwrap();
        assert_eq!(page_count(&bytes), 1, "58 one-line bullets fill page one");

        resume.experience[0]
            .responsibilities
            .push("Item 58".to_string());
        let bytes = render(&resume).unwrap();
        assert_eq!(page_count(&bytes), 2, "bullet 59 must open a second page");
    }

    #[test]
    fn test_wrapped_bullet_moves_to_the_next_page_whole() {
        // 57 short bullets leave 7 mm of room; a bullet wrapping to three or
        // more lines needs at least 12 mm, so the entire bullet (marker plus
        // every wrapped line) must land on page two.
        let long = "Owned the end to end delivery of the customer facing ingestion \
                    pipeline, including schema evolution and migration tooling, cross \
                    region replication and failover drills, capacity planning for the \
                    storage tier, and the on call runbooks that kept weekly incident \
                    load inside the agreed error budget";
        let wrapped = wrap_lines(
            Face::Regular,
            BODY_PT,
            CONTENT_WIDTH_MM - BULLET_TEXT_INDENT_MM,
            long,
        );
        assert!(wrapped.len() >= 3, "fixture should wrap to at least 3 lines");

        let mut resume = make_resume();
        resume.experience[0].responsibilities =
            (0..57).map(|i| format!("Item {i}")).collect();
        resume.experience[0].responsibilities.push(long.to_string());

        let bytes = render(&resume).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 2);

        // Page two holds exactly the moved bullet: its marker glyph plus one
        // Tj per wrapped line.
        let content = Content::decode(&doc.get_page_content(pages[&2]).unwrap()).unwrap();
        let tj_count = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .count();
        assert_eq!(
            tj_count,
            wrapped.len() + 1,
            "the wrapped bullet must not split across the page boundary"
        );
    }

    #[test]
    fn test_many_entries_paginate() {
        // Each entry is 5 + 5 + 3×4 + 3 = 25 mm. Ten entries overshoot one
        // page's 267 mm of writable height and stay inside two.
        let mut resume = make_resume();
        resume.experience = (0..10)
            .map(|i| Experience {
                title: format!("Engineer {i}"),
                company: format!("Company {i}"),
                start_date: "2019".to_string(),
                end_date: "2022".to_string(),
                responsibilities: vec![
                    "Shipped the rewrite".to_string(),
                    "Ran the on call rotation".to_string(),
                    "Mentored two juniors".to_string(),
                ],
                ..Default::default()
            })
            .collect();

        let bytes = render(&resume).unwrap();
        assert_eq!(page_count(&bytes), 2);
    }
}
