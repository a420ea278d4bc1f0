//! Regex-based extraction of resume fields from raw document text.
//!
//! This is the fallback path when no AI oracle is available: a best-effort
//! scan producing deliberately degraded output. Every step is optional and
//! independent, so [`TextScan`] keeps each field as an `Option` — `None`
//! means the scan found nothing, which is distinct from a field the user
//! left genuinely blank. Nothing in here ever fails; missing structure just
//! yields absent fields.

use regex::Regex;

use crate::model::{Education, Experience, Resume};

const SKILLS_HEADERS: [&str; 4] = ["skills", "technical skills", "core competencies", "expertise"];
const EXPERIENCE_HEADERS: [&str; 4] = [
    "experience",
    "work experience",
    "employment",
    "professional experience",
];
const EDUCATION_HEADERS: [&str; 3] = ["education", "academic background", "qualifications"];
const SUMMARY_HEADERS: [&str; 5] = [
    "summary",
    "professional summary",
    "objective",
    "profile",
    "about",
];

const MAX_SKILLS: usize = 15;
const MAX_EXPERIENCE_ENTRIES: usize = 5;
const MAX_EDUCATION_ENTRIES: usize = 3;
const MAX_SUMMARY_CHARS: usize = 500;

/// What the heuristic scan managed to find. `None` fields were simply not
/// present in the text.
#[derive(Debug, Default)]
pub struct TextScan {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub summary: Option<String>,
    pub technical_skills: Option<Vec<String>>,
    pub experience: Option<Vec<Experience>>,
    pub education: Option<Vec<Education>>,
}

impl TextScan {
    /// Applies the found fields onto an otherwise empty resume. Absent
    /// fields leave their targets untouched.
    pub fn into_resume(self) -> Resume {
        let mut resume = Resume::default();
        if let Some(name) = self.full_name {
            resume.personal.full_name = name;
        }
        if let Some(email) = self.email {
            resume.personal.email = email;
        }
        if let Some(phone) = self.phone {
            resume.personal.phone = phone;
        }
        if let Some(linkedin) = self.linkedin {
            resume.personal.linkedin = linkedin;
        }
        if let Some(summary) = self.summary {
            resume.personal.summary = summary;
        }
        if let Some(skills) = self.technical_skills {
            resume.skills.technical = skills;
        }
        if let Some(experience) = self.experience {
            resume.experience = experience;
        }
        if let Some(education) = self.education {
            resume.education = education;
        }
        resume
    }
}

/// Runs the full heuristic pass over extracted document text.
pub fn scan_text(text: &str) -> TextScan {
    TextScan {
        full_name: extract_name(text),
        email: find_first(text, r"[\w.-]+@[\w.-]+\.\w+"),
        phone: find_first(
            text,
            r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
        ),
        linkedin: find_first(text, r"linkedin\.com/in/[\w-]+"),
        summary: extract_section(text, &SUMMARY_HEADERS).map(|s| first_line_truncated(&s)),
        technical_skills: extract_section(text, &SKILLS_HEADERS).map(|s| parse_skills(&s)),
        experience: extract_section(text, &EXPERIENCE_HEADERS).map(|s| parse_experience(&s)),
        education: extract_section(text, &EDUCATION_HEADERS).map(|s| parse_education(&s)),
    }
}

/// Convenience for the oracle-less import path.
pub fn extract_resume_from_text(text: &str) -> Resume {
    scan_text(text).into_resume()
}

// ────────────────────────────────────────────────────────────────────────────
// Contact and name
// ────────────────────────────────────────────────────────────────────────────

fn find_first(text: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).unwrap();
    re.find(text).map(|m| m.as_str().to_string())
}

/// Among the first five non-blank lines, the first that looks like a
/// person's name: title-cased words, no email, no number run, plausible
/// length.
fn extract_name(text: &str) -> Option<String> {
    let name_re = Regex::new(r"^[A-Z][a-zA-Z\s.'-]+$").unwrap();
    let digits_re = Regex::new(r"\d{3}").unwrap();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(5)
        .find(|line| {
            let len = line.chars().count();
            !line.contains('@')
                && !digits_re.is_match(line)
                && len > 3
                && len < 50
                && name_re.is_match(line)
        })
        .map(str::to_string)
}

// ────────────────────────────────────────────────────────────────────────────
// Section capture
// ────────────────────────────────────────────────────────────────────────────

/// Finds the first header synonym (case-insensitive, word-bounded) and
/// captures everything after it up to the next paragraph break that starts
/// a new titled block (blank line followed by a letter), or end of text.
fn extract_section(text: &str, headers: &[&str]) -> Option<String> {
    let boundary_re = Regex::new(r"\n\s*\n[A-Za-z]").unwrap();
    for header in headers {
        let header_re =
            Regex::new(&format!(r"(?i)\b{}\b[:\s]*", regex::escape(header))).unwrap();
        if let Some(m) = header_re.find(text) {
            let rest = &text[m.end()..];
            let end = boundary_re.find(rest).map(|b| b.start()).unwrap_or(rest.len());
            let content = rest[..end].trim();
            if content.is_empty() {
                return None;
            }
            return Some(content.to_string());
        }
    }
    None
}

// ────────────────────────────────────────────────────────────────────────────
// Section parsers
// ────────────────────────────────────────────────────────────────────────────

/// Comma/semicolon/pipe/newline separated tokens, length-filtered, capped,
/// all filed as technical.
fn parse_skills(section: &str) -> Vec<String> {
    let split_re = Regex::new(r"[,;|\n]").unwrap();
    split_re
        .split(section)
        .map(str::trim)
        .filter(|token| {
            let len = token.chars().count();
            len > 2 && len < 50
        })
        .take(MAX_SKILLS)
        .map(str::to_string)
        .collect()
}

/// A date-range line marks a new job; the line right before it (when short
/// enough) is the title; bullet-marked lines after it are responsibilities.
fn parse_experience(section: &str) -> Vec<Experience> {
    let date_re = Regex::new(
        r"(?i)(\d{4}|[A-Z][a-z]{2}\s+\d{4})\s*[-–—]\s*(\d{4}|[A-Z][a-z]{2}\s+\d{4}|Present|Current)",
    )
    .unwrap();
    let marker_re = Regex::new(r"^[•\-*]\s*").unwrap();

    let lines: Vec<&str> = section
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut entries: Vec<Experience> = Vec::new();
    let mut current: Option<Experience> = None;

    for (i, line) in lines.iter().enumerate() {
        if let Some(caps) = date_re.captures(line) {
            if i > 0 {
                if let Some(done) = current.take() {
                    entries.push(done);
                }
                let prev = lines[i - 1];
                let title = if prev.chars().count() < 100 {
                    prev.to_string()
                } else {
                    String::new()
                };
                current = Some(Experience {
                    title,
                    start_date: caps[1].to_string(),
                    end_date: caps[2].to_string(),
                    responsibilities: Vec::new(),
                    ..Experience::default()
                });
            }
        } else if line.starts_with('•') || line.starts_with('-') || line.starts_with('*') {
            if let Some(entry) = current.as_mut() {
                entry
                    .responsibilities
                    .push(marker_re.replace(line, "").to_string());
            }
        }
    }
    if let Some(done) = current.take() {
        entries.push(done);
    }
    entries.truncate(MAX_EXPERIENCE_ENTRIES);
    entries
}

/// A degree-keyword line starts an entry, the following line is its
/// institution. One year-range match from the whole section supplies the
/// dates for every entry; per-entry dates are beyond this pass.
fn parse_education(section: &str) -> Vec<Education> {
    let degree_re =
        Regex::new(r"(?i)(bachelor|master|phd|b\.s\.|m\.s\.|b\.a\.|m\.a\.|associate)").unwrap();
    let year_range_re = Regex::new(r"(?i)(\d{4})\s*[-–—]\s*(\d{4}|Present)").unwrap();

    let (start_date, end_date) = match year_range_re.captures(section) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => (String::new(), String::new()),
    };

    let lines: Vec<&str> = section
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut entries = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if !degree_re.is_match(line) {
            continue;
        }
        let institution = lines
            .get(i + 1)
            .map(|next| next.chars().take(100).collect())
            .unwrap_or_default();
        entries.push(Education {
            degree: line.chars().take(100).collect(),
            institution,
            start_date: start_date.clone(),
            end_date: end_date.clone(),
            ..Education::default()
        });
        if entries.len() == MAX_EDUCATION_ENTRIES {
            break;
        }
    }
    entries
}

fn first_line_truncated(section: &str) -> String {
    section
        .lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(MAX_SUMMARY_CHARS)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
