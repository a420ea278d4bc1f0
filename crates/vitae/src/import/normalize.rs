//! Shape-tolerant normalization of imported resume data.
//!
//! Import sources disagree on key names (`fullName` vs `name`, `company` vs
//! `organization`), on shapes (skills as a flat list vs a technical/soft
//! split), and on which fields exist at all. This pass accepts any parsed
//! JSON tree and produces a canonical [`Resume`], resolving each field
//! through a ranked list of alternate keys and degrading to empty defaults
//! instead of failing. It is pure: malformed *syntax* is the caller's
//! problem, malformed *shape* is absorbed here.

use serde_json::Value;
use uuid::Uuid;

use crate::model::{
    default_section_order, Certification, CustomSection, Education, Experience, LanguageSkill,
    Personal, Project, Resume, SectionId, Skills,
};

/// Substrings that route a flat-list skill into the technical bucket.
const TECHNICAL_KEYWORDS: [&str; 4] = ["technical", "product", "data", "ai"];

/// Substrings that route a flat-list skill into the soft bucket.
const SOFT_KEYWORDS: [&str; 3] = ["management", "leadership", "problem"];

/// Normalizes an arbitrary JSON tree into a canonical [`Resume`].
///
/// Running this over a resume this tool exported itself reproduces it
/// exactly, ids included; `sectionOrder`, `customSections`, and `languages`
/// survive only from that native format, since third-party schemas have no
/// equivalent to carry over.
pub fn normalize(data: &Value) -> Resume {
    let personal_src = data
        .get("personal")
        .or_else(|| data.get("personal_info"))
        .cloned()
        .unwrap_or(Value::Null);

    let personal = Personal {
        full_name: str_field(&personal_src, &["fullName", "name"]),
        email: str_field(&personal_src, &["email"]),
        phone: str_field(&personal_src, &["phone"]),
        location: str_field(&personal_src, &["location"]),
        linkedin: str_field(&personal_src, &["linkedin"]),
        portfolio: str_field(&personal_src, &["portfolio", "website"]),
        // A top-level summary wins over one nested under personal.
        summary: first_non_empty(&[
            str_field(data, &["summary"]),
            str_field(&personal_src, &["summary"]),
        ]),
    };

    Resume {
        personal,
        experience: entries(data, "experience", normalize_experience),
        education: entries(data, "education", normalize_education),
        skills: normalize_skills(data.get("skills").or_else(|| data.get("core_competencies"))),
        certifications: entries(data, "certifications", normalize_certification),
        projects: entries(data, "projects", normalize_project),
        languages: entries(data, "languages", normalize_language),
        custom_sections: normalize_custom_sections(data.get("customSections")),
        section_order: normalize_section_order(data.get("sectionOrder")),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry normalizers
// ────────────────────────────────────────────────────────────────────────────

fn normalize_experience(entry: &Value) -> Experience {
    let (from_dates_start, from_dates_end) = split_dates_field(entry);
    Experience {
        id: entry_id(entry),
        title: str_field(entry, &["title", "position"]),
        company: str_field(entry, &["company", "organization"]),
        location: str_field(entry, &["location"]),
        start_date: first_non_empty(&[
            str_field(entry, &["startDate", "start_date"]),
            from_dates_start,
        ]),
        end_date: first_non_empty(&[
            str_field(entry, &["endDate", "end_date"]),
            from_dates_end,
        ]),
        responsibilities: normalize_responsibilities(entry),
    }
}

fn normalize_education(entry: &Value) -> Education {
    let (from_dates_start, from_dates_end) = split_dates_field(entry);
    Education {
        id: entry_id(entry),
        degree: str_field(entry, &["degree"]),
        institution: str_field(entry, &["institution", "school"]),
        location: str_field(entry, &["location"]),
        gpa: str_field(entry, &["gpa"]),
        start_date: first_non_empty(&[
            str_field(entry, &["startDate", "start_date"]),
            from_dates_start,
        ]),
        end_date: first_non_empty(&[
            str_field(entry, &["endDate", "end_date"]),
            from_dates_end,
        ]),
    }
}

fn normalize_project(entry: &Value) -> Project {
    Project {
        id: entry_id(entry),
        name: str_field(entry, &["name"]),
        technologies: str_field(entry, &["technologies"]),
        description: str_field(entry, &["description"]),
        link: str_field(entry, &["link"]),
    }
}

/// The two wire shapes a certification entry arrives in.
enum CertificationShape<'a> {
    /// Legacy bare string, e.g. `"AWS Certified"`.
    Bare(&'a str),
    /// Structured `{name, issuer, date}` object.
    Structured(&'a Value),
}

impl<'a> CertificationShape<'a> {
    fn detect(entry: &'a Value) -> Self {
        match entry.as_str() {
            Some(name) => CertificationShape::Bare(name),
            None => CertificationShape::Structured(entry),
        }
    }
}

fn normalize_certification(entry: &Value) -> Certification {
    match CertificationShape::detect(entry) {
        CertificationShape::Bare(name) => Certification {
            id: Uuid::new_v4(),
            name: name.to_string(),
            issuer: String::new(),
            date: String::new(),
        },
        CertificationShape::Structured(obj) => Certification {
            id: entry_id(obj),
            name: str_field(obj, &["name"]),
            issuer: str_field(obj, &["issuer"]),
            date: str_field(obj, &["date"]),
        },
    }
}

fn normalize_language(entry: &Value) -> LanguageSkill {
    LanguageSkill {
        language: str_field(entry, &["language"]),
        proficiency: str_field(entry, &["proficiency"]),
    }
}

/// `responsibilities`, falling back to `bullets`, falling back to wrapping a
/// prose `description` as a single bullet.
fn normalize_responsibilities(entry: &Value) -> Vec<String> {
    for key in ["responsibilities", "bullets"] {
        if let Some(items) = entry.get(key).and_then(|v| v.as_array()) {
            return items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect();
        }
    }
    let description = str_field(entry, &["description"]);
    if description.is_empty() {
        Vec::new()
    } else {
        vec![description]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// The known wire shapes a `skills` value arrives in.
enum SkillsShape<'a> {
    /// Already split into technical/soft arrays.
    Split(&'a Value),
    /// Flat competency list that still needs keyword classification.
    Flat(Vec<&'a str>),
    Absent,
}

impl<'a> SkillsShape<'a> {
    fn detect(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::Array(items)) => {
                SkillsShape::Flat(items.iter().filter_map(|v| v.as_str()).collect())
            }
            Some(value) => SkillsShape::Split(value),
            None => SkillsShape::Absent,
        }
    }
}

fn normalize_skills(skills: Option<&Value>) -> Skills {
    match SkillsShape::detect(skills) {
        SkillsShape::Flat(list) => classify_skills(list),
        SkillsShape::Split(value) => Skills {
            technical: string_array(value.get("technical")),
            soft: string_array(value.get("soft")),
        },
        SkillsShape::Absent => Skills::default(),
    }
}

/// Splits a flat competency list into technical/soft buckets by keyword.
/// Every input lands in exactly one bucket; anything matching neither class
/// goes to technical so data is never dropped.
fn classify_skills(list: Vec<&str>) -> Skills {
    let mut skills = Skills::default();
    for item in list {
        let lower = item.to_lowercase();
        if TECHNICAL_KEYWORDS.iter().any(|k| lower.contains(k)) {
            skills.technical.push(item.to_string());
        } else if SOFT_KEYWORDS.iter().any(|k| lower.contains(k)) {
            skills.soft.push(item.to_string());
        } else {
            skills.technical.push(item.to_string());
        }
    }
    skills
}

// ────────────────────────────────────────────────────────────────────────────
// Native-format passthrough
// ────────────────────────────────────────────────────────────────────────────

fn normalize_custom_sections(
    value: Option<&Value>,
) -> std::collections::BTreeMap<String, CustomSection> {
    let mut sections = std::collections::BTreeMap::new();
    let Some(map) = value.and_then(|v| v.as_object()) else {
        return sections;
    };
    for (key, entry) in map {
        sections.insert(
            key.clone(),
            CustomSection {
                title: str_field(entry, &["title"]),
                items: string_array(entry.get("items")),
            },
        );
    }
    sections
}

fn normalize_section_order(value: Option<&Value>) -> Vec<SectionId> {
    match value.and_then(|v| v.as_array()) {
        Some(ids) => ids
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| SectionId::from(s.to_string()))
            .collect(),
        None => default_section_order(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field helpers
// ────────────────────────────────────────────────────────────────────────────

/// First key whose value is a non-empty string; empty string otherwise.
fn str_field(obj: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(|v| v.as_str()))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn first_non_empty(candidates: &[String]) -> String {
    candidates
        .iter()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_default()
}

/// Legacy `dates: "2019 -- 2022"` field, split on the literal `--`. A value
/// without the separator lands entirely in the start slot.
fn split_dates_field(entry: &Value) -> (String, String) {
    let Some(dates) = entry.get("dates").and_then(|v| v.as_str()) else {
        return (String::new(), String::new());
    };
    let mut parts = dates.split("--");
    let start = parts.next().unwrap_or_default().trim().to_string();
    let end = parts.next().unwrap_or_default().trim().to_string();
    (start, end)
}

/// Keeps an existing id when it parses; anything else gets a fresh one.
fn entry_id(entry: &Value) -> Uuid {
    entry
        .get("id")
        .and_then(|v| v.as_str())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4)
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn entries<T>(data: &Value, key: &str, normalize_entry: fn(&Value) -> T) -> Vec<T> {
    data.get(key)
        .and_then(|v| v.as_array())
        .map(|items| items.iter().map(normalize_entry).collect())
        .unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alternate_personal_keys_resolve() {
        let data = json!({
            "personal_info": {
                "name": "Jane Doe",
                "email": "jane@x.com",
                "website": "janedoe.dev"
            }
        });
        let resume = normalize(&data);
        assert_eq!(resume.personal.full_name, "Jane Doe");
        assert_eq!(resume.personal.email, "jane@x.com");
        assert_eq!(resume.personal.portfolio, "janedoe.dev");
    }

    #[test]
    fn test_top_level_summary_beats_nested() {
        let data = json!({
            "summary": "Top level.",
            "personal": { "fullName": "Jane", "summary": "Nested." }
        });
        assert_eq!(normalize(&data).personal.summary, "Top level.");
    }

    #[test]
    fn test_empty_string_loses_to_next_alias() {
        let data = json!({
            "experience": [{ "title": "", "position": "Engineer" }]
        });
        assert_eq!(normalize(&data).experience[0].title, "Engineer");
    }

    #[test]
    fn test_dates_field_splits_on_double_dash() {
        let data = json!({
            "experience": [{ "company": "Acme", "dates": "2019 -- 2022" }]
        });
        let entry = &normalize(&data).experience[0];
        assert_eq!(entry.start_date, "2019");
        assert_eq!(entry.end_date, "2022");
    }

    #[test]
    fn test_dates_without_separator_all_land_in_start() {
        let data = json!({
            "experience": [{ "dates": "2019 - 2022" }]
        });
        let entry = &normalize(&data).experience[0];
        assert_eq!(entry.start_date, "2019 - 2022");
        assert_eq!(entry.end_date, "");
    }

    #[test]
    fn test_explicit_start_date_beats_dates_field() {
        let data = json!({
            "education": [{ "degree": "B.S.", "start_date": "2014", "dates": "2015 -- 2019" }]
        });
        let entry = &normalize(&data).education[0];
        assert_eq!(entry.start_date, "2014");
        assert_eq!(entry.end_date, "2019");
    }

    #[test]
    fn test_description_becomes_single_responsibility() {
        let data = json!({
            "experience": [{ "description": "Did the thing." }]
        });
        assert_eq!(
            normalize(&data).experience[0].responsibilities,
            vec!["Did the thing."]
        );
    }

    #[test]
    fn test_flat_skills_classify_into_buckets() {
        let data = json!({
            "skills": ["Data pipelines", "Leadership", "Cooking", "Product sense"]
        });
        let skills = normalize(&data).skills;
        assert_eq!(skills.technical, vec!["Data pipelines", "Cooking", "Product sense"]);
        assert_eq!(skills.soft, vec!["Leadership"]);
    }

    #[test]
    fn test_every_flat_skill_lands_somewhere() {
        let inputs = ["Rust", "Gardening", "Chess"];
        let data = json!({ "skills": inputs });
        let skills = normalize(&data).skills;
        assert_eq!(
            skills.technical.len() + skills.soft.len(),
            inputs.len(),
            "no skill may be dropped"
        );
        assert_eq!(
            skills.technical, inputs,
            "nothing matched either keyword class, so all go technical"
        );
    }

    #[test]
    fn test_object_skills_pass_through() {
        let data = json!({
            "skills": { "technical": ["Rust"], "soft": ["Mentoring"] }
        });
        let skills = normalize(&data).skills;
        assert_eq!(skills.technical, vec!["Rust"]);
        assert_eq!(skills.soft, vec!["Mentoring"]);
    }

    #[test]
    fn test_core_competencies_alias() {
        let data = json!({ "core_competencies": ["AI tooling"] });
        assert_eq!(normalize(&data).skills.technical, vec!["AI tooling"]);
    }

    #[test]
    fn test_bare_string_certification_coerces() {
        let data = json!({ "certifications": ["AWS Certified"] });
        let cert = &normalize(&data).certifications[0];
        assert_eq!(cert.name, "AWS Certified");
        assert_eq!(cert.issuer, "");
        assert_eq!(cert.date, "");
        assert!(!cert.id.is_nil());
    }

    #[test]
    fn test_missing_id_backfilled_existing_kept() {
        let kept = Uuid::new_v4();
        let data = json!({
            "experience": [
                { "title": "Kept", "id": kept.to_string() },
                { "title": "Fresh" }
            ]
        });
        let resume = normalize(&data);
        assert_eq!(resume.experience[0].id, kept);
        assert_ne!(resume.experience[1].id, kept);
        assert!(!resume.experience[1].id.is_nil());
    }

    #[test]
    fn test_non_object_input_degrades_to_default() {
        let resume = normalize(&json!([1, 2, 3]));
        assert_eq!(resume, Resume::default());
        let resume = normalize(&Value::Null);
        assert_eq!(resume, Resume::default());
    }

    #[test]
    fn test_arbitrary_import_gets_default_order() {
        let resume = normalize(&json!({ "personal": { "fullName": "X" } }));
        assert_eq!(resume.section_order, default_section_order());
        assert!(resume.custom_sections.is_empty());
    }

    #[test]
    fn test_native_format_keeps_order_and_custom_sections() {
        let data = json!({
            "personal": { "fullName": "Jane" },
            "sectionOrder": ["education", "custom-7", "skills"],
            "customSections": {
                "custom-7": { "title": "Awards", "items": ["Best hack"] }
            },
            "languages": [{ "language": "Spanish", "proficiency": "Fluent" }]
        });
        let resume = normalize(&data);
        assert_eq!(
            resume.section_order,
            vec![
                SectionId::Education,
                SectionId::Custom("custom-7".to_string()),
                SectionId::Skills,
            ]
        );
        assert_eq!(resume.custom_sections["custom-7"].title, "Awards");
        assert_eq!(resume.languages[0].language, "Spanish");
    }

    #[test]
    fn test_normalize_is_idempotent_on_native_export() {
        let mut resume = Resume::default();
        resume.personal.full_name = "Jane Doe".to_string();
        resume.personal.summary = "Engineer.".to_string();
        resume.experience.push(crate::model::Experience {
            title: "Senior Engineer".to_string(),
            company: "Acme".to_string(),
            start_date: "2019".to_string(),
            end_date: "2022".to_string(),
            responsibilities: vec!["Built X".to_string(), String::new()],
            ..Default::default()
        });
        resume.skills.technical = vec!["Rust".to_string()];
        resume.certifications.push(crate::model::Certification {
            name: "CKA".to_string(),
            ..Default::default()
        });
        resume.custom_sections.insert(
            "custom-1".to_string(),
            CustomSection {
                title: "Awards".to_string(),
                items: vec!["Best hack".to_string()],
            },
        );
        resume
            .section_order
            .push(SectionId::Custom("custom-1".to_string()));

        let exported = serde_json::to_value(&resume).unwrap();
        let round_tripped = normalize(&exported);
        assert_eq!(round_tripped, resume, "native export must survive unchanged");

        // And a second pass changes nothing either.
        let again = normalize(&serde_json::to_value(&round_tripped).unwrap());
        assert_eq!(again, resume);
    }
}
