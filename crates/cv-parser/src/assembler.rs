//! Top-level entry points: markdown (or pre-structured JSON) in, `ParsedCv` out.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::certification::parse_certification_section;
use crate::education::parse_education_section;
use crate::errors::ParseError;
use crate::experience::{detect_headerless_experiences, parse_experience_section};
use crate::languages::parse_languages;
use crate::lines::{classify_line, LineKind};
use crate::lists::parse_flat_list;
use crate::models::{Experience, ParsedCv};
use crate::options::ParseOptions;
use crate::personal::analyze_preamble;
use crate::sections::{
    extract_section, heading_offset, is_section_title, split_blocks, CERTIFICATION_TITLES,
    EDUCATION_TITLES, EXPERIENCE_TITLES, HOBBY_TITLES, LANGUAGE_TITLES, SKILLS_TITLES,
    SUMMARY_TITLES,
};
use crate::structured::normalize_structured;

/// Request-shaped input: markdown under `initial_cv` or `content`, or already
/// structured JSON under `structured_data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CvInput {
    #[serde(default, alias = "initialCv")]
    pub initial_cv: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, alias = "structuredData")]
    pub structured_data: Option<Value>,
}

impl CvInput {
    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            initial_cv: Some(text.into()),
            ..Default::default()
        }
    }

    /// The markdown body, `initial_cv` first. Blank strings count as absent.
    pub fn text(&self) -> Option<&str> {
        [self.initial_cv.as_deref(), self.content.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
    }
}

/// Parses a markdown CV with default options.
pub fn parse_cv_data(markdown: &str) -> ParsedCv {
    parse_cv_data_with(markdown, &ParseOptions::default())
}

pub fn parse_cv_data_with(markdown: &str, options: &ParseOptions) -> ParsedCv {
    let doc = markdown.replace("\r\n", "\n").replace('\r', "\n");
    let preamble = analyze_preamble(&doc);

    let summary = match section_paragraph(&doc, SUMMARY_TITLES) {
        text if !text.is_empty() => text,
        _ => preamble.summary,
    };

    let mut experience = parse_experience_section(&extract_section(&doc, EXPERIENCE_TITLES), options);
    if experience.is_empty() {
        experience = experience_before_education(&doc, options);
    }

    let cv = ParsedCv {
        personal_info: preamble.info,
        summary,
        experience,
        education: parse_education_section(&extract_section(&doc, EDUCATION_TITLES)),
        skills: parse_flat_list(&extract_section(&doc, SKILLS_TITLES)),
        certifications: parse_certification_section(&extract_section(&doc, CERTIFICATION_TITLES)),
        languages: parse_languages(&extract_section(&doc, LANGUAGE_TITLES)),
        hobbies: parse_flat_list(&extract_section(&doc, HOBBY_TITLES)),
    };

    debug!(
        experience = cv.experience.len(),
        education = cv.education.len(),
        skills = cv.skills.len(),
        certifications = cv.certifications.len(),
        languages = cv.languages.len(),
        "parsed markdown CV"
    );
    cv
}

/// Dispatches on the input shape: structured data wins over markdown.
pub fn parse_cv_input(input: &CvInput, options: &ParseOptions) -> Result<ParsedCv, ParseError> {
    if let Some(data) = input.structured_data.as_ref().filter(|v| !v.is_null()) {
        return normalize_structured(data, options);
    }
    input
        .text()
        .map(|text| parse_cv_data_with(text, options))
        .ok_or(ParseError::MissingInput)
}

/// Some documents skip the Experience heading but still list roles above Education.
fn experience_before_education(doc: &str, options: &ParseOptions) -> Vec<Experience> {
    let Some(end) = heading_offset(doc, EDUCATION_TITLES) else {
        return Vec::new();
    };
    let head = &doc[..end];
    debug!("no experience section found, retrying on text before the education heading");

    if !split_blocks(head).is_empty() {
        return parse_experience_section(head, options);
    }
    detect_headerless_experiences(&head[first_section_offset(head)..], options)
}

/// Offset of the first known `#`/`##` section heading, so preamble contact lines
/// never reach the headerless heuristics.
fn first_section_offset(text: &str) -> usize {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if let LineKind::Heading { level, text } = classify_line(line) {
            if level <= 2 && is_section_title(&text) {
                return offset;
            }
        }
        offset += line.len();
    }
    0
}

/// Section text flattened to one paragraph, bullets and emphasis removed.
fn section_paragraph(doc: &str, titles: &[&str]) -> String {
    extract_section(doc, titles)
        .lines()
        .filter_map(|line| match classify_line(line) {
            LineKind::Bullet(text) | LineKind::Text(text) => Some(text),
            LineKind::ProjectMarker { .. } | LineKind::DateRange(_) => {
                Some(line.trim().to_string())
            }
            LineKind::Heading { .. } | LineKind::Blank => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}
