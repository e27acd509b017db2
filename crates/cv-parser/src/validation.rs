//! Quality report for a parsed CV.
//!
//! Only structural problems (experience/education present but not arrays) are errors.
//! Everything else, including count mismatches against the upstream extraction
//! summary, is a warning so callers can keep a degraded but usable result.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::models::{ExtractionSummary, ParsedCv};
use crate::options::ParseOptions;

/// Relative difference tolerated between parsed and expected skill counts.
const SKILLS_TOLERANCE: f64 = 0.5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStats {
    pub experience_count: usize,
    pub education_count: usize,
    pub skills_count: usize,
    pub certifications_count: usize,
    pub languages_count: usize,
    pub total_bullets: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub stats: ValidationStats,
}

pub fn validate_cv(cv: &ParsedCv, summary: Option<&ExtractionSummary>) -> ValidationResult {
    validate_cv_with(cv, summary, &ParseOptions::default())
}

/// Like [`validate_cv`], for a CV parsed with `options`: its bullet placeholder does
/// not count as a bullet.
pub fn validate_cv_with(
    cv: &ParsedCv,
    summary: Option<&ExtractionSummary>,
    options: &ParseOptions,
) -> ValidationResult {
    let value = serde_json::to_value(cv).unwrap_or(Value::Null);
    validate_parsed_cv_with(&value, summary, options)
}

/// Validates `ParsedCv`-shaped JSON. Keys are accepted in camelCase or snake_case.
pub fn validate_parsed_cv(cv: &Value, summary: Option<&ExtractionSummary>) -> ValidationResult {
    validate_parsed_cv_with(cv, summary, &ParseOptions::default())
}

pub fn validate_parsed_cv_with(
    cv: &Value,
    summary: Option<&ExtractionSummary>,
    options: &ParseOptions,
) -> ValidationResult {
    let placeholder = options.bullet_placeholder.as_str();
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    let experience = entries(cv, "experience", &mut errors);
    let education = entries(cv, "education", &mut errors);

    for (idx, exp) in experience.iter().enumerate() {
        let label = format!("Experience #{}", idx + 1);
        if field(exp, &["title"]).is_empty() {
            warnings.push(format!("{label}: missing title"));
        }
        if field(exp, &["company"]).is_empty() {
            warnings.push(format!("{label}: missing company"));
        }
        if real_bullets(exp, placeholder) == 0 {
            warnings.push(format!("{label}: missing bullets"));
        }
        if field(exp, &["startDate", "start_date"]).is_empty() {
            warnings.push(format!("{label}: missing start date"));
        }
    }

    for (idx, edu) in education.iter().enumerate() {
        let label = format!("Education #{}", idx + 1);
        if field(edu, &["degree"]).is_empty() {
            warnings.push(format!("{label}: missing degree"));
        }
        if field(edu, &["institution", "school"]).is_empty() {
            warnings.push(format!("{label}: missing institution"));
        }
    }

    let personal = cv
        .get("personalInfo")
        .or_else(|| cv.get("personal_info"))
        .unwrap_or(&Value::Null);
    if field(personal, &["name"]).is_empty() && field(personal, &["firstName", "first_name"]).is_empty() {
        warnings.push("Personal info: missing name".to_string());
    }
    if field(personal, &["email"]).is_empty() {
        warnings.push("Personal info: missing email".to_string());
    }

    let stats = ValidationStats {
        experience_count: experience.len(),
        education_count: education.len(),
        skills_count: array_len(cv, "skills"),
        certifications_count: array_len(cv, "certifications"),
        languages_count: array_len(cv, "languages"),
        total_bullets: experience.iter().map(|exp| real_bullets(exp, placeholder)).sum(),
    };

    if let Some(summary) = summary {
        count_warnings(&stats, summary, &mut warnings);
    }

    debug!(
        errors = errors.len(),
        warnings = warnings.len(),
        experience = stats.experience_count,
        "validated parsed CV"
    );

    ValidationResult {
        is_valid: errors.is_empty(),
        warnings,
        errors,
        stats,
    }
}

/// Entries of an array field. An absent field is empty; any other shape is a
/// structural error.
fn entries<'a>(cv: &'a Value, key: &str, errors: &mut Vec<String>) -> &'a [Value] {
    match cv.get(key) {
        None => &[],
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => {
            errors.push(format!("`{key}` must be an array"));
            &[]
        }
    }
}

fn field(value: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| match value.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

fn array_len(cv: &Value, key: &str) -> usize {
    cv.get(key).and_then(Value::as_array).map_or(0, Vec::len)
}

/// Non-empty bullets other than the placeholder.
fn real_bullets(exp: &Value, placeholder: &str) -> usize {
    exp.get("bullets")
        .and_then(Value::as_array)
        .map_or(0, |bullets| {
            bullets
                .iter()
                .filter_map(Value::as_str)
                .filter(|b| !b.trim().is_empty() && *b != placeholder)
                .count()
        })
}

fn count_warnings(stats: &ValidationStats, summary: &ExtractionSummary, warnings: &mut Vec<String>) {
    let exact = [
        ("experiences", summary.experiences_found, stats.experience_count),
        ("educations", summary.educations_found, stats.education_count),
        ("certifications", summary.certifications_found, stats.certifications_count),
        ("languages", summary.languages_found, stats.languages_count),
    ];
    for (what, expected, parsed) in exact {
        if let Some(expected) = expected {
            if expected != parsed {
                warnings.push(format!(
                    "Mismatch: extraction found {expected} {what}, parsed {parsed}"
                ));
            }
        }
    }

    if let Some(expected) = summary.skills_found {
        let drift = (stats.skills_count as f64 - expected as f64).abs();
        if drift > expected as f64 * SKILLS_TOLERANCE {
            warnings.push(format!(
                "Mismatch: extraction found {expected} skills, parsed {} (beyond 50% tolerance)",
                stats.skills_count
            ));
        }
    }
}
