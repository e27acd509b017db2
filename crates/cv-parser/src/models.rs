use serde::{Deserialize, Serialize};

/// Inserted when an experience has no detectable bullet so renderers never see `[]`.
pub const BULLET_PLACEHOLDER: &str = "Details to be provided";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl PersonalInfo {
    /// Fills `first_name`/`last_name` from `name` when they are not already set.
    pub(crate) fn with_split_name(mut self) -> Self {
        if let Some(name) = self.name.as_deref() {
            let mut parts = name.split_whitespace();
            if self.first_name.is_none() {
                self.first_name = parts.next().map(str::to_string);
            } else {
                parts.next();
            }
            if self.last_name.is_none() {
                let rest = parts.collect::<Vec<_>>().join(" ");
                self.last_name = (!rest.is_empty()).then_some(rest);
            }
        }
        self
    }
}

/// One role, in document order. `bullets` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub is_current: bool,
    pub bullets: Vec<String>,
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub year: String,
    /// Same value as `year`; kept for consumers that read an end date.
    pub end_date: String,
    pub is_current: bool,
    pub details: String,
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub year: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

/// Structured résumé produced by one parse call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCv {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<LanguageEntry>,
    pub hobbies: Vec<String>,
}

/// Entity counts reported by the upstream generation step. Only used for validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    #[serde(default, alias = "experiencesFound")]
    pub experiences_found: Option<usize>,
    #[serde(default, alias = "educationsFound")]
    pub educations_found: Option<usize>,
    #[serde(default, alias = "skillsFound")]
    pub skills_found: Option<usize>,
    #[serde(default, alias = "certificationsFound")]
    pub certifications_found: Option<usize>,
    #[serde(default, alias = "languagesFound")]
    pub languages_found: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name_two_parts() {
        let info = PersonalInfo {
            name: Some("Jean Pierre Dupont".to_string()),
            ..Default::default()
        }
        .with_split_name();
        assert_eq!(info.first_name.as_deref(), Some("Jean"));
        assert_eq!(info.last_name.as_deref(), Some("Pierre Dupont"));
    }

    #[test]
    fn test_split_name_single_word_has_no_last_name() {
        let info = PersonalInfo {
            name: Some("Madonna".to_string()),
            ..Default::default()
        }
        .with_split_name();
        assert_eq!(info.first_name.as_deref(), Some("Madonna"));
        assert!(info.last_name.is_none());
    }

    #[test]
    fn test_parsed_cv_serializes_camel_case() {
        let json = serde_json::to_value(ParsedCv::default()).unwrap();
        assert!(json.get("personalInfo").is_some());
        assert!(json["experience"].is_array());
        assert!(json["personalInfo"].get("email").is_none());
    }

    #[test]
    fn test_extraction_summary_accepts_both_casings() {
        let snake: ExtractionSummary =
            serde_json::from_str(r#"{"experiences_found": 3}"#).unwrap();
        let camel: ExtractionSummary = serde_json::from_str(r#"{"skillsFound": 12}"#).unwrap();
        assert_eq!(snake.experiences_found, Some(3));
        assert_eq!(camel.skills_found, Some(12));
        assert!(camel.experiences_found.is_none());
    }
}
