//! Normalizes caller-supplied structured JSON into a `ParsedCv`.
//!
//! No heuristics here beyond what the markdown parsers already expose: keys are
//! looked up under their camelCase and snake_case spellings (plus a few common
//! aliases), dates go through `normalize_date`, and missing values get defaults.

use serde_json::{Map, Value};

use crate::dates::{normalize_date, PRESENT};
use crate::errors::ParseError;
use crate::languages::parse_languages;
use crate::lines::strip_bullet;
use crate::lists::parse_flat_list;
use crate::models::{Certification, Education, Experience, LanguageEntry, ParsedCv, PersonalInfo};
use crate::options::ParseOptions;

type Object = Map<String, Value>;

pub fn normalize_structured(data: &Value, options: &ParseOptions) -> Result<ParsedCv, ParseError> {
    let obj = data.as_object().ok_or_else(|| {
        ParseError::InvalidStructuredData(format!("expected a JSON object, got {}", kind(data)))
    })?;

    let experience = list(obj, &["experience", "experiences", "workExperience", "work_experience"])?
        .iter()
        .filter_map(Value::as_object)
        .enumerate()
        .map(|(order, item)| experience_entry(item, order, options))
        .collect();

    let education = list(obj, &["education", "educations"])?
        .iter()
        .filter_map(Value::as_object)
        .enumerate()
        .map(|(order, item)| education_entry(item, order))
        .collect();

    let certifications = list(obj, &["certifications", "certificates"])?
        .iter()
        .filter_map(certification_entry)
        .collect();

    let languages = list(obj, &["languages", "langues"])?
        .iter()
        .flat_map(language_entries)
        .collect();

    Ok(ParsedCv {
        personal_info: personal_info(obj),
        summary: text(get(obj, &["summary", "profile", "about"])),
        experience,
        education,
        skills: flat_items(get(obj, &["skills", "competencies"])),
        certifications,
        languages,
        hobbies: flat_items(get(obj, &["hobbies", "interests"])),
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// First non-null value under any of `keys`.
fn get<'a>(obj: &'a Object, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key).filter(|v| !v.is_null()))
}

/// Array under `keys`; absent is empty, any other shape is rejected.
fn list<'a>(obj: &'a Object, keys: &[&str]) -> Result<&'a [Value], ParseError> {
    match get(obj, keys) {
        None => Ok(Default::default()),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(ParseError::InvalidStructuredData(format!(
            "`{}` must be an array, got {}",
            keys[0],
            kind(other)
        ))),
    }
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn opt_text(value: Option<&Value>) -> Option<String> {
    Some(text(value)).filter(|s| !s.is_empty())
}

fn date(value: Option<&Value>) -> String {
    normalize_date(&text(value))
}

/// Strings, `{text}`/`{content}`/`{name}` objects, or one newline-separated string.
fn strings(value: Option<&Value>) -> Vec<String> {
    let items: Vec<String> = match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Object(o) => text(get(o, &["text", "content", "name", "description"])),
                other => text(Some(other)),
            })
            .collect(),
        Some(Value::String(s)) => s.lines().map(strip_bullet).collect(),
        _ => Vec::new(),
    };
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn personal_info(obj: &Object) -> PersonalInfo {
    let Some(p) = get(obj, &["personalInfo", "personal_info", "personal"]).and_then(Value::as_object)
    else {
        return PersonalInfo::default();
    };

    let first_name = opt_text(get(p, &["firstName", "first_name"]));
    let last_name = opt_text(get(p, &["lastName", "last_name"]));
    let name = opt_text(get(p, &["name", "fullName", "full_name"])).or_else(|| {
        let joined = [first_name.as_deref(), last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        Some(joined).filter(|s| !s.is_empty())
    });

    PersonalInfo {
        name,
        first_name,
        last_name,
        title: opt_text(get(p, &["title", "headline", "position"])),
        email: opt_text(get(p, &["email", "mail"])),
        phone: opt_text(get(p, &["phone", "telephone", "mobile"])),
        location: opt_text(get(p, &["location", "address", "city"])),
        linkedin: opt_text(get(p, &["linkedin", "linkedIn", "linkedin_url", "linkedinUrl"])),
    }
    .with_split_name()
}

fn experience_entry(item: &Object, order: usize, options: &ParseOptions) -> Experience {
    let start_date = date(get(item, &["startDate", "start_date", "start"]));
    let mut end_date = date(get(item, &["endDate", "end_date", "end"]));
    let is_current = match get(item, &["isCurrent", "is_current", "current"]) {
        Some(Value::Bool(flag)) => *flag,
        _ => end_date == PRESENT,
    };
    if is_current && end_date.is_empty() {
        end_date = PRESENT.to_string();
    }

    let mut bullets = strings(get(
        item,
        &["bullets", "achievements", "responsibilities", "highlights", "description"],
    ));
    if bullets.is_empty() {
        bullets.push(options.bullet_placeholder.clone());
    }

    Experience {
        id: opt_text(get(item, &["id"])).unwrap_or_else(|| format!("exp-{order}")),
        title: text(get(item, &["title", "position", "role", "jobTitle", "job_title"])),
        company: text(get(item, &["company", "employer", "organization"])),
        start_date,
        end_date,
        is_current,
        bullets,
        order,
    }
}

fn education_entry(item: &Object, order: usize) -> Education {
    let year = date(get(
        item,
        &["year", "endDate", "end_date", "graduationYear", "graduation_year", "date"],
    ));
    let is_current = match get(item, &["isCurrent", "is_current", "current"]) {
        Some(Value::Bool(flag)) => *flag,
        _ => year == PRESENT,
    };

    Education {
        id: opt_text(get(item, &["id"])).unwrap_or_else(|| format!("edu-{order}")),
        degree: text(get(item, &["degree", "diploma", "title", "name"])),
        institution: text(get(item, &["institution", "school", "university", "organization"])),
        end_date: year.clone(),
        year,
        is_current,
        details: strings(get(item, &["details", "description"])).join("\n"),
        order,
    }
}

fn certification_entry(item: &Value) -> Option<Certification> {
    match item {
        Value::String(name) if !name.trim().is_empty() => Some(Certification {
            name: name.trim().to_string(),
            issuer: String::new(),
            year: String::new(),
            details: String::new(),
        }),
        Value::Object(o) => Some(Certification {
            name: text(get(o, &["name", "title"])),
            issuer: text(get(o, &["issuer", "organization", "authority"])),
            year: date(get(o, &["year", "date"])),
            details: strings(get(o, &["details", "description"])).join("\n"),
        }),
        _ => None,
    }
}

fn language_entries(item: &Value) -> Vec<LanguageEntry> {
    match item {
        Value::String(line) => parse_languages(line),
        Value::Object(o) => {
            let name = text(get(o, &["name", "language"]));
            if name.is_empty() {
                return Vec::new();
            }
            vec![LanguageEntry {
                name,
                level: opt_text(get(o, &["level", "proficiency"])),
            }]
        }
        _ => Vec::new(),
    }
}

/// Skills and hobbies: an array, a comma string, or an object of category arrays.
fn flat_items(value: Option<&Value>) -> Vec<String> {
    let lines: Vec<String> = match value {
        Some(Value::Object(groups)) => groups.values().flat_map(|v| strings(Some(v))).collect(),
        Some(Value::String(s)) => vec![s.clone()],
        other => strings(other),
    };
    parse_flat_list(&lines.join("\n"))
}
