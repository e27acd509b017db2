//! Personal info and fallback summary from the document preamble (everything before
//! the first `##` section).

use std::sync::LazyLock;

use regex::Regex;

use crate::dates::find_period;
use crate::lines::{classify_line, strip_bullet, strip_emphasis, LineKind};
use crate::models::PersonalInfo;
use crate::sections::is_section_title;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+").expect("valid email regex")
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\(?\d[\d\s().-]{6,}\d").expect("valid phone regex"));
static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:[a-z]{2,3}\.)?linkedin\.com/[\w\-/%.]+")
        .expect("valid linkedin regex")
});
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\p{L} .'-]{2,24}?)\s*:\s*(.+)$").expect("valid label regex")
});
static PERSON_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{Lu}[\p{L}'.-]+(?:\s+\p{Lu}[\p{L}'.-]*){1,3}$").expect("valid name regex")
});

const MIN_PHONE_DIGITS: usize = 9;
const MAX_SUMMARY_LINES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Title,
    Email,
    Phone,
    Location,
    Linkedin,
}

fn label_field(label: &str) -> Option<Field> {
    let field = match label.trim().to_lowercase().as_str() {
        "name" | "nom" | "full name" => Field::Name,
        "title" | "titre" | "role" | "position" | "poste" | "headline" => Field::Title,
        "email" | "e-mail" | "mail" | "courriel" => Field::Email,
        "phone" | "tel" | "tél" | "tel." | "téléphone" | "telephone" | "mobile" | "cell" => {
            Field::Phone
        }
        "location" | "address" | "adresse" | "city" | "ville" | "localisation" | "lieu" => {
            Field::Location
        }
        "linkedin" => Field::Linkedin,
        _ => return None,
    };
    Some(field)
}

/// Personal info plus the summary lines found in the preamble.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preamble {
    pub info: PersonalInfo,
    pub summary: String,
}

struct PreambleLine {
    text: String,
    segments: Vec<String>,
    labeled: bool,
    /// Plain prose, not a bullet or a date line.
    prose: bool,
}

pub fn analyze_preamble(doc: &str) -> Preamble {
    let (heading_name, raw_lines) = collect_preamble(doc);
    let lines: Vec<PreambleLine> = raw_lines.iter().map(|l| preamble_line(l)).collect();

    let mut info = PersonalInfo {
        name: heading_name,
        ..Default::default()
    };

    for segment in lines.iter().flat_map(|l| l.segments.iter()) {
        if let Some((field, value)) = labeled_value(segment) {
            let slot = match field {
                Field::Name => &mut info.name,
                Field::Title => &mut info.title,
                Field::Email => &mut info.email,
                Field::Phone => &mut info.phone,
                Field::Location => &mut info.location,
                Field::Linkedin => &mut info.linkedin,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
    }

    let joined = raw_lines.join("\n");
    if info.email.is_none() {
        info.email = EMAIL_RE.find(&joined).map(|m| m.as_str().to_string());
    }
    if info.phone.is_none() {
        info.phone = find_phone(&joined);
    }
    if info.linkedin.is_none() {
        info.linkedin = LINKEDIN_RE.find(&joined).map(|m| m.as_str().to_string());
    }
    if info.location.is_none() {
        info.location = lines
            .iter()
            .flat_map(|l| l.segments.iter())
            .find(|s| looks_like_location(s))
            .cloned();
    }

    let mut title_line = None;
    if info.name.is_some() && info.title.is_none() {
        if let Some((idx, line)) = lines.iter().enumerate().find(|(_, l)| !l.text.is_empty()) {
            if let Some(first) = line.segments.first() {
                if looks_like_title(first, &info) {
                    info.title = Some(first.clone());
                    title_line = Some(idx);
                }
            }
        }
    }

    if info.name.is_none() {
        // Plain-text CVs: a capitalized 2-4 word first line is taken as the name.
        if let Some((idx, line)) = lines.iter().enumerate().find(|(_, l)| !l.text.is_empty()) {
            if PERSON_NAME_RE.is_match(&line.text) && !is_section_title(&line.text) {
                info.name = Some(line.text.clone());
                title_line = Some(idx);
            }
        }
    }

    let summary = lines
        .iter()
        .enumerate()
        .filter(|(idx, _)| Some(*idx) != title_line)
        .map(|(_, l)| l)
        .filter(|l| l.prose && !l.labeled && !is_contact_line(l, &info))
        .take(MAX_SUMMARY_LINES)
        .map(|l| l.text.clone())
        .collect::<Vec<_>>()
        .join(" ");

    Preamble {
        info: info.with_split_name(),
        summary,
    }
}

/// Name from the leading `#`/`##` heading and the lines up to the next heading.
/// A `###` heading already opens an entry, so it ends the preamble too.
fn collect_preamble(doc: &str) -> (Option<String>, Vec<&str>) {
    let mut name = None;
    let mut lines = Vec::new();

    for line in doc.lines() {
        match classify_line(line) {
            LineKind::Heading { level, text }
                if level <= 2 && name.is_none() && !is_section_title(&text) =>
            {
                name = Some(text);
            }
            LineKind::Heading { .. } => break,
            _ => lines.push(line),
        }
    }
    (name, lines)
}

fn preamble_line(line: &str) -> PreambleLine {
    let text = strip_emphasis(&strip_bullet(line));
    let segments: Vec<String> = text
        .split(['|', '·', '•', '\t'])
        .map(|s| strip_emphasis(s.trim()))
        .filter(|s| !s.is_empty())
        .collect();
    let labeled = segments.iter().any(|s| labeled_value(s).is_some());
    let prose = matches!(classify_line(line), LineKind::Text(_));
    PreambleLine {
        text,
        segments,
        labeled,
        prose,
    }
}

fn labeled_value(segment: &str) -> Option<(Field, String)> {
    let caps = LABEL_RE.captures(segment)?;
    let field = label_field(&caps[1])?;
    let value = strip_emphasis(&caps[2]);
    (!value.is_empty()).then_some((field, value))
}

fn find_phone(text: &str) -> Option<String> {
    PHONE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| {
            candidate.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
                && find_period(candidate).is_none()
        })
        .map(str::to_string)
}

fn is_contact(segment: &str) -> bool {
    EMAIL_RE.is_match(segment) || LINKEDIN_RE.is_match(segment) || find_phone(segment).is_some()
}

fn looks_like_location(segment: &str) -> bool {
    segment.contains(',')
        && !is_contact(segment)
        && !segment.contains(':')
        && !segment.ends_with('.')
        && segment.chars().count() <= 60
        && segment.split_whitespace().count() <= 6
}

fn looks_like_title(segment: &str, info: &PersonalInfo) -> bool {
    !is_contact(segment)
        && labeled_value(segment).is_none()
        && info.location.as_deref() != Some(segment)
        && !segment.ends_with('.')
        && segment.chars().count() <= 80
}

fn is_contact_line(line: &PreambleLine, info: &PersonalInfo) -> bool {
    line.segments
        .iter()
        .any(|s| is_contact(s) || info.location.as_deref() == Some(s.as_str()))
}
