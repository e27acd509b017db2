//! Line-level primitives shared by every parser.
//!
//! `classify_line` tags a single markdown line so grouping passes can match on a
//! `LineKind` instead of re-running ad-hoc regexes.

use std::sync::LazyLock;

use regex::Regex;

use crate::dates::{find_period, Period};

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*+][ \t]+|•[ \t]*)").expect("valid bullet regex"));

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(#{1,6})[ \t]+(.*?)[ \t#]*$").expect("valid heading regex"));

/// "Data Platform Migration (8 months)", "**Client X** (3 mois)".
static PROJECT_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)\s*\((\d{1,3})\s*(?:months?|mos?|mois)\)\s*:?$")
        .expect("valid project marker regex")
});

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Blank,
    Heading { level: usize, text: String },
    Bullet(String),
    ProjectMarker { name: String, months: u32 },
    /// A line that opens with a date range, e.g. "Jan 2020 - Present | Paris".
    DateRange(Period),
    Text(String),
}

pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() || is_rule(trimmed) {
        return LineKind::Blank;
    }

    if let Some(caps) = HEADING_RE.captures(trimmed) {
        return LineKind::Heading {
            level: caps[1].len(),
            text: strip_emphasis(&caps[2]),
        };
    }

    if is_bullet(trimmed) {
        return LineKind::Bullet(strip_bullet(trimmed));
    }

    let plain = strip_emphasis(trimmed);
    if let Some(caps) = PROJECT_MARKER_RE.captures(&plain) {
        return LineKind::ProjectMarker {
            name: strip_emphasis(&caps[1]),
            months: caps[2].parse().unwrap_or(0),
        };
    }

    if let Some(period) = leading_period(trimmed) {
        return LineKind::DateRange(period);
    }

    LineKind::Text(plain)
}

/// Date range that starts the line, ignoring opening punctuation.
fn leading_period(line: &str) -> Option<Period> {
    let rest = line.trim_start_matches(|c: char| matches!(c, '(' | '[' | '*' | '_' | '|') || c.is_whitespace());
    let offset = line.len() - rest.len();
    match find_period(line) {
        Some((period, span)) if span.start == offset => Some(period),
        _ => None,
    }
}

/// Horizontal rules such as `---` or `***`.
fn is_rule(line: &str) -> bool {
    line.chars().count() >= 3 && line.chars().all(|c| matches!(c, '-' | '*' | '_' | '='))
}

pub fn is_bullet(line: &str) -> bool {
    BULLET_RE.is_match(line)
}

/// Removes a leading `-`, `*`, `+` or `•` marker and surrounding whitespace.
pub fn strip_bullet(line: &str) -> String {
    BULLET_RE.replace(line, "").trim().to_string()
}

/// Markdown heading level of `line`, if it is a heading.
pub fn heading_level(line: &str) -> Option<usize> {
    HEADING_RE.captures(line.trim()).map(|caps| caps[1].len())
}

/// Drops bold/italic wrappers: `**Acme**` → `Acme`.
pub fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
        .replace("__", "")
        .trim()
        .trim_matches(|c| c == '*' || c == '_')
        .trim()
        .to_string()
}

/// Starts with an uppercase letter and reads like a label rather than a sentence.
pub fn is_capitalized_label(text: &str) -> bool {
    let text = text.trim();
    let starts_upper = text.chars().next().is_some_and(char::is_uppercase);
    starts_upper && text.chars().count() <= 100 && !text.ends_with('.')
}
