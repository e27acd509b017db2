//! Fallback for experience text with no `###` structure.
//!
//! Two independent passes, concatenated:
//! 1. inline `Title at Company (period)` lines;
//! 2. a 3-line window: title line, company line, line containing a year.
//!
//! Both are deliberately permissive: this path only runs once the structured path
//! has already found nothing.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::RawExperience;
use crate::dates::{contains_year, extract_single_date, parse_period_line, Period};
use crate::header::clean_part;
use crate::lines::{classify_line, is_bullet, strip_bullet, strip_emphasis, LineKind};

static INLINE_ROLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)\s+(?:at|chez|@)\s+(.+?)\s*\(([^()]*\d{4}[^()]*)\)")
        .expect("valid inline role regex")
});

pub(crate) fn detect_headerless(text: &str) -> Vec<RawExperience> {
    let lines: Vec<&str> = text.lines().collect();
    let mut consumed = vec![false; lines.len()];

    let mut inline = inline_roles(&lines, &mut consumed);
    let windowed = windowed_roles(&lines, &mut consumed);

    debug!(
        inline = inline.len(),
        windowed = windowed.len(),
        "headerless experience detection"
    );
    inline.extend(windowed);
    inline
}

fn inline_roles(lines: &[&str], consumed: &mut [bool]) -> Vec<RawExperience> {
    let mut found = Vec::new();
    for idx in 0..lines.len() {
        if consumed[idx] {
            continue;
        }
        let candidate = strip_emphasis(&strip_bullet(lines[idx]));
        let Some(caps) = INLINE_ROLE_RE.captures(&candidate) else {
            continue;
        };
        consumed[idx] = true;

        let period = period_or_single_date(&caps[3]);
        let bullets = take_bullets(lines, idx + 1, consumed);
        found.push(RawExperience {
            title: clean_part(&caps[1]),
            company: clean_part(&caps[2]),
            period,
            bullets,
        });
    }
    found
}

fn windowed_roles(lines: &[&str], consumed: &mut [bool]) -> Vec<RawExperience> {
    let mut found = Vec::new();
    let mut idx = 0;
    while idx + 2 < lines.len() {
        if consumed[idx..=idx + 2].iter().any(|&c| c) {
            idx += 1;
            continue;
        }
        let (title_line, company_line, date_line) = (lines[idx], lines[idx + 1], lines[idx + 2]);
        if !is_title_line(title_line) || !is_company_line(company_line) || !contains_year(date_line)
        {
            idx += 1;
            continue;
        }

        consumed[idx..=idx + 2].iter_mut().for_each(|c| *c = true);
        let bullets = take_bullets(lines, idx + 3, consumed);
        found.push(RawExperience {
            title: cut_at_dash(title_line),
            company: cut_at_dash(company_line),
            period: period_or_single_date(date_line),
            bullets,
        });
        idx += 3;
    }
    found
}

fn is_title_line(line: &str) -> bool {
    matches!(classify_line(line), LineKind::Text(_) | LineKind::DateRange(_))
}

fn is_company_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && !trimmed.starts_with(|c: char| c.is_ascii_digit())
        && matches!(classify_line(trimmed), LineKind::Text(_))
}

fn cut_at_dash(line: &str) -> String {
    let text = strip_emphasis(line);
    clean_part(text.split(" - ").next().unwrap_or_default())
}

fn period_or_single_date(text: &str) -> Period {
    let period = parse_period_line(text);
    if !period.is_empty() {
        return period;
    }
    extract_single_date(text)
        .map(|(start, _)| Period {
            start,
            end: String::new(),
        })
        .unwrap_or_default()
}

/// Bullet lines directly below a detected role, marking them consumed.
fn take_bullets(lines: &[&str], from: usize, consumed: &mut [bool]) -> Vec<String> {
    let mut bullets = Vec::new();
    for idx in from..lines.len() {
        let line = lines[idx];
        if line.trim().is_empty() {
            continue;
        }
        if !is_bullet(line) || consumed[idx] {
            break;
        }
        consumed[idx] = true;
        bullets.push(strip_bullet(line));
    }
    bullets
}
