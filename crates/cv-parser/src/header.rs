//! Entry headers: `### Senior Engineer - Acme (2019 - 2021)`.

use std::sync::LazyLock;

use regex::Regex;

use crate::dates::{extract_single_date, find_period, Period};
use crate::lines::{classify_line, is_bullet, is_capitalized_label, strip_bullet, strip_emphasis, LineKind};

/// Tried in order; the first one present splits the header.
const SEPARATORS: &[&str] = &[" - ", " – ", " — ", " | ", " @ ", " at ", " chez ", ", "];

static EMPTY_BRACKETS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*\)|\[\s*\]").expect("valid empty brackets regex"));

/// A header line split into its name part, its organization part and any dates it carried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryHeader {
    pub primary: String,
    pub secondary: String,
    pub period: Period,
    /// A lone trailing date such as the `2018` in `MSc - MIT (2018)`.
    pub date: Option<String>,
}

pub fn parse_entry_header(line: &str) -> EntryHeader {
    let text = strip_emphasis(&strip_bullet(line.trim().trim_start_matches('#')));

    let (text, period) = match find_period(&text) {
        Some((period, span)) => (remove_span(&text, span), period),
        None => (text, Period::default()),
    };

    let (text, date) = if period.is_empty() {
        lift_trailing_date(&text)
    } else {
        (text, None)
    };

    let (primary, secondary) = split_pair(&text);
    EntryHeader {
        primary,
        secondary,
        period,
        date,
    }
}

/// Splits "Title - Company" style text at the first known separator.
pub fn split_pair(text: &str) -> (String, String) {
    for sep in SEPARATORS {
        if let Some((left, right)) = text.split_once(sep) {
            let left = clean_part(left);
            let right = clean_part(right);
            if !left.is_empty() {
                return (left, right);
            }
        }
    }
    (clean_part(text), String::new())
}

fn lift_trailing_date(text: &str) -> (String, Option<String>) {
    match extract_single_date(text) {
        Some((date, span)) if is_trailing_noise(&text[span.end..]) => {
            (remove_span(text, span.start..text.len()), Some(date))
        }
        _ => (text.to_string(), None),
    }
}

fn is_trailing_noise(rest: &str) -> bool {
    rest.chars()
        .all(|c| c.is_whitespace() || matches!(c, ')' | ']' | ',' | '.' | '|' | '*'))
}

fn remove_span(text: &str, span: std::ops::Range<usize>) -> String {
    let joined = format!("{}{}", &text[..span.start], &text[span.end..]);
    let joined = EMPTY_BRACKETS_RE.replace_all(&joined, "");
    clean_part(&joined)
}

pub(crate) fn clean_part(text: &str) -> String {
    let trimmed = text.trim().trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, '|' | ',' | '-' | '–' | '—' | ':' | '(' | '[')
    });
    strip_emphasis(trimmed)
}

/// An education or certification entry: `### <name> - <org>`, an optional date line,
/// then free-text details.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatedEntry {
    pub name: String,
    pub organization: String,
    pub date: String,
    pub details: Vec<String>,
}

impl DatedEntry {
    fn from_header(header: EntryHeader) -> Self {
        let date = header_date(&header);
        Self {
            name: header.primary,
            organization: header.secondary,
            date,
            details: Vec::new(),
        }
    }

    pub fn details_text(&self) -> String {
        self.details.join("\n")
    }

    /// Takes the date (and organization, if still missing) from a lead line.
    /// Returns false when the line carries neither.
    fn absorb_lead_line(&mut self, line: &str) -> bool {
        let inline = parse_entry_header(line);
        let date = header_date(&inline);
        if !date.is_empty() {
            if self.date.is_empty() {
                self.date = date;
            }
            let leftover = [inline.primary, inline.secondary]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" - ");
            if !leftover.is_empty() {
                if self.organization.is_empty() {
                    self.organization = leftover;
                } else {
                    self.details.push(leftover);
                }
            }
            return true;
        }
        let text = strip_emphasis(line);
        if self.organization.is_empty() && is_capitalized_label(&text) && text.chars().count() <= 80 {
            self.organization = text;
            return true;
        }
        false
    }
}

/// End date of a header's range (start when open-ended), else its lone date.
fn header_date(header: &EntryHeader) -> String {
    if !header.period.end.is_empty() {
        header.period.end.clone()
    } else if !header.period.start.is_empty() {
        header.period.start.clone()
    } else {
        header.date.clone().unwrap_or_default()
    }
}

/// Parses a `###` block into a `DatedEntry`.
pub fn parse_dated_block(block: &str) -> DatedEntry {
    let mut lines = block.lines();
    let mut entry = DatedEntry::from_header(parse_entry_header(lines.next().unwrap_or_default()));
    let mut lead_open = true;
    let mut lead_seen = 0;

    for line in lines {
        let kind = classify_line(line);
        if kind == LineKind::Blank {
            continue;
        }
        if lead_open && lead_seen < 2 && !is_bullet(line) {
            lead_seen += 1;
            if entry.absorb_lead_line(line) {
                continue;
            }
        }
        lead_open = false;
        match kind {
            LineKind::Bullet(text) | LineKind::Text(text) => entry.details.push(text),
            LineKind::ProjectMarker { .. } | LineKind::DateRange(_) => {
                entry.details.push(strip_emphasis(line))
            }
            LineKind::Heading { .. } | LineKind::Blank => {}
        }
    }
    entry
}

/// Fallback for sections without `###` blocks: one entry per line, with date-only
/// lines and bare organization lines folded into the previous entry.
pub fn parse_dated_lines(section: &str) -> Vec<DatedEntry> {
    let mut entries: Vec<DatedEntry> = Vec::new();
    let mut previous_was_bullet = false;

    for line in section.lines() {
        let kind = classify_line(line);
        if matches!(kind, LineKind::Blank | LineKind::Heading { .. }) {
            continue;
        }
        let bulleted = is_bullet(line);
        let header = parse_entry_header(line);

        if let Some(last) = entries.last_mut() {
            let date_only = header.primary.is_empty() && !header_date(&header).is_empty();
            if date_only {
                if last.date.is_empty() {
                    last.date = header_date(&header);
                }
                continue;
            }
            let continuation = !bulleted
                && !previous_was_bullet
                && last.organization.is_empty()
                && last.date.is_empty()
                && header.secondary.is_empty()
                && header_date(&header).is_empty();
            if continuation {
                last.organization = header.primary;
                continue;
            }
        }

        if header.primary.is_empty() {
            continue;
        }
        entries.push(DatedEntry::from_header(header));
        previous_was_bullet = bulleted;
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_company() {
        let h = parse_entry_header("### Engineer - Co");
        assert_eq!(h.primary, "Engineer");
        assert_eq!(h.secondary, "Co");
        assert!(h.period.is_empty());
    }

    #[test]
    fn test_inline_period_is_lifted() {
        let h = parse_entry_header("### **Lead Developer** | Acme Corp (Jan 2019 - Present)");
        assert_eq!(h.primary, "Lead Developer");
        assert_eq!(h.secondary, "Acme Corp");
        assert_eq!(h.period.start, "Jan 2019");
        assert!(h.period.is_current());
    }

    #[test]
    fn test_trailing_year_is_lifted() {
        let h = parse_entry_header("### MSc Computer Science - MIT (2018)");
        assert_eq!(h.primary, "MSc Computer Science");
        assert_eq!(h.secondary, "MIT");
        assert_eq!(h.date.as_deref(), Some("2018"));
    }

    #[test]
    fn test_at_separator() {
        let h = parse_entry_header("Data Analyst at Globex");
        assert_eq!(h.primary, "Data Analyst");
        assert_eq!(h.secondary, "Globex");
    }

    #[test]
    fn test_no_separator_keeps_whole_text() {
        let h = parse_entry_header("### Freelance");
        assert_eq!(h.primary, "Freelance");
        assert!(h.secondary.is_empty());
    }

    #[test]
    fn test_dated_block_with_year_line_and_details() {
        let entry = parse_dated_block("### MSc Computer Science - MIT\n2016 - 2018\n- Thesis on compilers\nGPA 3.9");
        assert_eq!(entry.name, "MSc Computer Science");
        assert_eq!(entry.organization, "MIT");
        assert_eq!(entry.date, "2018");
        assert_eq!(entry.details_text(), "Thesis on compilers\nGPA 3.9");
    }

    #[test]
    fn test_dated_block_org_on_second_line() {
        let entry = parse_dated_block("### Master of Science\nUniversity of Paris\n2019");
        assert_eq!(entry.organization, "University of Paris");
        assert_eq!(entry.date, "2019");
        assert!(entry.details.is_empty());
    }

    #[test]
    fn test_dated_block_bullet_second_line_is_detail() {
        let entry = parse_dated_block("### AWS Solutions Architect - Amazon\n- Valid until 2026");
        assert!(entry.date.is_empty());
        assert_eq!(entry.details, vec!["Valid until 2026".to_string()]);
    }

    #[test]
    fn test_dated_lines_fold_dates_and_orgs() {
        let entries = parse_dated_lines("Bachelor of Arts\nSorbonne\n2012\n\n- CKA - CNCF (2021)\n- PMP");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].organization, "Sorbonne");
        assert_eq!(entries[0].date, "2012");
        assert_eq!(entries[1].name, "CKA");
        assert_eq!(entries[1].date, "2021");
        assert_eq!(entries[2].name, "PMP");
    }

    #[test]
    fn test_comma_separator_is_last_resort() {
        let (left, right) = split_pair("Engineer - Acme, Paris");
        assert_eq!(left, "Engineer");
        assert_eq!(right, "Acme, Paris");
    }
}
