//! Embedded roles inside one experience block, e.g. several client engagements
//! listed under a single consulting employer.
//!
//! Lines are tagged with `classify_line` and grouped by a small state machine:
//!
//! - `AwaitingEntity`: no sub-experience open; bullets and dates belong to the parent.
//! - `InHeader`: a sub-experience was just opened and may still receive its dates or
//!   an inline "Client | 2019 - 2020" line.
//! - `InBody`: the sub-experience is collecting bullets; a bare date line only fills
//!   in dates it does not have yet.
//!
//! A sub-experience opens on a `Project (N months)` marker, a `####` heading, or a
//! capitalized standalone line directly followed by a date-range line. Blocks are
//! only decomposed when at least two sub-experiences are found.

use std::sync::LazyLock;

use regex::Regex;

use super::RawExperience;
use crate::dates::{count_periods, Period};
use crate::header::parse_entry_header;
use crate::lines::{classify_line, is_capitalized_label, LineKind};
use crate::options::ParseOptions;

const MIN_SUB_EXPERIENCES: usize = 2;

/// "Client Alpha - Lead Developer"
static CAPITALIZED_DASH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\**\p{Lu}[^\n]{1,60}?\**\s+[-–—]\s+\**\p{Lu}[^\n]{0,80}$")
        .expect("valid capitalized dash regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingEntity,
    InHeader,
    InBody,
}

/// Cheap pre-check: long blocks, several date ranges, or project-style lines.
pub(crate) fn should_split(block: &str, options: &ParseOptions) -> bool {
    if block.chars().count() > options.sub_experience_min_chars || count_periods(block) > 1 {
        return true;
    }
    block.lines().skip(1).any(|line| match classify_line(line) {
        LineKind::ProjectMarker { .. } => true,
        LineKind::Text(text) => CAPITALIZED_DASH_RE.is_match(&text),
        _ => false,
    })
}

/// Groups `lines` (the block body after the header and lead lines) into
/// sub-experiences. `None` when the block should stay a single record.
pub(crate) fn split(parent: &RawExperience, lines: &[&str]) -> Option<Vec<RawExperience>> {
    let tagged: Vec<LineKind> = lines
        .iter()
        .map(|line| classify_line(line))
        .filter(|kind| *kind != LineKind::Blank)
        .collect();

    let mut state = State::AwaitingEntity;
    let mut parent_bullets: Vec<String> = Vec::new();
    let mut parent_period = parent.period.clone();
    let mut subs: Vec<RawExperience> = Vec::new();

    for (idx, kind) in tagged.iter().enumerate() {
        let next_is_date = matches!(tagged.get(idx + 1), Some(LineKind::DateRange(_)));

        match (kind, state) {
            (LineKind::ProjectMarker { name, .. }, _) => {
                subs.push(open_sub(name, parent));
                state = State::InHeader;
            }
            (LineKind::Heading { level, text }, _) if *level >= 4 => {
                subs.push(open_sub(text, parent));
                state = State::InHeader;
            }
            (LineKind::Text(text), _) if next_is_date && is_capitalized_label(text) => {
                subs.push(open_sub(text, parent));
                state = State::InHeader;
            }
            (LineKind::DateRange(period), State::AwaitingEntity) => {
                if parent_period.is_empty() {
                    parent_period = period.clone();
                }
            }
            (LineKind::DateRange(period), State::InHeader | State::InBody) => {
                if let Some(current) = subs.last_mut() {
                    if current.period.is_empty() {
                        current.period = period.clone();
                    }
                }
                state = State::InBody;
            }
            (LineKind::Text(text), State::InHeader) => {
                let Some(current) = subs.last_mut() else {
                    continue;
                };
                let inline = parse_entry_header(text);
                if !inline.period.is_empty() && current.period.is_empty() {
                    current.period = inline.period;
                    if !inline.primary.is_empty() {
                        current.company = inline.primary;
                    }
                } else {
                    current.bullets.push(text.clone());
                }
                state = State::InBody;
            }
            (LineKind::Bullet(text) | LineKind::Text(text), State::AwaitingEntity) => {
                parent_bullets.push(text.clone());
            }
            (LineKind::Bullet(text) | LineKind::Text(text), State::InHeader | State::InBody) => {
                if let Some(current) = subs.last_mut() {
                    current.bullets.push(text.clone());
                }
                state = State::InBody;
            }
            _ => {}
        }
    }

    if subs.len() < MIN_SUB_EXPERIENCES {
        return None;
    }

    let mut records = Vec::with_capacity(subs.len() + 1);
    if !parent_bullets.is_empty() {
        records.push(RawExperience {
            title: parent.title.clone(),
            company: parent.company.clone(),
            period: parent_period.clone(),
            bullets: parent_bullets,
        });
    }
    records.extend(subs.into_iter().map(|mut sub| {
        if sub.period.is_empty() {
            sub.period = parent_period.clone();
        }
        sub
    }));
    Some(records)
}

/// New sub-experience from a label line; missing fields come from the parent.
fn open_sub(label: &str, parent: &RawExperience) -> RawExperience {
    let header = parse_entry_header(label);
    let title = if header.primary.is_empty() {
        parent.title.clone()
    } else {
        header.primary
    };
    let company = if header.secondary.is_empty() {
        parent.company.clone()
    } else {
        header.secondary
    };
    let period = match (header.period.is_empty(), header.date) {
        (false, _) => header.period,
        (true, Some(date)) => Period {
            start: date,
            end: String::new(),
        },
        (true, None) => Period::default(),
    };
    RawExperience {
        title,
        company,
        period,
        bullets: Vec::new(),
    }
}
