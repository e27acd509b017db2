use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::lines::{classify_line, strip_emphasis, LineKind};

/// "Languages: ", "**Cloud:** " prefixes in grouped skill lists.
static CATEGORY_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^:,;]{1,40}:\s*(?:\*\*)?\s*").expect("valid category label regex"));

/// Flattens a skills/hobbies section into items.
///
/// Each line loses its bullet marker and category label, then everything is joined
/// with commas and re-split on `,` / `;`, so one-item-per-line and comma-separated
/// input both end up as one flat sequence. Duplicates are dropped case-insensitively.
pub fn parse_flat_list(section: &str) -> Vec<String> {
    let joined = section
        .lines()
        .filter_map(|line| match classify_line(line) {
            LineKind::Bullet(text) | LineKind::Text(text) => Some(text),
            LineKind::DateRange(_) | LineKind::ProjectMarker { .. } => Some(line.trim().to_string()),
            LineKind::Heading { .. } | LineKind::Blank => None,
        })
        .map(|line| strip_emphasis(&CATEGORY_LABEL_RE.replace(&strip_emphasis(&line), "")))
        .collect::<Vec<_>>()
        .join(", ");

    let mut seen = HashSet::new();
    joined
        .split([',', ';', '|', '•', '·'])
        .map(|item| strip_emphasis(item.trim().trim_end_matches('.')))
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}
