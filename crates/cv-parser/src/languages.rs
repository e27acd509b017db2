use std::sync::LazyLock;

use regex::Regex;

use crate::lines::{classify_line, strip_emphasis, LineKind};
use crate::models::LanguageEntry;

static PAREN_LEVEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\((.+)\)\s*$").expect("valid language level regex"));

/// One entry per line. Formats tried in order: `French | Native`, `French - Native`,
/// `French (Native)`, `French: Native`; anything else is a bare name.
pub fn parse_languages(section: &str) -> Vec<LanguageEntry> {
    section
        .lines()
        .filter_map(|line| match classify_line(line) {
            LineKind::Bullet(text) | LineKind::Text(text) => Some(strip_emphasis(&text)),
            _ => None,
        })
        .flat_map(|line| split_enumeration(&line))
        .filter_map(|item| parse_language_item(&item))
        .collect()
}

/// "French, English, Spanish" or "French (C2), English (B2)" on a single line.
fn split_enumeration(line: &str) -> Vec<String> {
    let has_delimiter = line.contains('|') || line.contains(':') || line.contains(" - ");
    if has_delimiter || !(line.contains(',') || line.contains(';')) {
        return vec![line.to_string()];
    }
    line.split([',', ';'])
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

fn parse_language_item(item: &str) -> Option<LanguageEntry> {
    let item = item.trim();
    if item.is_empty() {
        return None;
    }

    let (name, level) = if let Some((name, level)) = item.split_once('|') {
        (name, Some(level))
    } else if let Some((name, level)) = split_dash(item) {
        (name, Some(level))
    } else if let Some(caps) = PAREN_LEVEL_RE.captures(item) {
        let (_, [name, level]) = caps.extract();
        (name, Some(level))
    } else if let Some((name, level)) = item.split_once(':') {
        (name, Some(level))
    } else {
        (item, None)
    };

    let name = strip_emphasis(name);
    if name.is_empty() {
        return None;
    }
    let level = level
        .map(strip_emphasis)
        .map(|l| l.trim_matches(|c: char| c == '|' || c.is_whitespace()).to_string())
        .filter(|l| !l.is_empty());
    Some(LanguageEntry { name, level })
}

fn split_dash(item: &str) -> Option<(&str, &str)> {
    [" - ", " – ", " — "]
        .iter()
        .find_map(|sep| item.split_once(sep))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, level: Option<&str>) -> LanguageEntry {
        LanguageEntry {
            name: name.to_string(),
            level: level.map(str::to_string),
        }
    }

    #[test]
    fn test_pipe_dash_and_paren_formats() {
        let langs = parse_languages("- French | Native\n- English - Fluent (C1)\n- Spanish (Intermediate)");
        assert_eq!(
            langs,
            vec![
                entry("French", Some("Native")),
                entry("English", Some("Fluent (C1)")),
                entry("Spanish", Some("Intermediate")),
            ]
        );
    }

    #[test]
    fn test_colon_and_bold() {
        let langs = parse_languages("**German**: Basic");
        assert_eq!(langs, vec![entry("German", Some("Basic"))]);
    }

    #[test]
    fn test_name_only_fallback() {
        assert_eq!(parse_languages("Italian"), vec![entry("Italian", None)]);
    }

    #[test]
    fn test_comma_enumeration_on_one_line() {
        let langs = parse_languages("French (Native), English (C1), Arabic");
        assert_eq!(langs.len(), 3);
        assert_eq!(langs[1], entry("English", Some("C1")));
        assert_eq!(langs[2], entry("Arabic", None));
    }

    #[test]
    fn test_headings_and_blanks_are_skipped() {
        let langs = parse_languages("### Spoken\n\n- Dutch | B2");
        assert_eq!(langs, vec![entry("Dutch", Some("B2"))]);
    }
}
