//! Section extraction (`##` level) and block splitting (`###` level).

use regex::Regex;
use tracing::debug;

use crate::lines::heading_level;

pub const EXPERIENCE_TITLES: &[&str] = &[
    "Professional Experience",
    "Work Experience",
    "Experience",
    "Employment History",
    "Work History",
    "Career History",
    "Expérience Professionnelle",
    "Expériences Professionnelles",
    "Expérience",
    "Expériences",
    "Parcours Professionnel",
];

pub const EDUCATION_TITLES: &[&str] = &[
    "Education",
    "Academic Background",
    "Education & Training",
    "Formation",
    "Formations",
    "Diplômes",
];

pub const SKILLS_TITLES: &[&str] = &[
    "Skills",
    "Technical Skills",
    "Core Skills",
    "Key Skills",
    "Competencies",
    "Core Competencies",
    "Compétences",
    "Compétences Techniques",
];

pub const CERTIFICATION_TITLES: &[&str] = &[
    "Certifications",
    "Certification",
    "Certificates",
    "Licenses & Certifications",
];

pub const LANGUAGE_TITLES: &[&str] = &["Languages", "Language Skills", "Langues"];

pub const HOBBY_TITLES: &[&str] = &[
    "Hobbies",
    "Interests",
    "Hobbies & Interests",
    "Centres d'intérêt",
    "Loisirs",
];

pub const SUMMARY_TITLES: &[&str] = &[
    "Summary",
    "Professional Summary",
    "Profile",
    "Professional Profile",
    "About",
    "About Me",
    "Objective",
    "Profil",
    "Résumé",
];

/// True when `text` is one of the known section titles, in any casing.
pub fn is_section_title(text: &str) -> bool {
    let needle = text.trim().trim_end_matches(':').trim();
    [
        EXPERIENCE_TITLES,
        EDUCATION_TITLES,
        SKILLS_TITLES,
        CERTIFICATION_TITLES,
        LANGUAGE_TITLES,
        HOBBY_TITLES,
        SUMMARY_TITLES,
    ]
    .iter()
    .flat_map(|titles| titles.iter())
    .any(|title| fold_title(title) == fold_title(needle))
}

/// Accent variants recognised in titles, keyed by their base letter.
const ACCENT_CLASSES: &[(char, &str)] = &[
    ('a', "[aàâ]"),
    ('c', "[cç]"),
    ('e', "[eéèêë]"),
    ('i', "[iîï]"),
    ('o', "[oô]"),
    ('u', "[uùû]"),
];

fn fold_letter(c: char) -> char {
    if !c.is_alphabetic() {
        return c;
    }
    ACCENT_CLASSES
        .iter()
        .find(|(_, class)| class.contains(c))
        .map_or(c, |(base, _)| *base)
}

/// Lowercase, unaccented, singular: "Expériences" -> "experience".
fn fold_title(text: &str) -> String {
    let folded: String = text.to_lowercase().chars().map(fold_letter).collect();
    match folded.strip_suffix('s') {
        Some(singular) => singular.to_string(),
        None => folded,
    }
}

/// Regex for one title: accents optional, trailing plural `s` optional.
fn title_pattern(title: &str) -> String {
    let mut pattern: String = title
        .to_lowercase()
        .chars()
        .map(|c| {
            let base = fold_letter(c);
            ACCENT_CLASSES
                .iter()
                .find(|(letter, _)| *letter == base)
                .map_or_else(|| regex::escape(&c.to_string()), |(_, class)| class.to_string())
        })
        .collect();
    pattern.push_str("s?");
    pattern
}

fn section_header_regex(titles: &[&str], levels: &str) -> Option<Regex> {
    if titles.is_empty() {
        return None;
    }
    let alternation = titles
        .iter()
        .map(|t| title_pattern(t))
        .collect::<Vec<_>>()
        .join("|");
    // Leading/trailing noise covers bold markers, emoji and a trailing colon.
    let pattern = format!(
        r"(?im)^[ \t]*{levels}[ \t]*[^\p{{L}}\p{{N}}\n#]*(?:{alternation})[^\p{{L}}\p{{N}}\n]*$"
    );
    Regex::new(&pattern).ok()
}

/// Text under the `## <title>` header matching any of `titles`, up to the next
/// `#`/`##` header. Empty when the section is absent.
pub fn extract_section(doc: &str, titles: &[&str]) -> String {
    let Some(re) = section_header_regex(titles, "##") else {
        return String::new();
    };
    let Some(found) = re.find(doc) else {
        return String::new();
    };
    let rest = &doc[found.end()..];
    rest[..section_end(rest)].trim().to_string()
}

/// Byte offset of the first heading (levels 1-3) matching any of `titles`.
pub fn heading_offset(doc: &str, titles: &[&str]) -> Option<usize> {
    section_header_regex(titles, "#{1,3}")?
        .find(doc)
        .map(|m| m.start())
}

fn section_end(rest: &str) -> usize {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if heading_level(line).is_some_and(|level| level <= 2) {
            return offset;
        }
        offset += line.len();
    }
    rest.len()
}

fn is_block_header(line: &str) -> bool {
    heading_level(line) == Some(3)
}

/// Splits a section into `###` blocks.
///
/// Primary pass: a block starts at a `###` line that opens the section or follows a
/// blank line. Generated documents often omit that blank line, so any block still
/// holding several `###` markers is re-split at every `###` line.
pub fn split_blocks(section: &str) -> Vec<String> {
    let primary = primary_split(section);

    if !primary.iter().any(|block| header_count(block) > 1) {
        return primary;
    }

    debug!(
        blocks = primary.len(),
        "block contains several ### markers, re-splitting line by line"
    );
    primary
        .into_iter()
        .flat_map(|block| {
            if header_count(&block) > 1 {
                split_at_every_header(&block)
            } else {
                vec![block]
            }
        })
        .collect()
}

fn header_count(block: &str) -> usize {
    block.lines().filter(|line| is_block_header(line)).count()
}

fn primary_split(section: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;
    let mut previous_blank = true;

    for line in section.lines() {
        if is_block_header(line) && previous_blank {
            if let Some(lines) = current.take() {
                blocks.push(lines.join("\n").trim().to_string());
            }
            current = Some(vec![line]);
        } else if let Some(lines) = current.as_mut() {
            lines.push(line);
        }
        previous_blank = line.trim().is_empty();
    }

    if let Some(lines) = current {
        blocks.push(lines.join("\n").trim().to_string());
    }
    blocks
}

fn split_at_every_header(block: &str) -> Vec<String> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    for line in block.lines() {
        if is_block_header(line) || blocks.is_empty() {
            blocks.push(vec![line]);
        } else if let Some(last) = blocks.last_mut() {
            last.push(line);
        }
    }
    blocks
        .into_iter()
        .map(|lines| lines.join("\n").trim().to_string())
        .filter(|b| !b.is_empty())
        .collect()
}
