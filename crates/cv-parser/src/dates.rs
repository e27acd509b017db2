//! Date tokens and date ranges.
//!
//! - `normalize_date` canonicalizes one token ("janvier 2020", "2020-01", "01/2020",
//!   "2020", "Actuel") into `"Mon YYYY"`, `"YYYY"` or `"Present"`.
//! - `parse_period_line` pulls a `(start, end)` pair out of a free-text line.
//!
//! Both are total: an unrecognized token comes back unchanged and a line without a
//! range yields an empty `Period`, which callers read as "unknown".

use std::ops::Range;
use std::sync::LazyLock;

use chrono::Month;
use regex::Regex;

pub const PRESENT: &str = "Present";

/// English and French month names, full or abbreviated.
const MONTH_WORD: &str = r"(?:jan(?:uary|vier)?|feb(?:ruary)?|f[ée]v(?:rier)?|mar(?:ch|s)?|apr(?:il)?|avr(?:il)?|may|mai|june?|juin|july?|juil(?:let)?|aug(?:ust)?|ao[uû]t?|sept?(?:ember|embre)?|oct(?:ober|obre)?|nov(?:ember|embre)?|d[ée]c(?:ember|embre)?)\.?";

const PRESENT_WORD: &str = r"(?:pr[ée]sent|current(?:ly)?|now|ongoing|today|to date|actuel(?:le)?(?:ment)?|aujourd['’]hui|en cours)";

const YEAR: &str = r"\b(?:19|20)\d{2}\b";

/// Range separators: dashes of any width, plus "to" / "à" / "au" / "until".
const SEP: &str = r"\s*(?:[-–—]+|\bto\b|\bà\b|\bau\b|\buntil\b)\s*";

fn month_granular() -> String {
    format!(
        r"(?:\b{MONTH_WORD},?\s+(?:19|20)\d{{2}}\b|\b\d{{1,2}}[/.-](?:19|20)\d{{2}}\b|\b(?:19|20)\d{{2}}[/-]\d{{1,2}}\b)"
    )
}

static MONTH_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^({MONTH_WORD}),?\s+(\d{{4}})$")).expect("valid month-year regex")
});
static YEAR_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})[-/](\d{1,2})$").expect("valid year-month regex"));
static MONTH_NUM_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[/.-](\d{4})$").expect("valid month/year regex"));
static YEAR_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid year regex"));
static PRESENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^{PRESENT_WORD}$")).expect("valid present regex")
});

/// Free-form month/year range: "Jan 2020 - Mar 2022", "01/2020 – Present".
static MONTH_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mg = month_granular();
    Regex::new(&format!(
        r"(?i)({mg}){SEP}({mg}|{YEAR}|{PRESENT_WORD}\b)"
    ))
    .expect("valid month range regex")
});

/// Numeric year range: "2018 - 2020", "2020 — Present".
static YEAR_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mg = month_granular();
    Regex::new(&format!(
        r"(?i)({YEAR}){SEP}({mg}|{YEAR}|{PRESENT_WORD}\b)"
    ))
    .expect("valid year range regex")
});

/// Month names sharing one trailing year: "Jan - Mar 2020".
static MONTH_NAME_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b({MONTH_WORD}){SEP}({MONTH_WORD}),?\s+((?:19|20)\d{{2}})\b"
    ))
    .expect("valid month name range regex")
});

static SINGLE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i){}|{YEAR}", month_granular())).expect("valid single date regex")
});

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(YEAR).expect("valid year regex"));

/// A start/end pair. Empty strings mean "unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Period {
    pub start: String,
    pub end: String,
}

impl Period {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: normalize_date(start),
            end: normalize_date(end),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }

    pub fn is_current(&self) -> bool {
        self.end == PRESENT
    }
}

/// Canonicalizes one date token. Never fails; unknown input is returned as-is.
pub fn normalize_date(raw: &str) -> String {
    let token = raw.trim();
    if token.is_empty() {
        return raw.to_string();
    }

    if PRESENT_RE.is_match(token) {
        return PRESENT.to_string();
    }

    if let Some(caps) = MONTH_YEAR_RE.captures(token) {
        return format!("{} {}", month_abbreviation(&caps[1]), &caps[2]);
    }

    if let Some(caps) = YEAR_MONTH_RE.captures(token) {
        if let Some(month) = numeric_month(&caps[2]) {
            return format!("{month} {}", &caps[1]);
        }
    }

    if let Some(caps) = MONTH_NUM_YEAR_RE.captures(token) {
        if let Some(month) = numeric_month(&caps[1]) {
            return format!("{month} {}", &caps[2]);
        }
    }

    if YEAR_ONLY_RE.is_match(token) {
        return token.to_string();
    }

    raw.to_string()
}

/// First three letters of the month word, capitalized ("février" → "Fév").
fn month_abbreviation(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphabetic())
        .take(3)
        .enumerate()
        .flat_map(|(i, c)| {
            if i == 0 {
                c.to_uppercase().collect::<Vec<_>>()
            } else {
                c.to_lowercase().collect::<Vec<_>>()
            }
        })
        .collect()
}

fn numeric_month(digits: &str) -> Option<String> {
    let number: u8 = digits.parse().ok()?;
    let month = Month::try_from(number).ok()?;
    Some(month.name()[..3].to_string())
}

/// Finds the first date range in `line`, returning it with its byte span.
pub fn find_period(line: &str) -> Option<(Period, Range<usize>)> {
    if let Some(caps) = MONTH_RANGE_RE.captures(line) {
        let span = caps.get(0)?.range();
        return Some((Period::new(&caps[1], &caps[2]), span));
    }

    if let Some(caps) = YEAR_RANGE_RE.captures(line) {
        let span = caps.get(0)?.range();
        return Some((Period::new(&caps[1], &caps[2]), span));
    }

    if let Some(caps) = MONTH_NAME_RANGE_RE.captures(line) {
        let span = caps.get(0)?.range();
        let year = &caps[3];
        let start = format!("{} {year}", &caps[1]);
        let end = format!("{} {year}", &caps[2]);
        return Some((Period::new(&start, &end), span));
    }

    None
}

/// Extracts a `(start, end)` pair from one line; both empty when nothing matches.
pub fn parse_period_line(line: &str) -> Period {
    find_period(line).map(|(period, _)| period).unwrap_or_default()
}

/// Number of lines in `text` that carry a date range.
pub fn count_periods(text: &str) -> usize {
    text.lines().filter(|line| find_period(line).is_some()).count()
}

/// First standalone date token ("Mar 2021", "2019") in `text`, normalized.
pub fn extract_single_date(text: &str) -> Option<(String, Range<usize>)> {
    SINGLE_DATE_RE
        .find(text)
        .map(|m| (normalize_date(m.as_str()), m.range()))
}

pub fn contains_year(text: &str) -> bool {
    YEAR_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_month_year() {
        assert_eq!(normalize_date("January 2020"), "Jan 2020");
        assert_eq!(normalize_date("sept. 2019"), "Sep 2019");
        assert_eq!(normalize_date("March, 2021"), "Mar 2021");
    }

    #[test]
    fn test_normalize_french_month() {
        assert_eq!(normalize_date("février 2020"), "Fév 2020");
        assert_eq!(normalize_date("décembre 2018"), "Déc 2018");
    }

    #[test]
    fn test_normalize_numeric_forms() {
        assert_eq!(normalize_date("2020-01"), "Jan 2020");
        assert_eq!(normalize_date("01/2020"), "Jan 2020");
        assert_eq!(normalize_date("11-2019"), "Nov 2019");
        assert_eq!(normalize_date("2020"), "2020");
    }

    #[test]
    fn test_normalize_present_synonyms() {
        for token in ["Present", "current", "Actuel", "aujourd'hui", "en cours", "Présent"] {
            assert_eq!(normalize_date(token), PRESENT, "token: {token}");
        }
    }

    #[test]
    fn test_normalize_unknown_is_unchanged() {
        assert_eq!(normalize_date("sometime soon"), "sometime soon");
        assert_eq!(normalize_date("13/2020"), "13/2020");
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "Jan 2020",
            "january 2020",
            "2020-01",
            "01/2020",
            "12-2022",
            "2020",
            "Present",
            "currently",
            "juin 2021",
            "août 2017",
            "garbage",
            "  2019  ",
            "13/2020",
        ];
        for input in inputs {
            let once = normalize_date(input);
            assert_eq!(normalize_date(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_normalize_is_total_on_odd_input() {
        for input in ["", "   ", "—", "2020-99", "ééé 2020", "📅", "0/0000", "\n"] {
            let _ = normalize_date(input);
        }
    }

    #[test]
    fn test_period_year_range() {
        let p = parse_period_line("2018 - 2020");
        assert_eq!(p.start, "2018");
        assert_eq!(p.end, "2020");
    }

    #[test]
    fn test_period_open_end() {
        let p = parse_period_line("2020 – Present");
        assert_eq!(p.start, "2020");
        assert_eq!(p.end, PRESENT);
        assert!(p.is_current());
    }

    #[test]
    fn test_period_month_range_with_em_dash() {
        let p = parse_period_line("Jan 2020 — Mar 2022 | Paris");
        assert_eq!(p.start, "Jan 2020");
        assert_eq!(p.end, "Mar 2022");
    }

    #[test]
    fn test_period_numeric_months() {
        let p = parse_period_line("01/2019 - 2021-06");
        assert_eq!(p.start, "Jan 2019");
        assert_eq!(p.end, "Jun 2021");
    }

    #[test]
    fn test_period_french_open_end() {
        let p = parse_period_line("Septembre 2021 - Actuel");
        assert_eq!(p.start, "Sep 2021");
        assert_eq!(p.end, PRESENT);
    }

    #[test]
    fn test_period_month_names_sharing_year() {
        let p = parse_period_line("Jan - Mar 2020");
        assert_eq!(p.start, "Jan 2020");
        assert_eq!(p.end, "Mar 2020");
    }

    #[test]
    fn test_period_inside_parentheses() {
        let p = parse_period_line("Engineer at Acme (2019 - 2021)");
        assert_eq!(p.start, "2019");
        assert_eq!(p.end, "2021");
    }

    #[test]
    fn test_period_no_match_is_empty() {
        let p = parse_period_line("Led a team of engineers");
        assert!(p.is_empty());
        assert!(!p.is_current());
    }

    #[test]
    fn test_period_to_separator() {
        let p = parse_period_line("March 2017 to June 2019");
        assert_eq!(p.start, "Mar 2017");
        assert_eq!(p.end, "Jun 2019");
    }

    #[test]
    fn test_count_periods_counts_lines() {
        let text = "2018 - 2019\n- did a thing\nJan 2020 - Present";
        assert_eq!(count_periods(text), 2);
    }

    #[test]
    fn test_extract_single_date() {
        let (date, _) = extract_single_date("Graduated June 2016 with honours").unwrap();
        assert_eq!(date, "Jun 2016");
        let (year, _) = extract_single_date("MIT, 2015").unwrap();
        assert_eq!(year, "2015");
        assert!(extract_single_date("no date here").is_none());
    }

    #[test]
    fn test_contains_year_ignores_short_numbers() {
        assert!(contains_year("Since 2019"));
        assert!(!contains_year("Team of 12"));
    }
}
