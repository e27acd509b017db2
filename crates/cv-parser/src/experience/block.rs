use tracing::debug;

use super::sub_experience;
use super::RawExperience;
use crate::dates::extract_single_date;
use crate::header::parse_entry_header;
use crate::lines::{classify_line, is_capitalized_label, strip_emphasis, LineKind};
use crate::options::ParseOptions;

/// Lines after the header that may still carry the company or the dates.
const LEAD_LINES: usize = 2;

/// Parses one `###` block. Usually yields one record; yields several when the block
/// bundles multiple projects.
pub(crate) fn parse_experience_block(block: &str, options: &ParseOptions) -> Vec<RawExperience> {
    let mut lines = block.lines();
    let header = parse_entry_header(lines.next().unwrap_or_default());
    let body: Vec<&str> = lines.collect();

    let mut parent = RawExperience {
        title: header.primary,
        company: header.secondary,
        period: header.period,
        bullets: Vec::new(),
    };
    if parent.period.is_empty() {
        if let Some(date) = header.date {
            parent.period.start = date;
        }
    }

    let consumed = read_lead_lines(&mut parent, &body);
    let rest = &body[consumed..];

    if sub_experience::should_split(block, options) {
        if let Some(split) = sub_experience::split(&parent, rest) {
            debug!(
                title = %parent.title,
                parts = split.len(),
                "experience block decomposed into sub-experiences"
            );
            return split;
        }
    }

    for line in rest {
        match classify_line(line) {
            LineKind::Bullet(text) | LineKind::Text(text) => parent.bullets.push(text),
            LineKind::ProjectMarker { .. } => parent.bullets.push(strip_emphasis(line)),
            LineKind::DateRange(period) if parent.period.is_empty() => parent.period = period,
            // Dates of a sub-team that did not warrant a split stay visible.
            LineKind::DateRange(_) => parent.bullets.push(strip_emphasis(line)),
            _ => {}
        }
    }

    vec![parent]
}

/// Consumes the company/date lines that follow the header. Returns how many body
/// lines were used.
fn read_lead_lines(parent: &mut RawExperience, body: &[&str]) -> usize {
    let mut idx = 0;
    for _ in 0..LEAD_LINES {
        while body.get(idx).is_some_and(|l| l.trim().is_empty()) {
            idx += 1;
        }
        let Some(line) = body.get(idx) else {
            break;
        };

        match classify_line(line) {
            LineKind::DateRange(period) if parent.period.is_empty() => {
                parent.period = period;
            }
            LineKind::Text(text) => {
                let inline = parse_entry_header(&text);
                if let Some(date) = lone_date(&text).filter(|_| parent.period.is_empty()) {
                    parent.period.start = date;
                } else if !inline.period.is_empty() && parent.period.is_empty() {
                    // "Acme Corp | Paris | 2019 - 2021"
                    parent.period = inline.period;
                    if parent.company.is_empty() {
                        parent.company = inline.primary;
                    }
                } else if parent.company.is_empty()
                    && inline.period.is_empty()
                    && is_capitalized_label(&text)
                    && text.chars().count() <= 60
                {
                    parent.company = text;
                } else {
                    break;
                }
            }
            _ => break,
        }
        idx += 1;
    }
    idx
}

/// The date when `text` holds nothing else: "2017", "Mar 2019", "(2017)".
fn lone_date(text: &str) -> Option<String> {
    let (date, span) = extract_single_date(text)?;
    let mut rest = text[..span.start].chars().chain(text[span.end..].chars());
    rest.all(|c| !c.is_alphanumeric()).then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::PRESENT;

    fn parse(block: &str) -> Vec<RawExperience> {
        parse_experience_block(block, &ParseOptions::default())
    }

    #[test]
    fn test_header_and_date_line() {
        let exps = parse("### Engineer - Co\n2020 - Present\n- Did X");
        assert_eq!(exps.len(), 1);
        let exp = &exps[0];
        assert_eq!(exp.title, "Engineer");
        assert_eq!(exp.company, "Co");
        assert_eq!(exp.period.start, "2020");
        assert_eq!(exp.period.end, PRESENT);
        assert_eq!(exp.bullets, vec!["Did X".to_string()]);
    }

    #[test]
    fn test_company_on_second_line() {
        let exps = parse("### Backend Engineer\nGlobex Corporation\nMar 2019 - Jun 2021\n- Built APIs\n- Cut costs by 30%");
        let exp = &exps[0];
        assert_eq!(exp.title, "Backend Engineer");
        assert_eq!(exp.company, "Globex Corporation");
        assert_eq!(exp.period.start, "Mar 2019");
        assert_eq!(exp.period.end, "Jun 2021");
        assert_eq!(exp.bullets.len(), 2);
    }

    #[test]
    fn test_company_and_dates_on_one_line() {
        let exps = parse("### Data Scientist\nInitech | 2017 - 2019\n- Modelled churn");
        assert_eq!(exps[0].company, "Initech");
        assert_eq!(exps[0].period.start, "2017");
        assert_eq!(exps[0].period.end, "2019");
    }

    #[test]
    fn test_bullet_second_line_is_not_a_date() {
        let exps = parse("### Engineer - Co\n- Shipped 2019 - 2020 roadmap");
        assert!(exps[0].period.is_empty());
        assert_eq!(exps[0].bullets, vec!["Shipped 2019 - 2020 roadmap".to_string()]);
    }

    #[test]
    fn test_plain_description_lines_are_kept() {
        let exps = parse("### Engineer - Co\n2020 - 2021\nOwned the billing platform.\n- Did X");
        assert_eq!(
            exps[0].bullets,
            vec!["Owned the billing platform.".to_string(), "Did X".to_string()]
        );
    }

    #[test]
    fn test_inline_header_period() {
        let exps = parse("### Engineer - Co (2015 - 2018)\n- Did X");
        assert_eq!(exps[0].company, "Co");
        assert_eq!(exps[0].period.start, "2015");
        assert_eq!(exps[0].period.end, "2018");
    }

    #[test]
    fn test_lone_year_line_is_the_start_date() {
        let exps = parse("### Intern - Co3\n2017\n- z");
        assert_eq!(exps[0].period.start, "2017");
        assert!(exps[0].period.end.is_empty());
        assert_eq!(exps[0].bullets, vec!["z".to_string()]);
    }

    #[test]
    fn test_lone_month_year_line_after_company() {
        let exps = parse("### Analyst\nUmbrella Corp\nMar 2019\n- Reported");
        assert_eq!(exps[0].company, "Umbrella Corp");
        assert_eq!(exps[0].period.start, "Mar 2019");
        assert_eq!(exps[0].bullets, vec!["Reported".to_string()]);
    }

    #[test]
    fn test_sentence_with_a_year_is_not_a_date_line() {
        let exps = parse("### Engineer - Co\nJoined in 2017 to build payments\n- x");
        assert!(exps[0].period.is_empty());
        assert_eq!(exps[0].bullets[0], "Joined in 2017 to build payments");
    }

    #[test]
    fn test_unsplit_project_marker_loses_emphasis() {
        let exps = parse("### A - B\n2020 - 2021\n**Billing** (6 months)\n- x");
        assert_eq!(exps.len(), 1);
        assert_eq!(
            exps[0].bullets,
            vec!["Billing (6 months)".to_string(), "x".to_string()]
        );
    }

    #[test]
    fn test_single_sub_team_keeps_its_dates_as_a_bullet() {
        let exps = parse("### Eng - Co\n2020 - 2023\n- a\nPayments Squad\n2021 - 2022\n- b");
        assert_eq!(exps.len(), 1);
        assert_eq!(exps[0].period.start, "2020");
        assert_eq!(exps[0].period.end, "2023");
        assert_eq!(
            exps[0].bullets,
            vec![
                "a".to_string(),
                "Payments Squad".to_string(),
                "2021 - 2022".to_string(),
                "b".to_string(),
            ]
        );
    }
}
