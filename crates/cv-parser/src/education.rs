use tracing::debug;

use crate::dates::PRESENT;
use crate::header::{parse_dated_block, parse_dated_lines, DatedEntry};
use crate::models::Education;
use crate::sections::split_blocks;

pub fn parse_education_section(section: &str) -> Vec<Education> {
    let blocks = split_blocks(section);
    let entries: Vec<DatedEntry> = if blocks.is_empty() {
        if !section.trim().is_empty() {
            debug!("education text has no ### blocks, parsing line by line");
        }
        parse_dated_lines(section)
    } else {
        blocks.iter().map(|b| parse_dated_block(b)).collect()
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(order, entry)| to_education(entry, order))
        .collect()
}

fn to_education(entry: DatedEntry, order: usize) -> Education {
    let details = entry.details_text();
    Education {
        id: format!("edu-{order}"),
        is_current: entry.date == PRESENT,
        degree: entry.name,
        institution: entry.organization,
        end_date: entry.date.clone(),
        year: entry.date,
        details,
        order,
    }
}
