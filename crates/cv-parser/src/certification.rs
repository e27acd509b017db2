use crate::header::{parse_dated_block, parse_dated_lines};
use crate::models::Certification;
use crate::sections::split_blocks;

pub fn parse_certification_section(section: &str) -> Vec<Certification> {
    let blocks = split_blocks(section);
    let entries = if blocks.is_empty() {
        parse_dated_lines(section)
    } else {
        blocks.iter().map(|b| parse_dated_block(b)).collect()
    };

    entries
        .into_iter()
        .map(|entry| Certification {
            details: entry.details_text(),
            name: entry.name,
            issuer: entry.organization,
            year: entry.date,
        })
        .collect()
}
