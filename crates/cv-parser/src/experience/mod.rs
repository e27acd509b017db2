//! Work experience extraction.
//!
//! `###` blocks are parsed by `block`; when a section has no `###` structure at all the
//! permissive `headerless` heuristics take over. Large blocks may be decomposed into
//! several records by `sub_experience`.

mod block;
mod headerless;
mod sub_experience;

use tracing::debug;

use crate::dates::Period;
use crate::models::Experience;
use crate::options::ParseOptions;
use crate::sections::split_blocks;

/// An experience before ids, ordering and the bullet placeholder are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RawExperience {
    pub title: String,
    pub company: String,
    pub period: Period,
    pub bullets: Vec<String>,
}

impl RawExperience {
    fn into_experience(self, order: usize, placeholder: &str) -> Experience {
        let bullets = if self.bullets.is_empty() {
            vec![placeholder.to_string()]
        } else {
            self.bullets
        };
        Experience {
            id: format!("exp-{order}"),
            is_current: self.period.is_current(),
            title: self.title,
            company: self.company,
            start_date: self.period.start,
            end_date: self.period.end,
            bullets,
            order,
        }
    }
}

/// Parses the text of an experience section into records, in document order.
pub fn parse_experience_section(section: &str, options: &ParseOptions) -> Vec<Experience> {
    let blocks = split_blocks(section);

    let raw: Vec<RawExperience> = if blocks.is_empty() {
        if !section.trim().is_empty() {
            debug!("experience text has no ### blocks, falling back to headerless detection");
        }
        headerless::detect_headerless(section)
    } else {
        blocks
            .iter()
            .flat_map(|b| block::parse_experience_block(b, options))
            .collect()
    };

    finalize(raw, options)
}

/// Runs only the headerless heuristics over `text`.
pub fn detect_headerless_experiences(text: &str, options: &ParseOptions) -> Vec<Experience> {
    finalize(headerless::detect_headerless(text), options)
}

fn finalize(raw: Vec<RawExperience>, options: &ParseOptions) -> Vec<Experience> {
    raw.into_iter()
        .enumerate()
        .map(|(order, r)| r.into_experience(order, &options.bullet_placeholder))
        .collect()
}
