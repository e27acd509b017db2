use crate::models::BULLET_PLACEHOLDER;

/// Tuning knobs for the markdown parser.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Blocks longer than this are scanned for embedded sub-experiences.
    pub sub_experience_min_chars: usize,
    /// Text inserted when an experience has no bullet.
    pub bullet_placeholder: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            sub_experience_min_chars: 500,
            bullet_placeholder: BULLET_PLACEHOLDER.to_string(),
        }
    }
}
