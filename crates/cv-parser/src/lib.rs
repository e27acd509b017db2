//! Heuristic markdown-to-résumé parser.
//!
//! Turns a loosely structured markdown CV (`#` name, `##` sections, `###` entries) into
//! a [`ParsedCv`], and reports its quality with [`validate_cv`]. Parsing never fails on
//! present input: unknown dates pass through unchanged, missing sections come back
//! empty, and documents without `###` structure fall back to permissive heuristics.

pub mod assembler;
pub mod certification;
pub mod dates;
pub mod education;
pub mod errors;
pub mod experience;
pub mod header;
pub mod languages;
pub mod lines;
pub mod lists;
pub mod models;
pub mod options;
pub mod personal;
pub mod sections;
pub mod structured;
pub mod validation;

pub use assembler::{parse_cv_data, parse_cv_data_with, parse_cv_input, CvInput};
pub use dates::{normalize_date, parse_period_line, Period, PRESENT};
pub use errors::ParseError;
pub use models::{
    Certification, Education, Experience, ExtractionSummary, LanguageEntry, ParsedCv,
    PersonalInfo, BULLET_PLACEHOLDER,
};
pub use options::ParseOptions;
pub use structured::normalize_structured;
pub use validation::{
    validate_cv, validate_cv_with, validate_parsed_cv, validate_parsed_cv_with, ValidationResult,
    ValidationStats,
};
