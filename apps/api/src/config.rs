use std::str::FromStr;

use anyhow::{Context, Result};
use cv_parser::ParseOptions;

/// Service configuration loaded from environment variables (and `.env` when present).
/// Every variable has a default, so the service starts with an empty environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on the markdown body accepted by the parse endpoint.
    pub max_document_bytes: usize,
    pub sub_experience_min_chars: usize,
    pub bullet_placeholder: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_document_bytes: 256 * 1024,
            sub_experience_min_chars: ParseOptions::default().sub_experience_min_chars,
            bullet_placeholder: ParseOptions::default().bullet_placeholder,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_var("PORT", std::env::var("PORT").ok(), defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_document_bytes: parse_var(
                "MAX_DOCUMENT_BYTES",
                std::env::var("MAX_DOCUMENT_BYTES").ok(),
                defaults.max_document_bytes,
            )?,
            sub_experience_min_chars: parse_var(
                "SUB_EXPERIENCE_MIN_CHARS",
                std::env::var("SUB_EXPERIENCE_MIN_CHARS").ok(),
                defaults.sub_experience_min_chars,
            )?,
            bullet_placeholder: std::env::var("BULLET_PLACEHOLDER")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.bullet_placeholder),
        })
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            sub_experience_min_chars: self.sub_experience_min_chars,
            bullet_placeholder: self.bullet_placeholder.clone(),
        }
    }
}

fn parse_var<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{value}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_var_uses_default() {
        assert_eq!(parse_var::<u16>("PORT", None, 8080).unwrap(), 8080);
    }

    #[test]
    fn test_var_is_parsed() {
        let value = parse_var::<usize>("MAX_DOCUMENT_BYTES", Some(" 1024 ".to_string()), 0).unwrap();
        assert_eq!(value, 1024);
    }

    #[test]
    fn test_invalid_var_names_the_key() {
        let err = parse_var::<u16>("PORT", Some("eighty".to_string()), 8080).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_parse_options_carry_threshold() {
        let config = Config {
            sub_experience_min_chars: 42,
            ..Config::default()
        };
        assert_eq!(config.parse_options().sub_experience_min_chars, 42);
        assert_eq!(config.parse_options().bullet_placeholder, Config::default().bullet_placeholder);
    }
}
