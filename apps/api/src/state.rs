use std::sync::Arc;

use cv_parser::ParseOptions;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once from `config`; shared with blocking parse tasks.
    pub parse_options: Arc<ParseOptions>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let parse_options = Arc::new(config.parse_options());
        AppState {
            config,
            parse_options,
        }
    }
}
