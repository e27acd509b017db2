use std::sync::Arc;

use axum::{extract::State, Json};
use cv_parser::{
    parse_cv_input, validate_cv_with, validate_parsed_cv_with, CvInput, ExtractionSummary,
    ParsedCv, ValidationResult,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ParseRequest {
    #[serde(flatten)]
    pub input: CvInput,
    #[serde(default, alias = "extractionSummary")]
    pub extraction_summary: Option<ExtractionSummary>,
}

#[derive(Serialize)]
pub struct ParseResponse {
    pub cv: ParsedCv,
    pub validation: ValidationResult,
}

#[derive(Deserialize)]
pub struct ValidateRequest {
    pub cv: Value,
    #[serde(default, alias = "extractionSummary")]
    pub extraction_summary: Option<ExtractionSummary>,
}

/// POST /api/v1/cv/parse
pub async fn handle_parse(
    State(state): State<AppState>,
    Json(req): Json<ParseRequest>,
) -> Result<Json<ParseResponse>, AppError> {
    let ParseRequest {
        input,
        extraction_summary,
    } = req;

    let size = input.text().map_or(0, str::len);
    let limit = state.config.max_document_bytes;
    if size > limit {
        return Err(AppError::PayloadTooLarge { size, limit });
    }

    // CPU-bound parse: spawn_blocking keeps the async executor free.
    let options = Arc::clone(&state.parse_options);
    let cv = tokio::task::spawn_blocking(move || parse_cv_input(&input, &options))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed while parsing CV: {e}")))??;

    let validation = validate_cv_with(&cv, extraction_summary.as_ref(), &state.parse_options);
    info!(
        bytes = size,
        experience = cv.experience.len(),
        education = cv.education.len(),
        warnings = validation.warnings.len(),
        "CV parsed"
    );
    Ok(Json(ParseResponse { cv, validation }))
}

/// POST /api/v1/cv/validate
pub async fn handle_validate(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> Result<Json<ValidationResult>, AppError> {
    if !req.cv.is_object() {
        return Err(AppError::Validation("`cv` must be a JSON object".to_string()));
    }
    Ok(Json(validate_parsed_cv_with(
        &req.cv,
        req.extraction_summary.as_ref(),
        &state.parse_options,
    )))
}
