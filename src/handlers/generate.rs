use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::*;
use crate::utils::{format_command_list, sanitize_filename};
use crate::AppState;

use super::{parse_target, ApiError};

/// Run the validator only
pub async fn validate_parameters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let (vendor, config_type) = parse_target(&req.vendor, &req.config_type)?;
    let raw = RawParameters::from(req.parameters);
    let (success, errors) = state.generator.validate(vendor, config_type, &raw);
    Ok(Json(ValidateResponse { success, errors }))
}

/// Generate the command list for a vendor and config type
pub async fn generate_config(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let (vendor, config_type) = parse_target(&req.vendor, &req.config_type)?;
    let raw = RawParameters::from(req.parameters);
    let generated = state.generator.generate(vendor, config_type, &raw)?;

    Ok(Json(GenerateResponse {
        success: true,
        commands: generated.commands,
        vendor,
        config_type,
        parameters: generated.parameters,
    }))
}

/// Generate from query parameters and return the commands as a text file
pub async fn download_config(
    State(state): State<Arc<AppState>>,
    Path((vendor, config_type)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let (vendor, config_type) = parse_target(&vendor, &config_type)?;
    let raw = RawParameters::from_pairs(params);
    let generated = state.generator.generate(vendor, config_type, &raw)?;

    let filename = sanitize_filename(&format!("{}_{}_config.txt", vendor, config_type));
    let body = format_command_list(&generated.commands);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}
