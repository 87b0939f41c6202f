use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

use super::{parse_target, ApiError};

/// Describe the parameters and example of one template
pub async fn get_template_info(
    State(state): State<Arc<AppState>>,
    Path((vendor, config_type)): Path<(String, String)>,
) -> Result<Json<TemplateInfoResponse>, ApiError> {
    let (vendor, config_type) = parse_target(&vendor, &config_type)?;
    let template_info = state.generator.template_info(vendor, config_type)?;
    Ok(Json(TemplateInfoResponse {
        success: true,
        template_info,
    }))
}
