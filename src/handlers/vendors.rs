use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

use super::ApiError;

/// List vendors that have at least one template
pub async fn list_vendors(State(state): State<Arc<AppState>>) -> Json<VendorsResponse> {
    Json(VendorsResponse {
        success: true,
        vendors: state.generator.vendors(),
    })
}

/// List the config types a vendor supports
pub async fn list_config_types(
    State(state): State<Arc<AppState>>,
    Path(vendor): Path<String>,
) -> Result<Json<ConfigTypesResponse>, ApiError> {
    let vendor: Vendor = vendor.parse()?;
    Ok(Json(ConfigTypesResponse {
        success: true,
        config_types: state.generator.config_types(vendor),
    }))
}
