pub mod generate;
pub mod templates;
pub mod vendors;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::GenerateError;
use crate::models::{ConfigType, FailureResponse, UnknownKey, Vendor};

/// API error type
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<Vec<String>>,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
            details: None,
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
            details: None,
        }
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.into(),
            details: None,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => FailureResponse::with_details(self.message, details),
            None => FailureResponse::new(self.message),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<UnknownKey> for ApiError {
    fn from(err: UnknownKey) -> Self {
        Self::not_found(err.to_string())
    }
}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::Validation(details) => {
                Self::bad_request("parameter validation failed").with_details(details)
            }
            GenerateError::Guard(e) => Self::unprocessable(e.to_string()),
            // Already logged with the template identity by the generator
            GenerateError::Render(_) => Self::internal("failed to render configuration template"),
            e @ GenerateError::Unsupported { .. } => Self::not_found(e.to_string()),
            e @ GenerateError::Empty => Self::unprocessable(e.to_string()),
        }
    }
}

/// Resolve the vendor and config type ids of a request
pub fn parse_target(vendor: &str, config_type: &str) -> Result<(Vendor, ConfigType), ApiError> {
    if vendor.trim().is_empty() || config_type.trim().is_empty() {
        return Err(ApiError::bad_request("vendor and config_type are required"));
    }
    Ok((vendor.parse()?, config_type.parse()?))
}

/// Healthcheck endpoint - returns 200 OK with status
pub async fn healthcheck() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "switchgen",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuardError;

    #[test]
    fn test_generate_error_status_mapping() {
        let cases = [
            (GenerateError::Validation(vec!["x".into()]), StatusCode::BAD_REQUEST),
            (GenerateError::Guard(GuardError::new("no")), StatusCode::UNPROCESSABLE_ENTITY),
            (
                GenerateError::Unsupported {
                    vendor: Vendor::Cisco,
                    config_type: ConfigType::BfdConfig,
                },
                StatusCode::NOT_FOUND,
            ),
            (GenerateError::Empty, StatusCode::UNPROCESSABLE_ENTITY),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_healthcheck_body() {
        let Json(body) = tokio_test::block_on(healthcheck());
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].as_str().is_some());
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(
            parse_target("huawei", "vlan_management").unwrap(),
            (Vendor::Huawei, ConfigType::VlanManagement)
        );
        assert_eq!(parse_target("", "vlan_management").unwrap_err().status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse_target("juniper", "vlan_management").unwrap_err().status(), StatusCode::NOT_FOUND);
    }
}
