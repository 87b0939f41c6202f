use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::healthcheck))
        // Catalogue routes
        .route("/api/vendors", get(handlers::vendors::list_vendors))
        .route("/api/config_types/:vendor", get(handlers::vendors::list_config_types))
        .route(
            "/api/template_info/:vendor/:config_type",
            get(handlers::templates::get_template_info),
        )
        // Generation routes
        .route("/api/validate", post(handlers::generate::validate_parameters))
        .route("/api/generate", post(handlers::generate::generate_config))
        .route(
            "/download/:vendor/:config_type",
            get(handlers::generate::download_config),
        )
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::generator::ConfigGenerator;
    use crate::models::Vendor;
    use crate::pipeline::Pipeline;
    use crate::templates::TemplateRepository;

    const HUAWEI: &str = r#"
vlan_management:
  description: Create VLANs
  parameters:
    vlan_id:
      description: VLAN id or list
      required: true
  example:
    vlan_id: "10"
  commands: |
    system-view
    {% if is_batch %}
    vlan batch {{ vlan_batch }}
    {% else %}
    vlan {{ vlan_id }}
    {% endif %}
    quit
static_route:
  description: Template with a defect
  commands: "ip route-static {{ undefined_key }}"
"#;

    fn app() -> Router {
        let mut repository = TemplateRepository::empty();
        repository
            .load_document(Vendor::Huawei, "huawei.yaml", HUAWEI)
            .unwrap();
        let state = Arc::new(AppState {
            config: Config::load(),
            generator: Arc::new(ConfigGenerator::new(repository, Pipeline::default())),
        });
        build(state)
    }

    async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let (status, body) = send(Request::get(uri).body(Body::empty()).unwrap()).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_json(uri: &str, payload: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, body) = send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "switchgen");
    }

    #[tokio::test]
    async fn test_catalogue_routes() {
        let (status, body) = get_json("/api/vendors").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["vendors"],
            json!([{ "value": "huawei", "name": "Huawei", "config_type_count": 2 }])
        );

        let (status, body) = get_json("/api/config_types/huawei").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["config_types"][0], json!({ "value": "vlan_management", "name": "VLAN management" }));

        let (status, body) = get_json("/api/config_types/cisco").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["config_types"], json!([]));

        let (status, body) = get_json("/api/config_types/juniper").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);

        let (status, body) = get_json("/api/template_info/huawei/vlan_management").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["template_info"]["parameters"]["vlan_id"]["required"], true);

        let (status, _) = get_json("/api/template_info/huawei/ospf_config").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_generate() {
        let (status, body) = post_json(
            "/api/generate",
            json!({
                "vendor": "huawei",
                "config_type": "vlan_management",
                "parameters": { "vlan_id": "10,20" }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["commands"], json!(["system-view", "vlan batch 10 20", "quit"]));
        assert_eq!(body["parameters"]["is_batch"], true);
    }

    #[tokio::test]
    async fn test_generate_failures() {
        let (status, body) = post_json(
            "/api/generate",
            json!({ "vendor": "huawei", "config_type": "vlan_management", "parameters": { "vlan_id": "9999" } }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "parameter validation failed");
        assert_eq!(body["details"].as_array().unwrap().len(), 1);

        let (status, body) = post_json("/api/generate", json!({ "parameters": {} })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "vendor and config_type are required");

        let (status, body) = post_json(
            "/api/generate",
            json!({
                "vendor": "huawei",
                "config_type": "static_route",
                "parameters": { "destination": "10.0.0.0/8", "next_hop": "10.0.0.1" }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "failed to render configuration template");
    }

    #[tokio::test]
    async fn test_validate() {
        let (status, body) = post_json(
            "/api/validate",
            json!({ "vendor": "huawei", "config_type": "vlan_management", "parameters": {} }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"], json!(["vlan_id is required"]));
    }

    #[tokio::test]
    async fn test_download() {
        let request = Request::get("/download/huawei/vlan_management?vlan_id=30")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"huawei_vlan_management_config.txt\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(std::str::from_utf8(&body).unwrap(), "system-view\nvlan 30\nquit");
    }
}
