use axum::{Router, http::HeaderValue, middleware, routing::get};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::actions;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;
use crate::config::ServerConfig;

/// Create the full router with application state
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/api", actions::create_actions_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::create_app_state;

    fn app() -> Router {
        let config = AppConfig::for_tests();
        let state = create_app_state(&config).unwrap();
        create_router(state, &config.server)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = app();

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = send(&app, "GET", "/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"].as_array().unwrap().len(), 5);

        let (status, _) = send(&app, "GET", "/live", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let response = app()
            .oneshot(Request::builder().uri("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_api_key_token_returned_once() {
        let app = app();

        let (status, created) = send(
            &app,
            "POST",
            "/api/api-keys",
            Some(json!({ "name": "ERP sync", "permissions": ["passports:read"] })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["success"], true);
        let token = created["data"]["token"].as_str().unwrap().to_string();
        assert!(token.starts_with("nrv_live_"));

        let (_, listed) = send(&app, "GET", "/api/api-keys", None).await;
        let keys = listed["data"].as_array().unwrap();
        assert_eq!(keys.len(), 1);
        assert!(keys[0].get("token").is_none());
        assert!(!listed.to_string().contains(&token));

        let (status, verified) = send(
            &app,
            "POST",
            "/api/api-keys/verify",
            Some(json!({ "token": token })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(verified["data"]["lastUsedDate"].is_string());
    }

    #[tokio::test]
    async fn test_revoking_twice_fails() {
        let app = app();

        let (_, created) = send(
            &app,
            "POST",
            "/api/api-keys",
            Some(json!({ "name": "Temporary", "permissions": ["passports:read"] })),
        )
        .await;
        let id = created["data"]["id"].as_str().unwrap().to_string();
        let token = created["data"]["token"].as_str().unwrap().to_string();
        let uri = format!("/api/api-keys/{}/revoke", id);

        let (status, body) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "revoked");

        let (status, body) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert!(body["message"].is_string());

        let (status, _) = send(
            &app,
            "POST",
            "/api/api-keys/verify",
            Some(json!({ "token": token })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_validation_errors_in_envelope() {
        let app = app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/api-keys",
            Some(json!({ "name": "x", "permissions": [] })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"permissions"));
    }

    #[tokio::test]
    async fn test_malformed_json_uses_envelope() {
        let app = app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/team")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_team_duplicate_email_and_remove() {
        let app = app();

        let (status, invited) = send(
            &app,
            "POST",
            "/api/team",
            Some(json!({ "name": "Ada Lovelace", "email": "ada@example.com", "role": "editor" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(invited["data"]["status"], "pending");

        let (status, duplicate) = send(
            &app,
            "POST",
            "/api/team",
            Some(json!({ "name": "Ada Again", "email": "ADA@example.com", "role": "viewer" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(duplicate["success"], false);

        let (status, missing) = send(&app, "DELETE", "/api/team/user_missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(missing["success"], false);

        let (_, listed) = send(&app, "GET", "/api/team", None).await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);

        let id = invited["data"]["id"].as_str().unwrap();
        let (status, _) = send(&app, "DELETE", &format!("/api/team/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, listed) = send(&app, "GET", "/api/team", None).await;
        assert!(listed["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_did_and_credential_flow() {
        let app = app();

        let (status, did) = send(&app, "POST", "/api/dids", Some(json!({ "alias": "Acme Batteries" }))).await;
        assert_eq!(status, StatusCode::CREATED);
        let did_id = did["data"]["id"].as_str().unwrap().to_string();
        assert!(did_id.starts_with("did:web:norruva.com:acme-batteries-"));

        let (status, issued) = send(
            &app,
            "POST",
            "/api/credentials",
            Some(json!({
                "credentialType": "ProductComplianceCredential",
                "issuerDid": did_id,
                "subjectDppId": "DPP001"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(issued["data"]["status"], "Valid");

        let credential_id = issued["data"]["id"].as_str().unwrap();
        let (status, vc) = send(
            &app,
            "GET",
            &format!("/api/credentials/{}/vc", credential_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(vc["data"]["issuer"], did_id.as_str());

        let (_, filtered) = send(&app, "GET", "/api/credentials?subjectDppId=DPP999", None).await;
        assert!(filtered["data"].as_array().unwrap().is_empty());

        let revoke_uri = format!("/api/dids/{}/revoke", did_id);
        let (status, _) = send(&app, "POST", &revoke_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "POST", &revoke_uri, None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, rejected) = send(
            &app,
            "POST",
            "/api/credentials",
            Some(json!({
                "credentialType": "ProductComplianceCredential",
                "issuerDid": did_id,
                "subjectDppId": "DPP002"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(rejected["success"], false);
    }

    #[tokio::test]
    async fn test_digital_link_and_qr() {
        let app = app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/gs1/digital-link",
            Some(json!({ "gtin": "012345678905", "serialNumber": "SN1", "lotNumber": "L1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["digitalLink"],
            "https://id.gs1.org/01/012345678905/21/SN1/10/L1"
        );

        let (status, body) = send(
            &app,
            "POST",
            "/api/gs1/qr-code",
            Some(json!({ "gtin": "012345678905", "anchorTx": "0xabc" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["qrUrl"],
            "https://id.gs1.org/01/012345678905?anchorTx=0xabc"
        );
        assert!(
            body["data"]["dataUrl"]
                .as_str()
                .unwrap()
                .starts_with("data:image/svg+xml;base64,")
        );

        let (status, body) = send(&app, "POST", "/api/gs1/digital-link", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "gtin");
    }

    #[tokio::test]
    async fn test_staking_flow() {
        let app = app();

        let (status, _) = send(&app, "POST", "/api/staking/stake", Some(json!({ "amount": 1000 }))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "POST", "/api/staking/unstake", Some(json!({ "amount": 5000 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "amount");

        let (status, body) = send(&app, "POST", "/api/staking/claim", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["amount"], 50);

        let (_, summary) = send(&app, "GET", "/api/staking/summary", None).await;
        assert_eq!(summary["data"]["staked"], 1000);
        assert_eq!(summary["data"]["rewardsClaimed"], 50);

        let (_, history) = send(&app, "GET", "/api/staking/history", None).await;
        assert_eq!(history["data"][0]["kind"], "claim_rewards");
    }

    #[tokio::test]
    async fn test_compliance_check() {
        let app = app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/compliance/check",
            Some(json!({
                "productData": r#"{"certifications":["RoHS"]}"#,
                "complianceStandards": "RoHS\nWEEE"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["overallStatus"], "non_compliant");
        assert_eq!(body["data"]["findings"].as_array().unwrap().len(), 2);

        let (status, body) = send(
            &app,
            "POST",
            "/api/compliance/check",
            Some(json!({ "productData": "{oops", "complianceStandards": "RoHS" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "product_data");
    }

    #[tokio::test]
    async fn test_unknown_credential_is_not_found() {
        let (status, body) = send(&app(), "GET", "/api/credentials/urn:uuid:missing", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }
}
