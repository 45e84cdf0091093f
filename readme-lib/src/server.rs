use crate::config::Config;
use crate::error::ReadmeError;
use crate::pipeline::{GenerateOptions, ReadmeService, ResponseEnvelope};
use crate::result::ReadmeResult;
use anyhow::anyhow;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

#[derive(Clone)]
struct AppState {
    service: Arc<ReadmeService>,
    frontend_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub repo_url: Option<String>,

    #[serde(default)]
    pub options: Option<GenerateOptions>,
}

impl IntoResponse for ReadmeError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}

pub fn router(service: ReadmeService, config: &Config) -> ReadmeResult<Router> {
    let state = AppState {
        service: Arc::new(service),
        frontend_url: config.frontend_url.clone().filter(|u| !u.is_empty()),
    };

    Ok(Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/generate-readme", post(generate_readme))
        .layer(cors_layer(&config.allowed_origins)?)
        .with_state(state))
}

fn cors_layer(allowed_origins: &[String]) -> ReadmeResult<CorsLayer> {
    if allowed_origins.iter().any(|o| o.trim() == "*") {
        return Err(ReadmeError::Other(anyhow!(
            "wildcard origin cannot be combined with credentials; list allowed origins explicitly"
        )));
    }

    let origins = allowed_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| ReadmeError::Other(anyhow!("invalid allowed origin {o:?}: {e}")))
        })
        .collect::<ReadmeResult<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true))
}

async fn index(State(state): State<AppState>) -> Response {
    match state.frontend_url {
        Some(url) => Redirect::temporary(&url).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response(),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn generate_readme(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<ResponseEnvelope>, ReadmeError> {
    let options = request.options.unwrap_or_default();
    Ok(Json(
        state
            .service
            .generate(request.repo_url.as_deref(), &options)
            .await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::router;
    use crate::config::Config;
    use crate::error::ReadmeError;
    use crate::pipeline::ReadmeService;

    fn config(allowed_origins: &[&str]) -> Config {
        Config {
            allowed_origins: allowed_origins.iter().map(|o| String::from(*o)).collect(),
            ..Config::default()
        }
    }

    #[test]
    fn wildcard_origin_is_rejected() {
        for origins in [&["*"][..], &["http://localhost:5173", " * "][..]] {
            let config = config(origins);
            let service = ReadmeService::from_config(&config).unwrap();
            assert!(matches!(
                router(service, &config),
                Err(ReadmeError::Other(_))
            ));
        }
    }

    #[test]
    fn unparseable_origin_is_rejected() {
        let config = config(&["http://bad\norigin"]);
        let service = ReadmeService::from_config(&config).unwrap();
        assert!(router(service, &config).is_err());
    }

    #[test]
    fn explicit_origins_are_accepted() {
        let config = config(&["http://localhost:5173", "https://readme.example.com"]);
        let service = ReadmeService::from_config(&config).unwrap();
        assert!(router(service, &config).is_ok());
    }
}
