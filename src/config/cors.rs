use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

/// Builds the CORS layer from a comma separated origin list.
///
/// With no list, or a list with no usable entries, any origin is allowed.
pub fn create_cors_layer(allowed_origins: Option<&str>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(parse_origins(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .expose_headers([
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

fn parse_origins(allowed_origins: Option<&str>) -> AllowOrigin {
    let origins: Vec<HeaderValue> = allowed_origins
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => {
                tracing::debug!("CORS: Allowing origin: {}", origin);
                Some(value)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        tracing::info!("CORS: No origin list configured, allowing any origin");
        AllowOrigin::any()
    } else {
        tracing::info!("CORS: Configured with {} allowed origin(s)", origins.len());
        AllowOrigin::list(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    async fn preflight(allowed: Option<&str>, origin: &str) -> Option<HeaderValue> {
        let app = Router::new()
            .route("/events", get(|| async { "ok" }))
            .layer(create_cors_layer(allowed));

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/events")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .cloned()
    }

    #[tokio::test]
    async fn test_any_origin_without_list() {
        let allowed = preflight(None, "http://example.com").await;
        assert_eq!(allowed.unwrap(), "*");
    }

    #[tokio::test]
    async fn test_origin_list_is_enforced() {
        let list = Some("http://localhost:3000, http://localhost:5173");

        let allowed = preflight(list, "http://localhost:5173").await;
        assert_eq!(allowed.unwrap(), "http://localhost:5173");

        assert!(preflight(list, "http://evil.example").await.is_none());
    }

    #[tokio::test]
    async fn test_blank_list_falls_back_to_any() {
        let allowed = preflight(Some(" , "), "http://example.com").await;
        assert_eq!(allowed.unwrap(), "*");
    }
}
