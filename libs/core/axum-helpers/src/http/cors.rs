use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Comma-separated list of allowed origins, or `*`.
pub const CORS_ORIGIN_ENV: &str = "CORS_ALLOWED_ORIGIN";

/// Parsed value of [`CORS_ORIGIN_ENV`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

impl CorsOrigins {
    /// `None`, an empty string and `*` all mean any origin.
    pub fn parse(raw: Option<&str>) -> io::Result<Self> {
        let raw = match raw.map(str::trim) {
            None | Some("") | Some("*") => return Ok(Self::Any),
            Some(raw) => raw,
        };

        let origins = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(HeaderValue::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid {CORS_ORIGIN_ENV} value: {e}"),
                )
            })?;

        if origins.is_empty() {
            return Ok(Self::Any);
        }
        Ok(Self::List(origins))
    }
}

/// CORS layer for an explicit origin list.
///
/// - Methods: GET, POST, PUT, DELETE, PATCH, OPTIONS
/// - Headers: Content-Type, Authorization, Accept
/// - Credentials allowed, 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Allows any origin, method and header. Credentials are not allowed.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Build the CORS layer from [`CORS_ORIGIN_ENV`].
///
/// Unset or `*` yields [`create_permissive_cors_layer`].
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let raw = std::env::var(CORS_ORIGIN_ENV).ok();

    match CorsOrigins::parse(raw.as_deref())? {
        CorsOrigins::Any => {
            warn!("CORS allows any origin; set {CORS_ORIGIN_ENV} to restrict it");
            Ok(create_permissive_cors_layer())
        }
        CorsOrigins::List(origins) => {
            info!(origins = ?origins, "CORS configured with allowed origins");
            Ok(create_cors_layer(origins))
        }
    }
}
