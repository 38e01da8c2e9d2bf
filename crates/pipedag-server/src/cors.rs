//! Cross-origin policy
//!
//! Browsers reject `Access-Control-Allow-*: *` on credentialed requests, so a
//! wildcard combined with `allow_credentials` is served by echoing the
//! request instead.

use axum::http::{HeaderName, HeaderValue, Method};
use pipedag_core::CorsConfig;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::error::ServerError;

/// Build the CORS layer for a config
pub fn cors_layer(cors: &CorsConfig) -> Result<CorsLayer, ServerError> {
    let layer = CorsLayer::new()
        .allow_origin(allow_origin(cors)?)
        .allow_methods(allow_methods(cors)?)
        .allow_headers(allow_headers(cors)?)
        .allow_credentials(cors.allow_credentials);

    Ok(layer)
}

fn allow_origin(cors: &CorsConfig) -> Result<AllowOrigin, ServerError> {
    if cors.allow_origins.iter().any(|o| o == "*") {
        return Ok(if cors.allow_credentials {
            AllowOrigin::mirror_request()
        } else {
            AllowOrigin::any()
        });
    }

    let origins = cors
        .allow_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| ServerError::InvalidCors("origin", origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AllowOrigin::list(origins))
}

fn allow_methods(cors: &CorsConfig) -> Result<AllowMethods, ServerError> {
    if cors.any_method() {
        return Ok(if cors.allow_credentials {
            AllowMethods::mirror_request()
        } else {
            AllowMethods::any()
        });
    }

    let methods = cors
        .allow_methods
        .iter()
        .map(|method| {
            Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .map_err(|_| ServerError::InvalidCors("method", method.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AllowMethods::list(methods))
}

fn allow_headers(cors: &CorsConfig) -> Result<AllowHeaders, ServerError> {
    if cors.any_header() {
        return Ok(if cors.allow_credentials {
            AllowHeaders::mirror_request()
        } else {
            AllowHeaders::any()
        });
    }

    let headers = cors
        .allow_headers
        .iter()
        .map(|header| {
            HeaderName::from_bytes(header.as_bytes())
                .map_err(|_| ServerError::InvalidCors("header", header.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AllowHeaders::list(headers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_builds() {
        assert!(cors_layer(&CorsConfig::default()).is_ok());
    }

    #[test]
    fn explicit_lists_build() {
        let cors = CorsConfig {
            allow_origins: vec!["https://app.example.com".to_string()],
            allow_credentials: false,
            allow_methods: vec!["get".to_string(), "POST".to_string()],
            allow_headers: vec!["content-type".to_string()],
        };
        assert!(cors_layer(&cors).is_ok());
    }

    #[test]
    fn wildcard_origin_without_credentials() {
        let cors = CorsConfig {
            allow_origins: vec!["*".to_string()],
            allow_credentials: false,
            ..CorsConfig::default()
        };
        assert!(cors_layer(&cors).is_ok());
    }

    #[test]
    fn invalid_method_is_rejected() {
        let cors = CorsConfig {
            allow_methods: vec!["NOT A METHOD".to_string()],
            ..CorsConfig::default()
        };
        let err = cors_layer(&cors).unwrap_err();
        assert!(matches!(err, ServerError::InvalidCors("method", _)));
    }

    #[test]
    fn invalid_header_is_rejected() {
        let cors = CorsConfig {
            allow_headers: vec!["bad header".to_string()],
            ..CorsConfig::default()
        };
        assert!(matches!(
            cors_layer(&cors),
            Err(ServerError::InvalidCors("header", _))
        ));
    }
}
