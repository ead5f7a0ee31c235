//! CORS layer construction.
//!
//! Turns extracted [`CorsOptions`] into a `tower_http` layer. A `"*"` entry
//! anywhere in origin, methods or headers means "any". Methods and headers
//! are split on commas first; origins are taken whole.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer, ExposeHeaders};

use crate::options::{CorsOptions, StringOrStringList};

#[derive(Debug, Error, PartialEq)]
pub enum CorsError {
    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),

    #[error("invalid CORS method '{0}'")]
    InvalidMethod(String),

    #[error("invalid CORS header name '{0}'")]
    InvalidHeader(String),

    #[error("invalid CORS maxAge {0}, expected a non-negative number of seconds")]
    InvalidMaxAge(f64),

    #[error("CORS credentials cannot be combined with a wildcard {0}")]
    WildcardWithCredentials(&'static str),
}

/// Build a CORS layer from extracted options.
pub fn cors_layer(options: &CorsOptions) -> Result<CorsLayer, CorsError> {
    let credentials = options.credentials.unwrap_or(false);
    let mut layer = CorsLayer::new();

    if let Some(origin) = &options.origin {
        check_wildcard(credentials, origin.is_wildcard(), "origin")?;
        layer = layer.allow_origin(allow_origin(origin)?);
    }
    if let Some(methods) = &options.methods {
        check_wildcard(credentials, methods.has_wildcard_entry(), "methods")?;
        layer = layer.allow_methods(allow_methods(methods)?);
    }
    if let Some(headers) = &options.allowed_headers {
        check_wildcard(credentials, headers.has_wildcard_entry(), "allowedHeaders")?;
        layer = layer.allow_headers(allow_headers(headers)?);
    }
    if let Some(headers) = &options.exposed_headers {
        check_wildcard(credentials, headers.has_wildcard_entry(), "exposedHeaders")?;
        layer = layer.expose_headers(expose_headers(headers)?);
    }
    if credentials {
        layer = layer.allow_credentials(true);
    }
    if let Some(max_age) = options.max_age {
        let max_age =
            Duration::try_from_secs_f64(max_age).map_err(|_| CorsError::InvalidMaxAge(max_age))?;
        layer = layer.max_age(max_age);
    }

    if options.preflight_continue.is_some() || options.options_success_status.is_some() {
        tracing::debug!(
            preflight_continue = ?options.preflight_continue,
            options_success_status = ?options.options_success_status,
            "CORS preflight pass-through options have no effect on this layer"
        );
    }

    Ok(layer)
}

fn check_wildcard(credentials: bool, wildcard: bool, field: &'static str) -> Result<(), CorsError> {
    if credentials && wildcard {
        return Err(CorsError::WildcardWithCredentials(field));
    }
    Ok(())
}

fn allow_origin(origin: &StringOrStringList) -> Result<AllowOrigin, CorsError> {
    if origin.is_wildcard() {
        return Ok(Any.into());
    }
    let origins = origin
        .as_slice()
        .iter()
        .map(|o| HeaderValue::from_str(o).map_err(|_| CorsError::InvalidOrigin(o.clone())))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(AllowOrigin::list(origins))
}

fn allow_methods(methods: &StringOrStringList) -> Result<AllowMethods, CorsError> {
    if methods.has_wildcard_entry() {
        return Ok(Any.into());
    }
    let methods = methods
        .split_entries()
        .into_iter()
        .map(|m| {
            Method::from_bytes(m.to_ascii_uppercase().as_bytes())
                .map_err(|_| CorsError::InvalidMethod(m.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(AllowMethods::list(methods))
}

fn header_names(headers: &StringOrStringList) -> Result<Vec<HeaderName>, CorsError> {
    headers
        .split_entries()
        .into_iter()
        .map(|h| HeaderName::try_from(h).map_err(|_| CorsError::InvalidHeader(h.to_string())))
        .collect()
}

fn allow_headers(headers: &StringOrStringList) -> Result<AllowHeaders, CorsError> {
    if headers.has_wildcard_entry() {
        return Ok(Any.into());
    }
    Ok(AllowHeaders::list(header_names(headers)?))
}

fn expose_headers(headers: &StringOrStringList) -> Result<ExposeHeaders, CorsError> {
    if headers.has_wildcard_entry() {
        return Ok(Any.into());
    }
    Ok(ExposeHeaders::list(header_names(headers)?))
}
