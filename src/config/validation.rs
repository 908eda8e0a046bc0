//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the admin endpoint is a usable http(s) URL
//! - Check the snapshot time zone is a known IANA name
//! - Validate value ranges (timeouts > 0, bind address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ManagerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::path::Path;

use chrono_tz::Tz;
use url::Url;

use crate::config::schema::ManagerConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidEndpoint { value: String, reason: String },
    UnsupportedEndpointScheme(String),
    UnknownTimezone(String),
    EmptyDocumentPath,
    DocumentPathHasNoParent(String),
    ZeroTimeout(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "invalid bind address '{}'", addr)
            }
            ValidationError::InvalidEndpoint { value, reason } => {
                write!(f, "invalid admin endpoint '{}': {}", value, reason)
            }
            ValidationError::UnsupportedEndpointScheme(scheme) => {
                write!(f, "admin endpoint scheme '{}' is not http or https", scheme)
            }
            ValidationError::UnknownTimezone(tz) => {
                write!(f, "unknown time zone '{}'", tz)
            }
            ValidationError::EmptyDocumentPath => {
                write!(f, "document path is empty")
            }
            ValidationError::DocumentPathHasNoParent(path) => {
                write!(f, "document path '{}' has no parent directory for backups", path)
            }
            ValidationError::ZeroTimeout(name) => {
                write!(f, "timeout '{}' must be greater than zero", name)
            }
        }
    }
}

/// Validate a configuration, collecting every semantic error.
pub fn validate_config(config: &ManagerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.control_plane.admin_endpoint) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::UnsupportedEndpointScheme(
                    url.scheme().to_string(),
                ));
            }
        }
        Err(e) => {
            errors.push(ValidationError::InvalidEndpoint {
                value: config.control_plane.admin_endpoint.clone(),
                reason: e.to_string(),
            });
        }
    }

    if config.document.timezone.parse::<Tz>().is_err() {
        errors.push(ValidationError::UnknownTimezone(
            config.document.timezone.clone(),
        ));
    }

    if config.document.path.trim().is_empty() {
        errors.push(ValidationError::EmptyDocumentPath);
    } else if Path::new(&config.document.path).parent().is_none() {
        errors.push(ValidationError::DocumentPathHasNoParent(
            config.document.path.clone(),
        ));
    }

    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("listener.request_timeout_secs"));
    }
    if config.control_plane.push_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("control_plane.push_timeout_secs"));
    }
    if config.control_plane.probe_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("control_plane.probe_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
