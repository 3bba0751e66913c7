//! Configuration validation.
//!
//! Semantic checks on an already-deserialized config (serde handles the
//! syntactic ones). Validation is a pure function and reports all errors,
//! not just the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{ServerConfig, TlsMode};

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("listen backlog must be nonzero")]
    Backlog,

    #[error("accept poll interval must be nonzero")]
    PollInterval,

    #[error("mutual TLS requires tls.ca_path")]
    MissingCaPath,
}

/// Validate a configuration before it is accepted into the system.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.backlog == 0 {
        errors.push(ValidationError::Backlog);
    }
    if config.listener.accept_poll_secs == 0 {
        errors.push(ValidationError::PollInterval);
    }
    if config.tls.mode == TlsMode::Mutual && config.tls.ca_path.is_none() {
        errors.push(ValidationError::MissingCaPath);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
