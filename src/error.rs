// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for bolt-xcloud
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Main error type for bolt-xcloud operations
#[derive(Error, Debug)]
pub enum BoltError {
    /// Negotiation transport errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Telemetry collection errors
    #[error("Telemetry error: {0}")]
    Telemetry(String),

    /// Preference store errors
    #[error("Preference error: {0}")]
    Preference(String),
}

/// Errors raised while talking to the negotiation service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network connectivity error
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid response from the service
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Timeout waiting for response
    #[error("Request timed out")]
    Timeout,
}

/// Result type alias for bolt-xcloud operations
pub type Result<T> = std::result::Result<T, BoltError>;

impl From<anyhow::Error> for BoltError {
    fn from(err: anyhow::Error) -> Self {
        BoltError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bolt_error_config() {
        let err = BoltError::Config("bad config".to_string());
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_bolt_error_invalid_input() {
        let err = BoltError::InvalidInput("bad input".to_string());
        assert!(err.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_bolt_error_telemetry() {
        let err = BoltError::Telemetry("collector offline".to_string());
        assert!(err.to_string().contains("Telemetry error"));
        assert!(err.to_string().contains("collector offline"));
    }

    #[test]
    fn test_bolt_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BoltError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_bolt_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BoltError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_api_error_timeout() {
        assert!(ApiError::Timeout.to_string().contains("timed out"));
    }

    #[test]
    fn test_bolt_error_from_api_error() {
        let err: BoltError = ApiError::Network("refused".to_string()).into();
        assert!(err.to_string().contains("API error"));
        assert!(err.to_string().contains("refused"));
    }
}
