//! Error types for the American Soccer Analysis client

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AsaError>;

#[derive(Error, Debug)]
pub enum AsaError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown league: {league}")]
    UnknownLeague { league: String },

    #[error("Only {allowed} {stat} data is publicly available, got league {league}")]
    RestrictedLeague {
        stat: &'static str,
        allowed: &'static str,
        league: String,
    },

    #[error("Specify only {family}_ids or {family}_names, not both")]
    IdsAndNames { family: &'static str },

    #[error("Parameter {parameter} is not supported by the {endpoint} endpoint")]
    UnsupportedParameter {
        parameter: &'static str,
        endpoint: String,
    },

    #[error("Invalid proxy scheme: {scheme} (expected http, https or all)")]
    InvalidProxyScheme { scheme: String },

    #[error("Unknown entity kind: {kind}")]
    UnknownEntityKind { kind: String },
}
