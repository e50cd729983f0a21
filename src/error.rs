//! Error types and handling for the `tripsmith` application

use thiserror::Error;

/// Main error type for the `tripsmith` application
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Configuration-related errors (missing credentials, bad settings)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A route could not be resolved: geocoding returned no candidates or
    /// the provider response carried no usable route
    #[error("Could not determine route: {message}")]
    UnresolvedRoute { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// AI-agent pipeline failures
    #[error("Trip planning error: {message}")]
    Agent { message: String },

    /// API communication errors (transport-level)
    #[error("API error: {message}")]
    Api { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl PlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new unresolved-route error
    pub fn unresolved<S: Into<String>>(message: S) -> Self {
        Self::UnresolvedRoute {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new agent-pipeline error
    pub fn agent<S: Into<String>>(message: S) -> Self {
        Self::Agent {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            PlannerError::UnresolvedRoute { .. } => {
                "Could not determine route distance. Please check the city names or try a different mode."
                    .to_string()
            }
            PlannerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            PlannerError::Agent { message } => {
                format!("Error during trip planning: {message}")
            }
            PlannerError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            PlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            PlannerError::General { message } => message.clone(),
        }
    }

    /// Stable identifier for the error class, used in API error bodies
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            PlannerError::Config { .. } => "config",
            PlannerError::UnresolvedRoute { .. } => "unresolved_route",
            PlannerError::Validation { .. } => "validation",
            PlannerError::Agent { .. } => "agent",
            PlannerError::Api { .. } => "api",
            PlannerError::Io { .. } => "io",
            PlannerError::General { .. } => "general",
        }
    }
}
