use crate::models::{ConfigType, Vendor};

/// A pipeline guard tripped: the parameters passed validation but describe
/// something no template can render.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct GuardError(pub String);

impl GuardError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// A template failed to render against a parameter set. This points at the
/// template, not at the user's input.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to render {config_type} template for {vendor}: {message}")]
pub struct RenderError {
    pub vendor: Vendor,
    pub config_type: ConfigType,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("vendor {vendor} has no template for {config_type}")]
    MissingTemplate {
        vendor: Vendor,
        config_type: ConfigType,
    },
    #[error("failed to read template document {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse template document {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("template {vendor}/{config_type} is invalid: {message}")]
    Invalid {
        vendor: Vendor,
        config_type: ConfigType,
        message: String,
    },
}

/// GenerateError separates the failure strata of one generation request
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("parameter validation failed")]
    Validation(Vec<String>),
    #[error("{0}")]
    Guard(#[from] GuardError),
    #[error("{0}")]
    Render(#[from] RenderError),
    #[error("vendor {vendor} does not support {config_type}")]
    Unsupported {
        vendor: Vendor,
        config_type: ConfigType,
    },
    #[error("generated command list is empty")]
    Empty,
}

/// Flatten an error and its sources into one line
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
