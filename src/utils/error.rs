use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("field validation for '{field}' failed on the '{rule}' rule")]
    ValidationError { field: String, rule: String },

    #[error("no releases specified")]
    NoReleasesSpecified,

    #[error("request parameters: 'parameters' must be a mapping, found {found}")]
    InvalidParametersShape { found: String },

    #[error("Invalid input for {argument}: {message}")]
    InvalidInputError { argument: String, message: String },

    #[error(transparent)]
    BindingAlreadyExists(anyhow::Error),

    #[error(transparent)]
    AppGuidNotProvided(anyhow::Error),

    #[error("{operation} not implemented")]
    NotImplemented { operation: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Manifest error: {0}")]
    ManifestError(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error(transparent)]
    Generic(#[from] anyhow::Error),
}

/// Structural classification of an [`AdapterError`], used by callers that
/// need to react to specific failures without inspecting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    InvalidInput,
    AlreadyExists,
    MissingIdentifier,
    NotImplemented,
    Configuration,
    Generic,
}

impl ErrorKind {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::NotImplemented => 10,
            ErrorKind::MissingIdentifier => 42,
            ErrorKind::AlreadyExists => 49,
            _ => 1,
        }
    }
}

impl AdapterError {
    pub fn binding_already_exists<E: Into<anyhow::Error>>(cause: E) -> Self {
        AdapterError::BindingAlreadyExists(cause.into())
    }

    pub fn app_guid_not_provided<E: Into<anyhow::Error>>(cause: E) -> Self {
        AdapterError::AppGuidNotProvided(cause.into())
    }

    pub fn validation(field: impl Into<String>, rule: impl Into<String>) -> Self {
        AdapterError::ValidationError {
            field: field.into(),
            rule: rule.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AdapterError::ValidationError { .. } | AdapterError::NoReleasesSpecified => {
                ErrorKind::Validation
            }
            AdapterError::InvalidParametersShape { .. }
            | AdapterError::InvalidInputError { .. }
            | AdapterError::SerializationError(_)
            | AdapterError::ManifestError(_) => ErrorKind::InvalidInput,
            AdapterError::BindingAlreadyExists(_) => ErrorKind::AlreadyExists,
            AdapterError::AppGuidNotProvided(_) => ErrorKind::MissingIdentifier,
            AdapterError::NotImplemented { .. } => ErrorKind::NotImplemented,
            AdapterError::IoError(_) | AdapterError::ConfigError { .. } => {
                ErrorKind::Configuration
            }
            AdapterError::Generic(_) => ErrorKind::Generic,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }

    /// Re-roots a validation error under `parent`, leaving other errors alone.
    pub(crate) fn within(self, parent: &str) -> Self {
        match self {
            AdapterError::ValidationError { field, rule } => AdapterError::ValidationError {
                field: format!("{}.{}", parent, field),
                rule,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;
