use thiserror::Error;

#[derive(Debug, Error)]
pub enum VidError {
    #[error("not initialized: run 'vidflow init'")]
    NotInitialized,

    #[error("video not found: {category}/{name}")]
    VideoNotFound { name: String, category: String },

    #[error("video already exists: {category}/{name}")]
    VideoExists { name: String, category: String },

    #[error("invalid name '{0}': must be non-empty, without path separators or a leading '.'")]
    InvalidName(String),

    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    #[error("aspect not found: {0}")]
    AspectNotFound(String),

    #[error("unknown field '{field}' in aspect '{aspect}'")]
    UnknownField { aspect: String, field: String },

    #[error("invalid value for field '{field}': {reason}")]
    InvalidFieldValue { field: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl VidError {
    pub fn video_not_found(name: &str, category: &str) -> Self {
        VidError::VideoNotFound {
            name: name.to_string(),
            category: category.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VidError>;
