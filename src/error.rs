use thiserror::Error;

pub type LocaleResult<T> = Result<T, LocaleError>;

#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },
}

impl LocaleError {
    pub(crate) fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        LocaleError::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
