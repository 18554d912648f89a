use thiserror::Error;

#[derive(Debug, Error)]
pub enum TsplibError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unsupported {keyword} value '{value}'")]
    UnsupportedFormat { keyword: String, value: String },
    #[error("missing required keyword {0}")]
    MissingKeyword(String),
    #[error("bad {keyword} value '{value}': {reason}")]
    InvalidValue {
        keyword: String,
        value: String,
        reason: String,
    },
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type TsplibResult<T> = std::result::Result<T, TsplibError>;

impl TsplibError {
    pub fn unsupported_format(keyword: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            keyword: keyword.into(),
            value: value.into(),
        }
    }

    pub fn missing_keyword(keyword: impl Into<String>) -> Self {
        Self::MissingKeyword(keyword.into())
    }

    pub fn invalid_value(
        keyword: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::InvalidValue {
            keyword: keyword.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }
}
