use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlantGuideError {
    #[error("Unknown category: '{id}' - expected one of cultivation, care, harvesting, growth, issues")]
    UnknownCategory { id: String },

    #[error("Failed to parse {source_name} response: {message}")]
    ResponseParse {
        source_name: String,
        message: String,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Config key not found: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidConfigValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlantGuideError>;

impl PlantGuideError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InputNotFound { .. } => 2,
            Self::ResponseParse { .. } => 3,
            Self::ConfigParse { .. } => 4,
            Self::ConfigKeyNotFound { .. } | Self::InvalidConfigValue { .. } => 5,
            Self::UnknownCategory { .. } => 6,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_for_user_errors() {
        let not_found = PlantGuideError::InputNotFound {
            path: PathBuf::from("guide.txt"),
        };
        let parse = PlantGuideError::ResponseParse {
            source_name: "Plant.id".to_string(),
            message: "expected value".to_string(),
        };
        let unknown = PlantGuideError::UnknownCategory {
            id: "weather".to_string(),
        };
        assert_eq!(not_found.exit_code(), 2);
        assert_eq!(parse.exit_code(), 3);
        assert_eq!(unknown.exit_code(), 6);
    }

    #[test]
    fn test_io_error_falls_back_to_generic_code() {
        let err = PlantGuideError::from(std::io::Error::other("boom"));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("boom"));
    }
}
