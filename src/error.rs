use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunwatchError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(u16),

    #[error("failed to decode server response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Shell completion error: {0}")]
    ShellCompletion(String),
}

pub type Result<T> = std::result::Result<T, RunwatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_embeds_code() {
        let err = RunwatchError::Status(500);
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_decode_error_is_generic() {
        let json_err = serde_json::from_str::<i64>("not json").unwrap_err();
        let err = RunwatchError::from(json_err);
        assert!(err.to_string().starts_with("failed to decode"));
    }
}
