use thiserror::Error;

/// Errors raised by sentiment classifier backends
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("classifier backend failed: {reason}")]
    Backend { reason: String },

    #[error("classifier produced unrecognized label '{raw}'")]
    UnknownLabel { raw: String },
}

/// Errors raised by theme extractor backends
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("theme extractor failed: {reason}")]
    Backend { reason: String },
}

/// Errors raised at the mention acquisition boundary
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("mention source unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("mention source returned malformed data: {reason}")]
    Malformed { reason: String },
}

/// Errors raised by the optional text enhancer
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("enhancer unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("enhancer timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("enhancer output unusable: {reason}")]
    MalformedOutput { reason: String },
}

/// Configuration errors abort a run before any analysis work starts
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be within [0.0, 1.0], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be at least 1")]
    ZeroLimit { name: &'static str },

    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_formatting() {
        let err = ConfigError::ThresholdOutOfRange {
            name: "negative_threshold",
            value: 1.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("negative_threshold"));
        assert!(msg.contains("1.5"));
    }

    #[test]
    fn test_enhance_timeout_formatting() {
        let err = EnhanceError::Timeout { seconds: 8 };
        assert!(err.to_string().contains("8s"));
    }
}
