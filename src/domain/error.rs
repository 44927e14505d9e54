//! Domain error types.
//!
//! The valuation engine itself never fails; these errors only come from the
//! configuration and output edges.

/// Top-level error type for valuator.
#[derive(Debug, thiserror::Error)]
pub enum ValuatorError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("export to {path} failed: {reason}")]
    Export { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ValuatorError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        ValuatorError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(section: &str, key: &str) -> Self {
        ValuatorError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }
    }
}

impl From<&ValuatorError> for std::process::ExitCode {
    fn from(err: &ValuatorError) -> Self {
        let code: u8 = match err {
            ValuatorError::Io(_) => 1,
            ValuatorError::ConfigParse { .. }
            | ValuatorError::ConfigMissing { .. }
            | ValuatorError::ConfigInvalid { .. } => 2,
            ValuatorError::Export { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_invalid_message_names_section_and_key() {
        let err = ValuatorError::invalid("valuation", "mode", "expected ebitda or sde");
        assert_eq!(
            err.to_string(),
            "invalid config value [valuation] mode: expected ebitda or sde"
        );
    }

    #[test]
    fn config_missing_message() {
        let err = ValuatorError::missing("valuation", "fixed_base");
        assert_eq!(err.to_string(), "missing config key [valuation] fixed_base");
    }

    #[test]
    fn io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ValuatorError::from(io);
        assert_eq!(err.to_string(), "no such file");
    }
}
