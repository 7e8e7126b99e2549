use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid date in '{field}': '{value}' ({reason})")]
    DateParseError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Row {row} is missing column '{column}'")]
    MissingColumnError { row: usize, column: String },

    #[error("Type error: {message}")]
    TypeError { message: String },

    #[error("Date range error: {message}")]
    DateRangeError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Bad input data or configuration.
    High,
    /// The filesystem could not be read or written.
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::High => 1,
            Self::Critical => 3,
        }
    }
}

impl ReportError {
    pub fn date_parse(field: &str, value: &str, reason: impl std::fmt::Display) -> Self {
        Self::DateParseError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) => ErrorCategory::Io,
            Self::CsvError(e) if e.is_io_error() => ErrorCategory::Io,
            Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::DateParseError { .. }
            | Self::MissingColumnError { .. }
            | Self::TypeError { .. }
            | Self::DateRangeError { .. } => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Data | ErrorCategory::Config => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Check that the input file exists and the path is spelled correctly".to_string()
            }
            Self::IoError(_) => "Check file permissions and available disk space".to_string(),
            Self::CsvError(_) => "Make sure the input is a well-formed comma separated file".to_string(),
            Self::DateParseError { field, .. } => {
                format!("Fix the '{}' value so it matches the configured date format", field)
            }
            Self::MissingColumnError { .. } => {
                "Every row needs book_uid, isbn_13, patron_id, date_checkout, date_due, date_returned"
                    .to_string()
            }
            Self::TypeError { .. } => {
                "Pass 'start' as a YYYY-MM-DD string and 'n' as a non-negative integer".to_string()
            }
            Self::DateRangeError { .. } => "Use a smaller count or an earlier start date".to_string(),
            Self::SerializationError(_) => "Check the JSON payload syntax".to_string(),
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file and fix the reported field".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not access a file: {}", self),
            ErrorCategory::Data => format!("The input data could not be processed: {}", self),
            ErrorCategory::Config => format!("The configuration is invalid: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_critical_io_error() {
        let err = ReportError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing.csv",
        ));
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.recovery_suggestion().contains("exists"));
    }

    #[test]
    fn test_date_parse_error_message() {
        let source = chrono::NaiveDate::parse_from_str("13/45/2020", "%m/%d/%Y").unwrap_err();
        let err = ReportError::date_parse("date_due", "13/45/2020", source);

        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("date_due"));
        assert!(err.to_string().contains("13/45/2020"));
        assert!(err.user_friendly_message().starts_with("The input data"));
    }

    #[test]
    fn test_config_errors_share_category() {
        let err = ReportError::InvalidConfigValueError {
            field: "fees.daily_rate".to_string(),
            value: "-1".to_string(),
            reason: "must not be negative".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Config);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_exit_codes_by_severity() {
        let io = ReportError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "fees.csv",
        ));
        let data = ReportError::MissingColumnError {
            row: 2,
            column: "date_due".to_string(),
        };

        assert_eq!(io.severity().exit_code(), 3);
        assert_eq!(data.severity().exit_code(), 1);
    }
}
