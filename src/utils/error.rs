use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Form validation error: {message}")]
    FormValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CalcError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::ConfigValidationError { .. }
            | CalcError::InvalidConfigValueError { .. }
            | CalcError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CalcError::FormValidationError { .. } => ErrorCategory::Input,
            CalcError::IoError(_) => ErrorCategory::Io,
            CalcError::CsvError(_) | CalcError::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 表單錯誤不影響其他資料，但指令本身失敗
            ErrorCategory::Input | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CalcError::IoError(_) => {
                "Check that the file exists and that you have permission to read/write it".to_string()
            }
            CalcError::CsvError(_) => {
                "Make sure the CSV has a header row with the columns tip,sup,instr".to_string()
            }
            CalcError::SerializationError(_) => "Re-run without --json to get plain text output".to_string(),
            CalcError::ConfigValidationError { .. } => {
                "Fix the configuration file; it must be valid TOML".to_string()
            }
            CalcError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the configuration", field)
            }
            CalcError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration file or environment", field)
            }
            CalcError::FormValidationError { .. } => {
                "Fill in the name, e-mail and message fields".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            // 表單訊息直接顯示給訪客
            CalcError::FormValidationError { message } => message.clone(),
            CalcError::IoError(e) => format!("Could not access a file: {}", e),
            other => other.to_string(),
        }
    }

    /// 依嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_errors_exit_with_non_zero_code() {
        let err = CalcError::FormValidationError {
            message: "lipsă".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.user_friendly_message(), "lipsă");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_config_errors_map_to_exit_code_one() {
        let err = CalcError::MissingConfigError {
            field: "pricing.bloc".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.recovery_suggestion().contains("pricing.bloc"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = CalcError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }
}
