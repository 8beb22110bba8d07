use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON processing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Transformation failed: {message}")]
    TransformationError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Parse,
    Format,
    Transformation,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn transformation(message: impl Into<String>) -> Self {
        Self::TransformationError {
            message: message.into(),
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } | Self::IoError(_) => ErrorCategory::Io,
            Self::JsonError(_) | Self::CsvError(_) | Self::ParseError { .. } => {
                ErrorCategory::Parse
            }
            Self::UnsupportedFormat { .. } => ErrorCategory::Format,
            Self::TransformationError { .. } => ErrorCategory::Transformation,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Format => ErrorSeverity::Medium,
            ErrorCategory::Parse | ErrorCategory::Transformation => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFound { path } => format!("Input file '{}' does not exist", path),
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            Self::JsonError(e) => format!("The JSON content could not be processed: {}", e),
            Self::CsvError(e) => format!("The CSV content could not be processed: {}", e),
            Self::ParseError { path, message } => {
                format!("'{}' is not in the expected shape: {}", path, message)
            }
            Self::UnsupportedFormat { format } => {
                format!("Format '{}' is not supported (use json or csv)", format)
            }
            Self::TransformationError { message } => {
                format!("A transformation step failed: {}", message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the path exists and that you have permission to access it",
            ErrorCategory::Parse => "Make sure the file is valid JSON (an array of objects) or CSV with a header row",
            ErrorCategory::Format => "Rename the file with a .json or .csv extension, or pass an explicit format",
            ErrorCategory::Transformation => "Review the configured transformations against the input fields",
            ErrorCategory::Configuration => "Fix the reported setting in the job file or command line",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
