use thiserror::Error;

/// Failure of a single call to the resume backend.
/// Every variant is recoverable at the gateway boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Backend returned an empty document")]
    EmptyBody,
}

/// Session-level error type returned by the wizard controller and gateway.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Unsupported file type '{found}'. Please upload one of: {allowed}")]
    InvalidFileType { found: String, allowed: String },

    #[error("File size must be less than {limit} (got {size} bytes)")]
    FileTooLarge {
        size: u64,
        limit_bytes: u64,
        limit: String,
    },

    #[error("The selected file is empty")]
    EmptyFile,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Failed to upload resume: {0}")]
    Upload(#[source] GatewayError),

    #[error("Failed to generate PDF: {0}")]
    Generate(#[source] GatewayError),

    #[error("Another request is already in progress")]
    Busy,

    #[error("No resume loaded. Please upload a resume first")]
    NoResume,

    #[error("No template selected")]
    NoTemplate,

    #[error("No enhancement available yet")]
    NoEnhancement,

    #[error("Choose the original or enhanced version before continuing")]
    VersionNotChosen,
}

impl WizardError {
    /// Stable machine-readable code for the error, used by hosts that map
    /// failures onto inline field errors or banners.
    pub fn code(&self) -> &'static str {
        match self {
            WizardError::InvalidFileType { .. } => "INVALID_FILE_TYPE",
            WizardError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            WizardError::EmptyFile => "EMPTY_FILE",
            WizardError::MissingField(_) => "MISSING_FIELD",
            WizardError::Upload(_) => "UPLOAD_FAILED",
            WizardError::Generate(_) => "GENERATE_FAILED",
            WizardError::Busy => "BUSY",
            WizardError::NoResume => "NO_RESUME",
            WizardError::NoTemplate => "NO_TEMPLATE",
            WizardError::NoEnhancement => "NO_ENHANCEMENT",
            WizardError::VersionNotChosen => "VERSION_NOT_CHOSEN",
        }
    }

    /// Input-rejection errors are detected locally and never reach the network.
    pub fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            WizardError::InvalidFileType { .. }
                | WizardError::FileTooLarge { .. }
                | WizardError::EmptyFile
                | WizardError::MissingField(_)
        )
    }
}

pub type Result<T, E = WizardError> = std::result::Result<T, E>;
