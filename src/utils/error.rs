use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnablerError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing required argument: --{argument}")]
    MissingArgument { argument: String },

    #[error("Invalid provider '{value}'")]
    InvalidProvider { value: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{} file not found", .path.display())]
    RepositoryFileNotFound { path: std::path::PathBuf },

    #[error("{} file is empty", .path.display())]
    EmptyRepositoryFile { path: std::path::PathBuf },

    #[error("{operation} returned unexpected status {status}")]
    UnexpectedStatus {
        operation: String,
        status: reqwest::StatusCode,
    },
}

/// 錯誤分類，對應三種失敗路徑
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 輸入驗證失敗，整個執行中止
    Validation,
    /// 與 Codacy API 溝通失敗
    Api,
    /// 本地 IO 或資料解析失敗
    System,
}

impl EnablerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EnablerError::MissingArgument { .. }
            | EnablerError::InvalidProvider { .. }
            | EnablerError::InvalidConfigValue { .. }
            | EnablerError::RepositoryFileNotFound { .. }
            | EnablerError::EmptyRepositoryFile { .. } => ErrorCategory::Validation,
            EnablerError::Http(_) | EnablerError::UnexpectedStatus { .. } => ErrorCategory::Api,
            EnablerError::Io(_) | EnablerError::Serialization(_) => ErrorCategory::System,
        }
    }

    /// API 回應的狀態碼（僅限非預期狀態）
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            EnablerError::UnexpectedStatus { status, .. } => Some(*status),
            EnablerError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            EnablerError::MissingArgument { argument } => match argument.as_str() {
                "api-token" => "Error: API token is required. Please provide --api-token.".to_string(),
                "provider" => {
                    "Error: Provider is required. Please provide --provider (gh, gl, or bb)."
                        .to_string()
                }
                "organization" => {
                    "Error: Organization name is required. Please provide --organization."
                        .to_string()
                }
                other => format!("Error: --{} is required.", other),
            },
            EnablerError::InvalidProvider { .. } => format!(
                "Error: Invalid provider. Please choose from {}.",
                crate::domain::model::Provider::CODES.join(", ")
            ),
            EnablerError::RepositoryFileNotFound { path } => {
                format!("Error: {} file not found.", path.display())
            }
            EnablerError::EmptyRepositoryFile { path } => {
                format!("Error: {} file is empty.", path.display())
            }
            EnablerError::UnexpectedStatus { status, .. } => {
                format!("Error: Codacy API responded with {}", status.as_u16())
            }
            other => format!("Error: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EnablerError::MissingArgument { argument } => {
                format!("Pass --{} on the command line", argument)
            }
            EnablerError::InvalidProvider { .. } => {
                "Use gh for GitHub, gl for GitLab or bb for Bitbucket".to_string()
            }
            EnablerError::InvalidConfigValue { field, .. } => {
                format!("Check the value given for {}", field)
            }
            EnablerError::RepositoryFileNotFound { path } => format!(
                "Please create a {} file in the current directory.\n\
                 Add one repository name per line in the file.\n\
                 Example content of {}:\n\
                 repo1\n\
                 repo2\n\
                 repo3",
                path.display(),
                path.display()
            ),
            EnablerError::EmptyRepositoryFile { .. } => {
                "Please add at least one repository name to the file.".to_string()
            }
            EnablerError::UnexpectedStatus { status, .. } => match status.as_u16() {
                401 | 403 => "Check that the API token is valid and has access to the organization"
                    .to_string(),
                404 => "Check the provider, organization and repository names".to_string(),
                429 => "The API rate limit was hit, try again later".to_string(),
                _ => "Try again later or inspect the response in verbose mode".to_string(),
            },
            EnablerError::Http(_) => "Check network connectivity to the Codacy API".to_string(),
            EnablerError::Io(_) => "Check file permissions in the working directory".to_string(),
            EnablerError::Serialization(_) => {
                "The Codacy API returned an unexpected payload".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, EnablerError>;
