#[cfg(feature = "cli")]
pub mod cli;
pub mod repositories;

use crate::domain::model::Provider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use repositories::RepositoryList;

pub const DEFAULT_API_BASE_URL: &str = "https://app.codacy.com/api/v3";
pub const DEFAULT_REPOS_FILE: &str = "repos.txt";
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// 單次執行所需的全部設定
#[derive(Clone)]
pub struct EnablerConfig {
    pub api_base_url: String,
    pub api_token: String,
    pub provider: Provider,
    pub organization: String,
    pub repos_file: PathBuf,
    pub page_size: usize,
}

impl EnablerConfig {
    pub fn new(api_token: impl Into<String>, provider: Provider, organization: impl Into<String>) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: api_token.into(),
            provider,
            organization: organization.into(),
            repos_file: PathBuf::from(DEFAULT_REPOS_FILE),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn with_repos_file(mut self, repos_file: impl Into<PathBuf>) -> Self {
        self.repos_file = repos_file.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

impl Validate for EnablerConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("api_token", &self.api_token)?;
        validation::validate_non_empty_string("organization", &self.organization)?;
        validation::validate_url("api_base_url", &self.api_base_url)?;
        validation::validate_positive_number("page_size", self.page_size, 1)?;
        Ok(())
    }
}

// api_token 不可出現在日誌中
impl fmt::Debug for EnablerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnablerConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_token", &"***")
            .field("provider", &self.provider)
            .field("organization", &self.organization)
            .field("repos_file", &self.repos_file)
            .field("page_size", &self.page_size)
            .finish()
    }
}
