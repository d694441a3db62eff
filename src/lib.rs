pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::codacy::CodacyClient;
pub use config::{EnablerConfig, RepositoryList};
pub use crate::core::{
    enabler::{RunSummary, SecurityEnabler},
    mapper::map_patterns,
    rate_limit::{FixedDelay, NoDelay},
};
pub use domain::model::{Provider, SecurityTool};
pub use utils::error::{EnablerError, Result};
