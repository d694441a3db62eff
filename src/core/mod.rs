pub mod enabler;
pub mod mapper;
pub mod rate_limit;

pub use crate::domain::model::{
    MappedParameter, MappedPattern, Pattern, Provider, SecurityTool,
};
pub use crate::domain::ports::{PatternFetcher, RateLimiter, ToolConfigurator};
pub use crate::utils::error::Result;
