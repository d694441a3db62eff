use crate::domain::model::{MappedPattern, Pattern, Provider, SecurityTool};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PatternFetcher: Send + Sync {
    /// 取回工具的全部規則（已處理分頁）
    async fn fetch_patterns(&self, tool: &SecurityTool) -> Result<Vec<Pattern>>;
}

#[async_trait]
pub trait ToolConfigurator: Send + Sync {
    async fn configure_tool(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        tool: &SecurityTool,
        patterns: &[MappedPattern],
    ) -> Result<()>;
}

#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn wait(&self);
}
