use crate::adapters::codacy::CodacyClient;
use crate::config::{EnablerConfig, RepositoryList};
use crate::core::mapper::map_patterns;
use crate::core::{PatternFetcher, Provider, RateLimiter, SecurityTool, ToolConfigurator};
use crate::utils::error::{EnablerError, Result};
use crate::utils::validation::Validate;

/// 單一 repository 設定失敗的紀錄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFailure {
    pub repository: String,
    pub status: Option<u16>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReport {
    pub tool: SecurityTool,
    pub patterns_fetched: usize,
    pub patterns_enabled: usize,
    pub configured: Vec<String>,
    pub failed: Vec<RepositoryFailure>,
    /// 取得規則失敗時，該工具整個被略過
    pub fetch_error: Option<String>,
}

impl ToolReport {
    fn new(tool: SecurityTool) -> Self {
        Self {
            tool,
            patterns_fetched: 0,
            patterns_enabled: 0,
            configured: Vec::new(),
            failed: Vec::new(),
            fetch_error: None,
        }
    }

    pub fn skipped(&self) -> bool {
        self.fetch_error.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub tools: Vec<ToolReport>,
}

impl RunSummary {
    pub fn total_configured(&self) -> usize {
        self.tools.iter().map(|t| t.configured.len()).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.tools.iter().map(|t| t.failed.len()).sum()
    }

    pub fn skipped_tools(&self) -> impl Iterator<Item = &SecurityTool> {
        self.tools.iter().filter(|t| t.skipped()).map(|t| &t.tool)
    }
}

pub struct SecurityEnabler<A, R> {
    api: A,
    limiter: R,
    provider: Provider,
    organization: String,
    tools: Vec<SecurityTool>,
}

impl<A, R> SecurityEnabler<A, R>
where
    A: PatternFetcher + ToolConfigurator,
    R: RateLimiter,
{
    pub fn new(
        api: A,
        limiter: R,
        provider: Provider,
        organization: impl Into<String>,
        tools: Vec<SecurityTool>,
    ) -> Self {
        Self {
            api,
            limiter,
            provider,
            organization: organization.into(),
            tools,
        }
    }

    /// 依序為每個工具取得規則，再逐一設定每個 repository
    pub async fn run(&self, repositories: &RepositoryList) -> RunSummary {
        let mut summary = RunSummary::default();

        for tool in &self.tools {
            println!(
                "Enabling {} for {} {}",
                tool, self.provider, self.organization
            );
            tracing::debug!(
                "🚀 Enabling {} for {} repositories in {}/{}",
                tool.name,
                repositories.len(),
                self.provider,
                self.organization
            );
            summary.tools.push(self.enable_tool(tool, repositories).await);
        }

        tracing::info!(
            "✅ Run finished: {} configured, {} failed, {} tool(s) skipped",
            summary.total_configured(),
            summary.total_failed(),
            summary.skipped_tools().count()
        );
        summary
    }

    async fn enable_tool(&self, tool: &SecurityTool, repositories: &RepositoryList) -> ToolReport {
        let mut report = ToolReport::new(tool.clone());

        let patterns = match self.api.fetch_patterns(tool).await {
            Ok(patterns) => patterns,
            Err(e) => {
                tracing::debug!("❌ Fetching patterns for {} failed: {}", tool.name, e);
                tracing::debug!("💡 Suggestion: {}", e.recovery_suggestion());
                eprintln!("Error fetching patterns: {}", describe(&e));
                eprintln!("Skipping {} for all repositories", tool.name);
                report.fetch_error = Some(e.to_string());
                return report;
            }
        };

        let mapped = map_patterns(&patterns);
        report.patterns_fetched = patterns.len();
        report.patterns_enabled = mapped.len();
        tracing::debug!(
            "{}: {} of {} patterns enabled",
            tool.name,
            mapped.len(),
            patterns.len()
        );

        for repository in repositories.iter() {
            println!("Configuring {} for repo: {}", tool.name, repository);

            match self
                .api
                .configure_tool(self.provider, &self.organization, repository, tool, &mapped)
                .await
            {
                Ok(()) => {
                    println!("Tool configured successfully");
                    report.configured.push(repository.to_string());
                }
                Err(e) => {
                    tracing::debug!("⚠️ Configuring {} for {} failed: {}", tool.name, repository, e);
                    eprintln!("Error configuring tool: {}", describe(&e));
                    report.failed.push(RepositoryFailure {
                        repository: repository.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                        message: e.to_string(),
                    });
                }
            }

            self.limiter.wait().await;
        }

        report
    }
}

impl<R: RateLimiter> SecurityEnabler<CodacyClient, R> {
    /// 驗證設定與 repository 清單後，對 Codacy API 執行整個流程
    ///
    /// 任何驗證錯誤都會在發出第一個請求之前回傳。
    pub async fn run_with_config(
        config: &EnablerConfig,
        tools: Vec<SecurityTool>,
        limiter: R,
    ) -> Result<RunSummary> {
        config.validate()?;
        let repositories = RepositoryList::load(&config.repos_file)?;
        println!(
            "{} file found and is not empty.",
            config.repos_file.display()
        );

        let client = CodacyClient::from_config(config)?;
        let enabler = Self::new(
            client,
            limiter,
            config.provider,
            config.organization.clone(),
            tools,
        );
        Ok(enabler.run(&repositories).await)
    }
}

// 狀態碼錯誤只顯示數字，其餘顯示完整訊息
fn describe(error: &EnablerError) -> String {
    match error {
        EnablerError::UnexpectedStatus { status, .. } => status.as_u16().to_string(),
        other => other.to_string(),
    }
}
