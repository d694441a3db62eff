use crate::config::{EnablerConfig, DEFAULT_API_BASE_URL};
use crate::domain::model::Provider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_argument, Validate};
use clap::Parser;

// 必填參數都宣告為 Option，缺少時由驗證流程輸出說明，而不是由 clap 直接結束程式
#[derive(Clone, Parser)]
#[command(name = "codacy-security-enabler")]
#[command(about = "Enable Codacy security tools across a list of repositories")]
pub struct CliConfig {
    #[arg(long, help = "the api-token to be used on the REST API")]
    pub api_token: Option<String>,

    #[arg(long, help = "git provider (gh,gl,bb)")]
    pub provider: Option<String>,

    #[arg(long, help = "organization name")]
    pub organization: Option<String>,

    #[arg(long, hide = true, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 依序驗證 token、provider、organization，並轉成執行設定
    pub fn to_enabler_config(&self) -> Result<EnablerConfig> {
        let api_token = validate_required_argument("api-token", &self.api_token)?;
        let provider: Provider = validate_required_argument("provider", &self.provider)?.parse()?;
        let organization = validate_required_argument("organization", &self.organization)?;

        let config = EnablerConfig::new(api_token, provider, organization)
            .with_api_base_url(self.api_base_url.clone());
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EnablerError;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::parse_from(std::iter::once("codacy-security-enabler").chain(args.iter().copied()))
    }

    #[test]
    fn test_valid_arguments() {
        let cli = parse(&["--api-token", "t0k3n", "--provider", "gl", "--organization", "acme"]);
        let config = cli.to_enabler_config().unwrap();

        assert_eq!(config.api_token, "t0k3n");
        assert_eq!(config.provider, Provider::GitLab);
        assert_eq!(config.organization, "acme");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_token_is_checked_first() {
        let cli = parse(&[]);
        match cli.to_enabler_config() {
            Err(EnablerError::MissingArgument { argument }) => assert_eq!(argument, "api-token"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_provider() {
        let cli = parse(&["--api-token", "t", "--organization", "acme"]);
        match cli.to_enabler_config() {
            Err(EnablerError::MissingArgument { argument }) => assert_eq!(argument, "provider"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_invalid_provider() {
        let cli = parse(&["--api-token", "t", "--provider", "svn", "--organization", "acme"]);
        assert!(matches!(
            cli.to_enabler_config(),
            Err(EnablerError::InvalidProvider { .. })
        ));
    }

    #[test]
    fn test_missing_organization() {
        let cli = parse(&["--api-token", "t", "--provider", "bb"]);
        match cli.to_enabler_config() {
            Err(EnablerError::MissingArgument { argument }) => assert_eq!(argument, "organization"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
