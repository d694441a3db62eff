use crate::utils::error::EnablerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Codacy 工具的單一規則定義
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pattern {
    pub id: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub parameters: Option<Vec<PatternParameter>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PatternParameter {
    pub name: String,
    #[serde(default)]
    pub default: Option<String>,
}

/// 送往設定 API 的規則
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedPattern {
    pub id: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<MappedParameter>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedParameter {
    pub name: String,
    pub value: String,
}

/// `GET /tools/{uuid}/patterns` 的回應外層
#[derive(Debug, Clone, Deserialize)]
pub struct PatternsPage {
    pub data: Vec<Pattern>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub cursor: Option<String>,
}

impl PatternsPage {
    /// 下一頁的 cursor；缺少或空字串代表已是最後一頁
    pub fn next_cursor(&self) -> Option<&str> {
        self.pagination
            .as_ref()
            .and_then(|p| p.cursor.as_deref())
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfiguration {
    pub enabled: bool,
    pub use_configuration_file: bool,
    pub patterns: Vec<MappedPattern>,
}

impl ToolConfiguration {
    /// 啟用工具並只使用 Codacy 端的規則設定
    pub fn enable_with(patterns: Vec<MappedPattern>) -> Self {
        Self {
            enabled: true,
            use_configuration_file: false,
            patterns,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    GitHub,
    GitLab,
    Bitbucket,
}

impl Provider {
    pub const CODES: [&'static str; 3] = ["gh", "gl", "bb"];

    pub fn code(&self) -> &'static str {
        match self {
            Provider::GitHub => "gh",
            Provider::GitLab => "gl",
            Provider::Bitbucket => "bb",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Provider {
    type Err = EnablerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gh" => Ok(Provider::GitHub),
            "gl" => Ok(Provider::GitLab),
            "bb" => Ok(Provider::Bitbucket),
            other => Err(EnablerError::InvalidProvider {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityTool {
    pub name: String,
    pub uuid: String,
}

pub const TRIVY_TOOL_UUID: &str = "2fd7fbe0-33f9-4ab3-ab73-e9b62404e2cb";
pub const SEMGREP_TOOL_UUID: &str = "6792c561-236d-41b7-ba5e-9d6bee0d548b";

impl SecurityTool {
    pub fn new(name: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uuid: uuid.into(),
        }
    }

    /// 預設啟用的兩個安全掃描工具
    pub fn defaults() -> Vec<SecurityTool> {
        vec![
            SecurityTool::new("Trivy", TRIVY_TOOL_UUID),
            SecurityTool::new("Semgrep", SEMGREP_TOOL_UUID),
        ]
    }
}

impl fmt::Display for SecurityTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.uuid)
    }
}
