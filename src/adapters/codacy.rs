use crate::config::{EnablerConfig, DEFAULT_PAGE_SIZE};
use crate::domain::model::{
    MappedPattern, Pattern, PatternsPage, Provider, SecurityTool, ToolConfiguration,
};
use crate::domain::ports::{PatternFetcher, ToolConfigurator};
use crate::utils::error::{EnablerError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::collections::HashSet;
use url::Url;

const API_TOKEN_HEADER: &str = "api-token";
const JSON: &str = "application/json";

/// Codacy REST API v3 客戶端
#[derive(Clone)]
pub struct CodacyClient {
    client: Client,
    base_url: Url,
    api_token: String,
    page_size: usize,
}

impl CodacyClient {
    pub fn new(base_url: &str, api_token: impl Into<String>) -> Result<Self> {
        static APP_USER_AGENT: &str =
            concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

        let base_url = Url::parse(base_url).map_err(|e| EnablerError::InvalidConfigValue {
            field: "api_base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(EnablerError::InvalidConfigValue {
                field: "api_base_url".to_string(),
                value: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url,
            api_token: api_token.into(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    pub fn from_config(config: &EnablerConfig) -> Result<Self> {
        Ok(Self::new(&config.api_base_url, config.api_token.clone())?.with_page_size(config.page_size))
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// 在 base URL 之後附加路徑片段（會做 percent-encoding）
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch_page(&self, tool: &SecurityTool, cursor: Option<&str>) -> Result<PatternsPage> {
        let url = self.endpoint(&["tools", &tool.uuid, "patterns"]);

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, JSON)
            .header(API_TOKEN_HEADER, &self.api_token)
            .query(&[("limit", self.page_size.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Patterns page for {} responded with {}", tool.name, status);

        if status != StatusCode::OK {
            return Err(EnablerError::UnexpectedStatus {
                operation: format!("Fetching patterns for {}", tool.name),
                status,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl PatternFetcher for CodacyClient {
    async fn fetch_patterns(&self, tool: &SecurityTool) -> Result<Vec<Pattern>> {
        let mut patterns = Vec::new();
        let mut cursor: Option<String> = None;
        let mut seen_cursors = HashSet::new();
        let mut pages = 0usize;

        loop {
            let page = self.fetch_page(tool, cursor.as_deref()).await?;
            pages += 1;
            let next = page.next_cursor().map(str::to_string);
            patterns.extend(page.data);

            match next {
                Some(next) if !seen_cursors.insert(next.clone()) => {
                    tracing::warn!(
                        "⚠️ Server returned cursor '{}' again for {}, stopping pagination",
                        next,
                        tool.name
                    );
                    break;
                }
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        tracing::info!(
            "📡 Fetched {} patterns for {} in {} page(s)",
            patterns.len(),
            tool.name,
            pages
        );
        Ok(patterns)
    }
}

#[async_trait]
impl ToolConfigurator for CodacyClient {
    async fn configure_tool(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        tool: &SecurityTool,
        patterns: &[MappedPattern],
    ) -> Result<()> {
        let url = self.endpoint(&[
            "analysis",
            "organizations",
            provider.code(),
            organization,
            "repositories",
            repository,
            "tools",
            &tool.uuid,
        ]);
        let body = ToolConfiguration::enable_with(patterns.to_vec());

        tracing::debug!(
            "PATCH {} with {} patterns",
            url,
            body.patterns.len()
        );

        let response = self
            .client
            .patch(url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .header(API_TOKEN_HEADER, &self.api_token)
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(()),
            status => Err(EnablerError::UnexpectedStatus {
                operation: format!("Configuring {} for {}", tool.name, repository),
                status,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use serde_json::json;

    fn tool() -> SecurityTool {
        SecurityTool::new("Trivy", "trivy-uuid")
    }

    fn has_cursor(req: &HttpMockRequest) -> bool {
        req.query_params
            .as_ref()
            .map(|params| params.iter().any(|(key, _)| key == "cursor"))
            .unwrap_or(false)
    }

    fn first_page(req: &HttpMockRequest) -> bool {
        !has_cursor(req)
    }

    #[tokio::test]
    async fn test_fetch_follows_cursor_until_absent() {
        let server = MockServer::start();

        let page_one = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v3/tools/trivy-uuid/patterns")
                .query_param("limit", "100")
                .header("api-token", "secret")
                .header("accept", "application/json")
                .matches(first_page);
            then.status(200).json_body(json!({
                "data": [
                    {"id": "p1", "enabled": true},
                    {"id": "p2", "enabled": false}
                ],
                "pagination": {"cursor": "page-2", "limit": 100}
            }));
        });
        let page_two = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v3/tools/trivy-uuid/patterns")
                .query_param("cursor", "page-2");
            then.status(200).json_body(json!({
                "data": [{"id": "p3", "enabled": true}],
                "pagination": {"limit": 100}
            }));
        });

        let client = CodacyClient::new(&server.url("/api/v3"), "secret").unwrap();
        let patterns = client.fetch_patterns(&tool()).await.unwrap();

        page_one.assert();
        page_two.assert();
        let ids: Vec<_> = patterns.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn test_fetch_stops_on_empty_cursor() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/v3/tools/trivy-uuid/patterns");
            then.status(200).json_body(json!({
                "data": [{"id": "p1", "enabled": true}],
                "pagination": {"cursor": ""}
            }));
        });

        let client = CodacyClient::new(&server.url("/api/v3"), "secret").unwrap();
        let patterns = client.fetch_patterns(&tool()).await.unwrap();

        mock.assert_hits(1);
        assert_eq!(patterns.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_uses_configured_page_size() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v3/tools/trivy-uuid/patterns")
                .query_param("limit", "25");
            then.status(200).json_body(json!({"data": []}));
        });

        let client = CodacyClient::new(&server.url("/api/v3"), "secret")
            .unwrap()
            .with_page_size(25);
        let patterns = client.fetch_patterns(&tool()).await.unwrap();

        mock.assert();
        assert!(patterns.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_reports_non_200_status() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/v3/tools/trivy-uuid/patterns");
            then.status(403);
        });

        let client = CodacyClient::new(&server.url("/api/v3"), "bad-token").unwrap();
        let err = client.fetch_patterns(&tool()).await.unwrap_err();

        mock.assert_hits(1);
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    }

    #[tokio::test]
    async fn test_fetch_rejects_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v3/tools/trivy-uuid/patterns");
            then.status(200).body("<html>maintenance</html>");
        });

        let client = CodacyClient::new(&server.url("/api/v3"), "secret").unwrap();
        let err = client.fetch_patterns(&tool()).await.unwrap_err();

        assert!(matches!(err, EnablerError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_configure_sends_expected_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/api/v3/analysis/organizations/gh/acme/repositories/repoA/tools/trivy-uuid")
                .header("api-token", "secret")
                .header("content-type", "application/json")
                .header("accept", "application/json")
                .json_body(json!({
                    "enabled": true,
                    "useConfigurationFile": false,
                    "patterns": [
                        {"id": "p1", "enabled": true, "parameters": [{"name": "max", "value": "10"}]},
                        {"id": "p2", "enabled": true}
                    ]
                }));
            then.status(204);
        });

        let patterns = vec![
            MappedPattern {
                id: "p1".to_string(),
                enabled: true,
                parameters: Some(vec![crate::domain::model::MappedParameter {
                    name: "max".to_string(),
                    value: "10".to_string(),
                }]),
            },
            MappedPattern {
                id: "p2".to_string(),
                enabled: true,
                parameters: None,
            },
        ];

        let client = CodacyClient::new(&server.url("/api/v3"), "secret").unwrap();
        client
            .configure_tool(Provider::GitHub, "acme", "repoA", &tool(), &patterns)
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn test_configure_treats_200_as_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PATCH);
            then.status(200);
        });

        let client = CodacyClient::new(&server.url("/api/v3"), "secret").unwrap();
        let err = client
            .configure_tool(Provider::GitLab, "acme", "repoA", &tool(), &[])
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::OK));
    }

    #[test]
    fn test_endpoint_encodes_path_segments() {
        let client = CodacyClient::new("https://app.codacy.com/api/v3/", "secret").unwrap();
        let url = client.endpoint(&["analysis", "organizations", "bb", "my org", "repositories", "a/b"]);

        assert_eq!(
            url.as_str(),
            "https://app.codacy.com/api/v3/analysis/organizations/bb/my%20org/repositories/a%2Fb"
        );
    }

    #[tokio::test]
    async fn test_fetch_stops_on_repeated_cursor() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/v3/tools/trivy-uuid/patterns");
            then.status(200).json_body(json!({
                "data": [{"id": "p1", "enabled": true}],
                "pagination": {"cursor": "stuck"}
            }));
        });

        let client = CodacyClient::new(&server.url("/api/v3"), "secret").unwrap();
        let patterns = client.fetch_patterns(&tool()).await.unwrap();

        mock.assert_hits(2);
        assert_eq!(patterns.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_stops_on_cursor_cycle() {
        let server = MockServer::start();
        let start = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v3/tools/trivy-uuid/patterns")
                .matches(first_page);
            then.status(200).json_body(json!({
                "data": [{"id": "p1", "enabled": true}],
                "pagination": {"cursor": "A"}
            }));
        });
        let from_a = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v3/tools/trivy-uuid/patterns")
                .query_param("cursor", "A");
            then.status(200).json_body(json!({
                "data": [{"id": "p2", "enabled": true}],
                "pagination": {"cursor": "B"}
            }));
        });
        let from_b = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v3/tools/trivy-uuid/patterns")
                .query_param("cursor", "B");
            then.status(200).json_body(json!({
                "data": [{"id": "p3", "enabled": true}],
                "pagination": {"cursor": "A"}
            }));
        });

        let client = CodacyClient::new(&server.url("/api/v3"), "secret").unwrap();
        let patterns = client.fetch_patterns(&tool()).await.unwrap();

        start.assert_hits(1);
        from_a.assert_hits(1);
        from_b.assert_hits(1);
        assert_eq!(patterns.len(), 3);
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(CodacyClient::new("not a url", "secret").is_err());
        assert!(CodacyClient::new("mailto:ops@example.com", "secret").is_err());
    }
}
