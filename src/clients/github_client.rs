/// GitHub API 客户端
///
/// 封装 Contents API 的读取和写入
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RepoTarget;
use crate::error::ApiError;

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("leetcode-uploader/", env!("CARGO_PKG_VERSION"));

/// 创建或更新文件的请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PutFileRequest {
    pub message: String,
    /// base64 编码后的文件内容
    pub content: String,
    /// 更新已有文件时必须携带当前 sha
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FileMetadata {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PutFileResponse {
    content: Option<PutFileContent>,
}

#[derive(Debug, Deserialize)]
struct PutFileContent {
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthenticatedUser {
    login: String,
}

/// 远程仓库文件操作
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// 查询路径上已有文件的 sha，不存在时返回 `None`
    async fn fetch_revision(&self, path: &str) -> Result<Option<String>, ApiError>;

    /// 创建或更新文件，成功时返回文件页面地址（如果有）
    async fn put_file(&self, path: &str, request: &PutFileRequest) -> Result<Option<String>, ApiError>;
}

/// GitHub 客户端
pub struct GitHubClient {
    http: Client,
    api_base: String,
    token: String,
    target: RepoTarget,
}

impl GitHubClient {
    /// 创建新的 GitHub 客户端，超时在这里统一设置
    pub fn new(token: impl Into<String>, target: RepoTarget) -> Result<Self, ApiError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| ApiError::Request {
                endpoint: GITHUB_API_BASE.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            api_base: GITHUB_API_BASE.to_string(),
            token: token.into(),
            target,
        })
    }

    /// 使用自定义 API 地址（GitHub Enterprise 等）
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.target.owner, self.target.name, path
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .bearer_auth(&self.token)
    }

    /// 检查 token 是否可用，返回登录名
    pub async fn test_connection(&self) -> Result<String, ApiError> {
        let endpoint = format!("{}/user", self.api_base);
        let response = self
            .authorized(self.http.get(&endpoint))
            .send()
            .await
            .map_err(|source| ApiError::Request {
                endpoint: endpoint.clone(),
                source,
            })?;

        let response = ensure_success(&endpoint, response).await?;
        let user: AuthenticatedUser = response
            .json()
            .await
            .map_err(|source| ApiError::Decode { endpoint, source })?;

        info!("✓ GitHub 连接成功，用户: {}", user.login);
        Ok(user.login)
    }
}

#[async_trait]
impl RepositoryApi for GitHubClient {
    async fn fetch_revision(&self, path: &str) -> Result<Option<String>, ApiError> {
        let endpoint = self.contents_url(path);
        let response = self
            .authorized(self.http.get(&endpoint))
            .send()
            .await
            .map_err(|source| ApiError::Request {
                endpoint: endpoint.clone(),
                source,
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("文件不存在: {}", path);
            return Ok(None);
        }

        let response = ensure_success(&endpoint, response).await?;
        let metadata: FileMetadata = response
            .json()
            .await
            .map_err(|source| ApiError::Decode { endpoint, source })?;

        debug!("已有文件 {} 的 sha: {}", path, metadata.sha);
        Ok(Some(metadata.sha))
    }

    async fn put_file(&self, path: &str, request: &PutFileRequest) -> Result<Option<String>, ApiError> {
        let endpoint = self.contents_url(path);
        let response = self
            .authorized(self.http.put(&endpoint))
            .json(request)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                endpoint: endpoint.clone(),
                source,
            })?;

        let response = ensure_success(&endpoint, response).await?;
        let body: PutFileResponse = response
            .json()
            .await
            .map_err(|source| ApiError::Decode { endpoint, source })?;

        Ok(body.content.and_then(|c| c.html_url))
    }
}

/// 非 2xx 状态码转为 `ApiError::BadStatus`
async fn ensure_success(endpoint: &str, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "No error body".to_string());
    Err(ApiError::BadStatus {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GitHubClient {
        GitHubClient::new(
            "token",
            RepoTarget {
                owner: "alice".to_string(),
                name: "solutions".to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_contents_url() {
        assert_eq!(
            client().contents_url("python/two-sum.py"),
            "https://api.github.com/repos/alice/solutions/contents/python/two-sum.py"
        );
        assert_eq!(
            client()
                .with_api_base("https://ghe.example.com/api/v3/")
                .contents_url("c/a.c"),
            "https://ghe.example.com/api/v3/repos/alice/solutions/contents/c/a.c"
        );
    }

    #[test]
    fn test_put_request_omits_missing_sha() {
        let create = PutFileRequest {
            message: "m".to_string(),
            content: "YQ==".to_string(),
            sha: None,
        };
        let json = serde_json::to_value(&create).unwrap();
        assert!(json.get("sha").is_none());

        let update = PutFileRequest {
            sha: Some("abc".to_string()),
            ..create
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["sha"], "abc");
    }

    /// 需要真实 token：GITHUB_TOKEN=... cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_live_connection() {
        let token = std::env::var("GITHUB_TOKEN").unwrap_or_default();
        let client = GitHubClient::new(
            token,
            RepoTarget {
                owner: "octocat".to_string(),
                name: "Hello-World".to_string(),
            },
        )
        .unwrap();
        assert!(client.test_connection().await.is_ok());
    }
}
