use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use crate::domain::entities::Repository;
use crate::infrastructure::github::types::{ApiErrorBody, ContentResponse};
use crate::ports::hosting::{HostingPort, HostingResult};
use crate::shared::config::GitHubConfig;
use crate::shared::error::{FolioError, HostingError};
use crate::shared::result::Result;

/// GitHub 每页最多返回 100 条
const PER_PAGE: usize = 100;

/// 最多翻页次数
const MAX_PAGES: u32 = 10;

/// GitHub REST API 客户端
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
    username: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| FolioError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let token = config
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        if token.is_some() {
            info!("GitHub token found, using authenticated requests");
        } else {
            warn!("No GitHub token configured, using unauthenticated requests (60/hour limit)");
        }

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            token,
        })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url);
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("token {}", token)),
            None => request,
        }
    }

    /// 获取单个文件，404 或非 base64 内容返回 `Ok(None)`
    async fn fetch_single_file(&self, owner: &str, repo: &str, path: &str) -> HostingResult<Option<String>> {
        let url = format!("{}/repos/{}/{}/contents/{}", self.api_url, owner, repo, path);
        let response = self.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body = response.bytes().await?;
        // 路径是目录时返回的是数组，视为不存在
        let Ok(content) = serde_json::from_slice::<ContentResponse>(&body) else {
            debug!("{} is not a file", path);
            return Ok(None);
        };

        Ok(decode_content(&content))
    }
}

#[async_trait]
impl HostingPort for GitHubClient {
    fn owner(&self) -> &str {
        &self.username
    }

    #[instrument(skip(self), fields(user = %self.username))]
    async fn list_repositories(&self) -> HostingResult<Vec<Repository>> {
        let url = format!("{}/users/{}/repos", self.api_url, self.username);
        let per_page = PER_PAGE.to_string();
        let mut repos = Vec::new();

        for page in 1..=MAX_PAGES {
            let page_param = page.to_string();
            let response = self
                .get(&url)
                .query(&[
                    ("per_page", per_page.as_str()),
                    ("type", "owner"),
                    ("sort", "updated"),
                    ("page", page_param.as_str()),
                ])
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(error_from_response(response).await);
            }

            let batch: Vec<Repository> = response.json().await?;
            let batch_len = batch.len();
            repos.extend(batch);

            debug!("Fetched page {} with {} repositories", page, batch_len);
            if batch_len < PER_PAGE {
                break;
            }
        }

        Ok(repos)
    }

    #[instrument(skip(self, candidates))]
    async fn fetch_file_content(
        &self,
        owner: &str,
        repo: &str,
        candidates: &[&str],
    ) -> HostingResult<Option<String>> {
        let mut last_error = None;

        for name in candidates {
            match self.fetch_single_file(owner, repo, name).await {
                Ok(Some(text)) => {
                    debug!("Found {} in {}", name, repo);
                    return Ok(Some(text));
                }
                Ok(None) => debug!("{} not found in {}", name, repo),
                Err(e) => {
                    warn!("Failed to fetch {} from {}: {}", name, repo, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }
}

/// 解码 contents API 返回的 base64 内容（内容中带换行）
fn decode_content(content: &ContentResponse) -> Option<String> {
    if content.encoding.as_deref() != Some("base64") {
        return None;
    }
    let raw = content.content.as_deref()?;
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    match base64::engine::general_purpose::STANDARD.decode(cleaned) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            warn!("Invalid base64 content: {}", e);
            None
        }
    }
}

/// 把非 2xx 响应归类
async fn error_from_response(response: Response) -> HostingError {
    let status = response.status();
    let quota_exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        == Some("0");

    let body: ApiErrorBody = response.json().await.unwrap_or_default();
    let message = body
        .message
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

    let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN
            && (quota_exhausted || message.to_lowercase().contains("rate limit")));

    if rate_limited {
        HostingError::RateLimited(message)
    } else {
        HostingError::Upstream {
            status: status.as_u16(),
            message,
        }
    }
}
