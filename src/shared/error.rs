use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// GitHub API 调用失败的分类
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostingError {
    /// 配额耗尽（403 rate limit / 429）
    #[error("GitHub API rate limit exceeded: {0}")]
    RateLimited(String),

    /// 请求超时
    #[error("GitHub API request timed out")]
    Timeout,

    /// 网络错误
    #[error("Network error: {0}")]
    Network(String),

    /// 其他非 2xx 响应，或响应体无法解析
    #[error("GitHub API error: {status} {message}")]
    Upstream { status: u16, message: String },
}

impl HostingError {
    /// 日志里使用的错误类别
    pub fn category(&self) -> &'static str {
        match self {
            HostingError::RateLimited(_) => "rate_limited",
            HostingError::Timeout => "timeout",
            HostingError::Network(_) => "network",
            HostingError::Upstream { .. } => "upstream",
        }
    }
}

impl From<reqwest::Error> for HostingError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            HostingError::Timeout
        } else if e.is_decode() {
            HostingError::Upstream {
                status: e.status().map(|s| s.as_u16()).unwrap_or(200),
                message: e.to_string(),
            }
        } else if let Some(status) = e.status() {
            HostingError::Upstream {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            HostingError::Network(e.to_string())
        }
    }
}

/// 统一的错误类型
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    /// GitHub API 错误
    #[error(transparent)]
    Hosting(#[from] HostingError),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 缓存序列化错误
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// 项目未找到
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),

    /// Template 渲染错误
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// 用于 Axum 的错误响应实现
impl IntoResponse for FolioError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            FolioError::ProjectNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            FolioError::Hosting(HostingError::RateLimited(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "GitHub rate limit exceeded".to_string())
            }
            FolioError::Hosting(_) => (StatusCode::BAD_GATEWAY, "GitHub API unavailable".to_string()),
            FolioError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string()),
        };

        tracing::error!("Request error: {}", self);

        (status, message).into_response()
    }
}
