use serde::Deserialize;

/// `GET /repos/{owner}/{repo}/contents/{path}` 的响应
#[derive(Debug, Deserialize)]
pub struct ContentResponse {
    pub content: Option<String>,
    pub encoding: Option<String>,
}

/// GitHub 错误响应体
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}
