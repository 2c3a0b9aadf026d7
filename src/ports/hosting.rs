use async_trait::async_trait;
use crate::domain::entities::Repository;
use crate::shared::error::HostingError;

pub type HostingResult<T> = std::result::Result<T, HostingError>;

/// README 候选文件名，按优先级排列
pub const README_CANDIDATES: [&str; 4] = ["README.md", "readme.md", "README.txt", "README"];

/// 代码托管平台接口
#[async_trait]
pub trait HostingPort: Send + Sync {
    /// 账号名（README 请求的 owner）
    fn owner(&self) -> &str;

    /// 列出账号下的仓库，按平台默认顺序（最近更新）返回
    ///
    /// 返回结果未经过滤，调用方负责去掉 fork 和私有仓库。
    async fn list_repositories(&self) -> HostingResult<Vec<Repository>>;

    /// 依次尝试候选文件名，返回第一个成功解码的文件内容
    ///
    /// 所有候选都不存在时返回 `Ok(None)`。
    async fn fetch_file_content(
        &self,
        owner: &str,
        repo: &str,
        candidates: &[&str],
    ) -> HostingResult<Option<String>>;
}
