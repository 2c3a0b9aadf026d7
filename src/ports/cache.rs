use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use crate::shared::result::Result;

/// 页面数据缓存接口
#[async_trait]
pub trait CachePort: Send + Sync {
    /// 获取缓存值
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;

    /// 写入缓存值，过期时间由缓存的全局 TTL 决定
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> Result<()>;

    /// 清空所有缓存（同步按钮触发）
    async fn clear(&self) -> Result<()>;
}
