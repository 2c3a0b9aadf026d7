use async_trait::async_trait;
use moka::future::Cache;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use crate::ports::cache::CachePort;
use crate::shared::result::Result;

/// Moka 内存缓存实现，值以 bincode 编码保存
pub struct MokaCache {
    cache: Cache<String, Vec<u8>>,
}

impl MokaCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self { cache }
    }

    /// 未命中时执行 `init` 并写入缓存
    ///
    /// 同一个 key 的并发调用只执行一次 `init`，其余调用等待同一个结果；`init` 失败时不写缓存。
    pub async fn try_get_with<T, E, F>(&self, key: &str, init: F) -> std::result::Result<T, Arc<E>>
    where
        T: Serialize + DeserializeOwned,
        E: From<bincode::Error> + Send + Sync + 'static,
        F: Future<Output = std::result::Result<T, E>>,
    {
        let bytes = self
            .cache
            .try_get_with(key.to_string(), async move {
                let value = init.await?;
                bincode::serialize(&value).map_err(E::from)
            })
            .await?;

        bincode::deserialize(&bytes).map_err(|e| Arc::new(E::from(e)))
    }
}

#[async_trait]
impl CachePort for MokaCache {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        match self.cache.get(key).await {
            Some(bytes) => {
                let value = bincode::deserialize(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = bincode::serialize(value)?;
        self.cache.insert(key.to_string(), bytes).await;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        // invalidate_all 是惰性的，run_pending_tasks 之后 get 才保证落空
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }
}
