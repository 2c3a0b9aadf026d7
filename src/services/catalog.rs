use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::domain::entities::{filter_public_originals, Repository};
use crate::domain::fallback::fallback_repositories;
use crate::infrastructure::cache::MokaCache;
use crate::ports::cache::CachePort;
use crate::ports::hosting::{HostingPort, README_CANDIDATES};
use crate::services::extractor::extract_preview;
use crate::shared::error::HostingError;
use crate::shared::result::Result;

const REPOSITORIES_KEY: &str = "repositories";

fn readme_key(name: &str) -> String {
    format!("readme:{}", name)
}

/// 拉取实时列表失败的原因，都会触发回退
#[derive(Debug, thiserror::Error)]
enum ListingError {
    #[error(transparent)]
    Hosting(#[from] HostingError),

    #[error("no public repositories")]
    Empty,

    #[error("Serialization error: {0}")]
    Cache(#[from] bincode::Error),
}

/// 数据来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Live,
    Fallback,
}

/// 一次加载得到的仓库列表（已过滤）
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub repositories: Vec<Repository>,
    pub source: Source,
}

impl Snapshot {
    fn fallback() -> Self {
        Self {
            repositories: fallback_repositories().to_vec(),
            source: Source::Fallback,
        }
    }
}

/// 项目目录：拉取仓库列表、失败时回退到静态数据，并缓存 README
pub struct ProjectCatalog {
    hosting: Arc<dyn HostingPort>,
    cache: Arc<MokaCache>,
}

impl ProjectCatalog {
    pub fn new(hosting: Arc<dyn HostingPort>, cache: Arc<MokaCache>) -> Self {
        Self { hosting, cache }
    }

    /// 加载仓库列表
    ///
    /// 只请求一次，不重试；缓存未命中时并发请求共用同一次拉取。
    /// 任何错误或空列表都回退到静态列表，回退数据不写缓存。
    pub async fn load(&self) -> Snapshot {
        match self.cache.try_get_with(REPOSITORIES_KEY, self.fetch_live()).await {
            Ok(repositories) => {
                debug!("Serving {} repositories", repositories.len());
                Snapshot {
                    repositories,
                    source: Source::Live,
                }
            }
            Err(e) => {
                match e.as_ref() {
                    ListingError::Hosting(hosting) => log_fallback(hosting),
                    ListingError::Empty => {
                        warn!("GitHub returned no public repositories. Using fallback projects.")
                    }
                    ListingError::Cache(err) => {
                        warn!("Repository cache unusable ({}). Using fallback projects.", err)
                    }
                }
                Snapshot::fallback()
            }
        }
    }

    async fn fetch_live(&self) -> std::result::Result<Vec<Repository>, ListingError> {
        let repositories = filter_public_originals(self.hosting.list_repositories().await?);
        if repositories.is_empty() {
            return Err(ListingError::Empty);
        }
        info!("Loaded {} repositories from GitHub", repositories.len());
        Ok(repositories)
    }

    /// 按名称查找展示中的仓库
    pub async fn find(&self, name: &str) -> Option<Repository> {
        self.load()
            .await
            .repositories
            .into_iter()
            .find(|r| r.name == name)
    }

    /// README 全文，`None` 表示仓库没有 README
    pub async fn readme(&self, name: &str) -> Result<Option<String>> {
        let key = readme_key(name);
        match self.cache.get::<Option<String>>(&key).await {
            Ok(Some(hit)) => return Ok(hit),
            Ok(None) => {}
            Err(e) => warn!("Failed to read README cache for {}: {}", name, e),
        }

        let owner = self.hosting.owner().to_string();
        let content = self
            .hosting
            .fetch_file_content(&owner, name, &README_CANDIDATES)
            .await?;

        if let Err(e) = self.cache.set(&key, &content).await {
            warn!("Failed to cache README for {}: {}", name, e);
        }
        Ok(content)
    }

    /// README 摘要
    pub async fn readme_preview(&self, name: &str) -> Result<Option<String>> {
        let preview = self
            .readme(name)
            .await?
            .map(|text| extract_preview(&text))
            .filter(|p| !p.is_empty());
        Ok(preview)
    }

    /// 清空缓存，下一次请求重新拉取
    pub async fn refresh(&self) -> Result<()> {
        self.cache.clear().await?;
        info!("Repository cache cleared");
        Ok(())
    }
}

fn log_fallback(e: &HostingError) {
    let category = e.category();
    match e {
        HostingError::RateLimited(_) => warn!(
            category,
            "GitHub API rate limit exceeded. Using fallback projects. Configure a GitHub token for higher rate limits."
        ),
        HostingError::Network(reason) => warn!(
            category,
            "Network error while fetching GitHub repositories ({}). Using fallback projects.", reason
        ),
        HostingError::Timeout => warn!(
            category,
            "GitHub API request timed out. Using fallback projects."
        ),
        HostingError::Upstream { status, message } => warn!(
            category,
            "GitHub API error: {} {}. Using fallback projects.", status, message
        ),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::ports::hosting::HostingResult;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// 预设响应的托管平台
    pub struct FakeHosting {
        pub list: HostingResult<Vec<Repository>>,
        pub readmes: HashMap<String, HostingResult<Option<String>>>,
        pub list_calls: AtomicUsize,
        pub readme_calls: AtomicUsize,
        pub list_delay: Option<Duration>,
    }

    impl FakeHosting {
        pub fn new(list: HostingResult<Vec<Repository>>) -> Self {
            Self {
                list,
                readmes: HashMap::new(),
                list_calls: AtomicUsize::new(0),
                readme_calls: AtomicUsize::new(0),
                list_delay: None,
            }
        }

        /// 模拟较慢的 GitHub 响应
        pub fn with_list_delay(mut self, delay: Duration) -> Self {
            self.list_delay = Some(delay);
            self
        }

        pub fn with_readme(mut self, name: &str, readme: HostingResult<Option<String>>) -> Self {
            self.readmes.insert(name.to_string(), readme);
            self
        }

        pub fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        pub fn readme_calls(&self) -> usize {
            self.readme_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HostingPort for FakeHosting {
        fn owner(&self) -> &str {
            "tester"
        }

        async fn list_repositories(&self) -> HostingResult<Vec<Repository>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.list_delay {
                tokio::time::sleep(delay).await;
            }
            self.list.clone()
        }

        async fn fetch_file_content(
            &self,
            _owner: &str,
            repo: &str,
            _candidates: &[&str],
        ) -> HostingResult<Option<String>> {
            self.readme_calls.fetch_add(1, Ordering::SeqCst);
            self.readmes.get(repo).cloned().unwrap_or(Ok(None))
        }
    }

    pub fn catalog_with(hosting: Arc<FakeHosting>) -> ProjectCatalog {
        ProjectCatalog::new(hosting, Arc::new(MokaCache::new(100, Duration::from_secs(60))))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{catalog_with, FakeHosting};
    use super::*;
    use crate::domain::entities::test_support::repo;
    use crate::infrastructure::github::GitHubClient;
    use crate::shared::config::GitHubConfig;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_live_list_is_filtered_and_cached() {
        let mut forked = repo(2, "forked", 0, 2, 2);
        forked.fork = true;
        let mut hidden = repo(3, "hidden", 0, 3, 3);
        hidden.private = true;
        let hosting = Arc::new(FakeHosting::new(Ok(vec![repo(1, "kept", 0, 1, 1), forked, hidden])));
        let catalog = catalog_with(hosting.clone());

        let first = catalog.load().await;
        assert_eq!(first.source, Source::Live);
        assert_eq!(first.repositories.len(), 1);
        assert!(first.repositories.iter().all(|r| !r.fork && !r.private));

        let second = catalog.load().await;
        assert_eq!(second.repositories, first.repositories);
        assert_eq!(hosting.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_every_error_category_falls_back() {
        let errors = vec![
            HostingError::RateLimited("quota".to_string()),
            HostingError::Timeout,
            HostingError::Network("refused".to_string()),
            HostingError::Upstream { status: 500, message: "boom".to_string() },
        ];

        for error in errors {
            let hosting = Arc::new(FakeHosting::new(Err(error)));
            let catalog = catalog_with(hosting.clone());

            let snapshot = catalog.load().await;
            assert_eq!(snapshot.source, Source::Fallback);
            assert_eq!(snapshot.repositories.len(), 3);

            // 回退数据不缓存，下次仍会请求
            catalog.load().await;
            assert_eq!(hosting.list_calls(), 2);
        }
    }

    #[tokio::test]
    async fn test_concurrent_cold_loads_share_one_fetch() {
        let hosting = Arc::new(
            FakeHosting::new(Ok(vec![repo(1, "one", 0, 1, 1), repo(2, "two", 0, 2, 2)]))
                .with_list_delay(Duration::from_millis(50)),
        );
        let catalog = catalog_with(hosting.clone());

        let snapshots = futures::future::join_all((0..8).map(|_| catalog.load())).await;
        assert!(snapshots.iter().all(|s| s.source == Source::Live && s.repositories.len() == 2));
        assert_eq!(hosting.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_failures_fall_back_without_caching() {
        let hosting = Arc::new(
            FakeHosting::new(Err(HostingError::Timeout)).with_list_delay(Duration::from_millis(50)),
        );
        let catalog = catalog_with(hosting.clone());

        let snapshots = futures::future::join_all((0..4).map(|_| catalog.load())).await;
        assert!(snapshots.iter().all(|s| s.source == Source::Fallback));
        assert_eq!(hosting.list_calls(), 1);

        catalog.load().await;
        assert_eq!(hosting.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_live_list_falls_back() {
        let mut forked = repo(1, "forked", 0, 1, 1);
        forked.fork = true;
        let catalog = catalog_with(Arc::new(FakeHosting::new(Ok(vec![forked]))));

        let snapshot = catalog.load().await;
        assert_eq!(snapshot.source, Source::Fallback);
    }

    #[tokio::test]
    async fn test_rate_limited_github_falls_back_to_three_projects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/tester/repos"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "message": "API rate limit exceeded for 10.0.0.1."
            })))
            .mount(&server)
            .await;

        let config = GitHubConfig {
            api_url: server.uri(),
            username: "tester".to_string(),
            ..GitHubConfig::default()
        };
        let hosting = Arc::new(GitHubClient::new(&config).unwrap());
        let catalog = ProjectCatalog::new(hosting, Arc::new(MokaCache::new(10, Duration::from_secs(60))));

        let snapshot = catalog.load().await;
        assert_eq!(snapshot.source, Source::Fallback);
        let names: Vec<_> = snapshot.repositories.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["aurora-alarm-clock", "BrainiX", "horizon_banking"]);
    }

    #[tokio::test]
    async fn test_readme_is_fetched_once_and_cached() {
        let hosting = Arc::new(
            FakeHosting::new(Ok(vec![repo(1, "docs", 0, 1, 1)]))
                .with_readme("docs", Ok(Some("# Docs\nThis project has a fairly long description line.".to_string()))),
        );
        let catalog = catalog_with(hosting.clone());

        let preview = catalog.readme_preview("docs").await.unwrap();
        assert_eq!(preview.as_deref(), Some("This project has a fairly long description line."));

        let full = catalog.readme("docs").await.unwrap();
        assert!(full.unwrap().starts_with("# Docs"));
        assert_eq!(hosting.readme_calls(), 1);
    }

    #[tokio::test]
    async fn test_absent_readme_is_cached_and_errors_are_not() {
        let hosting = Arc::new(
            FakeHosting::new(Ok(vec![]))
                .with_readme("flaky", Err(HostingError::Timeout)),
        );
        let catalog = catalog_with(hosting.clone());

        assert_eq!(catalog.readme("missing").await.unwrap(), None);
        assert_eq!(catalog.readme("missing").await.unwrap(), None);
        assert_eq!(hosting.readme_calls(), 1);

        assert!(catalog.readme("flaky").await.is_err());
        assert!(catalog.readme("flaky").await.is_err());
        assert_eq!(hosting.readme_calls(), 3);
    }

    #[tokio::test]
    async fn test_refresh_forces_refetch() {
        let hosting = Arc::new(FakeHosting::new(Ok(vec![repo(1, "one", 0, 1, 1)])));
        let catalog = catalog_with(hosting.clone());

        catalog.load().await;
        catalog.refresh().await.unwrap();
        catalog.load().await;
        assert_eq!(hosting.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_find_by_name() {
        let hosting = Arc::new(FakeHosting::new(Ok(vec![repo(1, "one", 0, 1, 1), repo(2, "two", 0, 2, 2)])));
        let catalog = catalog_with(hosting);

        assert_eq!(catalog.find("two").await.map(|r| r.id), Some(2));
        assert!(catalog.find("three").await.is_none());
    }
}
