use std::sync::LazyLock;
use crate::domain::entities::Repository;

const FALLBACK_JSON: &str = include_str!("fallback_repositories.json");

static FALLBACK_REPOSITORIES: LazyLock<Vec<Repository>> = LazyLock::new(|| {
    serde_json::from_str(FALLBACK_JSON).unwrap_or_else(|e| {
        tracing::error!("Invalid fallback repository fixture: {}", e);
        Vec::new()
    })
});

/// GitHub 不可用时展示的静态仓库列表（只解析一次）
pub fn fallback_repositories() -> &'static [Repository] {
    &FALLBACK_REPOSITORIES
}
