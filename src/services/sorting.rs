use std::cmp::Reverse;
use crate::domain::entities::Repository;
use crate::domain::value_objects::SortKey;

/// 按指定方式排序，返回新列表，不修改输入
///
/// 使用稳定排序，相等元素保持输入中的相对顺序。
pub fn sort_repositories(repos: &[Repository], key: SortKey) -> Vec<Repository> {
    let mut sorted = repos.to_vec();

    match key {
        SortKey::Recent => sorted.sort_by_key(|r| Reverse(r.updated_at)),
        SortKey::Alphabetical => sorted.sort_by_cached_key(|r| r.name.to_lowercase()),
        SortKey::Stars => sorted.sort_by_key(|r| Reverse(r.stargazers_count)),
        SortKey::Created => sorted.sort_by_key(|r| Reverse(r.created_at)),
    }

    sorted
}
