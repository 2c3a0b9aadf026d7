use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 仓库实体（GitHub `/users/{user}/repos` 返回的记录）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u32,
    #[serde(default)]
    pub topics: Vec<String>,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub open_issues_count: u32,
    #[serde(default = "default_branch")]
    pub default_branch: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
}

fn default_branch() -> String {
    "main".to_string()
}

impl Repository {
    /// 公开且非 fork 的仓库才会展示
    pub fn is_public_original(&self) -> bool {
        !self.fork && !self.private
    }

    /// 非空描述
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// 非空主页地址（GitHub 对未设置的主页有时返回空字符串）
    pub fn homepage_url(&self) -> Option<&str> {
        self.homepage
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }
}

/// 去掉 fork 和私有仓库，保持原有顺序
pub fn filter_public_originals(repos: Vec<Repository>) -> Vec<Repository> {
    repos.into_iter().filter(Repository::is_public_original).collect()
}
