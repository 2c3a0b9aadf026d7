use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::entities::Repository;
use crate::domain::value_objects::SortKey;
use crate::services::card::ProjectCard;
use crate::services::catalog::Source;
use crate::services::pagination::Page;

/// 页面上的日期格式，例如 "Oct 6, 2025"
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// 仓库统计
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryStats {
    pub stars: u32,
    pub forks: u32,
    pub issues: u32,
    pub size: u64,
    pub last_updated: String,
    pub created: String,
}

impl From<&Repository> for RepositoryStats {
    fn from(repo: &Repository) -> Self {
        Self {
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            issues: repo.open_issues_count,
            size: repo.size,
            last_updated: format_date(&repo.updated_at),
            created: format_date(&repo.created_at),
        }
    }
}

/// 仓库 DTO
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryDto {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub default_branch: String,
    pub updated_at: String,
    pub created_at: String,
    pub stats: RepositoryStats,
}

impl From<Repository> for RepositoryDto {
    fn from(repo: Repository) -> Self {
        let stats = RepositoryStats::from(&repo);
        Self {
            id: repo.id,
            description: repo.description_text().map(str::to_string),
            homepage: repo.homepage_url().map(str::to_string),
            name: repo.name,
            html_url: repo.html_url,
            language: repo.language,
            topics: repo.topics,
            default_branch: repo.default_branch,
            updated_at: repo.updated_at.to_rfc3339(),
            created_at: repo.created_at.to_rfc3339(),
            stats,
        }
    }
}

/// 分页列表 DTO
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPageDto {
    pub source: Source,
    pub sort: SortKey,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub repositories: Vec<RepositoryDto>,
}

impl ProjectPageDto {
    pub fn new(page: Page<Repository>, sort: SortKey, source: Source) -> Self {
        Self {
            source,
            sort,
            page: page.page,
            per_page: page.page_size,
            total_pages: page.total_pages,
            total_items: page.total_items,
            repositories: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// README DTO
#[derive(Debug, Clone, Serialize)]
pub struct ReadmeDto {
    pub name: String,
    pub state: &'static str,
    pub preview: Option<String>,
    pub content: Option<String>,
}

impl From<&ProjectCard> for ReadmeDto {
    fn from(card: &ProjectCard) -> Self {
        Self {
            name: card.repository.name.clone(),
            state: card.content.name(),
            preview: card.preview.text().map(str::to_string),
            content: card.content.text().map(str::to_string),
        }
    }
}

/// 同步接口响应
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SyncResponse {
    Success { message: String },
    Failure { error: String },
}
