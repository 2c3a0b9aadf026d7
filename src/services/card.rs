use tracing::warn;
use crate::domain::entities::Repository;
use crate::domain::readme::ReadmeState;
use crate::services::catalog::ProjectCatalog;

pub const LOADING_DESCRIPTION: &str = "Loading description...";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_README: &str = "No README found for this project.";
pub const README_FAILED: &str = "Failed to load README content.";
pub const README_LOADING: &str = "Loading...";

/// 项目卡片：仓库加上摘要和全文两个 README 状态
#[derive(Debug, Clone)]
pub struct ProjectCard {
    pub repository: Repository,
    pub preview: ReadmeState,
    pub content: ReadmeState,
}

impl ProjectCard {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            preview: ReadmeState::Idle,
            content: ReadmeState::Idle,
        }
    }

    /// 没有描述且还没请求过摘要
    pub fn needs_preview(&self) -> bool {
        self.repository.description_text().is_none() && self.preview == ReadmeState::Idle
    }

    pub async fn load_preview(&mut self, catalog: &ProjectCatalog) {
        if !self.needs_preview() || !self.preview.begin() {
            return;
        }
        let outcome = catalog.readme_preview(&self.repository.name).await;
        if let Err(e) = &outcome {
            warn!("README preview for {} unavailable: {}", self.repository.name, e);
        }
        self.preview.finish(outcome);
    }

    pub async fn load_content(&mut self, catalog: &ProjectCatalog) {
        if !self.content.begin() {
            return;
        }
        let outcome = catalog.readme(&self.repository.name).await;
        if let Err(e) = &outcome {
            warn!("README for {} unavailable: {}", self.repository.name, e);
        }
        self.content.finish(outcome);
    }

    /// 卡片上显示的描述
    pub fn description(&self) -> &str {
        if let Some(description) = self.repository.description_text() {
            return description;
        }
        match &self.preview {
            ReadmeState::Loading => LOADING_DESCRIPTION,
            ReadmeState::Loaded(Some(preview)) => preview,
            _ => NO_DESCRIPTION,
        }
    }

    /// 描述是否来自 README 摘要
    pub fn is_preview(&self) -> bool {
        self.repository.description_text().is_none() && self.preview.text().is_some()
    }

    /// README 弹窗中显示的内容
    pub fn content(&self) -> &str {
        match &self.content {
            ReadmeState::Loaded(Some(text)) => text,
            ReadmeState::Loaded(None) => NO_README,
            ReadmeState::Failed => README_FAILED,
            ReadmeState::Idle | ReadmeState::Loading => README_LOADING,
        }
    }

    /// 没有描述或有摘要时显示"阅读 README"按钮
    pub fn shows_read_more(&self) -> bool {
        self.repository.description_text().is_none() || self.preview.text().is_some()
    }

    pub fn read_more_label(&self) -> &'static str {
        if self.preview.text().is_some() {
            "Read Full README"
        } else {
            "Read More"
        }
    }
}
