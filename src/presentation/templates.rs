use askama::Template;
use crate::presentation::theme::ThemeOption;

/// 主页 - 个人资料和项目列表
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub theme_class: &'static str,
    pub theme_options: Vec<ThemeOption>,
    /// 切换主题后返回的地址
    pub back_href: String,
    pub profile: ProfileView,
    pub using_fallback: bool,
    pub sort_options: Vec<SortOptionItem>,
    pub size_options: Vec<SizeOptionItem>,
    pub summary: String,
    pub cards: Vec<CardItem>,
    pub pager: PagerView,
    pub current_year: i32,
}

#[derive(Clone)]
pub struct ProfileView {
    pub name: String,
    pub headline: String,
    pub bio: String,
    pub avatar_url: String,
    pub links: Vec<LinkItem>,
    pub repositories_url: String,
}

#[derive(Clone)]
pub struct LinkItem {
    pub label: String,
    pub url: String,
}

#[derive(Clone)]
pub struct SortOptionItem {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

#[derive(Clone)]
pub struct SizeOptionItem {
    pub size: usize,
    pub href: String,
    pub active: bool,
}

#[derive(Clone)]
pub struct CardItem {
    pub name: String,
    pub description: String,
    pub is_preview: bool,
    pub html_url: String,
    pub homepage: String,
    pub has_homepage: bool,
    pub language: String,
    pub has_language: bool,
    pub stars: u32,
    pub topics: Vec<String>,
    pub show_read_more: bool,
    pub read_more_label: &'static str,
    pub readme_href: String,
}

/// 分页栏
#[derive(Clone)]
pub struct PagerView {
    pub visible: bool,
    pub previous_href: String,
    pub has_previous: bool,
    pub next_href: String,
    pub has_next: bool,
    pub links: Vec<PageItem>,
}

#[derive(Clone)]
pub struct PageItem {
    pub label: String,
    pub href: String,
    pub active: bool,
    pub ellipsis: bool,
}

/// README 查看页
#[derive(Template)]
#[template(path = "readme.html")]
pub struct ReadmeTemplate {
    pub theme_class: &'static str,
    pub theme_options: Vec<ThemeOption>,
    pub back_href: String,
    pub name: String,
    pub html_url: String,
    pub homepage: String,
    pub has_homepage: bool,
    pub content_html: String,
}
