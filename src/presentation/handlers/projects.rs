use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Json},
};
use chrono::{Datelike, Utc};
use futures::future::join_all;
use serde::Deserialize;
use std::sync::Arc;
use crate::domain::entities::Repository;
use crate::domain::value_objects::{Listing, PageSize, SortKey};
use crate::presentation::dto::{ProjectPageDto, ReadmeDto};
use crate::presentation::markdown::render_markdown;
use crate::presentation::routes::AppContext;
use crate::presentation::templates::*;
use crate::presentation::theme::ThemeContext;
use crate::services::card::ProjectCard;
use crate::services::catalog::Source;
use crate::services::pagination::{page_window, paginate, Page, PageLink};
use crate::services::sorting::sort_repositories;
use crate::shared::config::Config;
use crate::shared::error::FolioError;
use crate::shared::result::Result;

/// 卡片上最多显示的标签数
const MAX_CARD_TOPICS: usize = 3;

/// 列表查询参数，非法值按默认值处理
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    sort: Option<String>,
    page: Option<String>,
    per_page: Option<String>,
}

impl ListingQuery {
    fn listing(&self) -> Listing {
        Listing::from_params(
            self.sort.as_deref(),
            self.page.as_deref().and_then(|p| p.trim().parse().ok()),
            self.per_page.as_deref().and_then(|p| p.trim().parse().ok()),
        )
    }
}

/// 排序并切出当前页，返回实际生效的列表状态
async fn current_page(ctx: &AppContext, listing: Listing) -> (Page<Repository>, Listing, Source) {
    let snapshot = ctx.catalog.load().await;
    let sorted = sort_repositories(&snapshot.repositories, listing.sort);
    let page = paginate(&sorted, listing.page, listing.page_size.get());
    let listing = listing.with_page(page.page);
    (page, listing, snapshot.source)
}

/// 主页：个人资料和项目卡片
pub async fn index(
    State(ctx): State<Arc<AppContext>>,
    theme: ThemeContext,
    Query(query): Query<ListingQuery>,
) -> Result<impl IntoResponse> {
    let (page, listing, source) = current_page(&ctx, query.listing()).await;

    let mut cards: Vec<ProjectCard> = page.items.iter().cloned().map(ProjectCard::new).collect();
    join_all(cards.iter_mut().map(|card| card.load_preview(&ctx.catalog))).await;

    let summary = format!(
        "Showing {}-{} of {} repositories • Sorted by {}",
        page.range_start(),
        page.range_end(),
        page.total_items,
        listing.sort.label().to_lowercase()
    );

    let template = IndexTemplate {
        theme_class: theme.html_class(),
        theme_options: theme.options(),
        back_href: format!("/{}", listing.query_string()),
        profile: profile_view(&ctx.config),
        using_fallback: source == Source::Fallback,
        sort_options: sort_options(listing),
        size_options: size_options(listing),
        summary,
        cards: cards.iter().map(card_item).collect(),
        pager: pager_view(&page, listing),
        current_year: Utc::now().year(),
    };

    Ok(Html(template.render()?))
}

/// README 全文页
pub async fn readme_page(
    State(ctx): State<Arc<AppContext>>,
    theme: ThemeContext,
    Path(name): Path<String>,
) -> Result<impl IntoResponse> {
    let repository = ctx
        .catalog
        .find(&name)
        .await
        .ok_or(FolioError::ProjectNotFound(name))?;

    let mut card = ProjectCard::new(repository);
    card.load_content(&ctx.catalog).await;

    let template = ReadmeTemplate {
        theme_class: theme.html_class(),
        theme_options: theme.options(),
        back_href: format!("/projects/{}/readme", card.repository.name),
        content_html: render_markdown(card.content()),
        homepage: card.repository.homepage_url().unwrap_or_default().to_string(),
        has_homepage: card.repository.homepage_url().is_some(),
        html_url: card.repository.html_url.clone(),
        name: card.repository.name.clone(),
    };

    Ok(Html(template.render()?))
}

/// 项目列表（JSON）
pub async fn api_list_projects(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<ListingQuery>,
) -> Json<ProjectPageDto> {
    let (page, listing, source) = current_page(&ctx, query.listing()).await;
    Json(ProjectPageDto::new(page, listing.sort, source))
}

/// 项目 README（JSON）
pub async fn api_readme(
    State(ctx): State<Arc<AppContext>>,
    Path(name): Path<String>,
) -> Result<Json<ReadmeDto>> {
    let repository = ctx
        .catalog
        .find(&name)
        .await
        .ok_or(FolioError::ProjectNotFound(name))?;

    let mut card = ProjectCard::new(repository);
    card.load_preview(&ctx.catalog).await;
    card.load_content(&ctx.catalog).await;

    Ok(Json(ReadmeDto::from(&card)))
}

fn profile_view(config: &Config) -> ProfileView {
    let profile = &config.profile;
    ProfileView {
        name: profile.name.clone(),
        headline: profile.headline.clone(),
        bio: profile.bio.clone(),
        avatar_url: profile.avatar_url.clone(),
        links: profile
            .links
            .iter()
            .map(|l| LinkItem {
                label: l.label.clone(),
                url: l.url.clone(),
            })
            .collect(),
        repositories_url: format!(
            "https://github.com/{}?tab=repositories",
            config.github.username
        ),
    }
}

fn sort_options(listing: Listing) -> Vec<SortOptionItem> {
    SortKey::ALL
        .into_iter()
        .map(|sort| SortOptionItem {
            label: sort.label(),
            href: listing.with_sort(sort).query_string(),
            active: sort == listing.sort,
        })
        .collect()
}

fn size_options(listing: Listing) -> Vec<SizeOptionItem> {
    PageSize::all()
        .map(|size| SizeOptionItem {
            size: size.get(),
            href: listing.with_page_size(size).query_string(),
            active: size == listing.page_size,
        })
        .collect()
}

fn card_item(card: &ProjectCard) -> CardItem {
    let repo = &card.repository;
    CardItem {
        name: repo.name.clone(),
        description: card.description().to_string(),
        is_preview: card.is_preview(),
        html_url: repo.html_url.clone(),
        homepage: repo.homepage_url().unwrap_or_default().to_string(),
        has_homepage: repo.homepage_url().is_some(),
        language: repo.language.clone().unwrap_or_default(),
        has_language: repo.language.is_some(),
        stars: repo.stargazers_count,
        topics: repo.topics.iter().take(MAX_CARD_TOPICS).cloned().collect(),
        show_read_more: card.shows_read_more(),
        read_more_label: card.read_more_label(),
        readme_href: format!("/projects/{}/readme", repo.name),
    }
}

fn pager_view<T>(page: &Page<T>, listing: Listing) -> PagerView {
    let links = page_window(page.page, page.total_pages)
        .into_iter()
        .map(|link| match link {
            PageLink::Number(n) => PageItem {
                label: n.to_string(),
                href: listing.with_page(n).query_string(),
                active: n == page.page,
                ellipsis: false,
            },
            PageLink::Ellipsis => PageItem {
                label: "...".to_string(),
                href: String::new(),
                active: false,
                ellipsis: true,
            },
        })
        .collect();

    PagerView {
        visible: page.total_pages > 1,
        previous_href: listing.with_page(page.page.saturating_sub(1)).query_string(),
        has_previous: page.has_previous(),
        next_href: listing.with_page(page.page + 1).query_string(),
        has_next: page.has_next(),
        links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::test_support::repo;

    #[test]
    fn test_lenient_query_parsing() {
        let query = ListingQuery {
            sort: Some("stars".into()),
            page: Some("abc".into()),
            per_page: Some("7".into()),
        };
        let listing = query.listing();
        assert_eq!(listing.sort, SortKey::Stars);
        assert_eq!(listing.page, 1);
        assert_eq!(listing.page_size, PageSize::DEFAULT);
    }

    #[test]
    fn test_sort_links_reset_page() {
        let listing = Listing::from_params(Some("recent"), Some(3), Some(12));
        let options = sort_options(listing);

        assert_eq!(options.len(), 4);
        let stars = options.iter().find(|o| o.label == "Most Stars").unwrap();
        assert_eq!(stars.href, "?sort=stars&page=1&per_page=12");
        assert!(options.iter().find(|o| o.label == "Recently Updated").unwrap().active);
    }

    #[test]
    fn test_size_links_reset_page() {
        let listing = Listing::from_params(Some("alphabetical"), Some(2), Some(6));
        let options = size_options(listing);

        let sizes: Vec<_> = options.iter().map(|o| o.size).collect();
        assert_eq!(sizes, vec![6, 12, 20, 30]);
        assert!(options[0].active);
        assert_eq!(options[3].href, "?sort=alphabetical&page=1&per_page=30");
    }

    #[test]
    fn test_card_topics_are_capped() {
        let mut r = repo(1, "tagged", 3, 1, 1);
        r.topics = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        let item = card_item(&ProjectCard::new(r));

        assert_eq!(item.topics, vec!["a", "b", "c"]);
        assert_eq!(item.readme_href, "/projects/tagged/readme");
        assert!(item.has_language);
        assert!(!item.show_read_more);
    }

    #[test]
    fn test_pager_hidden_for_single_page() {
        let items: Vec<u32> = (0..5).collect();
        let page = paginate(&items, 1, 6);
        let pager = pager_view(&page, Listing::default());
        assert!(!pager.visible);
        assert!(!pager.has_previous);
        assert!(!pager.has_next);
    }

    #[test]
    fn test_pager_links() {
        let items: Vec<u32> = (0..60).collect();
        let page = paginate(&items, 3, 6);
        let listing = Listing::from_params(None, Some(3), Some(6));
        let pager = pager_view(&page, listing);

        assert!(pager.visible);
        assert_eq!(pager.previous_href, "?sort=recent&page=2&per_page=6");
        assert_eq!(pager.next_href, "?sort=recent&page=4&per_page=6");
        let labels: Vec<_> = pager.links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "3", "4", "...", "10"]);
        assert!(pager.links[2].active);
        assert!(pager.links[4].ellipsis);
    }
}
