use axum::{Router, routing::{get, post}};
use axum::http::{HeaderValue, Method};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;
use crate::presentation::handlers;
use crate::services::catalog::ProjectCatalog;
use crate::shared::config::Config;

/// 应用状态
pub struct AppContext {
    pub catalog: Arc<ProjectCatalog>,
    pub config: Arc<Config>,
}

/// 创建应用路由
pub fn create_app_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        // 主页 - 个人资料和项目列表
        .route("/", get(handlers::projects::index))

        // UI 路由 - README 全文、主题切换和同步按钮
        .route("/projects/{name}/readme", get(handlers::projects::readme_page))
        .route("/theme", post(handlers::theme::set_theme))
        .route("/sync", post(handlers::sync::sync_page))

        // API 路由
        .nest("/api", api_routes().layer(cors_layer(&ctx.config.server.cors_origins)))

        .with_state(ctx)
}

/// API 的 CORS 设置，无法解析的来源会被跳过
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
}

/// API 路由
fn api_routes() -> Router<Arc<AppContext>> {
    Router::new()
        // 项目 API
        .route("/projects", get(handlers::projects::api_list_projects))
        .route("/projects/{name}/readme", get(handlers::projects::api_readme))

        // 缓存刷新
        .route("/sync-github", post(handlers::sync::sync_github))
}
