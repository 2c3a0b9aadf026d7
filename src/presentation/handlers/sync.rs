use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Json, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};
use crate::presentation::dto::SyncResponse;
use crate::presentation::handlers::redirect_target;
use crate::presentation::routes::AppContext;

/// 清空缓存，下一次请求重新从 GitHub 拉取
pub async fn sync_github(State(ctx): State<Arc<AppContext>>) -> (StatusCode, Json<SyncResponse>) {
    match ctx.catalog.refresh().await {
        Ok(()) => {
            info!("GitHub cache revalidated");
            (
                StatusCode::OK,
                Json(SyncResponse::Success {
                    message: "Cache revalidated successfully".to_string(),
                }),
            )
        }
        Err(e) => {
            error!("Error revalidating cache: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SyncResponse::Failure {
                    error: "Failed to revalidate cache".to_string(),
                }),
            )
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SyncForm {
    /// 同步后返回的站内路径
    back: Option<String>,
}

/// 页面上的 "Sync with GitHub" 按钮：清空缓存后跳回原页面重新加载
pub async fn sync_page(
    State(ctx): State<Arc<AppContext>>,
    Form(form): Form<SyncForm>,
) -> Redirect {
    match ctx.catalog.refresh().await {
        Ok(()) => info!("GitHub cache revalidated from page"),
        Err(e) => error!("Error revalidating cache: {}", e),
    }
    Redirect::to(redirect_target(form.back.as_deref()))
}
