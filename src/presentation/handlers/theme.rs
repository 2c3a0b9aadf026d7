use axum::{
    extract::Form,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use crate::domain::value_objects::Theme;
use crate::presentation::handlers::redirect_target;
use crate::presentation::theme::theme_cookie;

#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    theme: String,
    /// 切换后返回的站内路径
    back: Option<String>,
}

/// 保存主题偏好并跳回原页面
pub async fn set_theme(Form(form): Form<ThemeForm>) -> impl IntoResponse {
    let theme: Theme = form.theme.parse().unwrap_or_default();
    let target = redirect_target(form.back.as_deref());
    ([(SET_COOKIE, theme_cookie(theme))], Redirect::to(target))
}
