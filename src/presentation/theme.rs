use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::convert::Infallible;
use crate::domain::value_objects::Theme;

pub const THEME_COOKIE: &str = "theme";

/// 一年
const COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 365;

/// 当前请求的主题上下文
///
/// 每个请求从 cookie 初始化一次，显式传给模板；没有 cookie 时跟随系统。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeContext {
    pub preference: Theme,
}

impl ThemeContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let preference = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == THEME_COOKIE)
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or_default();

        Self { preference }
    }

    /// `<html>` 上的 class，跟随系统时为空（交给 prefers-color-scheme）
    pub fn html_class(&self) -> &'static str {
        match self.preference {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "",
        }
    }

    /// 主题切换按钮
    pub fn options(&self) -> Vec<ThemeOption> {
        [Theme::Light, Theme::Dark, Theme::System]
            .into_iter()
            .map(|theme| ThemeOption {
                value: theme.as_str(),
                selected: theme == self.preference,
            })
            .collect()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ThemeContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

#[derive(Debug, Clone)]
pub struct ThemeOption {
    pub value: &'static str,
    pub selected: bool,
}

/// 保存主题偏好的 Set-Cookie 值，选择跟随系统时删除 cookie
pub fn theme_cookie(theme: Theme) -> String {
    match theme {
        Theme::System => format!("{}=; Path=/; Max-Age=0; SameSite=Lax", THEME_COOKIE),
        other => format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            THEME_COOKIE, other, COOKIE_MAX_AGE
        ),
    }
}
