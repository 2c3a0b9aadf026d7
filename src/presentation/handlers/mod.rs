pub mod projects;
pub mod sync;
pub mod theme;

/// 表单提交后的跳转地址，只接受站内路径
///
/// 浏览器把 `\` 当作 `/`，并会丢弃制表符和换行，所以带这些字符的值一律回到首页。
pub(crate) fn redirect_target(back: Option<&str>) -> &str {
    match back {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.chars().any(|c| c == '\\' || c.is_control()) =>
        {
            path
        }
        _ => "/",
    }
}
