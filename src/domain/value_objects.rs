use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 排序方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// 最近更新
    #[default]
    Recent,
    /// 名称（忽略大小写）
    Alphabetical,
    /// Star 数
    Stars,
    /// 最近创建
    Created,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Recent,
        SortKey::Alphabetical,
        SortKey::Stars,
        SortKey::Created,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Recent => "recent",
            SortKey::Alphabetical => "alphabetical",
            SortKey::Stars => "stars",
            SortKey::Created => "created",
        }
    }

    /// 页面上显示的名称
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Recent => "Recently Updated",
            SortKey::Alphabetical => "A-Z",
            SortKey::Stars => "Most Stars",
            SortKey::Created => "Recently Created",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recent" => Ok(SortKey::Recent),
            "alphabetical" => Ok(SortKey::Alphabetical),
            "stars" => Ok(SortKey::Stars),
            "created" => Ok(SortKey::Created),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 每页条数，只允许固定的几个值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageSize(usize);

impl PageSize {
    pub const ALLOWED: [usize; 4] = [6, 12, 20, 30];
    pub const DEFAULT: PageSize = PageSize(12);

    pub fn new(size: usize) -> Result<Self, String> {
        if Self::ALLOWED.contains(&size) {
            Ok(Self(size))
        } else {
            Err(format!("Unsupported page size: {}", size))
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }

    pub fn all() -> impl Iterator<Item = PageSize> {
        Self::ALLOWED.into_iter().map(PageSize)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 列表状态：排序方式、当前页（从 1 开始）、每页条数
///
/// 修改排序方式或每页条数都会回到第 1 页。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub sort: SortKey,
    pub page: usize,
    pub page_size: PageSize,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            sort: SortKey::default(),
            page: 1,
            page_size: PageSize::default(),
        }
    }
}

impl Listing {
    /// 从查询参数构造，非法值回退到默认值
    pub fn from_params(sort: Option<&str>, page: Option<usize>, per_page: Option<usize>) -> Self {
        Self {
            sort: sort.and_then(|s| s.parse().ok()).unwrap_or_default(),
            page: page.unwrap_or(1).max(1),
            page_size: per_page.and_then(|n| PageSize::new(n).ok()).unwrap_or_default(),
        }
    }

    pub fn with_sort(self, sort: SortKey) -> Self {
        Self { sort, page: 1, ..self }
    }

    pub fn with_page_size(self, page_size: PageSize) -> Self {
        Self { page_size, page: 1, ..self }
    }

    pub fn with_page(self, page: usize) -> Self {
        Self { page: page.max(1), ..self }
    }

    /// 生成链接用的查询字符串
    pub fn query_string(&self) -> String {
        format!(
            "?sort={}&page={}&per_page={}",
            self.sort, self.page, self.page_size
        )
    }
}

/// 主题偏好
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// 跟随系统，不持久化
    #[default]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_round_trips_through_str() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("newest".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_page_size_rejects_unlisted_values() {
        assert_eq!(PageSize::new(20).unwrap().get(), 20);
        assert!(PageSize::new(13).is_err());
        assert!(PageSize::new(0).is_err());
        assert_eq!(PageSize::default().get(), 12);
    }

    #[test]
    fn test_listing_from_params_falls_back() {
        let listing = Listing::from_params(Some("bogus"), Some(0), Some(7));
        assert_eq!(listing, Listing::default());

        let listing = Listing::from_params(Some("stars"), Some(4), Some(30));
        assert_eq!(listing.sort, SortKey::Stars);
        assert_eq!(listing.page, 4);
        assert_eq!(listing.page_size.get(), 30);
    }

    #[test]
    fn test_changing_sort_resets_page() {
        let listing = Listing::default().with_page(3);
        assert_eq!(listing.page, 3);

        let resorted = listing.with_sort(SortKey::Stars);
        assert_eq!(resorted.page, 1);
        assert_eq!(resorted.sort, SortKey::Stars);
    }

    #[test]
    fn test_changing_page_size_resets_page() {
        let listing = Listing::default().with_page(5);
        let resized = listing.with_page_size(PageSize::new(6).unwrap());
        assert_eq!(resized.page, 1);
        assert_eq!(resized.page_size.get(), 6);
    }

    #[test]
    fn test_query_string() {
        let listing = Listing::default().with_sort(SortKey::Created).with_page(2);
        assert_eq!(listing.query_string(), "?sort=created&page=2&per_page=12");
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::default(), Theme::System);
    }
}
