use serde::Serialize;

/// 分页结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 实际页码（已限制在 1..=total_pages）
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// "Showing X-Y of N" 中的 X，空列表为 0
    pub fn range_start(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// "Showing X-Y of N" 中的 Y
    pub fn range_end(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.range_start() + self.items.len() - 1
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// 切出当前页
///
/// 总页数至少为 1；页码超出范围时限制到最后一页，0 视为第 1 页。
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        total_pages,
        total_items,
        page_size,
    }
}

/// 分页栏中的一项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageLink {
    Number(usize),
    Ellipsis,
}

/// 分页栏显示的页码：第一页、最后一页、当前页及其前后各一页，
/// 不相邻的页码之间插入省略号
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageLink> {
    let mut links = Vec::new();
    let mut previous: Option<usize> = None;

    for page in 1..=total_pages {
        let visible = page == 1 || page == total_pages || page.abs_diff(current) <= 1;
        if !visible {
            continue;
        }
        if let Some(prev) = previous {
            if page - prev > 1 {
                links.push(PageLink::Ellipsis);
            }
        }
        links.push(PageLink::Number(page));
        previous = Some(page);
    }

    links
}
