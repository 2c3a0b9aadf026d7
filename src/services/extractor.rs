//! README 摘要提取
//!
//! 启发式规则，不是 Markdown 解析器：奇怪的 README 可能得到不理想的摘要。

/// 摘要最大字符数
pub const PREVIEW_MAX_CHARS: usize = 150;

/// 作为摘要的行至少要超过的字符数
const MIN_LINE_CHARS: usize = 20;

const ELLIPSIS: &str = "...";

/// 从 README 原文提取一段简短摘要
///
/// 优先取第一行"正文"：非空、不是标题、图片、徽章或分隔线，且长度超过 20 个字符。
/// 找不到时去掉标题行、图片和链接，取剩余内容的前 150 个字符。
/// 超过 150 个字符的结果截断并追加 `...`。
pub fn extract_preview(raw: &str) -> String {
    let preview = match first_prose_line(raw) {
        Some(line) => line.to_string(),
        None => strip_markup(raw).trim().to_string(),
    };

    truncate_chars(&preview, PREVIEW_MAX_CHARS)
}

fn first_prose_line(raw: &str) -> Option<&str> {
    raw.lines().map(str::trim).find(|line| {
        !line.is_empty()
            && !line.starts_with('#')
            && !line.starts_with('!')
            && !line.starts_with("[![")
            && !line.starts_with("---")
            && line.chars().count() > MIN_LINE_CHARS
    })
}

/// 去掉标题行、`![alt](src)` 图片和 `[text](href)` 链接
fn strip_markup(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                String::new()
            } else {
                strip_references(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 先去掉图片，再去掉链接，`[![alt](img)](href)` 这样的徽章整体消失
fn strip_references(line: &str) -> String {
    let without_images = strip_matching(line, "![");
    strip_matching(&without_images, "[")
}

/// 去掉以 `opener` 开头的 `[...](...)` 引用
fn strip_matching(line: &str, opener: &str) -> String {
    // opener 的最后一个字符是 `[`
    let skip = opener.len() - 1;
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if rest.starts_with(opener) {
            if let Some(len) = reference_len(&rest[skip..]) {
                rest = &rest[skip + len..];
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// `[...](...)` 的字节长度，`s` 必须以 `[` 开头
fn reference_len(s: &str) -> Option<usize> {
    if !s.starts_with('[') {
        return None;
    }
    let target = s.find("](")?;
    let close = s[target + 2..].find(')')?;
    Some(target + 2 + close + 1)
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}{}", &text[..idx], ELLIPSIS),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_heading_and_returns_prose_line() {
        let heading = "# Portfolio Site Projects";
        let prose = "A personal site that lists my repository";
        assert_eq!(heading.chars().count(), 25);
        assert_eq!(prose.chars().count(), 40);
        let raw = format!("{}\n{}\n", heading, prose);
        assert_eq!(extract_preview(&raw), prose);
    }

    #[test]
    fn test_skips_badges_images_rules_and_short_lines() {
        let raw = "\
[![CI](https://ci.example/badge.svg)](https://ci.example)
![logo](logo.png)
---
Short intro.

   This line is the first real description of the project.
";
        assert_eq!(
            extract_preview(raw),
            "This line is the first real description of the project."
        );
    }

    #[test]
    fn test_exactly_twenty_chars_is_not_enough() {
        let raw = "12345678901234567890\n123456789012345678901";
        assert_eq!(extract_preview(raw), "123456789012345678901");
    }

    #[test]
    fn test_long_prose_line_is_truncated_with_ellipsis() {
        let line = "x".repeat(200);
        let preview = extract_preview(&line);
        assert_eq!(preview.chars().count(), 153);
        assert!(preview.ends_with("..."));
        assert_eq!(&preview[..150], &line[..150]);
    }

    #[test]
    fn test_fallback_truncates_to_150_plus_ellipsis() {
        let raw = "tiny line\n".repeat(30);
        let preview = extract_preview(&raw);
        assert_eq!(preview.chars().count(), 153);
        assert!(preview.ends_with("..."));
        assert!(preview.starts_with("tiny line\ntiny line"));
    }

    #[test]
    fn test_fallback_strips_headings_images_and_links() {
        let raw = "# Title\n![shot](a.png) see [docs](https://docs.rs)\nok";
        assert_eq!(extract_preview(raw), "see \nok");
    }

    #[test]
    fn test_fallback_strips_link_wrapped_badge() {
        let raw = "# Title\n[![CI](https://ci/badge.svg)](https://ci/run)\nShort text.";
        assert_eq!(extract_preview(raw), "Short text.");
    }

    #[test]
    fn test_strip_references_removes_images_before_links() {
        assert_eq!(
            strip_references("a [![b](c.svg)](d) e ![f](g) [h](i)"),
            "a  e  "
        );
    }

    #[test]
    fn test_short_fallback_has_no_ellipsis() {
        assert_eq!(extract_preview("# Only a heading\nhi"), "hi");
        assert_eq!(extract_preview(""), "");
    }

    #[test]
    fn test_multibyte_characters_count_as_one() {
        let line = "é".repeat(160);
        let preview = extract_preview(&line);
        assert_eq!(preview.chars().count(), 153);
    }

    #[test]
    fn test_reference_len() {
        assert_eq!(reference_len("[a](b) tail"), Some(6));
        assert_eq!(reference_len("[a] b"), None);
        assert_eq!(reference_len("no"), None);
    }
}
