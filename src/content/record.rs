use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Node, Slug};

/// 自动摘要的最大字符数
pub const EXCERPT_LEN: usize = 150;

/// 正文：Markdown 文本或富文本文档。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Markdown(String),
    Document(Node),
}

impl Content {
    /// 用于推导摘要的纯文本
    pub fn plain_text(&self) -> String {
        match self {
            Content::Markdown(s) => s.clone(),
            Content::Document(node) => node.plain_text(),
        }
    }
}

/// 一期通讯。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsletterRecord {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub slug: Slug,
    pub excerpt: String,
    pub content: Content,
}

pub struct NoContent;
pub struct WithContent(Content);

/// [`NewsletterRecord`] 构建器。
///
/// 先给定 slug，再给定正文，最后补齐可选字段，缺省值在 [`RecordBuilder::build`] 时统一处理：
///
/// - 标题缺省为 slug
/// - id 缺省为 slug
/// - 摘要缺省为正文前 [`EXCERPT_LEN`] 个字符
/// - 日期缺省或无法解析时取当天，并打 warn 日志
pub struct RecordBuilder<T> {
    slug: Slug,
    id: Option<String>,
    title: Option<String>,
    date: Option<String>,
    excerpt: Option<String>,
    content: T,
}

impl RecordBuilder<NoContent> {
    pub fn new(slug: Slug) -> Self {
        Self {
            slug,
            id: None,
            title: None,
            date: None,
            excerpt: None,
            content: NoContent,
        }
    }

    pub fn content(self, content: Content) -> RecordBuilder<WithContent> {
        RecordBuilder {
            slug: self.slug,
            id: self.id,
            title: self.title,
            date: self.date,
            excerpt: self.excerpt,
            content: WithContent(content),
        }
    }
}

impl<T> RecordBuilder<T> {
    pub fn id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    pub fn title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn date(mut self, date: Option<String>) -> Self {
        self.date = date;
        self
    }

    pub fn excerpt(mut self, excerpt: Option<String>) -> Self {
        self.excerpt = excerpt;
        self
    }
}

impl RecordBuilder<WithContent> {
    pub fn build(self) -> NewsletterRecord {
        let content = self.content.0;

        let date = match self.date.as_deref().map(str::trim) {
            Some(raw) => parse_date(raw).unwrap_or_else(|| {
                tracing::warn!(slug = %self.slug, raw, "unparsable date, using today");
                today()
            }),
            None => {
                tracing::warn!(slug = %self.slug, "missing date, using today");
                today()
            }
        };

        let title = non_blank(self.title).unwrap_or_else(|| self.slug.to_string());
        let excerpt =
            non_blank(self.excerpt).unwrap_or_else(|| derive_excerpt(&content.plain_text()));

        NewsletterRecord {
            id: non_blank(self.id).unwrap_or_else(|| self.slug.to_string()),
            title,
            date,
            slug: self.slug,
            excerpt,
            content,
        }
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 截取前 [`EXCERPT_LEN`] 个字符作为摘要，超出部分以 `...` 结尾。
pub fn derive_excerpt(text: &str) -> String {
    let text = text.trim();

    match text.char_indices().nth(EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// 解析常见的 ISO-8601 日期写法，只保留日历日期。
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    for fmt in &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in &["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(s: &str) -> Slug {
        Slug::parse(s).expect("slug 不合法")
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 15);

        for s in [
            "2025-01-15",
            "2025/01/15",
            "2025-01-15 08:30:00",
            "2025-01-15T08:30:00",
            "2025-01-15T08:30:00Z",
            "2025-01-15T23:30:00-05:00",
            "2025-01-15T08:30",
        ] {
            assert_eq!(parse_date(s), expected, "{s}");
        }
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        for s in ["", "yesterday", "2025-13-01", "2025-02-30"] {
            assert_eq!(parse_date(s), None, "{s}");
        }
    }

    #[test]
    fn test_short_excerpt_is_kept_whole() {
        assert_eq!(derive_excerpt("  short body \n"), "short body");
    }

    #[test]
    fn test_long_excerpt_is_truncated_by_chars() {
        let body = "é".repeat(200);
        let excerpt = derive_excerpt(&body);

        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), EXCERPT_LEN + 3);
    }

    #[test]
    fn test_long_excerpt_counts_from_first_visible_char() {
        let body = format!("\n\n{}", "a".repeat(200));
        let excerpt = derive_excerpt(&body);

        assert_eq!(excerpt, format!("{}...", "a".repeat(EXCERPT_LEN)));
    }

    #[test]
    fn test_builder_applies_fallbacks() {
        let body = "x".repeat(300);
        let record = RecordBuilder::new(slug("no-meta"))
            .content(Content::Markdown(body.clone()))
            .build();

        assert_eq!(record.id, "no-meta");
        assert_eq!(record.title, "no-meta");
        assert_eq!(record.excerpt, format!("{}...", &body[..150]));
        assert_eq!(record.date, Local::now().date_naive());
    }

    #[test]
    fn test_builder_keeps_given_fields() {
        let record = RecordBuilder::new(slug("given"))
            .id(Some("7".into()))
            .title(Some("Given Title".into()))
            .date(Some("2024-11-25".into()))
            .excerpt(Some("Given excerpt".into()))
            .content(Content::Markdown("body".into()))
            .build();

        assert_eq!(record.id, "7");
        assert_eq!(record.title, "Given Title");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 11, 25).unwrap());
        assert_eq!(record.excerpt, "Given excerpt");
    }

    #[test]
    fn test_content_untagged_serde() {
        let md: Content = serde_json::from_str(r##""# Title""##).unwrap();
        assert_eq!(md, Content::Markdown("# Title".into()));

        let doc: Content = serde_json::from_str(r#"{ "type": "doc", "content": [] }"#).unwrap();
        assert!(matches!(doc, Content::Document(ref n) if n.kind == "doc"));
    }
}
