use std::{collections::HashSet, sync::Arc};

use serde::Deserialize;

use super::{NewsletterSource, sort_newest_first};
use crate::{
    content::{Content, NewsletterRecord, RecordBuilder, Slug},
    error::Result,
};

/// 内置数据集
const BUILTIN: &str = include_str!("../../data/newsletters.json");

/// 固定在内存中的来源。
#[derive(Debug, Clone)]
pub struct StaticSource {
    records: Arc<[NewsletterRecord]>,
}

/// 数据文件中的一条记录，除 slug 和正文外都可缺省
#[derive(Debug, Deserialize)]
struct Entry {
    id: Option<String>,
    title: Option<String>,
    date: Option<String>,
    slug: Slug,
    excerpt: Option<String>,
    content: Content,
}

impl StaticSource {
    /// 重复的 slug 只保留第一条。
    pub fn new(records: impl IntoIterator<Item = NewsletterRecord>) -> Self {
        let mut seen = HashSet::new();

        let records = records
            .into_iter()
            .filter(|r| {
                let fresh = seen.insert(r.slug.clone());
                if !fresh {
                    tracing::warn!(slug = %r.slug, "duplicate slug dropped");
                }
                fresh
            })
            .collect();

        Self { records }
    }

    /// 从 JSON 数组加载，缺省字段按 [`RecordBuilder`] 的规则补齐。
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<Entry> = serde_json::from_str(json)?;

        Ok(Self::new(entries.into_iter().map(|e| {
            RecordBuilder::new(e.slug)
                .id(e.id)
                .title(e.title)
                .date(e.date)
                .excerpt(e.excerpt)
                .content(e.content)
                .build()
        })))
    }

    /// 随程序打包的示例通讯
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl NewsletterSource for StaticSource {
    async fn list_all(&self) -> Vec<NewsletterRecord> {
        let mut records = self.records.to_vec();
        sort_newest_first(&mut records);
        records
    }

    async fn get_by_slug(&self, slug: &str) -> Option<NewsletterRecord> {
        self.records
            .iter()
            .find(|r| r.slug.as_str() == slug)
            .cloned()
    }
}
