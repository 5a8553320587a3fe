mod file;
mod memory;

use crate::content::NewsletterRecord;

pub use self::{
    file::{FileSource, parse_file},
    memory::StaticSource,
};

/// 通讯数据来源。
///
/// 读取失败不会向上传播：目录不可用时列表为空，找不到 slug 时返回 `None`。
pub trait NewsletterSource: Send + Sync {
    /// 列出全部通讯，按日期从新到旧排序，同一天的保持来源中的顺序。
    fn list_all(&self) -> impl Future<Output = Vec<NewsletterRecord>> + Send;

    /// 按 slug 直接查找单篇通讯。
    fn get_by_slug(&self, slug: &str) -> impl Future<Output = Option<NewsletterRecord>> + Send;
}

/// 应用实际持有的来源
#[derive(Debug, Clone)]
pub enum Source {
    Static(StaticSource),
    Files(FileSource),
}

impl NewsletterSource for Source {
    async fn list_all(&self) -> Vec<NewsletterRecord> {
        match self {
            Source::Static(s) => s.list_all().await,
            Source::Files(s) => s.list_all().await,
        }
    }

    async fn get_by_slug(&self, slug: &str) -> Option<NewsletterRecord> {
        match self {
            Source::Static(s) => s.get_by_slug(slug).await,
            Source::Files(s) => s.get_by_slug(slug).await,
        }
    }
}

/// 单篇通讯解析器。
///
/// 只接受 slug 本身（不含路径前缀），直接定位记录，不会为了找一篇而列出全部。
pub struct Resolver<'a, S> {
    source: &'a S,
}

impl<'a, S: NewsletterSource> Resolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub async fn resolve(&self, slug: &str) -> Option<NewsletterRecord> {
        let record = self.source.get_by_slug(slug).await;
        if record.is_none() {
            tracing::debug!(slug, "newsletter not found");
        }
        record
    }
}

/// 按日期倒序排序（稳定排序）
pub(crate) fn sort_newest_first(records: &mut [NewsletterRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}
