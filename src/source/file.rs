use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::fs;

use super::{NewsletterSource, sort_newest_first};
use crate::content::{Content, FrontMatter, NewsletterRecord, RecordBuilder, Slug, front_matter};

/// 基于目录的来源，每个 `<slug>.md` 文件是一期通讯。
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: Arc<Path>,
}

impl FileSource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: Arc::from(dir.as_ref()),
        }
    }

    /// 目录下所有 Markdown 文件，按文件名排序。
    async fn markdown_files(&self) -> io::Result<Vec<(Slug, PathBuf)>> {
        let mut entries = fs::read_dir(&self.dir).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            if !fs::metadata(&path).await.is_ok_and(|m| m.is_file()) {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match Slug::parse(stem) {
                Some(slug) => files.push((slug, path)),
                None => tracing::warn!(path = %path.display(), "file name is not a valid slug, skipped"),
            }
        }

        files.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        Ok(files)
    }
}

impl NewsletterSource for FileSource {
    async fn list_all(&self) -> Vec<NewsletterRecord> {
        let files = match self.markdown_files().await {
            Ok(files) => files,
            Err(e) => {
                tracing::error!(dir = %self.dir.display(), %e, "newsletter directory unavailable");
                return Vec::new();
            }
        };

        let mut records = Vec::with_capacity(files.len());
        for (slug, path) in files {
            match fs::read_to_string(&path).await {
                Ok(raw) => records.push(parse_file(slug, &raw)),
                Err(e) => tracing::error!(path = %path.display(), %e, "failed to read newsletter"),
            }
        }

        sort_newest_first(&mut records);
        records
    }

    async fn get_by_slug(&self, slug: &str) -> Option<NewsletterRecord> {
        let slug = Slug::parse(slug)?;
        let path = self.dir.join(format!("{slug}.md"));

        match fs::read_to_string(&path).await {
            Ok(raw) => Some(parse_file(slug, &raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::error!(path = %path.display(), %e, "failed to read newsletter");
                None
            }
        }
    }
}

/// 把一个文件的内容解析成 [`NewsletterRecord`]。
///
/// 元信息块损坏时按缺省值处理，不会失败。
pub fn parse_file(slug: Slug, raw: &str) -> NewsletterRecord {
    let (front_matter, body) = front_matter::parse(raw);

    let front_matter = front_matter.unwrap_or_else(|e| {
        tracing::warn!(%slug, %e, "malformed front matter, using defaults");
        FrontMatter::default()
    });

    RecordBuilder::new(slug)
        .title(front_matter.title)
        .date(front_matter.date)
        .excerpt(front_matter.excerpt)
        .content(Content::Markdown(body.to_string()))
        .build()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Local, NaiveDate};
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &TempDir, name: &str, content: &str) {
        std::fs::write(dir.path().join(name), content).expect("写入文件失败");
    }

    fn sample_dir() -> TempDir {
        let dir = tempfile::tempdir().expect("创建临时目录失败");

        write(
            &dir,
            "welcome.md",
            "---\ntitle: Welcome\ndate: 2025-01-15\nexcerpt: Our first issue.\n---\n\n# Welcome\n",
        );
        write(
            &dir,
            "december.md",
            "+++\ntitle = \"December Updates\"\ndate = 2024-12-20\n+++\nAI tools recap.\n",
        );
        write(
            &dir,
            "november.md",
            "---\ntitle: November Roundup\ndate: \"2024-11-25\"\n---\nRoundup body.\n",
        );
        write(&dir, "notes.txt", "not a newsletter");
        write(&dir, "bad name.md", "---\ntitle: Skipped\n---\n");

        dir
    }

    #[tokio::test]
    async fn test_list_all_sorted_newest_first() {
        let dir = sample_dir();
        let source = FileSource::new(dir.path());

        let records = source.list_all().await;
        let slugs: Vec<_> = records.iter().map(|r| r.slug.as_str()).collect();

        assert_eq!(slugs, ["welcome", "december", "november"]);
        assert!(records.windows(2).all(|w| w[0].date >= w[1].date));
        assert_eq!(records[1].title, "December Updates");
        assert_eq!(records[1].id, "december");
    }

    #[tokio::test]
    async fn test_same_day_keeps_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "b.md", "---\ndate: 2024-05-01\n---\nb");
        write(&dir, "a.md", "---\ndate: 2024-05-01\n---\na");

        let records = FileSource::new(dir.path()).list_all().await;
        let slugs: Vec<_> = records.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, ["a", "b"]);
    }

    #[tokio::test]
    async fn test_missing_directory_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("does-not-exist"));

        assert!(source.list_all().await.is_empty());
        assert_eq!(source.get_by_slug("anything").await, None);
    }

    #[tokio::test]
    async fn test_get_by_slug_round_trip() {
        let dir = sample_dir();
        let source = FileSource::new(dir.path());

        for record in source.list_all().await {
            let found = source.get_by_slug(record.slug.as_str()).await;
            assert_eq!(found, Some(record));
        }
    }

    #[tokio::test]
    async fn test_get_by_slug_not_found_and_traversal() {
        let dir = sample_dir();
        let source = FileSource::new(dir.path());

        assert_eq!(source.get_by_slug("does-not-exist").await, None);
        assert_eq!(source.get_by_slug("../welcome").await, None);
        assert_eq!(source.get_by_slug("notes").await, None);
    }

    #[test]
    fn test_file_without_front_matter_uses_fallbacks() {
        let body = "Plain newsletter body. ".repeat(20);
        let record = parse_file(Slug::parse("plain").unwrap(), &body);

        assert_eq!(record.title, "plain");
        assert_eq!(record.excerpt, format!("{}...", &body[..150]));
        assert_eq!(record.content, Content::Markdown(body.clone()));
        assert_eq!(record.date, Local::now().date_naive());
    }

    #[test]
    fn test_bad_date_falls_back_to_today() {
        let record = parse_file(
            Slug::parse("bad-date").unwrap(),
            "---\ntitle: Bad\ndate: not a date\n---\nbody",
        );

        assert_eq!(record.date.year(), Local::now().year());
        assert_eq!(record.date, Local::now().date_naive());
        assert_eq!(record.title, "Bad");
    }

    #[test]
    fn test_unterminated_front_matter_keeps_whole_file() {
        let raw = "---\ntitle: Broken\nbody";
        let record = parse_file(Slug::parse("broken").unwrap(), raw);

        assert_eq!(record.title, "broken");
        assert_eq!(record.content, Content::Markdown(raw.to_string()));
    }

    #[test]
    fn test_front_matter_date_is_calendar_date() {
        let record = parse_file(
            Slug::parse("dated").unwrap(),
            "---\ndate: 2024-12-20T23:59:00-08:00\n---\nbody",
        );
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 12, 20).unwrap());
    }
}
