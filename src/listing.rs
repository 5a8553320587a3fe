use std::{
    collections::{BTreeSet, HashMap},
    str::FromStr,
};

use chrono::Datelike;

use crate::{
    content::NewsletterRecord,
    error::{Error, Result},
};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// 下拉筛选的取值：全部，或某个具体值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(v) => v == value,
        }
    }
}

impl<T: FromStr> Selection<T> {
    /// 空串和 `all`（不区分大小写）表示全部，其余按 `T` 解析。
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Some(Selection::All);
        }
        s.parse().ok().map(Selection::Only)
    }
}

/// 列表筛选条件。`month` 从 0 开始（0 = 一月）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub search: String,
    pub year: Selection<i32>,
    pub month: Selection<u32>,
}

impl ListingQuery {
    /// 从原始字符串构造，年份、月份不合法时返回 [`Error::InvalidQuery`]。
    pub fn parse(search: Option<&str>, year: Option<&str>, month: Option<&str>) -> Result<Self> {
        let year = Selection::parse(year.unwrap_or_default())
            .ok_or_else(|| Error::InvalidQuery(format!("invalid year: {:?}", year)))?;

        let month = match Selection::<u32>::parse(month.unwrap_or_default()) {
            Some(Selection::Only(m)) if m > 11 => None,
            other => other,
        }
        .ok_or_else(|| Error::InvalidQuery(format!("invalid month: {:?}", month)))?;

        Ok(Self {
            search: search.unwrap_or_default().to_string(),
            year,
            month,
        })
    }

    fn matches(&self, record: &NewsletterRecord, needle: &str) -> bool {
        if !self.year.matches(&record.date.year()) || !self.month.matches(&record.date.month0()) {
            return false;
        }

        needle.is_empty()
            || format!("{} {}", record.title, record.excerpt)
                .to_lowercase()
                .contains(needle)
    }
}

/// 同一年月的一组通讯。
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub items: Vec<&'a NewsletterRecord>,
}

pub fn month_label(year: i32, month0: u32) -> String {
    let name = MONTH_NAMES.get(month0 as usize).copied().unwrap_or("Unknown");
    format!("{name} {year}")
}

/// 筛选并按年月分组。
///
/// 组按首条记录的日期倒序排列，组内保持输入顺序；没有匹配时返回空列表，不会出现空组。
pub fn filter_and_group<'a>(records: &'a [NewsletterRecord], query: &ListingQuery) -> Vec<Group<'a>> {
    let needle = query.search.to_lowercase();

    let mut groups: Vec<Group<'a>> = Vec::new();
    let mut index: HashMap<(i32, u32), usize> = HashMap::new();

    for record in records.iter().filter(|r| query.matches(r, &needle)) {
        let (year, month) = (record.date.year(), record.date.month0());

        let i = *index.entry((year, month)).or_insert_with(|| {
            groups.push(Group {
                label: month_label(year, month),
                year,
                month,
                items: Vec::new(),
            });
            groups.len() - 1
        });

        groups[i].items.push(record);
    }

    groups.sort_by(|a, b| b.items[0].date.cmp(&a.items[0].date));
    groups
}

/// 全部记录中出现过的年份，倒序。与筛选条件无关。
pub fn available_years(records: &[NewsletterRecord]) -> Vec<i32> {
    records
        .iter()
        .map(|r| r.date.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}
