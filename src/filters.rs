use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{error::Result, listing::ListingQuery};

/// 单个筛选项的取值：单选或多选。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Single(String),
    Multi(Vec<String>),
}

impl FilterValue {
    /// 单选直接返回；多选取第一个。
    pub fn first(&self) -> Option<&str> {
        match self {
            FilterValue::Single(s) => Some(s),
            FilterValue::Multi(v) => v.first().map(String::as_str),
        }
    }
}

/// 筛选状态：筛选名到已选值的映射。
///
/// 由调用方显式创建并传入列表流水线，没有全局共享的实例。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    filters: BTreeMap<String, FilterValue>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由查询串中的键值对构造，同名键出现多次时视为多选。
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut state = Self::new();

        for (key, value) in pairs {
            let (key, value): (String, String) = (key.into(), value.into());

            let merged = match state.filters.remove(&key) {
                None => FilterValue::Single(value),
                Some(FilterValue::Single(prev)) => FilterValue::Multi(vec![prev, value]),
                Some(FilterValue::Multi(mut values)) => {
                    values.push(value);
                    FilterValue::Multi(values)
                }
            };
            state.filters.insert(key, merged);
        }

        state
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.filters.get(name)
    }

    /// 合并新的选择，同名筛选项被覆盖，其余保留。
    pub fn update(&mut self, filters: impl IntoIterator<Item = (String, FilterValue)>) {
        self.filters.extend(filters);
    }

    /// 多选项中切换某个值：已选则移除，未选则加入。
    pub fn toggle(&mut self, name: &str, value: &str) {
        let mut values = match self.filters.remove(name) {
            Some(FilterValue::Multi(values)) => values,
            Some(FilterValue::Single(s)) => vec![s],
            None => Vec::new(),
        };

        match values.iter().position(|v| v == value) {
            Some(i) => {
                values.remove(i);
            }
            None => values.push(value.to_string()),
        }

        self.filters.insert(name.to_string(), FilterValue::Multi(values));
    }

    pub fn reset(&mut self) {
        self.filters.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// 读取 `search`、`year`、`month` 三项，转换为 [`ListingQuery`]。
    pub fn listing_query(&self) -> Result<ListingQuery> {
        let value = |name: &str| self.get(name).and_then(FilterValue::first);
        ListingQuery::parse(value("search"), value("year"), value("month"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Selection;

    #[test]
    fn test_from_pairs_collects_repeated_keys() {
        let state = FilterState::from_pairs([
            ("year", "2024"),
            ("tag", "rust"),
            ("tag", "web"),
            ("tag", "ai"),
        ]);

        assert_eq!(state.get("year"), Some(&FilterValue::Single("2024".into())));
        assert_eq!(
            state.get("tag"),
            Some(&FilterValue::Multi(vec!["rust".into(), "web".into(), "ai".into()]))
        );
    }

    #[test]
    fn test_update_merges_over_existing() {
        let mut state = FilterState::from_pairs([("year", "2024"), ("month", "3")]);
        state.update([("year".to_string(), FilterValue::Single("2025".into()))]);

        assert_eq!(state.get("year"), Some(&FilterValue::Single("2025".into())));
        assert_eq!(state.get("month"), Some(&FilterValue::Single("3".into())));
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut state = FilterState::new();
        state.toggle("tag", "rust");
        state.toggle("tag", "web");
        state.toggle("tag", "rust");

        assert_eq!(state.get("tag"), Some(&FilterValue::Multi(vec!["web".into()])));

        state.reset();
        assert!(state.is_empty());
    }

    #[test]
    fn test_listing_query_conversion() {
        let state = FilterState::from_pairs([("search", "AI"), ("year", "2024"), ("month", "all")]);
        let query = state.listing_query().unwrap();

        assert_eq!(query.search, "AI");
        assert_eq!(query.year, Selection::Only(2024));
        assert_eq!(query.month, Selection::All);

        assert_eq!(FilterState::new().listing_query().unwrap(), ListingQuery::default());
        assert!(FilterState::from_pairs([("month", "13")]).listing_query().is_err());
    }

    #[test]
    fn test_serde_shape() {
        let state = FilterState::from_pairs([("year", "2024"), ("tag", "a"), ("tag", "b")]);
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "filters": { "tag": ["a", "b"], "year": "2024" } })
        );
    }
}
