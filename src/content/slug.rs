use std::fmt;

use serde::{Deserialize, Serialize};

/// 通讯的 URL 安全标识。
///
/// 仅允许 ASCII 字母、数字、`-` 和 `_`，因此可以直接拼进文件路径和链接而不会越界。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// 校验并构造 [`Slug`]，不合法时返回 `None`。
    pub fn parse(s: impl AsRef<str>) -> Option<Self> {
        let s = s.as_ref();

        let valid = !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        valid.then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for Slug {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Slug::parse(&value).ok_or_else(|| format!("invalid slug: {value:?}"))
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}
