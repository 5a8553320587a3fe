use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// 文件头部的元信息块。
///
/// 所有字段均可缺省；任何标量（字符串、数字、布尔、TOML 日期）都按文本读取。
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_text")]
    pub excerpt: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;

    Ok(value.map(|s| match s {
        Scalar::Text(s) => s,
        Scalar::Integer(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Format {
    /// `---` 包裹的 YAML
    Yaml,
    /// `+++` 包裹的 TOML
    Toml,
}

/// 把原始文件内容拆分为元信息和正文。
///
/// - 没有元信息块：返回默认值，正文为整个文件
/// - 元信息块未闭合：返回错误，正文为整个文件
/// - 元信息块无法解析：返回错误，正文为块之后的部分
pub fn parse(content: &str) -> (Result<FrontMatter>, &str) {
    match split(content) {
        None => (Ok(FrontMatter::default()), content),
        Some(Err(e)) => (Err(e), content),
        Some(Ok((format, block, body))) => (parse_block(format, block), body),
    }
}

/// 定位元信息块。分隔符必须独占一行。
fn split(content: &str) -> Option<Result<(Format, &str, &str)>> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let (first, rest) = match content.find('\n') {
        Some(i) => (&content[..i], &content[i + 1..]),
        None => (content, ""),
    };

    let delim = first.trim_end();
    let format = match delim {
        "---" => Format::Yaml,
        "+++" => Format::Toml,
        _ => return None,
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delim {
            return Some(Ok((format, &rest[..offset], &rest[offset + line.len()..])));
        }
        offset += line.len();
    }

    Some(Err(Error::FrontMatter(
        "front matter does not terminate with expected delimiter",
    )))
}

fn parse_block(format: Format, block: &str) -> Result<FrontMatter> {
    if block.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    match format {
        Format::Yaml => serde_yaml::from_str(block).map_err(Into::into),
        Format::Toml => {
            let mut table: toml::Table = toml::from_str(block)?;

            // TOML 原生日期转为文本，交给统一的日期解析
            for (_, value) in table.iter_mut() {
                if let toml::Value::Datetime(dt) = value {
                    *value = toml::Value::String(dt.to_string());
                }
            }

            toml::Value::Table(table).try_into().map_err(Into::into)
        }
    }
}
