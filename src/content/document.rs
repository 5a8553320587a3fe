use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 富文本文档节点。
///
/// 与常见富文本编辑器导出的 JSON 结构一致：`{ type, attrs, content, text, marks }`。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attrs: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

/// 文本节点上的行内标记，如加粗、链接。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attrs: Map<String, Value>,
}

fn attr_str<'a>(attrs: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    attrs.get(key).and_then(Value::as_str)
}

impl Node {
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        attr_str(&self.attrs, key)
    }

    pub fn attr_u64(&self, key: &str) -> Option<u64> {
        self.attrs.get(key).and_then(Value::as_u64)
    }

    pub fn attr_bool(&self, key: &str) -> Option<bool> {
        self.attrs.get(key).and_then(Value::as_bool)
    }

    /// 提取纯文本，块级节点之间以换行分隔。
    pub fn plain_text(&self) -> String {
        let mut buf = String::new();
        self.collect_text(&mut buf);
        buf
    }

    fn collect_text(&self, buf: &mut String) {
        match self.kind.as_str() {
            "text" => buf.push_str(self.text.as_deref().unwrap_or_default()),
            "hardBreak" => buf.push('\n'),
            _ => {
                for child in &self.content {
                    child.collect_text(buf);
                }
                if self.kind != "doc" && !buf.is_empty() && !buf.ends_with('\n') {
                    buf.push('\n');
                }
            }
        }
    }
}

impl Mark {
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        attr_str(&self.attrs, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        serde_json::from_str(
            r#"{
                "type": "doc",
                "content": [
                    { "type": "heading", "attrs": { "level": 1, "textAlign": null },
                      "content": [{ "type": "text", "text": "Getting started" }] },
                    { "type": "paragraph", "content": [
                        { "type": "text", "text": "Welcome to the " },
                        { "type": "text", "marks": [{ "type": "bold" }], "text": "editor" },
                        { "type": "hardBreak" },
                        { "type": "text", "text": "second line" }
                    ] },
                    { "type": "horizontalRule" }
                ]
            }"#,
        )
        .expect("文档解析失败")
    }

    #[test]
    fn test_deserialize_document() {
        let doc = sample();

        assert_eq!(doc.kind, "doc");
        assert_eq!(doc.content.len(), 3);
        assert_eq!(doc.content[0].attr_u64("level"), Some(1));
        assert_eq!(doc.content[0].attr_str("textAlign"), None);
        assert_eq!(doc.content[1].content[1].marks[0].kind, "bold");
    }

    #[test]
    fn test_plain_text_separates_blocks() {
        assert_eq!(
            sample().plain_text(),
            "Getting started\nWelcome to the editor\nsecond line\n"
        );
    }
}
