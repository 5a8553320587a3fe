mod document;
mod markdown;
pub mod style;

use crate::content::Content;

/// 把通讯正文渲染为 HTML 片段。
pub trait Renderer: Send + Sync {
    fn render(&self, content: &Content) -> String;
}

/// 按固定样式表渲染 Markdown 和富文本文档。
///
/// Markdown 部分由 `pulldown-cmark` 解析，本身只负责把元素映射到 [`style`] 中的样式类。
#[derive(Debug, Clone, Copy, Default)]
pub struct StyledRenderer;

impl Renderer for StyledRenderer {
    fn render(&self, content: &Content) -> String {
        let mut out = format!(r#"<div class="{}">"#, style::WRAPPER);

        match content {
            Content::Markdown(text) => markdown::render(text, &mut out),
            Content::Document(node) => document::render(node, &mut out),
        }

        out.push_str("</div>");
        out
    }
}

/// `<tag class="...">`
fn open_tag(tag: &str, class: &str) -> String {
    format!(r#"<{tag} class="{class}">"#)
}

/// 转义文本和属性值
pub(crate) fn escape_html(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

fn escaped(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_html(&mut out, s);
    out
}

/// 只放行相对地址和 http、https、mailto 协议，其余替换为 `#`。
fn safe_url(url: &str) -> &str {
    let url = url.trim();

    let scheme_end = url.find(':');
    let path_start = url.find(['/', '?', '#']);

    match (scheme_end, path_start) {
        (Some(colon), Some(path)) if path < colon => url,
        (Some(colon), _) => {
            let scheme = url[..colon].to_ascii_lowercase();
            if matches!(scheme.as_str(), "http" | "https" | "mailto") {
                url
            } else {
                "#"
            }
        }
        (None, _) => url,
    }
}

fn link_open(href: &str, title: Option<&str>) -> String {
    let mut out = String::from(r#"<a href=""#);
    escape_html(&mut out, safe_url(href));
    out.push('"');

    if let Some(title) = title.filter(|t| !t.is_empty()) {
        out.push_str(r#" title=""#);
        escape_html(&mut out, title);
        out.push('"');
    }

    out.push_str(&format!(r#" class="{}" {}>"#, style::A, style::LINK_ATTRS));
    out
}

fn image_tag(src: &str, alt: &str, title: Option<&str>) -> String {
    let mut out = String::from(r#"<img src=""#);
    escape_html(&mut out, safe_url(src));
    out.push_str(r#"" alt=""#);
    escape_html(&mut out, alt);
    out.push('"');

    if let Some(title) = title.filter(|t| !t.is_empty()) {
        out.push_str(r#" title=""#);
        escape_html(&mut out, title);
        out.push('"');
    }

    out.push_str(&format!(r#" class="{}" />"#, style::IMG));
    out
}

fn code_block_open(language: Option<&str>) -> String {
    let mut out = format!(r#"<pre class="{}"><code class="{}"#, style::PRE, style::CODE_BLOCK);

    if let Some(lang) = language.filter(|l| !l.is_empty()) {
        out.push_str(" language-");
        escape_html(&mut out, lang);
    }

    out.push_str(r#"">"#);
    out
}

fn ordered_list_open(start: u64) -> String {
    if start == 1 {
        open_tag("ol", style::OL)
    } else {
        format!(r#"<ol start="{start}" class="{}">"#, style::OL)
    }
}
