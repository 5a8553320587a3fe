use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, html};

use super::{
    code_block_open, escaped, image_tag, link_open, open_tag, ordered_list_open, style,
};

/// 每个开始事件对应的结束方式
enum Close {
    Html(&'static str),
    TableHead,
    PassThrough,
}

/// 图片的 alt 文本分散在多个事件中，需要收集完再输出
struct PendingImage {
    src: String,
    title: String,
    alt: String,
    depth: usize,
}

pub(super) fn render(text: &str, out: &mut String) {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let events = styled(Parser::new_ext(text, options));
    html::push_html(out, events.into_iter());
}

fn raw<'a>(html: impl Into<CowStr<'a>>) -> Event<'a> {
    Event::InlineHtml(html.into())
}

/// 把需要样式的元素替换为带 class 的原始 HTML，其余事件原样交给 `push_html`。
fn styled<'a>(parser: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut closers: Vec<Close> = Vec::new();
    let mut in_table_head = false;
    let mut image: Option<PendingImage> = None;

    for event in parser {
        if let Some(mut pending) = image.take() {
            match event {
                Event::Start(_) => pending.depth += 1,
                Event::End(_) if pending.depth == 0 => {
                    events.push(raw(image_tag(
                        &pending.src,
                        &pending.alt,
                        Some(&pending.title),
                    )));
                    continue;
                }
                Event::End(_) => pending.depth -= 1,
                Event::Text(t) | Event::Code(t) => pending.alt.push_str(&t),
                _ => {}
            }
            image = Some(pending);
            continue;
        }

        match event {
            Event::Start(Tag::TableHead) => {
                in_table_head = true;
                closers.push(Close::TableHead);
                events.push(raw("<thead><tr>"));
            }
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => {
                image = Some(PendingImage {
                    src: dest_url.to_string(),
                    title: title.to_string(),
                    alt: String::new(),
                    depth: 0,
                });
            }
            Event::Start(tag) => match styled_open(&tag, in_table_head) {
                Some((open, close)) => {
                    closers.push(Close::Html(close));
                    events.push(raw(open));
                }
                None => {
                    closers.push(Close::PassThrough);
                    events.push(Event::Start(tag));
                }
            },
            Event::End(end) => match closers.pop() {
                Some(Close::Html(close)) => events.push(raw(close)),
                Some(Close::TableHead) => {
                    in_table_head = false;
                    events.push(raw("</tr></thead><tbody>"));
                }
                Some(Close::PassThrough) | None => events.push(Event::End(end)),
            },
            Event::Code(code) => events.push(raw(format!(
                r#"<code class="{}">{}</code>"#,
                style::INLINE_CODE,
                escaped(&code)
            ))),
            Event::Rule => events.push(raw(format!(r#"<hr class="{}" />"#, style::HR))),
            // 原始 HTML 不直接输出，按文本转义
            Event::Html(h) | Event::InlineHtml(h) => events.push(Event::Text(h)),
            other => events.push(other),
        }
    }

    events
}

/// 需要样式的元素返回开始标签和对应的结束标签
fn styled_open(tag: &Tag<'_>, in_table_head: bool) -> Option<(String, &'static str)> {
    let pair = match tag {
        Tag::Heading {
            level: HeadingLevel::H1,
            ..
        } => (open_tag("h1", style::H1), "</h1>"),
        Tag::Heading {
            level: HeadingLevel::H2,
            ..
        } => (open_tag("h2", style::H2), "</h2>"),
        Tag::Heading {
            level: HeadingLevel::H3,
            ..
        } => (open_tag("h3", style::H3), "</h3>"),
        Tag::Paragraph => (open_tag("p", style::P), "</p>"),
        Tag::List(None) => (open_tag("ul", style::UL), "</ul>"),
        Tag::List(Some(start)) => (ordered_list_open(*start), "</ol>"),
        Tag::Item => (open_tag("li", style::LI), "</li>"),
        Tag::BlockQuote(_) => (open_tag("blockquote", style::BLOCKQUOTE), "</blockquote>"),
        Tag::CodeBlock(kind) => {
            let language = match kind {
                CodeBlockKind::Fenced(info) => info.split_whitespace().next(),
                CodeBlockKind::Indented => None,
            };
            (code_block_open(language), "</code></pre>")
        }
        Tag::Table(_) => (
            format!(
                r#"<div class="{}"><table class="{}">"#,
                style::TABLE_WRAPPER,
                style::TABLE
            ),
            "</tbody></table></div>",
        ),
        Tag::TableRow => ("<tr>".to_string(), "</tr>"),
        Tag::TableCell if in_table_head => (open_tag("th", style::TH), "</th>"),
        Tag::TableCell => (open_tag("td", style::TD), "</td>"),
        Tag::Link {
            dest_url, title, ..
        } => (link_open(dest_url, Some(&**title)), "</a>"),
        _ => return None,
    };

    Some(pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_str(text: &str) -> String {
        let mut out = String::new();
        render(text, &mut out);
        out
    }

    #[test]
    fn test_headings_levels() {
        let html = render_str("# One\n\n## Two\n\n### Three\n\n#### Four");

        assert!(html.contains(&format!(r#"<h1 class="{}">One</h1>"#, style::H1)));
        assert!(html.contains(&format!(r#"<h2 class="{}">Two</h2>"#, style::H2)));
        assert!(html.contains(&format!(r#"<h3 class="{}">Three</h3>"#, style::H3)));
        assert!(html.contains("<h4>Four</h4>"));
    }

    #[test]
    fn test_paragraph_and_inline() {
        let html = render_str("Hello **bold** and `code` ~~gone~~");

        assert!(html.starts_with(&format!(r#"<p class="{}">"#, style::P)));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains(&format!(r#"<code class="{}">code</code>"#, style::INLINE_CODE)));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.trim_end().ends_with("</p>"));
    }

    #[test]
    fn test_lists() {
        let html = render_str("- a\n- b\n\n3. x\n4. y\n");

        assert!(html.contains(&format!(r#"<ul class="{}">"#, style::UL)));
        assert!(html.contains(&format!(r#"<li class="{}">a</li>"#, style::LI)));
        assert!(html.contains(&format!(r#"<ol start="3" class="{}">"#, style::OL)));
        assert!(html.contains("</ol>"));
    }

    #[test]
    fn test_links_open_in_new_tab() {
        let html = render_str(r#"[site](https://example.com "Example") [bad](javascript:alert(1))"#);

        assert!(html.contains(&format!(
            r#"<a href="https://example.com" title="Example" class="{}" {}>site</a>"#,
            style::A,
            style::LINK_ATTRS
        )));
        assert!(html.contains(r##"<a href="#""##));
    }

    #[test]
    fn test_blockquote_and_rule() {
        let html = render_str("> quoted\n\n---\n");

        assert!(html.contains(&format!(r#"<blockquote class="{}">"#, style::BLOCKQUOTE)));
        assert!(html.contains("quoted"));
        assert!(html.contains(&format!(r#"<hr class="{}" />"#, style::HR)));
    }

    #[test]
    fn test_code_block_with_language() {
        let html = render_str("```rust\nfn main() { 1 < 2; }\n```\n");

        assert!(html.contains(&format!(
            r#"<pre class="{}"><code class="{} language-rust">"#,
            style::PRE,
            style::CODE_BLOCK
        )));
        assert!(html.contains("fn main() { 1 &lt; 2; }"));
        assert!(html.contains("</code></pre>"));
    }

    #[test]
    fn test_image_collects_alt_text() {
        let html = render_str(r#"![An *AI* chart](/images/chart.png "Growth")"#);

        assert!(html.contains(&format!(
            r#"<img src="/images/chart.png" alt="An AI chart" title="Growth" class="{}" />"#,
            style::IMG
        )));
    }

    #[test]
    fn test_table() {
        let html = render_str("| a | b |\n|---|---|\n| 1 | 2 |\n");

        assert!(html.contains(&format!(
            r#"<div class="{}"><table class="{}"><thead><tr>"#,
            style::TABLE_WRAPPER,
            style::TABLE
        )));
        assert!(html.contains(&format!(r#"<th class="{}">a</th>"#, style::TH)));
        assert!(html.contains(&format!(r#"<td class="{}">1</td>"#, style::TD)));
        assert!(html.contains("</tr></thead><tbody><tr>"));
        assert!(html.contains("</tbody></table></div>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_str("<script>alert(1)</script>\n\ntext <b>inline</b>");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>"));
    }
}
