use super::{
    code_block_open, escape_html, image_tag, link_open, open_tag, ordered_list_open, style,
};
use crate::content::{Mark, Node};

pub(super) fn render(node: &Node, out: &mut String) {
    match node.kind.as_str() {
        "text" => render_text(node, out),
        "paragraph" => wrap(node, out, open_tag("p", style::P), "</p>"),
        "heading" => match node.attr_u64("level").unwrap_or(1) {
            1 => wrap(node, out, open_tag("h1", style::H1), "</h1>"),
            2 => wrap(node, out, open_tag("h2", style::H2), "</h2>"),
            3 => wrap(node, out, open_tag("h3", style::H3), "</h3>"),
            4 => wrap(node, out, "<h4>".into(), "</h4>"),
            5 => wrap(node, out, "<h5>".into(), "</h5>"),
            _ => wrap(node, out, "<h6>".into(), "</h6>"),
        },
        "bulletList" | "taskList" => wrap(node, out, open_tag("ul", style::UL), "</ul>"),
        "orderedList" => {
            let start = node.attr_u64("start").unwrap_or(1);
            wrap(node, out, ordered_list_open(start), "</ol>")
        }
        "listItem" => wrap(node, out, open_tag("li", style::LI), "</li>"),
        "taskItem" => {
            let checkbox = if node.attr_bool("checked").unwrap_or(false) {
                r#"<input disabled="" type="checkbox" checked=""/>"#
            } else {
                r#"<input disabled="" type="checkbox"/>"#
            };
            wrap(node, out, open_tag("li", style::LI) + checkbox, "</li>")
        }
        "blockquote" => wrap(
            node,
            out,
            open_tag("blockquote", style::BLOCKQUOTE),
            "</blockquote>",
        ),
        "codeBlock" => {
            out.push_str(&code_block_open(node.attr_str("language")));
            // 代码块内忽略行内标记
            for child in &node.content {
                escape_html(out, child.text.as_deref().unwrap_or_default());
            }
            out.push_str("</code></pre>");
        }
        "horizontalRule" => out.push_str(&format!(r#"<hr class="{}" />"#, style::HR)),
        "hardBreak" => out.push_str("<br />"),
        "image" => out.push_str(&image_tag(
            node.attr_str("src").unwrap_or_default(),
            node.attr_str("alt").unwrap_or_default(),
            node.attr_str("title"),
        )),
        "table" => wrap(
            node,
            out,
            format!(
                r#"<div class="{}"><table class="{}"><tbody>"#,
                style::TABLE_WRAPPER,
                style::TABLE
            ),
            "</tbody></table></div>",
        ),
        "tableRow" => wrap(node, out, "<tr>".into(), "</tr>"),
        "tableHeader" => wrap(node, out, open_tag("th", style::TH), "</th>"),
        "tableCell" => wrap(node, out, open_tag("td", style::TD), "</td>"),
        // doc 及未知节点只渲染子节点
        _ => children(node, out),
    }
}

fn children(node: &Node, out: &mut String) {
    for child in &node.content {
        render(child, out);
    }
}

fn wrap(node: &Node, out: &mut String, open: String, close: &str) {
    out.push_str(&open);
    children(node, out);
    out.push_str(close);
}

fn render_text(node: &Node, out: &mut String) {
    let marks: Vec<(String, &str)> = node.marks.iter().filter_map(mark_tags).collect();

    for (open, _) in &marks {
        out.push_str(open);
    }
    escape_html(out, node.text.as_deref().unwrap_or_default());
    for (_, close) in marks.iter().rev() {
        out.push_str(close);
    }
}

/// 未知标记返回 `None`，直接忽略
fn mark_tags(mark: &Mark) -> Option<(String, &'static str)> {
    let tags = match mark.kind.as_str() {
        "bold" => ("<strong>".into(), "</strong>"),
        "italic" => ("<em>".into(), "</em>"),
        "strike" => ("<del>".into(), "</del>"),
        "underline" => ("<u>".into(), "</u>"),
        "highlight" => ("<mark>".into(), "</mark>"),
        "subscript" => ("<sub>".into(), "</sub>"),
        "superscript" => ("<sup>".into(), "</sup>"),
        "code" => (
            format!(r#"<code class="{}">"#, style::INLINE_CODE),
            "</code>",
        ),
        "link" => (
            link_open(mark.attr_str("href").unwrap_or_default(), mark.attr_str("title")),
            "</a>",
        ),
        _ => return None,
    };

    Some(tags)
}
