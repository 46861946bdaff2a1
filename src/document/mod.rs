// src/document/mod.rs

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// What a top-level element of the article body is, as far as table
/// parsing cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `hN`, with N as written in the markup.
    Heading(u8),
    Table,
    Other,
}

/// One element of the flattened article body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub text: String,
}

impl Node {
    pub fn new(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

fn heading_level(name: &str) -> Option<u8> {
    match name.as_bytes() {
        [b'h', d @ b'1'..=b'6'] => Some(d - b'0'),
        _ => None,
    }
}

fn has_class(el: &ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Heading text without the "[edit]" link that older markup nests inside it.
fn heading_text(el: &ElementRef<'_>) -> String {
    let headline = Selector::parse("span.mw-headline").expect("valid headline selector");
    match el.select(&headline).next() {
        Some(span) => span.text().collect::<String>().trim().to_string(),
        None => el.text().collect::<String>().trim().to_string(),
    }
}

fn flatten_into(el: ElementRef<'_>, out: &mut Vec<Node>) {
    for child in el.children().filter_map(ElementRef::wrap) {
        let name = child.value().name();
        if let Some(n) = heading_level(name) {
            out.push(Node::new(NodeKind::Heading(n), heading_text(&child)));
        } else if name == "table" {
            out.push(Node::new(NodeKind::Table, child.text().collect::<String>()));
        } else if name == "div" && has_class(&child, "mw-heading") {
            // newer markup wraps each heading with its edit link
            match child
                .children()
                .filter_map(ElementRef::wrap)
                .find_map(|h| heading_level(h.value().name()).map(|n| (n, h)))
            {
                Some((n, h)) => out.push(Node::new(NodeKind::Heading(n), heading_text(&h))),
                None => out.push(Node::new(NodeKind::Other, "")),
            }
        } else if name == "section" || (name == "div" && has_class(&child, "mw-parser-output")) {
            flatten_into(child, out);
        } else {
            out.push(Node::new(NodeKind::Other, ""));
        }
    }
}

/// Flatten the children of the element matched by `root_selector` into the
/// node sequence walked by the table parser. Table text is every descendant
/// text node concatenated, which keeps the blank-line row separators intact.
pub fn nodes_from_html(html: &str, root_selector: &str) -> Result<Vec<Node>> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse(root_selector)
        .map_err(|e| anyhow!("invalid content selector `{}`: {:?}", root_selector, e))?;
    let root = doc
        .select(&selector)
        .next()
        .ok_or_else(|| anyhow!("no element matches `{}`", root_selector))?;

    let mut nodes = Vec::new();
    flatten_into(root, &mut nodes);
    debug!(
        nodes = nodes.len(),
        tables = nodes.iter().filter(|n| n.kind == NodeKind::Table).count(),
        "flattened article body"
    );
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<div class="mw-content-ltr mw-parser-output">
<p>Intro paragraph.</p>
<div class="mw-heading mw-heading2"><h2 id="Current_programming">Current programming</h2><span class="mw-editsection">[edit]</span></div>
<h3><span class="mw-headline">Original programming</span><span class="mw-editsection">[edit]</span></h3>
<section><h4>Animated</h4><table><tr><td>Title</td></tr></table></section>
<h6>Too deep</h6>
</div>
</body></html>"#;

    #[test]
    fn flattens_headings_and_tables() -> Result<()> {
        let nodes = nodes_from_html(PAGE, "div.mw-content-ltr.mw-parser-output")?;
        let kinds: Vec<NodeKind> = nodes.iter().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Other,
                NodeKind::Heading(2),
                NodeKind::Heading(3),
                NodeKind::Heading(4),
                NodeKind::Table,
                NodeKind::Heading(6),
            ]
        );
        assert_eq!(nodes[1].text, "Current programming");
        assert_eq!(nodes[2].text, "Original programming");
        assert_eq!(nodes[3].text, "Animated");
        assert_eq!(nodes[4].text.trim(), "Title");
        Ok(())
    }

    #[test]
    fn missing_root_is_an_error() {
        assert!(nodes_from_html("<p>nothing</p>", "div.mw-parser-output").is_err());
        assert!(nodes_from_html("<p>nothing</p>", "div[").is_err());
    }

    #[test]
    fn heading_tags() {
        assert_eq!(heading_level("h2"), Some(2));
        assert_eq!(heading_level("h5"), Some(5));
        assert_eq!(heading_level("hr"), None);
        assert_eq!(heading_level("header"), None);
    }
}
