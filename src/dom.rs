//! Emitted DOM tree
//!
//! Widgets are built as `Element` trees and serialized to HTML once per
//! render pass. Output carries structure, classes, and inline styles only;
//! no scripts and no inline event handlers. Interactive hooks are expressed
//! as `data-*` attributes that the host page wires up.

use std::fmt::Write as _;

/// One element in the emitted tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    children: Vec<Node>,
}

/// Child position in an element: nested elements and text interleave in
/// insertion order, like DOM nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() {
            self.classes.push(class);
        }
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.push((property.into(), value.into()));
        self
    }

    /// Append a text node; it renders at this position in the child order.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Insert a child at the front, before any text (the renderer prepends
    /// icons to links).
    pub fn prepend(&mut self, child: Element) {
        self.children.insert(0, Node::Element(child));
    }

    pub fn tag(&self) -> &str {
        self.tag
    }

    pub fn child_count(&self) -> usize {
        self.children
            .iter()
            .filter(|n| matches!(n, Node::Element(_)))
            .count()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_attr(&self.classes.join(" ")));
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
        }
        if !self.styles.is_empty() {
            let mut css = String::new();
            for (property, value) in &self.styles {
                let _ = write!(css, "{}:{};", property, value);
            }
            let _ = write!(out, " style=\"{}\"", escape_attr(&css));
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(el) => el.write_html(out),
                Node::Text(text) => out.push_str(&escape_text(text)),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escape text content.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape attribute values (double-quoted).
pub fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_structure() {
        let el = Element::new("ul")
            .class("nav__sub-list")
            .child(Element::new("li").class("nav__item").text("Home"));

        assert_eq!(
            el.to_html(),
            "<ul class=\"nav__sub-list\"><li class=\"nav__item\">Home</li></ul>"
        );
    }

    #[test]
    fn renders_attrs_and_styles_in_insertion_order() {
        let el = Element::new("a")
            .attr("href", "#")
            .attr("target", "_parent")
            .style("max-height", "0")
            .style("opacity", "0");

        assert_eq!(
            el.to_html(),
            "<a href=\"#\" target=\"_parent\" style=\"max-height:0;opacity:0;\"></a>"
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let el = Element::new("a")
            .attr("href", "/x?a=1&b=\"2\"")
            .text("Tom & <Jerry>");

        assert_eq!(
            el.to_html(),
            "<a href=\"/x?a=1&amp;b=&quot;2&quot;\">Tom &amp; &lt;Jerry&gt;</a>"
        );
    }

    #[test]
    fn prepend_puts_the_icon_before_existing_text() {
        let mut link = Element::new("a").text("Title");
        link.prepend(Element::new("span").text("icon"));
        assert_eq!(link.to_html(), "<a><span>icon</span>Title</a>");
    }

    #[test]
    fn text_and_children_interleave_in_insertion_order() {
        let el = Element::new("a")
            .child(Element::new("span").text("icon"))
            .text("Title")
            .child(Element::new("span").text("more"));
        assert_eq!(el.to_html(), "<a><span>icon</span>Title<span>more</span></a>");
    }
}
