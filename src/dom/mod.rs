//! Rendered document tree.
//!
//! A small owned element tree: the render pipeline builds it, the shell reads
//! it (heading ids, code text, image sources) and serializes it to HTML.

use std::fmt::Write;

use smallvec::SmallVec;

use crate::utils::html::{escape, escape_attr, is_void_element};

/// Attribute list. Most elements carry two or fewer.
pub type Attrs = SmallVec<[(&'static str, String); 2]>;

/// A node of the rendered tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Box<Element>),
    Text(String),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(elem) => Some(elem),
            Self::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Self::Element(Box::new(elem))
    }
}

/// An element with a static tag name.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Attrs,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Attrs::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Depth-first, document-order search over descendants (self excluded).
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        find_into(&self.children, pred, &mut found);
        found
    }

    /// Serialize to an HTML string.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(256);
        write_element(self, &mut out);
        out
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::new("div")
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(&e.children, out),
        }
    }
}

fn find_into<'a>(nodes: &'a [Node], pred: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(elem) = node {
            if pred(elem) {
                found.push(elem);
            }
            find_into(&elem.children, pred, found);
        }
    }
}

fn write_element(elem: &Element, out: &mut String) {
    out.push('<');
    out.push_str(elem.tag);
    for (name, value) in &elem.attrs {
        if value.is_empty() {
            let _ = write!(out, " {name}");
        } else {
            let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
        }
    }
    out.push('>');

    if is_void_element(elem.tag) {
        return;
    }

    for child in &elem.children {
        match child {
            Node::Text(t) => out.push_str(&escape(t)),
            Node::Element(e) => write_element(e, out),
        }
    }

    let _ = write!(out, "</{}>", elem.tag);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_nested() {
        let p = Element::new("p")
            .with_attr("class", "note")
            .with_child(Node::text("a < b "))
            .with_child(Element::new("code").with_child(Node::text("x & y")));
        assert_eq!(
            p.to_html(),
            "<p class=\"note\">a &lt; b <code>x &amp; y</code></p>"
        );
    }

    #[test]
    fn test_void_and_boolean_attrs() {
        let img = Element::new("img")
            .with_attr("src", "/a.png")
            .with_attr("data-zoomable", "");
        assert_eq!(img.to_html(), "<img src=\"/a.png\" data-zoomable>");
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut a = Element::new("a").with_attr("href", "#x");
        a.set_attr("href", "#y");
        assert_eq!(a.attrs.len(), 1);
        assert_eq!(a.attr("href"), Some("#y"));
    }

    #[test]
    fn test_find_all_and_text() {
        let root = Element::new("article")
            .with_child(Element::new("h2").with_child(Node::text("One")))
            .with_child(
                Element::new("div").with_child(Element::new("h2").with_child(Node::text("Two"))),
            );
        let hs = root.find_all(&|e| e.tag == "h2");
        assert_eq!(hs.len(), 2);
        assert_eq!(hs[1].text_content(), "Two");
        assert_eq!(root.text_content(), "OneTwo");
    }
}
