//! Parsed page with editable inline styles
//!
//! Wraps a `scraper` document together with the URL it was loaded from.
//! Style changes are written straight into the document tree, and the page
//! is rendered back to HTML by scraper's serializer.

use std::collections::HashMap;

use ego_tree::{NodeId, NodeRef};
use html5ever::{LocalName, Namespace, QualName};
use scraper::{ElementRef, Html, Node, Selector, StrTendril};

use crate::style::InlineStyle;

/// Handle to an element of a [`Page`]
///
/// Only meaningful for the page it was selected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(NodeId);

/// A loaded page: its URL and its (possibly restyled) document
pub struct Page {
    url: String,
    html: Html,
    /// `style` attribute text of every edited element before its first edit
    original_styles: HashMap<NodeId, Option<String>>,
}

impl Page {
    /// Parses an HTML document loaded from `url`
    pub fn parse(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            html: Html::parse_document(html),
            original_styles: HashMap::new(),
        }
    }

    /// URL the page was loaded from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Underlying parsed document
    pub fn document(&self) -> &Html {
        &self.html
    }

    /// All elements of the document in document order
    ///
    /// `<template>` contents are a separate fragment and are left out, the
    /// same way a browser's `querySelectorAll` leaves them out.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.html
            .tree
            .root()
            .descendants()
            .filter(|node| !in_template(node))
            .filter_map(ElementRef::wrap)
    }

    /// Elements matching `selector`, in document order
    pub fn select(&self, selector: &Selector) -> Vec<ElementId> {
        self.elements()
            .filter(|el| selector.matches(el))
            .map(|el| ElementId(el.id()))
            .collect()
    }

    /// Element behind `id`, if it exists
    pub fn element(&self, id: ElementId) -> Option<ElementRef<'_>> {
        self.html.tree.get(id.0).and_then(ElementRef::wrap)
    }

    /// Current inline style of an element
    ///
    /// Returns `None` if `id` is not an element of this page.
    pub fn style(&self, id: ElementId) -> Option<InlineStyle> {
        let element = self.element(id)?;
        Some(
            element
                .value()
                .attr("style")
                .map(InlineStyle::parse)
                .unwrap_or_default(),
        )
    }

    /// Replaces the inline style of an element
    ///
    /// A style equal to the one the element was parsed with puts the
    /// original attribute text back, so an undone edit leaves no trace.
    /// Returns `false` if `id` is not an element of this page.
    pub fn set_style(&mut self, id: ElementId, style: InlineStyle) -> bool {
        let Some(element) = self.element(id) else {
            return false;
        };
        let current = element.value().attr("style").map(str::to_string);

        let original = self.original_styles.entry(id.0).or_insert(current);
        let value = if style == InlineStyle::parse(original.as_deref().unwrap_or_default()) {
            original.clone()
        } else if style.is_empty() {
            None
        } else {
            Some(style.to_string())
        };

        let Some(mut node) = self.html.tree.get_mut(id.0) else {
            return false;
        };
        let Node::Element(element) = node.value() else {
            return false;
        };
        match value {
            Some(value) => {
                element.attrs.insert(style_attr(), StrTendril::from(value.as_str()));
            }
            None => {
                element.attrs.shift_remove(&style_attr());
            }
        }
        true
    }

    /// Serializes the document with all style edits applied
    pub fn render(&self) -> String {
        self.html.html()
    }
}

fn style_attr() -> QualName {
    QualName::new(None, Namespace::from(""), LocalName::from("style"))
}

fn in_template(node: &NodeRef<'_, Node>) -> bool {
    node.ancestors().any(|ancestor| ancestor.value().is_fragment())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"<!DOCTYPE html>
<html><head><title>Jobs</title><style>a > b { color: red; }</style></head>
<body>
<!-- listing -->
<a class="job" href="/job/1" style="color: blue">Dev &amp; Ops</a>
<br>
<a class="job" href="/job/2">QA</a>
<script>if (1 < 2) { console.log("x"); }</script>
</body></html>"#;

    const WITH_FRAGMENTS: &str = r##"<html><body>
<template><span>t</span><a class="job" href="/job/0">hidden</a></template>
<svg><use xlink:href="#icon"></use></svg>
<a class="job" href="/job/1">job</a><p id="plain">after</p>
</body></html>"##;

    fn selector(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    fn outlined() -> InlineStyle {
        let mut style = InlineStyle::default();
        style.set("outline", "3px solid red");
        style
    }

    #[test]
    fn test_select_in_document_order() {
        let page = Page::parse("https://jobber.md/jobs/", HTML);
        let jobs = page.select(&selector("a.job"));
        assert_eq!(jobs.len(), 2);
        let hrefs: Vec<_> = jobs
            .iter()
            .map(|id| page.element(*id).unwrap().value().attr("href"))
            .collect();
        assert_eq!(hrefs, vec![Some("/job/1"), Some("/job/2")]);
    }

    #[test]
    fn test_select_no_match() {
        let page = Page::parse("https://jobber.md/jobs/", HTML);
        assert!(page.select(&selector("a.missing")).is_empty());
    }

    #[test]
    fn test_select_skips_template_contents() {
        let page = Page::parse("https://jobber.md/jobs/", WITH_FRAGMENTS);
        let jobs = page.select(&selector("a.job"));
        assert_eq!(jobs.len(), 1);
        assert_eq!(page.element(jobs[0]).unwrap().value().attr("href"), Some("/job/1"));
        assert!(page.select(&selector("span")).is_empty());
    }

    #[test]
    fn test_style_reads_attribute() {
        let page = Page::parse("https://jobber.md/jobs/", HTML);
        let jobs = page.select(&selector("a.job"));
        assert_eq!(page.style(jobs[0]).unwrap().get("color"), Some("blue"));
        assert!(page.style(jobs[1]).unwrap().is_empty());
    }

    #[test]
    fn test_set_style_overrides() {
        let mut page = Page::parse("https://jobber.md/jobs/", HTML);
        let jobs = page.select(&selector("a.job"));
        assert!(page.set_style(jobs[1], outlined()));
        assert_eq!(page.style(jobs[1]).unwrap().get("outline"), Some("3px solid red"));
    }

    #[test]
    fn test_set_style_missing_element() {
        let large = Page::parse("https://jobber.md/jobs/", HTML);
        let last = *large.select(&selector("a.job")).last().unwrap();

        let mut small = Page::parse("https://jobber.md/jobs/", "<p>x</p>");
        assert!(!small.set_style(last, InlineStyle::default()));
        assert!(small.style(last).is_none());
    }

    #[test]
    fn test_render_unchanged_page() {
        let page = Page::parse("https://jobber.md/jobs/", HTML);
        let out = page.render();
        assert!(out.starts_with("<!DOCTYPE html><html>"));
        assert!(out.contains("<!-- listing -->"));
        assert!(out.contains(r#"<a class="job" href="/job/1" style="color: blue">Dev &amp; Ops</a>"#));
        assert!(out.contains("<br>\n<a"));
        assert!(!out.contains("</br>"));
        assert!(out.contains(r#"if (1 < 2) { console.log("x"); }"#));
        assert!(out.contains("a > b { color: red; }"));
    }

    #[test]
    fn test_render_with_edited_styles() {
        let mut page = Page::parse("https://jobber.md/jobs/", HTML);
        let jobs = page.select(&selector("a.job"));

        let mut first = page.style(jobs[0]).unwrap();
        first.set("outline", "3px solid red");
        page.set_style(jobs[0], first);

        let mut second = InlineStyle::default();
        second.set("background-color", "rgba(255, 0, 0, 0.2)");
        page.set_style(jobs[1], second);

        let out = page.render();
        assert!(out.contains(r#"style="color: blue; outline: 3px solid red;">Dev"#));
        assert!(out.contains(
            r#"<a class="job" href="/job/2" style="background-color: rgba(255, 0, 0, 0.2);">QA</a>"#
        ));
    }

    #[test]
    fn test_render_drops_emptied_style() {
        let mut page = Page::parse("https://jobber.md/jobs/", HTML);
        let jobs = page.select(&selector("a.job"));
        page.set_style(jobs[0], InlineStyle::default());
        let out = page.render();
        assert!(out.contains(r#"<a class="job" href="/job/1">Dev &amp; Ops</a>"#));
    }

    #[test]
    fn test_render_escapes_attribute_quotes() {
        let page = Page::parse("https://x/", r#"<a title='say "hi"'>x</a>"#);
        assert!(page.render().contains(r#"title="say &quot;hi&quot;""#));
    }

    #[test]
    fn test_render_keeps_template_and_namespaced_attributes() {
        let page = Page::parse("https://jobber.md/jobs/", WITH_FRAGMENTS);
        let out = page.render();
        assert!(out.contains(
            r#"<template><span>t</span><a class="job" href="/job/0">hidden</a></template>"#
        ));
        assert!(out.contains(r##"<use xlink:href="#icon"></use>"##));
    }

    #[test]
    fn test_edit_after_template_lands_on_its_element() {
        let mut page = Page::parse("https://jobber.md/jobs/", WITH_FRAGMENTS);
        let jobs = page.select(&selector("a.job"));
        page.set_style(jobs[0], outlined());

        let out = page.render();
        assert!(out.contains(
            r#"<a class="job" href="/job/1" style="outline: 3px solid red;">job</a><p id="plain">after</p>"#
        ));
        assert!(out.contains(r#"<a class="job" href="/job/0">hidden</a>"#));
    }

    #[test]
    fn test_undone_edit_renders_identical() {
        let before = Page::parse("https://jobber.md/jobs/", HTML).render();
        let mut page = Page::parse("https://jobber.md/jobs/", HTML);
        let jobs = page.select(&selector("a.job"));

        for &id in &jobs {
            let original = page.style(id).unwrap();
            let mut edited = original.clone();
            edited.set("outline", "3px solid red");
            page.set_style(id, edited);
            page.set_style(id, original);
        }

        assert_eq!(page.render(), before);
    }

    #[test]
    fn test_style_attribute_keeps_position() {
        let mut page = Page::parse("https://x/", r#"<a style="color: blue" href="/job/1">x</a>"#);
        let links = page.select(&selector("a"));
        let mut style = page.style(links[0]).unwrap();
        style.set("outline", "1px solid red");
        page.set_style(links[0], style);
        assert!(page.render().contains(
            r#"<a style="color: blue; outline: 1px solid red;" href="/job/1">x</a>"#
        ));
    }
}
