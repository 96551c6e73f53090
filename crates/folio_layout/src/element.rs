//! Element builders
//!
//! A fluent builder API for describing page markup:
//!
//! ```rust
//! use folio_layout::prelude::*;
//!
//! let card = div()
//!     .id("projects-card-0")
//!     .class("project-card")
//!     .child(h3("Portfolio"))
//!     .child(a("https://example.com").class("live-link").text("Live"));
//! assert_eq!(card.child_elements().len(), 2);
//! ```

use folio_core::Target;
use indexmap::IndexMap;

use crate::style::ElementStyle;

/// HTML tag of an element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Div,
    Section,
    Nav,
    Footer,
    Main,
    H1,
    H2,
    H3,
    P,
    Span,
    A,
    Button,
    Img,
    Iframe,
    Ul,
    Li,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Section => "section",
            Tag::Nav => "nav",
            Tag::Footer => "footer",
            Tag::Main => "main",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::P => "p",
            Tag::Span => "span",
            Tag::A => "a",
            Tag::Button => "button",
            Tag::Img => "img",
            Tag::Iframe => "iframe",
            Tag::Ul => "ul",
            Tag::Li => "li",
        }
    }

    /// Elements without a closing tag
    pub fn is_void(&self) -> bool {
        matches!(self, Tag::Img)
    }
}

/// Vertical size of an element for bounds computation
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Height {
    /// Sum of in-flow children (or one text line)
    #[default]
    Auto,
    Px(f32),
    /// Fraction of the viewport height
    Viewport(f32),
}

/// Whether an element takes up space in the document flow
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Flow {
    #[default]
    InFlow,
    /// Absolutely or fixed positioned; overlays its parent
    Overlay,
}

/// A markup element builder
#[derive(Clone, Debug)]
pub struct Element {
    tag: Tag,
    id: Option<Target>,
    classes: Vec<String>,
    attrs: IndexMap<String, String>,
    style: ElementStyle,
    text: Option<String>,
    children: Vec<Element>,
    height: Height,
    flow: Flow,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            attrs: IndexMap::new(),
            style: ElementStyle::default(),
            text: None,
            children: Vec::new(),
            height: Height::Auto,
            flow: Flow::InFlow,
        }
    }

    // =========================================================================
    // Identity & attributes
    // =========================================================================

    pub fn id(mut self, target: impl Into<Target>) -> Self {
        self.id = Some(target.into());
        self
    }

    /// Add one or more space-separated classes
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn aria_label(self, label: &str) -> Self {
        self.attr("aria-label", label)
    }

    // =========================================================================
    // Content
    // =========================================================================

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Element>,
    {
        self.children.extend(children);
        self
    }

    /// Add a child only when present
    pub fn child_opt(mut self, child: Option<Element>) -> Self {
        if let Some(child) = child {
            self.children.push(child);
        }
        self
    }

    // =========================================================================
    // Style & layout
    // =========================================================================

    pub fn style(mut self, style: ElementStyle) -> Self {
        self.style = self.style.merge(&style);
        self
    }

    pub fn height(mut self, height: Height) -> Self {
        self.height = height;
        self
    }

    pub fn h_px(self, px: f32) -> Self {
        self.height(Height::Px(px))
    }

    pub fn h_screen(self) -> Self {
        self.height(Height::Viewport(1.0))
    }

    pub fn overlay(mut self) -> Self {
        self.flow = Flow::Overlay;
        self
    }

    /// Apply `f` only when `condition` holds
    pub fn when(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self {
        if condition {
            f(self)
        } else {
            self
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn target(&self) -> Option<&Target> {
        self.id.as_ref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn attrs(&self) -> &IndexMap<String, String> {
        &self.attrs
    }

    pub fn get_style(&self) -> &ElementStyle {
        &self.style
    }

    pub fn get_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn child_elements(&self) -> &[Element] {
        &self.children
    }

    pub fn get_height(&self) -> Height {
        self.height
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub(crate) fn into_parts(self) -> (ElementParts, Vec<Element>) {
        (
            ElementParts {
                tag: self.tag,
                id: self.id,
                classes: self.classes,
                attrs: self.attrs,
                style: self.style,
                text: self.text,
                height: self.height,
                flow: self.flow,
            },
            self.children,
        )
    }
}

/// An element without its children, as stored in the render tree
#[derive(Clone, Debug)]
pub struct ElementParts {
    pub tag: Tag,
    pub id: Option<Target>,
    pub classes: Vec<String>,
    pub attrs: IndexMap<String, String>,
    pub style: ElementStyle,
    pub text: Option<String>,
    pub height: Height,
    pub flow: Flow,
}

pub fn div() -> Element {
    Element::new(Tag::Div)
}

pub fn section(id: impl Into<Target>) -> Element {
    Element::new(Tag::Section).id(id)
}

pub fn nav() -> Element {
    Element::new(Tag::Nav)
}

pub fn footer() -> Element {
    Element::new(Tag::Footer)
}

pub fn main_content() -> Element {
    Element::new(Tag::Main)
}

pub fn h1(text: impl Into<String>) -> Element {
    Element::new(Tag::H1).text(text)
}

pub fn h2(text: impl Into<String>) -> Element {
    Element::new(Tag::H2).text(text)
}

pub fn h3(text: impl Into<String>) -> Element {
    Element::new(Tag::H3).text(text)
}

pub fn p(text: impl Into<String>) -> Element {
    Element::new(Tag::P).text(text)
}

pub fn span(text: impl Into<String>) -> Element {
    Element::new(Tag::Span).text(text)
}

pub fn a(href: impl Into<String>) -> Element {
    Element::new(Tag::A).attr("href", href)
}

/// Link opening in a new tab
pub fn external_link(href: impl Into<String>) -> Element {
    a(href)
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
}

pub fn button() -> Element {
    Element::new(Tag::Button).attr("type", "button")
}

pub fn img(src: impl Into<String>, alt: impl Into<String>) -> Element {
    Element::new(Tag::Img).attr("src", src).attr("alt", alt)
}

pub fn iframe(src: impl Into<String>, title: impl Into<String>) -> Element {
    Element::new(Tag::Iframe)
        .attr("src", src)
        .attr("title", title)
        .attr("loading", "lazy")
}

pub fn ul() -> Element {
    Element::new(Tag::Ul)
}

pub fn li() -> Element {
    Element::new(Tag::Li)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_split_on_whitespace() {
        let el = div().class("card  glass").class("hover");
        assert_eq!(el.classes(), ["card", "glass", "hover"]);
    }

    #[test]
    fn test_attributes_keep_insertion_order() {
        let link = external_link("https://github.com");
        let names: Vec<&str> = link.attrs().keys().map(String::as_str).collect();
        assert_eq!(names, ["href", "target", "rel"]);
    }

    #[test]
    fn test_when_and_child_opt() {
        let el = div()
            .when(false, |d| d.class("open"))
            .child_opt(None)
            .child_opt(Some(span("x")));
        assert!(el.classes().is_empty());
        assert_eq!(el.child_elements().len(), 1);
    }
}
