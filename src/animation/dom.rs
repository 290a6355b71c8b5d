// Page region model.
// The presentational layer hands regions over as element trees; layout is
// queried separately at scroll time.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub String);

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An element with its attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Identifies a mounted region across mount/unmount calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionHandle(pub String);

impl From<&str> for RegionHandle {
    fn from(handle: &str) -> Self {
        Self(handle.to_string())
    }
}

impl fmt::Display for RegionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bounded subtree of the page whose triggers live and die together.
#[derive(Debug, Clone)]
pub struct Region {
    pub handle: RegionHandle,
    pub root: Element,
}

impl Region {
    pub fn new(handle: impl Into<RegionHandle>, root: Element) -> Self {
        Self {
            handle: handle.into(),
            root,
        }
    }

    /// All elements, depth-first in document order, root included.
    pub fn elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack = vec![&self.root];
        while let Some(element) = stack.pop() {
            out.push(element);
            stack.extend(element.children.iter().rev());
        }
        out
    }
}

/// Vertical placement of an element relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub height: f64,
}

/// Where elements currently sit on screen.
pub trait Layout {
    fn bounds(&self, element: &ElementId) -> Option<Bounds>;
}

impl Layout for HashMap<ElementId, Bounds> {
    fn bounds(&self, element: &ElementId) -> Option<Bounds> {
        self.get(element).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_document_order() {
        let region = Region::new(
            "about",
            Element::new("root")
                .with_child(Element::new("a").with_child(Element::new("a1")))
                .with_child(Element::new("b")),
        );

        let ids: Vec<&str> = region.elements().iter().map(|e| e.id.0.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "a1", "b"]);
    }

    #[test]
    fn test_attr_lookup() {
        let element = Element::new("stat").with_attr("data-count", "250");
        assert_eq!(element.attr("data-count"), Some("250"));
        assert_eq!(element.attr("data-parallax"), None);
    }
}
