//! Read-only element queries over a GPX document.
//!
//! Parsing is delegated to `roxmltree`. Tags are matched by local name, so
//! `<gpx:trk>` and `<trk>` answer the same queries.

use crate::error::GpxParseError;

/// A parsed XML document.
pub struct Document<'input> {
    inner: roxmltree::Document<'input>,
}

impl<'input> Document<'input> {
    /// Parse XML text into a tree. Fails if the text is not well-formed.
    pub fn parse(xml: &'input str) -> Result<Self, GpxParseError> {
        let parse_options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let inner = roxmltree::Document::parse_with_options(xml, parse_options)?;
        Ok(Self { inner })
    }

    pub fn root(&self) -> Element<'_, 'input> {
        Element(self.inner.root_element())
    }
}

/// A handle to one element of a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct Element<'a, 'input: 'a>(roxmltree::Node<'a, 'input>);

impl<'a, 'input: 'a> Element<'a, 'input> {
    pub fn tag(self) -> &'a str {
        self.0.tag_name().name()
    }

    pub fn attribute(self, name: &str) -> Option<&'a str> {
        self.0.attribute(name)
    }

    /// Direct element children, in document order.
    pub fn children(self) -> impl Iterator<Item = Element<'a, 'input>> + 'a {
        self.0.children().filter(|n| n.is_element()).map(Element)
    }

    /// All descendant elements in document order, excluding `self`.
    pub fn descendants(self) -> impl Iterator<Item = Element<'a, 'input>> + 'a {
        self.0
            .descendants()
            .skip(1)
            .filter(|n| n.is_element())
            .map(Element)
    }

    pub fn find_first(self, tag: &str) -> Option<Element<'a, 'input>> {
        self.descendants().find(|e| e.tag() == tag)
    }

    pub fn find_all(self, tag: &'a str) -> impl Iterator<Item = Element<'a, 'input>> + 'a {
        self.descendants().filter(move |e| e.tag() == tag)
    }

    /// Find `tag` under this element, preferring a direct child when the tag
    /// also occurs deeper (e.g. a track's own `<type>` vs. its link's `<type>`).
    ///
    /// With a single match anywhere, that match is returned. With several, the
    /// last direct child carrying the tag wins; if no direct child carries it,
    /// the first descendant match is kept.
    pub fn find_direct(self, tag: &str) -> Option<Element<'a, 'input>> {
        let mut matches = self.descendants().filter(|e| e.tag() == tag);
        let first = matches.next()?;
        if matches.next().is_none() {
            return Some(first);
        }
        Some(self.children().filter(|c| c.tag() == tag).last().unwrap_or(first))
    }

    /// Concatenated character data of this element and all its descendants.
    pub fn text(self) -> String {
        self.0
            .descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect()
    }

    /// Text of the first descendant named `tag`, if any.
    pub fn value_of(self, tag: &str) -> Option<String> {
        self.find_first(tag).map(Element::text)
    }
}
