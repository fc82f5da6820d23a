//! Tree entities: validated elements and the null placeholder.

use std::fmt;

use indexmap::IndexMap;

use crate::error::NodeError;
use crate::escape::encode_attr_name;
use crate::reader::HtmlReader;
use crate::render::Render;
use crate::tag::{self, TagSpec};

/// Insertion-ordered attribute map.
///
/// Values are stringified when inserted. Inserting an existing name replaces
/// its value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, returning the previous value if the name existed.
    pub fn insert(&mut self, name: impl Into<String>, value: impl fmt::Display) -> Option<String> {
        self.0.insert(name.into(), value.to_string())
    }

    /// Insert an attribute whose name uses the `_` marker convention.
    ///
    /// See [`encode_attr_name`]: `_data_count` is stored as `data-count`.
    pub fn insert_marked(&mut self, raw_name: &str, value: impl fmt::Display) -> Option<String> {
        self.insert(encode_attr_name(raw_name), value)
    }

    /// Chainable [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Remove an attribute, keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(name, value)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

impl<K: Into<String>, V: fmt::Display, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// A validated markup element.
///
/// Construction checks the variant's rules once. Afterwards the owner may
/// change attributes, text and children freely; those changes are not
/// re-validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    spec: TagSpec,
    attributes: Attributes,
    text: Option<String>,
    children: Option<Vec<Node>>,
}

impl Element {
    /// Build an element of the given variant.
    ///
    /// Fails if the variant is void and text or children were supplied, or if
    /// any of the variant's required attributes is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagtree::{Attributes, Element, NodeError, tag};
    ///
    /// let link = Element::new(tag::A, None, None, Attributes::from([("href", "/")]));
    /// assert!(link.is_ok());
    ///
    /// let err = Element::new(tag::A, None, None, Attributes::new()).unwrap_err();
    /// assert!(matches!(err, NodeError::MissingRequiredAttributes { .. }));
    /// ```
    pub fn new(
        spec: TagSpec,
        text: Option<String>,
        children: Option<Vec<Node>>,
        attributes: Attributes,
    ) -> Result<Self, NodeError> {
        if spec.name().is_empty() {
            return Err(NodeError::EmptyTagName);
        }

        // Empty text counts as absent; any supplied child list does not.
        let has_text = text.as_deref().is_some_and(|t| !t.is_empty());
        if spec.is_void() && (has_text || children.is_some()) {
            return Err(NodeError::VoidContent { tag: spec.name() });
        }

        let missing: Vec<&'static str> = spec
            .required_attrs()
            .iter()
            .copied()
            .filter(|name| !attributes.contains(name))
            .collect();
        if !missing.is_empty() {
            return Err(NodeError::MissingRequiredAttributes {
                tag: spec.name(),
                missing,
            });
        }

        let children = if spec.is_void() {
            None
        } else {
            Some(children.unwrap_or_default())
        };

        Ok(Self {
            spec,
            attributes,
            text,
            children,
        })
    }

    /// Build an element of a catalog variant looked up by tag name.
    pub fn from_tag_name(
        name: &str,
        text: Option<String>,
        children: Option<Vec<Node>>,
        attributes: Attributes,
    ) -> Result<Self, NodeError> {
        let spec = tag::lookup(name).ok_or_else(|| NodeError::UnknownTag(name.to_owned()))?;
        Self::new(*spec, text, children, attributes)
    }

    /// Start building an element of the given variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagtree::{Element, tag};
    ///
    /// let div = Element::builder(tag::DIV)
    ///     .attr("class", "note")
    ///     .text("hi")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(div.to_html(), "<div class=\"note\">\n  hi\n</div>\n");
    /// ```
    #[must_use]
    pub fn builder(spec: TagSpec) -> ElementBuilder {
        ElementBuilder::new(spec)
    }

    pub fn spec(&self) -> &TagSpec {
        &self.spec
    }

    pub fn tag_name(&self) -> &'static str {
        self.spec.name()
    }

    pub fn is_void(&self) -> bool {
        self.spec.is_void()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replace the text content. Not re-validated against the variant.
    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    /// Child nodes; `None` for void elements, never `None` otherwise.
    pub fn children(&self) -> Option<&[Node]> {
        self.children.as_deref()
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        self.children.as_mut()
    }

    /// Append a child node.
    ///
    /// Void elements have no child list and reject the append.
    pub fn append_child(&mut self, child: impl Into<Node>) -> Result<&mut Self, NodeError> {
        let tag = self.tag_name();
        self.children
            .as_mut()
            .ok_or(NodeError::VoidContent { tag })?
            .push(child.into());
        Ok(self)
    }

    /// Lazily render this element at column 0.
    pub fn render(&self) -> Render<'_> {
        self.render_at(0)
    }

    /// Lazily render this element starting at the given column.
    pub fn render_at(&self, indent: usize) -> Render<'_> {
        Render::element(self, indent)
    }

    /// Byte reader over the UTF-8 rendering of this element.
    pub fn reader(&self) -> HtmlReader<'_, Render<'_>> {
        HtmlReader::new(self.render())
    }

    /// Collect the rendering into a string.
    pub fn to_html(&self) -> String {
        self.render().collect()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render().try_for_each(|chunk| f.write_str(chunk))
    }
}

/// Incremental [`Element`] construction; validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    spec: TagSpec,
    attributes: Attributes,
    text: Option<String>,
    children: Option<Vec<Node>>,
}

impl ElementBuilder {
    fn new(spec: TagSpec) -> Self {
        Self {
            spec,
            attributes: Attributes::new(),
            text: None,
            children: None,
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Add an attribute using the `_` marker naming convention.
    #[must_use]
    pub fn marked_attr(mut self, raw_name: &str, value: impl fmt::Display) -> Self {
        self.attributes.insert_marked(raw_name, value);
        self
    }

    #[must_use]
    pub fn attrs(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child.into());
        self
    }

    #[must_use]
    pub fn children<N: Into<Node>>(mut self, children: impl IntoIterator<Item = N>) -> Self {
        self.children
            .get_or_insert_with(Vec::new)
            .extend(children.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<Element, NodeError> {
        Element::new(self.spec, self.text, self.children, self.attributes)
    }
}

/// A position in a child list: a real element or a zero-output placeholder.
///
/// `Null` is useful for conditional composition:
///
/// ```
/// use tagtree::{Element, Node, tag};
///
/// let show_banner = false;
/// let banner: Node = show_banner
///     .then(|| Element::builder(tag::DIV).text("banner").build())
///     .transpose()
///     .unwrap()
///     .into();
/// assert!(banner.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Null,
}

impl Node {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Null => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Null => None,
        }
    }

    pub fn render(&self) -> Render<'_> {
        self.render_at(0)
    }

    pub fn render_at(&self, indent: usize) -> Render<'_> {
        Render::node(self, indent)
    }

    pub fn reader(&self) -> HtmlReader<'_, Render<'_>> {
        HtmlReader::new(self.render())
    }

    pub fn to_html(&self) -> String {
        self.render().collect()
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<Option<Element>> for Node {
    fn from(element: Option<Element>) -> Self {
        element.map_or(Self::Null, Self::Element)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render().try_for_each(|chunk| f.write_str(chunk))
    }
}
