//! Serializable tree descriptions.
//!
//! A description is plain data that can be deserialized (for example from
//! JSON) and then built into validated nodes through the tag catalog:
//!
//! ```json
//! {
//!   "tag": "a",
//!   "attrs": { "href": "/", "data-count": 3 },
//!   "text": "Home",
//!   "children": [null, { "tag": "br" }]
//! }
//! ```
//!
//! `null` stands for a [`Node::Null`]. Attribute order follows the input.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::NodeError;
use crate::node::{Attributes, Element, Node};

/// Scalar attribute value as it appears in a description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
            Self::Str(v) => f.write_str(v),
        }
    }
}

/// Description of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementDescription {
    pub tag: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: IndexMap<String, AttrValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeDescription>>,
}

impl ElementDescription {
    pub fn build(&self) -> Result<Element, NodeError> {
        let attributes: Attributes = self.attrs.iter().map(|(k, v)| (k.as_str(), v)).collect();
        let children = self
            .children
            .as_ref()
            .map(|children| {
                children
                    .iter()
                    .map(NodeDescription::build)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        Element::from_tag_name(&self.tag, self.text.clone(), children, attributes)
    }
}

/// Description of a node; `None` is the null node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeDescription(pub Option<ElementDescription>);

impl NodeDescription {
    pub fn build(&self) -> Result<Node, NodeError> {
        Ok(match &self.0 {
            Some(element) => Node::Element(element.build()?),
            None => Node::Null,
        })
    }
}

/// Description of a full document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default)]
    pub head: Vec<NodeDescription>,
    #[serde(default)]
    pub body: Vec<NodeDescription>,
}

impl DocumentDescription {
    /// Build the document, using `default_lang` unless the description sets one.
    pub fn build(&self, default_lang: &str) -> Result<Document, NodeError> {
        let head = self
            .head
            .iter()
            .map(NodeDescription::build)
            .collect::<Result<Vec<_>, _>>()?;
        let body = self
            .body
            .iter()
            .map(NodeDescription::build)
            .collect::<Result<Vec<_>, _>>()?;
        Document::builder()
            .lang(self.lang.as_deref().unwrap_or(default_lang))
            .head(head)
            .body(body)
            .build()
    }
}
