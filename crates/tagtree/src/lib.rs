//! Lazy, indented HTML serialization of validated node trees.
//!
//! Build a tree of [`Element`]s (checked against their [`TagSpec`] when
//! constructed), then pull its rendering chunk by chunk with
//! [`Element::render`]. Nothing is materialized up front: the renderer walks
//! the tree on demand and yields borrowed string slices.
//!
//! # Architecture
//!
//! - [`escape`]: text and attribute escaping, marker-prefixed attribute names
//! - [`tag`]: variant rules ([`TagSpec`]) and the built-in catalog
//! - [`Element`] / [`Node`]: the validated tree; [`Node::Null`] renders nothing
//! - [`Render`]: the lazy serializer
//! - [`Document`]: doctype + `html`/`head`/`body` skeleton
//! - [`HtmlReader`]: pull-based byte encoding of any rendering
//!
//! With the `serde` feature, [`description`] builds trees from deserialized data.
//!
//! # Example
//!
//! ```
//! use tagtree::{Element, Node, document, tag};
//!
//! let link = Element::builder(tag::A)
//!     .attr("href", "https://example.com")
//!     .text("a <b> & c")
//!     .build()
//!     .unwrap();
//! assert_eq!(
//!     link.to_html(),
//!     "<a href=\"https://example.com\">\n  a &lt;b&gt; & c\n</a>\n"
//! );
//!
//! let doc = document([link], Vec::<Node>::new()).unwrap();
//! let mut out = String::new();
//! for chunk in doc.render() {
//!     out.push_str(chunk);
//! }
//! assert_eq!(out, doc.to_string());
//! ```

#[cfg(feature = "serde")]
pub mod description;
mod document;
mod error;
pub mod escape;
mod node;
mod reader;
mod render;
pub mod tag;

pub use document::{DEFAULT_LANG, DOCTYPE, Document, DocumentBuilder, DocumentRender, document};
pub use error::{NodeError, ReaderError};
pub use escape::{encode_attr_name, encode_attr_value, escape_text};
pub use node::{Attributes, Element, ElementBuilder, Node};
pub use reader::{HtmlReader, resolve_encoding};
pub use render::Render;
pub use tag::TagSpec;
