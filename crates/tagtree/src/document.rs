//! Full-document skeleton around caller-supplied head and body nodes.

use std::fmt;
use std::iter::{Chain, FusedIterator, Once};

use crate::error::NodeError;
use crate::node::{Element, Node};
use crate::reader::HtmlReader;
use crate::render::Render;
use crate::tag::{BODY, HEAD, HTML, META};

/// Doctype line emitted before the root element.
pub const DOCTYPE: &str = "<!DOCTYPE html>\n";

/// Default `lang` attribute of the root element.
pub const DEFAULT_LANG: &str = "en";

const VIEWPORT: &str = "width=device-width, initial-scale=1";

/// A doctype plus an `html` root holding `head` and `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    #[must_use]
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// The `html` root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Lazily render the doctype and the tree.
    pub fn render(&self) -> DocumentRender<'_> {
        DocumentRender {
            inner: std::iter::once(DOCTYPE).chain(self.root.render()),
        }
    }

    pub fn reader(&self) -> HtmlReader<'_, DocumentRender<'_>> {
        HtmlReader::new(self.render())
    }

    pub fn to_html(&self) -> String {
        self.render().collect()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render().try_for_each(|chunk| f.write_str(chunk))
    }
}

/// Assembles a [`Document`].
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    lang: String,
    head: Vec<Node>,
    body: Vec<Node>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG.to_owned(),
            head: Vec::new(),
            body: Vec::new(),
        }
    }
}

impl DocumentBuilder {
    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Append nodes after the fixed `meta` tags in `head`.
    #[must_use]
    pub fn head<N: Into<Node>>(mut self, nodes: impl IntoIterator<Item = N>) -> Self {
        self.head.extend(nodes.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn body<N: Into<Node>>(mut self, nodes: impl IntoIterator<Item = N>) -> Self {
        self.body.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<Document, NodeError> {
        tracing::debug!(
            lang = %self.lang,
            head = self.head.len(),
            body = self.body.len(),
            "Composing document"
        );

        let charset = Element::builder(META).attr("charset", "utf-8").build()?;
        let viewport = Element::builder(META)
            .attr("name", "viewport")
            .attr("content", VIEWPORT)
            .build()?;
        let head = Element::builder(HEAD)
            .child(charset)
            .child(viewport)
            .children(self.head)
            .build()?;
        let body = Element::builder(BODY).children(self.body).build()?;
        let root = Element::builder(HTML)
            .attr("lang", self.lang)
            .child(head)
            .child(body)
            .build()?;

        Ok(Document { root })
    }
}

/// Wrap body and head nodes in the standard document skeleton.
///
/// # Examples
///
/// ```
/// use tagtree::{Element, document, tag};
///
/// let title = Element::builder(tag::TITLE).text("Hi").build().unwrap();
/// let doc = document(Vec::<tagtree::Node>::new(), [title]).unwrap();
/// assert!(doc.to_html().starts_with("<!DOCTYPE html>\n<html lang=\"en\">\n"));
/// ```
pub fn document<B, H>(
    body: impl IntoIterator<Item = B>,
    head: impl IntoIterator<Item = H>,
) -> Result<Document, NodeError>
where
    B: Into<Node>,
    H: Into<Node>,
{
    Document::builder().head(head).body(body).build()
}

/// Lazy chunk iterator over a rendered [`Document`].
#[derive(Debug, Clone)]
pub struct DocumentRender<'a> {
    inner: Chain<Once<&'a str>, Render<'a>>,
}

impl<'a> DocumentRender<'a> {
    pub fn chars(self) -> impl Iterator<Item = char> + 'a {
        self.flat_map(str::chars)
    }
}

impl<'a> Iterator for DocumentRender<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next()
    }
}

impl FusedIterator for DocumentRender<'_> {}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tag::{SCRIPT, SPAN};

    const EMPTY: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
  </head>
  <body>
  </body>
</html>
"#;

    fn no_nodes() -> Vec<Node> {
        Vec::new()
    }

    #[test]
    fn test_empty_document() {
        let doc = document(no_nodes(), no_nodes()).unwrap();
        assert_eq!(doc.to_html(), EMPTY);
        assert_eq!(doc.to_html(), doc.to_html());
    }

    #[test]
    fn test_nonempty_document() {
        let doc = document(
            [Element::builder(SPAN).text("abcd").build().unwrap()],
            [Element::builder(SCRIPT)
                .text(r#"console.log("hello")"#)
                .build()
                .unwrap()],
        )
        .unwrap();

        assert_eq!(
            doc.to_html(),
            r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <script>
      console.log("hello")
    </script>
  </head>
  <body>
    <span>
      abcd
    </span>
  </body>
</html>
"#
        );
    }

    #[test]
    fn test_null_nodes_in_body() {
        let doc = document([Node::Null, Node::Null], no_nodes()).unwrap();
        assert_eq!(doc.to_html(), EMPTY);
    }

    #[test]
    fn test_custom_lang() {
        let doc = Document::builder().lang("nl").build().unwrap();
        assert!(doc.to_html().contains("<html lang=\"nl\">\n"));
        assert_eq!(doc.root().attributes().get("lang"), Some("nl"));
    }

    #[test]
    fn test_mutate_body_after_build() {
        let mut doc = document(no_nodes(), no_nodes()).unwrap();
        let body = doc.root_mut().children_mut().unwrap()[1]
            .as_element_mut()
            .unwrap();
        body.append_child(Element::builder(SPAN).build().unwrap())
            .unwrap();
        assert!(doc.to_html().contains("  <body>\n    <span>\n    </span>\n  </body>\n"));
    }

    #[test]
    fn test_document_reader_and_display() {
        let doc = document(no_nodes(), no_nodes()).unwrap();
        let mut out = String::new();
        doc.reader().read_to_string(&mut out).unwrap();
        assert_eq!(out, EMPTY);
        assert_eq!(doc.to_string(), EMPTY);
        assert_eq!(doc.render().chars().collect::<String>(), EMPTY);
    }
}
