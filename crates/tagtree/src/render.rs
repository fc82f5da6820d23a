//! Lazy serialization of node trees.
//!
//! [`Render`] walks a tree with an explicit frame stack and yields borrowed
//! `&str` chunks: slices of tag names, attribute values and text taken straight
//! from the tree, plus static entity and padding strings. Nothing is formatted
//! into an intermediate buffer, and a consumer may stop pulling at any point.
//!
//! Every call to `render` builds a fresh iterator, so rendering the same tree
//! twice yields the same output. The iterator borrows the tree immutably for
//! its whole lifetime; the tree cannot change underneath it.
//!
//! Output layout for an element at column `n` with child indent `k`:
//!
//! ```text
//! <n spaces><tag attr="value">
//! <n+k spaces>text, re-indented after each newline
//! ...children at column n+k...
//! <n spaces></tag>
//! ```
//!
//! Void elements stop after the opening line.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::escape::{GT_ENTITY, LT_ENTITY, QUOTE_ENTITY, find_special};
use crate::node::{Element, Node};

const SPACES: &str = "                                                                ";

/// Progress through a single element.
#[derive(Debug, Clone, Copy)]
enum Step<'a> {
    Open,
    /// Unconsumed remainder of the text content.
    Text(&'a str),
    /// Index of the next child to descend into.
    Children(usize),
    Close,
}

#[derive(Debug, Clone, Copy)]
struct Frame<'a> {
    element: &'a Element,
    indent: usize,
    step: Step<'a>,
}

/// Lazy chunk iterator over the rendering of a node.
///
/// # Examples
///
/// ```
/// use tagtree::{Element, tag};
///
/// let div = Element::builder(tag::DIV)
///     .child(Element::builder(tag::SPAN).build().unwrap())
///     .build()
///     .unwrap();
/// let html: String = div.render().collect();
/// assert_eq!(html, "<div>\n  <span>\n  </span>\n</div>\n");
/// assert_eq!(div.render().chars().count(), html.chars().count());
/// ```
#[derive(Debug, Clone)]
pub struct Render<'a> {
    stack: Vec<Frame<'a>>,
    pending: VecDeque<&'a str>,
}

impl<'a> Render<'a> {
    pub(crate) fn element(element: &'a Element, indent: usize) -> Self {
        Self {
            stack: vec![Frame {
                element,
                indent,
                step: Step::Open,
            }],
            pending: VecDeque::new(),
        }
    }

    pub(crate) fn node(node: &'a Node, indent: usize) -> Self {
        match node {
            Node::Element(element) => Self::element(element, indent),
            Node::Null => Self {
                stack: Vec::new(),
                pending: VecDeque::from([""]),
            },
        }
    }

    /// Flatten the chunks into individual characters.
    pub fn chars(self) -> impl Iterator<Item = char> + 'a {
        self.flat_map(str::chars)
    }

    fn push(&mut self, chunk: &'a str) {
        if !chunk.is_empty() {
            self.pending.push_back(chunk);
        }
    }

    fn pad(&mut self, mut columns: usize) {
        while columns > 0 {
            let take = columns.min(SPACES.len());
            self.pending.push_back(&SPACES[..take]);
            columns -= take;
        }
    }

    fn push_attr_value(&mut self, value: &'a str) {
        for (i, part) in value.split('"').enumerate() {
            if i > 0 {
                self.push(QUOTE_ENTITY);
            }
            self.push(part);
        }
    }

    /// Run one step of the top frame. Returns `false` once the tree is done.
    fn advance(&mut self) -> bool {
        let Some(mut frame) = self.stack.pop() else {
            return false;
        };
        let element = frame.element;
        let spec = element.spec();
        let inner = frame.indent + spec.child_indent();
        let mut child = None;

        match frame.step {
            Step::Open => {
                self.pad(frame.indent);
                self.push("<");
                self.push(spec.name());
                for (name, value) in element.attributes().iter() {
                    self.push(" ");
                    self.push(name);
                    self.push("=\"");
                    self.push_attr_value(value);
                    self.push("\"");
                }
                self.push(">\n");

                frame.step = match element.text() {
                    Some(text) if !text.is_empty() => {
                        if spec.indent_text() {
                            self.pad(inner);
                        }
                        Step::Text(text)
                    }
                    _ => Step::Children(0),
                };
            }
            Step::Text(rest) => {
                match find_special(rest, spec.escape_text(), spec.indent_text()) {
                    None => {
                        self.push(rest);
                        self.push("\n");
                        frame.step = Step::Children(0);
                    }
                    Some(pos) => {
                        self.push(&rest[..pos]);
                        match rest.as_bytes()[pos] {
                            b'<' => self.push(LT_ENTITY),
                            b'>' => self.push(GT_ENTITY),
                            _ => {
                                self.push("\n");
                                self.pad(inner);
                            }
                        }
                        frame.step = Step::Text(&rest[pos + 1..]);
                    }
                }
            }
            Step::Children(idx) => match element.children().and_then(|c| c.get(idx)) {
                Some(Node::Element(next)) => {
                    frame.step = Step::Children(idx + 1);
                    child = Some(Frame {
                        element: next,
                        indent: inner,
                        step: Step::Open,
                    });
                }
                Some(Node::Null) => {
                    self.pending.push_back("");
                    frame.step = Step::Children(idx + 1);
                }
                None => frame.step = Step::Close,
            },
            Step::Close => {
                if !spec.is_void() {
                    self.pad(frame.indent);
                    self.push("</");
                    self.push(spec.name());
                    self.push(">\n");
                }
                return true;
            }
        }

        self.stack.push(frame);
        if let Some(child) = child {
            self.stack.push(child);
        }
        true
    }
}

impl<'a> Iterator for Render<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if let Some(chunk) = self.pending.pop_front() {
                return Some(chunk);
            }
            if !self.advance() {
                return None;
            }
        }
    }
}

impl FusedIterator for Render<'_> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::Attributes;
    use crate::tag::{self, A, BR, DIV, IMG, SCRIPT, SPAN, STYLE, TEXTAREA, TagSpec};

    fn el(spec: TagSpec) -> Element {
        Element::builder(spec).build().unwrap()
    }

    fn anchor(attrs: &[(&str, &str)], text: Option<&str>) -> Element {
        let attrs: Attributes = attrs.iter().copied().collect();
        Element::new(A, text.map(str::to_owned), None, attrs).unwrap()
    }

    #[test]
    fn test_present_required_attrs() {
        assert_eq!(
            anchor(&[("href", "http://example.com")], None).to_html(),
            "<a href=\"http://example.com\">\n</a>\n"
        );
    }

    #[test]
    fn test_multiple_attrs() {
        assert_eq!(
            anchor(&[("href", "http://example.com"), ("id", "some-id")], None).to_html(),
            "<a href=\"http://example.com\" id=\"some-id\">\n</a>\n"
        );
    }

    #[test]
    fn test_marked_attr_names() {
        let div = Element::builder(DIV)
            .marked_attr("_class", "container")
            .build()
            .unwrap();
        assert_eq!(div.to_html(), "<div class=\"container\">\n</div>\n");

        let div = Element::builder(DIV)
            .marked_attr("_data_count", 1)
            .build()
            .unwrap();
        assert_eq!(div.to_html(), "<div data-count=\"1\">\n</div>\n");
    }

    #[test]
    fn test_attr_names_emitted_verbatim() {
        let div = Element::builder(DIV).attr("-_test_key", "x").build().unwrap();
        assert_eq!(div.to_html(), "<div -_test_key=\"x\">\n</div>\n");
    }

    #[test]
    fn test_escaped_attr_value() {
        assert_eq!(
            anchor(&[("href", r#"http://"example".com"#)], None).to_html(),
            "<a href=\"http://&quot;example&quot;.com\">\n</a>\n"
        );
    }

    #[test]
    fn test_attr_value_ampersand_untouched() {
        assert_eq!(
            anchor(&[("href", "/?a=1&b=2")], None).to_html(),
            "<a href=\"/?a=1&b=2\">\n</a>\n"
        );
    }

    #[test]
    fn test_nonvoid_no_text_is_two_lines() {
        let html = el(SPAN).to_html();
        assert_eq!(html, "<span>\n</span>\n");
        assert_eq!(html.lines().count(), 2);
    }

    #[test]
    fn test_nonvoid_with_text() {
        assert_eq!(
            anchor(&[("href", "http://example.com")], Some("sample text")).to_html(),
            "<a href=\"http://example.com\">\n  sample text\n</a>\n"
        );
    }

    #[test]
    fn test_nonvoid_with_escaped_text() {
        assert_eq!(
            anchor(&[("href", "http://example.com")], Some("sample <text> & more")).to_html(),
            "<a href=\"http://example.com\">\n  sample &lt;text&gt; & more\n</a>\n"
        );
    }

    #[test]
    fn test_void_no_text() {
        assert_eq!(el(BR).to_html(), "<br>\n");
    }

    #[test]
    fn test_void_with_attrs() {
        let img = Element::builder(IMG)
            .attr("src", "a.png")
            .attr("alt", "An \"a\"")
            .build()
            .unwrap();
        assert_eq!(img.to_html(), "<img src=\"a.png\" alt=\"An &quot;a&quot;\">\n");
    }

    #[test]
    fn test_single_child() {
        let div = Element::builder(DIV).child(el(SPAN)).build().unwrap();
        assert_eq!(div.to_html(), "<div>\n  <span>\n  </span>\n</div>\n");
    }

    #[test]
    fn test_lots_of_complicated_kids() {
        let kids = (0..3).map(|i| {
            Element::builder(SPAN)
                .text(i.to_string())
                .attr("id", i)
                .marked_attr("_class", format!("style-{i}"))
                .child(Element::builder(SPAN).text((i + 1).to_string()).build().unwrap())
                .build()
                .unwrap()
        });
        let div = Element::builder(DIV).children(kids).build().unwrap();

        assert_eq!(
            div.to_html(),
            r#"<div>
  <span id="0" class="style-0">
    0
    <span>
      1
    </span>
  </span>
  <span id="1" class="style-1">
    1
    <span>
      2
    </span>
  </span>
  <span id="2" class="style-2">
    2
    <span>
      3
    </span>
  </span>
</div>
"#
        );
    }

    #[test]
    fn test_appending_children() {
        let mut div = el(DIV);
        div.append_child(Element::builder(SPAN).text("0").build().unwrap())
            .unwrap();
        div.children_mut().unwrap()[0]
            .as_element_mut()
            .unwrap()
            .append_child(Element::builder(SPAN).text("1").build().unwrap())
            .unwrap();

        assert_eq!(
            div.to_html(),
            r"<div>
  <span>
    0
    <span>
      1
    </span>
  </span>
</div>
"
        );
    }

    #[test]
    fn test_multiline_text_reindented() {
        let div = Element::builder(DIV)
            .child(Element::builder(SPAN).text("one\ntwo\n").build().unwrap())
            .build()
            .unwrap();
        assert_eq!(
            div.to_html(),
            "<div>\n  <span>\n    one\n    two\n    \n  </span>\n</div>\n"
        );
    }

    #[test]
    fn test_no_text_indent() {
        let textarea = Element::builder(TEXTAREA).text("ab\n  cd").build().unwrap();
        assert_eq!(textarea.to_html(), "<textarea>\nab\n  cd\n</textarea>\n");
    }

    #[test]
    fn test_no_text_indent_still_escapes() {
        let textarea = Element::builder(TEXTAREA).text("<b>").build().unwrap();
        assert_eq!(textarea.to_html(), "<textarea>\n&lt;b&gt;\n</textarea>\n");
    }

    #[test]
    fn test_raw_text_not_escaped() {
        let script = Element::builder(SCRIPT)
            .text("if (a < b) { console.log(\"<hi>\") }")
            .build()
            .unwrap();
        assert_eq!(
            script.to_html(),
            "<script>\n  if (a < b) { console.log(\"<hi>\") }\n</script>\n"
        );

        let style = Element::builder(STYLE).text("a > b {}").build().unwrap();
        assert_eq!(style.to_html(), "<style>\n  a > b {}\n</style>\n");
    }

    #[test]
    fn test_child_indent_is_relative_to_parent() {
        let inner = Element::builder(DIV).child(el(SPAN)).build().unwrap();
        let outer = Element::builder(DIV).child(inner).build().unwrap();
        let html = outer.render_at(3).collect::<String>();
        let lines: Vec<&str> = html.lines().collect();
        assert_eq!(lines[0], "   <div>");
        assert_eq!(lines[1], "     <div>");
        assert_eq!(lines[2], "       <span>");
    }

    #[test]
    fn test_custom_child_indent() {
        const WIDE: TagSpec = TagSpec::new("section").with_child_indent(4);
        let section = Element::builder(WIDE)
            .text("x")
            .child(el(SPAN))
            .build()
            .unwrap();
        assert_eq!(
            section.to_html(),
            "<section>\n    x\n    <span>\n    </span>\n</section>\n"
        );
    }

    #[test]
    fn test_deep_indent_beyond_padding_chunk() {
        let html = el(BR).render_at(150).collect::<String>();
        assert_eq!(html, format!("{}<br>\n", " ".repeat(150)));
    }

    #[test]
    fn test_null_node_renders_single_empty_chunk() {
        let chunks: Vec<&str> = Node::Null.render().collect();
        assert_eq!(chunks, [""]);
        assert_eq!(Node::Null.to_html(), "");
    }

    #[test]
    fn test_null_node_among_children_contributes_nothing() {
        let with_null = Element::builder(DIV)
            .child(el(SPAN))
            .child(Node::Null)
            .child(el(BR))
            .build()
            .unwrap();
        let without = Element::builder(DIV)
            .child(el(SPAN))
            .child(el(BR))
            .build()
            .unwrap();
        assert_eq!(with_null.to_html(), without.to_html());
    }

    #[test]
    fn test_render_is_idempotent() {
        let div = Element::builder(DIV)
            .attr("class", "x")
            .text("a <b>\nc")
            .child(el(BR))
            .build()
            .unwrap();
        let first: String = div.render().collect();
        let second: String = div.render().collect();
        assert_eq!(first, second);
        assert_eq!(div.to_string(), first);
    }

    #[test]
    fn test_chars_matches_chunks() {
        let div = Element::builder(DIV).text("héllo <wörld>").build().unwrap();
        let from_chars: String = div.render().chars().collect();
        assert_eq!(from_chars, div.to_html());
    }

    #[test]
    fn test_consumer_may_stop_early() {
        let div = Element::builder(DIV).child(el(SPAN)).build().unwrap();
        let prefix: String = div.render().chars().take(5).collect();
        assert_eq!(prefix, "<div>");
    }

    #[test]
    fn test_every_catalog_variant_renders() {
        for spec in tag::CATALOG {
            let attrs: Attributes = spec.required_attrs().iter().map(|n| (*n, "v")).collect();
            let element = Element::new(*spec, None, None, attrs).unwrap();
            let html = element.to_html();
            assert!(html.starts_with(&format!("<{}", spec.name())));
            assert_eq!(
                html.ends_with(&format!("</{}>\n", spec.name())),
                !spec.is_void()
            );
        }
    }
}
