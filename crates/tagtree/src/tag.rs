//! Tag variants and the built-in catalog.
//!
//! A [`TagSpec`] fixes everything about an element that is not per-instance
//! data: its name, whether it is void, which attributes it requires, and how
//! its text is escaped and indented. Specs are `const`-constructible so custom
//! variants can be declared next to the built-in ones:
//!
//! ```
//! use tagtree::TagSpec;
//!
//! const PRE: TagSpec = TagSpec::new("pre").with_indent_text(false);
//! assert_eq!(PRE.name(), "pre");
//! ```

/// Default number of columns a node's text and children are indented by.
pub const DEFAULT_CHILD_INDENT: usize = 2;

/// Per-variant rules for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpec {
    name: &'static str,
    is_void: bool,
    required_attrs: &'static [&'static str],
    indent_text: bool,
    escape_text: bool,
    child_indent: usize,
}

impl TagSpec {
    /// Non-void variant with no required attributes and default text handling.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            is_void: false,
            required_attrs: &[],
            indent_text: true,
            escape_text: true,
            child_indent: DEFAULT_CHILD_INDENT,
        }
    }

    /// Void (self-closing) variant.
    #[must_use]
    pub const fn void(name: &'static str) -> Self {
        Self {
            is_void: true,
            ..Self::new(name)
        }
    }

    #[must_use]
    pub const fn with_required(mut self, attrs: &'static [&'static str]) -> Self {
        self.required_attrs = attrs;
        self
    }

    #[must_use]
    pub const fn with_indent_text(mut self, indent_text: bool) -> Self {
        self.indent_text = indent_text;
        self
    }

    #[must_use]
    pub const fn with_escape_text(mut self, escape_text: bool) -> Self {
        self.escape_text = escape_text;
        self
    }

    #[must_use]
    pub const fn with_child_indent(mut self, child_indent: usize) -> Self {
        self.child_indent = child_indent;
        self
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn is_void(&self) -> bool {
        self.is_void
    }

    pub const fn required_attrs(&self) -> &'static [&'static str] {
        self.required_attrs
    }

    /// Whether text participates in indentation.
    pub const fn indent_text(&self) -> bool {
        self.indent_text
    }

    /// Whether `<` and `>` in text are replaced with entities.
    pub const fn escape_text(&self) -> bool {
        self.escape_text
    }

    /// Columns added for this element's text and children.
    pub const fn child_indent(&self) -> usize {
        self.child_indent
    }
}

pub const A: TagSpec = TagSpec::new("a").with_required(&["href"]);
pub const BODY: TagSpec = TagSpec::new("body");
pub const BR: TagSpec = TagSpec::void("br");
pub const BUTTON: TagSpec = TagSpec::new("button");
pub const DIV: TagSpec = TagSpec::new("div");
pub const FORM: TagSpec = TagSpec::new("form");
pub const H1: TagSpec = TagSpec::new("h1");
pub const H2: TagSpec = TagSpec::new("h2");
pub const H3: TagSpec = TagSpec::new("h3");
pub const H4: TagSpec = TagSpec::new("h4");
pub const H5: TagSpec = TagSpec::new("h5");
pub const H6: TagSpec = TagSpec::new("h6");
pub const HEAD: TagSpec = TagSpec::new("head");
pub const HR: TagSpec = TagSpec::void("hr");
pub const HTML: TagSpec = TagSpec::new("html").with_required(&["lang"]);
pub const IMG: TagSpec = TagSpec::void("img").with_required(&["src", "alt"]);
pub const INPUT: TagSpec = TagSpec::void("input").with_required(&["type"]);
pub const LABEL: TagSpec = TagSpec::new("label").with_required(&["for"]);
pub const LI: TagSpec = TagSpec::new("li");
pub const META: TagSpec = TagSpec::void("meta");
pub const OL: TagSpec = TagSpec::new("ol");
pub const OPTION: TagSpec = TagSpec::new("option").with_required(&["value"]);
pub const P: TagSpec = TagSpec::new("p");
pub const SCRIPT: TagSpec = TagSpec::new("script").with_escape_text(false);
pub const SELECT: TagSpec = TagSpec::new("select");
pub const SOURCE: TagSpec = TagSpec::void("source");
pub const SPAN: TagSpec = TagSpec::new("span");
pub const STRONG: TagSpec = TagSpec::new("strong");
pub const STYLE: TagSpec = TagSpec::new("style").with_escape_text(false);
pub const TABLE: TagSpec = TagSpec::new("table");
pub const TBODY: TagSpec = TagSpec::new("tbody");
pub const TD: TagSpec = TagSpec::new("td");
pub const TEMPLATE: TagSpec = TagSpec::new("template");
pub const TEXTAREA: TagSpec = TagSpec::new("textarea").with_indent_text(false);
pub const TH: TagSpec = TagSpec::new("th");
pub const THEAD: TagSpec = TagSpec::new("thead");
pub const TITLE: TagSpec = TagSpec::new("title");
pub const TR: TagSpec = TagSpec::new("tr");
pub const UL: TagSpec = TagSpec::new("ul");

/// Every built-in variant, sorted by name.
pub static CATALOG: &[TagSpec] = &[
    A, BODY, BR, BUTTON, DIV, FORM, H1, H2, H3, H4, H5, H6, HEAD, HR, HTML, IMG, INPUT, LABEL, LI,
    META, OL, OPTION, P, SCRIPT, SELECT, SOURCE, SPAN, STRONG, STYLE, TABLE, TBODY, TD, TEMPLATE,
    TEXTAREA, TH, THEAD, TITLE, TR, UL,
];

/// Find a built-in variant by tag name.
///
/// # Examples
///
/// ```
/// use tagtree::tag;
///
/// assert!(tag::lookup("img").is_some_and(|spec| spec.is_void()));
/// assert!(tag::lookup("blink").is_none());
/// ```
pub fn lookup(name: &str) -> Option<&'static TagSpec> {
    CATALOG
        .binary_search_by(|spec| spec.name.cmp(name))
        .ok()
        .map(|idx| &CATALOG[idx])
}
