//! Error types for node construction and byte encoding.

/// Structural validation failure raised when building an element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    /// One or more of the variant's required attributes were not supplied.
    #[error("missing required attrs {missing:?} for tag \"{tag}\"")]
    MissingRequiredAttributes {
        /// Tag name of the variant.
        tag: &'static str,
        /// Missing attribute names, in declaration order.
        missing: Vec<&'static str>,
    },
    /// Text or children were supplied to a void element.
    #[error("text and children are prohibited for void tag \"{tag}\"")]
    VoidContent {
        /// Tag name of the variant.
        tag: &'static str,
    },
    /// A custom variant was declared with an empty tag name.
    #[error("tag name cannot be empty")]
    EmptyTagName,
    /// No built-in variant has this name.
    #[error("unknown tag \"{0}\"")]
    UnknownTag(String),
}

/// Failure to set up byte encoding for rendered output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReaderError {
    /// The label does not name an encoding known to `encoding_rs`.
    #[error("unknown encoding \"{0}\"")]
    UnknownEncoding(String),
}
