//! Pull-based byte reader over rendered output.

use std::borrow::Cow;
use std::io;

use encoding_rs::{Encoding, UTF_8};

use crate::error::ReaderError;

/// Encodes a lazy chunk sequence into bytes on demand.
///
/// Each [`fill_buffer`](Self::fill_buffer) call fills the destination
/// completely unless the underlying sequence runs out, so a short count means
/// end of stream. Encoded bytes that do not fit are kept and written first on
/// the next call; a multi-byte character may therefore straddle two buffers.
///
/// Encodings are resolved by WHATWG label through `encoding_rs`. Characters the
/// target encoding cannot represent are written as numeric character
/// references, and decode-only encodings (UTF-16) produce UTF-8.
///
/// # Examples
///
/// ```
/// use std::io::Read;
/// use tagtree::{Element, tag};
///
/// let br = Element::builder(tag::BR).build().unwrap();
/// let mut out = String::new();
/// br.reader().read_to_string(&mut out).unwrap();
/// assert_eq!(out, "<br>\n");
/// ```
pub struct HtmlReader<'a, I> {
    chunks: I,
    encoding: &'static Encoding,
    pending: Cow<'a, [u8]>,
    pos: usize,
}

impl<'a, I> HtmlReader<'a, I>
where
    I: Iterator<Item = &'a str>,
{
    /// Reader producing UTF-8.
    pub fn new(chunks: impl IntoIterator<IntoIter = I>) -> Self {
        Self::with_encoding(chunks, UTF_8)
    }

    pub fn with_encoding(chunks: impl IntoIterator<IntoIter = I>, encoding: &'static Encoding) -> Self {
        Self {
            chunks: chunks.into_iter(),
            encoding,
            pending: Cow::Borrowed(&[]),
            pos: 0,
        }
    }

    /// Reader producing the encoding named by `label` (e.g. `"utf-8"`, `"latin1"`).
    pub fn with_label(
        chunks: impl IntoIterator<IntoIter = I>,
        label: &str,
    ) -> Result<Self, ReaderError> {
        let encoding = resolve_encoding(label)?;
        Ok(Self::with_encoding(chunks, encoding))
    }

    /// Encoding that bytes are actually written in.
    pub fn output_encoding(&self) -> &'static Encoding {
        self.encoding.output_encoding()
    }

    /// Write up to `buf.len()` bytes and return how many were written.
    ///
    /// Returns less than `buf.len()`, possibly zero, only once the rendered
    /// sequence is exhausted.
    pub fn fill_buffer(&mut self, buf: &mut [u8]) -> usize {
        let mut written = 0;
        while written < buf.len() {
            if self.pos == self.pending.len() {
                let Some(chunk) = self.chunks.next() else {
                    break;
                };
                let (bytes, _, _) = self.encoding.encode(chunk);
                self.pending = bytes;
                self.pos = 0;
                continue;
            }
            let n = (buf.len() - written).min(self.pending.len() - self.pos);
            buf[written..written + n].copy_from_slice(&self.pending[self.pos..self.pos + n]);
            written += n;
            self.pos += n;
        }
        written
    }
}

impl<'a, I> io::Read for HtmlReader<'a, I>
where
    I: Iterator<Item = &'a str>,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.fill_buffer(buf))
    }
}

/// Look up an encoding by WHATWG label.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, ReaderError> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ReaderError::UnknownEncoding(label.to_owned()))?;
    tracing::debug!(
        label,
        encoding = encoding.name(),
        output = encoding.output_encoding().name(),
        "Resolved output encoding"
    );
    Ok(encoding)
}
