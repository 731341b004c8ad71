//! Fixed-capacity text slot backing one half of a double-buffered line.
//!
//! A slot reserves [`BUFFER_SIZE`] bytes, one of which is the terminator the
//! display layer expects, so the usable capacity is [`LINE_CAPACITY`] bytes of
//! UTF-8. Writes never exceed it: oversized text is cut at the last character
//! boundary that fits.

use crate::WatchError;
use tracing::warn;

/// Bytes reserved per slot, terminator included.
pub const BUFFER_SIZE: usize = 44;

/// Bytes of text a slot can hold.
pub const LINE_CAPACITY: usize = BUFFER_SIZE - 1;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: heapless::String<LINE_CAPACITY>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Replace the contents, truncating text that does not fit.
    ///
    /// Returns `true` when the text had to be truncated.
    pub fn set_truncating(&mut self, value: &str) -> bool {
        let fitted = fit_to_capacity(value);
        let truncated = fitted.len() < value.len();
        if truncated {
            warn!(
                "line text is {} bytes, truncated to {}: {:?}",
                value.len(),
                fitted.len(),
                fitted
            );
        }
        self.write(fitted);
        truncated
    }

    /// Replace the contents, refusing text that does not fit.
    ///
    /// On error the previous contents are kept.
    pub fn try_set(&mut self, value: &str) -> Result<(), WatchError> {
        if value.len() > LINE_CAPACITY {
            return Err(WatchError::FormatOverflow {
                len: value.len(),
                capacity: LINE_CAPACITY,
            });
        }
        self.write(value);
        Ok(())
    }

    fn write(&mut self, value: &str) {
        self.text.clear();
        // length was checked by both callers
        let _ = self.text.push_str(value);
    }
}

/// The text a slot ends up holding after [`TextBuffer::set_truncating`]:
/// the longest prefix of `value` within [`LINE_CAPACITY`] bytes that ends on
/// a char boundary.
pub fn fit_to_capacity(value: &str) -> &str {
    if value.len() <= LINE_CAPACITY {
        return value;
    }
    let mut end = LINE_CAPACITY;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}
