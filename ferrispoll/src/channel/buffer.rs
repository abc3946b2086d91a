//! Output buffer with tail-only prompt search.
//!
//! Device output is accumulated with ANSI escapes stripped. Prompt detection
//! only inspects the last `search_depth` bytes, which keeps large outputs
//! (full routing tables, `show interface` on a chassis) cheap to scan.

use bytes::BytesMut;
use regex::bytes::Regex;

/// Buffer for accumulating output and searching its tail for prompts.
#[derive(Debug)]
pub struct PatternBuffer {
    buffer: BytesMut,

    /// How many bytes from the end to search for patterns.
    search_depth: usize,
}

impl PatternBuffer {
    /// Create a new pattern buffer with the specified search depth.
    pub fn new(search_depth: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(4096),
            search_depth,
        }
    }

    /// Append data, stripping ANSI escape sequences.
    pub fn extend(&mut self, data: &[u8]) {
        let cleaned = strip_ansi_escapes::strip(data);
        self.buffer.extend_from_slice(&cleaned);
    }

    fn tail(&self) -> &[u8] {
        let start = self.buffer.len().saturating_sub(self.search_depth);
        &self.buffer[start..]
    }

    /// Find the last match of `pattern` in the tail, provided nothing but
    /// whitespace follows it.
    ///
    /// Returns the match start relative to the whole buffer.
    pub fn prompt_at_end(&self, pattern: &Regex) -> Option<usize> {
        let offset = self.buffer.len().saturating_sub(self.search_depth);
        let tail = self.tail();
        let m = pattern.find_iter(tail).last()?;
        if tail[m.end()..].iter().all(u8::is_ascii_whitespace) {
            Some(offset + m.start())
        } else {
            None
        }
    }

    /// Take ownership of the buffer contents and reset.
    pub fn take(&mut self) -> Vec<u8> {
        self.buffer.split().to_vec()
    }

    /// Get a reference to the buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_stripping() {
        let mut buffer = PatternBuffer::new(100);
        buffer.extend(b"\x1b[32mswitch#\x1b[0m");
        assert_eq!(buffer.as_slice(), b"switch#");
    }

    #[test]
    fn test_prompt_at_end() {
        let mut buffer = PatternBuffer::new(64);
        buffer.extend(&[b'x'; 200]);
        buffer.extend(b"\r\ncore-sw1#");

        let pattern = Regex::new(r"(?m)^[\w.\-]+#\s?$").unwrap();
        let start = buffer.prompt_at_end(&pattern).unwrap();
        assert_eq!(&buffer.as_slice()[start..], b"core-sw1#");
    }

    #[test]
    fn test_prompt_followed_by_output_is_ignored() {
        let mut buffer = PatternBuffer::new(100);
        buffer.extend(b"core-sw1#\r\nshow version\r\nCisco IOS Software");

        let pattern = Regex::new(r"(?m)^[\w.\-]+#\s?$").unwrap();
        assert!(buffer.prompt_at_end(&pattern).is_none());
    }

    #[test]
    fn test_prompt_outside_search_depth() {
        let mut buffer = PatternBuffer::new(10);
        buffer.extend(b"core-sw1#");
        buffer.extend(&[b'x'; 100]);

        let pattern = Regex::new(r"core-sw1#").unwrap();
        assert!(buffer.prompt_at_end(&pattern).is_none());
    }

    #[test]
    fn test_take_clears_buffer() {
        let mut buffer = PatternBuffer::new(100);
        buffer.extend(b"test data");
        assert_eq!(buffer.take(), b"test data");
        assert!(buffer.as_slice().is_empty());
    }
}
