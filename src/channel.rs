//! Output buffer with tail-limited prompt search.
//!
//! Accumulates raw channel output and searches only the last N bytes for
//! prompt patterns (scrapli's tail-search optimization), so a long
//! `compare` diff does not make every prompt check rescan the full
//! output. ANSI escape sequences are stripped on ingest.

use regex::bytes::Regex;

/// Default number of bytes from the end to search for prompts.
const DEFAULT_SEARCH_DEPTH: usize = 1000;

/// Buffer for accumulating device output and detecting prompts.
#[derive(Debug)]
pub struct PatternBuffer {
    buffer: Vec<u8>,
    search_depth: usize,
}

impl PatternBuffer {
    /// Create a buffer searching the last `search_depth` bytes for prompts.
    pub fn new(search_depth: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(4096),
            search_depth,
        }
    }

    /// Append new channel data, stripping ANSI escape codes.
    pub fn extend(&mut self, data: &[u8]) {
        let cleaned = strip_ansi_escapes::strip(data);
        self.buffer.extend_from_slice(&cleaned);
    }

    /// Whether the buffer tail matches the prompt pattern.
    pub fn tail_contains(&self, pattern: &Regex) -> bool {
        let start = self.buffer.len().saturating_sub(self.search_depth);
        pattern.is_match(&self.buffer[start..])
    }

    /// Take the accumulated contents, resetting the buffer.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buffer)
    }

    /// Take the contents as a lossy UTF-8 string.
    pub fn take_string(&mut self) -> String {
        String::from_utf8_lossy(&self.take()).into_owned()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH)
    }
}
