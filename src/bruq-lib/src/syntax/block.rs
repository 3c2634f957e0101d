//! Locating `label { ... }` blocks in raw request and environment files.
//!
//! Blocks are matched by brace counting only, so bodies holding JSON or
//! GraphQL with their own braces come back intact. A label that appears more
//! than once is resolved to its first occurrence; later duplicates are ignored
//! (see [`crate::syntax::validate`] for a pass that reports them).

use super::keywords::{PUNC_LBRACE, PUNC_LBRACKET, PUNC_RBRACE, PUNC_RBRACKET};
use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;

lazy_static! {
    static ref BLOCK_HEADER_REGEX: Regex =
        Regex::new(r"^[ \t]*([A-Za-z][A-Za-z0-9_:.\-]*)[ \t]*([\{\[])").unwrap();
}

/// Inner text of the first `label { ... }` block, or `None` when the label is
/// missing or its block is never closed.
pub fn extract_block<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    extract_delimited(text, label, PUNC_LBRACE, PUNC_RBRACE)
}

/// Same as [`extract_block`] for list-valued blocks: `label [ ... ]`.
pub fn extract_list_block<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    extract_delimited(text, label, PUNC_LBRACKET, PUNC_RBRACKET)
}

fn extract_delimited<'a>(text: &'a str, label: &str, open: char, close: char) -> Option<&'a str> {
    if label.is_empty() {
        return None;
    }
    // Header-at-line-start blocks win over a label that merely appears inside
    // another block's body (a GraphQL `tests { id }` field, say).
    let top_level = top_level_blocks(text)
        .into_iter()
        .find(|span| span.label == label && span.delimiter == open)
        .and_then(|span| span.body);
    if let Some(body) = top_level {
        return Some(&text[body]);
    }

    let body_start = find_opening(text, label, open)?;
    let body_end = find_closing(text, body_start, open, close)?;
    Some(&text[body_start..body_end])
}

/// Byte offset just past the opening delimiter of the first block named `label`.
fn find_opening(text: &str, label: &str, open: char) -> Option<usize> {
    for (idx, _) in text.match_indices(label) {
        if !starts_token(text, idx) {
            continue;
        }
        let after_label = idx + label.len();
        let rest = &text[after_label..];
        let trimmed = rest.trim_start();
        if trimmed.starts_with(open) {
            let open_idx = after_label + (rest.len() - trimmed.len());
            return Some(open_idx + open.len_utf8());
        }
    }
    None
}

fn starts_token(text: &str, idx: usize) -> bool {
    text[..idx]
        .chars()
        .next_back()
        .map(char::is_whitespace)
        .unwrap_or(true)
}

/// Byte offset of the delimiter closing a block whose body starts at `body_start`.
fn find_closing(text: &str, body_start: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 1usize;
    for (i, ch) in text[body_start..].char_indices() {
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(body_start + i);
            }
        }
    }
    None
}

/// A block header found at the top level of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpan {
    pub label: String,
    /// 1-based line of the block header.
    pub line: usize,
    pub delimiter: char,
    pub terminated: bool,
    /// Byte range of the inner text; `None` when the block never closes.
    pub body: Option<Range<usize>>,
}

/// Every top-level block in source order. Scanning stops at the first
/// unterminated block since nothing after it can be placed reliably.
pub fn top_level_blocks(text: &str) -> Vec<BlockSpan> {
    let mut spans = Vec::new();
    let mut pos = 0usize;

    while pos < text.len() {
        let line_end = text[pos..].find('\n').map(|i| pos + i).unwrap_or(text.len());
        let line = &text[pos..line_end];

        if let Some((label, delimiter)) = BLOCK_HEADER_REGEX
            .captures(line)
            .and_then(|caps| Some((caps.get(1)?.as_str().to_string(), caps.get(2)?)))
        {
            let (open, close) = if delimiter.as_str() == "[" {
                (PUNC_LBRACKET, PUNC_RBRACKET)
            } else {
                (PUNC_LBRACE, PUNC_RBRACE)
            };
            let body_start = pos + delimiter.end();
            let line_no = text[..pos].matches('\n').count() + 1;

            match find_closing(text, body_start, open, close) {
                Some(close_idx) => {
                    spans.push(BlockSpan {
                        label,
                        line: line_no,
                        delimiter: open,
                        terminated: true,
                        body: Some(body_start..close_idx),
                    });
                    pos = close_idx + close.len_utf8();
                    continue;
                }
                None => {
                    spans.push(BlockSpan {
                        label,
                        line: line_no,
                        delimiter: open,
                        terminated: false,
                        body: None,
                    });
                    break;
                }
            }
        }

        pos = line_end + 1;
    }

    spans
}

pub fn find_block_labels(text: &str) -> Vec<String> {
    top_level_blocks(text).into_iter().map(|span| span.label).collect()
}
