//! Optional strict pass over a file. Parsing itself tolerates everything
//! reported here; this only surfaces what the tolerant parser silently skips.

use super::{
    block::{extract_block, top_level_blocks, BlockSpan},
    error::{ParseWarning, WarningKind},
    keywords::{BLOCK_HEADERS, BLOCK_META, BLOCK_VARS, BODY_BLOCKS, METHOD_BLOCKS, PUNC_COLON},
};
use super::parsers::environment::is_variable_line;
use std::collections::HashSet;

pub fn validate_request_text(text: &str) -> Vec<ParseWarning> {
    let spans = top_level_blocks(text);
    let mut warnings = structural_warnings(&spans);

    if !spans.iter().any(|s| s.label == BLOCK_META) {
        warnings.push(ParseWarning::new(
            WarningKind::MissingBlock,
            format!("missing '{BLOCK_META}' block; the request has no name"),
        ));
    }

    let methods: Vec<&BlockSpan> = spans
        .iter()
        .filter(|s| METHOD_BLOCKS.contains(&s.label.as_str()))
        .collect();
    match methods.as_slice() {
        [] => warnings.push(ParseWarning::new(
            WarningKind::MissingBlock,
            "missing method block; the request defaults to GET with no url",
        )),
        [_] => {}
        [first, rest @ ..] => {
            for extra in rest {
                warnings.push(ParseWarning::at_line(
                    WarningKind::MultipleMethods,
                    format!(
                        "'{}' block ignored; '{}' already sets the method",
                        extra.label, first.label
                    ),
                    extra.line,
                ));
            }
        }
    }

    let bodies: Vec<&BlockSpan> = spans
        .iter()
        .filter(|s| BODY_BLOCKS.contains(&s.label.as_str()))
        .collect();
    for extra in bodies.iter().skip(1) {
        warnings.push(ParseWarning::at_line(
            WarningKind::DuplicateBlock,
            format!("'{}' block ignored; only one body is used", extra.label),
            extra.line,
        ));
    }

    if let Some(span) = spans.iter().find(|s| s.label == BLOCK_HEADERS) {
        if let Some(inner) = extract_block(text, BLOCK_HEADERS) {
            for (offset, line) in inner.lines().enumerate() {
                let trimmed = line.trim();
                if !trimmed.is_empty() && !trimmed.contains(PUNC_COLON) {
                    warnings.push(ParseWarning::at_line(
                        WarningKind::MalformedLine,
                        format!("header line without ':' ignored: '{trimmed}'"),
                        span.line + offset,
                    ));
                }
            }
        }
    }

    warnings
}

pub fn validate_environment_text(text: &str) -> Vec<ParseWarning> {
    let spans = top_level_blocks(text);
    let mut warnings = structural_warnings(&spans);

    match spans.iter().find(|s| s.label == BLOCK_VARS) {
        None => warnings.push(ParseWarning::new(
            WarningKind::MissingBlock,
            format!("missing '{BLOCK_VARS}' block"),
        )),
        Some(span) => {
            if let Some(inner) = extract_block(text, BLOCK_VARS) {
                for (offset, line) in inner.lines().enumerate() {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() && !is_variable_line(trimmed) {
                        warnings.push(ParseWarning::at_line(
                            WarningKind::MalformedLine,
                            format!("variable line ignored: '{trimmed}'"),
                            span.line + offset,
                        ));
                    }
                }
            }
        }
    }

    warnings
}

fn structural_warnings(spans: &[BlockSpan]) -> Vec<ParseWarning> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();
    for span in spans {
        if !span.terminated {
            warnings.push(ParseWarning::at_line(
                WarningKind::UnterminatedBlock,
                format!("'{}' block is never closed and is treated as absent", span.label),
                span.line,
            ));
        } else if !seen.insert(span.label.as_str()) {
            warnings.push(ParseWarning::at_line(
                WarningKind::DuplicateBlock,
                format!("duplicate '{}' block ignored; the first one is used", span.label),
                span.line,
            ));
        }
    }
    warnings
}
