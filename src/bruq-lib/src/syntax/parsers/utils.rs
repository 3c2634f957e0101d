use crate::syntax::keywords::{PUNC_COLON, PUNC_TILDE};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static! {
    static ref TEST_CALL_REGEX: Regex = Regex::new(
        r#"(?:^|[^\w.$])test\s*\(\s*(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)'|`((?:[^`\\]|\\.)*)`)\s*,"#
    )
    .unwrap();
}

/// Splits a block body into `key: value` pairs, one per line, in source order.
/// The split happens at the first colon so values such as URLs stay whole.
/// Blank, disabled (`~`) and colon-less lines are skipped, as are empty keys.
pub fn scan_key_values(inner: &str) -> Vec<(String, String)> {
    inner
        .lines()
        .filter(|line| !is_disabled_line(line))
        .filter_map(|line| {
            let (key, value) = line.split_once(PUNC_COLON)?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// A `~` prefix turns a line off without deleting it.
pub fn is_disabled_line(line: &str) -> bool {
    line.trim_start().starts_with(PUNC_TILDE)
}

/// Value of the first line whose key is `key`.
pub fn first_value(inner: &str, key: &str) -> Option<String> {
    scan_key_values(inner)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// Key/value lines collected into a map; a repeated key keeps its last value.
pub fn key_value_map(inner: &str) -> BTreeMap<String, String> {
    scan_key_values(inner).into_iter().collect()
}

/// Descriptions of `test("...", ...)` calls in source order.
pub fn test_descriptions(inner: &str) -> Vec<String> {
    TEST_CALL_REGEX
        .captures_iter(inner)
        .filter_map(|caps| {
            let (quote, m) = [('"', 1), ('\'', 2), ('`', 3)]
                .into_iter()
                .find_map(|(quote, group)| caps.get(group).map(|m| (quote, m)))?;
            Some(m.as_str().replace(&format!("\\{quote}"), &quote.to_string()))
        })
        .collect()
}
