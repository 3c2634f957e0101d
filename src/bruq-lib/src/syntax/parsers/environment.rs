use super::parse_trait::BlockParser;
use crate::syntax::{
    block::{extract_block, extract_list_block},
    error::{ParseWarning, WarningKind},
    keywords::{BLOCK_VARS, BLOCK_VARS_SECRET},
    parse_result::EnvironmentDefinition,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;

lazy_static! {
    static ref VARIABLE_LINE_REGEX: Regex =
        Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*:\s*(.*?)\s*$").unwrap();
}

/// The `vars { ... }` block as a flat map. Values are kept as strings, and a
/// key that appears twice keeps its later value.
pub struct EnvironmentParser;
impl BlockParser for EnvironmentParser {
    type Output = BTreeMap<String, String>;

    fn parse(&self, text: &str) -> Option<Self::Output> {
        let inner = extract_block(text, BLOCK_VARS)?;
        Some(
            inner
                .lines()
                .filter_map(|line| {
                    let caps = VARIABLE_LINE_REGEX.captures(line)?;
                    Some((caps[1].to_string(), caps[2].to_string()))
                })
                .collect(),
        )
    }
}

/// Names listed in `vars:secret [ ... ]`; their values live outside the file.
pub struct SecretNamesParser;
impl BlockParser for SecretNamesParser {
    type Output = Vec<String>;

    fn parse(&self, text: &str) -> Option<Vec<String>> {
        let inner = extract_list_block(text, BLOCK_VARS_SECRET)?;
        Some(
            inner
                .split([',', '\n'])
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

/// Whether a `vars` line has the `identifier: value` shape the parser keeps.
pub fn is_variable_line(line: &str) -> bool {
    VARIABLE_LINE_REGEX.is_match(line)
}

pub fn parse_environment_variables(text: &str) -> BTreeMap<String, String> {
    EnvironmentParser.parse(text).unwrap_or_default()
}

pub fn parse_environment(name: &str, path: PathBuf, text: &str) -> EnvironmentDefinition {
    let mut warnings = Vec::new();
    let variables = EnvironmentParser.parse(text).unwrap_or_else(|| {
        warnings.push(ParseWarning::new(
            WarningKind::MissingBlock,
            format!("environment '{name}' has no '{BLOCK_VARS} {{ }}' block"),
        ));
        BTreeMap::new()
    });

    EnvironmentDefinition {
        name: name.to_string(),
        path,
        variables,
        secret_names: SecretNamesParser.parse(text).unwrap_or_default(),
        warnings,
    }
}
