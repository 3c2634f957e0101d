use super::parse_trait::BlockParser;
use super::utils::{first_value, key_value_map, test_descriptions};
use crate::syntax::{
    block::extract_block,
    http_method::HttpMethod,
    keywords::{
        AUTH_NONE, BLOCK_AUTH_PREFIX, BLOCK_DOCS, BLOCK_HEADERS, BLOCK_META, BLOCK_QUERY_PARAMS,
        BLOCK_TESTS, BODY_BLOCKS, KEY_AUTH, KEY_NAME, KEY_SEQ, KEY_TYPE, KEY_URL, METHOD_BLOCKS,
    },
    parse_result::{Body, BodyKind, RequestDefinition},
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Meta {
    pub name: Option<String>,
    pub request_type: Option<String>,
    pub seq: Option<i64>,
}

pub struct MetaParser;
impl BlockParser for MetaParser {
    type Output = Meta;

    fn parse(&self, text: &str) -> Option<Meta> {
        let inner = extract_block(text, BLOCK_META)?;
        Some(Meta {
            name: first_value(inner, KEY_NAME),
            request_type: first_value(inner, KEY_TYPE),
            seq: first_value(inner, KEY_SEQ).and_then(|s| s.parse().ok()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodBlock {
    pub method: HttpMethod,
    pub url: String,
    pub auth_mode: Option<String>,
}

/// Probes the method labels in priority order; the first present one wins.
pub struct MethodParser;
impl BlockParser for MethodParser {
    type Output = MethodBlock;

    fn parse(&self, text: &str) -> Option<MethodBlock> {
        METHOD_BLOCKS.iter().find_map(|label| {
            let inner = extract_block(text, label)?;
            Some(MethodBlock {
                method: HttpMethod::from_str(label)?,
                url: first_value(inner, KEY_URL).unwrap_or_default(),
                auth_mode: first_value(inner, KEY_AUTH),
            })
        })
    }
}

/// Any block made of `key: value` lines: headers, query params, auth settings.
pub struct KeyValueParser<'a> {
    pub label: &'a str,
}
impl BlockParser for KeyValueParser<'_> {
    type Output = BTreeMap<String, String>;

    fn parse(&self, text: &str) -> Option<Self::Output> {
        extract_block(text, self.label).map(key_value_map)
    }
}

pub struct BodyParser;
impl BlockParser for BodyParser {
    type Output = Body;

    fn parse(&self, text: &str) -> Option<Body> {
        BODY_BLOCKS.iter().find_map(|label| {
            let inner = extract_block(text, label)?;
            Some(Body {
                kind: BodyKind::from_label(label)?,
                raw_content: inner.trim().to_string(),
            })
        })
    }
}

pub struct TestsParser;
impl BlockParser for TestsParser {
    type Output = Vec<String>;

    fn parse(&self, text: &str) -> Option<Vec<String>> {
        extract_block(text, BLOCK_TESTS).map(test_descriptions)
    }
}

/// Builds a request from one file's text. Missing blocks become absent or
/// default fields; this never fails.
pub fn parse_request(text: &str) -> RequestDefinition {
    let meta = MetaParser.parse(text).unwrap_or_default();
    let method_block = MethodParser.parse(text);

    let (method, url, auth_mode) = match method_block {
        Some(block) => (
            block.method,
            block.url,
            block.auth_mode.unwrap_or_else(|| AUTH_NONE.to_string()),
        ),
        None => (HttpMethod::GET, String::new(), AUTH_NONE.to_string()),
    };

    let auth = if auth_mode == AUTH_NONE {
        BTreeMap::new()
    } else {
        let label = format!("{BLOCK_AUTH_PREFIX}{auth_mode}");
        KeyValueParser { label: &label }
            .parse(text)
            .unwrap_or_default()
    };

    let docs = extract_block(text, BLOCK_DOCS)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    RequestDefinition {
        name: meta.name.unwrap_or_default(),
        method,
        url,
        headers: KeyValueParser {
            label: BLOCK_HEADERS,
        }
        .parse(text)
        .unwrap_or_default(),
        auth_mode,
        auth,
        body: BodyParser.parse(text),
        tests: TestsParser.parse(text).unwrap_or_default(),
        sequence: meta.seq,
        request_type: meta.request_type,
        query_params: KeyValueParser {
            label: BLOCK_QUERY_PARAMS,
        }
        .parse(text)
        .unwrap_or_default(),
        docs,
        folder: String::new(),
        file: None,
    }
}
