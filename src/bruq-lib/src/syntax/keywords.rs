pub const BLOCK_META: &str = "meta";
pub const BLOCK_HEADERS: &str = "headers";
pub const BLOCK_TESTS: &str = "tests";
pub const BLOCK_VARS: &str = "vars";
pub const BLOCK_VARS_SECRET: &str = "vars:secret";
pub const BLOCK_QUERY_PARAMS: &str = "params:query";
pub const BLOCK_DOCS: &str = "docs";
pub const BLOCK_AUTH_PREFIX: &str = "auth:";

pub const KEY_NAME: &str = "name";
pub const KEY_TYPE: &str = "type";
pub const KEY_SEQ: &str = "seq";
pub const KEY_URL: &str = "url";
pub const KEY_AUTH: &str = "auth";

/// Probe order for the request's method block; the first present label wins.
pub const METHOD_BLOCKS: &[&str] = &["get", "post", "put", "patch", "delete", "head", "options"];

/// Probe order for the request body; the first present label wins.
pub const BODY_BLOCKS: &[&str] = &[
    "body:json",
    "body:text",
    "body:xml",
    "body:formUrlEncoded",
    "body:multipartForm",
    "body:graphql",
    "body:sparql",
];

pub const AUTH_NONE: &str = "none";

pub const PUNC_LBRACE: char = '{';
pub const PUNC_RBRACE: char = '}';
pub const PUNC_LBRACKET: char = '[';
pub const PUNC_RBRACKET: char = ']';
pub const PUNC_COLON: char = ':';
pub const PUNC_TILDE: char = '~';

/// Marker file identifying a collection root.
pub const MANIFEST_FILE: &str = "bruno.json";
pub const REQUEST_FILE_EXT: &str = "bru";
pub const ENVIRONMENTS_DIR: &str = "environments";
/// Collection- and folder-level settings files, never requests.
pub const SETTINGS_FILES: &[&str] = &["collection.bru", "folder.bru"];
