use super::error::ParseWarning;
use super::http_method::HttpMethod;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyKind {
    Json,
    Text,
    Xml,
    FormUrlEncoded,
    MultipartForm,
    Graphql,
    Sparql,
    None,
}

impl BodyKind {
    /// Maps a `body:<kind>` block label to its kind.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.strip_prefix("body:")? {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            "xml" => Some(Self::Xml),
            "formUrlEncoded" => Some(Self::FormUrlEncoded),
            "multipartForm" => Some(Self::MultipartForm),
            "graphql" => Some(Self::Graphql),
            "sparql" => Some(Self::Sparql),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Xml => "xml",
            Self::FormUrlEncoded => "formUrlEncoded",
            Self::MultipartForm => "multipartForm",
            Self::Graphql => "graphql",
            Self::Sparql => "sparql",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    pub kind: BodyKind,
    pub raw_content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDefinition {
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub auth_mode: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub auth: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    pub tests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub query_params: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    pub folder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl RequestDefinition {
    /// A request without a url (no method block) cannot be handed to the executor.
    pub fn is_runnable(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentDefinition {
    pub name: String,
    pub path: PathBuf,
    pub variables: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secret_names: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ParseWarning>,
}

impl EnvironmentDefinition {
    /// Reads and parses an environment file, named after its stem.
    pub fn from_path(path: &Path) -> crate::core::error::Result<Self> {
        Ok(super::bru_file::BruFile::from_path(path)?.environment())
    }
}
