use super::{
    error::ParseWarning,
    parse_result::{EnvironmentDefinition, RequestDefinition},
    parsers::{parse_environment, parse_request},
    validate::{validate_environment_text, validate_request_text},
};
use crate::core::error::{BruqError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One request or environment file and its raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct BruFile {
    pub path: PathBuf,
    pub content: String,
}

impl BruFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BruqError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file not found: {}", crate::core::paths::clean_path(path)),
            )));
        }
        let canonical = path.canonicalize()?;
        let content = fs::read_to_string(&canonical)?;
        Ok(Self::from_content(canonical, content))
    }

    pub fn from_content(path: PathBuf, content: String) -> Self {
        Self { path, content }
    }

    /// File name without the extension; environments are named after it.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn request(&self) -> RequestDefinition {
        let mut request = parse_request(&self.content);
        if request.name.is_empty() {
            // Unnamed requests are still addressable by their file stem.
            request.name = self.stem();
        }
        request.file = Some(self.path.clone());
        request
    }

    pub fn environment(&self) -> EnvironmentDefinition {
        parse_environment(&self.stem(), self.path.clone(), &self.content)
    }

    pub fn validate_request(&self) -> Vec<ParseWarning> {
        validate_request_text(&self.content)
    }

    pub fn validate_environment(&self) -> Vec<ParseWarning> {
        validate_environment_text(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::http_method::HttpMethod;

    #[test]
    fn test_request_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("get-users.bru");
        fs::write(
            &path,
            "meta {\n  name: Get Users\n  seq: 1\n}\nget {\n  url: https://example.test/users\n}\n",
        )
        .unwrap();

        let file = BruFile::from_path(&path).unwrap();
        let request = file.request();
        assert_eq!(request.name, "Get Users");
        assert_eq!(request.method, HttpMethod::GET);
        assert_eq!(request.file.as_deref(), Some(file.path.as_path()));
    }

    #[test]
    fn test_unnamed_request_falls_back_to_stem() {
        let file = BruFile::from_content(PathBuf::from("/c/ping.bru"), "get {\n  url: x\n}".into());
        assert_eq!(file.request().name, "ping");
    }

    #[test]
    fn test_environment_named_after_file() {
        let file = BruFile::from_content(
            PathBuf::from("/c/environments/staging.bru"),
            "vars {\n  host: s.test\n}".into(),
        );
        let env = file.environment();
        assert_eq!(env.name, "staging");
        assert_eq!(env.variables["host"], "s.test");
    }

    #[test]
    fn test_environment_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.bru");
        fs::write(&path, "vars {\n  port: 8080\n}\nvars:secret [\n  token\n]\n").unwrap();

        let env = EnvironmentDefinition::from_path(&path).unwrap();
        assert_eq!(env.name, "local");
        assert_eq!(env.variables["port"], "8080");
        assert_eq!(env.secret_names, vec!["token"]);
    }

    #[test]
    fn test_missing_file_is_io_not_found() {
        let err = BruFile::from_path(Path::new("/definitely/not/here.bru")).unwrap_err();
        match err {
            BruqError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other}"),
        }
    }
}
