use super::executor::Executor;
use super::models::{CollectionInfo, RunOptions, RunTarget};
use crate::cache::{CollectionCache, NamespaceStats};
use crate::collection::{clamp_depth, discover, is_collection_root, read_manifest};
use crate::core::config::EngineConfig;
use crate::core::error::{BruqError, Result};
use crate::core::paths::{clean_path, relative_slash_path};
use crate::normalize::{normalize, CanonicalRunResult};
use crate::syntax::keywords::{ENVIRONMENTS_DIR, MANIFEST_FILE, REQUEST_FILE_EXT, SETTINGS_FILES};
use crate::syntax::{BruFile, EnvironmentDefinition, RequestDefinition};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Entry point tying discovery, parsing, execution and normalization together.
///
/// Every lookup goes through the shared [`CollectionCache`]; several clients
/// may hold the same cache.
pub struct CollectionClient {
    cache: Arc<CollectionCache>,
    config: EngineConfig,
    executor: Executor,
}

impl CollectionClient {
    pub fn new(config: EngineConfig) -> Self {
        let cache = Arc::new(CollectionCache::new(&config.cache));
        Self::with_cache(config, cache)
    }

    pub fn with_cache(config: EngineConfig, cache: Arc<CollectionCache>) -> Self {
        let executor = Executor::new(config.executable.clone(), config.timeout);
        Self {
            cache,
            config,
            executor,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<CollectionCache> {
        &self.cache
    }

    /// Collection roots under `root`; `depth` is clamped to `[0, 10]` and
    /// defaults to the configured depth.
    pub fn discover_collections(&self, root: &Path, depth: Option<i64>) -> Result<Vec<PathBuf>> {
        let depth = depth
            .map(clamp_depth)
            .unwrap_or_else(|| self.config.default_depth);
        let canonical = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let key = format!("{}#{depth}", canonical.display());

        if let Some(found) = self.cache.discovery.get(&key) {
            log::debug!("Discovery cache hit for {key}");
            return Ok(found);
        }

        let found = discover(root, depth)?;
        self.cache.discovery.set(key, found.clone());
        Ok(found)
    }

    pub fn describe_collection(&self, collection: &Path) -> Result<CollectionInfo> {
        let root = open_collection(collection)?;
        let manifest = read_manifest(&root)?;
        Ok(CollectionInfo {
            name: manifest.name,
            version: manifest.version,
            request_count: self.list_requests(&root)?.len(),
            environment_count: self.list_environments(&root)?.len(),
            path: root,
        })
    }

    /// Every request in the collection, ordered by folder, then sequence
    /// (unsequenced last), then name.
    pub fn list_requests(&self, collection: &Path) -> Result<Vec<RequestDefinition>> {
        let root = open_collection(collection)?;
        let key = clean_path(&root);

        if let Some(requests) = self.cache.requests.get(&key) {
            log::debug!("Request cache hit for {key}");
            return Ok(requests);
        }

        let mut requests = Vec::new();
        for path in request_files(&root) {
            let Some(content) = self.read_cached(&path) else {
                continue;
            };
            let mut request = BruFile::from_content(path.clone(), content).request();
            if let Some(parent) = path.parent() {
                request.folder = relative_slash_path(&root, parent);
            }
            requests.push(request);
        }

        requests.sort_by(|a, b| {
            (&a.folder, a.sequence.is_none(), a.sequence, &a.name).cmp(&(
                &b.folder,
                b.sequence.is_none(),
                b.sequence,
                &b.name,
            ))
        });
        log::debug!("Parsed {} request(s) in {key}", requests.len());

        self.cache.requests.set(key, requests.clone());
        Ok(requests)
    }

    /// Looks a request up by name, or by its path relative to the root
    /// (`users/get-user.bru`) when names collide.
    pub fn get_request(&self, collection: &Path, name: &str) -> Result<RequestDefinition> {
        let root = open_collection(collection)?;
        let requests = self.list_requests(&root)?;

        requests
            .iter()
            .find(|r| r.name == name)
            .or_else(|| {
                requests.iter().find(|r| {
                    r.file
                        .as_deref()
                        .map(|file| relative_slash_path(&root, file))
                        .is_some_and(|rel| rel == name || rel.strip_suffix(".bru") == Some(name))
                })
            })
            .cloned()
            .ok_or_else(|| BruqError::RequestNotFound(name.to_string()))
    }

    /// Environments under `environments/`, sorted by name. A collection
    /// without that directory simply has none.
    pub fn list_environments(&self, collection: &Path) -> Result<Vec<EnvironmentDefinition>> {
        let root = open_collection(collection)?;
        let key = clean_path(&root);

        if let Some(environments) = self.cache.environments.get(&key) {
            log::debug!("Environment cache hit for {key}");
            return Ok(environments);
        }

        let dir = root.join(ENVIRONMENTS_DIR);
        let mut environments = Vec::new();
        if dir.is_dir() {
            for entry in fs::read_dir(&dir)?.flatten() {
                let path = entry.path();
                if !is_bru_file(&path) {
                    continue;
                }
                if let Some(content) = self.read_cached(&path) {
                    environments.push(BruFile::from_content(path, content).environment());
                }
            }
        }
        environments.sort_by(|a, b| a.name.cmp(&b.name));

        self.cache.environments.set(key, environments.clone());
        Ok(environments)
    }

    pub fn get_environment(&self, collection: &Path, name: &str) -> Result<EnvironmentDefinition> {
        self.list_environments(collection)?
            .into_iter()
            .find(|env| env.name == name)
            .ok_or_else(|| BruqError::EnvironmentNotFound(name.to_string()))
    }

    /// Runs one request through the executor.
    pub async fn run_request(
        &self,
        collection: &Path,
        name: &str,
        options: &RunOptions,
    ) -> Result<CanonicalRunResult> {
        let root = open_collection(collection)?;
        let request = self.get_request(&root, name)?;
        if !request.is_runnable() {
            return Err(BruqError::Validation(format!(
                "request '{}' has no method block with a url",
                request.name
            )));
        }
        let file = request
            .file
            .as_deref()
            .ok_or_else(|| BruqError::RequestNotFound(name.to_string()))?;

        let target = RunTarget {
            path: relative_slash_path(&root, file),
            root: root.clone(),
            recursive: false,
        };
        self.execute(&target, options).await
    }

    /// Runs every request under `folder` (relative to the root), or the whole
    /// collection when `folder` is `None`.
    pub async fn run_collection(
        &self,
        collection: &Path,
        folder: Option<&str>,
        options: &RunOptions,
    ) -> Result<CanonicalRunResult> {
        let root = open_collection(collection)?;
        let path = match folder.map(|f| f.trim_matches('/')).filter(|f| !f.is_empty()) {
            Some(folder) => {
                let dir = root.join(folder);
                if !dir.is_dir() {
                    return Err(BruqError::DirectoryNotFound(clean_path(&dir)));
                }
                folder.to_string()
            }
            None => String::new(),
        };

        let target = RunTarget {
            root,
            path,
            recursive: true,
        };
        self.execute(&target, options).await
    }

    pub fn cache_stats(&self) -> Vec<NamespaceStats> {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear_all();
    }

    async fn execute(&self, target: &RunTarget, options: &RunOptions) -> Result<CanonicalRunResult> {
        if let Some(env) = &options.environment {
            // Fail before spawning anything.
            self.get_environment(&target.root, env)?;
        }
        let (raw, artifact) = self.executor.run(target, options).await?;
        Ok(normalize(&raw, artifact.as_ref()))
    }

    fn read_cached(&self, path: &Path) -> Option<String> {
        let key = clean_path(path);
        if let Some(content) = self.cache.files.get(&key) {
            return Some(content);
        }
        match fs::read_to_string(path) {
            Ok(content) => {
                self.cache.files.set(key, content.clone());
                Some(content)
            }
            Err(e) => {
                log::warn!("Skipping unreadable file {key}: {e}");
                None
            }
        }
    }
}

/// Canonical root of an existing collection directory.
pub fn open_collection(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(BruqError::DirectoryNotFound(clean_path(path)));
    }
    if !path.is_dir() {
        return Err(BruqError::NotADirectory(clean_path(path)));
    }
    let root = path.canonicalize()?;
    if !is_collection_root(&root) {
        return Err(BruqError::NotACollection {
            path: clean_path(&root),
            manifest: MANIFEST_FILE,
        });
    }
    Ok(root)
}

fn is_bru_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == REQUEST_FILE_EXT)
}

fn is_settings_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| SETTINGS_FILES.iter().any(|s| name == *s))
}

/// Request files under `root`, skipping the environments directory, settings
/// files, hidden directories and `node_modules`. Symlinks are not followed.
fn request_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut work = vec![root.to_path_buf()];

    while let Some(dir) = work.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Skipping unreadable directory {}: {e}", dir.display());
                continue;
            }
        };
        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();

            if file_type.is_dir() {
                let skip = name.starts_with('.')
                    || crate::collection::discovery::EXCLUDED_DIRS.contains(&name.as_str())
                    || (dir == root && name == ENVIRONMENTS_DIR);
                if !skip {
                    work.push(path);
                }
            } else if file_type.is_file() && is_bru_file(&path) && !is_settings_file(&path) {
                files.push(path);
            }
        }
    }
    files
}
