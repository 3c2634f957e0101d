use crate::core::error::{BruqError, Result};
use crate::syntax::keywords::MANIFEST_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const COLLECTION_TYPE: &str = "collection";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionManifest {
    pub version: String,
    pub name: String,
    #[serde(rename = "type")]
    pub manifest_type: String,
}

/// Reads and checks `bruno.json` under `root`. Discovery only looks for the
/// file; this is the stricter check for callers that want a valid collection.
pub fn read_manifest(root: &Path) -> Result<CollectionManifest> {
    let path = root.join(MANIFEST_FILE);
    let display = crate::core::paths::clean_path(&path);
    if !path.is_file() {
        return Err(BruqError::NotACollection {
            path: crate::core::paths::clean_path(root),
            manifest: MANIFEST_FILE,
        });
    }

    let content = fs::read_to_string(&path)?;
    let manifest: CollectionManifest =
        serde_json::from_str(&content).map_err(|e| BruqError::InvalidManifest {
            path: display.clone(),
            reason: e.to_string(),
        })?;

    if manifest.manifest_type != COLLECTION_TYPE {
        return Err(BruqError::InvalidManifest {
            path: display,
            reason: format!(
                "type must be \"{COLLECTION_TYPE}\", found \"{}\"",
                manifest.manifest_type
            ),
        });
    }

    Ok(manifest)
}
