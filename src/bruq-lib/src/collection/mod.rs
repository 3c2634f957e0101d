pub mod discovery;
pub mod manifest;

pub use discovery::{clamp_depth, discover, is_collection_root, MAX_DISCOVERY_DEPTH};
pub use manifest::{read_manifest, CollectionManifest};
