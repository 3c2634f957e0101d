pub mod collection_client;
pub mod executor;
pub mod models;

pub use collection_client::{open_collection, CollectionClient};
pub use executor::Executor;
pub use models::{CollectionInfo, RunOptions, RunTarget};
