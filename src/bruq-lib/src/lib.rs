//! Collection model engine: parses request and environment files, discovers
//! collection roots, runs them through an external executor and reconciles
//! its output into one result model.

pub mod cache;
pub mod client;
pub mod collection;
pub mod core;
pub mod normalize;
pub mod syntax;

pub use cache::CollectionCache;
pub use client::{CollectionClient, RunOptions};
pub use crate::core::config::EngineConfig;
pub use crate::core::error::{BruqError, Result};
pub use normalize::CanonicalRunResult;
