pub mod cache;
pub mod collection;
pub mod env;
pub mod request;
pub mod shared;
pub mod validators;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    Collection(collection::CollectionCommand),
    Request(request::RequestCommand),
    Env(env::EnvCommand),
    Cache(cache::CacheCommand),
}
