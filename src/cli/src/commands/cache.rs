use crate::commands::shared::{EngineArgs, OutputArgs, SourceArgs};
use bruq_lib::BruqError;
use clap::{Args, Subcommand};
use std::path::Path;

#[derive(Args)]
#[command(about = "Inspect the collection cache")]
pub struct CacheCommand {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand)]
pub enum CacheSubcommand {
    #[command(about = "Load a collection and show what each cache namespace holds")]
    Stats(StatsArgs),
}

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// The cache lives only as long as the process, so the collection is loaded
/// first to show what a pipeline run would keep.
pub fn execute_stats(args: &StatsArgs, engine: &EngineArgs) -> Result<(), BruqError> {
    let client = engine.client();
    let source = Path::new(&args.source.source);

    client.discover_collections(source, Some(0))?;
    client.list_requests(source)?;
    client.list_environments(source)?;

    let formatter = crate::core::formatter::get_formatter(&args.output.output);
    print!(
        "{}",
        formatter.format_list(&client.cache_stats(), "Cache namespaces:", "Cache is empty")
    );
    Ok(())
}
