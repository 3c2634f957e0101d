use crate::commands::request::FileReport;
use crate::commands::shared::{EngineArgs, OutputArgs, SourceArgs};
use crate::core::exit_code::ExitCode;
use bruq_lib::collection::read_manifest;
use bruq_lib::core::paths::{clean_path, relative_slash_path};
use bruq_lib::syntax::BruFile;
use bruq_lib::BruqError;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
pub struct DiscoveredCollectionView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: String,
}

#[derive(Args)]
#[command(about = "Find and inspect collections")]
pub struct CollectionCommand {
    #[command(subcommand)]
    pub command: CollectionSubcommand,
}

#[derive(Subcommand)]
pub enum CollectionSubcommand {
    #[command(about = "Find collections below a directory")]
    Discover(DiscoverArgs),
    #[command(about = "Show a collection's manifest and contents")]
    Show(ShowArgs),
    #[command(about = "Check the manifest and every file strictly")]
    Validate(ValidateArgs),
}

#[derive(Args)]
pub struct DiscoverArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(
        short = 'd',
        long = "depth",
        allow_hyphen_values = true,
        help = "Levels below the source to search (clamped to 0-10)"
    )]
    pub depth: Option<i64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn execute_discover(args: &DiscoverArgs, engine: &EngineArgs) -> Result<(), BruqError> {
    let client = engine.client();
    let roots = client.discover_collections(Path::new(&args.source.source), args.depth)?;

    let views: Vec<DiscoveredCollectionView> = roots
        .iter()
        .map(|root| DiscoveredCollectionView {
            // Discovery only needs the marker file; a broken manifest still lists.
            name: read_manifest(root).ok().map(|m| m.name),
            path: clean_path(root),
        })
        .collect();

    let formatter = crate::core::formatter::get_formatter(&args.output.output);
    print!(
        "{}",
        formatter.format_list(&views, "Collections found:", "No collections found")
    );
    Ok(())
}

pub fn execute_show(args: &ShowArgs, engine: &EngineArgs) -> Result<(), BruqError> {
    let info = engine
        .client()
        .describe_collection(Path::new(&args.source.source))?;

    let formatter = crate::core::formatter::get_formatter(&args.output.output);
    print!("{}", formatter.format(&info));
    Ok(())
}

pub fn execute_validate(args: &ValidateArgs, engine: &EngineArgs) -> Result<ExitCode, BruqError> {
    let client = engine.client();
    let source = Path::new(&args.source.source);
    let root = bruq_lib::client::open_collection(source)?;
    read_manifest(&root)?;

    let mut reports = Vec::new();
    for request in client.list_requests(&root)? {
        let Some(file) = request.file.as_deref() else {
            continue;
        };
        let warnings = BruFile::from_path(file)?.validate_request();
        if !warnings.is_empty() {
            reports.push(FileReport {
                file: relative_slash_path(&root, file),
                warnings,
            });
        }
    }
    for env in client.list_environments(&root)? {
        let warnings = BruFile::from_path(&env.path)?.validate_environment();
        if !warnings.is_empty() {
            reports.push(FileReport {
                file: relative_slash_path(&root, &env.path),
                warnings,
            });
        }
    }

    let formatter = crate::core::formatter::get_formatter(&args.output.output);
    print!(
        "{}",
        formatter.format_list(&reports, "Problems found:", "No problems found")
    );

    Ok(if reports.is_empty() {
        ExitCode::Success
    } else {
        ExitCode::ValidationFailed
    })
}
