use clap::{CommandFactory, Parser};
use std::path::Path;

mod commands;
mod core;

use bruq_lib::collection::is_collection_root;
use bruq_lib::BruqError;
use commands::shared::{EngineArgs, EnvArgs, OutputArgs, SourceArgs};
use commands::Commands;
use crate::core::exit_code::ExitCode;
use crate::core::formatter::OutputFormat;

#[derive(Parser)]
#[command(name = "bruq")]
#[command(
    about = "Inspect and run API request collections. Runs the collection in the current directory if no subcommand is provided."
)]
#[command(version)]
struct Args {
    #[arg(short, long, help = "Enable debug logging", global = true)]
    debug: bool,

    #[command(flatten)]
    engine: EngineArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    crate::core::logger::Logger::init(args.debug);

    match run(args).await {
        Ok(ExitCode::Success) => {}
        Ok(code) => std::process::exit(code.code()),
        Err(e) => {
            eprintln!("Error: {e}");
            let exit_code = ExitCode::from(&e);
            std::process::exit(exit_code.code());
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, BruqError> {
    let engine = &args.engine;
    let done = |result: Result<(), BruqError>| result.map(|_| ExitCode::Success);

    match args.command {
        Some(Commands::Collection(collection_command)) => match collection_command.command {
            commands::collection::CollectionSubcommand::Discover(discover_args) => {
                done(commands::collection::execute_discover(&discover_args, engine))
            }
            commands::collection::CollectionSubcommand::Show(show_args) => {
                done(commands::collection::execute_show(&show_args, engine))
            }
            commands::collection::CollectionSubcommand::Validate(validate_args) => {
                commands::collection::execute_validate(&validate_args, engine)
            }
        },
        Some(Commands::Request(request_command)) => match request_command.command {
            commands::request::RequestSubcommand::List(list_args) => {
                done(commands::request::execute_list(&list_args, engine))
            }
            commands::request::RequestSubcommand::Show(show_args) => {
                done(commands::request::execute_show(&show_args, engine))
            }
            commands::request::RequestSubcommand::Validate(validate_args) => {
                commands::request::execute_validate(&validate_args, engine)
            }
            commands::request::RequestSubcommand::Run(run_args) => {
                commands::request::execute_run(&run_args, engine).await
            }
        },
        Some(Commands::Env(env_command)) => match env_command.command {
            commands::env::EnvSubcommand::List(list_args) => {
                done(commands::env::execute_list(&list_args, engine))
            }
            commands::env::EnvSubcommand::Show(show_args) => {
                done(commands::env::execute_show(&show_args, engine))
            }
        },
        Some(Commands::Cache(cache_command)) => match cache_command.command {
            commands::cache::CacheSubcommand::Stats(stats_args) => {
                done(commands::cache::execute_stats(&stats_args, engine))
            }
        },
        None => {
            if !is_collection_root(Path::new(".")) {
                Args::command().print_help()?;
                println!();
                return Ok(ExitCode::Success);
            }
            commands::request::execute_run(&default_run_args(), engine).await
        }
    }
}

/// `bruq` alone in a collection directory runs the whole collection.
fn default_run_args() -> commands::request::RunArgs {
    commands::request::RunArgs {
        source: SourceArgs {
            source: ".".to_string(),
        },
        name: None,
        folder: None,
        env_args: EnvArgs { environment: None },
        variable: Vec::new(),
        output: OutputArgs {
            output: OutputFormat::Text,
        },
    }
}
