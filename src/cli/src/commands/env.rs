use crate::commands::shared::{EngineArgs, OutputArgs, SourceArgs};
use crate::commands::validators;
use bruq_lib::syntax::EnvironmentDefinition;
use bruq_lib::BruqError;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
pub struct EnvironmentSummaryView {
    pub name: String,
    pub variables: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secrets: Vec<String>,
}

impl From<&EnvironmentDefinition> for EnvironmentSummaryView {
    fn from(env: &EnvironmentDefinition) -> Self {
        Self {
            name: env.name.clone(),
            variables: env.variables.len(),
            secrets: env.secret_names.clone(),
        }
    }
}

#[derive(Args)]
#[command(name = "env")]
#[command(about = "Manage environments")]
pub struct EnvCommand {
    #[command(subcommand)]
    pub command: EnvSubcommand,
}

#[derive(Subcommand)]
pub enum EnvSubcommand {
    #[command(about = "List environments")]
    List(ListArgs),
    #[command(about = "Show an environment's variables")]
    Show(ShowArgs),
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(
        short = 'n',
        long = "name",
        help = "Environment name",
        value_parser = validators::validate_env_name
    )]
    pub name: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn execute_list(args: &ListArgs, engine: &EngineArgs) -> Result<(), BruqError> {
    let environments = engine
        .client()
        .list_environments(Path::new(&args.source.source))?;
    let views: Vec<EnvironmentSummaryView> = environments
        .iter()
        .map(EnvironmentSummaryView::from)
        .collect();

    let formatter = crate::core::formatter::get_formatter(&args.output.output);
    print!(
        "{}",
        formatter.format_list(&views, "Environments found:", "No environments found")
    );

    Ok(())
}

pub fn execute_show(args: &ShowArgs, engine: &EngineArgs) -> Result<(), BruqError> {
    let environment = engine
        .client()
        .get_environment(Path::new(&args.source.source), &args.name)?;

    let formatter = crate::core::formatter::get_formatter(&args.output.output);
    print!("{}", formatter.format(&environment));

    Ok(())
}
