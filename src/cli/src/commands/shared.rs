use crate::commands::validators;
use crate::core::formatter::OutputFormat;
use bruq_lib::core::config::{DEFAULT_EXECUTABLE, DEFAULT_TIMEOUT_SECS};
use bruq_lib::{CollectionClient, EngineConfig};
use clap::Args;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct OutputArgs {
    #[arg(
        short = 'o',
        long = "output",
        help = "Output format: text or json",
        default_value_t = OutputFormat::Text,
        value_enum,
        ignore_case = true
    )]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct SourceArgs {
    #[arg(
        short = 's',
        long = "source",
        default_value = ".",
        help = "Path to the collection directory",
        value_parser = validators::validate_path_exists
    )]
    pub source: String,
}

#[derive(Debug, Args)]
pub struct EnvArgs {
    #[arg(
        short = 'e',
        long = "env",
        alias = "environment",
        help = "Environment name (a file under environments/)",
        value_parser = validators::validate_env_name
    )]
    pub environment: Option<String>,
}

/// Settings for the external executor, shared by every subcommand.
#[derive(Debug, Args)]
pub struct EngineArgs {
    #[arg(
        long = "executable",
        env = "BRUQ_EXECUTABLE",
        default_value = DEFAULT_EXECUTABLE,
        global = true,
        help = "Collection runner executable"
    )]
    pub executable: String,

    #[arg(
        long = "timeout",
        env = "BRUQ_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        global = true,
        help = "Seconds before a run is killed"
    )]
    pub timeout: u64,
}

impl EngineArgs {
    pub fn config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_executable(self.executable.clone())
            .with_timeout(Duration::from_secs(self.timeout))
    }

    pub fn client(&self) -> CollectionClient {
        CollectionClient::new(self.config())
    }
}
