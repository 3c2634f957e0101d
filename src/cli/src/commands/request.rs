use crate::commands::shared::{EngineArgs, EnvArgs, OutputArgs, SourceArgs};
use crate::commands::validators;
use crate::core::exit_code::ExitCode;
use crate::core::logger::Logger;
use bruq_lib::normalize::CanonicalRunResult;
use bruq_lib::syntax::{BruFile, ParseWarning, RequestDefinition};
use bruq_lib::{BruqError, RunOptions};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
pub struct RequestSummaryView {
    pub name: String,
    pub method: String,
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub folder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq: Option<i64>,
}

impl From<&RequestDefinition> for RequestSummaryView {
    fn from(request: &RequestDefinition) -> Self {
        Self {
            name: request.name.clone(),
            method: request.method.as_str().to_string(),
            url: request.url.clone(),
            folder: request.folder.clone(),
            seq: request.sequence,
        }
    }
}

#[derive(Serialize)]
pub struct FileReport {
    pub file: String,
    pub warnings: Vec<ParseWarning>,
}

/// Text rendering of a run; JSON output prints the full result instead.
#[derive(Serialize)]
pub struct RunReportView {
    pub summary: String,
    pub results: Vec<RunItemView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

#[derive(Serialize)]
pub struct RunItemView {
    pub name: String,
    pub result: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub assertions: Vec<String>,
}

fn verdict(passed: bool) -> &'static str {
    if passed {
        "PASS"
    } else {
        "FAIL"
    }
}

impl RunReportView {
    /// Executor stderr is noise on a clean run; it shows up when the run
    /// failed or when `show_stderr` asks for it.
    pub fn new(result: &CanonicalRunResult, show_stderr: bool) -> Self {
        let s = &result.summary;
        let summary = if result.is_degraded() {
            format!("unrecognized executor output (exit code {})", result.exit_code)
        } else {
            format!(
                "{} passed, {} failed, {} total in {} ms",
                s.passed, s.failed, s.total, s.total_duration_ms
            )
        };

        Self {
            summary,
            results: result
                .results
                .iter()
                .map(|item| RunItemView {
                    name: item.name.clone(),
                    result: verdict(item.passed),
                    status: item.http_status,
                    duration: format!("{} ms", item.duration_ms),
                    error: item.error.clone(),
                    assertions: item
                        .assertions
                        .iter()
                        .map(|a| match &a.error {
                            Some(error) => format!("{} {}: {error}", verdict(a.passed), a.name),
                            None => format!("{} {}", verdict(a.passed), a.name),
                        })
                        .collect(),
                })
                .collect(),
            stdout: result.raw_stdout.clone().filter(|s| !s.trim().is_empty()),
            stderr: result
                .raw_stderr
                .clone()
                .filter(|s| !s.trim().is_empty())
                .filter(|_| show_stderr || !result.succeeded()),
        }
    }
}

#[derive(Debug, Args)]
#[command(about = "Manage requests")]
pub struct RequestCommand {
    #[command(subcommand)]
    pub command: RequestSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum RequestSubcommand {
    #[command(about = "List requests")]
    List(ListArgs),
    #[command(about = "Show request details")]
    Show(ShowArgs),
    #[command(about = "Report structural problems in a request file")]
    Validate(ShowArgs),
    #[command(about = "Run a request, a folder, or the whole collection")]
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct RequestNameArgs {
    #[arg(
        short = 'n',
        long = "name",
        help = "Request name, or its path relative to the collection",
        value_parser = validators::validate_request_name
    )]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub request_name_args: RequestNameArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(
        short = 'n',
        long = "name",
        help = "Request to run; omit to run the whole collection",
        value_parser = validators::validate_request_name
    )]
    pub name: Option<String>,

    #[arg(
        short = 'f',
        long = "folder",
        conflicts_with = "name",
        help = "Run every request under this folder"
    )]
    pub folder: Option<String>,

    #[command(flatten)]
    pub env_args: EnvArgs,

    #[arg(
        short = 'v',
        long = "variable",
        value_name = "NAME=VALUE",
        help = "Override environment variables",
        value_parser = validators::validate_variable
    )]
    pub variable: Vec<(String, String)>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl RunArgs {
    fn options(&self) -> RunOptions {
        let mut options = RunOptions::default();
        if let Some(env) = &self.env_args.environment {
            options = options.with_environment(env.clone());
        }
        for (key, value) in &self.variable {
            options = options.with_env_var(key.clone(), value.clone());
        }
        options
    }
}

pub fn execute_list(args: &ListArgs, engine: &EngineArgs) -> Result<(), BruqError> {
    let requests = engine
        .client()
        .list_requests(Path::new(&args.source.source))?;
    let views: Vec<RequestSummaryView> = requests.iter().map(RequestSummaryView::from).collect();

    let formatter = crate::core::formatter::get_formatter(&args.output.output);
    print!("{}", formatter.format_list(&views, "", "No requests found"));

    Ok(())
}

pub fn execute_show(args: &ShowArgs, engine: &EngineArgs) -> Result<(), BruqError> {
    let request = engine.client().get_request(
        Path::new(&args.source.source),
        &args.request_name_args.name,
    )?;

    let formatter = crate::core::formatter::get_formatter(&args.output.output);
    print!("{}", formatter.format(&request));

    Ok(())
}

pub fn execute_validate(args: &ShowArgs, engine: &EngineArgs) -> Result<ExitCode, BruqError> {
    let source = Path::new(&args.source.source);
    let request = engine
        .client()
        .get_request(source, &args.request_name_args.name)?;
    let file = request
        .file
        .as_deref()
        .ok_or_else(|| BruqError::RequestNotFound(request.name.clone()))?;
    let warnings = BruFile::from_path(file)?.validate_request();

    let formatter = crate::core::formatter::get_formatter(&args.output.output);
    print!(
        "{}",
        formatter.format_list(&warnings, "Problems found:", "No problems found")
    );

    Ok(if warnings.is_empty() {
        ExitCode::Success
    } else {
        ExitCode::ValidationFailed
    })
}

pub async fn execute_run(args: &RunArgs, engine: &EngineArgs) -> Result<ExitCode, BruqError> {
    let client = engine.client();
    let source = Path::new(&args.source.source);
    let options = args.options();

    let result = match &args.name {
        Some(name) => client.run_request(source, name, &options).await?,
        None => {
            client
                .run_collection(source, args.folder.as_deref(), &options)
                .await?
        }
    };
    log::debug!(
        "Run finished: shape {:?}, exit code {}",
        result.shape,
        result.exit_code
    );

    let formatter = crate::core::formatter::get_formatter(&args.output.output);
    if formatter.is_json() {
        print!("{}", formatter.format(&result));
    } else {
        let view = RunReportView::new(&result, Logger::is_debug());
        print!("{}", formatter.format(&view));
    }

    Ok(if result.succeeded() {
        ExitCode::Success
    } else {
        ExitCode::RunFailed
    })
}
