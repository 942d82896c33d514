mod cli;

use apk_sbom::adapters::outbound::console::StderrProgressReporter;
use apk_sbom::adapters::outbound::filesystem::{FileSystemReader, FileSystemWriter, StdoutPresenter};
use apk_sbom::adapters::outbound::process::{Executor, ExecutorConfig};
use apk_sbom::application::dto::SbomRequest;
use apk_sbom::application::use_cases::GenerateSbomUseCase;
use apk_sbom::config::{self, ConfigFile};
use apk_sbom::ports::outbound::{CommandRunner, OutputPresenter, ProgressReporter};
use apk_sbom::shared::error::ExitCode;
use apk_sbom::shared::Result;
use cli::{Args, Command, GenerateArgs, RunArgs};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,apk_sbom=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Generate(generate) => run_generate(generate),
        Command::Run(run) => run_command(run),
    }
}

/// Loads `--config`, or a config file in the working directory.
///
/// The image root is never searched: its contents are what is being inspected.
fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    let config = match explicit {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(&std::env::current_dir()?)?,
    };
    Ok(config.unwrap_or_default())
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    let request = SbomRequest::for_root_with_overrides(
        &args.root,
        config.os_release_path.as_deref(),
        config.installed_db_path.as_deref(),
    )?;

    // Create adapters (Dependency Injection)
    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };
    let use_case = GenerateSbomUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        progress_reporter,
    );

    let response = use_case.execute(request)?;
    let output = response.to_json()?;

    // CLI flag wins over the config file
    let presenter: Box<dyn OutputPresenter> = match args.output.or(config.output) {
        Some(path) => Box::new(FileSystemWriter::new(path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&output)?;

    Ok(())
}

fn run_command(args: RunArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let file_executor = config.executor.unwrap_or_default();

    let executor_config = ExecutorConfig {
        root_emulation: args.root_emulation || file_executor.root_emulation,
        emulated_arch: args.emulate_arch.or(file_executor.emulated_arch),
    };
    let executor = Executor::new(&args.root, executor_config)?;

    let Some((name, rest)) = args.command.split_first() else {
        anyhow::bail!("No command given");
    };
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
    let env: Vec<(&str, &str)> = args
        .env
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    executor.run(name, &rest, &env)?;

    StderrProgressReporter::new().report_completion(&format!("✅ {} completed", name));
    Ok(())
}
