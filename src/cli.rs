use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Extract SBOM package data from apk-based image roots
#[derive(Parser, Debug)]
#[command(name = "apk-sbom")]
#[command(version)]
#[command(about = "Extract SBOM package data from apk-based image roots", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read os-release and the installed package database, print the model as JSON
    Generate(GenerateArgs),
    /// Run one command inside an image root
    Run(RunArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Path to the image root directory
    #[arg(short, long)]
    pub root: PathBuf,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (defaults to apk-sbom.config.yml in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only report errors on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Path to the image root directory, used as working directory
    #[arg(short, long)]
    pub root: PathBuf,

    /// Config file (defaults to apk-sbom.config.yml in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run with apparent superuser privileges (requires proot)
    #[arg(long)]
    pub root_emulation: bool,

    /// Emulate a foreign CPU architecture (requires proot and qemu-<arch>)
    #[arg(long, value_name = "ARCH")]
    pub emulate_arch: Option<String>,

    /// Environment variable for the command.
    /// Can be specified multiple times: -e "PATH=/usr/bin" -e "HOME=/root"
    #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Command and arguments to run
    #[arg(required = true, last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Args {
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!(
            "Invalid environment variable: {}. Please specify KEY=VALUE",
            s
        )),
    }
}
