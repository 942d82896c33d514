//! Command executor used while assembling an image root.
//!
//! Commands run natively with the image root as working directory, or under
//! `proot` when root emulation or CPU emulation is configured. The emulator
//! binary is resolved when the executor is built, so a missing `qemu-<arch>`
//! fails the build before any command runs.

use crate::ports::outbound::CommandRunner;
use crate::shared::error::SbomError;
use crate::shared::SbomResult;
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

const PROOT: &str = "proot";

/// Executor options, validated eagerly by [`Executor::new`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Run commands with apparent superuser privileges (`proot -S`)
    pub root_emulation: bool,
    /// Target architecture to emulate, e.g. `aarch64` or `riscv64`
    pub emulated_arch: Option<String>,
}

impl ExecutorConfig {
    pub fn with_root_emulation(mut self, enabled: bool) -> Self {
        self.root_emulation = enabled;
        self
    }

    pub fn with_emulated_arch(mut self, arch: impl Into<String>) -> Self {
        self.emulated_arch = Some(arch.into());
        self
    }
}

/// Where commands end up running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    Native,
    Sandboxed {
        proot: PathBuf,
        root_emulation: bool,
        emulator: Option<PathBuf>,
    },
}

/// Runs commands inside an image root
#[derive(Debug)]
pub struct Executor {
    work_dir: PathBuf,
    mode: ExecutionMode,
}

impl Executor {
    /// Builds an executor, resolving tools on the process `PATH`
    ///
    /// # Errors
    /// Returns `ConfigurationError` if the emulator for the requested
    /// architecture, or `proot`, cannot be found.
    pub fn new(work_dir: impl Into<PathBuf>, config: ExecutorConfig) -> SbomResult<Self> {
        let search_path = std::env::var_os("PATH").unwrap_or_default();
        Self::with_search_path(work_dir, config, &search_path)
    }

    /// Builds an executor, resolving tools on an explicit search path
    pub fn with_search_path(
        work_dir: impl Into<PathBuf>,
        config: ExecutorConfig,
        search_path: &OsStr,
    ) -> SbomResult<Self> {
        let work_dir = work_dir.into();

        let emulator = match config.emulated_arch.as_deref() {
            Some(arch) => Some(resolve_emulator(arch, search_path, &work_dir)?),
            None => None,
        };

        let mode = if config.root_emulation || emulator.is_some() {
            let proot = which::which_in(PROOT, Some(search_path), &work_dir).map_err(|e| {
                SbomError::ConfigurationError {
                    reason: format!("unable to find {} on the search path: {}", PROOT, e),
                    hint: "Install proot to use root or CPU emulation".to_string(),
                }
            })?;
            ExecutionMode::Sandboxed {
                proot,
                root_emulation: config.root_emulation,
                emulator,
            }
        } else {
            ExecutionMode::Native
        };

        tracing::debug!("Executor for {} configured: {:?}", work_dir.display(), mode);
        Ok(Self { work_dir, mode })
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn mode(&self) -> &ExecutionMode {
        &self.mode
    }

    /// Builds the process invocation for `name args...` in the configured mode
    fn command(&self, name: &str, args: &[&str]) -> Command {
        match &self.mode {
            ExecutionMode::Native => {
                let mut cmd = Command::new(name);
                cmd.args(args).current_dir(&self.work_dir);
                cmd
            }
            ExecutionMode::Sandboxed {
                proot,
                root_emulation,
                emulator,
            } => {
                let mut cmd = Command::new(proot);
                cmd.arg(if *root_emulation { "-S" } else { "-r" })
                    .arg(&self.work_dir)
                    .arg("--cwd=/");
                if let Some(emulator) = emulator {
                    cmd.arg("-q").arg(emulator);
                }
                cmd.arg(name).args(args);
                cmd
            }
        }
    }
}

impl CommandRunner for Executor {
    fn run(&self, name: &str, args: &[&str], env: &[(&str, &str)]) -> SbomResult<()> {
        let mut cmd = self.command(name, args);
        cmd.envs(env.iter().copied());

        let command_line = std::iter::once(name)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        let label = match &self.mode {
            ExecutionMode::Native => "native",
            ExecutionMode::Sandboxed { emulator: Some(_), .. } => "proot+qemu",
            ExecutionMode::Sandboxed { .. } => "proot",
        };
        tracing::info!("running ({}): {}", label, command_line);

        let output = cmd.output().map_err(|source| SbomError::IoError {
            path: PathBuf::from(cmd.get_program()),
            source,
        })?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            tracing::info!("{}: {}", name, line);
        }
        for line in String::from_utf8_lossy(&output.stderr).lines() {
            tracing::warn!("{}: {}", name, line);
        }

        if !output.status.success() {
            return Err(SbomError::CommandFailed {
                command: command_line,
                status: output.status.to_string(),
            });
        }

        Ok(())
    }
}

/// Maps apk architecture names to qemu-user suffixes
fn qemu_arch(arch: &str) -> &str {
    match arch {
        "x86" => "i386",
        "armhf" | "armv7" => "arm",
        other => other,
    }
}

fn resolve_emulator(arch: &str, search_path: &OsStr, cwd: &Path) -> SbomResult<PathBuf> {
    if arch.is_empty() || !arch.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SbomError::ConfigurationError {
            reason: format!("invalid emulation architecture {:?}", arch),
            hint: "Use an architecture name such as aarch64, armv7 or riscv64".to_string(),
        });
    }

    let binary = format!("qemu-{}", qemu_arch(arch));
    which::which_in(&binary, Some(search_path), cwd).map_err(|e| SbomError::ConfigurationError {
        reason: format!("unable to find qemu emulator for {}: {}", arch, e),
        hint: format!("Install {} (qemu-user) or drop CPU emulation", binary),
    })
}
