use crate::shared::SbomResult;

/// CommandRunner port for running commands while assembling an image
///
/// Implementations decide *where* the command runs (natively, under root
/// emulation, under CPU emulation); callers only name the command.
pub trait CommandRunner {
    /// Runs `name` with `args` and the extra environment variables in `env`
    ///
    /// # Errors
    /// - `IoError` if the process cannot be launched
    /// - `CommandFailed` if it exits unsuccessfully
    fn run(&self, name: &str, args: &[&str], env: &[(&str, &str)]) -> SbomResult<()>;
}
