/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, processes, console).
pub mod command_runner;
pub mod os_release_reader;
pub mod output_presenter;
pub mod package_index_reader;
pub mod progress_reporter;

pub use command_runner::CommandRunner;
pub use os_release_reader::OsReleaseReader;
pub use output_presenter::OutputPresenter;
pub use package_index_reader::PackageIndexReader;
pub use progress_reporter::ProgressReporter;
