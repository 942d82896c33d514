/// Mock implementations for testing
mod mock_os_release_reader;
mod mock_package_index_reader;
mod mock_progress_reporter;

pub use mock_os_release_reader::MockOsReleaseReader;
pub use mock_package_index_reader::MockPackageIndexReader;
pub use mock_progress_reporter::MockProgressReporter;
