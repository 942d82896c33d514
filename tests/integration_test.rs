/// Integration tests for the application layer
mod test_utilities;

use apk_sbom::prelude::*;
use std::path::{Path, PathBuf};
use test_utilities::fixtures::*;
use test_utilities::mocks::*;

fn request() -> SbomRequest {
    SbomRequest::new(
        PathBuf::from("etc/os-release"),
        PathBuf::from("lib/apk/db/installed"),
    )
}

#[test]
fn test_generate_sbom_happy_path() {
    let progress_reporter = MockProgressReporter::new();
    let use_case = GenerateSbomUseCase::new(
        MockOsReleaseReader::new(ALPINE_OS_RELEASE),
        MockPackageIndexReader::new(INSTALLED_DB),
        progress_reporter.clone(),
    );

    let response = use_case.execute(request()).unwrap();
    let document = &response.document;

    assert_eq!(
        document.os(),
        &OsIdentity::new(
            "alpine".to_string(),
            "Alpine Linux".to_string(),
            "3.15.0".to_string()
        )
    );
    assert_eq!(document.packages().len(), 2);
    assert_eq!(document.file_count(), 4);

    let messages = progress_reporter.get_messages();
    assert!(messages.iter().any(|m| m.contains("Detected 2 package(s)")));
    assert!(messages.last().unwrap().starts_with("Completed:"));
}

#[test]
fn test_generate_sbom_package_details() {
    let use_case = GenerateSbomUseCase::new(
        MockOsReleaseReader::new(ALPINE_OS_RELEASE),
        MockPackageIndexReader::new(INSTALLED_DB),
        MockProgressReporter::new(),
    );

    let document = use_case.execute(request()).unwrap().document;

    let musl = document.package("musl").unwrap();
    assert_eq!(musl.files.len(), 2);
    assert_eq!(musl.files[0].path, "lib/ld-musl-x86_64.so.1");
    assert_eq!(musl.files[1].mode, 0o777);
    assert_eq!(
        musl.checksum.as_ref().unwrap().to_string(),
        "sha1:0de6f48cdcad92b8cf5b837f78a2d9e370703a5c"
    );

    let libretls = document.package("libretls").unwrap();
    assert_eq!(libretls.dependencies.len(), 4);
    assert_eq!(libretls.directories.len(), 2);
    assert_eq!(libretls.files[0].path, "usr/lib/libtls.so.2");
    assert_eq!(
        libretls.purl(document.os()),
        "pkg:apk/alpine/libretls@3.3.4-r2?arch=x86_64&distro=alpine-3.15.0"
    );
}

#[test]
fn test_generate_sbom_missing_os_release() {
    let progress_reporter = MockProgressReporter::new();
    let use_case = GenerateSbomUseCase::new(
        MockOsReleaseReader::missing(),
        MockPackageIndexReader::new(INSTALLED_DB),
        progress_reporter.clone(),
    );

    let err = use_case.execute(request()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SbomError>(),
        Some(SbomError::IoError { .. })
    ));
    // Nothing past the failing step ran
    assert!(!progress_reporter
        .get_messages()
        .iter()
        .any(|m| m.contains("package database")));
}

#[test]
fn test_generate_sbom_corrupt_database_returns_no_partial_result() {
    let db = format!("{}garbage line without prefix\n", INSTALLED_DB);
    let use_case = GenerateSbomUseCase::new(
        MockOsReleaseReader::new(ALPINE_OS_RELEASE),
        MockPackageIndexReader::new(&db),
        MockProgressReporter::new(),
    );

    let err = use_case.execute(request()).unwrap_err();
    match err.downcast_ref::<SbomError>() {
        Some(SbomError::ParseError {
            line_number,
            line,
            reason: ParseFailure::MalformedLine,
            ..
        }) => {
            assert_eq!(*line_number, INSTALLED_DB.lines().count() + 1);
            assert_eq!(line, "garbage line without prefix");
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_generate_sbom_record_without_version() {
    let use_case = GenerateSbomUseCase::new(
        MockOsReleaseReader::new(ALPINE_OS_RELEASE),
        MockPackageIndexReader::new("P:musl\nA:x86_64\n\n"),
        MockProgressReporter::new(),
    );

    let err = use_case.execute(request()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SbomError>(),
        Some(SbomError::ParseError {
            reason: ParseFailure::MissingField('V'),
            ..
        })
    ));
}

#[test]
fn test_generate_sbom_from_image_root() {
    let root = image_root(ALPINE_OS_RELEASE, INSTALLED_DB);
    let use_case = GenerateSbomUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        MockProgressReporter::new(),
    );

    let request = SbomRequest::for_root(root.path()).unwrap();
    let document = use_case.execute(request).unwrap().document;

    assert_eq!(document.os().id, "alpine");
    assert_eq!(document.packages().len(), 2);
    assert_eq!(
        document.purls(),
        vec![
            "pkg:apk/alpine/musl@1.2.2-r7?arch=x86_64&distro=alpine-3.15.0".to_string(),
            "pkg:apk/alpine/libretls@3.3.4-r2?arch=x86_64&distro=alpine-3.15.0".to_string(),
        ]
    );
}

#[test]
fn test_generate_sbom_from_image_root_with_usr_lib_os_release() {
    let root = tempfile::TempDir::new().unwrap();
    write(root.path(), "usr/lib/os-release", "ID=wolfi\nNAME=\"Wolfi\"\n");
    write(root.path(), "lib/apk/db/installed", "P:glibc\nV:2.38-r1\nA:aarch64\n");

    let use_case = GenerateSbomUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        MockProgressReporter::new(),
    );
    let request = SbomRequest::for_root(root.path()).unwrap();
    let document = use_case.execute(request).unwrap().document;

    assert_eq!(document.os().id, "wolfi");
    assert_eq!(document.os().version, "");
    assert_eq!(
        document.purls(),
        vec!["pkg:apk/wolfi/glibc@2.38-r1?arch=aarch64&distro=wolfi".to_string()]
    );
}

#[test]
fn test_generate_sbom_from_image_root_corrupt_database() {
    let root = image_root(ALPINE_OS_RELEASE, CORRUPT_DB);
    let use_case = GenerateSbomUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        MockProgressReporter::new(),
    );

    let request = SbomRequest::for_root(root.path()).unwrap();
    let err = use_case.execute(request).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SbomError>(),
        Some(SbomError::ParseError { line_number: 1, .. })
    ));
}

#[test]
fn test_document_serializes_to_json() {
    let use_case = GenerateSbomUseCase::new(
        MockOsReleaseReader::new(ALPINE_OS_RELEASE),
        MockPackageIndexReader::new(INSTALLED_DB),
        MockProgressReporter::new(),
    );

    let json = use_case.execute(request()).unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["os"]["id"], "alpine");
    assert_eq!(value["packages"][0]["name"], "musl");
    assert_eq!(value["packages"][1]["dependencies"].as_array().unwrap().len(), 4);
}

#[cfg(unix)]
#[test]
fn test_executor_through_command_runner_port() {
    let root = tempfile::TempDir::new().unwrap();
    let executor = Executor::new(root.path(), ExecutorConfig::default()).unwrap();
    let runner: &dyn CommandRunner = &executor;

    runner
        .run(
            "sh",
            &["-c", "printf '%s' \"$APK_ARCH\" > marker"],
            &[("APK_ARCH", "x86_64")],
        )
        .unwrap();

    let marker = std::fs::read_to_string(root.path().join("marker")).unwrap();
    assert_eq!(marker, "x86_64");
}

#[cfg(unix)]
#[test]
fn test_executor_through_command_runner_port_reports_failure() {
    let root = tempfile::TempDir::new().unwrap();
    let executor = Executor::new(root.path(), ExecutorConfig::default()).unwrap();
    let runner: &dyn CommandRunner = &executor;

    let err = runner.run("sh", &["-c", "exit 7"], &[]).unwrap_err();

    match err {
        SbomError::CommandFailed { command, status } => {
            assert_eq!(command, "sh -c exit 7");
            assert!(status.contains('7'));
        }
        other => panic!("expected CommandFailed, got {:?}", other),
    }
}

#[test]
fn test_executor_missing_emulator_is_configuration_error() {
    let root = tempfile::TempDir::new().unwrap();
    let empty_path = tempfile::TempDir::new().unwrap();

    let result = Executor::with_search_path(
        root.path(),
        ExecutorConfig::default().with_emulated_arch("s390x"),
        empty_path.path().as_os_str(),
    );

    assert!(matches!(result, Err(SbomError::ConfigurationError { .. })));
}

#[test]
fn test_parser_reads_database_from_any_reader() {
    let records = PackageIndexParser::parse(INSTALLED_DB.as_bytes(), Path::new("memory")).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].files.len(), 2);
}
