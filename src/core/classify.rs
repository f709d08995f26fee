//! Build input classification
//!
//! The build directory is polymorphic over two variants. A precompiled
//! deployment package carries its runtime version in `model/metadata.json`;
//! raw project sources carry exactly one `.mpr` project file, whose embedded
//! SQLite metadata table pins the product version. More than one project
//! file at the top level is a user-visible configuration error.

use semver::Version;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::defaults;
use crate::error::ClassifyError;

/// Classified build input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildInput {
    /// Ready-to-stage deployment package
    Precompiled {
        /// Runtime version from the deployment metadata
        runtime_version: Version,
    },
    /// Raw project sources requiring compilation
    Source {
        /// The single top-level project file
        project_file: PathBuf,
        /// Product version read from the project database
        runtime_version: Version,
    },
}

impl BuildInput {
    /// Runtime version pinning the archives to fetch
    pub fn runtime_version(&self) -> &Version {
        match self {
            BuildInput::Precompiled { runtime_version }
            | BuildInput::Source { runtime_version, .. } => runtime_version,
        }
    }
}

/// Deployment metadata shape, as far as this pipeline cares
#[derive(Debug, Deserialize)]
struct DeploymentMetadata {
    #[serde(rename = "RuntimeVersion")]
    runtime_version: Option<String>,
}

/// Classify the build directory
pub fn classify(build_dir: &Path) -> Result<BuildInput, ClassifyError> {
    let mut project_files = find_project_files(build_dir)?;

    match project_files.len() {
        0 => {
            let runtime_version = metadata_version(build_dir)?;
            debug!(%runtime_version, "classified as precompiled package");
            Ok(BuildInput::Precompiled { runtime_version })
        }
        1 => {
            let project_file = project_files.remove(0);
            let runtime_version = project_version(&project_file)?;
            debug!(%runtime_version, project = %project_file.display(), "classified as project source");
            Ok(BuildInput::Source {
                project_file,
                runtime_version,
            })
        }
        count => Err(ClassifyError::AmbiguousProjectFile { count }),
    }
}

/// Top-level `.mpr` files of the build directory, sorted for determinism
fn find_project_files(build_dir: &Path) -> Result<Vec<PathBuf>, ClassifyError> {
    let entries = std::fs::read_dir(build_dir).map_err(|e| ClassifyError::ScanFailed {
        path: build_dir.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ClassifyError::ScanFailed {
            path: build_dir.to_path_buf(),
            error: e.to_string(),
        })?;

        let path = entry.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == defaults::PROJECT_EXTENSION)
        {
            found.push(path);
        }
    }

    found.sort();
    Ok(found)
}

/// Runtime version from `model/metadata.json` of a deployment package
fn metadata_version(build_dir: &Path) -> Result<Version, ClassifyError> {
    let path = build_dir.join(defaults::METADATA_FILE);

    if !path.exists() {
        return Err(ClassifyError::MetadataMissing { path });
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ClassifyError::MetadataParse {
        path: path.clone(),
        error: e.to_string(),
    })?;

    let metadata: DeploymentMetadata =
        serde_json::from_str(&content).map_err(|e| ClassifyError::MetadataParse {
            path: path.clone(),
            error: e.to_string(),
        })?;

    let raw = metadata
        .runtime_version
        .ok_or_else(|| ClassifyError::MetadataFieldMissing {
            path,
            field: defaults::METADATA_VERSION_FIELD.to_string(),
        })?;

    parse_version(&raw)
}

/// Product version from the project database
///
/// The `.mpr` file is a SQLite database with a single-row metadata table.
/// Any failure here is fatal upstream: without a version there is no way to
/// pick the mxbuild and runtime archives.
fn project_version(project_file: &Path) -> Result<Version, ClassifyError> {
    let raw = read_product_version(project_file).map_err(|e| ClassifyError::VersionUnreadable {
        path: project_file.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_version(&raw)
}

fn read_product_version(project_file: &Path) -> Result<String, rusqlite::Error> {
    let conn = rusqlite::Connection::open_with_flags(
        project_file,
        rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
    )?;

    let query = format!(
        "SELECT {} FROM {} LIMIT 1",
        defaults::PROJECT_VERSION_COLUMN,
        defaults::PROJECT_METADATA_TABLE
    );
    conn.query_row(&query, [], |row| row.get(0))
}

/// Parse a runtime version string, distinguishing the unparsable case
fn parse_version(raw: &str) -> Result<Version, ClassifyError> {
    Version::parse(raw.trim()).map_err(|e| ClassifyError::VersionParse {
        version: raw.to_string(),
        error: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_metadata(dir: &Path, content: &str) {
        std::fs::create_dir_all(dir.join("model")).unwrap();
        std::fs::write(dir.join("model/metadata.json"), content).unwrap();
    }

    fn write_project_db(path: &Path, version: Option<&str>) {
        let conn = rusqlite::Connection::open(path).unwrap();
        if let Some(v) = version {
            conn.execute("CREATE TABLE _MetaData (_ProductVersion TEXT)", [])
                .unwrap();
            conn.execute("INSERT INTO _MetaData VALUES (?1)", [v])
                .unwrap();
        }
    }

    #[test]
    fn test_no_project_file_is_precompiled() {
        let temp = TempDir::new().unwrap();
        write_metadata(temp.path(), r#"{"RuntimeVersion": "7.1.0"}"#);

        let input = classify(temp.path()).unwrap();
        assert_eq!(
            input,
            BuildInput::Precompiled {
                runtime_version: Version::new(7, 1, 0)
            }
        );
    }

    #[test]
    fn test_single_project_file_is_source() {
        let temp = TempDir::new().unwrap();
        let mpr = temp.path().join("app.mpr");
        write_project_db(&mpr, Some("6.10.3"));

        let input = classify(temp.path()).unwrap();
        match input {
            BuildInput::Source {
                project_file,
                runtime_version,
            } => {
                assert_eq!(project_file, mpr);
                assert_eq!(runtime_version, Version::new(6, 10, 3));
            }
            other => panic!("Expected Source, got: {other:?}"),
        }
    }

    #[test]
    fn test_multiple_project_files_are_ambiguous() {
        let temp = TempDir::new().unwrap();
        write_project_db(&temp.path().join("one.mpr"), Some("6.10.3"));
        write_project_db(&temp.path().join("two.mpr"), Some("6.10.3"));

        match classify(temp.path()).unwrap_err() {
            ClassifyError::AmbiguousProjectFile { count } => assert_eq!(count, 2),
            e => panic!("Expected AmbiguousProjectFile, got: {e:?}"),
        }
    }

    #[test]
    fn test_nested_project_files_are_ignored() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("sub")).unwrap();
        write_project_db(&temp.path().join("sub/nested.mpr"), Some("6.10.3"));
        write_metadata(temp.path(), r#"{"RuntimeVersion": "7.1.0"}"#);

        // Only the top level is scanned.
        assert!(matches!(
            classify(temp.path()).unwrap(),
            BuildInput::Precompiled { .. }
        ));
    }

    #[test]
    fn test_missing_metadata_is_fatal() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            classify(temp.path()).unwrap_err(),
            ClassifyError::MetadataMissing { .. }
        ));
    }

    #[test]
    fn test_malformed_metadata_is_fatal() {
        let temp = TempDir::new().unwrap();
        write_metadata(temp.path(), "{not json");

        assert!(matches!(
            classify(temp.path()).unwrap_err(),
            ClassifyError::MetadataParse { .. }
        ));
    }

    #[test]
    fn test_metadata_without_version_field_is_fatal() {
        let temp = TempDir::new().unwrap();
        write_metadata(temp.path(), r#"{"ModelVersion": "1.0"}"#);

        assert!(matches!(
            classify(temp.path()).unwrap_err(),
            ClassifyError::MetadataFieldMissing { .. }
        ));
    }

    #[test]
    fn test_unparsable_version_is_distinguished() {
        let temp = TempDir::new().unwrap();
        write_metadata(temp.path(), r#"{"RuntimeVersion": "seven-ish"}"#);

        match classify(temp.path()).unwrap_err() {
            ClassifyError::VersionParse { version, .. } => assert_eq!(version, "seven-ish"),
            e => panic!("Expected VersionParse, got: {e:?}"),
        }
    }

    #[test]
    fn test_corrupt_project_database_is_fatal() {
        let temp = TempDir::new().unwrap();
        let mpr = temp.path().join("app.mpr");
        std::fs::write(&mpr, b"this is not a sqlite database at all............").unwrap();

        assert!(matches!(
            classify(temp.path()).unwrap_err(),
            ClassifyError::VersionUnreadable { .. }
        ));
    }

    #[test]
    fn test_project_database_without_metadata_table_is_fatal() {
        let temp = TempDir::new().unwrap();
        let mpr = temp.path().join("app.mpr");
        write_project_db(&mpr, None);

        assert!(matches!(
            classify(temp.path()).unwrap_err(),
            ClassifyError::VersionUnreadable { .. }
        ));
    }
}
