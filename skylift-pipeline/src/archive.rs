//! Source folder packaging
//!
//! Turns the user's folder into a gzipped tarball Cloud Build can consume.
//! Validation happens here, before any network traffic: the folder must
//! contain at least one file and a `Dockerfile` at its root.

use std::io;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use skylift_core::domain::archive::SourceArchive;

/// Why a folder could not be packaged
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("no file named 'Dockerfile' found at the root of the selected folder")]
    MissingDockerfile,

    #[error("the selected folder contains no files")]
    Empty,

    #[error("failed to read the selected folder: {0}")]
    Io(#[from] io::Error),
}

/// Package a folder as a gzipped tarball
///
/// Entry paths are relative to `root`, so the archive root is the folder's
/// content (the build expects the Dockerfile at `.`).
pub fn package_folder(root: &Path) -> Result<SourceArchive, ArchiveError> {
    let files = collect_files(root)?;

    if files.is_empty() {
        return Err(ArchiveError::Empty);
    }
    if !files.iter().any(|(rel, _)| rel == Path::new("Dockerfile")) {
        return Err(ArchiveError::MissingDockerfile);
    }

    debug!("packaging {} files from {}", files.len(), root.display());

    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (rel, path) in &files {
        builder.append_path_with_name(path, rel)?;
    }
    let bytes = builder.into_inner()?.finish()?;

    Ok(SourceArchive::new(bytes, files.len()))
}

/// All regular files under `root`, as (relative, absolute) path pairs.
fn collect_files(root: &Path) -> Result<Vec<(PathBuf, PathBuf)>, ArchiveError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(root) {
            files.push((rel.to_path_buf(), entry.path().to_path_buf()));
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::fs;

    /// Unique scratch folder per test; removed on success.
    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "skylift-archive-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn archive_entries(bytes: &[u8]) -> Vec<String> {
        let mut archive = tar::Archive::new(GzDecoder::new(bytes));
        archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_packages_folder_with_dockerfile() {
        let dir = scratch("ok");
        fs::write(dir.join("Dockerfile"), "FROM scratch\n").unwrap();
        fs::write(dir.join("main.py"), "print('hi')\n").unwrap();

        let archive = package_folder(&dir).unwrap();
        assert_eq!(archive.entry_count, 2);
        // gzip magic
        assert_eq!(&archive.bytes[..2], &[0x1f, 0x8b]);

        let entries = archive_entries(&archive.bytes);
        assert!(entries.contains(&"Dockerfile".to_string()));
        assert!(entries.contains(&"main.py".to_string()));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_nested_files_keep_relative_paths() {
        let dir = scratch("nested");
        fs::write(dir.join("Dockerfile"), "FROM scratch\n").unwrap();
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::write(dir.join("src/app.js"), "module.exports = {};\n").unwrap();

        let archive = package_folder(&dir).unwrap();
        let entries = archive_entries(&archive.bytes);
        assert!(entries.contains(&"src/app.js".to_string()));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_dockerfile_fails() {
        let dir = scratch("no-dockerfile");
        fs::write(dir.join("main.py"), "print('hi')\n").unwrap();

        let result = package_folder(&dir);
        assert!(matches!(result, Err(ArchiveError::MissingDockerfile)));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_dockerfile_below_root_does_not_count() {
        let dir = scratch("nested-dockerfile");
        fs::create_dir_all(dir.join("sub")).unwrap();
        fs::write(dir.join("sub/Dockerfile"), "FROM scratch\n").unwrap();

        let result = package_folder(&dir);
        assert!(matches!(result, Err(ArchiveError::MissingDockerfile)));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_folder_fails() {
        let dir = scratch("empty");

        let result = package_folder(&dir);
        assert!(matches!(result, Err(ArchiveError::Empty)));

        fs::remove_dir_all(&dir).unwrap();
    }
}
