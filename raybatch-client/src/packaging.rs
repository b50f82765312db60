//! Working directory packaging
//!
//! A cluster cannot read the submitter's disk, so a local working directory
//! is zipped and uploaded once, then referenced by a content-addressed URI of
//! the form `gcs://_ray_pkg_<hash>.zip`.

use ignore::WalkBuilder;
use sha2::{Digest, Sha256};
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::debug;
use zip::{ZipWriter, write::FileOptions};

use crate::error::{ClientError, Result};

/// Protocol under which the cluster stores uploaded packages
pub const PACKAGE_PROTOCOL: &str = "gcs";

/// File name prefix of uploaded packages
pub const PACKAGE_PREFIX: &str = "_ray_pkg_";

/// Largest working directory, in bytes of file contents, the cluster accepts
pub const MAX_PACKAGE_SIZE: u64 = 512 * 1024 * 1024;

/// A zipped working directory, ready to upload
#[derive(Debug, Clone)]
pub struct Package {
    /// Content-addressed URI, e.g. `gcs://_ray_pkg_0a1b....zip`
    pub uri: String,
    /// Zip archive bytes
    pub bytes: Vec<u8>,
}

/// Whether `working_dir` already names a remote package rather than a local path
pub fn is_remote_uri(working_dir: &str) -> bool {
    working_dir.contains("://")
}

/// Split a package URI into `(protocol, package_name)`
pub fn split_uri(uri: &str) -> Result<(&str, &str)> {
    match uri.split_once("://") {
        Some((protocol, name)) if !protocol.is_empty() && !name.is_empty() => Ok((protocol, name)),
        _ => Err(ClientError::InvalidRequest(format!(
            "invalid package URI: {}",
            uri
        ))),
    }
}

/// Zip `dir` and compute its package URI
///
/// `.git` is never packaged and paths matched by `.gitignore` or `.ignore`
/// files inside `dir` are skipped. Entries are added in file name order with
/// fixed timestamps, and the hash covers relative paths and file contents
/// only, so identical trees always map to the same URI.
pub fn package_directory(dir: &Path) -> Result<Package> {
    package_directory_with_limit(dir, MAX_PACKAGE_SIZE)
}

fn package_directory_with_limit(dir: &Path, limit: u64) -> Result<Package> {
    if !dir.is_dir() {
        return Err(ClientError::InvalidRequest(format!(
            "working directory {} is not a directory",
            dir.display()
        )));
    }

    let walker = WalkBuilder::new(dir)
        .hidden(false)
        .parents(false)
        .git_global(false)
        .git_exclude(false)
        .require_git(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    let mut hasher = Sha256::new();
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options: FileOptions<'_, ()> = FileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut files = 0usize;
    let mut total: u64 = 0;
    for entry in walker {
        let entry = entry?;
        if entry.depth() == 0 {
            continue;
        }

        let name = archive_name(entry.path(), dir);
        let Some(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            hasher.update(b"d:");
            hasher.update(name.as_bytes());
            hasher.update([0]);
            zip.add_directory(name, options)?;
        } else if file_type.is_file() {
            // Stop before reading anything once the tree is known to be too big.
            total += entry.metadata()?.len();
            if total > limit {
                return Err(ClientError::PackageTooLarge { size: total, limit });
            }

            let contents = std::fs::read(entry.path())?;
            hasher.update(b"f:");
            hasher.update(name.as_bytes());
            hasher.update([0]);
            hasher.update(&contents);
            zip.start_file(name, options)?;
            zip.write_all(&contents)?;
            files += 1;
        } else {
            debug!("Skipping non-regular file {}", entry.path().display());
        }
    }

    let bytes = zip.finish()?.into_inner();

    let digest = hasher.finalize();
    let hash: String = digest[..16].iter().map(|b| format!("{:02x}", b)).collect();
    let uri = format!("{}://{}{}.zip", PACKAGE_PROTOCOL, PACKAGE_PREFIX, hash);

    debug!(
        "Packaged {} ({} files, {} bytes) as {}",
        dir.display(),
        files,
        bytes.len(),
        uri
    );

    Ok(Package { uri, bytes })
}

/// Archive path of `path` relative to `root`, always `/`-separated
fn archive_name(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
