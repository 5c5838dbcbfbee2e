//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use rebrand_core::application::{
    ApplicationError,
    ports::{EntryKind, Filesystem, FsResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn entry_kind(&self, path: &Path) -> EntryKind {
        let Ok(metadata) = fs::symlink_metadata(path) else {
            return EntryKind::Missing;
        };
        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }

    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read"))
    }

    fn write_file(&self, path: &Path, content: &str) -> FsResult<()> {
        // Write through symlinks to the file they point at.
        let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let temp = temp_sibling(&target);

        let written = fs::write(&temp, content).and_then(|()| {
            if let Ok(metadata) = fs::metadata(&target) {
                fs::set_permissions(&temp, metadata.permissions())?;
            }
            fs::rename(&temp, &target)
        });

        if let Err(e) = written {
            let _ = fs::remove_file(&temp);
            return Err(map_io_error(path, e, "write"));
        }
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn move_file(&self, from: &Path, to: &Path) -> FsResult<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if is_cross_device(&e) => {
                debug!(from = %from.display(), to = %to.display(), "Rename crosses devices, copying");
                copy_then_remove(from, to).map_err(|e| map_io_error(from, e, "move"))
            }
            Err(e) => Err(map_io_error(from, e, "move")),
        }
    }

    fn rename_dir(&self, from: &Path, to: &Path) -> FsResult<()> {
        if to.exists() {
            return Err(map_io_error(
                to,
                io::Error::new(io::ErrorKind::AlreadyExists, "destination exists"),
                "rename directory",
            ));
        }
        fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename directory"))
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<PathBuf>> {
        let entries = fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))?;

        let mut paths = entries
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()
            .map_err(|e| map_io_error(path, e, "list directory"))?;
        paths.sort();
        Ok(paths)
    }

    fn remove_dir(&self, path: &Path) -> FsResult<()> {
        fs::remove_dir(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn temp_sibling(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
}

fn is_cross_device(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::CrossesDevices
}

fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    if fs::symlink_metadata(from)?.file_type().is_symlink() {
        let link = fs::read_link(from)?;
        if to.exists() {
            fs::remove_file(to)?;
        }
        make_symlink(&link, to)?;
    } else {
        fs::copy(from, to)?;
    }
    fs::remove_file(from)
}

#[cfg(unix)]
fn make_symlink(link: &Path, at: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(link, at)
}

#[cfg(not(unix))]
fn make_symlink(_link: &Path, _at: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "moving symlinks across devices is not supported on this platform",
    ))
}

fn map_io_error(path: &Path, e: io::Error, operation: &'static str) -> ApplicationError {
    ApplicationError::FileAccess {
        path: path.to_path_buf(),
        operation,
        reason: e.to_string(),
    }
}
