//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use rebrand_core::application::{
    ApplicationError,
    ports::{EntryKind, Filesystem, FsResult},
};

/// In-memory filesystem for testing.
///
/// Directories must exist before files are written into them, and
/// `remove_dir` refuses non-empty directories, so relocation behaves the
/// same as on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn has_children(&self, path: &Path) -> bool {
        self.files.keys().any(|p| p.parent() == Some(path))
            || self.directories.iter().any(|p| p.parent() == Some(path))
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.directories.contains(parent),
            _ => true,
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file and its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            insert_ancestors(&mut inner.directories, path.parent());
            inner.files.insert(path.to_path_buf(), content.to_string());
        }
        self
    }

    /// Add a directory and its parents (testing helper).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            insert_ancestors(&mut inner.directories, Some(path.as_ref()));
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// List all directories, sorted.
    pub fn list_directories(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self, path: &Path) -> FsResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_error(path))
    }

    fn write(&self, path: &Path) -> FsResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| lock_error(path))
    }
}

impl Filesystem for MemoryFilesystem {
    fn entry_kind(&self, path: &Path) -> EntryKind {
        let Ok(inner) = self.inner.read() else {
            return EntryKind::Missing;
        };
        if inner.directories.contains(path) {
            EntryKind::Directory
        } else if inner.files.contains_key(path) {
            EntryKind::File
        } else {
            EntryKind::Missing
        }
    }

    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        self.read(path)?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path, "read"))
    }

    fn write_file(&self, path: &Path, content: &str) -> FsResult<()> {
        let mut inner = self.write(path)?;

        if !inner.parent_exists(path) {
            return Err(ApplicationError::FileAccess {
                path: path.to_path_buf(),
                operation: "write",
                reason: "parent directory does not exist".into(),
            });
        }
        if inner.directories.contains(path) {
            return Err(ApplicationError::FileAccess {
                path: path.to_path_buf(),
                operation: "write",
                reason: "is a directory".into(),
            });
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        let mut inner = self.write(path)?;

        if path
            .ancestors()
            .any(|dir| inner.files.contains_key(dir))
        {
            return Err(ApplicationError::FileAccess {
                path: path.to_path_buf(),
                operation: "create directory",
                reason: "a file exists in the way".into(),
            });
        }

        insert_ancestors(&mut inner.directories, Some(path));
        Ok(())
    }

    fn move_file(&self, from: &Path, to: &Path) -> FsResult<()> {
        let mut inner = self.write(from)?;

        if !inner.parent_exists(to) || inner.directories.contains(to) {
            return Err(ApplicationError::FileAccess {
                path: to.to_path_buf(),
                operation: "move",
                reason: "invalid destination".into(),
            });
        }
        let content = inner
            .files
            .remove(from)
            .ok_or_else(|| not_found(from, "move"))?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn rename_dir(&self, from: &Path, to: &Path) -> FsResult<()> {
        let mut inner = self.write(from)?;

        if !inner.directories.contains(from) {
            return Err(not_found(from, "rename directory"));
        }
        if inner.directories.contains(to) || inner.files.contains_key(to) {
            return Err(ApplicationError::FileAccess {
                path: to.to_path_buf(),
                operation: "rename directory",
                reason: "destination exists".into(),
            });
        }

        let rebase = |p: &Path| p.strip_prefix(from).map(|rel| to.join(rel)).ok();

        let dirs: Vec<_> = inner
            .directories
            .iter()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for dir in dirs {
            inner.directories.remove(&dir);
            if let Some(new) = rebase(&dir) {
                inner.directories.insert(new);
            }
        }

        let files: Vec<_> = inner
            .files
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for file in files {
            if let (Some(content), Some(new)) = (inner.files.remove(&file), rebase(&file)) {
                inner.files.insert(new, content);
            }
        }
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<PathBuf>> {
        let inner = self.read(path)?;

        if !inner.directories.contains(path) {
            return Err(not_found(path, "list directory"));
        }

        let entries: BTreeSet<PathBuf> = inner
            .directories
            .iter()
            .chain(inner.files.keys())
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        Ok(entries.into_iter().collect())
    }

    fn remove_dir(&self, path: &Path) -> FsResult<()> {
        let mut inner = self.write(path)?;

        if !inner.directories.contains(path) {
            return Err(not_found(path, "remove directory"));
        }
        if inner.has_children(path) {
            return Err(ApplicationError::FileAccess {
                path: path.to_path_buf(),
                operation: "remove directory",
                reason: "directory not empty".into(),
            });
        }

        inner.directories.remove(path);
        Ok(())
    }
}

fn insert_ancestors(directories: &mut BTreeSet<PathBuf>, path: Option<&Path>) {
    let Some(path) = path else { return };
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn not_found(path: &Path, operation: &'static str) -> ApplicationError {
    ApplicationError::FileAccess {
        path: path.to_path_buf(),
        operation,
        reason: "no such file or directory".into(),
    }
}

fn lock_error(path: &Path) -> ApplicationError {
    ApplicationError::FileAccess {
        path: path.to_path_buf(),
        operation: "lock",
        reason: "memory filesystem lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebrand_core::application::{InitService, RootOutcome};
    use rebrand_core::domain::InitSpec;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("a/b.txt"), "x").is_err());

        fs.create_dir_all(Path::new("a")).unwrap();
        fs.write_file(Path::new("a/b.txt"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("a/b.txt")).as_deref(), Some("x"));
    }

    #[test]
    fn remove_dir_refuses_non_empty() {
        let fs = MemoryFilesystem::new().with_file("d/f", "");

        assert!(fs.remove_dir(Path::new("d")).is_err());
        fs.move_file(Path::new("d/f"), Path::new("f")).unwrap();
        fs.remove_dir(Path::new("d")).unwrap();
        assert_eq!(fs.entry_kind(Path::new("d")), EntryKind::Missing);
    }

    #[test]
    fn rename_dir_moves_subtree() {
        let fs = MemoryFilesystem::new()
            .with_file("a/b/F.kt", "f")
            .with_dir("a/b/empty");

        fs.rename_dir(Path::new("a/b"), Path::new("s")).unwrap();

        assert_eq!(fs.read_file(Path::new("s/F.kt")).as_deref(), Some("f"));
        assert_eq!(fs.entry_kind(Path::new("s/empty")), EntryKind::Directory);
        assert_eq!(fs.entry_kind(Path::new("a/b")), EntryKind::Missing);
        assert_eq!(fs.entry_kind(Path::new("a")), EntryKind::Directory);
    }

    #[test]
    fn list_dir_returns_direct_children_only() {
        let fs = MemoryFilesystem::new()
            .with_file("r/b.txt", "")
            .with_file("r/a/deep.txt", "");

        let entries = fs.list_dir(Path::new("r")).unwrap();
        assert_eq!(entries, [PathBuf::from("r/a"), PathBuf::from("r/b.txt")]);
    }

    #[test]
    fn initialize_in_memory() {
        let fs = MemoryFilesystem::new()
            .with_file("p/README.md", "Krust by a.b")
            .with_file("p/src/a/b/Main.kt", "package a.b")
            .with_file("p/src/Keep.kt", "");

        let spec = InitSpec::builder()
            .project_root("p")
            .from_id("a.b")
            .from_name("Krust")
            .to_id("x.y.z")
            .to_name("Rocket")
            .files(["README.md", "src/a/b/Main.kt"])
            .source_root("src")
            .build()
            .unwrap();

        let report = InitService::new(Box::new(fs.clone()))
            .initialize(&spec)
            .unwrap();

        assert!(report.is_success());
        assert!(matches!(
            report.relocation.roots[0].outcome,
            RootOutcome::Relocated { .. }
        ));
        assert_eq!(
            fs.read_file(Path::new("p/README.md")).as_deref(),
            Some("Rocket by x.y.z")
        );
        assert_eq!(
            fs.read_file(Path::new("p/src/x/y/z/Main.kt")).as_deref(),
            Some("package x.y.z")
        );
        assert_eq!(fs.entry_kind(Path::new("p/src/a")), EntryKind::Missing);
        assert_eq!(fs.entry_kind(Path::new("p/src")), EntryKind::Directory);
    }
}
