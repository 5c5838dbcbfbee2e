//! Tree relocator - move a namespace directory and prune what it leaves.
//!
//! For each source root, `root/<from>` is merged into `root/<to>`:
//!
//! 1. destination directories are created pre-order (existing ones reused),
//! 2. files are moved, replacing files already at the destination,
//! 3. each source directory is removed once its content is gone (post-order),
//! 4. empty ancestors of `root/<from>` are removed bottom-up, stopping at the
//!    first missing or non-empty one and never touching the root itself or
//!    the destination and its ancestors.
//!
//! Roots are independent. A failure aborts the current root only; roots
//! already relocated stay relocated.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{EntryKind, Filesystem, FsResult},
        report::{RelocationReport, RelocationStats, RootOutcome, RootReport},
    },
    domain::RelocationSpec,
};

use super::Mode;

const STAGING_PREFIX: &str = ".rebrand-staging-";

/// Moves the dotted-id subtree under every source root.
pub struct TreeRelocator<'fs> {
    filesystem: &'fs dyn Filesystem,
}

/// Explicit depth-first walk steps.
enum Visit {
    Enter(PathBuf),
    Leave(PathBuf),
}

/// One root's move: where the content comes from and where it goes.
struct Move<'a> {
    root: &'a Path,
    source: PathBuf,
    destination: &'a Path,
    /// Preview of an overlapping move: the source tree staging would clear
    /// out of the way, so destinations inside it count as missing.
    vacated: Option<&'a Path>,
}

impl Move<'_> {
    fn destination_of(&self, path: &Path) -> PathBuf {
        match path.strip_prefix(&self.source) {
            Ok(rel) if !rel.as_os_str().is_empty() => self.destination.join(rel),
            _ => self.destination.to_path_buf(),
        }
    }
}

impl<'fs> TreeRelocator<'fs> {
    pub fn new(filesystem: &'fs dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Relocate every source root in order.
    #[instrument(skip_all, fields(from = %spec.from_fragment.display(), to = %spec.to_fragment.display()))]
    pub fn relocate(&self, spec: &RelocationSpec) -> RelocationReport {
        self.run(spec, Mode::Apply)
    }

    /// Report what [`Self::relocate`] would do without touching the tree.
    #[instrument(skip_all, fields(from = %spec.from_fragment.display(), to = %spec.to_fragment.display()))]
    pub fn preview(&self, spec: &RelocationSpec) -> RelocationReport {
        self.run(spec, Mode::Preview)
    }

    pub(crate) fn run(&self, spec: &RelocationSpec, mode: Mode) -> RelocationReport {
        let roots = spec
            .source_roots
            .iter()
            .map(|root| self.relocate_root(spec, root, mode))
            .collect();
        RelocationReport { roots }
    }

    fn relocate_root(&self, spec: &RelocationSpec, root: &Path, mode: Mode) -> RootReport {
        let from_dir = root.join(&spec.from_fragment);
        let to_dir = root.join(&spec.to_fragment);
        let mut report = RootReport {
            source_root: root.to_path_buf(),
            from_dir: from_dir.clone(),
            to_dir: to_dir.clone(),
            outcome: RootOutcome::Skipped,
            prune_warnings: Vec::new(),
        };

        match self.filesystem.entry_kind(&from_dir) {
            EntryKind::Missing => {
                debug!(root = %root.display(), "No source tree under root");
                return report;
            }
            EntryKind::Directory => {}
            _ => {
                report.outcome = RootOutcome::Failed {
                    stats: RelocationStats::default(),
                    error: ApplicationError::Relocation {
                        path: from_dir,
                        operation: "relocate",
                        reason: "source is not a directory".into(),
                    },
                };
                return report;
            }
        }

        if spec.is_identity() {
            debug!(root = %root.display(), "Source and destination are the same");
            report.outcome = RootOutcome::Unchanged;
            return report;
        }

        let mut stats = RelocationStats::default();
        if let Err(error) = self.move_tree(root, &from_dir, &to_dir, spec, mode, &mut stats) {
            warn!(root = %root.display(), %error, "Relocation aborted");
            report.outcome = RootOutcome::Failed { stats, error };
            return report;
        }

        report.prune_warnings = self.prune_ancestors(root, &from_dir, &to_dir, mode, &mut stats);
        info!(
            root = %root.display(),
            files = stats.files_moved,
            overwritten = stats.files_overwritten,
            pruned = stats.ancestors_pruned,
            "Relocated source tree"
        );
        report.outcome = RootOutcome::Relocated { stats };
        report
    }

    fn move_tree(
        &self,
        root: &Path,
        from_dir: &Path,
        to_dir: &Path,
        spec: &RelocationSpec,
        mode: Mode,
        stats: &mut RelocationStats,
    ) -> FsResult<()> {
        let mut plan = Move {
            root,
            source: from_dir.to_path_buf(),
            destination: to_dir,
            vacated: None,
        };

        // Moving `a/b` into `a/b/c` (or back out into `a`) would walk into
        // its own output, so the source is first parked next to the root.
        if spec.overlaps() {
            if mode.applies() {
                let staging = root.join(format!("{STAGING_PREFIX}{}", Uuid::new_v4().simple()));
                debug!(from = %from_dir.display(), staging = %staging.display(), "Staging nested source");
                self.filesystem
                    .rename_dir(from_dir, &staging)
                    .map_err(ApplicationError::into_relocation)?;
                plan.source = staging;
            } else {
                plan.vacated = Some(from_dir);
            }
        }

        match self.fill_destination(&plan, mode, stats) {
            Err(error) if plan.source.as_path() != from_dir => {
                Err(self.unstage(&plan.source, from_dir, error))
            }
            result => result,
        }
    }

    fn fill_destination(
        &self,
        plan: &Move<'_>,
        mode: Mode,
        stats: &mut RelocationStats,
    ) -> FsResult<()> {
        match self.destination_kind(plan, plan.destination) {
            EntryKind::Missing | EntryKind::Directory => {}
            _ => {
                return Err(conflict(
                    plan.destination,
                    "a file is in the way of a directory",
                ));
            }
        }
        stats.dirs_created += self.missing_ancestors(plan);
        if mode.applies() {
            self.filesystem
                .create_dir_all(plan.destination)
                .map_err(ApplicationError::into_relocation)?;
        }

        self.walk(plan, mode, stats)
            .map_err(ApplicationError::into_relocation)
    }

    /// Put a staged source tree back after a failed move.
    ///
    /// When that is impossible the error names the staging directory, the
    /// only place the unmoved content is left.
    fn unstage(&self, staging: &Path, from_dir: &Path, error: ApplicationError) -> ApplicationError {
        match self.filesystem.rename_dir(staging, from_dir) {
            Ok(()) => {
                info!(dir = %from_dir.display(), "Restored staged source tree");
                error
            }
            Err(restore) => {
                warn!(staging = %staging.display(), %restore, "Staged source tree left in place");
                let left_at = format!("unmoved content left in {}", staging.display());
                match error {
                    ApplicationError::Relocation {
                        path,
                        operation,
                        reason,
                    } => ApplicationError::Relocation {
                        path,
                        operation,
                        reason: format!("{reason}; {left_at}"),
                    },
                    other => ApplicationError::Relocation {
                        path: staging.to_path_buf(),
                        operation: "relocate",
                        reason: format!("{other}; {left_at}"),
                    },
                }
            }
        }
    }

    fn destination_kind(&self, plan: &Move<'_>, path: &Path) -> EntryKind {
        match plan.vacated {
            Some(vacated) if path.starts_with(vacated) => EntryKind::Missing,
            _ => self.filesystem.entry_kind(path),
        }
    }

    fn walk(&self, plan: &Move<'_>, mode: Mode, stats: &mut RelocationStats) -> FsResult<()> {
        let mut stack = vec![Visit::Enter(plan.source.clone())];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(dir) => {
                    let dest = plan.destination_of(&dir);
                    if dest != plan.destination {
                        self.ensure_directory(plan, &dest, mode, stats)?;
                    }

                    stack.push(Visit::Leave(dir.clone()));
                    let entries = self.filesystem.list_dir(&dir)?;
                    let mut subdirs = Vec::new();

                    for entry in entries {
                        if self.filesystem.entry_kind(&entry) == EntryKind::Directory {
                            subdirs.push(entry);
                        } else {
                            let target = plan.destination_of(&entry);
                            self.move_entry(plan, &entry, &target, mode, stats)?;
                        }
                    }

                    // Reversed so the stack pops them in listing order.
                    stack.extend(subdirs.into_iter().rev().map(Visit::Enter));
                }
                Visit::Leave(dir) => {
                    if mode.applies() {
                        self.filesystem.remove_dir(&dir)?;
                        debug!(dir = %dir.display(), "Removed source directory");
                    }
                    stats.dirs_removed += 1;
                }
            }
        }

        debug!(root = %plan.root.display(), "Walk complete");
        Ok(())
    }

    fn ensure_directory(
        &self,
        plan: &Move<'_>,
        dest: &Path,
        mode: Mode,
        stats: &mut RelocationStats,
    ) -> FsResult<()> {
        match self.destination_kind(plan, dest) {
            EntryKind::Directory => Ok(()),
            EntryKind::Missing => {
                if mode.applies() {
                    self.filesystem.create_dir_all(dest)?;
                    debug!(dir = %dest.display(), "Created directory");
                }
                stats.dirs_created += 1;
                Ok(())
            }
            _ => Err(conflict(dest, "a file is in the way of a directory")),
        }
    }

    fn move_entry(
        &self,
        plan: &Move<'_>,
        from: &Path,
        to: &Path,
        mode: Mode,
        stats: &mut RelocationStats,
    ) -> FsResult<()> {
        let overwrites = match self.destination_kind(plan, to) {
            EntryKind::Missing => false,
            EntryKind::Directory => {
                return Err(conflict(to, "a directory is in the way of a file"));
            }
            _ => true,
        };

        if mode.applies() {
            self.filesystem.move_file(from, to)?;
            info!(from = %from.display(), to = %to.display(), overwrites, "Moved file");
        }

        stats.files_moved += 1;
        if overwrites {
            stats.files_overwritten += 1;
        }
        Ok(())
    }

    /// Number of directories `create_dir_all` on the destination would
    /// create, counting only those inside the root.
    fn missing_ancestors(&self, plan: &Move<'_>) -> usize {
        plan.destination
            .ancestors()
            .take_while(|dir| *dir != plan.root && dir.starts_with(plan.root))
            .take_while(|dir| self.destination_kind(plan, dir) == EntryKind::Missing)
            .count()
    }

    /// Remove empty ancestors of `from_dir`, bottom-up.
    ///
    /// Loop invariant: every directory below `current` on the way to
    /// `from_dir` has been removed. Stops at the first ancestor that is
    /// missing, non-empty, the root, or holds the destination. A failure
    /// stops pruning and is returned as a warning.
    fn prune_ancestors(
        &self,
        root: &Path,
        from_dir: &Path,
        to_dir: &Path,
        mode: Mode,
        stats: &mut RelocationStats,
    ) -> Vec<ApplicationError> {
        let mut warnings = Vec::new();
        let mut removed_child = from_dir.to_path_buf();
        let mut current = from_dir.parent();

        while let Some(dir) = current {
            if dir == root || !dir.starts_with(root) || to_dir.starts_with(dir) {
                break;
            }
            if self.filesystem.entry_kind(dir) != EntryKind::Directory {
                break;
            }

            let entries = match self.filesystem.list_dir(dir) {
                Ok(entries) => entries,
                Err(error) => {
                    let error = error.into_prune();
                    warn!(%error, "Pruning stopped");
                    warnings.push(error);
                    break;
                }
            };

            // A dry run has not removed anything yet, so the child on the
            // path we came from still shows up.
            let empty = if mode.applies() {
                entries.is_empty()
            } else {
                entries.iter().all(|e| *e == removed_child)
            };
            if !empty {
                break;
            }

            if mode.applies() {
                if let Err(error) = self.filesystem.remove_dir(dir) {
                    let error = error.into_prune();
                    warn!(%error, "Pruning stopped");
                    warnings.push(error);
                    break;
                }
                info!(dir = %dir.display(), "Pruned empty directory");
            }
            stats.ancestors_pruned += 1;

            removed_child = dir.to_path_buf();
            current = dir.parent();
        }

        warnings
    }
}

fn conflict(path: &Path, reason: &str) -> ApplicationError {
    ApplicationError::Relocation {
        path: path.to_path_buf(),
        operation: "relocate",
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::DottedId;

    fn spec(from: &str, to: &str, roots: &[&str]) -> RelocationSpec {
        RelocationSpec::new(
            &DottedId::parse(from).unwrap(),
            &DottedId::parse(to).unwrap(),
            roots.iter().map(PathBuf::from).collect(),
        )
    }

    /// A mock whose tree is a set of directories and files, mutated by the
    /// calls the relocator makes. `faults` lists `(operation, path)` pairs
    /// that fail instead; a fault path matches any path ending with it.
    fn mock_tree(
        dirs: &[&str],
        files: &[&str],
        faults: &[(&'static str, &'static str)],
    ) -> (MockFilesystem, Arc<Mutex<Tree>>) {
        let faults: Arc<Vec<(&'static str, PathBuf)>> = Arc::new(
            faults
                .iter()
                .map(|(op, path)| (*op, PathBuf::from(path)))
                .collect(),
        );
        let injected = move |op: &'static str, path: &Path| -> FsResult<()> {
            if faults.iter().any(|(o, p)| *o == op && path.ends_with(p)) {
                return Err(ApplicationError::FileAccess {
                    path: path.to_path_buf(),
                    operation: op,
                    reason: "injected failure".into(),
                });
            }
            Ok(())
        };
        let tree = Arc::new(Mutex::new(Tree {
            dirs: dirs.iter().map(PathBuf::from).collect(),
            files: files.iter().map(PathBuf::from).collect(),
        }));
        let mut fs = MockFilesystem::new();

        let t = tree.clone();
        fs.expect_entry_kind().returning(move |p| {
            let t = t.lock().unwrap();
            if t.dirs.contains(p) {
                EntryKind::Directory
            } else if t.files.contains(p) {
                EntryKind::File
            } else {
                EntryKind::Missing
            }
        });
        let t = tree.clone();
        fs.expect_list_dir().returning(move |p| {
            let t = t.lock().unwrap();
            Ok(t.dirs
                .iter()
                .chain(t.files.iter())
                .filter(|e| e.parent() == Some(p))
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect())
        });
        let t = tree.clone();
        fs.expect_create_dir_all().returning(move |p| {
            let mut t = t.lock().unwrap();
            for dir in p.ancestors().filter(|d| !d.as_os_str().is_empty()) {
                t.dirs.insert(dir.to_path_buf());
            }
            Ok(())
        });
        let t = tree.clone();
        let fault = injected.clone();
        fs.expect_move_file().returning(move |from, to| {
            fault("move", from)?;
            let mut t = t.lock().unwrap();
            t.files.remove(from);
            t.files.insert(to.to_path_buf());
            Ok(())
        });
        let t = tree.clone();
        let fault = injected.clone();
        fs.expect_rename_dir().returning(move |from, to| {
            fault("rename directory", from)?;
            let mut t = t.lock().unwrap();
            if t.dirs.contains(to) || t.files.contains(to) {
                return Err(ApplicationError::FileAccess {
                    path: to.to_path_buf(),
                    operation: "rename directory",
                    reason: "destination exists".into(),
                });
            }
            let rebase = |p: &PathBuf| match p.strip_prefix(from) {
                Ok(rel) if rel.as_os_str().is_empty() => to.to_path_buf(),
                Ok(rel) => to.join(rel),
                Err(_) => p.clone(),
            };
            t.dirs = t.dirs.iter().map(rebase).collect();
            t.files = t.files.iter().map(rebase).collect();
            Ok(())
        });
        let t = tree.clone();
        fs.expect_remove_dir().returning(move |p| {
            injected("remove directory", p)?;
            t.lock().unwrap().dirs.remove(p);
            Ok(())
        });

        (fs, tree)
    }

    struct Tree {
        dirs: BTreeSet<PathBuf>,
        files: BTreeSet<PathBuf>,
    }

    #[test]
    fn missing_source_is_skipped() {
        let (fs, _) = mock_tree(&["root"], &[], &[]);
        let report = TreeRelocator::new(&fs).relocate(&spec("a.b", "x", &["root"]));

        assert_eq!(report.roots[0].outcome, RootOutcome::Skipped);
    }

    #[test]
    fn identity_relocation_is_unchanged() {
        let (fs, tree) = mock_tree(&["root", "root/a", "root/a/b"], &["root/a/b/F.kt"], &[]);
        let report = TreeRelocator::new(&fs).relocate(&spec("a.b", "a.b", &["root"]));

        assert_eq!(report.roots[0].outcome, RootOutcome::Unchanged);
        assert!(tree.lock().unwrap().files.contains(Path::new("root/a/b/F.kt")));
    }

    #[test]
    fn moves_and_prunes_in_mock_tree() {
        let (fs, tree) = mock_tree(
            &["root", "root/a", "root/a/b", "root/a/b/c", "root/a/b/c/ui"],
            &["root/a/b/c/File.kt", "root/a/b/c/ui/Theme.kt", "root/build.gradle"],
            &[],
        );
        let report = TreeRelocator::new(&fs).relocate(&spec("a.b.c", "x.y", &["root"]));

        let RootOutcome::Relocated { stats } = report.roots[0].outcome else {
            panic!("unexpected outcome: {:?}", report.roots[0].outcome);
        };
        assert_eq!(stats.files_moved, 2);
        assert_eq!(stats.dirs_removed, 2);
        assert_eq!(stats.ancestors_pruned, 2);

        let t = tree.lock().unwrap();
        assert!(t.files.contains(Path::new("root/x/y/File.kt")));
        assert!(t.files.contains(Path::new("root/x/y/ui/Theme.kt")));
        assert!(!t.dirs.contains(Path::new("root/a")));
        assert!(t.dirs.contains(Path::new("root")));
    }

    #[test]
    fn move_failure_aborts_root_and_next_root_still_runs() {
        let (fs, tree) = mock_tree(
            &["one", "one/a", "two", "two/a"],
            &["one/a/Bad.kt", "two/a/Good.kt"],
            &[("move", "one/a/Bad.kt")],
        );

        let report = TreeRelocator::new(&fs).relocate(&spec("a", "b", &["one", "two"]));

        assert!(matches!(
            report.roots[0].outcome,
            RootOutcome::Failed {
                error: ApplicationError::Relocation { .. },
                ..
            }
        ));
        assert!(matches!(report.roots[1].outcome, RootOutcome::Relocated { .. }));
        assert_eq!(report.failures().count(), 1);

        let t = tree.lock().unwrap();
        assert!(t.files.contains(Path::new("one/a/Bad.kt")));
        assert!(t.files.contains(Path::new("two/b/Good.kt")));
    }

    #[test]
    fn prune_failure_is_a_warning() {
        let (fs, _) = mock_tree(
            &["root", "root/a", "root/a/b"],
            &["root/a/b/F.kt", "root/keep.txt"],
            &[("remove directory", "root/a")],
        );

        let report = TreeRelocator::new(&fs).relocate(&spec("a.b", "x", &["root"]));
        let root = &report.roots[0];

        assert!(matches!(root.outcome, RootOutcome::Relocated { .. }));
        assert_eq!(root.prune_warnings.len(), 1);
        assert!(matches!(root.prune_warnings[0], ApplicationError::Prune { .. }));
    }

    #[test]
    fn directory_in_place_of_file_is_a_conflict() {
        let (fs, _) = mock_tree(
            &["root", "root/a", "root/x", "root/x/F.kt"],
            &["root/a/F.kt"],
            &[],
        );
        let report = TreeRelocator::new(&fs).relocate(&spec("a", "x", &["root"]));

        assert!(matches!(report.roots[0].outcome, RootOutcome::Failed { .. }));
    }

    #[test]
    fn preview_counts_without_mutating() {
        let (fs, tree) = mock_tree(
            &["root", "root/a", "root/a/b", "root/x"],
            &["root/a/b/F.kt", "root/x/F.kt"],
            &[],
        );
        let report = TreeRelocator::new(&fs).preview(&spec("a.b", "x", &["root"]));

        let RootOutcome::Relocated { stats } = report.roots[0].outcome else {
            panic!("unexpected outcome: {:?}", report.roots[0].outcome);
        };
        assert_eq!(stats.files_moved, 1);
        assert_eq!(stats.files_overwritten, 1);
        assert_eq!(stats.ancestors_pruned, 1);

        let t = tree.lock().unwrap();
        assert!(t.files.contains(Path::new("root/a/b/F.kt")));
        assert!(t.dirs.contains(Path::new("root/a")));
    }

    #[test]
    fn preview_of_nested_move_matches_the_staged_run() {
        let dirs = ["root", "root/a", "root/a/b", "root/a/b/c"];
        let files = ["root/a/b/F.kt", "root/a/b/c/G.kt"];
        let (preview_fs, preview_tree) = mock_tree(&dirs, &files, &[]);
        let (apply_fs, apply_tree) = mock_tree(&dirs, &files, &[]);

        let previewed = TreeRelocator::new(&preview_fs).preview(&spec("a.b", "a.b.c", &["root"]));
        let applied = TreeRelocator::new(&apply_fs).relocate(&spec("a.b", "a.b.c", &["root"]));

        let RootOutcome::Relocated { stats } = applied.roots[0].outcome else {
            panic!("unexpected outcome: {:?}", applied.roots[0].outcome);
        };
        assert_eq!(previewed.roots[0].outcome, RootOutcome::Relocated { stats });
        assert_eq!(stats.files_moved, 2);
        assert_eq!(stats.dirs_created, 3);
        assert_eq!(stats.ancestors_pruned, 0);

        assert!(preview_tree.lock().unwrap().files.contains(Path::new("root/a/b/F.kt")));
        let t = apply_tree.lock().unwrap();
        assert!(t.files.contains(Path::new("root/a/b/c/F.kt")));
        assert!(t.files.contains(Path::new("root/a/b/c/c/G.kt")));
        assert!(t.dirs.iter().all(|d| !d.to_string_lossy().contains(STAGING_PREFIX)));
    }

    #[test]
    fn destination_is_not_pruned_when_source_is_empty() {
        let dirs = ["root", "root/a", "root/a/b", "root/a/b/c"];
        let (preview_fs, _) = mock_tree(&dirs, &["root/Keep.kt"], &[]);
        let (apply_fs, tree) = mock_tree(&dirs, &["root/Keep.kt"], &[]);

        let previewed = TreeRelocator::new(&preview_fs).preview(&spec("a.b.c", "a.b", &["root"]));
        let applied = TreeRelocator::new(&apply_fs).relocate(&spec("a.b.c", "a.b", &["root"]));

        assert_eq!(previewed.roots[0].outcome, applied.roots[0].outcome);
        let RootOutcome::Relocated { stats } = applied.roots[0].outcome else {
            panic!("unexpected outcome: {:?}", applied.roots[0].outcome);
        };
        assert_eq!(stats.ancestors_pruned, 0);
        assert!(tree.lock().unwrap().dirs.contains(Path::new("root/a/b")));
    }

    #[test]
    fn failed_staged_move_puts_the_source_back() {
        let (fs, tree) = mock_tree(
            &["root", "root/a", "root/a/b", "root/a/b/F.kt", "root/a/b/c"],
            &["root/a/b/c/F.kt"],
            &[],
        );

        let report = TreeRelocator::new(&fs).relocate(&spec("a.b.c", "a.b", &["root"]));

        assert!(matches!(report.roots[0].outcome, RootOutcome::Failed { .. }));
        let t = tree.lock().unwrap();
        assert!(t.files.contains(Path::new("root/a/b/c/F.kt")));
        assert!(t.dirs.iter().all(|d| !d.to_string_lossy().contains(STAGING_PREFIX)));
    }

    #[test]
    fn unrestorable_staging_is_named_in_the_error() {
        // The destination recreates `a/b`, so the staged tree cannot go back.
        let (fs, tree) = mock_tree(
            &["root", "root/a", "root/a/b"],
            &["root/a/b/F.kt"],
            &[("move", "F.kt")],
        );

        let report = TreeRelocator::new(&fs).relocate(&spec("a.b", "a.b.c", &["root"]));

        let RootOutcome::Failed {
            error: ApplicationError::Relocation { reason, .. },
            ..
        } = &report.roots[0].outcome
        else {
            panic!("unexpected outcome: {:?}", report.roots[0].outcome);
        };
        assert!(reason.contains(STAGING_PREFIX));
        let t = tree.lock().unwrap();
        assert!(t.files.iter().any(|f| f.to_string_lossy().contains(STAGING_PREFIX)));
    }
}
