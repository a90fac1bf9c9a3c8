//! In-memory filesystem with failure injection.

use std::collections::{BTreeMap, HashSet};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use super::FileSystem;

/// Directory that allocated temporary paths live under.
const TEMP_DIR: &str = "/memory-tmp";

/// [`FileSystem`] that keeps every file in memory.
///
/// Clones share the same underlying state, so a test can hand one clone to
/// the code under test and inspect the other afterwards.
///
/// Failures can be injected per operation:
///
/// - [`fail_temp_allocation`](Self::fail_temp_allocation): no temporary file
///   can be allocated
/// - [`fail_temp_writes`](Self::fail_temp_writes): every write to an
///   allocated temporary file fails, as if the disk were full
/// - [`fail_writes_to`](Self::fail_writes_to): writes to one path fail
/// - [`fail_copies`](Self::fail_copies): every copy fails
/// - [`fail_removals`](Self::fail_removals): every removal fails
///
/// As with a real file, `create` truncates its target before any write is
/// attempted.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use std::path::Path;
/// use packsmith::fs::{FileSystem, MemoryFileSystem};
///
/// let fs = MemoryFileSystem::new();
/// fs.insert("/out/a.spkg", b"old".to_vec());
/// fs.fail_temp_writes();
///
/// let temp = fs.allocate_temp_path().unwrap();
/// assert!(fs.create(&temp).unwrap().write_all(b"new").is_err());
/// assert_eq!(fs.read(Path::new("/out/a.spkg")).unwrap(), b"old");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, Vec<u8>>,
    temp_paths: HashSet<PathBuf>,
    next_temp_id: u64,
    faults: Faults,
}

#[derive(Debug, Default)]
struct Faults {
    temp_allocation: bool,
    temp_writes: bool,
    write_paths: HashSet<PathBuf>,
    copies: bool,
    removals: bool,
}

impl MemoryFileSystem {
    /// Create an empty filesystem with no injected failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a file, replacing any existing contents.
    pub fn insert(&self, path: impl Into<PathBuf>, data: Vec<u8>) {
        self.state.lock().files.insert(path.into(), data);
    }

    /// Contents of the file at `path`.
    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        self.state.lock().files.get(path).cloned()
    }

    /// All file paths, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.state.lock().files.keys().cloned().collect()
    }

    /// Allocated temporary files that still exist.
    pub fn leftover_temp_files(&self) -> Vec<PathBuf> {
        let state = self.state.lock();
        let mut leftovers: Vec<PathBuf> = state
            .temp_paths
            .iter()
            .filter(|path| state.files.contains_key(*path))
            .cloned()
            .collect();
        leftovers.sort();
        leftovers
    }

    /// Make every temporary file allocation fail.
    pub fn fail_temp_allocation(&self) {
        self.state.lock().faults.temp_allocation = true;
    }

    /// Make every write to an allocated temporary file fail.
    pub fn fail_temp_writes(&self) {
        self.state.lock().faults.temp_writes = true;
    }

    /// Make every write to `path` fail.
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.state.lock().faults.write_paths.insert(path.into());
    }

    /// Make every copy fail.
    pub fn fail_copies(&self) {
        self.state.lock().faults.copies = true;
    }

    /// Make every removal fail.
    pub fn fail_removals(&self) {
        self.state.lock().faults.removals = true;
    }
}

impl FileSystem for MemoryFileSystem {
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + '_>> {
        let mut state = self.state.lock();
        let fail = state.faults.write_paths.contains(path)
            || (state.faults.temp_writes && state.temp_paths.contains(path));
        state.files.insert(path.to_path_buf(), Vec::new());

        Ok(Box::new(MemoryWriter {
            state: Arc::clone(&self.state),
            path: path.to_path_buf(),
            fail,
        }))
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut state = self.state.lock();
        if state.faults.copies {
            return Err(io::Error::other(format!(
                "simulated copy failure: {} -> {}",
                from.display(),
                to.display()
            )));
        }

        let data = state
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| not_found(from))?;
        state.files.insert(to.to_path_buf(), data);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.lock();
        if state.faults.removals {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("simulated removal failure: {}", path.display()),
            ));
        }

        state
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.state.lock().files.contains_key(path)
    }

    fn allocate_temp_path(&self) -> io::Result<PathBuf> {
        let mut state = self.state.lock();
        if state.faults.temp_allocation {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("simulated allocation failure in {}", TEMP_DIR),
            ));
        }

        state.next_temp_id += 1;
        let path = Path::new(TEMP_DIR).join(format!("packsmith-{}.tmp", state.next_temp_id));

        state.files.insert(path.clone(), Vec::new());
        state.temp_paths.insert(path.clone());
        Ok(path)
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file: {}", path.display()),
    )
}

/// Appends written bytes to the file entry.
struct MemoryWriter {
    state: Arc<Mutex<State>>,
    path: PathBuf,
    fail: bool,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail {
            return Err(io::Error::other(format!(
                "simulated disk full: {}",
                self.path.display()
            )));
        }

        self.state
            .lock()
            .files
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
