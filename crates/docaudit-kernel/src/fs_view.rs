//! The read-only capability every evaluator reaches the file system through.
//!
//! Paths are relative to the audit root, `/`-separated, with no leading
//! `./`. The empty string names the root itself. A path may start with
//! `../` when a link escapes the root; [`MemoryFileSystem`] treats those as
//! absent, [`OsFileSystem`] asks the operating system.

use crate::error::AuditError;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

pub trait FileSystemView {
    fn exists(&self, path: &str) -> bool;

    fn is_dir(&self, path: &str) -> bool;

    /// Entries of a directory sorted by name. Empty when `path` is not a
    /// directory.
    fn list_dir(&self, path: &str) -> Vec<DirEntry>;

    /// `Ok(None)` when the file does not exist.
    fn read_bytes(&self, path: &str) -> Result<Option<Vec<u8>>, AuditError>;

    /// How the root is shown in reports.
    fn root_label(&self) -> String;
}

/// Join a relative directory and a child name.
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir.trim_end_matches('/'), name)
    }
}

/// Parent directory of a relative path (`""` for top-level entries).
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Resolve `target` against `base_dir`, collapsing `.` and `..`.
///
/// Leading `..` that climb above the root are kept so the caller can still
/// tell the link points outside the tree.
pub fn resolve(base_dir: &str, target: &str) -> String {
    let mut parts: Vec<&str> = if target.starts_with('/') {
        Vec::new()
    } else {
        base_dir
            .split('/')
            .filter(|part| !part.is_empty())
            .collect()
    };
    for part in target.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if matches!(parts.last(), Some(last) if *last != "..") {
                    parts.pop();
                } else {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

/// Walk a directory recursively and collect every file path, sorted.
pub fn walk_files(fs: &dyn FileSystemView, dir: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![dir.to_string()];
    while let Some(current) = stack.pop() {
        for entry in fs.list_dir(&current) {
            let path = join(&current, &entry.name);
            if entry.is_dir {
                stack.push(path);
            } else {
                out.push(path);
            }
        }
    }
    out.sort();
    out
}

/// Every `.md` file under `dir`, sorted.
pub fn walk_markdown(fs: &dyn FileSystemView, dir: &str) -> Vec<String> {
    walk_files(fs, dir)
        .into_iter()
        .filter(|path| is_markdown(path))
        .collect()
}

pub fn is_markdown(path: &str) -> bool {
    path.to_ascii_lowercase().ends_with(".md")
}

/// The real file system, rooted at a directory.
#[derive(Debug, Clone)]
pub struct OsFileSystem {
    root: PathBuf,
}

impl OsFileSystem {
    pub fn new(root: impl AsRef<Path>) -> Result<Self, AuditError> {
        let root = root.as_ref().to_path_buf();
        if !root.exists() {
            return Err(AuditError::RootMissing {
                path: root.display().to_string(),
            });
        }
        if !root.is_dir() {
            return Err(AuditError::RootNotDirectory {
                path: root.display().to_string(),
            });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

impl FileSystemView for OsFileSystem {
    fn exists(&self, path: &str) -> bool {
        self.absolute(path).exists()
    }

    fn is_dir(&self, path: &str) -> bool {
        self.absolute(path).is_dir()
    }

    fn list_dir(&self, path: &str) -> Vec<DirEntry> {
        let Ok(entries) = fs::read_dir(self.absolute(path)) else {
            return Vec::new();
        };
        let mut out: Vec<DirEntry> = entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let is_dir = entry.file_type().map(|kind| kind.is_dir()).unwrap_or(false);
                Some(DirEntry { name, is_dir })
            })
            .collect();
        out.sort();
        out
    }

    fn read_bytes(&self, path: &str) -> Result<Option<Vec<u8>>, AuditError> {
        let absolute = self.absolute(path);
        match fs::read(&absolute) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AuditError::ReadFile {
                path: path.to_string(),
                source,
            }),
        }
    }

    fn root_label(&self) -> String {
        self.root.display().to_string()
    }
}

/// An in-memory tree for fixtures. Directories are implied by file paths;
/// empty directories are added explicitly.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert_file(path, contents);
        self
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        self.insert_dir(path);
        self
    }

    pub fn insert_file(&mut self, path: &str, contents: impl Into<Vec<u8>>) {
        let path = resolve("", path);
        self.insert_dir(parent(&path).to_string().as_str());
        self.files.insert(path, contents.into());
    }

    pub fn insert_dir(&mut self, path: &str) {
        let mut current = resolve("", path);
        while !current.is_empty() {
            let next = parent(&current).to_string();
            self.dirs.insert(current);
            current = next;
        }
    }
}

impl FileSystemView for MemoryFileSystem {
    fn exists(&self, path: &str) -> bool {
        path.is_empty() || self.files.contains_key(path) || self.dirs.contains(path)
    }

    fn is_dir(&self, path: &str) -> bool {
        path.is_empty() || self.dirs.contains(path)
    }

    fn list_dir(&self, path: &str) -> Vec<DirEntry> {
        if !self.is_dir(path) {
            return Vec::new();
        }
        let mut out: Vec<DirEntry> = Vec::new();
        for dir in &self.dirs {
            if parent(dir) == path {
                out.push(DirEntry {
                    name: dir[dir.rfind('/').map_or(0, |idx| idx + 1)..].to_string(),
                    is_dir: true,
                });
            }
        }
        for file in self.files.keys() {
            if parent(file) == path {
                out.push(DirEntry {
                    name: file[file.rfind('/').map_or(0, |idx| idx + 1)..].to_string(),
                    is_dir: false,
                });
            }
        }
        out.sort();
        out
    }

    fn read_bytes(&self, path: &str) -> Result<Option<Vec<u8>>, AuditError> {
        Ok(self.files.get(path).cloned())
    }

    fn root_label(&self) -> String {
        "<memory>".to_string()
    }
}
