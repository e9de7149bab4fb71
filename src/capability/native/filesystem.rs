//! Local filesystem through `std::fs`

use crate::capability::native::{OsFamily, Tool};
use crate::capability::{CapResult, CapabilityError, FileSystemProvider};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory entries a single search may visit across all roots
const DEFAULT_ENTRY_BUDGET: usize = 100_000;

pub struct StdFileSystem {
    os: OsFamily,
    entry_budget: usize,
}

impl StdFileSystem {
    pub fn new(os: OsFamily) -> Self {
        Self {
            os,
            entry_budget: DEFAULT_ENTRY_BUDGET,
        }
    }

    /// Cap the entries a search visits, matching or not
    pub fn with_entry_budget(mut self, entries: usize) -> Self {
        self.entry_budget = entries;
        self
    }

    /// Directories whose children make up the trash, per desktop convention
    fn trash_dirs(&self) -> Vec<PathBuf> {
        match self.os {
            OsFamily::MacOs => dirs::home_dir()
                .map(|home| vec![home.join(".Trash")])
                .unwrap_or_default(),
            OsFamily::Linux | OsFamily::Other => dirs::data_local_dir()
                .map(|data| {
                    let trash = data.join("Trash");
                    vec![trash.join("files"), trash.join("info")]
                })
                .unwrap_or_default(),
            OsFamily::Windows => Vec::new(),
        }
    }
}

fn not_found_as(path: &Path, err: std::io::Error) -> CapabilityError {
    if err.kind() == ErrorKind::NotFound {
        CapabilityError::NotFound(path.display().to_string())
    } else {
        CapabilityError::Io(err)
    }
}

fn clear_dir(dir: &Path) -> CapResult<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

impl FileSystemProvider for StdFileSystem {
    fn create_dir(&self, path: &Path) -> CapResult<()> {
        fs::create_dir_all(path)?;
        Ok(())
    }

    fn delete(&self, path: &Path) -> CapResult<()> {
        let metadata = fs::symlink_metadata(path).map_err(|e| not_found_as(path, e))?;
        if metadata.is_dir() {
            fs::remove_dir_all(path)?;
        } else {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> CapResult<()> {
        fs::rename(from, to).map_err(|e| not_found_as(from, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn search(&self, roots: &[PathBuf], query: &str, scan_limit: usize) -> CapResult<Vec<PathBuf>> {
        let needle = query.to_lowercase();
        let mut matches = Vec::new();
        let mut visited = 0usize;

        'roots: for root in roots {
            if !root.is_dir() {
                continue;
            }

            let mut pending = vec![root.clone()];
            while let Some(dir) = pending.pop() {
                if matches.len() >= scan_limit {
                    break 'roots;
                }
                // Unreadable directories are skipped, not fatal
                let Ok(entries) = fs::read_dir(&dir) else {
                    continue;
                };
                for entry in entries.flatten() {
                    if visited >= self.entry_budget {
                        tracing::debug!(
                            "Search for '{}' stopped after {} entries",
                            query,
                            visited
                        );
                        break 'roots;
                    }
                    visited += 1;

                    let name = entry.file_name().to_string_lossy().to_lowercase();
                    if name.contains(&needle) {
                        matches.push(entry.path());
                    }
                    if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                        pending.push(entry.path());
                    }
                }
            }
        }

        Ok(matches)
    }

    fn empty_trash(&self) -> CapResult<()> {
        if self.os == OsFamily::Windows {
            let powershell = Tool::find("powershell").ok_or_else(|| {
                CapabilityError::unavailable("FileSystemProvider", "powershell not found")
            })?;
            powershell.run(["-NoProfile", "-Command", "Clear-RecycleBin -Force"])?;
            return Ok(());
        }

        let dirs = self.trash_dirs();
        if dirs.is_empty() {
            return Err(CapabilityError::unavailable(
                "FileSystemProvider",
                format!("no trash location on {}", self.os.name()),
            ));
        }
        for dir in dirs {
            clear_dir(&dir)?;
        }
        Ok(())
    }
}
