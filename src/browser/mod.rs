//! Numbered, paginated browsing of the methodology document tree
//!
//! `show` and `select` both go through [`list_entries`], so the number shown
//! next to an entry is always the number that selects it.

use crate::error::{EngineError, EngineResult};
use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};

/// Entries per listing page
pub const PAGE_SIZE: usize = 10;

/// A visible directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

/// One page of a directory listing
#[derive(Debug, Clone)]
pub struct Listing {
    /// Path relative to the browser root, `/` at the root
    pub path: String,
    pub at_root: bool,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Zero-based index of the first entry on this page
    pub start_index: usize,
    pub entries: Vec<Entry>,
}

impl Listing {
    /// Entries paired with their one-based selection numbers
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .map(move |(i, e)| (self.start_index + i + 1, e))
    }

    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

/// A file opened through `select`
#[derive(Debug, Clone)]
pub struct FileView {
    /// Path relative to the browser root
    pub path: String,
    pub size: u64,
    pub content: String,
}

/// Result of selecting an entry
#[derive(Debug, Clone)]
pub enum Selection {
    Directory(Listing),
    File(FileView),
}

/// Digit-leading names first, then everything else; case-insensitive
/// within each group, raw name as the tie-breaker.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let group = |name: &str| -> u8 {
        match name.chars().next() {
            Some(c) if c.is_ascii_digit() => 0,
            _ => 1,
        }
    };

    group(a)
        .cmp(&group(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Visible entries of `dir` in browsing order
pub fn list_entries(dir: &Path) -> EngineResult<Vec<Entry>> {
    let mut entries = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        entries.push(Entry {
            is_dir: entry.path().is_dir(),
            name,
        });
    }

    entries.sort_by(|a, b| compare_names(&a.name, &b.name));
    Ok(entries)
}

/// Browser over a fixed root with a movable current directory
#[derive(Debug, Clone)]
pub struct DirectoryBrowser {
    root: PathBuf,
    current: PathBuf,
}

impl DirectoryBrowser {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            current: PathBuf::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current directory relative to the root (empty at the root)
    pub fn current_path(&self) -> &Path {
        &self.current
    }

    pub fn at_root(&self) -> bool {
        self.current.as_os_str().is_empty()
    }

    pub fn reset_to_root(&mut self) {
        self.current = PathBuf::new();
    }

    fn current_dir(&self) -> EngineResult<PathBuf> {
        if !self.root.is_dir() {
            return Err(EngineError::NotFound(format!(
                "methodology root {}",
                self.root.display()
            )));
        }

        let full = self.root.join(&self.current);
        if !full.is_dir() {
            return Err(EngineError::NotFound(format!(
                "directory {}",
                display_relative(&self.current)
            )));
        }
        Ok(full)
    }

    /// List a page of the current directory; `None` means page 1
    pub fn show(&self, page: Option<usize>) -> EngineResult<Listing> {
        let dir = self.current_dir()?;
        let entries = list_entries(&dir)?;
        let total_items = entries.len();
        let total_pages = total_items.div_ceil(PAGE_SIZE);
        let path = display_relative(&self.current);

        if total_items == 0 {
            return Ok(Listing {
                path,
                at_root: self.at_root(),
                page: 1,
                total_pages: 0,
                total_items: 0,
                start_index: 0,
                entries: Vec::new(),
            });
        }

        let page = page.unwrap_or(1);
        if page < 1 || page > total_pages {
            return Err(EngineError::PageOutOfRange {
                page,
                total: total_pages,
            });
        }

        let start_index = (page - 1) * PAGE_SIZE;
        let entries = entries
            .into_iter()
            .skip(start_index)
            .take(PAGE_SIZE)
            .collect();

        Ok(Listing {
            path,
            at_root: self.at_root(),
            page,
            total_pages,
            total_items,
            start_index,
            entries,
        })
    }

    /// `0` goes up one level (no-op at the root); `n >= 1` opens entry `n`
    pub fn select(&mut self, selection: usize) -> EngineResult<Selection> {
        if selection == 0 {
            self.go_up();
            return self.show(None).map(Selection::Directory);
        }

        let dir = self.current_dir()?;
        let entries = list_entries(&dir)?;
        let Some(entry) = entries.get(selection - 1) else {
            return Err(EngineError::SelectionOutOfRange {
                selection,
                available: entries.len(),
            });
        };

        if entry.is_dir {
            self.current.push(&entry.name);
            tracing::debug!(path = %self.current.display(), "entered directory");
            return self.show(None).map(Selection::Directory);
        }

        let relative = self.current.join(&entry.name);
        self.read_file(&relative).map(Selection::File)
    }

    /// Move to the parent directory; stays put at the root
    pub fn go_up(&mut self) {
        if !self.at_root() {
            self.current.pop();
        }
    }

    /// Jump to a directory given relative to the root
    pub fn enter(&mut self, relative: &str) -> EngineResult<Listing> {
        let mut target = PathBuf::new();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => target.push(part),
                Component::CurDir | Component::RootDir => {}
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(EngineError::InvalidPath(format!(
                        "'{}' must stay within the methodology root",
                        relative
                    )));
                }
            }
        }

        if !self.root.join(&target).is_dir() {
            return Err(EngineError::NotFound(format!("directory {}", relative)));
        }

        self.current = target;
        self.show(None)
    }

    fn read_file(&self, relative: &Path) -> EngineResult<FileView> {
        let full = self.root.join(relative);
        let bytes = std::fs::read(&full)?;
        let size = std::fs::metadata(&full)?.len();

        Ok(FileView {
            path: display_relative(relative),
            size,
            content: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

fn display_relative(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        "/".to_string()
    } else {
        path.to_string_lossy().replace('\\', "/")
    }
}
