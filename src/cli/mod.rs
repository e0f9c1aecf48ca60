//! CLI command implementations
//!
//! Each submodule exposes `run`-style functions that `main` dispatches to.
//! Commands print to stdout; errors bubble up to `main`.

pub mod config;
pub mod explore;
pub mod journey;
pub mod server;
pub mod structure;

use crate::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Journey key for a project: the given path made absolute, or the current directory
pub fn project_key(project: Option<&Path>) -> Result<String> {
    let cwd = env::current_dir()?;
    let path: PathBuf = match project {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => cwd,
    };
    Ok(path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_project_key_absolute_is_kept() {
        let key = project_key(Some(Path::new("/srv/projects/chess"))).unwrap();
        assert_eq!(key, "/srv/projects/chess");
    }

    #[test]
    fn test_project_key_relative_joins_cwd() {
        let key = project_key(Some(Path::new("chess"))).unwrap();
        let expected = env::current_dir().unwrap().join("chess");
        assert_eq!(key, expected.display().to_string());
    }
}
