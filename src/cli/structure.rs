use crate::services::structure_service::{inject_structure, render_injection, RunType};
use crate::Result;
use std::env;
use std::path::Path;

/// Inject the 3-pass directory skeleton into `target` (default: current directory)
pub fn inject(target: Option<&Path>, run_type: &str) -> Result<()> {
    let target_dir = match target {
        Some(dir) => dir.to_path_buf(),
        None => env::current_dir()?,
    };

    let run_type = RunType::parse(run_type)?;
    let report = inject_structure(&target_dir, run_type)?;
    println!("{}", render_injection(&report));
    Ok(())
}
