//! Compare command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, CompareConfig};
use crate::pipeline;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the compare command
pub fn run_compare(
    baseline: PathBuf,
    candidate: PathBuf,
    out_root: Option<PathBuf>,
    config_path: Option<&Path>,
) -> ExitCode {
    let file = match load_config(config_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let config = CompareConfig::new(baseline, candidate, out_root, &file);

    let report = match pipeline::run_comparison(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    println!(
        "Compared {} snapshots, {} differ",
        report.compared, report.differing
    );
    println!("Images saved to {}", report.out_dir.display());
    println!("Done.");

    ExitCode::from(EXIT_SUCCESS)
}
