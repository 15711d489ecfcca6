pub mod init;
pub mod play;
pub mod questions;
pub mod report;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;
use hopbench_store::{load_config_from, HopbenchConfig};

/// Load the config and pick the question file: the flag wins over config.
pub(crate) fn resolve_questions(
    questions: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<(HopbenchConfig, PathBuf)> {
    let config = load_config_from(config_path)?;
    let path = questions.unwrap_or_else(|| config.questions_path.clone());
    Ok((config, path))
}
