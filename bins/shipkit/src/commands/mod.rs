//! Command implementations

pub mod rates;
pub mod webhook;

use anyhow::Context;
use std::path::Path;

/// Read a file, naming it in the error
pub(crate) fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}
