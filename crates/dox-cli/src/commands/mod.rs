pub mod collect;
pub mod extract;
pub mod list;

use std::path::{Path, PathBuf};

use anyhow::Context;
use dox_config::DoxConfig;
use dox_parser::DoxygenIndex;

/// Open the index in `xml_dir`, falling back to the configured output.
pub fn open_index(xml_dir: Option<&Path>, config: &DoxConfig) -> anyhow::Result<DoxygenIndex> {
    let dir: PathBuf =
        xml_dir.map_or_else(|| config.extraction.xml_output.clone(), Path::to_path_buf);
    DoxygenIndex::open(&dir)
        .with_context(|| format!("failed to open Doxygen XML in {}", dir.display()))
}
