use dox_config::DoxConfig;

use crate::cli::ListArgs;
use crate::commands::open_index;

/// Handle `doxymark list`.
pub fn handle(args: &ListArgs, config: &DoxConfig) -> anyhow::Result<()> {
    let index = open_index(args.xml_dir.as_deref(), config)?;
    for (kind, name) in index.compound_names() {
        println!("{kind} {name}");
    }
    Ok(())
}
