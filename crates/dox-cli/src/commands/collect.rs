use anyhow::Context;
use dox_config::{DoxConfig, RenderOptions};
use dox_parser::{DoxygenIndex, DoxygenObject};

use crate::cli::CollectArgs;
use crate::commands::open_index;
use crate::output::output;
use crate::prune;

/// Handle `doxymark collect`.
///
/// One identifier prints a single object, several print an array.
pub fn handle(args: &CollectArgs, config: &DoxConfig) -> anyhow::Result<()> {
    let index = open_index(args.xml_dir.as_deref(), config)?;
    let mut objects = collect_all(&index, &args.identifiers, &config.render)?;

    if objects.len() == 1 {
        output(&objects.remove(0), args.pretty)
    } else {
        output(&objects, args.pretty)
    }
}

fn collect_all(
    index: &DoxygenIndex,
    identifiers: &[String],
    options: &RenderOptions,
) -> anyhow::Result<Vec<DoxygenObject>> {
    identifiers
        .iter()
        .map(|identifier| -> anyhow::Result<DoxygenObject> {
            let mut object = index
                .collect(identifier)
                .with_context(|| format!("failed to collect '{identifier}'"))?;
            prune::apply(&mut object, options);
            tracing::debug!(%identifier, kind = %object.kind(), "collected");
            Ok(object)
        })
        .collect()
}
