use anyhow::Context;
use dox_config::DoxConfig;
use dox_parser::Extraction;

/// Handle `doxymark extract`.
pub fn handle(config: &DoxConfig, quiet: bool) -> anyhow::Result<()> {
    let settings = &config.extraction;
    settings.validate()?;

    let extraction = Extraction {
        doxygen: settings.doxygen.clone(),
        source_directory: settings.source_directory.clone(),
        sources: settings.sources.clone(),
        predefined: settings.predefined.clone(),
        xml_output: settings.xml_output.clone(),
        project_name: settings.project_name.clone(),
    };
    let index = extraction
        .run()
        .with_context(|| format!("failed to run {}", settings.doxygen.display()))?;

    let compounds = index.compound_names().len();
    tracing::info!(compounds, output = %settings.xml_output.display(), "extraction finished");
    if !quiet {
        println!(
            "extracted {compounds} compounds into {}",
            settings.xml_output.display()
        );
    }
    Ok(())
}
