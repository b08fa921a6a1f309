//! Story generation command handler.

use super::OutputFormat;
use lullaby::{LullabyConfig, StoryDriver, StoryPipeline, StoryRequest};
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// Run the full pipeline for a request file and write the result.
#[instrument(skip_all, fields(request = %request.display()))]
pub async fn generate_story(
    request: &Path,
    config: Option<&Path>,
    out: Option<&Path>,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let config = match config {
        Some(path) => LullabyConfig::from_file(path)?,
        None => LullabyConfig::load()?,
    };
    let input = StoryRequest::from_file(request)?.into_input()?;

    let client = config.client()?;
    info!(
        provider = client.provider_name(),
        model = client.model_name(),
        endpoint = client.endpoint(),
        "Starting story generation"
    );

    let pipeline = StoryPipeline::with_options(client, config.pipeline_options());
    let run = pipeline.run(&input).await?;

    info!(
        title = %run.outline.title,
        final_pass = run.final_pass_ran,
        ratio = run.report.trigram_repeat_ratio,
        "Story complete"
    );

    let rendered = match format {
        OutputFormat::Text => run.manuscript.clone(),
        OutputFormat::Json => serde_json::to_string_pretty(&run)?,
    };

    match out {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            info!(path = %path.display(), "Wrote story");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
