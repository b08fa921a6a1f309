//! Offline commands: word targets, prompt preview, repetition check.

use super::PromptKind;
use lullaby::{
    InputError, InputErrorKind, Phase, StoryRequest, build_outline_plan_prompt,
    build_phase_prompt, cleanup_trailing_duplicate_ending_paragraphs, detect_repetition,
    get_word_targets,
};
use std::error::Error;
use std::path::Path;
use tracing::{debug, info};

/// Print the word targets for a listening time.
pub fn print_targets(minutes: f64) -> Result<(), Box<dyn Error>> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return Err(InputError::new(InputErrorKind::InvalidMinutes(minutes.to_string())).into());
    }
    let targets = get_word_targets(minutes);
    println!("Minutes:    {}", minutes);
    println!("Target:     {} words", targets.target);
    println!("Range:      {}-{} words", targets.min, targets.max);
    println!("Paragraphs: {}", targets.paragraph_guidance);
    Ok(())
}

/// Print the prompt a phase would send for a request file.
pub fn print_prompt(request: &Path, kind: PromptKind) -> Result<(), Box<dyn Error>> {
    let input = StoryRequest::from_file(request)?.into_input()?;
    debug!(?kind, "Building prompt");

    let prompt = match kind {
        PromptKind::Plan => build_outline_plan_prompt(&input),
        PromptKind::Outline => build_phase_prompt(&input, Phase::Outline),
        PromptKind::Draft => build_phase_prompt(&input, Phase::Draft),
        PromptKind::Final => build_phase_prompt(&input, Phase::Final),
    };
    println!("{}", prompt);
    Ok(())
}

/// Print the repetition report for a manuscript, and optionally its cleaned text.
pub fn check_manuscript(file: &Path, cleanup: bool) -> Result<(), Box<dyn Error>> {
    let text = std::fs::read_to_string(file)?;
    let report = detect_repetition(&text);
    info!(
        ratio = report.trigram_repeat_ratio,
        repeated_paragraphs = report.repeated_paragraph_count,
        "Checked manuscript"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    if cleanup {
        let cleaned = cleanup_trailing_duplicate_ending_paragraphs(&text);
        if cleaned != text {
            info!("Collapsed a duplicated ending");
        }
        println!();
        println!("{}", cleaned);
    }
    Ok(())
}
