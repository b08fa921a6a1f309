mod test_utils;

use lullaby_core::{ResponseFormat, Role};
use lullaby_error::{LullabyErrorKind, StoryErrorKind};
use lullaby_story::{FinalPassPolicy, PipelineOptions, StoryPipeline};
use test_utils::{CALM_STORY, ScriptedDriver, outline_json, story_input};

fn story_error(err: &lullaby_error::LullabyError) -> &StoryErrorKind {
    match err.kind() {
        LullabyErrorKind::Story(story) => story.kind(),
        other => panic!("expected a story error, got {other}"),
    }
}

#[tokio::test]
async fn full_run_produces_cleaned_draft_and_manuscript() {
    let draft = format!("DRAFT_STORY:\n{}\n\nGoodnight, Pip.\n\nGoodnight, Pip.", CALM_STORY);
    let driver = ScriptedDriver::new([
        outline_json("The Lantern Moth"),
        draft,
        format!("**FINAL_STORY:**\n\n{}", CALM_STORY),
    ]);
    let pipeline = StoryPipeline::new(&driver);

    let run = pipeline.run(&story_input()).await.unwrap();

    assert_eq!(run.outline.title, "The Lantern Moth");
    assert!(run.outline_warnings.is_empty());
    assert!(run.draft.raw.ends_with("Goodnight, Pip.\n\nGoodnight, Pip."));
    assert!(run.draft.cleaned.ends_with("to bed.\n\nGoodnight, Pip."));
    assert_eq!(run.draft.report.repeated_paragraph_count, 0);
    assert!(run.final_pass_ran);
    assert_eq!(run.manuscript, CALM_STORY);
    assert_eq!(run.report.repeated_paragraph_count, 0);

    let requests = driver.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].response_format, Some(ResponseFormat::JsonObject));
    assert_eq!(requests[1].response_format, Some(ResponseFormat::Text));
    assert_eq!(requests[0].messages[0].role, Role::User);
    assert!(requests[1].messages[0].content.contains("\"title\": \"The Lantern Moth\""));
    assert!(requests[2].messages[0].content.contains("Goodnight, Pip."));
    assert!(requests[2].messages[0].content.contains("FINAL_STORY:"));
}

#[tokio::test]
async fn calm_draft_skips_final_pass_when_policy_allows() {
    let driver = ScriptedDriver::new([
        outline_json("Quiet Night"),
        format!("DRAFT_STORY: {}", CALM_STORY),
    ]);
    let options = PipelineOptions::builder()
        .final_pass_policy(FinalPassPolicy::WhenRepetitive)
        .build()
        .unwrap();
    let pipeline = StoryPipeline::with_options(&driver, options);

    let run = pipeline.run(&story_input()).await.unwrap();

    assert!(!run.final_pass_ran);
    assert_eq!(run.manuscript, run.draft.cleaned);
    assert_eq!(driver.requests().len(), 2);
}

#[tokio::test]
async fn repetitive_draft_gets_final_pass() {
    let echo = "The moon said hush and the stars said hush.";
    let repetitive = format!("DRAFT_STORY: {echo}\n\n{echo}\n\n{echo}\n\nThe end.");
    let driver = ScriptedDriver::new([
        outline_json("Hush"),
        repetitive,
        format!("FINAL_STORY: {}", CALM_STORY),
    ]);
    let options = PipelineOptions::builder()
        .final_pass_policy(FinalPassPolicy::WhenRepetitive)
        .build()
        .unwrap();
    let pipeline = StoryPipeline::with_options(&driver, options);

    let run = pipeline.run(&story_input()).await.unwrap();

    assert_eq!(run.draft.report.repeated_paragraph_count, 2);
    assert!(run.final_pass_ran);
    assert_eq!(run.manuscript, CALM_STORY);
}

#[tokio::test]
async fn broken_outline_is_repaired_through_the_driver() {
    let driver = ScriptedDriver::new([
        "{\"title\": \"Half an outline\"".to_string(),
        outline_json("Whole Outline"),
        format!("DRAFT_STORY: {}", CALM_STORY),
        format!("FINAL_STORY: {}", CALM_STORY),
    ]);
    let pipeline = StoryPipeline::new(&driver);

    let run = pipeline.run(&story_input()).await.unwrap();

    assert_eq!(run.outline.title, "Whole Outline");
    assert_eq!(run.outline_warnings.len(), 1);
    let requests = driver.requests();
    assert_eq!(requests.len(), 4);
    assert!(requests[1].messages[0].content.contains("REJECTED JSON"));
    assert!(requests[1].messages[0].content.contains("Half an outline"));
}

#[tokio::test]
async fn driver_failure_names_the_phase() {
    let driver = ScriptedDriver::with_results([
        Ok(outline_json("Pip")),
        Err("upstream timeout".to_string()),
    ]);
    let pipeline = StoryPipeline::new(&driver);

    let err = pipeline.run(&story_input()).await.unwrap_err();

    match story_error(&err) {
        StoryErrorKind::PhaseFailed { phase, message } => {
            assert_eq!(phase, "draft");
            assert!(message.contains("upstream timeout"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn empty_final_manuscript_is_an_error() {
    let driver = ScriptedDriver::new([
        outline_json("Pip"),
        format!("DRAFT_STORY: {}", CALM_STORY),
        "FINAL_STORY:".to_string(),
    ]);
    let pipeline = StoryPipeline::new(&driver);

    let err = pipeline.run(&story_input()).await.unwrap_err();

    assert_eq!(
        story_error(&err),
        &StoryErrorKind::EmptyManuscript("final".to_string())
    );
}

#[tokio::test]
async fn phase_settings_reach_the_request() {
    let driver = ScriptedDriver::new([outline_json("Pip")]);
    let options = PipelineOptions::builder().model("story-model").build().unwrap();
    let pipeline = StoryPipeline::with_options(&driver, options);

    pipeline.generate_outline(&story_input()).await.unwrap();

    let request = &driver.requests()[0];
    assert_eq!(request.model.as_deref(), Some("story-model"));
    assert_eq!(request.temperature, Some(0.4));
    assert_eq!(request.max_tokens, Some(2000));
}
