mod test_utils;

use lullaby_error::{LullabyErrorKind, StoryErrorKind};
use lullaby_story::{parse_beat_sheet_strict, parse_outline_strict};
use test_utils::{FixedRepairer, outline_json, outline_value};

#[tokio::test]
async fn near_miss_json_parses_without_repair() {
    let raw = r#"```json
{
  title: "The Lantern Moth",
  target_audience: "ages 5-6",
  tone: 'cozy',
  characters: [{name: "Pip", traits: ["curious",], relationship: "main character"},],
  setting: "a mossy forest",
  scenes: [
    {scene_id: 1, scene_goal: "a", new_event: "b", new_detail: "c", conflict_turn: "d", mini_payoff: "e"},
    {scene_id: 2, scene_goal: "a", new_event: "b", new_detail: "c", conflict_turn: "d", mini_payoff: "e"},
    {scene_id: 3, scene_goal: "a", new_event: "b", new_detail: "c", conflict_turn: "d", mini_payoff: "e"},
    {scene_id: 4, scene_goal: "a", new_event: "b", new_detail: "c", conflict_turn: "d", mini_payoff: "e"},
    {scene_id: 5, scene_goal: "a", new_event: "b", new_detail: "c", conflict_turn: "d", mini_payoff: "e"},
    {scene_id: 6, scene_goal: "a", new_event: "b", new_detail: "c", conflict_turn: "d", mini_payoff: "e"},
  ],
  ending_payoff: "home again",
  theme: "helping",
}
```"#;
    let repairer = FixedRepairer::new("unused");

    let parsed = parse_outline_strict(raw, &repairer).await.unwrap();

    assert_eq!(parsed.outline().title, "The Lantern Moth");
    assert_eq!(parsed.outline().tone, "cozy");
    assert!(parsed.warnings.is_empty());
    assert!(!parsed.was_repaired());
    assert_eq!(repairer.calls(), 0);
}

#[tokio::test]
async fn bracketed_prose_before_outline_needs_no_repair() {
    let raw = format!("Here is the outline [ages 5-6]:\n{}", outline_json("Pip"));
    let repairer = FixedRepairer::new("unused");

    let parsed = parse_outline_strict(&raw, &repairer).await.unwrap();

    assert_eq!(parsed.outline().title, "Pip");
    assert!(parsed.warnings.is_empty());
    assert_eq!(repairer.calls(), 0);
}

#[tokio::test]
async fn unparseable_text_is_repaired_once() {
    let repairer = FixedRepairer::new(outline_json("Corrected Title"));

    let parsed = parse_outline_strict("Sorry, I cannot produce JSON today.", &repairer)
        .await
        .unwrap();

    assert_eq!(parsed.outline().title, "Corrected Title");
    assert_eq!(parsed.warnings.len(), 1);
    assert!(parsed.warnings[0].starts_with("required repair after syntax failure"));
    assert_eq!(repairer.calls(), 1);
}

#[tokio::test]
async fn blank_conflict_turn_triggers_repair() {
    let mut broken = outline_value("Pip");
    broken["scenes"][3]["conflict_turn"] = serde_json::json!("");
    let repairer = FixedRepairer::new(outline_json("Pip"));

    let parsed = parse_outline_strict(&broken.to_string(), &repairer)
        .await
        .unwrap();

    assert!(parsed
        .outline()
        .scenes
        .iter()
        .all(|scene| !scene.conflict_turn.is_empty()));
    assert_eq!(repairer.calls(), 1);
    assert_eq!(
        repairer.last_issues(),
        vec!["scenes[3].conflict_turn: must not be blank".to_string()]
    );
}

#[tokio::test]
async fn second_failure_is_terminal() {
    let mut wrong_count = outline_value("Pip");
    wrong_count["scenes"].as_array_mut().unwrap().pop();
    let repairer = FixedRepairer::new(wrong_count.to_string());

    let err = parse_outline_strict("{\"title\": \"Pip\"", &repairer)
        .await
        .unwrap_err();

    assert_eq!(repairer.calls(), 1);
    let LullabyErrorKind::Story(story) = err.kind() else {
        panic!("expected a story error, got {err}");
    };
    let StoryErrorKind::OutlineRejected { stage, detail, text } = story.kind() else {
        panic!("expected OutlineRejected, got {story}");
    };
    assert_eq!(stage, "schema");
    assert!(detail.contains("expected exactly 6 scenes, found 5"));
    assert_eq!(text, &wrong_count.to_string());
}

#[tokio::test]
async fn repairer_errors_propagate() {
    let repairer = FixedRepairer::failing("connection reset");

    let err = parse_outline_strict("not json", &repairer).await.unwrap_err();

    assert!(matches!(err.kind(), LullabyErrorKind::Http(_)));
    assert_eq!(repairer.calls(), 1);
}

#[tokio::test]
async fn beat_sheet_in_fences_parses() {
    let raw = "```json\n[\n\
        {\"beat\": \"Hook\", \"summary\": \"Pip sees a glow.\"},\n\
        {\"beat\": \"Goal\", \"summary\": \"Pip wants to help.\"},\n\
        {\"beat\": \"Obstacle\", \"summary\": \"The path forks.\"},\n\
        {\"beat\": \"Attempt1\", \"summary\": \"The left path ends.\"},\n\
        {\"beat\": \"Attempt2\", \"summary\": \"The stream is crossed.\"},\n\
        {\"beat\": \"Climax+Resolution\", \"summary\": \"The moth finds home.\"},\n\
    ]\n```";
    let repairer = FixedRepairer::new("unused");

    let parsed = parse_beat_sheet_strict(raw, &repairer).await.unwrap();

    assert_eq!(parsed.value.beats().len(), 6);
    assert_eq!(repairer.calls(), 0);
}
