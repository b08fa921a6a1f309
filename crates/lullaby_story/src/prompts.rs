//! Prompt construction for each generation phase.
//!
//! Every prompt starts with the same rules block built from the story input;
//! the phase then appends its own output contract. All functions here are
//! pure string construction.

use lullaby_core::{
    Beat, Outline, Phase, StoryStyle, StructuredStoryInput, get_paragraph_guidance,
};
use strum::IntoEnumIterator;

/// System message sent with every story request.
pub const SYSTEM_PROMPT: &str = "You are a careful author of children's bedtime stories. \
You follow every formatting instruction exactly and never add commentary.";

/// Extra material appended after the phase instructions.
#[derive(Debug, Clone, Copy, Default)]
pub enum PhaseContext<'a> {
    /// Nothing beyond the rules and instructions
    #[default]
    None,
    /// The validated outline the draft must follow
    Outline(&'a Outline),
    /// The draft the final pass must polish
    Draft(&'a str),
}

/// Build the prompt for `phase` with no appended context.
///
/// # Examples
///
/// ```
/// use lullaby_core::{AgeRange, Phase, StoryStyle, StructuredStoryInput};
/// use lullaby_story::build_phase_prompt;
///
/// let input = StructuredStoryInput::builder()
///     .age_range(AgeRange::ThreeToFour)
///     .main_character("Pip")
///     .setting("a mossy forest")
///     .length_words(800)
///     .style(StoryStyle::PlainAndClear)
///     .build()
///     .unwrap();
///
/// let prompt = build_phase_prompt(&input, Phase::Draft);
/// assert!(prompt.contains("12 words"));
/// assert!(prompt.contains("DRAFT_STORY:"));
/// ```
pub fn build_phase_prompt(input: &StructuredStoryInput, phase: Phase) -> String {
    build_phase_prompt_with(input, phase, PhaseContext::None)
}

/// Build the prompt for `phase`, appending `context` after the instructions.
pub fn build_phase_prompt_with(
    input: &StructuredStoryInput,
    phase: Phase,
    context: PhaseContext<'_>,
) -> String {
    let mut prompt = base_rules(input);
    prompt.push('\n');
    prompt.push_str(&phase_instructions(input, phase));
    append_context(&mut prompt, context);
    prompt
}

/// Build the prompt that asks for a complete [`Outline`] object.
///
/// The pipeline uses this for its planning phase; the result is parsed with
/// [`parse_outline_strict`](crate::parse_outline_strict).
pub fn build_outline_plan_prompt(input: &StructuredStoryInput) -> String {
    let mut prompt = base_rules(input);
    prompt.push('\n');
    prompt.push_str("TASK: Plan the story as a structured outline.\n");
    prompt.push_str(
        "Return strict JSON only: a single object with exactly these keys and no others.\n",
    );
    prompt.push_str("- \"title\": string\n");
    prompt.push_str(&format!(
        "- \"target_audience\": string, for example \"ages {}\"\n",
        input.age_range()
    ));
    prompt.push_str("- \"tone\": string\n");
    prompt.push_str(
        "- \"characters\": array of 1 to 5 objects, main character first, each with \
\"name\" (string), \"traits\" (non-empty array of strings) and \"relationship\" (string)\n",
    );
    prompt.push_str("- \"setting\": string\n");
    prompt.push_str(&format!(
        "- \"scenes\": array of exactly 6 objects, one per beat in this order: {}. \
Each has \"scene_id\" (1 to 6 in order), \"scene_goal\", \"new_event\", \"new_detail\", \
\"conflict_turn\" and \"mini_payoff\" (all strings)\n",
        beat_names()
    ));
    prompt.push_str("- \"ending_payoff\": string\n");
    prompt.push_str("- \"theme\": string\n");
    prompt.push_str(
        "Every string must be real story content. Never leave a field blank or use a \
placeholder such as TBD. Every scene needs a conflict_turn that changes the situation.\n",
    );
    prompt.push_str("Do not wrap the JSON in markdown fences. Do not add any commentary.\n");
    prompt
}

/// Build the instruction that asks the model to fix rejected JSON.
///
/// # Examples
///
/// ```
/// use lullaby_story::build_repair_prompt;
///
/// let prompt = build_repair_prompt("{\"title\": \"\"}", &["title: must not be blank".to_string()]);
/// assert!(prompt.contains("- title: must not be blank"));
/// assert!(prompt.ends_with("{\"title\": \"\"}\n"));
/// ```
pub fn build_repair_prompt(prior_text: &str, issues: &[String]) -> String {
    let mut prompt = String::from("The JSON below was rejected.\n\nPROBLEMS\n");
    if issues.is_empty() {
        prompt.push_str("- it could not be parsed\n");
    }
    for issue in issues {
        prompt.push_str(&format!("- {}\n", issue));
    }
    prompt.push_str(
        "\nReturn the corrected JSON only. Keep everything that was already valid and \
fill every blank field with real story content. Do not wrap the JSON in markdown fences. \
Do not add any commentary.\n\nREJECTED JSON\n",
    );
    prompt.push_str(prior_text.trim());
    prompt.push('\n');
    prompt
}

fn base_rules(input: &StructuredStoryInput) -> String {
    let mut rules = String::from("STORY INPUTS\n");
    rules.push_str(&format!("- Age range: {}\n", input.age_range()));
    rules.push_str(&format!("- Main character: {}\n", input.main_character()));
    rules.push_str(&format!("- Setting: {}\n", input.setting()));
    rules.push_str(&format!("- Target length: about {} words\n", input.length_words()));
    rules.push_str(&format!("- Style: {}\n", input.style()));
    if let Some(minutes) = input.length_minutes() {
        rules.push_str(&format!("- Listening time: {} minutes\n", minutes));
        rules.push_str(&format!(
            "- Paragraphs: {}\n",
            get_paragraph_guidance(*minutes)
        ));
    }

    rules.push_str("\nRULES\n");
    rules.push_str("- The story must have a clear goal, an obstacle and a resolution.\n");
    rules.push_str(
        "- Every character, object or question you introduce must be resolved by the end.\n",
    );
    rules.push_str(&format!(
        "- Keep every sentence at or under {} words.\n",
        input.age_range().max_sentence_words()
    ));
    rules.push_str("- Do not use semicolons.\n");
    rules.push_str("- Use as few commas as possible.\n");
    rules.push_str(
        "- Keep all content gentle and safe for a child at bedtime. No violence, no lasting \
danger, no frightening imagery and no unkindness left unresolved.\n",
    );
    rules.push_str(&format!("- {}\n", style_rule(*input.style())));
    rules
}

fn style_rule(style: StoryStyle) -> &'static str {
    match style {
        StoryStyle::PlainAndClear => {
            "Style is Plain & Clear: use simple, direct language. Do not use alliteration, \
rhyme or other poetic devices."
        }
        StoryStyle::ALittlePlayful => {
            "Style is A Little Playful: occasional fun language such as a silly sound or a \
playful word is welcome. Do not overuse it."
        }
        StoryStyle::Poetic => {
            "Style is Poetic: a lyrical rhythm is welcome, but use at most 1 alliteration \
cluster per 200 words."
        }
    }
}

fn phase_instructions(input: &StructuredStoryInput, phase: Phase) -> String {
    match phase {
        Phase::Outline => format!(
            "TASK: Plan the story as a beat sheet.\n\
Return strict JSON only: a single top-level array of exactly 6 objects in this order: {}.\n\
Each object has exactly two keys: \"beat\" (the beat name above) and \"summary\" (one or two sentences).\n\
Do not wrap the JSON in markdown fences. Do not add any commentary.\n",
            beat_names()
        ),
        Phase::Draft => format!(
            "TASK: Write the first draft.\n\
Begin your output with the literal label DRAFT_STORY: followed by the story.\n\
Write exactly one paragraph per beat, 6 paragraphs in total, separated by blank lines.\n\
Aim for about {} words.\n\
Output nothing else.\n",
            input.length_words()
        ),
        Phase::Final => format!(
            "TASK: Write the final story.\n\
Begin your output with the literal label FINAL_STORY: followed by the story.\n\
Preserve the plot and structure of the draft. Reduce repeated words, phrases and paragraphs. \
Improve the rhythm for reading aloud. Resolve every thread.\n\
Aim for about {} words.\n\
Output nothing else.\n",
            input.length_words()
        ),
    }
}

fn append_context(prompt: &mut String, context: PhaseContext<'_>) {
    match context {
        PhaseContext::None => {}
        PhaseContext::Outline(outline) => {
            let json = serde_json::to_string_pretty(outline)
                .unwrap_or_else(|_| format!("{:#?}", outline));
            prompt.push_str("\nOUTLINE\n");
            prompt.push_str(&json);
            prompt.push('\n');
        }
        PhaseContext::Draft(draft) => {
            prompt.push_str("\nDRAFT\n");
            prompt.push_str(draft.trim());
            prompt.push('\n');
        }
    }
}

fn beat_names() -> String {
    Beat::iter()
        .map(|beat| beat.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
