//! Scripted collaborators for pipeline and parser tests.

#![allow(dead_code)]

use async_trait::async_trait;
use lullaby_core::{AgeRange, GenerateRequest, StoryStyle, StructuredStoryInput};
use lullaby_error::{HttpError, LullabyResult};
use lullaby_interface::{Repairer, StoryDriver};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Driver that answers from a fixed script and records every request.
pub struct ScriptedDriver {
    responses: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedDriver {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_results(responses.into_iter().map(|r| Ok(r.into())))
    }

    pub fn with_results(results: impl IntoIterator<Item = Result<String, String>>) -> Self {
        Self {
            responses: Mutex::new(results.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoryDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> LullabyResult<String> {
        self.requests.lock().unwrap().push(req.clone());
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(text.trim().to_string()),
            Some(Err(message)) => Err(HttpError::new(message).into()),
            None => Err(HttpError::new("script exhausted").into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Repairer that returns a fixed payload and counts its calls.
pub struct FixedRepairer {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_issues: Mutex<Vec<String>>,
}

impl FixedRepairer {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            calls: AtomicUsize::new(0),
            last_issues: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: AtomicUsize::new(0),
            last_issues: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_issues(&self) -> Vec<String> {
        self.last_issues.lock().unwrap().clone()
    }
}

#[async_trait]
impl Repairer for FixedRepairer {
    async fn repair(&self, _prior_text: &str, issues: &[String]) -> LullabyResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_issues.lock().unwrap() = issues.to_vec();
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(HttpError::new(message.clone()).into()),
        }
    }
}

pub fn story_input() -> StructuredStoryInput {
    StructuredStoryInput::builder()
        .age_range(AgeRange::FiveToSix)
        .main_character("Pip the hedgehog")
        .setting("a mossy forest at dusk")
        .length_words(600)
        .style(StoryStyle::ALittlePlayful)
        .build()
        .unwrap()
}

pub fn outline_value(title: &str) -> Value {
    let scenes: Vec<Value> = (1..=6)
        .map(|id| {
            json!({
                "scene_id": id,
                "scene_goal": format!("goal {}", id),
                "new_event": format!("event {}", id),
                "new_detail": format!("detail {}", id),
                "conflict_turn": format!("turn {}", id),
                "mini_payoff": format!("payoff {}", id),
            })
        })
        .collect();
    json!({
        "title": title,
        "target_audience": "ages 5-6",
        "tone": "cozy",
        "characters": [
            {"name": "Pip", "traits": ["curious", "kind"], "relationship": "main character"},
            {"name": "Moth", "traits": ["shy"], "relationship": "new friend"}
        ],
        "setting": "a mossy forest at dusk",
        "scenes": scenes,
        "ending_payoff": "Pip falls asleep under glowing wings",
        "theme": "kindness lights the way",
    })
}

pub fn outline_json(title: &str) -> String {
    serde_json::to_string_pretty(&outline_value(title)).unwrap()
}

/// Six paragraphs with no repeated three-word phrase.
pub const CALM_STORY: &str = "Pip woke when a soft glow drifted past the hollow log.\n\n\
A small moth with silver wings had lost its way home.\n\n\
They searched beside the stream where frogs hummed low songs.\n\n\
Next they climbed a hill covered in sleepy clover blossoms.\n\n\
From the top hundreds of lantern moths twinkled back at them.\n\n\
The moth flew to its family and Pip yawned all the way to bed.";
