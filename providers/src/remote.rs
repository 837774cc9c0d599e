//! OpenAI-compatible chat-completions client for plan formatting.
//!
//! The remote service receives the triage summary and the candidate
//! exercises and must answer with strict JSON matching the session plan
//! schema. Temperature 0 and a fixed seed keep the service as close to
//! deterministic as it will go; true repeatability for identical inputs is
//! the consistency cache's job, not this client's.

use motus_types::{DifficultyColor, Disposition, ExerciseCard, Selection, SessionPlan, TriageResult};
use serde::Deserialize;
use serde_json::json;

use crate::{FormatError, PlanFormatter, http_client};

/// Fixed sampling seed sent to the service.
const PLAN_SEED: u64 = 42;

const MAX_ERROR_BODY_CHARS: usize = 2048;

const SYSTEM_PROMPT: &str = "\
You are an expert movement-screen strength coach. Build a corrective workout \
session from the athlete data and the available exercises. You must use ONLY \
the exercises listed; do not invent exercises. Choose the best 2-3 for the \
athlete's weakest areas and write each coach tip against the athlete's actual \
scores. Answer with strict JSON only, matching this schema: \
{\"session_title\": string, \"estimated_duration\": string, \
\"coach_summary\": string, \"exercises\": [{\"name\": string, \"tag\": string, \
\"sets_reps\": string, \"tempo\": string, \"coach_tip\": string}]}";

/// Client for the remote plan-formatting service.
#[derive(Debug, Clone)]
pub struct RemoteFormatter {
    base_url: String,
    api_key: String,
    model: String,
}

impl RemoteFormatter {
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn request_body(&self, triage: &TriageResult, selection: &Selection) -> serde_json::Value {
        json!({
            "model": self.model,
            "temperature": 0.0,
            "seed": PLAN_SEED,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_user_prompt(triage, selection) },
            ],
        })
    }
}

impl PlanFormatter for RemoteFormatter {
    async fn format_plan(
        &self,
        triage: &TriageResult,
        selection: &Selection,
    ) -> Result<SessionPlan, FormatError> {
        let response = http_client()
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(triage, selection))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            return Err(FormatError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletion = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(FormatError::EmptyResponse)?;

        tracing::debug!(bytes = content.len(), "plan service answered");

        let wire: WirePlan =
            serde_json::from_str(&content).map_err(FormatError::MalformedPlan)?;
        Ok(wire.into_plan(triage.target_level()))
    }
}

fn build_user_prompt(triage: &TriageResult, selection: &Selection) -> String {
    let mut prompt = String::new();

    prompt.push_str("### ATHLETE\n");
    prompt.push_str(&format!(
        "- Status: {} (target level {})\n- Reason: {}\n- Scores:\n",
        triage.status(),
        triage.target_level(),
        triage.reason()
    ));
    for (test, score) in triage.scores().iter() {
        prompt.push_str(&format!("  - {}: {}/3\n", test.label(), score.score()));
    }

    prompt.push_str("\n### AVAILABLE EXERCISES (STRICT CONSTRAINT)\n");
    // Sorted by name so the prompt is stable for a given selection.
    let mut entries: Vec<_> = selection.iter().collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    for entry in entries {
        prompt.push_str(&format!(
            "- {} (level {}; tags: {})\n  {}\n",
            entry.name,
            entry.level,
            entry.tags.join(", "),
            entry.description
        ));
    }

    prompt
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Schema the remote service must answer with.
#[derive(Debug, Deserialize)]
struct WirePlan {
    session_title: String,
    #[serde(default = "default_duration")]
    estimated_duration: String,
    coach_summary: String,
    #[serde(default)]
    exercises: Vec<WireCard>,
}

#[derive(Debug, Deserialize)]
struct WireCard {
    name: String,
    tag: String,
    sets_reps: String,
    tempo: String,
    coach_tip: String,
}

fn default_duration() -> String {
    "20-30 min".to_string()
}

impl WirePlan {
    /// The difficulty color is derived from the target level rather than
    /// trusted from the service.
    fn into_plan(self, target_level: u8) -> SessionPlan {
        SessionPlan {
            disposition: Disposition::Plan,
            title: self.session_title,
            estimated_duration: self.estimated_duration,
            difficulty_color: DifficultyColor::for_level(target_level),
            summary: self.coach_summary,
            exercises: self
                .exercises
                .into_iter()
                .map(|card| ExerciseCard {
                    name: card.name,
                    tag: card.tag,
                    prescription: card.sets_reps,
                    tempo: card.tempo,
                    coach_tip: card.coach_tip,
                })
                .collect(),
        }
    }
}
