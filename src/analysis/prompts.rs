//! Prompt construction and response parsing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::collection::{Job, Persona};
use crate::model::Section;

/// Characters of section content shown to the model when scoring.
pub const SCORE_EXCERPT_CHARS: usize = 800;

/// Characters of section content shown to the model when summarizing.
pub const INSIGHT_EXCERPT_CHARS: usize = 2500;

/// Token budget for a relevance answer.
pub const SCORE_MAX_TOKENS: u32 = 150;

/// Token budget for a summary.
pub const INSIGHT_MAX_TOKENS: u32 = 400;

/// Score used when the model gives nothing usable.
pub const DEFAULT_SCORE: f64 = 1.0;

static SCORE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Score:\s*(\d+(?:\.\d+)?)").expect("score pattern"));

static ANY_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d+(?:\.\d+)?)\b").expect("number pattern"));

fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Prompt asking for a short reasoning line and a 1–10 relevance score.
pub fn relevance_prompt(section: &Section, persona: &Persona, job: &Job) -> String {
    format!(
        r#"You are an expert analyst. Your task is to rate the relevance of a document section for a specific user.

**USER PROFILE:**
- **Role:** {role}
- **Goal:** {task}

**DOCUMENT SECTION TO EVALUATE:**
- **Title:** "{title}"
- **Content Summary:** "{content}..."

**INSTRUCTIONS:**
1.  **Reasoning:** First, in a short sentence, explain your reasoning. Think step-by-step: Does this section directly help the user achieve their specific goal? For a "Travel Planner" planning a trip for "college friends," sections on nightlife, budget activities, and logistics are highly relevant. A section on ancient history is not.
2.  **Scoring:** Then, on a new line, give a relevance score from 1.0 (not relevant) to 10.0 (critically important).

**EXAMPLE:**
Reasoning: This section on nightlife and entertainment is highly relevant for planning a trip for college friends.
Score: 9.5

**YOUR ANALYSIS:**
"#,
        role = persona.role,
        task = job.task,
        title = section.text,
        content = excerpt(&section.content, SCORE_EXCERPT_CHARS).trim(),
    )
}

/// Prompt asking for a single narrative paragraph tailored to the persona.
pub fn insight_prompt(section: &Section, persona: &Persona, job: &Job) -> String {
    format!(
        r#"You are an expert travel writer. Your task is to create a summary of the provided text for a user.

**User Persona:** {role}
**User's Goal:** {task}

**SOURCE TEXT:**
---
{content}
---

**Your Task:**
Synthesize the most important information from the source text into a single, cohesive, and helpful paragraph. Your summary must be written in a narrative style.
- Focus exclusively on details that help the user achieve their goal (e.g., for college friends, mention nightlife, activities, budget-friendly options, and places to see).
- Extract and weave in specific names of places, activities, or practical tips.
- **Strictly prohibit** the use of bullet points, numbered lists, or any formatting that breaks the paragraph flow.
- The entire response should be one fluid paragraph. Do not add introductory phrases like "As a helpful AI...". Start directly with the information.
- If the source text is not relevant to the user's task, simply write: "This section does not provide relevant details for the specified task."
"#,
        role = persona.role,
        task = job.task,
        content = excerpt(&section.content, INSIGHT_EXCERPT_CHARS),
    )
}

/// Pull a relevance score out of a model answer.
///
/// Prefers an explicit `Score: N` line, then the last number anywhere in the
/// answer, then [`DEFAULT_SCORE`].
pub fn parse_relevance_score(response: &str) -> f64 {
    let explicit = SCORE_LINE
        .captures(response)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok());
    if let Some(score) = explicit {
        return score;
    }

    ANY_NUMBER
        .captures_iter(response)
        .last()
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(DEFAULT_SCORE)
}
