//! Shared builder functions for the built-in content modules.
//!
//! Every content module assembles the same struct with a handful of optional
//! fields. These helpers keep the content files down to the text itself.

use crate::packet_engine::models::{ActivityTemplate, ActivityType, Layout};

/// Bare template: no answer, no hint, text layout, type-default minutes.
pub fn template(
    id: &str, activity_type: ActivityType, tier: u8,
    title: &str, prompt: &str,
) -> ActivityTemplate {
    ActivityTemplate {
        id: id.to_string(),
        activity_type,
        tier,
        title: title.to_string(),
        prompt: prompt.to_string(),
        answer: None,
        hint: None,
        layout: Layout::Text,
        estimated_minutes: None,
    }
}

/// Question with a fixed answer and an optional hint.
pub fn solved(
    id: &str, activity_type: ActivityType, tier: u8,
    title: &str, prompt: &str, answer: &str, hint: Option<&str>,
) -> ActivityTemplate {
    ActivityTemplate {
        answer: Some(answer.to_string()),
        hint: hint.map(str::to_string),
        ..template(id, activity_type, tier, title, prompt)
    }
}

/// Riddles always carry an answer and a hint.
pub fn riddle(id: &str, tier: u8, question: &str, answer: &str, hint: &str) -> ActivityTemplate {
    solved(id, ActivityType::Riddle, tier, "Riddle Time", question, answer, Some(hint))
}

/// Logic grid: clues are joined into the prompt one per line, laid out as a grid.
pub fn logic_grid(id: &str, tier: u8, title: &str, setup: &str, clues: &[&str], solution: &str) -> ActivityTemplate {
    let mut prompt = String::from(setup);
    for (i, clue) in clues.iter().enumerate() {
        prompt.push_str(&format!("\n{}. {}", i + 1, clue));
    }
    ActivityTemplate {
        layout: Layout::Grid,
        ..solved(id, ActivityType::LogicPuzzle, tier, title, &prompt, solution, None)
    }
}

/// Open-ended prompt answered on blank lines or in a drawing box.
pub fn open(id: &str, activity_type: ActivityType, tier: u8, title: &str, prompt: &str, layout: Layout) -> ActivityTemplate {
    ActivityTemplate { layout, ..template(id, activity_type, tier, title, prompt) }
}
