//! Fixed sections around the adaptive activities: the morning password
//! warm-up, a team challenge for siblings and the evening reflection.
//!
//! None of these are levelled or tracked in the recency window. They are
//! drawn from small tables with the cycle's seeded RNG, so a regenerated day
//! reproduces them too.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::packet_engine::composer::Theme;

/// Everything printed besides the activities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    #[serde(default)]
    pub warm_up: Option<MorningPassword>,
    #[serde(default)]
    pub team_challenge: Option<TeamChallenge>,
    #[serde(default)]
    pub reflection: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PasswordStyle {
    /// First letter of each word, the rest hidden.
    Rebus,
    /// Letters as numbers, A=1.
    NumberCode,
}

/// Warm-up puzzle whose answer is a phrase the children act out together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorningPassword {
    pub style: PasswordStyle,
    /// One clue per word of the password.
    pub clues: Vec<String>,
    pub hint: String,
    pub answer: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamChallenge {
    pub title: String,
    pub task: String,
    pub bonus: String,
}

// ── tables ───────────────────────────────────────────────────────────────────

fn passwords(theme: Theme) -> &'static [&'static str] {
    match theme {
        Theme::Adventure => &["BRAVE EXPLORERS", "QUEST BEGINS", "ADVENTURE TIME"],
        Theme::Science   => &["MAD SCIENTISTS", "EXPERIMENT TIME", "DISCOVERY DANCE"],
        Theme::Creative  => &["IMAGINATION STATION", "CREATE AND PLAY", "ART ATTACK"],
        Theme::History   => &["TIME TRAVELERS", "ANCIENT SECRETS", "HISTORY DETECTIVES"],
        Theme::FreeChoice | Theme::Exploration | Theme::Reflection => {
            &["MORNING MAGIC", "BRAIN POWER", "READY TO LEARN"]
        }
    }
}

const REFLECTION: [&str; 3] = [
    "What made your brain grow today?",
    "What was the most fun part?",
    "What do you want to try tomorrow?",
];

const REFLECTION_OLDER: [&str; 3] = [
    "What strategy helped you solve the hardest puzzle?",
    "How did you help your sibling today?",
    "What would you change about today's activities?",
];

/// Age from which the longer reflection set is used.
pub const OLDER_REFLECTION_AGE: u8 = 8;

// ── builders ─────────────────────────────────────────────────────────────────

fn rebus(password: &str) -> Vec<String> {
    password
        .split_whitespace()
        .map(|word| {
            let first: String = word.chars().take(1).collect();
            format!("{first}{}", "?".repeat(word.chars().count().saturating_sub(1)))
        })
        .collect()
}

fn number_code(password: &str) -> Vec<String> {
    password
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(char::is_ascii_uppercase)
                .map(|c| (c as u8 - b'A' + 1).to_string())
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect()
}

pub fn morning_password<R: Rng>(theme: Theme, rng: &mut R) -> MorningPassword {
    let answer = passwords(theme).choose(rng).copied().unwrap_or("READY TO LEARN");
    let style = if rng.gen_bool(0.5) { PasswordStyle::Rebus } else { PasswordStyle::NumberCode };
    let (clues, hint) = match style {
        PasswordStyle::Rebus => (rebus(answer), "Each word starts with the letter shown. Guess the rest together!"),
        PasswordStyle::NumberCode => (number_code(answer), "A=1, B=2, C=3..."),
    };
    MorningPassword {
        style,
        clues,
        hint: hint.to_string(),
        answer: answer.to_string(),
        action: format!("Do this together: {answer}!"),
    }
}

/// Theme-keyed challenge that needs two children.
pub fn team_challenge(theme: Theme) -> TeamChallenge {
    let (title, task, bonus) = match theme {
        Theme::Science => (
            "Space Mission Planning",
            "Plan a mission to a new planet. One person lists what to bring, the other draws the spaceship. Work together!",
            "What would you name your spaceship?",
        ),
        Theme::Exploration => (
            "Design an Underwater City",
            "One person draws buildings, the other draws sea creatures. Create a complete underwater world together!",
            "Give your city a name and make up 3 rules for living there.",
        ),
        Theme::Creative => (
            "Story Relay",
            "Start with \"Once upon a time...\" and take turns adding one sentence each until the story has an ending.",
            "Draw the most exciting moment of your story.",
        ),
        _ => (
            "Invention Time",
            "Invent something that doesn't exist yet. One person describes it, the other draws it. Make it amazing!",
            "What problem does your invention solve?",
        ),
    };
    TeamChallenge { title: title.into(), task: task.into(), bonus: bonus.into() }
}

/// Three prompts, drawn from the longer set when the child is old enough.
pub fn reflection_prompts<R: Rng>(age: Option<u8>, rng: &mut R) -> Vec<String> {
    let mut pool: Vec<&str> = REFLECTION.to_vec();
    if age.is_some_and(|a| a >= OLDER_REFLECTION_AGE) {
        pool.extend(REFLECTION_OLDER);
    }
    pool.choose_multiple(rng, 3).map(|p| p.to_string()).collect()
}

/// All extras for one packet.
pub fn daily<R: Rng>(theme: Theme, age: Option<u8>, siblings: bool, rng: &mut R) -> Extras {
    Extras {
        warm_up: Some(morning_password(theme, rng)),
        team_challenge: siblings.then(|| team_challenge(theme)),
        reflection: reflection_prompts(age, rng),
    }
}
