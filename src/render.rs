//! Rendering boundary: turns a [`Packet`] into a printable artifact.
//!
//! The engine never renders anything itself. A PDF backend plugs in by
//! implementing [`Renderer`]; the two bundled renderers produce Markdown for
//! direct printing and a JSON document for external layout tools.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use thiserror::Error;
use tracing::info;

use crate::packet_engine::{
    config::RenderConfig,
    extras::{MorningPassword, PasswordStyle, TeamChallenge},
    models::{ActivityTemplate, ActivityType, Layout, Packet},
};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("packet for {0} has no activities")]
    EmptyPacket(String),

    #[error("failed to encode packet: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to format packet: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("failed to write rendered packet: {0}")]
    Write(#[from] std::io::Error),
}

/// Rendered output plus what it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub media_type: &'static str,
    /// File extension without the dot.
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

pub trait Renderer {
    fn render(&self, packet: &Packet, config: &RenderConfig) -> Result<Artifact, RenderError>;
}

/// Render `packet` and write it to `<dir>/<child>-<date>.<ext>`, creating
/// `dir` if needed.
pub fn write_artifact(
    renderer: &dyn Renderer,
    packet: &Packet,
    config: &RenderConfig,
    dir: &Path,
) -> Result<PathBuf, RenderError> {
    let artifact = renderer.render(packet, config)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}-{}.{}", packet.child_id, packet.date, artifact.extension));
    std::fs::write(&path, &artifact.bytes)?;
    info!("Wrote {} to {:?}", artifact.media_type, path);
    Ok(path)
}

fn ensure_not_empty(packet: &Packet) -> Result<(), RenderError> {
    if packet.activities.is_empty() {
        return Err(RenderError::EmptyPacket(packet.child_id.to_string()));
    }
    Ok(())
}

fn heading(activity_type: ActivityType) -> &'static str {
    match activity_type {
        ActivityType::LogicPuzzle         => "Logic Puzzle",
        ActivityType::MathChallenge       => "Math Challenge",
        ActivityType::WordActivity        => "Word Fun",
        ActivityType::EducationalActivity => "Did You Know?",
        ActivityType::CreativePrompt      => "Creative Challenge",
        ActivityType::Riddle              => "Riddle Time",
    }
}

fn title_case(s: &str) -> String {
    s.split('-')
        .map(|w| {
            let mut c = w.chars();
            match c.next() {
                Some(first) => first.to_uppercase().chain(c).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Markdown
// ---------------------------------------------------------------------------

/// Printable text: title block, one section per activity, answers on a
/// separate key at the end, parent notes and tomorrow's teaser as footer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    fn activity(out: &mut String, n: usize, a: &ActivityTemplate) -> std::fmt::Result {
        let section = heading(a.activity_type);
        if a.title == section {
            writeln!(out, "## {n}. {section}")?;
        } else {
            writeln!(out, "## {n}. {section}: {}", a.title)?;
        }
        writeln!(out, "*About {} minutes*", a.minutes())?;
        writeln!(out)?;
        writeln!(out, "{}", a.prompt)?;
        writeln!(out)?;
        match a.layout {
            Layout::Text => {}
            Layout::Grid => {
                writeln!(out, "*Use the grid: mark ✓ for yes and ✗ for no.*")?;
                writeln!(out)?;
            }
            Layout::Lines => {
                for _ in 0..3 {
                    writeln!(out, "_______________________________________________")?;
                }
                writeln!(out)?;
            }
            Layout::DrawingBox => {
                writeln!(out, "```")?;
                writeln!(out, "+---------------------------------------------+")?;
                for _ in 0..8 {
                    writeln!(out, "|                                             |")?;
                }
                writeln!(out, "+---------------------------------------------+")?;
                writeln!(out, "```")?;
                writeln!(out)?;
            }
        }
        if let Some(hint) = &a.hint {
            writeln!(out, "*Hint: {hint}*")?;
            writeln!(out)?;
        }
        writeln!(out, "---")?;
        writeln!(out)
    }

    fn warm_up(out: &mut String, p: &MorningPassword) -> std::fmt::Result {
        writeln!(out, "## Morning Password")?;
        writeln!(out)?;
        match p.style {
            PasswordStyle::Rebus => writeln!(out, "Crack today's password: {}", p.clues.join("  "))?,
            PasswordStyle::NumberCode => writeln!(out, "Crack today's password: {}", p.clues.join("  /  "))?,
        }
        writeln!(out)?;
        writeln!(out, "*Hint: {}*", p.hint)?;
        writeln!(out)?;
        writeln!(out, "Password: ____________________")?;
        writeln!(out)?;
        writeln!(out, "---")?;
        writeln!(out)
    }

    fn team(out: &mut String, c: &TeamChallenge) -> std::fmt::Result {
        writeln!(out, "## Team Challenge: {}", c.title)?;
        writeln!(out)?;
        writeln!(out, "{}", c.task)?;
        writeln!(out)?;
        writeln!(out, "**Bonus:** {}", c.bonus)?;
        writeln!(out)?;
        writeln!(out, "---")?;
        writeln!(out)
    }

    fn reflection(out: &mut String, prompts: &[String]) -> std::fmt::Result {
        writeln!(out, "## Reflection")?;
        writeln!(out)?;
        for prompt in prompts {
            writeln!(out, "- {prompt}")?;
            writeln!(out, "  _______________________________________________")?;
        }
        writeln!(out)?;
        writeln!(out, "How did today feel? Circle one: 😄 😐 😟  ")?;
        writeln!(out, "⭐ Star your favorite activity!  ")?;
        writeln!(out, "One new thing I learned: __________")?;
        writeln!(out)
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, packet: &Packet, config: &RenderConfig) -> Result<Artifact, RenderError> {
        ensure_not_empty(packet)?;
        let mut out = String::new();

        writeln!(out, "<!-- page: {}, theme: {} -->", config.page_size, config.theme)?;
        writeln!(out, "# {}'s Daily Adventure", packet.child_name)?;
        writeln!(out)?;
        writeln!(out, "**Date:** {}  ", packet.date.format("%A, %B %-d, %Y"))?;
        writeln!(out, "**Theme:** {}  ", title_case(&packet.theme))?;
        writeln!(out, "**Time:** about {} minutes", packet.total_minutes())?;
        writeln!(out)?;
        writeln!(out, "---")?;
        writeln!(out)?;

        if let Some(password) = &packet.extras.warm_up {
            Self::warm_up(&mut out, password)?;
        }
        for (i, a) in packet.activities.iter().enumerate() {
            Self::activity(&mut out, i + 1, a)?;
        }
        if let Some(challenge) = &packet.extras.team_challenge {
            Self::team(&mut out, challenge)?;
        }
        if !packet.extras.reflection.is_empty() {
            Self::reflection(&mut out, &packet.extras.reflection)?;
        }

        let answers: Vec<_> = packet
            .activities
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.answer.as_ref().map(|ans| (i + 1, ans)))
            .collect();
        let password = packet.extras.warm_up.as_ref().map(|p| &p.answer);
        if !answers.is_empty() || password.is_some() {
            writeln!(out, "## Answer Key")?;
            writeln!(out)?;
            if let Some(password) = password {
                writeln!(out, "Password: {password}")?;
            }
            for (n, ans) in answers {
                writeln!(out, "{n}. {ans}")?;
            }
            writeln!(out)?;
        }

        writeln!(out, "## For Grown-Ups")?;
        writeln!(out)?;
        write!(out, "{}", packet.parent_notes())?;
        writeln!(out)?;
        writeln!(out, "**Coming Tomorrow:** {}", packet.tomorrow_teaser)?;

        Ok(Artifact { media_type: "text/markdown", extension: "md", bytes: out.into_bytes() })
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Structured document for an external layout or PDF backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

fn activity_value(n: usize, a: &ActivityTemplate) -> Value {
    json!({
        "number": n,
        "id": a.id,
        "type": a.activity_type.as_str(),
        "heading": heading(a.activity_type),
        "title": a.title,
        "tier": a.tier,
        "prompt": a.prompt,
        "hint": a.hint,
        "answer": a.answer,
        "layout": a.layout,
        "minutes": a.minutes()
    })
}

/// Packet as a JSON value. Exposed for callers that embed it in a larger
/// document.
pub fn to_document(packet: &Packet, config: &RenderConfig) -> Value {
    let activities: Vec<Value> = packet
        .activities
        .iter()
        .enumerate()
        .map(|(i, a)| activity_value(i + 1, a))
        .collect();
    let difficulty: serde_json::Map<String, Value> = packet
        .difficulty
        .iter()
        .map(|(t, d)| {
            (
                t.as_str().to_string(),
                json!({
                    "previous_level": d.previous_level,
                    "level": d.level,
                    "served_tiers": d.served_tiers,
                    "repeated": d.repeated
                }),
            )
        })
        .collect();

    json!({
        "page": { "size": config.page_size, "theme": config.theme },
        "child": { "id": packet.child_id, "name": packet.child_name },
        "date": packet.date,
        "theme": packet.theme,
        "total_minutes": packet.total_minutes(),
        "activities": activities,
        "difficulty": difficulty,
        "warm_up": packet.extras.warm_up,
        "team_challenge": packet.extras.team_challenge,
        "reflection": packet.extras.reflection,
        "parent_notes": packet.parent_notes(),
        "tomorrow_teaser": packet.tomorrow_teaser
    })
}

impl Renderer for JsonRenderer {
    fn render(&self, packet: &Packet, config: &RenderConfig) -> Result<Artifact, RenderError> {
        ensure_not_empty(packet)?;
        let bytes = serde_json::to_vec_pretty(&to_document(packet, config))?;
        Ok(Artifact { media_type: "application/json", extension: "json", bytes })
    }
}
