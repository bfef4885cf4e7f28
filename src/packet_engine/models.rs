use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::packet_engine::{
    config::LevelBounds,
    error::EngineError,
    extras::Extras,
    recency::RecencyWindow,
};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Stable child key, always lower-case ("dahlia", "xander").
///
/// Deserialising goes through [`ChildId::parse`], so ids read from a roster
/// or a profile file are normalised and checked like ids typed on the
/// command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChildId(String);

impl ChildId {
    /// Normalise without checking the characters. Use [`ChildId::parse`] for
    /// ids that come from outside the program.
    pub fn new(id: impl AsRef<str>) -> Self {
        ChildId(id.as_ref().trim().to_lowercase())
    }

    /// Normalise and accept only letters, digits, `-` and `_`, so the id is
    /// always usable as a file stem.
    pub fn parse(id: &str) -> Result<Self, EngineError> {
        let id = ChildId::new(id);
        if id.is_file_safe() {
            Ok(id)
        } else {
            Err(EngineError::InvalidChildId(id.0))
        }
    }

    pub fn is_file_safe(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ChildId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChildId::parse(s)
    }
}

impl TryFrom<String> for ChildId {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ChildId::parse(&s)
    }
}

impl From<ChildId> for String {
    fn from(id: ChildId) -> String {
        id.0
    }
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Activity types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityType {
    LogicPuzzle,
    MathChallenge,
    WordActivity,
    EducationalActivity,
    CreativePrompt,
    Riddle,
}

impl ActivityType {
    pub const ALL: [ActivityType; 6] = [
        ActivityType::LogicPuzzle,
        ActivityType::MathChallenge,
        ActivityType::WordActivity,
        ActivityType::EducationalActivity,
        ActivityType::CreativePrompt,
        ActivityType::Riddle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::LogicPuzzle         => "logic-puzzle",
            ActivityType::MathChallenge       => "math-challenge",
            ActivityType::WordActivity        => "word-activity",
            ActivityType::EducationalActivity => "educational-activity",
            ActivityType::CreativePrompt      => "creative-prompt",
            ActivityType::Riddle              => "riddle",
        }
    }

    /// Position of this type's group inside a packet. The logic puzzle is the
    /// warm-up, riddles close the packet.
    pub fn presentation_rank(self) -> u8 {
        match self {
            ActivityType::LogicPuzzle         => 0,
            ActivityType::MathChallenge       => 1,
            ActivityType::WordActivity        => 2,
            ActivityType::EducationalActivity => 3,
            ActivityType::CreativePrompt      => 4,
            ActivityType::Riddle              => 5,
        }
    }

    /// Typical minutes spent on one activity of this type.
    pub fn default_minutes(self) -> u16 {
        match self {
            ActivityType::LogicPuzzle         => 12,
            ActivityType::MathChallenge       => 10,
            ActivityType::WordActivity        => 8,
            ActivityType::EducationalActivity => 5,
            ActivityType::CreativePrompt      => 15,
            ActivityType::Riddle              => 3,
        }
    }

    /// Skill named in the parent notes.
    pub fn focus_area(self) -> &'static str {
        match self {
            ActivityType::LogicPuzzle         => "logical reasoning",
            ActivityType::MathChallenge       => "mathematical thinking",
            ActivityType::WordActivity        => "vocabulary and spelling",
            ActivityType::EducationalActivity => "general knowledge",
            ActivityType::CreativePrompt      => "creative expression",
            ActivityType::Riddle              => "lateral thinking",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('_', "-");
        ActivityType::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| EngineError::ActivityTypeNotFound(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Activity templates
// ---------------------------------------------------------------------------

/// How the renderer should lay out an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    #[default]
    Text,
    /// Numbered clue list with an answer grid.
    Grid,
    /// Blank lines for a written answer.
    Lines,
    /// Empty box for drawing.
    DrawingBox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTemplate {
    pub id: String,
    pub activity_type: ActivityType,
    pub tier: u8,
    pub title: String,
    pub prompt: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub estimated_minutes: Option<u16>,
}

impl ActivityTemplate {
    pub fn minutes(&self) -> u16 {
        self.estimated_minutes.unwrap_or_else(|| self.activity_type.default_minutes())
    }
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Correct,
    Incorrect,
    Skipped,
    /// Partial credit in `0.0..=1.0`.
    Score(f32),
}

impl Outcome {
    /// Success credit in `0.0..=1.0`, `None` for a skipped activity.
    pub fn credit(self) -> Option<f32> {
        match self {
            Outcome::Correct   => Some(1.0),
            Outcome::Incorrect => Some(0.0),
            Outcome::Skipped   => None,
            Outcome::Score(s)  => Some(if s.is_nan() { 0.0 } else { s.clamp(0.0, 1.0) }),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Correct   => write!(f, "correct"),
            Outcome::Incorrect => write!(f, "incorrect"),
            Outcome::Skipped   => write!(f, "skipped"),
            Outcome::Score(s)  => write!(f, "score {:.2}", s),
        }
    }
}

impl FromStr for Outcome {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "correct" | "right" | "yes"  => Ok(Outcome::Correct),
            "incorrect" | "wrong" | "no" => Ok(Outcome::Incorrect),
            "skipped" | "skip"           => Ok(Outcome::Skipped),
            other => match other.parse::<f32>() {
                Ok(v) if (0.0..=1.0).contains(&v) => Ok(Outcome::Score(v)),
                _ => Err(EngineError::config(format!(
                    "outcome must be correct, incorrect, skipped or a score in 0..=1, got {s:?}"
                ))),
            },
        }
    }
}

/// A completion signal captured after the packet was worked on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub child_id: ChildId,
    pub activity_id: String,
    pub date: NaiveDate,
    pub outcome: Outcome,
}

/// One entry of a profile's history: a feedback record resolved against the
/// content bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: NaiveDate,
    pub activity_type: ActivityType,
    pub activity_id: String,
    pub difficulty: u8,
    pub outcome: Outcome,
    /// Date of the packet the activity was served in, when the profile still
    /// remembers it. Feedback often arrives days later.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub served_on: Option<NaiveDate>,
}

impl HistoryRecord {
    /// Date the result belongs to: when the activity was served, else when
    /// it was recorded.
    pub fn effective_date(&self) -> NaiveDate {
        self.served_on.unwrap_or(self.date)
    }
}

// ---------------------------------------------------------------------------
// Child profile
// ---------------------------------------------------------------------------

/// Current level for one activity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    pub level: u8,
    /// History length when the level last changed. Only records appended
    /// after this point count as evidence for the next change.
    pub since: usize,
    /// Packet date the level last changed on. Results for activities served
    /// before it were earned at the old level and are not evidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed_on: Option<NaiveDate>,
}

/// Persisted per-child state. Fields are private: history only grows through
/// [`ChildProfile::append_history`], levels only move through
/// [`ChildProfile::apply_level`], and the recency window through
/// [`ChildProfile::remember_served`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProfile {
    id: ChildId,
    name: String,
    levels: BTreeMap<ActivityType, LevelState>,
    #[serde(default)]
    history: Vec<HistoryRecord>,
    recent: RecencyWindow,
    /// Last packet date per served activity id. Bounded by the bank size.
    #[serde(default)]
    served_on: BTreeMap<String, NaiveDate>,
}

impl ChildProfile {
    pub fn new(
        id: ChildId,
        name: impl Into<String>,
        levels: impl IntoIterator<Item = (ActivityType, u8)>,
        recency_capacity: usize,
    ) -> Self {
        ChildProfile {
            id,
            name: name.into(),
            levels: levels
                .into_iter()
                .map(|(t, level)| (t, LevelState { level, since: 0, changed_on: None }))
                .collect(),
            history: Vec::new(),
            recent: RecencyWindow::new(recency_capacity),
            served_on: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &ChildId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self, activity_type: ActivityType) -> Option<u8> {
        self.levels.get(&activity_type).map(|s| s.level)
    }

    pub fn level_state(&self, activity_type: ActivityType) -> Option<LevelState> {
        self.levels.get(&activity_type).copied()
    }

    pub fn levels(&self) -> impl Iterator<Item = (ActivityType, u8)> + '_ {
        self.levels.iter().map(|(t, s)| (*t, s.level))
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    pub fn recent(&self) -> &RecencyWindow {
        &self.recent
    }

    /// Packet date `activity_id` was last served on.
    pub fn served_on(&self, activity_id: &str) -> Option<NaiveDate> {
        self.served_on.get(activity_id).copied()
    }

    pub fn append_history(&mut self, record: HistoryRecord) {
        self.history.push(record);
    }

    /// Set the level for a type, clamped into `bounds`, as of the packet for
    /// `date`. Returns the level actually stored. The evidence markers only
    /// move when the level changes.
    pub fn apply_level(&mut self, activity_type: ActivityType, level: u8, bounds: LevelBounds, date: NaiveDate) -> u8 {
        let level = bounds.clamp(level);
        let moved = LevelState { level, since: self.history.len(), changed_on: Some(date) };
        let state = self.levels.entry(activity_type).or_insert(moved);
        if state.level != level {
            *state = moved;
        }
        level
    }

    /// Push served ids into the recency window and stamp them with the
    /// packet date.
    pub fn remember_served<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>, date: NaiveDate) {
        for id in ids {
            self.recent.push(id);
            self.served_on.insert(id.to_string(), date);
        }
    }

    /// Re-impose bounds after loading a profile written under another
    /// configuration.
    pub fn normalize(&mut self, bounds_for: impl Fn(ActivityType) -> LevelBounds, recency_capacity: usize) {
        for (t, state) in self.levels.iter_mut() {
            state.level = bounds_for(*t).clamp(state.level);
        }
        self.recent.set_capacity(recency_capacity);
    }
}

// ---------------------------------------------------------------------------
// Packets
// ---------------------------------------------------------------------------

/// Level used for one type in one packet, and how the content matched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDifficulty {
    pub previous_level: u8,
    pub level: u8,
    /// Tiers actually served, in selection order.
    pub served_tiers: Vec<u8>,
    /// Ids served again even though they were in the recency window.
    #[serde(default)]
    pub repeated: Vec<String>,
}

impl TypeDifficulty {
    pub fn used_fallback(&self) -> bool {
        self.served_tiers.iter().any(|t| *t != self.level)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packet {
    pub child_id: ChildId,
    pub child_name: String,
    pub date: NaiveDate,
    pub theme: String,
    /// Presentation order.
    pub activities: Vec<Arc<ActivityTemplate>>,
    pub difficulty: BTreeMap<ActivityType, TypeDifficulty>,
    pub tomorrow_teaser: String,
    /// Morning password, team challenge and reflection prompts.
    #[serde(default)]
    pub extras: Extras,
}

impl Packet {
    pub fn total_minutes(&self) -> u32 {
        self.activities.iter().map(|a| a.minutes() as u32).sum()
    }

    pub fn activity_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.activities.iter().map(|a| a.id.as_str())
    }

    /// Short overview for the adult handing out the packet.
    pub fn parent_notes(&self) -> String {
        let mut focus: Vec<&str> = Vec::new();
        for a in &self.activities {
            let area = a.activity_type.focus_area();
            if !focus.contains(&area) {
                focus.push(area);
            }
        }
        let mut notes = format!(
            "Today's packet overview:\n- Total time: ~{} minutes\n- Focus areas: {}\n",
            self.total_minutes(),
            focus.join(", ")
        );
        for (t, d) in &self.difficulty {
            if d.level > d.previous_level {
                notes.push_str(&format!("- {t}: moved up to level {}\n", d.level));
            } else if d.level < d.previous_level {
                notes.push_str(&format!("- {t}: eased down to level {}\n", d.level));
            }
            if d.used_fallback() {
                notes.push_str(&format!("- {t}: some content served from a neighbouring tier\n"));
            }
            if !d.repeated.is_empty() {
                notes.push_str(&format!("- {t}: {} activity repeated from recent days\n", d.repeated.len()));
            }
        }
        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_type_parses_kebab_and_snake_case() {
        assert_eq!("logic-puzzle".parse::<ActivityType>().unwrap(), ActivityType::LogicPuzzle);
        assert_eq!("logic_puzzle".parse::<ActivityType>().unwrap(), ActivityType::LogicPuzzle);
        assert_eq!("Riddle".parse::<ActivityType>().unwrap(), ActivityType::Riddle);
        assert!(matches!(
            "crossword".parse::<ActivityType>(),
            Err(EngineError::ActivityTypeNotFound(_))
        ));
    }

    #[test]
    fn outcome_parsing() {
        assert_eq!("correct".parse::<Outcome>().unwrap(), Outcome::Correct);
        assert_eq!("Skipped".parse::<Outcome>().unwrap(), Outcome::Skipped);
        assert_eq!("0.5".parse::<Outcome>().unwrap(), Outcome::Score(0.5));
        assert!("1.5".parse::<Outcome>().is_err());
        assert!("maybe".parse::<Outcome>().is_err());
    }

    #[test]
    fn child_id_is_normalised() {
        assert_eq!(ChildId::new(" Dahlia "), ChildId::new("dahlia"));
        assert_eq!("Dahlia".parse::<ChildId>().unwrap(), ChildId::new("dahlia"));
    }

    #[test]
    fn deserialised_child_id_is_normalised() {
        let id: ChildId = serde_json::from_str("\" Dahlia\"").unwrap();
        assert_eq!(id, ChildId::new("dahlia"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"dahlia\"");
    }

    #[test]
    fn child_id_rejects_path_fragments() {
        for bad in ["../x", "a/b", "a\\b", "..", "", "   ", "two words"] {
            assert!(
                matches!(ChildId::parse(bad), Err(EngineError::InvalidChildId(_))),
                "{bad:?} accepted"
            );
        }
        assert!(serde_json::from_str::<ChildId>("\"../etc\"").is_err());
        assert!(ChildId::parse("mary-jane_2").is_ok());
    }

    #[test]
    fn apply_level_clamps_and_tracks_evidence_marker() {
        let mut p = ChildProfile::new(ChildId::new("x"), "X", [(ActivityType::Riddle, 3)], 4);
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        p.append_history(HistoryRecord {
            date: day,
            activity_type: ActivityType::Riddle,
            activity_id: "r".into(),
            difficulty: 3,
            outcome: Outcome::Correct,
            served_on: None,
        });
        let bounds = LevelBounds { min: 1, max: 5 };
        assert_eq!(p.apply_level(ActivityType::Riddle, 3, bounds, day), 3);
        assert_eq!(p.level_state(ActivityType::Riddle).unwrap().since, 0);
        assert_eq!(p.level_state(ActivityType::Riddle).unwrap().changed_on, None);
        assert_eq!(p.apply_level(ActivityType::Riddle, 9, bounds, day), 5);
        let state = p.level_state(ActivityType::Riddle).unwrap();
        assert_eq!((state.since, state.changed_on), (1, Some(day)));
    }

    #[test]
    fn remember_served_stamps_the_packet_date() {
        let mut p = ChildProfile::new(ChildId::new("x"), "X", [(ActivityType::Riddle, 2)], 3);
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        p.remember_served(["a", "b"], monday);
        p.remember_served(["b"], tuesday);
        assert_eq!(p.served_on("a"), Some(monday));
        assert_eq!(p.served_on("b"), Some(tuesday));
        assert_eq!(p.served_on("c"), None);
    }

    #[test]
    fn serde_round_trip_keeps_profile() {
        let mut p = ChildProfile::new(ChildId::new("x"), "X", [(ActivityType::Riddle, 2)], 3);
        p.remember_served(["a", "b"], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let json = serde_json::to_string(&p).unwrap();
        let back: ChildProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
