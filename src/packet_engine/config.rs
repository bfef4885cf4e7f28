//! Engine configuration.
//!
//! Every tuning value the engine uses lives here so behaviour is reproducible
//! from a single TOML file. All sections are optional; missing fields fall
//! back to the defaults documented on each field.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::packet_engine::{
    error::{EngineError, Result},
    models::{ActivityType, ChildId, ChildProfile},
};

// ---------------------------------------------------------------------------
// Difficulty adaptation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptationConfig {
    /// How many of the most recent results per type are considered.
    pub window: usize,

    /// Below this many results the level never moves.
    pub min_samples: usize,

    /// Success ratio at or above which the level goes up.
    pub raise_threshold: f32,

    /// Success ratio at or below which the level goes down.
    pub lower_threshold: f32,

    /// Levels moved per adjustment.
    pub step: u8,

    /// When false, skipped activities are left out of the sample entirely.
    pub skipped_counts_as_failure: bool,
}

impl Default for AdaptationConfig {
    fn default() -> Self {
        AdaptationConfig {
            window: 5,
            min_samples: 3,
            raise_threshold: 0.8,
            lower_threshold: 0.4,
            step: 1,
            skipped_counts_as_failure: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Number of recently served ids a profile remembers.
    pub recency_window: usize,

    /// How many tiers away from the target level content may come from
    /// when the exact tier has too little.
    pub max_tier_fallback: u8,

    /// Serve recently seen activities (least recent first) rather than fail
    /// when fresh content runs out. Every repeat is noted in the packet.
    pub allow_recent_repeats: bool,

    /// Fixed RNG seed. Without it the seed is derived from child and date,
    /// so regenerating the same day yields the same packet.
    pub rng_seed: Option<u64>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        SelectionConfig {
            recency_window: 10,
            max_tier_fallback: 1,
            allow_recent_repeats: false,
            rng_seed: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBounds {
    pub min: u8,
    pub max: u8,
}

impl LevelBounds {
    pub fn clamp(self, level: u8) -> u8 {
        level.clamp(self.min, self.max)
    }

    pub fn contains(self, level: u8) -> bool {
        (self.min..=self.max).contains(&level)
    }
}

impl Default for LevelBounds {
    fn default() -> Self {
        LevelBounds { min: 1, max: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub default_bounds: LevelBounds,

    /// Level a newly enrolled child starts at, unless the roster says otherwise.
    pub starting_level: u8,

    /// Per-type bounds replacing `default_bounds`.
    pub bounds: BTreeMap<ActivityType, LevelBounds>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        LevelConfig {
            default_bounds: LevelBounds::default(),
            starting_level: 2,
            bounds: BTreeMap::new(),
        }
    }
}

impl LevelConfig {
    pub fn bounds_for(&self, activity_type: ActivityType) -> LevelBounds {
        self.bounds.get(&activity_type).copied().unwrap_or(self.default_bounds)
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// How many activities of each type go into one packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Composition(BTreeMap<ActivityType, usize>);

impl Default for Composition {
    fn default() -> Self {
        Composition::from_counts([
            (ActivityType::LogicPuzzle, 1),
            (ActivityType::MathChallenge, 1),
            (ActivityType::WordActivity, 1),
            (ActivityType::EducationalActivity, 1),
            (ActivityType::CreativePrompt, 1),
            (ActivityType::Riddle, 2),
        ])
    }
}

impl Composition {
    pub fn from_counts(counts: impl IntoIterator<Item = (ActivityType, usize)>) -> Self {
        Composition(counts.into_iter().collect())
    }

    /// Entries in presentation order.
    pub fn entries(&self) -> Vec<(ActivityType, usize)> {
        let mut out: Vec<_> = self.0.iter().map(|(t, n)| (*t, *n)).collect();
        out.sort_by_key(|(t, _)| t.presentation_rank());
        out
    }

    pub fn types(&self) -> impl Iterator<Item = ActivityType> + '_ {
        self.0.keys().copied()
    }

    pub fn count_for(&self, activity_type: ActivityType) -> Result<usize> {
        self.0.get(&activity_type).copied().ok_or_else(|| {
            EngineError::config(format!("composition has no entry for {activity_type}"))
        })
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(EngineError::config("composition has no entries"));
        }
        if let Some((t, _)) = self.0.iter().find(|(_, n)| **n == 0) {
            return Err(EngineError::config(format!("composition asks for zero {t} activities")));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Roster, storage, rendering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildConfig {
    pub id: ChildId,
    pub name: String,
    #[serde(default)]
    pub starting_levels: BTreeMap<ActivityType, u8>,
    /// Older children (8 and up) get a longer set of reflection prompts.
    #[serde(default)]
    pub age: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub profiles_dir: PathBuf,
    pub packets_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            profiles_dir: PathBuf::from("profiles"),
            packets_dir: PathBuf::from("packets"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Letter => write!(f, "letter"),
            PageSize::A4     => write!(f, "a4"),
        }
    }
}

/// Formatting handed to the renderer along with a packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub page_size: PageSize,
    pub theme: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig { page_size: PageSize::Letter, theme: "classic".to_string() }
    }
}

// ---------------------------------------------------------------------------
// Top level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub adaptation: AdaptationConfig,
    pub selection: SelectionConfig,
    pub composition: Composition,
    pub levels: LevelConfig,
    pub children: Vec<ChildConfig>,
    pub storage: StorageConfig,
    pub render: RenderConfig,
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::config(format!("cannot read config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let a = &self.adaptation;
        if a.window == 0 || a.min_samples == 0 {
            return Err(EngineError::config("adaptation window and min_samples must be at least 1"));
        }
        if a.min_samples > a.window {
            return Err(EngineError::config(format!(
                "min_samples ({}) cannot exceed window ({})",
                a.min_samples, a.window
            )));
        }
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !in_unit(a.raise_threshold) || !in_unit(a.lower_threshold) {
            return Err(EngineError::config("thresholds must lie in 0..=1"));
        }
        if a.lower_threshold >= a.raise_threshold {
            return Err(EngineError::config(format!(
                "lower_threshold ({}) must be below raise_threshold ({})",
                a.lower_threshold, a.raise_threshold
            )));
        }
        if a.step == 0 {
            return Err(EngineError::config("adaptation step must be at least 1"));
        }

        let check_bounds = |label: &str, b: LevelBounds| -> Result<()> {
            if b.min > b.max {
                return Err(EngineError::config(format!(
                    "{label} bounds are inverted ({}..={})",
                    b.min, b.max
                )));
            }
            Ok(())
        };
        check_bounds("default", self.levels.default_bounds)?;
        for (t, b) in &self.levels.bounds {
            check_bounds(t.as_str(), *b)?;
        }

        self.composition.validate()?;

        let mut seen = Vec::new();
        for child in &self.children {
            if !child.id.is_file_safe() {
                return Err(EngineError::InvalidChildId(child.id.to_string()));
            }
            if seen.contains(&&child.id) {
                return Err(EngineError::config(format!("child {} listed twice", child.id)));
            }
            seen.push(&child.id);
        }
        Ok(())
    }

    pub fn bounds_for(&self, activity_type: ActivityType) -> LevelBounds {
        self.levels.bounds_for(activity_type)
    }

    pub fn roster_entry(&self, id: &ChildId) -> Option<&ChildConfig> {
        self.children.iter().find(|c| &c.id == id)
    }

    /// More than one child on the roster: packets carry a team challenge.
    pub fn has_siblings(&self) -> bool {
        self.children.len() > 1
    }

    /// Fresh profile for a roster child: every activity type at its starting
    /// level, clamped into that type's bounds.
    pub fn starting_profile(&self, child: &ChildConfig) -> ChildProfile {
        let levels = ActivityType::ALL.into_iter().map(|t| {
            let wanted = child.starting_levels.get(&t).copied().unwrap_or(self.levels.starting_level);
            (t, self.bounds_for(t).clamp(wanted))
        });
        ChildProfile::new(child.id.clone(), child.name.clone(), levels, self.selection.recency_window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let c = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(c, EngineConfig::default());
        assert_eq!(c.adaptation.window, 5);
        assert_eq!(c.composition.total(), 7);
    }

    #[test]
    fn parses_sections_and_roster() {
        let c = EngineConfig::from_toml_str(
            r#"
            [adaptation]
            window = 6
            raise_threshold = 0.75

            [selection]
            recency_window = 20
            rng_seed = 7

            [composition]
            logic-puzzle = 2
            riddle = 1
            educational-activity = 2

            [levels.bounds.riddle]
            min = 1
            max = 3

            [[children]]
            id = "dahlia"
            name = "Dahlia"
            starting_levels = { riddle = 3, logic-puzzle = 4 }

            [render]
            page_size = "a4"
            "#,
        )
        .unwrap();
        assert_eq!(c.adaptation.window, 6);
        assert_eq!(c.selection.rng_seed, Some(7));
        assert_eq!(c.composition.count_for(ActivityType::LogicPuzzle).unwrap(), 2);
        assert!(c.composition.count_for(ActivityType::Riddle).is_ok());
        assert!(c.composition.count_for(ActivityType::MathChallenge).is_err());
        assert_eq!(c.bounds_for(ActivityType::Riddle), LevelBounds { min: 1, max: 3 });
        assert_eq!(c.render.page_size, PageSize::A4);

        let child = c.roster_entry(&ChildId::new("Dahlia")).unwrap();
        let profile = c.starting_profile(child);
        assert_eq!(profile.level(ActivityType::Riddle), Some(3));
        assert_eq!(profile.level(ActivityType::LogicPuzzle), Some(4));
        assert_eq!(profile.level(ActivityType::MathChallenge), Some(2));
        assert_eq!(profile.recent().capacity(), 20);
    }

    #[test]
    fn composition_entries_follow_presentation_order() {
        let order: Vec<_> = Composition::default().entries().into_iter().map(|(t, _)| t).collect();
        assert_eq!(order.first(), Some(&ActivityType::LogicPuzzle));
        assert_eq!(order.last(), Some(&ActivityType::Riddle));
    }

    #[test]
    fn rejects_inconsistent_values() {
        let bad = [
            "[adaptation]\nlower_threshold = 0.9\nraise_threshold = 0.8",
            "[adaptation]\nmin_samples = 9",
            "[adaptation]\nstep = 0",
            "[levels.default_bounds]\nmin = 4\nmax = 2",
            "[composition]\nriddle = 0",
            "[[children]]\nid = \"a\"\nname = \"A\"\n[[children]]\nid = \"a\"\nname = \"B\"",
        ];
        for toml in bad {
            let err = EngineConfig::from_toml_str(toml).unwrap_err();
            assert_eq!(err.kind(), crate::packet_engine::error::ErrorKind::Configuration, "{toml}");
        }
    }

    #[test]
    fn roster_ids_are_normalised_on_load() {
        let c = EngineConfig::from_toml_str("[[children]]\nid = \"Dahlia\"\nname = \"Dahlia\"\nage = 8").unwrap();
        assert_eq!(c.children[0].id.as_str(), "dahlia");
        assert_eq!(c.children[0].age, Some(8));
        assert!(c.roster_entry(&ChildId::new("dahlia")).is_some());
        assert!(c.roster_entry(&ChildId::new("DAHLIA")).is_some());
    }

    #[test]
    fn ids_differing_only_in_case_are_duplicates() {
        let toml = "[[children]]\nid = \"Dahlia\"\nname = \"A\"\n[[children]]\nid = \"dahlia\"\nname = \"B\"";
        let err = EngineConfig::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("listed twice"), "{err}");
    }

    #[test]
    fn roster_ids_must_be_file_safe() {
        assert!(EngineConfig::from_toml_str("[[children]]\nid = \"../x\"\nname = \"X\"").is_err());
        let c = EngineConfig {
            children: vec![ChildConfig {
                id: ChildId::new("a/b"),
                name: "A".into(),
                starting_levels: BTreeMap::new(),
                age: None,
            }],
            ..EngineConfig::default()
        };
        assert!(matches!(c.validate(), Err(EngineError::InvalidChildId(_))));
    }

    #[test]
    fn empty_composition_is_a_configuration_error() {
        let mut c = EngineConfig::default();
        c.composition = Composition::from_counts([]);
        assert!(c.validate().is_err());
    }
}
