use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::packet_engine::{
    content,
    error::{EngineError, Result},
    models::{ActivityTemplate, ActivityType},
};

/// Read-only store of activity templates, indexed by id and by
/// (type, tier). Cheap to share: every template lives behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ContentBank {
    by_id: HashMap<String, Arc<ActivityTemplate>>,
    by_type: HashMap<ActivityType, BTreeMap<u8, Vec<Arc<ActivityTemplate>>>>,
}

impl ContentBank {
    /// Build a bank, rejecting duplicate ids. Within a tier, templates keep
    /// the order they were given in.
    pub fn from_templates(templates: impl IntoIterator<Item = ActivityTemplate>) -> Result<Self> {
        let mut bank = ContentBank::default();
        for t in templates {
            if bank.by_id.contains_key(&t.id) {
                return Err(EngineError::config(format!("duplicate activity id in content bank: {}", t.id)));
            }
            let t = Arc::new(t);
            bank.by_type
                .entry(t.activity_type)
                .or_default()
                .entry(t.tier)
                .or_default()
                .push(Arc::clone(&t));
            bank.by_id.insert(t.id.clone(), t);
        }
        Ok(bank)
    }

    /// Templates bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_templates(content::all_templates())
    }

    /// Load a JSON array of templates.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::config(format!("cannot read content bank {}: {e}", path.display()))
        })?;
        let templates: Vec<ActivityTemplate> = serde_json::from_str(&raw).map_err(|e| {
            EngineError::config(format!("invalid content bank {}: {e}", path.display()))
        })?;
        let bank = Self::from_templates(templates)?;
        info!("Loaded {} activity templates from {:?}", bank.len(), path);
        Ok(bank)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<ActivityTemplate>> {
        self.by_id.get(id)
    }

    /// Templates of one type at one tier, in bank order.
    pub fn at_tier(&self, activity_type: ActivityType, tier: u8) -> &[Arc<ActivityTemplate>] {
        self.by_type
            .get(&activity_type)
            .and_then(|tiers| tiers.get(&tier))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Tiers that hold at least one template of this type, ascending.
    pub fn tiers(&self, activity_type: ActivityType) -> Vec<u8> {
        self.by_type
            .get(&activity_type)
            .map(|tiers| tiers.keys().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_engine::helpers::template;

    #[test]
    fn builtin_bank_covers_every_type_and_tier() {
        let bank = ContentBank::builtin().unwrap();
        for t in ActivityType::ALL {
            assert_eq!(bank.tiers(t), vec![1, 2, 3, 4, 5], "tiers for {t}");
            for tier in 1..=5 {
                assert!(!bank.at_tier(t, tier).is_empty(), "{t} tier {tier}");
            }
        }
        assert!(bank.at_tier(ActivityType::Riddle, 3).len() >= 3);
    }

    #[test]
    fn builtin_answers_and_prompts_are_present() {
        let bank = ContentBank::builtin().unwrap();
        for t in ActivityType::ALL {
            for tier in bank.tiers(t) {
                for a in bank.at_tier(t, tier) {
                    assert!(!a.prompt.is_empty(), "empty prompt for {}", a.id);
                    assert!(!a.title.is_empty(), "empty title for {}", a.id);
                    if t == ActivityType::Riddle {
                        assert!(a.answer.is_some() && a.hint.is_some(), "{}", a.id);
                    }
                }
            }
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = ContentBank::from_templates([
            template("a", ActivityType::Riddle, 1, "T", "P"),
            template("a", ActivityType::Riddle, 2, "T", "P"),
        ])
        .unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn loads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "r1", "activity_type": "riddle", "tier": 2, "title": "R", "prompt": "Q?", "answer": "A"},
                {"id": "l1", "activity_type": "logic-puzzle", "tier": 1, "title": "L", "prompt": "Grid", "layout": "grid"}
            ]"#,
        )
        .unwrap();
        let bank = ContentBank::load(&path).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get("r1").unwrap().answer.as_deref(), Some("A"));
        assert_eq!(bank.tiers(ActivityType::LogicPuzzle), vec![1]);
        assert!(bank.at_tier(ActivityType::MathChallenge, 1).is_empty());
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let err = ContentBank::load(Path::new("/nonexistent/bank.json")).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }
}
