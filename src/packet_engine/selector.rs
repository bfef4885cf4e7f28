//! Activity selection.
//!
//! For every type in the composition the selector walks candidate tiers
//! nearest-first (exact tier, then one below, one above, two below, ...),
//! draws fresh templates from a shuffled pool per tier, and only when allowed
//! falls back to recently served ones. It never writes to the profile; the
//! caller commits the chosen ids once the whole packet is built.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use crate::packet_engine::{
    bank::ContentBank,
    config::{Composition, SelectionConfig},
    error::{EngineError, Result},
    models::{ActivityTemplate, ActivityType, ChildProfile},
    pool::CandidatePool,
};

/// Something the selector had to compromise on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionNote {
    /// Served from a neighbouring tier because the target tier ran short.
    TierFallback { activity_type: ActivityType, requested: u8, served: u8, id: String },
    /// Served although it is still in the recency window.
    RecentRepeat { activity_type: ActivityType, id: String },
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Selection order: grouped by type in presentation order.
    pub activities: Vec<Arc<ActivityTemplate>>,
    /// Level each type was selected against.
    pub targets: BTreeMap<ActivityType, u8>,
    pub notes: Vec<SelectionNote>,
}

impl Selection {
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.activities.iter().map(|a| a.id.as_str())
    }

    pub fn repeated_ids(&self, activity_type: ActivityType) -> Vec<String> {
        self.notes
            .iter()
            .filter_map(|n| match n {
                SelectionNote::RecentRepeat { activity_type: t, id } if *t == activity_type => Some(id.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Tiers to try for `target`, nearest first, lower before higher at equal
/// distance, limited to `max_fallback` steps and to tiers the bank has.
pub fn candidate_tiers(target: u8, available: &[u8], max_fallback: u8) -> Vec<u8> {
    let mut order = vec![target];
    for d in 1..=max_fallback {
        if let Some(lower) = target.checked_sub(d) {
            order.push(lower);
        }
        if let Some(higher) = target.checked_add(d) {
            order.push(higher);
        }
    }
    order.retain(|t| available.contains(t));
    order
}

pub fn select<R: Rng>(
    profile: &ChildProfile,
    bank: &ContentBank,
    composition: &Composition,
    config: &SelectionConfig,
    rng: &mut R,
) -> Result<Selection> {
    composition.validate()?;

    let recent = profile.recent();
    let mut chosen: HashSet<String> = HashSet::new();
    let mut selection = Selection::default();

    for (activity_type, needed) in composition.entries() {
        let target = profile.level(activity_type).ok_or_else(|| {
            EngineError::config(format!("profile {} has no level for {activity_type}", profile.id()))
        })?;
        selection.targets.insert(activity_type, target);

        let tiers = candidate_tiers(target, &bank.tiers(activity_type), config.max_tier_fallback);
        let mut picked: Vec<Arc<ActivityTemplate>> = Vec::with_capacity(needed);

        // Fresh content, nearest tier first.
        for &tier in &tiers {
            if picked.len() == needed {
                break;
            }
            let fresh: Vec<_> = bank
                .at_tier(activity_type, tier)
                .iter()
                .filter(|t| !recent.contains(&t.id) && !chosen.contains(&t.id))
                .cloned()
                .collect();
            let mut pool = CandidatePool::shuffled(fresh, rng);
            while picked.len() < needed {
                let Some(t) = pool.draw() else { break };
                chosen.insert(t.id.clone());
                picked.push(t);
            }
        }

        // Recently served content, least recent first.
        if picked.len() < needed && config.allow_recent_repeats {
            let mut stale: Vec<_> = tiers
                .iter()
                .flat_map(|&tier| bank.at_tier(activity_type, tier).iter())
                .filter(|t| recent.contains(&t.id) && !chosen.contains(&t.id))
                .cloned()
                .collect();
            stale.sort_by_key(|t| recent.position(&t.id));
            let mut pool = CandidatePool::ordered(stale);
            while picked.len() < needed {
                let Some(t) = pool.draw() else { break };
                warn!(child = %profile.id(), %activity_type, id = %t.id, "Repeating recently served activity");
                selection.notes.push(SelectionNote::RecentRepeat { activity_type, id: t.id.clone() });
                chosen.insert(t.id.clone());
                picked.push(t);
            }
        }

        if picked.len() < needed {
            return Err(EngineError::ContentExhausted {
                activity_type,
                needed,
                available: picked.len(),
            });
        }

        for t in &picked {
            if t.tier != target {
                debug!(%activity_type, requested = target, served = t.tier, id = %t.id, "Tier fallback");
                selection.notes.push(SelectionNote::TierFallback {
                    activity_type,
                    requested: target,
                    served: t.tier,
                    id: t.id.clone(),
                });
            }
        }
        selection.activities.extend(picked);
    }

    Ok(selection)
}
