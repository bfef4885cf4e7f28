//! Difficulty adaptation: maps a profile's recent results to the next level.
//!
//! Everything here is a pure function of (profile snapshot, configuration).
//! Nothing is written back; the generator commits the resulting
//! [`LevelPlan`] only once the whole packet has been built.

use std::collections::BTreeMap;

use tracing::debug;

use crate::packet_engine::{
    config::{AdaptationConfig, EngineConfig, LevelBounds},
    error::{EngineError, Result},
    models::{ActivityType, ChildProfile, HistoryRecord, LevelState},
};

/// Level before and after adaptation for one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub previous: u8,
    pub next: u8,
}

impl LevelChange {
    pub fn changed(self) -> bool {
        self.previous != self.next
    }
}

pub type LevelPlan = BTreeMap<ActivityType, LevelChange>;

/// The sample the next decision is based on: the last `window` results of
/// this type recorded since the level last changed, oldest first.
///
/// A result recorded after the change still belongs to the old level when
/// its activity was served before the change date, so it is left out.
pub fn evidence<'a>(
    profile: &'a ChildProfile,
    activity_type: ActivityType,
    state: LevelState,
    window: usize,
) -> Vec<&'a HistoryRecord> {
    let mut records: Vec<&HistoryRecord> = profile
        .history()
        .iter()
        .skip(state.since)
        .filter(|r| r.activity_type == activity_type)
        .filter(|r| state.changed_on.map_or(true, |changed| r.effective_date() >= changed))
        .collect();
    // Stable: same-day records stay in submission order.
    records.sort_by_key(|r| r.effective_date());
    let skip = records.len().saturating_sub(window);
    records.split_off(skip)
}

/// Mean success credit and sample size. Skipped activities count as zero or
/// drop out of the sample, depending on configuration.
pub fn success_ratio(records: &[&HistoryRecord], config: &AdaptationConfig) -> Option<(f32, usize)> {
    let credits: Vec<f32> = records
        .iter()
        .filter_map(|r| match r.outcome.credit() {
            Some(c) => Some(c),
            None if config.skipped_counts_as_failure => Some(0.0),
            None => None,
        })
        .collect();
    if credits.is_empty() {
        return None;
    }
    Some((credits.iter().sum::<f32>() / credits.len() as f32, credits.len()))
}

/// Next difficulty level for one activity type.
///
/// Fails with a configuration error when the profile has no level for the
/// type. Sparse evidence (fewer than `min_samples` results) never moves the
/// level.
pub fn next_level(
    profile: &ChildProfile,
    activity_type: ActivityType,
    config: &AdaptationConfig,
    bounds: LevelBounds,
) -> Result<u8> {
    let state = profile.level_state(activity_type).ok_or_else(|| {
        EngineError::config(format!("profile {} has no level for {activity_type}", profile.id()))
    })?;
    let level = bounds.clamp(state.level);

    let records = evidence(profile, activity_type, state, config.window);
    let Some((ratio, samples)) = success_ratio(&records, config) else {
        return Ok(level);
    };
    if samples < config.min_samples {
        return Ok(level);
    }

    let next = if ratio >= config.raise_threshold && level < bounds.max {
        level.saturating_add(config.step).min(bounds.max)
    } else if ratio <= config.lower_threshold && level > bounds.min {
        level.saturating_sub(config.step).max(bounds.min)
    } else {
        level
    };
    debug!(
        child = %profile.id(), %activity_type, ratio, samples, level, next,
        "Adapted difficulty"
    );
    Ok(next)
}

/// Run [`next_level`] for every type in `types`.
pub fn adapt_all(
    profile: &ChildProfile,
    types: impl IntoIterator<Item = ActivityType>,
    config: &EngineConfig,
) -> Result<LevelPlan> {
    types
        .into_iter()
        .map(|t| {
            let bounds = config.bounds_for(t);
            let previous = profile.level(t).map(|l| bounds.clamp(l));
            let next = next_level(profile, t, &config.adaptation, bounds)?;
            Ok((t, LevelChange { previous: previous.unwrap_or(next), next }))
        })
        .collect()
}
