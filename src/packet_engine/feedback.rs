//! Completion signals flowing back into a child profile.

use chrono::NaiveDate;
use tracing::debug;

use crate::packet_engine::{
    bank::ContentBank,
    error::{EngineError, Result},
    models::{ChildProfile, HistoryRecord, Outcome},
};

/// Append one outcome to the profile's history.
///
/// The activity is resolved against the bank to learn its type and tier, and
/// against the profile to learn which packet it came from. Levels are left
/// alone; they move at the next generation. Recording the same activity twice
/// appends twice.
pub fn record(
    profile: &mut ChildProfile,
    bank: &ContentBank,
    activity_id: &str,
    outcome: Outcome,
    date: NaiveDate,
) -> Result<HistoryRecord> {
    let template = bank
        .get(activity_id)
        .ok_or_else(|| EngineError::ActivityNotFound(activity_id.to_string()))?;
    if let Outcome::Score(s) = outcome {
        if !(0.0..=1.0).contains(&s) {
            return Err(EngineError::config(format!("score {s} outside 0..=1")));
        }
    }

    let entry = HistoryRecord {
        date,
        activity_type: template.activity_type,
        activity_id: template.id.clone(),
        difficulty: template.tier,
        outcome,
        served_on: profile.served_on(&template.id),
    };
    profile.append_history(entry.clone());
    debug!(child = %profile.id(), activity = activity_id, %outcome, "Recorded outcome");
    Ok(entry)
}
