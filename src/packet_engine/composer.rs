//! Packet assembly: ordering and metadata only, no selection logic.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::packet_engine::{
    error::{EngineError, Result},
    extras::Extras,
    models::{ActivityTemplate, ActivityType, ChildId, Packet, TypeDifficulty},
};

/// Weekly theme rotation, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Adventure,
    Science,
    Creative,
    History,
    FreeChoice,
    Exploration,
    Reflection,
}

impl Theme {
    pub fn for_date(date: NaiveDate) -> Theme {
        match date.weekday() {
            Weekday::Mon => Theme::Adventure,
            Weekday::Tue => Theme::Science,
            Weekday::Wed => Theme::Creative,
            Weekday::Thu => Theme::History,
            Weekday::Fri => Theme::FreeChoice,
            Weekday::Sat => Theme::Exploration,
            Weekday::Sun => Theme::Reflection,
        }
    }

    /// Line announcing this theme on the day before.
    pub fn teaser(self) -> &'static str {
        match self {
            Theme::Adventure   => "Tomorrow: A mysterious map appears...",
            Theme::Science     => "Tomorrow: Explosive science experiments!",
            Theme::Creative    => "Tomorrow: Become an artist extraordinaire!",
            Theme::History     => "Tomorrow: Travel back in time!",
            Theme::FreeChoice  => "Tomorrow: Friday fun surprises!",
            Theme::Exploration => "Tomorrow: Weekend adventure special!",
            Theme::Reflection  => "Tomorrow: Share your week's discoveries!",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Theme::Adventure   => "adventure",
            Theme::Science     => "science",
            Theme::Creative    => "creative",
            Theme::History     => "history",
            Theme::FreeChoice  => "free-choice",
            Theme::Exploration => "exploration",
            Theme::Reflection  => "reflection",
        };
        write!(f, "{}", s)
    }
}

/// Deterministic presentation order: grouped by type rank, then tier, then id.
pub fn presentation_order(activities: &mut [Arc<ActivityTemplate>]) {
    activities.sort_by(|a, b| {
        (a.activity_type.presentation_rank(), a.tier, &a.id)
            .cmp(&(b.activity_type.presentation_rank(), b.tier, &b.id))
    });
}

/// Assemble a packet. Fails only when there is nothing to put in it.
pub fn compose(
    child_id: &ChildId,
    child_name: &str,
    date: NaiveDate,
    mut activities: Vec<Arc<ActivityTemplate>>,
    difficulty: BTreeMap<ActivityType, TypeDifficulty>,
    extras: Extras,
) -> Result<Packet> {
    if activities.is_empty() {
        return Err(EngineError::config(format!(
            "packet for {child_id} on {date} would contain no activities"
        )));
    }
    presentation_order(&mut activities);

    let tomorrow = date.checked_add_days(Days::new(1)).unwrap_or(date);
    Ok(Packet {
        child_id: child_id.clone(),
        child_name: child_name.to_string(),
        date,
        theme: Theme::for_date(date).to_string(),
        activities,
        difficulty,
        tomorrow_teaser: Theme::for_date(tomorrow).teaser().to_string(),
        extras,
    })
}
