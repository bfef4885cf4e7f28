use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

use crate::packet_engine::{
    adapter::{self, LevelPlan},
    bank::ContentBank,
    composer::{self, Theme},
    config::EngineConfig,
    error::{CycleFailure, CycleStage, EngineError, Result},
    extras, feedback,
    models::{ActivityType, ChildId, ChildProfile, FeedbackRecord, Outcome, Packet, TypeDifficulty},
    selector::{self, Selection},
    store::ProfileStore,
};

/// One mutex per child in flight; generation and feedback for the same child
/// never interleave. An entry lives only while someone holds or waits on it.
pub type ChildLocks = Arc<Mutex<HashMap<ChildId, Arc<Mutex<()>>>>>;

pub fn new_locks() -> ChildLocks {
    Arc::new(Mutex::new(HashMap::new()))
}

/// Seed for one cycle: the configured seed, or FNV-1a over child and date so
/// that regenerating a day reproduces its packet.
pub fn cycle_seed(fixed: Option<u64>, child: &ChildId, date: NaiveDate) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0100_0000_01b3;
    fixed.unwrap_or_else(|| {
        format!("{child}/{date}")
            .bytes()
            .fold(OFFSET, |h, b| (h ^ b as u64).wrapping_mul(PRIME))
    })
}

/// Result of [`PacketEngine::generate_all`].
#[derive(Debug, Default)]
pub struct BatchReport {
    pub packets: Vec<Packet>,
    pub failures: Vec<CycleFailure>,
    /// A persistence failure stopped the batch before every child was tried.
    pub halted: bool,
}

pub struct PacketEngine {
    config: EngineConfig,
    bank: Arc<ContentBank>,
    store: Arc<dyn ProfileStore>,
    locks: ChildLocks,
}

impl PacketEngine {
    pub fn new(config: EngineConfig, bank: Arc<ContentBank>, store: Arc<dyn ProfileStore>) -> Result<Self> {
        config.validate()?;
        if bank.is_empty() {
            return Err(EngineError::config("content bank is empty"));
        }
        Ok(PacketEngine { config, bank, store, locks: new_locks() })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn bank(&self) -> &ContentBank {
        &self.bank
    }

    /// Run `f` holding the child's lock, then drop the lock entry if nobody
    /// else is waiting on it.
    fn with_child_lock<T>(&self, child: &ChildId, f: impl FnOnce() -> T) -> T {
        let lock = {
            let mut map = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(map.entry(child.clone()).or_default())
        };
        let out = {
            let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
            f()
        };
        let mut map = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        // Held by the map and by us only.
        if Arc::strong_count(&lock) == 2 {
            map.remove(child);
        }
        out
    }

    /// Stored profile, or a fresh one for a roster child seen for the first
    /// time. Bounds and recency capacity are re-applied from the current
    /// configuration.
    fn load_or_enroll(&self, child: &ChildId) -> Result<ChildProfile> {
        if !child.is_file_safe() {
            return Err(EngineError::InvalidChildId(child.to_string()));
        }
        let mut profile = match self.store.load(child) {
            Ok(p) => p,
            Err(EngineError::ChildNotFound(_)) => match self.config.roster_entry(child) {
                Some(entry) => {
                    info!(child = %child, "Enrolling child from roster");
                    self.config.starting_profile(entry)
                }
                None => return Err(EngineError::ChildNotFound(child.clone())),
            },
            Err(e) => return Err(e),
        };
        profile.normalize(|t| self.config.bounds_for(t), self.config.selection.recency_window);
        Ok(profile)
    }

    /// Current profile without generating anything.
    pub fn profile(&self, child: &ChildId) -> Result<ChildProfile> {
        self.load_or_enroll(child)
    }

    /// Adapt, select and compose on a copy of `profile`. Returns the packet
    /// and the profile as it should be committed.
    fn build(&self, profile: &ChildProfile, date: NaiveDate) -> std::result::Result<(Packet, ChildProfile), CycleFailure> {
        let child = profile.id().clone();
        let fail = |stage: CycleStage| {
            let child = child.clone();
            move |error: EngineError| CycleFailure { child, stage, error }
        };

        debug!(child = %child, "Adapting difficulty");
        let plan: LevelPlan = adapter::adapt_all(profile, self.config.composition.types(), &self.config)
            .map_err(fail(CycleStage::Adapting))?;
        let mut working = profile.clone();
        for (t, change) in &plan {
            working.apply_level(*t, change.next, self.config.bounds_for(*t), date);
            if change.changed() {
                info!(child = %child, activity_type = %t, from = change.previous, to = change.next, "Level changed");
            }
        }

        debug!(child = %child, "Selecting activities");
        let mut rng = StdRng::seed_from_u64(cycle_seed(self.config.selection.rng_seed, &child, date));
        let selection = selector::select(&working, &self.bank, &self.config.composition, &self.config.selection, &mut rng)
            .map_err(fail(CycleStage::Selecting))?;
        if !selection.notes.is_empty() {
            warn!(child = %child, notes = selection.notes.len(), "Selection needed fallbacks");
        }

        let difficulty = difficulty_summary(&plan, &selection);
        let served: Vec<String> = selection.ids().map(str::to_string).collect();
        let age = self.config.roster_entry(&child).and_then(|entry| entry.age);
        let extras = extras::daily(Theme::for_date(date), age, self.config.has_siblings(), &mut rng);
        let packet = composer::compose(&child, working.name(), date, selection.activities, difficulty, extras)
            .map_err(fail(CycleStage::Composing))?;

        working.remember_served(served.iter().map(String::as_str), date);
        Ok((packet, working))
    }

    /// Run one full cycle for `child` and commit it: the packet is archived,
    /// then the profile is saved. Any failure leaves the stored profile as it
    /// was.
    pub fn generate(&self, child: &ChildId, date: NaiveDate) -> std::result::Result<Packet, CycleFailure> {
        self.with_child_lock(child, || self.generate_locked(child, date))
    }

    fn generate_locked(&self, child: &ChildId, date: NaiveDate) -> std::result::Result<Packet, CycleFailure> {
        info!(child = %child, %date, "Generating packet");
        let profile = self.load_or_enroll(child).map_err(|error| CycleFailure {
            child: child.clone(),
            stage: CycleStage::Loading,
            error,
        })?;
        let (packet, updated) = self.build(&profile, date)?;

        let persisting = |error: EngineError| CycleFailure { child: child.clone(), stage: CycleStage::Persisting, error };
        self.store.archive_packet(&packet).map_err(persisting)?;
        self.store.save(&updated).map_err(persisting)?;
        info!(
            child = %child,
            activities = packet.activities.len(),
            minutes = packet.total_minutes(),
            "Packet ready"
        );
        Ok(packet)
    }

    /// Same cycle as [`generate`](Self::generate), nothing persisted.
    pub fn preview(&self, child: &ChildId, date: NaiveDate) -> std::result::Result<Packet, CycleFailure> {
        self.with_child_lock(child, || -> std::result::Result<Packet, CycleFailure> {
            let profile = self.load_or_enroll(child).map_err(|error| CycleFailure {
                child: child.clone(),
                stage: CycleStage::Loading,
                error,
            })?;
            let (packet, _) = self.build(&profile, date)?;
            Ok(packet)
        })
    }

    /// Generate for every roster child in order. A failed child is reported
    /// and skipped; a persistence failure stops the batch.
    pub fn generate_all(&self, date: NaiveDate) -> BatchReport {
        let mut report = BatchReport::default();
        for entry in &self.config.children {
            match self.generate(&entry.id, date) {
                Ok(packet) => report.packets.push(packet),
                Err(failure) => {
                    warn!("{}", failure);
                    let fatal = failure.is_fatal();
                    report.failures.push(failure);
                    if fatal {
                        report.halted = true;
                        break;
                    }
                }
            }
        }
        report
    }

    /// Record one outcome and persist the profile. Levels move at the next
    /// generation, not here.
    pub fn record(
        &self,
        child: &ChildId,
        activity_id: &str,
        outcome: Outcome,
        date: NaiveDate,
    ) -> Result<ChildProfile> {
        self.with_child_lock(child, || -> Result<ChildProfile> {
            let mut profile = self.load_or_enroll(child)?;
            feedback::record(&mut profile, &self.bank, activity_id, outcome, date)?;
            self.store.save(&profile)?;
            Ok(profile)
        })
    }

    /// [`record`](Self::record) for a captured [`FeedbackRecord`].
    pub fn ingest(&self, feedback: &FeedbackRecord) -> Result<ChildProfile> {
        self.record(&feedback.child_id, &feedback.activity_id, feedback.outcome, feedback.date)
    }
}

fn difficulty_summary(plan: &LevelPlan, selection: &Selection) -> BTreeMap<ActivityType, TypeDifficulty> {
    plan.iter()
        .map(|(t, change)| {
            let served_tiers = selection
                .activities
                .iter()
                .filter(|a| a.activity_type == *t)
                .map(|a| a.tier)
                .collect();
            let summary = TypeDifficulty {
                previous_level: change.previous,
                level: change.next,
                served_tiers,
                repeated: selection.repeated_ids(*t),
            };
            (*t, summary)
        })
        .collect()
}
