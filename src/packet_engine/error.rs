use std::fmt;

use thiserror::Error;

use crate::packet_engine::models::{ActivityType, ChildId};

/// Every failure the engine can report, grouped by [`ErrorKind`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown child: {0}")]
    ChildNotFound(ChildId),

    #[error("invalid child id {0:?}: use letters, digits, '-' or '_'")]
    InvalidChildId(String),

    #[error("unknown activity type: {0}")]
    ActivityTypeNotFound(String),

    #[error("unknown activity: {0}")]
    ActivityNotFound(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("content exhausted for {activity_type}: needed {needed}, only {available} available")]
    ContentExhausted {
        activity_type: ActivityType,
        needed: usize,
        available: usize,
    },

    #[error("persistence failure: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Coarse classification surfaced to the CLI and to callers that branch on
/// failure type rather than on the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Configuration,
    ContentExhaustion,
    PersistenceFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotFound           => write!(f, "not-found"),
            ErrorKind::Configuration      => write!(f, "configuration"),
            ErrorKind::ContentExhaustion  => write!(f, "content-exhaustion"),
            ErrorKind::PersistenceFailure => write!(f, "persistence-failure"),
        }
    }
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ChildNotFound(_)
            | EngineError::ActivityTypeNotFound(_)
            | EngineError::ActivityNotFound(_)      => ErrorKind::NotFound,
            EngineError::Configuration(_)
            | EngineError::InvalidChildId(_)        => ErrorKind::Configuration,
            EngineError::ContentExhausted { .. }    => ErrorKind::ContentExhaustion,
            EngineError::Persistence(_)             => ErrorKind::PersistenceFailure,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        EngineError::Configuration(msg.into())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Persistence(format!("json: {e}"))
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(e: toml::de::Error) -> Self {
        EngineError::Configuration(format!("toml: {e}"))
    }
}

// ---------------------------------------------------------------------------
// Cycle failures
// ---------------------------------------------------------------------------

/// Stage of one generation cycle. Used to report where a cycle stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStage {
    Loading,
    Adapting,
    Selecting,
    Composing,
    Persisting,
}

impl fmt::Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CycleStage::Loading    => "loading",
            CycleStage::Adapting   => "adapting",
            CycleStage::Selecting  => "selecting",
            CycleStage::Composing  => "composing",
            CycleStage::Persisting => "persisting",
        };
        write!(f, "{}", s)
    }
}

/// A generation cycle that did not produce a packet.
#[derive(Debug, Error)]
#[error("packet for {child} failed while {stage}: {error}")]
pub struct CycleFailure {
    pub child: ChildId,
    pub stage: CycleStage,
    #[source]
    pub error: EngineError,
}

impl CycleFailure {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// Persistence failures end the whole batch, not just this child.
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::PersistenceFailure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_group_variants() {
        assert_eq!(EngineError::ChildNotFound(ChildId::new("x")).kind(), ErrorKind::NotFound);
        assert_eq!(EngineError::ActivityNotFound("r-1".into()).kind(), ErrorKind::NotFound);
        assert_eq!(EngineError::config("bad").kind(), ErrorKind::Configuration);
        assert_eq!(EngineError::InvalidChildId("../x".into()).kind(), ErrorKind::Configuration);
        assert_eq!(
            EngineError::ContentExhausted { activity_type: ActivityType::Riddle, needed: 2, available: 1 }.kind(),
            ErrorKind::ContentExhaustion
        );
        assert_eq!(EngineError::Persistence("disk".into()).kind(), ErrorKind::PersistenceFailure);
    }

    #[test]
    fn exhaustion_message_names_the_type() {
        let e = EngineError::ContentExhausted { activity_type: ActivityType::Riddle, needed: 2, available: 1 };
        assert!(e.to_string().contains("riddle"), "{e}");
    }

    #[test]
    fn cycle_failure_reports_child_and_stage() {
        let f = CycleFailure {
            child: ChildId::new("dahlia"),
            stage: CycleStage::Selecting,
            error: EngineError::config("empty composition"),
        };
        let msg = f.to_string();
        assert!(msg.contains("dahlia") && msg.contains("selecting"), "{msg}");
        assert!(!f.is_fatal());
    }
}
