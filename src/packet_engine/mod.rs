//! Packet engine: difficulty adaptation, activity selection and packet assembly.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: child profile, activity templates, outcomes, packets |
//! | `config`    | `EngineConfig` and its TOML sections |
//! | `error`     | `EngineError`, `ErrorKind`, `CycleFailure` |
//! | `recency`   | Bounded FIFO of recently served activity ids |
//! | `bank`      | Read-only content bank indexed by id and (type, tier) |
//! | `content`   | Built-in templates, one module per activity type |
//! | `helpers`   | Template builders shared by `content` and tests |
//! | `pool`      | Candidate pool with seeded Fisher-Yates shuffle |
//! | `adapter`   | Next difficulty level from recent results |
//! | `selector`  | Non-repeating, tier-matched activity selection |
//! | `composer`  | Ordering, weekday theme and teaser |
//! | `extras`    | Morning password, team challenge, reflection prompts |
//! | `feedback`  | Outcome ingestion into the profile history |
//! | `store`     | `ProfileStore` trait, JSON file and in-memory stores |
//! | `generator` | `PacketEngine`: the load → adapt → select → compose → save cycle |

pub mod adapter;
pub mod bank;
pub mod composer;
pub mod config;
pub mod content;
pub mod error;
pub mod extras;
pub mod feedback;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod pool;
pub mod recency;
pub mod selector;
pub mod store;

pub use bank::ContentBank;
pub use composer::Theme;
pub use config::{
    AdaptationConfig, ChildConfig, Composition, EngineConfig, LevelBounds, LevelConfig,
    PageSize, RenderConfig, SelectionConfig, StorageConfig,
};
pub use error::{CycleFailure, CycleStage, EngineError, ErrorKind, Result};
pub use extras::{Extras, MorningPassword, PasswordStyle, TeamChallenge};
pub use generator::{BatchReport, PacketEngine};
pub use models::{
    ActivityTemplate, ActivityType, ChildId, ChildProfile, FeedbackRecord, HistoryRecord,
    Layout, LevelState, Outcome, Packet, TypeDifficulty,
};
pub use recency::RecencyWindow;
pub use store::{JsonFileStore, MemoryStore, ProfileStore};
